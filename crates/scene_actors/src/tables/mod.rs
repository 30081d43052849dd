mod actor;
mod binang;
mod cdata;
mod entrance;
mod error;
mod header;
mod parse;
mod spawns;
#[cfg(test)]
pub(crate) mod test_support;
mod transition;

pub use actor::{Actor, CUSTOM_ACTOR_NAME, UNSET_NAME};
pub use binang::{binang_expr, binang_to_degrees, eval_binang, DEG_TO_BINANG};
pub use cdata::{CData, INDENT};
pub use entrance::{EntranceActor, SceneEntranceActors, ENTRANCE_ELEMENT_TYPE, PLAYER_ACTOR_ID};
pub use error::{ActorErrorCode, ActorExportError, TableParseError};
pub use header::SceneActorTables;
pub use parse::RowConvention;
pub use spawns::{SceneSpawns, SPAWN_ELEMENT_TYPE};
pub use transition::{
    SceneTransitionActors, TransitionActor, TRANSITION_ELEMENT_TYPE, TRANSITION_FIELD_COUNT,
};
