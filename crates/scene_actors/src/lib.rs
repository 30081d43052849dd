//! Scene actor placement tables: transition actors, player entrances and
//! spawn points, built from a scene graph and emitted as C data.

mod json;

pub mod context;
pub mod output;
pub mod scene;
pub mod tables;

pub use context::{ExportContext, ExportSettings};
pub use json::JsonPathError;
pub use output::{
    hash_export_inputs, write_actor_tables, ExportInputs, OutputError, OutputPaths,
    RewriteReason, WriteOutcome,
};
pub use scene::{
    ActorCatalog, AxisConvertingResolver, CatalogError, ObjectId, SceneGraph, SceneLoadError,
    StaticActorCatalog, TransformResolver,
};
pub use tables::{
    ActorErrorCode, ActorExportError, CData, EntranceActor, RowConvention, SceneActorTables,
    SceneEntranceActors, SceneSpawns, SceneTransitionActors, TableParseError, TransitionActor,
};
