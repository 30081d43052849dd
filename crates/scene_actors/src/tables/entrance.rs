use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::context::ExportContext;
use crate::scene::{ObjectId, ObjectKind, SceneObject};

use super::actor::{display_name, referenced_room_index, select_params, Actor};
use super::binang::binang_expr;
use super::cdata::{CData, INDENT};
use super::error::{ActorErrorCode, ActorExportError};

pub const PLAYER_ACTOR_ID: &str = "ACTOR_PLAYER";
pub const ENTRANCE_ELEMENT_TYPE: &str = "ActorEntry";

#[derive(Debug, Clone, PartialEq)]
pub struct EntranceActor {
    pub actor: Actor,
    pub room_index: u32,
    pub spawn_index: u32,
}

impl EntranceActor {
    pub fn from_marker(
        ctx: &ExportContext<'_>,
        scene: &SceneObject,
        marker_id: ObjectId,
    ) -> Result<Option<Self>, ActorExportError> {
        let marker = ctx.object(marker_id)?;
        let ObjectKind::Entrance(prop) = &marker.kind else {
            return Err(ActorExportError::at_object(
                ActorErrorCode::UnknownObject,
                "object is not an entrance marker".to_string(),
                &marker.name,
            ));
        };
        let actor_prop = &prop.actor;
        if !actor_prop.is_exported_for(ctx.header_index) {
            debug!(
                object = %marker.name,
                header_index = ctx.header_index,
                actor_id = %actor_prop.actor_id,
                "entrance_marker_skipped"
            );
            return Ok(None);
        }

        let transform = ctx.convert(scene, marker);
        let Some(tied_room) = prop.tied_room else {
            return Err(ActorExportError::at_object(
                ActorErrorCode::MissingRoom,
                "missing room empty object assigned to the entrance".to_string(),
                &marker.name,
            ));
        };
        let room_index = referenced_room_index(ctx, tied_room, marker)?;

        let id = if prop.custom_actor {
            actor_prop.actor_id_custom.clone()
        } else {
            PLAYER_ACTOR_ID.to_string()
        };
        let rot = transform
            .rotation
            .iter()
            .map(|axis| binang_expr(*axis))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Some(Self {
            actor: Actor {
                name: display_name(ctx.catalog, actor_prop),
                id,
                pos: transform.position,
                rot,
                params: select_params(
                    actor_prop,
                    ctx.settings.use_new_actor_panel,
                    prop.custom_actor,
                ),
            },
            room_index,
            spawn_index: prop.spawn_index,
        }))
    }

    /// A `{ <spawn index>, <room index> }` spawn row.
    pub fn entry_c(&self) -> String {
        format!("{INDENT}{{ {}, {} }},\n", self.spawn_index, self.room_index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntranceActors {
    pub name: String,
    pub entries: Arc<[EntranceActor]>,
}

impl SceneEntranceActors {
    pub fn new(name: &str, ctx: &ExportContext<'_>) -> Result<Self, ActorExportError> {
        let scene = ctx.scene_object()?;
        let markers = ctx
            .graph
            .object_list(ctx.scene, |kind| matches!(kind, ObjectKind::Entrance(_)));

        let mut by_spawn_index = BTreeMap::<u32, EntranceActor>::new();
        for id in &markers {
            let Some(entry) = EntranceActor::from_marker(ctx, scene, *id)? else {
                continue;
            };
            let object_name = ctx.object(*id)?.name.as_str();
            insert_unique(&mut by_spawn_index, entry, Some(object_name))?;
        }

        let table = Self::from_sorted(name, by_spawn_index)?;
        info!(
            table = name,
            header_index = ctx.header_index,
            marker_count = markers.len(),
            entry_count = table.entries.len(),
            "entrance_actor_table_built"
        );
        Ok(table)
    }

    /// Validates already-built entries in any order.
    pub fn from_entries(
        name: &str,
        entries: impl IntoIterator<Item = EntranceActor>,
    ) -> Result<Self, ActorExportError> {
        let mut by_spawn_index = BTreeMap::<u32, EntranceActor>::new();
        for entry in entries {
            insert_unique(&mut by_spawn_index, entry, None)?;
        }
        Self::from_sorted(name, by_spawn_index)
    }

    fn from_sorted(
        name: &str,
        by_spawn_index: BTreeMap<u32, EntranceActor>,
    ) -> Result<Self, ActorExportError> {
        let consecutive = by_spawn_index
            .keys()
            .enumerate()
            .all(|(position, spawn_index)| *spawn_index as usize == position);
        if !consecutive {
            let indices = by_spawn_index
                .keys()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ActorExportError::new(
                ActorErrorCode::NonConsecutiveSpawnIndices,
                format!("the spawn indices are not consecutive: [{indices}]"),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            entries: by_spawn_index.into_values().collect(),
        })
    }

    pub fn cmd(&self) -> String {
        format!(
            "{INDENT}SCENE_CMD_SPAWN_LIST({}, {}),\n",
            self.entries.len(),
            null_if_empty(&self.name, self.entries.len())
        )
    }

    pub fn to_c(&self) -> CData {
        let rows = self
            .entries
            .iter()
            .map(|entry| entry.actor.actor_entry_c())
            .collect::<String>();
        CData::array(ENTRANCE_ELEMENT_TYPE, &self.name, &rows)
    }
}

fn insert_unique(
    by_spawn_index: &mut BTreeMap<u32, EntranceActor>,
    entry: EntranceActor,
    object_name: Option<&str>,
) -> Result<(), ActorExportError> {
    if by_spawn_index.contains_key(&entry.spawn_index) {
        let message = format!("repeated spawn index: {}", entry.spawn_index);
        return Err(match object_name {
            Some(object_name) => ActorExportError::at_object(
                ActorErrorCode::DuplicateSpawnIndex,
                message,
                object_name,
            ),
            None => ActorExportError::new(ActorErrorCode::DuplicateSpawnIndex, message),
        });
    }
    by_spawn_index.insert(entry.spawn_index, entry);
    Ok(())
}

pub(crate) fn null_if_empty(name: &str, len: usize) -> &str {
    if len > 0 {
        name
    } else {
        "NULL"
    }
}
