use tracing::{debug, info};

use crate::context::ExportContext;
use crate::scene::{ObjectId, ObjectKind, SceneObject};

use super::actor::{
    described_fields, display_name, referenced_room_index, select_params, Actor, UNSET_NAME,
};
use super::binang::{binang_expr, eval_binang, format_hex, parse_int, DEG_TO_BINANG};
use super::cdata::{CData, INDENT};
use super::error::{ActorErrorCode, ActorExportError, TableParseError};
use super::parse::{array_body, normalize, row_fields, split_rows, RowConvention};

pub const TRANSITION_FIELD_COUNT: usize = 10;
pub const TRANSITION_ELEMENT_TYPE: &str = "TransitionActorEntry";

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionActor {
    pub actor: Actor,
    pub is_room_transition: bool,
    pub room_from: u32,
    pub room_to: u32,
    pub camera_front: String,
    pub camera_back: String,
}

impl TransitionActor {
    /// Builds the entry for one transition marker, or `None` when the marker
    /// is not exported for the active header.
    pub fn from_marker(
        ctx: &ExportContext<'_>,
        scene: &SceneObject,
        marker_id: ObjectId,
        owning_room: Option<u32>,
    ) -> Result<Option<Self>, ActorExportError> {
        let marker = ctx.object(marker_id)?;
        let ObjectKind::TransitionActor(prop) = &marker.kind else {
            return Err(ActorExportError::at_object(
                ActorErrorCode::UnknownObject,
                "object is not a transition actor marker".to_string(),
                &marker.name,
            ));
        };
        let actor_prop = &prop.actor;
        if !actor_prop.is_exported_for(ctx.header_index) {
            debug!(
                object = %marker.name,
                header_index = ctx.header_index,
                actor_id = %actor_prop.actor_id,
                "transition_marker_skipped"
            );
            return Ok(None);
        }

        let transform = ctx.convert(scene, marker);

        let (room_from, room_to) = if prop.is_room_transition {
            let (Some(from_room), Some(to_room)) = (prop.from_room, prop.to_room) else {
                return Err(ActorExportError::at_object(
                    ActorErrorCode::MissingRoom,
                    "missing room empty object assigned to transition".to_string(),
                    &marker.name,
                ));
            };
            (
                referenced_room_index(ctx, from_room, marker)?,
                referenced_room_index(ctx, to_room, marker)?,
            )
        } else {
            let room_index = owning_room.ok_or_else(|| {
                ActorExportError::at_object(
                    ActorErrorCode::MissingOwningRoom,
                    "transition actor is not parented to a room".to_string(),
                    &marker.name,
                )
            })?;
            (room_index, room_index)
        };

        let custom = actor_prop.is_custom();
        let id = if custom {
            actor_prop.actor_id_custom.clone()
        } else {
            actor_prop.actor_id.clone()
        };

        Ok(Some(Self {
            actor: Actor {
                name: display_name(ctx.catalog, actor_prop),
                id,
                pos: transform.position,
                // Transitions only store the facing angle.
                rot: binang_expr(transform.rotation[1]),
                params: select_params(actor_prop, ctx.settings.use_new_actor_panel, custom),
            },
            is_room_transition: room_from != room_to,
            room_from,
            room_to,
            camera_front: prop.camera_transition_front.resolve().to_string(),
            camera_back: prop.camera_transition_back.resolve().to_string(),
        }))
    }

    /// Maps the ten positional fields of one parsed row.
    pub fn from_fields(row: usize, fields: &[String]) -> Result<Self, TableParseError> {
        if fields.len() != TRANSITION_FIELD_COUNT {
            return Err(TableParseError::FieldCount {
                row,
                expected: TRANSITION_FIELD_COUNT,
                found: fields.len(),
                text: fields.join(","),
            });
        }

        let room_from = room_field(row, "room_from", &fields[0])?;
        let room_to = room_field(row, "room_to", &fields[2])?;
        let pos = [
            int_field(row, "pos.x", &fields[5])? as f64,
            int_field(row, "pos.y", &fields[6])? as f64,
            int_field(row, "pos.z", &fields[7])? as f64,
        ];
        let rot = if fields[8].contains(DEG_TO_BINANG) {
            let value = eval_binang(&fields[8]).ok_or_else(|| TableParseError::InvalidRotation {
                row,
                value: fields[8].clone(),
            })?;
            format_hex(value)
        } else {
            fields[8].clone()
        };

        Ok(Self {
            actor: Actor {
                name: UNSET_NAME.to_string(),
                id: fields[4].clone(),
                pos,
                rot,
                params: fields[9].clone(),
            },
            is_room_transition: room_from != room_to,
            room_from,
            room_to,
            camera_front: fields[1].clone(),
            camera_back: fields[3].clone(),
        })
    }

    pub fn entry_c(&self) -> String {
        let sides = [
            (self.room_from, &self.camera_front),
            (self.room_to, &self.camera_back),
        ];
        let room_data = sides
            .iter()
            .map(|(room, camera)| format!("{room}, {camera}"))
            .collect::<Vec<_>>()
            .join(", ");
        let infos = [
            ("Room & Cam Index (Front, Back)", format!("{{ {room_data} }}")),
            ("Actor ID", self.actor.id.clone()),
            ("Position", self.actor.position_c()),
            ("Rotation Y", self.actor.rot.clone()),
            ("Parameters", self.actor.params.clone()),
        ];
        format!(
            "{}{{\n{}\n{INDENT}}},\n",
            self.actor.name_comment(),
            described_fields(&infos, 30)
        )
    }
}

fn int_field(row: usize, field: &'static str, value: &str) -> Result<i64, TableParseError> {
    parse_int(value).ok_or_else(|| TableParseError::InvalidInteger {
        row,
        field,
        value: value.to_string(),
    })
}

fn room_field(row: usize, field: &'static str, value: &str) -> Result<u32, TableParseError> {
    let parsed = int_field(row, field, value)?;
    u32::try_from(parsed).map_err(|_| TableParseError::InvalidInteger {
        row,
        field,
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneTransitionActors {
    pub name: String,
    pub entries: Vec<TransitionActor>,
}

impl SceneTransitionActors {
    pub fn new(name: &str, ctx: &ExportContext<'_>) -> Result<Self, ActorExportError> {
        let scene = ctx.scene_object()?;
        let mut markers = ctx
            .graph
            .object_list(ctx.scene, |kind| {
                matches!(kind, ObjectKind::TransitionActor(_))
            })
            .into_iter()
            .map(|id| {
                let owning_room = ctx
                    .graph
                    .owning_room(id, ctx.scene)
                    .and_then(|room| ctx.graph.object(room))
                    .and_then(SceneObject::room_index);
                let object_name = ctx
                    .graph
                    .object(id)
                    .map(|object| object.name.as_str())
                    .unwrap_or_default();
                (owning_room, object_name, id)
            })
            .collect::<Vec<_>>();
        // Unparented markers sort last; they only fail if they get exported.
        markers.sort_by_key(|(room, object_name, id)| {
            (room.unwrap_or(u32::MAX), *object_name, *id)
        });

        let mut entries = Vec::with_capacity(markers.len());
        for (owning_room, _, id) in &markers {
            if let Some(entry) = TransitionActor::from_marker(ctx, scene, *id, *owning_room)? {
                entries.push(entry);
            }
        }

        info!(
            table = name,
            header_index = ctx.header_index,
            marker_count = markers.len(),
            entry_count = entries.len(),
            "transition_actor_table_built"
        );
        Ok(Self {
            name: name.to_string(),
            entries,
        })
    }

    /// Parses the rows of a transition actor array body.
    pub fn from_data(raw: &str, convention: RowConvention) -> Result<Self, TableParseError> {
        parse_rows(&normalize(raw), convention)
    }

    /// Parses the first array definition found in a C source fragment.
    pub fn from_c_source(
        source: &str,
        convention: RowConvention,
    ) -> Result<Self, TableParseError> {
        let normalized = normalize(source);
        parse_rows(array_body(&normalized)?, convention)
    }

    pub fn cmd(&self) -> String {
        format!(
            "{INDENT}SCENE_CMD_TRANSITION_ACTOR_LIST({}, {}),\n",
            self.entries.len(),
            self.name
        )
    }

    pub fn to_c(&self) -> CData {
        let rows = self
            .entries
            .iter()
            .map(TransitionActor::entry_c)
            .collect::<Vec<_>>()
            .join("\n");
        CData::array(TRANSITION_ELEMENT_TYPE, &self.name, &rows)
    }
}

fn parse_rows(
    normalized: &str,
    convention: RowConvention,
) -> Result<SceneTransitionActors, TableParseError> {
    let entries = split_rows(normalized, convention)?
        .into_iter()
        .enumerate()
        .map(|(row, text)| TransitionActor::from_fields(row, &row_fields(text)))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        entry_count = entries.len(),
        convention = ?convention,
        "transition_actor_table_parsed"
    );
    Ok(SceneTransitionActors {
        name: UNSET_NAME.to_string(),
        entries,
    })
}
