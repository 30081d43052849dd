use tracing::warn;

use crate::context::ExportContext;
use crate::scene::{ActorCatalog, ActorProperty, ObjectId, SceneObject};

use super::cdata::INDENT;
use super::error::{ActorErrorCode, ActorExportError};

pub const CUSTOM_ACTOR_NAME: &str = "Custom Actor";
pub const UNSET_NAME: &str = "(unset)";

/// Fields shared by every actor-placement row.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub name: String,
    pub id: String,
    pub pos: [f64; 3],
    pub rot: String,
    pub params: String,
}

impl Actor {
    /// A standard `ActorEntry` row.
    pub fn actor_entry_c(&self) -> String {
        let infos = [
            ("Actor ID", self.id.clone()),
            ("Position", self.position_c()),
            ("Rotation", format!("{{ {} }}", self.rot)),
            ("Parameters", self.params.clone()),
        ];
        format!(
            "{}{{\n{}\n{INDENT}}},\n",
            self.name_comment(),
            described_fields(&infos, 10)
        )
    }

    pub(crate) fn position_c(&self) -> String {
        let coords = self
            .pos
            .iter()
            .map(|coord| format!("{}", coord.round_ties_even() as i64))
            .collect::<Vec<_>>();
        format!("{{ {} }}", coords.join(", "))
    }

    /// Indented `// <name>` line plus the row indent; both vanish for an
    /// empty name, leaving the row's `{` unindented.
    pub(crate) fn name_comment(&self) -> String {
        if self.name.is_empty() {
            String::new()
        } else {
            format!("{INDENT}// {}\n{INDENT}", self.name)
        }
    }
}

/// `/* <desc> */ <value>` lines at double indent, joined by `,\n`.
pub(crate) fn described_fields(infos: &[(&str, String)], width: usize) -> String {
    infos
        .iter()
        .map(|(desc, info)| format!("{INDENT}{INDENT}/* {desc:<width$} */ {info}"))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Catalog name without the ` - <ID>` suffix, or the custom-actor label.
pub(crate) fn display_name(catalog: &dyn ActorCatalog, actor: &ActorProperty) -> String {
    if actor.is_custom() {
        return CUSTOM_ACTOR_NAME.to_string();
    }
    let id = actor.actor_id.as_str();
    match catalog.actor_name(id) {
        Some(name) => {
            let suffix = format!(" - {}", id.strip_prefix("ACTOR_").unwrap_or(id));
            name.replace(&suffix, "")
        }
        None => {
            warn!(actor_id = %id, "actor_id_missing_from_catalog");
            id.to_string()
        }
    }
}

/// Typed params only apply with the new actor panel and a non-custom actor.
pub(crate) fn select_params(
    actor: &ActorProperty,
    use_new_actor_panel: bool,
    custom: bool,
) -> String {
    if use_new_actor_panel && !custom {
        actor.params.clone()
    } else {
        actor.params_custom.clone()
    }
}

pub(crate) fn referenced_room_index(
    ctx: &ExportContext<'_>,
    room: ObjectId,
    marker: &SceneObject,
) -> Result<u32, ActorExportError> {
    ctx.graph
        .object(room)
        .and_then(SceneObject::room_index)
        .ok_or_else(|| {
            ActorExportError::at_object(
                ActorErrorCode::InvalidRoomReference,
                format!("object {room:?} assigned as a room is not a room empty object"),
                &marker.name,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::StaticActorCatalog;

    fn sample_actor() -> Actor {
        Actor {
            name: "Player".to_string(),
            id: "ACTOR_PLAYER".to_string(),
            pos: [10.4, -2.5, 3.5],
            rot: "DEG_TO_BINANG(0.000), DEG_TO_BINANG(90.000), DEG_TO_BINANG(0.000)".to_string(),
            params: "0x0FFF".to_string(),
        }
    }

    #[test]
    fn actor_entry_layout_is_stable() {
        let expected = concat!(
            "    // Player\n",
            "    {\n",
            "        /* Actor ID   */ ACTOR_PLAYER,\n",
            "        /* Position   */ { 10, -2, 4 },\n",
            "        /* Rotation   */ { DEG_TO_BINANG(0.000), DEG_TO_BINANG(90.000), DEG_TO_BINANG(0.000) },\n",
            "        /* Parameters */ 0x0FFF\n",
            "    },\n",
        );
        assert_eq!(sample_actor().actor_entry_c(), expected);
    }

    #[test]
    fn empty_name_omits_comment_line() {
        let actor = Actor {
            name: String::new(),
            ..sample_actor()
        };
        assert!(actor.actor_entry_c().starts_with("{\n        /* Actor ID   */"));
    }

    #[test]
    fn display_name_strips_id_suffix() {
        let catalog =
            StaticActorCatalog::new().with_actor("ACTOR_EN_DOOR", "Wooden Door - EN_DOOR");
        let actor = ActorProperty {
            actor_id: "ACTOR_EN_DOOR".to_string(),
            ..ActorProperty::default()
        };
        assert_eq!(display_name(&catalog, &actor), "Wooden Door");
    }

    #[test]
    fn display_name_for_custom_and_unknown() {
        let catalog = StaticActorCatalog::new();
        let custom = ActorProperty {
            actor_id: "Custom".to_string(),
            ..ActorProperty::default()
        };
        assert_eq!(display_name(&catalog, &custom), CUSTOM_ACTOR_NAME);
        let unknown = ActorProperty {
            actor_id: "ACTOR_MYSTERY".to_string(),
            ..ActorProperty::default()
        };
        assert_eq!(display_name(&catalog, &unknown), "ACTOR_MYSTERY");
    }

    #[test]
    fn params_follow_panel_mode() {
        let actor = ActorProperty {
            params: "0x0001".to_string(),
            params_custom: "MY_PARAMS".to_string(),
            ..ActorProperty::default()
        };
        assert_eq!(select_params(&actor, true, false), "0x0001");
        assert_eq!(select_params(&actor, false, false), "MY_PARAMS");
        assert_eq!(select_params(&actor, true, true), "MY_PARAMS");
    }
}
