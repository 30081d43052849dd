use std::sync::Arc;

use super::cdata::{CData, INDENT};
use super::entrance::{null_if_empty, EntranceActor, SceneEntranceActors};

pub const SPAWN_ELEMENT_TYPE: &str = "Spawn";

/// Spawn-point to room mapping. Shares its rows with the entrance table it
/// was built from, so both always agree on order and length.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpawns {
    pub name: String,
    pub entries: Arc<[EntranceActor]>,
}

impl SceneSpawns {
    pub fn new(name: &str, entrances: &SceneEntranceActors) -> Self {
        Self {
            name: name.to_string(),
            entries: Arc::clone(&entrances.entries),
        }
    }

    pub fn cmd(&self) -> String {
        format!(
            "{INDENT}SCENE_CMD_ENTRANCE_LIST({}),\n",
            null_if_empty(&self.name, self.entries.len())
        )
    }

    pub fn to_c(&self) -> CData {
        let mut body = format!("{INDENT}// {{ Spawn Actor List Index, Room Index }}\n");
        for entry in self.entries.iter() {
            body.push_str(&entry.entry_c());
        }
        CData::array(SPAWN_ELEMENT_TYPE, &self.name, &body)
    }
}
