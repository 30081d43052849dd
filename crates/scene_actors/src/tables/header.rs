use tracing::info;

use crate::context::ExportContext;

use super::cdata::CData;
use super::entrance::SceneEntranceActors;
use super::error::{ActorErrorCode, ActorExportError};
use super::spawns::SceneSpawns;
use super::transition::SceneTransitionActors;

/// Every actor placement table of one scene header.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneActorTables {
    pub header_name: String,
    pub transitions: SceneTransitionActors,
    pub entrances: SceneEntranceActors,
    pub spawns: SceneSpawns,
}

impl SceneActorTables {
    pub fn header_name(scene_name: &str, header_index: u32) -> String {
        format!("{scene_name}_header{header_index:02}")
    }

    pub fn new(scene_name: &str, ctx: &ExportContext<'_>) -> Result<Self, ActorExportError> {
        let header_name = Self::header_name(scene_name, ctx.header_index);
        let transitions =
            SceneTransitionActors::new(&format!("{header_name}_transitionActors"), ctx)?;
        let entrances =
            SceneEntranceActors::new(&format!("{header_name}_playerEntryList"), ctx)?;
        let spawns = SceneSpawns::new(&format!("{header_name}_entranceList"), &entrances);

        Self::check_spawn_list(&spawns, entrances.entries.len())?;

        let tables = Self {
            header_name,
            transitions,
            entrances,
            spawns,
        };
        info!(
            header = %tables.header_name,
            transition_count = tables.transitions.entries.len(),
            entrance_count = tables.entrances.entries.len(),
            "scene_actor_tables_built"
        );
        Ok(tables)
    }

    /// Spawn rows index into a separately emitted actor list; every index
    /// must land inside a list of `actor_list_len` entries.
    pub fn check_spawn_list(
        spawns: &SceneSpawns,
        actor_list_len: usize,
    ) -> Result<(), ActorExportError> {
        match spawns
            .entries
            .iter()
            .find(|entry| entry.spawn_index as usize >= actor_list_len)
        {
            Some(entry) => Err(ActorExportError::new(
                ActorErrorCode::SpawnListMismatch,
                format!(
                    "{} index {} is out of range for an actor list of {actor_list_len} entries",
                    spawns.name, entry.spawn_index
                ),
            )),
            None => Ok(()),
        }
    }

    /// Scene command lines, in header order.
    pub fn cmds(&self) -> String {
        let mut out = String::new();
        if !self.transitions.entries.is_empty() {
            out.push_str(&self.transitions.cmd());
        }
        out.push_str(&self.entrances.cmd());
        out.push_str(&self.spawns.cmd());
        out
    }

    pub fn to_c(&self) -> CData {
        let mut data = CData::default();
        if !self.transitions.entries.is_empty() {
            data.append(self.transitions.to_c());
        }
        if !self.entrances.entries.is_empty() {
            data.append(self.entrances.to_c());
            data.append(self.spawns.to_c());
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::entrance::PLAYER_ACTOR_ID;
    use crate::tables::test_support::{entrance, transition, Fixture};
    use crate::tables::{Actor, EntranceActor};

    fn spawn_row(spawn_index: u32) -> EntranceActor {
        EntranceActor {
            actor: Actor {
                name: "Player".to_string(),
                id: PLAYER_ACTOR_ID.to_string(),
                pos: [0.0, 0.0, 0.0],
                rot: "0, 0, 0".to_string(),
                params: "0x0FFF".to_string(),
            },
            room_index: 0,
            spawn_index,
        }
    }

    #[test]
    fn header_name_is_zero_padded() {
        assert_eq!(SceneActorTables::header_name("spot00", 3), "spot00_header03");
        assert_eq!(SceneActorTables::header_name("spot00", 12), "spot00_header12");
    }

    #[test]
    fn full_header_emits_all_tables_in_order() {
        let mut fixture = Fixture::new();
        let room = fixture.add_room("room_0", 0);
        fixture.add_transition("door", room, transition("ACTOR_EN_DOOR"));
        fixture.add_entrance("spawn", room, entrance(0, Some(room)));

        let tables = SceneActorTables::new("spot00", &fixture.ctx(0)).expect("tables");
        assert_eq!(
            tables.cmds(),
            concat!(
                "    SCENE_CMD_TRANSITION_ACTOR_LIST(1, spot00_header00_transitionActors),\n",
                "    SCENE_CMD_SPAWN_LIST(1, spot00_header00_playerEntryList),\n",
                "    SCENE_CMD_ENTRANCE_LIST(spot00_header00_entranceList),\n",
            )
        );

        let data = tables.to_c();
        assert_eq!(
            data.header,
            concat!(
                "extern TransitionActorEntry spot00_header00_transitionActors[];\n",
                "extern ActorEntry spot00_header00_playerEntryList[];\n",
                "extern Spawn spot00_header00_entranceList[];\n",
            )
        );
        let position = |name: &str| data.source.find(name).expect("definition present");
        let transitions_at = position("spot00_header00_transitionActors[] =");
        let entrances_at = position("spot00_header00_playerEntryList[] =");
        let spawns_at = position("spot00_header00_entranceList[] =");
        assert!(transitions_at < entrances_at);
        assert!(entrances_at < spawns_at);
    }

    #[test]
    fn empty_header_keeps_spawn_commands_only() {
        let fixture = Fixture::new();
        let tables = SceneActorTables::new("spot00", &fixture.ctx(1)).expect("tables");
        assert_eq!(
            tables.cmds(),
            "    SCENE_CMD_SPAWN_LIST(0, NULL),\n    SCENE_CMD_ENTRANCE_LIST(NULL),\n"
        );
        assert_eq!(tables.to_c(), CData::default());
    }

    #[test]
    fn build_errors_propagate() {
        let mut fixture = Fixture::new();
        let room = fixture.add_room("room_0", 0);
        fixture.add_entrance("a", room, entrance(0, Some(room)));
        fixture.add_entrance("b", room, entrance(2, Some(room)));

        let err = SceneActorTables::new("spot00", &fixture.ctx(0)).expect_err("gap");
        assert_eq!(err.code, ActorErrorCode::NonConsecutiveSpawnIndices);
    }

    #[test]
    fn spawn_list_must_fit_the_actor_list() {
        let entrances = SceneEntranceActors::from_entries(
            "spot00_header00_playerEntryList",
            [spawn_row(0), spawn_row(1), spawn_row(2)],
        )
        .expect("entrances");
        let spawns = SceneSpawns::new("spot00_header00_entranceList", &entrances);

        SceneActorTables::check_spawn_list(&spawns, 3).expect("matching list");
        let err = SceneActorTables::check_spawn_list(&spawns, 2).expect_err("short list");
        assert_eq!(err.code, ActorErrorCode::SpawnListMismatch);
        assert!(err.message.contains("index 2"));
    }
}
