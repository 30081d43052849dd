use serde::{Deserialize, Serialize};

use super::graph::ObjectId;

pub const ACTOR_ID_NONE: &str = "None";
pub const ACTOR_ID_CUSTOM: &str = "Custom";
pub const CUSTOM_PROP_VALUE: &str = "Custom";

const NON_CUTSCENE_HEADER_COUNT: u32 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneSetupPreset {
    #[default]
    AllSceneSetups,
    AllNonCutsceneSceneSetups,
    Custom,
}

/// Which scene headers (setups) a marker is active in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderSettings {
    pub preset: SceneSetupPreset,
    pub child_day_header: bool,
    pub child_night_header: bool,
    pub adult_day_header: bool,
    pub adult_night_header: bool,
    pub cutscene_headers: Vec<u32>,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            preset: SceneSetupPreset::AllSceneSetups,
            child_day_header: true,
            child_night_header: true,
            adult_day_header: true,
            adult_night_header: true,
            cutscene_headers: Vec::new(),
        }
    }
}

impl HeaderSettings {
    pub fn is_header_valid(&self, header_index: u32) -> bool {
        match self.preset {
            SceneSetupPreset::AllSceneSetups => true,
            SceneSetupPreset::AllNonCutsceneSceneSetups => {
                header_index < NON_CUTSCENE_HEADER_COUNT
            }
            SceneSetupPreset::Custom => {
                let base_headers = [
                    self.child_day_header,
                    self.child_night_header,
                    self.adult_day_header,
                    self.adult_night_header,
                ];
                let base_match = base_headers
                    .get(header_index as usize)
                    .copied()
                    .unwrap_or(false);
                base_match || self.cutscene_headers.contains(&header_index)
            }
        }
    }
}

/// An enum-backed property whose `Custom` choice defers to a free-form string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropValue {
    pub value: String,
    pub custom: String,
}

impl Default for PropValue {
    fn default() -> Self {
        Self::new("0x00")
    }
}

impl PropValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            custom: String::new(),
        }
    }

    pub fn custom(custom: impl Into<String>) -> Self {
        Self {
            value: CUSTOM_PROP_VALUE.to_string(),
            custom: custom.into(),
        }
    }

    pub fn resolve(&self) -> &str {
        if self.value == CUSTOM_PROP_VALUE {
            &self.custom
        } else {
            &self.value
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorProperty {
    pub actor_id: String,
    pub actor_id_custom: String,
    pub params: String,
    pub params_custom: String,
    pub header_settings: HeaderSettings,
}

impl Default for ActorProperty {
    fn default() -> Self {
        Self {
            actor_id: ACTOR_ID_NONE.to_string(),
            actor_id_custom: String::new(),
            params: "0x0000".to_string(),
            params_custom: "0x0000".to_string(),
            header_settings: HeaderSettings::default(),
        }
    }
}

impl ActorProperty {
    pub fn is_none(&self) -> bool {
        self.actor_id == ACTOR_ID_NONE
    }

    pub fn is_custom(&self) -> bool {
        self.actor_id == ACTOR_ID_CUSTOM
    }

    /// True when the marker takes part in the export of `header_index`.
    pub fn is_exported_for(&self, header_index: u32) -> bool {
        self.header_settings.is_header_valid(header_index) && !self.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomHeader {
    pub room_index: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionActorProperty {
    pub actor: ActorProperty,
    pub is_room_transition: bool,
    pub from_room: Option<ObjectId>,
    pub to_room: Option<ObjectId>,
    pub camera_transition_front: PropValue,
    pub camera_transition_back: PropValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceProperty {
    pub actor: ActorProperty,
    pub custom_actor: bool,
    pub tied_room: Option<ObjectId>,
    pub spawn_index: u32,
}
