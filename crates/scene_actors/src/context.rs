use serde::{Deserialize, Serialize};

use crate::json::{deserialize_with_path, JsonPathError};
use crate::scene::{
    ActorCatalog, ConvertedTransform, ObjectId, RootTransform, SceneGraph, SceneObject,
    TransformResolver,
};
use crate::tables::{ActorErrorCode, ActorExportError};

/// Scene-wide flags the host supplies for an export pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Typed actor parameters are only used with the new actor panel.
    pub use_new_actor_panel: bool,
    pub root_transform: RootTransform,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            use_new_actor_panel: true,
            root_transform: RootTransform::default(),
        }
    }
}

impl ExportSettings {
    pub fn from_json_str(raw: &str) -> Result<Self, JsonPathError> {
        deserialize_with_path(raw)
    }
}

/// Everything a table builder reads during one export pass.
#[derive(Clone, Copy)]
pub struct ExportContext<'a> {
    pub graph: &'a SceneGraph,
    pub scene: ObjectId,
    pub header_index: u32,
    pub settings: ExportSettings,
    pub catalog: &'a dyn ActorCatalog,
    pub resolver: &'a dyn TransformResolver,
}

impl<'a> ExportContext<'a> {
    pub(crate) fn scene_object(&self) -> Result<&'a SceneObject, ActorExportError> {
        self.graph.object(self.scene).ok_or_else(|| {
            ActorExportError::new(
                ActorErrorCode::UnknownObject,
                format!("scene object {:?} is not in the scene graph", self.scene),
            )
        })
    }

    pub(crate) fn convert(&self, scene: &SceneObject, object: &SceneObject) -> ConvertedTransform {
        self.resolver
            .resolve(&self.settings.root_transform, scene, object)
    }

    pub(crate) fn object(&self, id: ObjectId) -> Result<&'a SceneObject, ActorExportError> {
        self.graph.object(id).ok_or_else(|| {
            ActorExportError::new(
                ActorErrorCode::UnknownObject,
                format!("object {id:?} is not in the scene graph"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_missing_fields() {
        let settings = ExportSettings::from_json_str(r#"{"use_new_actor_panel":false}"#)
            .expect("settings");
        assert!(!settings.use_new_actor_panel);
        assert_eq!(settings.root_transform, RootTransform::default());
    }

    #[test]
    fn settings_error_names_field() {
        let err = ExportSettings::from_json_str(r#"{"root_transform":{"scale":"big"}}"#)
            .expect_err("bad scale");
        assert_eq!(err.path, "root_transform.scale");
    }
}
