use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::json::{deserialize_with_path, JsonPathError};

use super::props::{EntranceProperty, RoomHeader, TransitionActorProperty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

/// Object type plus, for empties, the marker kind and its property block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ObjectKind {
    Scene,
    Room(RoomHeader),
    TransitionActor(TransitionActorProperty),
    Entrance(EntranceProperty),
    Empty,
    Mesh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub parent: Option<ObjectId>,
    /// World-space location in source units.
    #[serde(default)]
    pub location: [f64; 3],
    /// World-space XYZ euler rotation in radians.
    #[serde(default)]
    pub rotation_euler: [f64; 3],
    #[serde(flatten)]
    pub kind: ObjectKind,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, parent: Option<ObjectId>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            parent,
            location: [0.0; 3],
            rotation_euler: [0.0; 3],
            kind,
        }
    }

    pub fn with_location(mut self, location: [f64; 3]) -> Self {
        self.location = location;
        self
    }

    pub fn with_rotation(mut self, rotation_euler: [f64; 3]) -> Self {
        self.rotation_euler = rotation_euler;
        self
    }

    pub fn room_index(&self) -> Option<u32> {
        match &self.kind {
            ObjectKind::Room(header) => Some(header.room_index),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("failed to decode scene graph: {0}")]
    Json(#[from] JsonPathError),
    #[error("object '{object}' references missing parent {parent:?}")]
    UnknownParent { object: String, parent: ObjectId },
    #[error("object '{object}' is part of a parent cycle")]
    ParentCycle { object: String },
}

/// Arena of scene objects addressed by `ObjectId` (the index into the arena).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SceneObjects")]
pub struct SceneGraph {
    objects: Vec<SceneObject>,
    /// Child ids per parent, in insertion order.
    #[serde(skip)]
    children: HashMap<ObjectId, Vec<ObjectId>>,
}

#[derive(Deserialize)]
struct SceneObjects {
    objects: Vec<SceneObject>,
}

impl From<SceneObjects> for SceneGraph {
    fn from(raw: SceneObjects) -> Self {
        let mut graph = Self::new();
        for object in raw.objects {
            graph.add(object);
        }
        graph
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SceneLoadError> {
        let graph: SceneGraph = deserialize_with_path(raw)?;
        graph.validate()?;
        Ok(graph)
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        if let Some(parent) = object.parent {
            self.children.entry(parent).or_default().push(id);
        }
        self.objects.push(object);
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(idx, object)| (ObjectId(idx as u32), object))
    }

    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// All descendants of `id`, depth-first, parents before children.
    pub fn children_recursive(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        let mut stack = self.children(id).iter().rev().copied().collect::<Vec<_>>();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Descendants of `root` whose kind passes `filter`.
    pub fn object_list(
        &self,
        root: ObjectId,
        filter: impl Fn(&ObjectKind) -> bool,
    ) -> Vec<ObjectId> {
        self.children_recursive(root)
            .into_iter()
            .filter(|id| self.object(*id).is_some_and(|object| filter(&object.kind)))
            .collect()
    }

    /// Walks the parent chain of `id` (excluding `id`), stopping before `stop_at`.
    pub fn ancestors(&self, id: ObjectId, stop_at: ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        let mut current = self.object(id).and_then(|object| object.parent);
        while let Some(parent) = current {
            if parent == stop_at || out.len() > self.objects.len() {
                break;
            }
            out.push(parent);
            current = self.object(parent).and_then(|object| object.parent);
        }
        out
    }

    /// Nearest ancestor room of `id` below `scene`, if any.
    pub fn owning_room(&self, id: ObjectId, scene: ObjectId) -> Option<ObjectId> {
        self.ancestors(id, scene).into_iter().find(|ancestor| {
            self.object(*ancestor)
                .is_some_and(|object| object.room_index().is_some())
        })
    }

    pub fn validate(&self) -> Result<(), SceneLoadError> {
        for object in &self.objects {
            let Some(parent) = object.parent else {
                continue;
            };
            if self.object(parent).is_none() {
                return Err(SceneLoadError::UnknownParent {
                    object: object.name.clone(),
                    parent,
                });
            }
            let mut steps = 0usize;
            let mut current = Some(parent);
            while let Some(next) = current {
                steps += 1;
                if steps > self.objects.len() {
                    return Err(SceneLoadError::ParentCycle {
                        object: object.name.clone(),
                    });
                }
                current = self.object(next).and_then(|candidate| candidate.parent);
            }
        }
        Ok(())
    }
}
