use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::graph::SceneObject;

/// Binary-angle units in half a turn.
pub const BINANG_HALF_TURN: f64 = 32768.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootTransform {
    /// Source units to target units.
    pub scale: f64,
}

impl Default for RootTransform {
    fn default() -> Self {
        Self { scale: 10.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertedTransform {
    pub position: [f64; 3],
    /// Per-axis rotation in binary-angle units.
    pub rotation: [f64; 3],
}

/// Converts a marker placement into the target engine's coordinate system.
pub trait TransformResolver {
    fn resolve(
        &self,
        root: &RootTransform,
        scene: &SceneObject,
        object: &SceneObject,
    ) -> ConvertedTransform;
}

/// Z-up source space to Y-up target space with a uniform scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisConvertingResolver;

impl TransformResolver for AxisConvertingResolver {
    fn resolve(
        &self,
        root: &RootTransform,
        scene: &SceneObject,
        object: &SceneObject,
    ) -> ConvertedTransform {
        let rel = [
            object.location[0] - scene.location[0],
            object.location[1] - scene.location[1],
            object.location[2] - scene.location[2],
        ];
        let rot = [
            object.rotation_euler[0] - scene.rotation_euler[0],
            object.rotation_euler[1] - scene.rotation_euler[1],
            object.rotation_euler[2] - scene.rotation_euler[2],
        ];
        ConvertedTransform {
            position: [
                rel[0] * root.scale,
                rel[2] * root.scale,
                -rel[1] * root.scale,
            ],
            rotation: [
                radians_to_binang(rot[0]),
                radians_to_binang(rot[2]),
                radians_to_binang(-rot[1]),
            ],
        }
    }
}

pub fn radians_to_binang(radians: f64) -> f64 {
    radians * (BINANG_HALF_TURN / PI)
}
