//! Transform types for display contexts, element rotations and scene nodes.

use super::Axis;
use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A display-context transform from a model's `display` block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayTransform {
    /// Rotation in degrees around X, Y, Z.
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Translation in model units.
    #[serde(default)]
    pub translation: [f32; 3],
    /// Per-axis scale.
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for DisplayTransform {
    fn default() -> Self {
        Self {
            rotation: [0.0; 3],
            translation: [0.0; 3],
            scale: default_scale(),
        }
    }
}

impl DisplayTransform {
    /// Rotation converted to radians.
    pub fn rotation_radians(&self) -> [f32; 3] {
        [
            self.rotation[0].to_radians(),
            self.rotation[1].to_radians(),
            self.rotation[2].to_radians(),
        ]
    }

    /// Convert to a scene node transform.
    pub fn to_node_transform(&self) -> NodeTransform {
        NodeTransform {
            translation: Vec3::from(self.translation),
            rotation: Vec3::from(self.rotation_radians()),
            scale: Vec3::from(self.scale),
        }
    }
}

/// Element-level rotation from a model element.
///
/// Parsed for completeness; generated geometry stays axis-aligned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRotation {
    /// Origin point for rotation (in 0-16 model coordinates).
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    /// Axis to rotate around.
    pub axis: Axis,
    /// Rotation angle in degrees (-45 to 45, in 22.5 increments).
    pub angle: f32,
    /// Whether to rescale the element after rotation.
    #[serde(default)]
    pub rescale: bool,
}

fn default_origin() -> [f32; 3] {
    [8.0, 8.0, 8.0]
}

/// Local transform of a scene node.
///
/// Rotation is Euler angles in radians, applied in XYZ order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl NodeTransform {
    /// Local transform matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }

    /// Check if this is the identity transform.
    pub fn is_identity(&self) -> bool {
        self.translation == Vec3::ZERO && self.rotation == Vec3::ZERO && self.scale == Vec3::ONE
    }
}
