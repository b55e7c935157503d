//! Model descriptor parsing.
//!
//! Item and block models describe geometry as cuboid elements, reference
//! textures through variables and inherit from a parent model.

use crate::types::{location_path, Direction, DisplayTransform, ElementRotation};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parsed model from models/*.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Parent model to inherit from.
    #[serde(default)]
    pub parent: Option<String>,

    /// Whether to use ambient occlusion.
    #[serde(default = "default_ao", rename = "ambientocclusion")]
    pub ambient_occlusion: bool,

    /// Display transforms per context.
    #[serde(default)]
    pub display: Display,

    /// Texture variable definitions, in declaration order.
    #[serde(default)]
    pub textures: IndexMap<String, String>,

    /// Model elements (cuboids).
    #[serde(default)]
    pub elements: Vec<Element>,
}

fn default_ao() -> bool {
    true
}

impl ModelDescriptor {
    /// Parse a descriptor from JSON bytes.
    pub fn from_slice(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }

    /// Parent path without namespace, if any.
    pub fn parent_path(&self) -> Option<&str> {
        self.parent.as_deref().map(location_path)
    }

    /// Whether this model's parent is a flat item sprite template.
    pub fn is_sprite(&self) -> bool {
        self.parent_path().map(|p| p.starts_with("item")).unwrap_or(false)
    }

    /// Check if this model declares its own elements.
    pub fn has_elements(&self) -> bool {
        !self.elements.is_empty()
    }
}

/// Returns true when a parent reference ends a chain walk.
pub fn is_builtin(parent: &str) -> bool {
    location_path(parent).starts_with("builtin")
}

/// Display transforms for the fixed set of rendering contexts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Display {
    #[serde(default)]
    pub thirdperson_righthand: Option<DisplayTransform>,
    #[serde(default)]
    pub thirdperson_lefthand: Option<DisplayTransform>,
    #[serde(default)]
    pub firstperson_righthand: Option<DisplayTransform>,
    #[serde(default)]
    pub firstperson_lefthand: Option<DisplayTransform>,
    #[serde(default)]
    pub gui: Option<DisplayTransform>,
    #[serde(default)]
    pub head: Option<DisplayTransform>,
    #[serde(default)]
    pub ground: Option<DisplayTransform>,
    #[serde(default)]
    pub fixed: Option<DisplayTransform>,
}

/// A cuboid element within a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Optional rotation. Not applied to generated geometry.
    #[serde(default)]
    pub rotation: Option<ElementRotation>,
    /// Whether this element receives shade.
    #[serde(default = "default_shade")]
    pub shade: bool,
    /// Face definitions.
    #[serde(default)]
    pub faces: HashMap<Direction, Face>,
}

fn default_shade() -> bool {
    true
}

impl Element {
    /// Size of this element in model coordinates (0-16).
    pub fn size(&self) -> [f32; 3] {
        [
            self.to[0] - self.from[0],
            self.to[1] - self.from[1],
            self.to[2] - self.from[2],
        ]
    }

    /// Center of this element in model coordinates.
    pub fn center(&self) -> [f32; 3] {
        [
            (self.from[0] + self.to[0]) / 2.0,
            (self.from[1] + self.to[1]) / 2.0,
            (self.from[2] + self.to[2]) / 2.0,
        ]
    }

    /// Center shifted so the 0-16 cube sits around the origin.
    pub fn centered_position(&self) -> [f32; 3] {
        let c = self.center();
        [c[0] - 8.0, c[1] - 8.0, c[2] - 8.0]
    }

    /// Get the face for a direction.
    pub fn face(&self, direction: Direction) -> Option<&Face> {
        self.faces.get(&direction)
    }
}

/// A face of a model element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    /// UV rectangle [u1, v1, u2, v2] in 0-16 range.
    #[serde(default)]
    pub uv: Option<[f32; 4]>,
    /// Texture reference (e.g., "#side" or "block/stone").
    pub texture: String,
    /// Face direction for culling.
    #[serde(default)]
    pub cullface: Option<Direction>,
    /// UV rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub rotation: i32,
    /// Tint index for biome coloring (-1 = no tint).
    #[serde(default = "default_tint_index")]
    pub tintindex: i32,
}

fn default_tint_index() -> i32 {
    -1
}
