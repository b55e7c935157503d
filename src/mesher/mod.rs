//! Mesh generation from model descriptors.
//!
//! This module converts cuboid elements and item sprites into scene nodes.

pub mod element;
pub mod geometry;
pub mod sprite;

pub use element::{build_element, build_elements, remap_uv};
pub use geometry::{Mesh, Vertex};
pub use sprite::build_sprite;
