//! Model and texture resolution.
//!
//! This module walks model parent chains, resolves texture variables to
//! loaded textures and expands item tags.

pub mod model_resolver;
pub mod tags;
pub mod texture_resolver;

pub use model_resolver::{select_elements, select_gui_transform, ModelResolver};
pub use tags::expand_tag;
pub use texture_resolver::{resolve_texture, TextureCache, TextureTable};
