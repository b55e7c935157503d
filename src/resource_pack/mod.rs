//! Asset access and descriptor parsing.
//!
//! This module defines where assets come from (an [`AssetSource`]) and how
//! their JSON descriptors are parsed: item/block models, recipes and tags.

pub mod loader;
pub mod model;
pub mod recipe;
pub mod tag;
pub mod texture;

pub use loader::{ArchiveSource, DirectorySource, MemorySource};
#[cfg(feature = "http")]
pub use loader::HttpSource;
pub use model::{Display, Element, Face, ModelDescriptor};
pub use recipe::{Ingredient, ItemResult, RecipeDescriptor};
pub use tag::TagDescriptor;
pub use texture::Texture;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Future returned by [`AssetSource::fetch`]. Not `Send`: loading runs on a
/// single-threaded executor.
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>>> + 'a>>;

/// Asynchronous asset loader.
///
/// Paths are relative, `/`-separated and include the file extension, e.g.
/// `models/item/stick.json`. A missing asset must fail with
/// [`ViewerError::ResourceNotFound`](crate::ViewerError::ResourceNotFound).
pub trait AssetSource {
    fn fetch<'a>(&'a self, path: &'a str) -> FetchFuture<'a>;
}

impl<S: AssetSource + ?Sized> AssetSource for Box<S> {
    fn fetch<'a>(&'a self, path: &'a str) -> FetchFuture<'a> {
        (**self).fetch(path)
    }
}

/// Directory prefixes for each asset kind, relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetLayout {
    pub models: String,
    pub textures: String,
    pub recipes: String,
    pub item_tags: String,
    pub gui: String,
    pub font: String,
}

impl Default for AssetLayout {
    fn default() -> Self {
        Self {
            models: "models/".to_string(),
            textures: "textures/".to_string(),
            recipes: "recipes/".to_string(),
            item_tags: "tags/items/".to_string(),
            gui: "gui/".to_string(),
            font: "font/".to_string(),
        }
    }
}

impl AssetLayout {
    /// Path of a model descriptor, e.g. "block/stone" -> "models/block/stone.json".
    pub fn model(&self, path: &str) -> String {
        format!("{}{}.json", self.models, path)
    }

    /// Path of a texture image, e.g. "block/stone" -> "textures/block/stone.png".
    pub fn texture(&self, path: &str) -> String {
        format!("{}{}.png", self.textures, path)
    }

    /// Path of a recipe descriptor.
    pub fn recipe(&self, name: &str) -> String {
        format!("{}{}.json", self.recipes, name)
    }

    /// Path of an item tag descriptor.
    pub fn item_tag(&self, name: &str) -> String {
        format!("{}{}.json", self.item_tags, name)
    }

    /// Path of a GUI image.
    pub fn gui(&self, name: &str) -> String {
        format!("{}{}.png", self.gui, name)
    }

    /// Path of a font page image.
    pub fn font(&self, name: &str) -> String {
        format!("{}{}.png", self.font, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_paths() {
        let layout = AssetLayout::default();
        assert_eq!(layout.model("item/stick"), "models/item/stick.json");
        assert_eq!(layout.texture("block/stone"), "textures/block/stone.png");
        assert_eq!(layout.recipe("stick"), "recipes/stick.json");
        assert_eq!(layout.item_tag("planks"), "tags/items/planks.json");
        assert_eq!(layout.gui("furnace_small"), "gui/furnace_small.png");
        assert_eq!(layout.font("ascii"), "font/ascii.png");
    }

    #[test]
    fn test_partial_layout_config() {
        let layout: AssetLayout = serde_json::from_str(r#"{ "textures": "" }"#).unwrap();
        assert_eq!(layout.texture("block/stone"), "block/stone.png");
        assert_eq!(layout.models, "models/");
    }
}
