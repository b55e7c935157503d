//! # Craft Scene
//!
//! A Rust library for rebuilding Minecraft item models and crafting recipes
//! as renderer-agnostic 3D scenes.
//!
//! ## Overview
//!
//! Item and block models are read from JSON descriptors. Parent chains are
//! walked, texture variables resolved and cuboid elements turned into
//! textured meshes. Recipes are laid out over their workstation GUI image
//! with one item per ingredient slot.
//!
//! ## Quick Start
//!
//! ```ignore
//! use craft_scene::{DirectorySource, Item, Session, ObjExport};
//! use tokio::task::LocalSet;
//!
//! let session = Session::new(DirectorySource::new("assets/minecraft"));
//!
//! LocalSet::new().run_until(async {
//!     // Several names cycle, one at a time.
//!     let item = Item::load(&session, &["minecraft:oak_planks", "minecraft:stick"]).await?;
//!
//!     let export = ObjExport::from_scene(&item.node(), "planks")?;
//!     std::fs::write("planks.obj", export.obj)?;
//!     Ok::<_, craft_scene::ViewerError>(())
//! }).await?;
//! ```
//!
//! ## Recipes
//!
//! ```ignore
//! use craft_scene::Recipe;
//!
//! let recipe = Recipe::load(&session, "minecraft:chest").await?;
//! let layout = recipe.layout().unwrap();
//! println!("{} slots at {}", layout.slots.len(), layout.workstation);
//! ```
//!
//! Entities spawn local tasks, so they must be created inside a
//! [`tokio::task::LocalSet`] on a current-thread runtime.

pub mod entity;
pub mod error;
pub mod export;
pub mod mesher;
pub mod resolver;
pub mod resource_pack;
pub mod scene;
pub mod session;
pub mod tools;
pub mod types;

// Re-export main types for convenience
pub use entity::{Item, Recipe, RecipeLayout, TextLabel};
pub use error::{Result, ViewerError};
pub use export::{export_obj, ObjExport};
pub use mesher::{Mesh, Vertex};
pub use resolver::{ModelResolver, TextureCache};
pub use resource_pack::{
    ArchiveSource, AssetLayout, AssetSource, DirectorySource, MemorySource, ModelDescriptor,
    RecipeDescriptor, TagDescriptor, Texture,
};
#[cfg(feature = "http")]
pub use resource_pack::HttpSource;
pub use scene::{Node, NodeRef, ResourceStats};
pub use session::{Session, SessionConfig};
pub use types::{Direction, DisplayTransform};
