//! Texture variable resolution.

use crate::error::{Result, ViewerError};
use crate::resource_pack::Texture;
use crate::session::Session;
use crate::types::location_path;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Texture variable name -> loaded texture, in insertion order.
pub type TextureTable = IndexMap<String, Rc<Texture>>;

/// Append-only cache of loaded textures keyed by asset path.
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: RefCell<HashMap<String, Rc<Texture>>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<Rc<Texture>> {
        self.entries.borrow().get(path).cloned()
    }

    /// Insert a texture unless one is already cached for `path`; returns
    /// the cached handle either way.
    pub fn insert(&self, path: &str, texture: Texture) -> Rc<Texture> {
        let mut entries = self.entries.borrow_mut();
        Rc::clone(
            entries
                .entry(path.to_string())
                .or_insert_with(|| Rc::new(texture)),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Resolve a texture name against a table.
///
/// `#name` is looked up in `table` and must already be present. Anything
/// else is an asset path and is loaded through the session's cache.
pub async fn resolve_texture(session: &Session, table: &TextureTable, name: &str) -> Result<Rc<Texture>> {
    if let Some(variable) = name.strip_prefix('#') {
        return table
            .get(variable)
            .cloned()
            .ok_or_else(|| ViewerError::UnresolvedTexture(name.to_string()));
    }

    session.texture(location_path(name)).await
}
