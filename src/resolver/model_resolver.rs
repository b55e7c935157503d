//! Model inheritance resolution.
//!
//! An item is reconstructed from its leaf model under `models/item/` and
//! the chain of parents above it. The chain is walked leaf-first, so every
//! "first in chain order" rule below means "closest to the leaf wins".

use crate::error::{Result, ViewerError};
use crate::mesher::element::build_elements;
use crate::mesher::sprite::build_sprite;
use crate::resolver::{resolve_texture, TextureTable};
use crate::resource_pack::model::is_builtin;
use crate::resource_pack::{Element, ModelDescriptor};
use crate::scene::{Node, NodeRef};
use crate::session::Session;
use crate::types::{location_path, DisplayTransform};

/// Resolves model inheritance chains against a session's assets.
pub struct ModelResolver<'a> {
    session: &'a Session,
}

impl<'a> ModelResolver<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Fetch one model descriptor by location, e.g. `block/stone`.
    pub async fn fetch_model(&self, location: &str) -> Result<ModelDescriptor> {
        let path = self.session.layout().model(location_path(location));
        log::debug!("Fetching model {}", path);
        let data = self.session.fetch(&path).await?;
        Ok(ModelDescriptor::from_slice(&data)?)
    }

    /// Fetch the chain of descriptors starting at `parent`, one at a time,
    /// until a model has no parent or its parent is a builtin.
    pub async fn fetch_chain(&self, parent: &str) -> Result<Vec<ModelDescriptor>> {
        let max_depth = self.session.config().max_inheritance_depth;
        let mut chain = Vec::new();
        let mut next = Some(parent.to_string());

        while let Some(location) = next {
            if is_builtin(&location) {
                break;
            }
            if chain.len() >= max_depth {
                return Err(ViewerError::ModelInheritanceTooDeep(location));
            }

            let model = self.fetch_model(&location).await?;
            next = model.parent.clone();
            chain.push(model);
        }

        Ok(chain)
    }

    /// Merge texture variables across the chain.
    ///
    /// The first descriptor to define a key owns it. A `#` value must name
    /// a key that was already merged.
    pub async fn merge_textures(&self, chain: &[ModelDescriptor]) -> Result<TextureTable> {
        let mut table = TextureTable::new();
        for model in chain {
            for (key, value) in &model.textures {
                if table.contains_key(key) {
                    continue;
                }
                let texture = resolve_texture(self.session, &table, value).await?;
                table.insert(key.clone(), texture);
            }
        }
        Ok(table)
    }

    /// Rebuild the scene node for an item name such as `minecraft:stone`.
    pub async fn reconstruct(&self, name: &str) -> Result<NodeRef> {
        let leaf_location = format!("item/{}", location_path(name));
        let leaf = self.fetch_model(&leaf_location).await?;

        if leaf.is_sprite() {
            return build_sprite(self.session, &leaf, name).await;
        }

        let parent = leaf
            .parent
            .as_deref()
            .ok_or_else(|| ViewerError::ModelResolution(format!("{} has no parent model", leaf_location)))?;

        if is_builtin(parent) {
            log::warn!("{} uses builtin parent {}, nothing to draw", name, parent);
            return Ok(Node::group(name).into_ref());
        }

        let chain = self.fetch_chain(parent).await?;
        let textures = self.merge_textures(&chain).await?;
        let group = build_elements(self.session, select_elements(&chain), &textures, name).await?;

        if let Some(gui) = select_gui_transform(&chain) {
            group.borrow_mut().transform = gui.to_node_transform();
        }

        Ok(group)
    }
}

/// Elements of the first descriptor that declares any.
pub fn select_elements(chain: &[ModelDescriptor]) -> &[Element] {
    chain
        .iter()
        .find(|model| model.has_elements())
        .map(|model| model.elements.as_slice())
        .unwrap_or(&[])
}

/// The first GUI display transform in the chain.
pub fn select_gui_transform(chain: &[ModelDescriptor]) -> Option<&DisplayTransform> {
    chain.iter().find_map(|model| model.display.gui.as_ref())
}
