//! Flat item sprites.

use crate::error::{Result, ViewerError};
use crate::mesher::geometry::Mesh;
use crate::resolver::{resolve_texture, TextureTable};
use crate::resource_pack::ModelDescriptor;
use crate::scene::{MaterialDesc, Node, NodeRef, Shading};
use crate::session::Session;

/// Side length of a sprite quad, in model units.
pub const SPRITE_SIZE: f32 = 16.0;

/// Build a 16×16 unlit quad textured with the model's `layer0`.
pub async fn build_sprite(session: &Session, model: &ModelDescriptor, name: &str) -> Result<NodeRef> {
    let layer0 = model
        .textures
        .get("layer0")
        .ok_or_else(|| ViewerError::UnresolvedTexture(format!("{}: layer0", name)))?;

    let texture = resolve_texture(session, &TextureTable::new(), layer0).await?;
    let material = session.new_material(
        MaterialDesc::textured(layer0.clone(), texture, Shading::Unlit)
            .with_alpha_test(session.config().alpha_test),
    );
    let geometry = session.new_single_geometry(Mesh::plane(SPRITE_SIZE, SPRITE_SIZE));

    Ok(Node::mesh(name, geometry, vec![material]).into_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::fixture_source;
    use serde_json::json;

    fn model(value: serde_json::Value) -> ModelDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_sprite_uses_layer0() {
        let session = Session::new(fixture_source());
        let descriptor = model(json!({ "parent": "item/generated", "textures": { "layer0": "minecraft:item/stick" } }));

        let node = build_sprite(&session, &descriptor, "stick").await.unwrap();
        let node = node.borrow();
        let mesh = node.mesh.as_ref().unwrap();

        assert_eq!(mesh.geometry.mesh.vertex_count(), 4);
        assert_eq!(mesh.materials[0].shading, Shading::Unlit);
        assert_eq!(mesh.materials[0].alpha_test, 1.0);
        assert_eq!(mesh.materials[0].texture.as_ref().unwrap().path, "item/stick");
    }

    #[tokio::test]
    async fn test_sprite_without_layer0_fails() {
        let session = Session::new(fixture_source());
        let descriptor = model(json!({ "parent": "item/generated", "textures": { "layer1": "item/stick" } }));

        let err = build_sprite(&session, &descriptor, "stick").await.unwrap_err();
        assert!(matches!(err, ViewerError::UnresolvedTexture(_)));
        assert_eq!(session.stats().live_materials(), 0);
    }
}
