//! Convert model elements to cuboid meshes.

use crate::error::Result;
use crate::mesher::geometry::{add_box_face, Mesh};
use crate::resolver::{resolve_texture, TextureTable};
use crate::resource_pack::Element;
use crate::scene::{GeometryGroup, MaterialDesc, Node, NodeRef, Shading};
use crate::session::Session;
use crate::types::Direction;

/// Map a default quad UV corner onto a face's `uv` rectangle.
///
/// `uv` is `[u1, v1, u2, v2]` in 0-16 texture space with V pointing down;
/// the result is 0-1 with V pointing up.
pub fn remap_uv(corner: [f32; 2], uv: [f32; 4]) -> [f32; 2] {
    let u = if corner[0] == 0.0 { uv[0] } else { uv[2] };
    let v = if corner[1] == 0.0 { 16.0 - uv[3] } else { 16.0 - uv[1] };
    [u / 16.0, v / 16.0]
}

/// Build one mesh for an element: a box with one material per declared face.
///
/// Faces are emitted in [`Direction::BOX_ORDER`]; undeclared faces produce
/// neither geometry nor a material. The node sits at the element's center,
/// shifted by -8 so the 0-16 cube is centered on the origin. Element
/// rotation is not applied.
pub async fn build_element(
    session: &Session,
    element: &Element,
    textures: &TextureTable,
    name: &str,
) -> Result<NodeRef> {
    let size = element.size();
    let alpha_test = session.config().alpha_test;

    let mut mesh = Mesh::new();
    let mut groups = Vec::new();
    let mut materials = Vec::new();

    for direction in Direction::BOX_ORDER {
        let Some(face) = element.face(direction) else {
            continue;
        };

        let texture = resolve_texture(session, textures, &face.texture).await?;
        let index_start = mesh.indices.len();
        let vertex_start = add_box_face(&mut mesh, size, direction) as usize;

        if let Some(uv) = face.uv {
            let mut uvs = [[0.0; 2]; 4];
            for (i, slot) in uvs.iter_mut().enumerate() {
                *slot = remap_uv(mesh.vertices[vertex_start + i].uv, uv);
            }
            mesh.set_quad_uvs(vertex_start, uvs);
        }

        groups.push(GeometryGroup {
            start: index_start,
            count: mesh.indices.len() - index_start,
            material_index: materials.len(),
        });
        materials.push(session.new_material(
            MaterialDesc::textured(face.texture.clone(), texture, Shading::Lambert)
                .with_alpha_test(alpha_test),
        ));
    }

    let geometry = session.new_geometry(mesh, groups);
    Ok(Node::mesh(name, geometry, materials)
        .with_position(element.centered_position())
        .into_ref())
}

/// Build a group holding one mesh per element.
pub async fn build_elements(
    session: &Session,
    elements: &[Element],
    textures: &TextureTable,
    name: &str,
) -> Result<NodeRef> {
    let group = Node::group(name).into_ref();
    for (i, element) in elements.iter().enumerate() {
        let mesh = build_element(session, element, textures, &format!("{}#{}", name, i)).await?;
        group.borrow_mut().add(mesh);
    }
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewerError;
    use crate::resource_pack::Face;
    use crate::session::test_support::fixture_source;
    use std::collections::HashMap;
    use std::rc::Rc;

    fn face(texture: &str, uv: Option<[f32; 4]>) -> Face {
        Face {
            uv,
            texture: texture.to_string(),
            cullface: None,
            rotation: 0,
            tintindex: -1,
        }
    }

    fn slab(faces: HashMap<Direction, Face>) -> Element {
        Element {
            from: [0.0, 0.0, 0.0],
            to: [16.0, 8.0, 16.0],
            rotation: None,
            shade: true,
            faces,
        }
    }

    #[test]
    fn test_remap_uv_flips_v() {
        let uv = [0.0, 0.0, 8.0, 8.0];
        // Texture-space (0, 0) is the top-left corner: quad corner (0, 1).
        assert_eq!(remap_uv([0.0, 1.0], uv), [0.0, 1.0]);
        // Texture-space (8, 8) is the bottom-right corner: quad corner (1, 0).
        assert_eq!(remap_uv([1.0, 0.0], uv), [0.5, 0.5]);
        assert_eq!(remap_uv([1.0, 1.0], uv), [0.5, 1.0]);
        assert_eq!(remap_uv([0.0, 0.0], uv), [0.0, 0.5]);
    }

    #[tokio::test]
    async fn test_build_element_with_two_faces() {
        let session = Session::new(fixture_source());
        let mut table = TextureTable::new();
        table.insert("top".to_string(), session.texture("block/top").await.unwrap());

        let faces = HashMap::from([
            (Direction::Up, face("#top", Some([0.0, 0.0, 8.0, 8.0]))),
            (Direction::Down, face("block/stone", None)),
        ]);
        let node = build_element(&session, &slab(faces), &table, "slab").await.unwrap();

        let node = node.borrow();
        assert_eq!(node.transform.translation.to_array(), [0.0, -4.0, 0.0]);

        let mesh = node.mesh.as_ref().unwrap();
        assert_eq!(mesh.materials.len(), 2);
        assert_eq!(mesh.geometry.groups.len(), 2);
        assert_eq!(mesh.geometry.mesh.vertex_count(), 8);

        // Up comes before down in box order.
        assert!(Rc::ptr_eq(mesh.materials[0].texture.as_ref().unwrap(), &table["top"]));
        assert_eq!(mesh.materials[0].alpha_test, 1.0);
        assert_eq!(mesh.materials[0].shading, Shading::Lambert);

        let up_uvs: Vec<_> = mesh.geometry.mesh.vertices[0..4].iter().map(|v| v.uv).collect();
        assert_eq!(up_uvs, vec![[0.0, 1.0], [0.5, 1.0], [0.0, 0.5], [0.5, 0.5]]);

        // No uv: default mapping kept.
        let down_uvs: Vec<_> = mesh.geometry.mesh.vertices[4..8].iter().map(|v| v.uv).collect();
        assert_eq!(down_uvs, vec![[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]]);

        assert_eq!(session.stats().live_materials(), 2);
        assert_eq!(session.stats().live_geometries(), 1);
    }

    #[tokio::test]
    async fn test_missing_face_reference_fails() {
        let session = Session::new(fixture_source());
        let faces = HashMap::from([(Direction::North, face("#missing", None))]);

        let err = build_element(&session, &slab(faces), &TextureTable::new(), "slab")
            .await
            .unwrap_err();
        assert!(matches!(err, ViewerError::UnresolvedTexture(_)));
    }
}
