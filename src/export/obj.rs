//! Wavefront OBJ export.
//!
//! OBJ is a simple, widely-supported text-based 3D format.
//! Every visible mesh in the tree becomes an object with world-space
//! positions; each material becomes an MTL entry referencing its texture.

use crate::error::{Result, ViewerError};
use crate::resource_pack::Texture;
use crate::scene::{walk_visible, Material, Node, NodeRef};
use glam::{Mat4, Vec3};
use std::fmt::Write;
use std::rc::Rc;

#[derive(Default)]
struct ObjWriter {
    obj: String,
    materials: Vec<Rc<Material>>,
    vertex_offset: usize,
    vertices: usize,
    triangles: usize,
}

impl ObjWriter {
    fn material_name(&mut self, material: &Rc<Material>) -> String {
        let index = match self.materials.iter().position(|m| Rc::ptr_eq(m, material)) {
            Some(index) => index,
            None => {
                self.materials.push(Rc::clone(material));
                self.materials.len() - 1
            }
        };
        format!("material_{}", index)
    }

    fn write_node(&mut self, node: &Node, world: Mat4) -> std::fmt::Result {
        let Some(data) = &node.mesh else {
            return Ok(());
        };
        let mesh = &data.geometry.mesh;

        writeln!(self.obj, "o {}", node.name)?;
        for vertex in &mesh.vertices {
            let p = world.transform_point3(Vec3::from(vertex.position));
            writeln!(self.obj, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for vertex in &mesh.vertices {
            writeln!(self.obj, "vt {} {}", vertex.uv[0], vertex.uv[1])?;
        }
        for vertex in &mesh.vertices {
            let n = world.transform_vector3(Vec3::from(vertex.normal)).normalize_or_zero();
            writeln!(self.obj, "vn {} {} {}", n.x, n.y, n.z)?;
        }

        for group in &data.geometry.groups {
            if let Some(material) = data.materials.get(group.material_index) {
                let name = self.material_name(material);
                writeln!(self.obj, "usemtl {}", name)?;
            }
            let end = (group.start + group.count).min(mesh.indices.len());
            for triangle in mesh.indices[group.start..end].chunks_exact(3) {
                let i0 = triangle[0] as usize + self.vertex_offset + 1;
                let i1 = triangle[1] as usize + self.vertex_offset + 1;
                let i2 = triangle[2] as usize + self.vertex_offset + 1;
                writeln!(
                    self.obj,
                    "f {}/{}/{} {}/{}/{} {}/{}/{}",
                    i0, i0, i0, i1, i1, i1, i2, i2, i2
                )?;
                self.triangles += 1;
            }
        }
        writeln!(self.obj)?;

        self.vertex_offset += mesh.vertex_count();
        self.vertices += mesh.vertex_count();
        Ok(())
    }

    fn write_mtl(&self) -> std::result::Result<String, std::fmt::Error> {
        let mut mtl = String::with_capacity(128 * (self.materials.len() + 1));
        writeln!(mtl, "# craft-scene materials")?;
        for (i, material) in self.materials.iter().enumerate() {
            writeln!(mtl)?;
            writeln!(mtl, "newmtl material_{}", i)?;
            writeln!(mtl, "Ka 1.0 1.0 1.0")?;
            writeln!(mtl, "Kd 1.0 1.0 1.0")?;
            writeln!(mtl, "Ks 0.0 0.0 0.0")?;
            writeln!(mtl, "Ns 10.0")?;
            writeln!(mtl, "d 1.0")?;
            writeln!(mtl, "illum 1")?;
            if let Some(texture) = &material.texture {
                writeln!(mtl, "map_Kd {}.png", texture.file_stem())?;
            }
        }
        Ok(mtl)
    }
}

fn fmt_error(e: std::fmt::Error) -> ViewerError {
    ViewerError::Export(e.to_string())
}

/// Write every visible mesh under `root` as OBJ.
/// Returns (obj_content, mtl_content, materials in MTL order).
fn write_scene(root: &NodeRef, name: &str) -> Result<(String, String, Vec<Rc<Material>>)> {
    let mut writer = ObjWriter::default();
    let mut status = Ok(());
    walk_visible(root, Mat4::IDENTITY, &mut |node, world| {
        if status.is_ok() {
            status = writer.write_node(node, world);
        }
    });
    status.map_err(fmt_error)?;

    let mut obj = String::with_capacity(writer.obj.len() + 128);
    writeln!(obj, "# craft-scene OBJ export").map_err(fmt_error)?;
    writeln!(obj, "# Vertices: {}", writer.vertices).map_err(fmt_error)?;
    writeln!(obj, "# Triangles: {}", writer.triangles).map_err(fmt_error)?;
    writeln!(obj, "mtllib {}.mtl", name).map_err(fmt_error)?;
    writeln!(obj).map_err(fmt_error)?;
    obj.push_str(&writer.obj);

    let mtl = writer.write_mtl().map_err(fmt_error)?;
    Ok((obj, mtl, writer.materials))
}

/// Export a scene tree to OBJ format.
/// Returns (obj_content, mtl_content) as strings.
pub fn export_obj(root: &NodeRef, name: &str) -> Result<(String, String)> {
    let (obj, mtl, _) = write_scene(root, name)?;
    Ok((obj, mtl))
}

/// A named texture file for OBJ export.
pub struct ObjTexture {
    /// Filename for this texture (e.g., "block_stone.png").
    pub filename: String,
    /// PNG-encoded texture data.
    pub png_data: Vec<u8>,
}

/// OBJ, MTL and texture files for writing to disk.
pub struct ObjExport {
    pub obj: String,
    pub mtl: String,
    /// One file per distinct texture referenced by the MTL.
    pub textures: Vec<ObjTexture>,
}

impl ObjExport {
    pub fn from_scene(root: &NodeRef, name: &str) -> Result<Self> {
        let (obj, mtl, materials) = write_scene(root, name)?;

        let mut seen: Vec<&Rc<Texture>> = Vec::new();
        let mut textures = Vec::new();
        for texture in materials.iter().filter_map(|m| m.texture.as_ref()) {
            if seen.iter().any(|t| t.file_stem() == texture.file_stem()) {
                continue;
            }
            seen.push(texture);
            textures.push(ObjTexture {
                filename: format!("{}.png", texture.file_stem()),
                png_data: texture.to_png()?,
            });
        }

        Ok(Self { obj, mtl, textures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesher::geometry::{Mesh, Vertex};
    use crate::resolver::ModelResolver;
    use crate::scene::{Geometry, MaterialDesc, ResourceStats, Shading};
    use crate::session::test_support::fixture_source;
    use crate::session::Session;

    #[test]
    fn test_export_simple_obj() {
        let stats = Rc::new(ResourceStats::default());
        let mut mesh = Mesh::new();

        // Create a simple triangle
        let v0 = mesh.add_vertex(Vertex::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]));
        let v1 = mesh.add_vertex(Vertex::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]));
        let v2 = mesh.add_vertex(Vertex::new([0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 1.0]));
        mesh.add_triangle(v0, v1, v2);

        let texture = Rc::new(Texture::new("minecraft:block/stone", 1, 1, vec![255; 4]));
        let material = Rc::new(Material::new(
            &stats,
            MaterialDesc::textured("stone", texture, Shading::Lambert),
        ));
        let root = Node::group("root").with_position([2.0, 0.0, 0.0]).into_ref();
        root.borrow_mut()
            .add(Node::mesh("tri", Geometry::single(&stats, mesh), vec![material]).into_ref());

        let (obj, mtl) = export_obj(&root, "test").unwrap();

        assert!(obj.contains("mtllib test.mtl"));
        assert!(obj.contains("o tri"));
        assert!(obj.contains("v 2 0 0"));
        assert!(obj.contains("vt 0 0"));
        assert!(obj.contains("vn 0 1 0"));
        assert!(obj.contains("usemtl material_0"));
        assert!(obj.contains("f 1/1/1 2/2/2 3/3/3"));
        assert!(mtl.contains("newmtl material_0"));
        assert!(mtl.contains("map_Kd minecraft_block_stone.png"));
    }

    #[tokio::test]
    async fn test_export_reconstructed_block() {
        let session = Session::new(fixture_source());
        let node = ModelResolver::new(&session).reconstruct("stone").await.unwrap();

        let export = ObjExport::from_scene(&node, "stone").unwrap();
        assert_eq!(export.obj.lines().filter(|l| l.starts_with("f ")).count(), 12);
        assert_eq!(export.obj.lines().filter(|l| l.starts_with("usemtl ")).count(), 6);
        assert_eq!(export.mtl.matches("newmtl").count(), 6);

        // Six materials share one texture file.
        assert_eq!(export.textures.len(), 1);
        assert_eq!(export.textures[0].filename, "block_stone.png");
        assert!(export.textures[0].png_data.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_hidden_nodes_are_skipped() {
        let stats = Rc::new(ResourceStats::default());
        let root = Node::group("root").into_ref();
        let hidden = Node::mesh("hidden", Geometry::single(&stats, Mesh::plane(1.0, 1.0)), Vec::new()).into_ref();
        hidden.borrow_mut().visible = false;
        root.borrow_mut().add(hidden);

        let (obj, mtl) = export_obj(&root, "empty").unwrap();
        assert!(!obj.contains("o hidden"));
        assert!(obj.contains("# Vertices: 0"));
        assert!(!mtl.contains("newmtl"));
    }
}
