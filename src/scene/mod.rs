//! Renderer-agnostic scene graph.
//!
//! Nodes form a tree of shared handles so entities can be attached to a
//! parent before their content has finished loading. Geometries and
//! materials stand in for GPU-side resources: each one is registered with
//! [`ResourceStats`] on creation and unregistered exactly once when dropped.

use crate::mesher::geometry::Mesh;
use crate::resource_pack::Texture;
use crate::types::NodeTransform;
use glam::Mat4;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared handle to a scene node.
pub type NodeRef = Rc<RefCell<Node>>;

/// Live resource counters for one rendering session.
#[derive(Debug, Default)]
pub struct ResourceStats {
    geometries: Cell<usize>,
    materials: Cell<usize>,
    released: Cell<usize>,
}

impl ResourceStats {
    /// Geometries currently alive.
    pub fn live_geometries(&self) -> usize {
        self.geometries.get()
    }

    /// Materials currently alive.
    pub fn live_materials(&self) -> usize {
        self.materials.get()
    }

    /// Total resources released so far.
    pub fn released(&self) -> usize {
        self.released.get()
    }
}

#[derive(Debug, Clone, Copy)]
enum ResourceKind {
    Geometry,
    Material,
}

/// Registration of one resource; unregisters on drop.
#[derive(Debug)]
struct ResourceGuard {
    stats: Rc<ResourceStats>,
    kind: ResourceKind,
}

impl ResourceGuard {
    fn new(stats: &Rc<ResourceStats>, kind: ResourceKind) -> Self {
        let counter = match kind {
            ResourceKind::Geometry => &stats.geometries,
            ResourceKind::Material => &stats.materials,
        };
        counter.set(counter.get() + 1);
        Self {
            stats: Rc::clone(stats),
            kind,
        }
    }
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        let counter = match self.kind {
            ResourceKind::Geometry => &self.stats.geometries,
            ResourceKind::Material => &self.stats.materials,
        };
        counter.set(counter.get().saturating_sub(1));
        self.stats.released.set(self.stats.released.get() + 1);
    }
}

/// A contiguous index range drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryGroup {
    /// First index in the index buffer.
    pub start: usize,
    /// Number of indices.
    pub count: usize,
    /// Index into the owning mesh's material list.
    pub material_index: usize,
}

/// Triangle geometry split into material groups.
#[derive(Debug)]
pub struct Geometry {
    pub mesh: Mesh,
    pub groups: Vec<GeometryGroup>,
    _guard: ResourceGuard,
}

impl Geometry {
    pub(crate) fn new(stats: &Rc<ResourceStats>, mesh: Mesh, groups: Vec<GeometryGroup>) -> Self {
        Self {
            mesh,
            groups,
            _guard: ResourceGuard::new(stats, ResourceKind::Geometry),
        }
    }

    /// Geometry drawn with a single material.
    pub(crate) fn single(stats: &Rc<ResourceStats>, mesh: Mesh) -> Self {
        let groups = vec![GeometryGroup {
            start: 0,
            count: mesh.indices.len(),
            material_index: 0,
        }];
        Self::new(stats, mesh, groups)
    }
}

/// How a material reacts to scene lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Diffuse lighting (block faces).
    Lambert,
    /// Ignores lights (sprites, GUI, text).
    Unlit,
}

/// Surface description for a mesh or a material group.
#[derive(Debug)]
pub struct Material {
    pub name: String,
    pub texture: Option<Rc<Texture>>,
    pub shading: Shading,
    /// Fragments with alpha below this are discarded. 0 disables the test.
    pub alpha_test: f32,
    pub transparent: bool,
    pub depth_test: bool,
    _guard: ResourceGuard,
}

/// Parameters for creating a [`Material`].
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub name: String,
    pub texture: Option<Rc<Texture>>,
    pub shading: Shading,
    pub alpha_test: f32,
    pub transparent: bool,
    pub depth_test: bool,
}

impl MaterialDesc {
    /// A textured, transparent material with depth testing on.
    pub fn textured(name: impl Into<String>, texture: Rc<Texture>, shading: Shading) -> Self {
        Self {
            name: name.into(),
            texture: Some(texture),
            shading,
            alpha_test: 0.0,
            transparent: true,
            depth_test: true,
        }
    }

    pub fn with_alpha_test(mut self, alpha_test: f32) -> Self {
        self.alpha_test = alpha_test;
        self
    }

    pub fn without_depth_test(mut self) -> Self {
        self.depth_test = false;
        self
    }
}

impl Material {
    pub(crate) fn new(stats: &Rc<ResourceStats>, desc: MaterialDesc) -> Self {
        Self {
            name: desc.name,
            texture: desc.texture,
            shading: desc.shading,
            alpha_test: desc.alpha_test,
            transparent: desc.transparent,
            depth_test: desc.depth_test,
            _guard: ResourceGuard::new(stats, ResourceKind::Material),
        }
    }
}

/// Renderable content of a node.
#[derive(Debug)]
pub struct MeshData {
    pub geometry: Geometry,
    pub materials: Vec<Rc<Material>>,
}

/// A node in the scene tree.
#[derive(Debug, Default)]
pub struct Node {
    pub name: String,
    pub transform: NodeTransform,
    pub visible: bool,
    /// Higher values draw later.
    pub render_order: i32,
    pub mesh: Option<MeshData>,
    children: Vec<NodeRef>,
}

impl Node {
    /// An empty, visible grouping node.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            ..Default::default()
        }
    }

    /// A visible node drawing `geometry` with `materials`.
    pub fn mesh(name: impl Into<String>, geometry: Geometry, materials: Vec<Rc<Material>>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            mesh: Some(MeshData { geometry, materials }),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: [f32; 3]) -> Self {
        self.transform.translation = position.into();
        self
    }

    pub fn into_ref(self) -> NodeRef {
        Rc::new(RefCell::new(self))
    }

    pub fn add(&mut self, child: NodeRef) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Detach and return all children.
    pub fn take_children(&mut self) -> Vec<NodeRef> {
        std::mem::take(&mut self.children)
    }

    /// Number of nodes with mesh content in this subtree.
    pub fn mesh_count(&self) -> usize {
        let own = usize::from(self.mesh.is_some());
        own + self
            .children
            .iter()
            .map(|child| child.borrow().mesh_count())
            .sum::<usize>()
    }
}

/// Visit every visible node carrying a mesh, with its world matrix.
///
/// Invisible nodes hide their whole subtree.
pub fn walk_visible(node: &NodeRef, parent: Mat4, visit: &mut dyn FnMut(&Node, Mat4)) {
    let node = node.borrow();
    if !node.visible {
        return;
    }

    let world = parent * node.transform.matrix();
    if node.mesh.is_some() {
        visit(&*node, world);
    }
    for child in node.children() {
        walk_visible(child, world, visit);
    }
}
