//! Mesh geometry types and primitives.

use crate::types::Direction;

/// A vertex in an output mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in 3D space.
    pub position: [f32; 3],
    /// Normal vector.
    pub normal: [f32; 3],
    /// Texture coordinates, V pointing up.
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }
}

/// A triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle indices (3 per triangle).
    pub indices: Vec<u32>,
}

/// Default UVs of a quad's corners: top-left, top-right, bottom-left, bottom-right.
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]];

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle by vertex indices.
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Add a quad from corners in top-left, top-right, bottom-left,
    /// bottom-right order. Triangles are wound CCW seen from the front.
    pub fn add_quad(&mut self, tl: u32, tr: u32, bl: u32, br: u32) {
        self.add_triangle(tl, bl, tr);
        self.add_triangle(bl, br, tr);
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A `width × height` quad in the XY plane facing +Z, centered on the origin.
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let normal = [0.0, 0.0, 1.0];
        let corners = [[-hw, hh, 0.0], [hw, hh, 0.0], [-hw, -hh, 0.0], [hw, -hh, 0.0]];

        let mut mesh = Mesh::new();
        let ids: Vec<u32> = corners
            .iter()
            .zip(QUAD_UVS)
            .map(|(position, uv)| mesh.add_vertex(Vertex::new(*position, normal, uv)))
            .collect();
        mesh.add_quad(ids[0], ids[1], ids[2], ids[3]);
        mesh
    }

    /// Set the UVs of the 4 vertices starting at `start`.
    pub fn set_quad_uvs(&mut self, start: usize, uvs: [[f32; 2]; 4]) {
        for (vertex, uv) in self.vertices[start..start + 4].iter_mut().zip(uvs) {
            vertex.uv = uv;
        }
    }
}

/// Right and up vectors of a box face, seen from outside.
fn face_basis(direction: Direction) -> ([f32; 3], [f32; 3]) {
    match direction {
        Direction::East => ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        Direction::West => ([0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        Direction::Up => ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        Direction::Down => ([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        Direction::South => ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        Direction::North => ([-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    }
}

/// Append one face of an axis-aligned box centered on the origin.
///
/// Emits four vertices with [`QUAD_UVS`] and two triangles. Returns the
/// index of the first vertex.
pub fn add_box_face(mesh: &mut Mesh, size: [f32; 3], direction: Direction) -> u32 {
    let half = [size[0] / 2.0, size[1] / 2.0, size[2] / 2.0];
    let normal = direction.normal();
    let (right, up) = face_basis(direction);

    let corner = |sx: f32, sy: f32| -> [f32; 3] {
        let mut p = [0.0; 3];
        for i in 0..3 {
            p[i] = (normal[i] + right[i] * sx + up[i] * sy) * half[i];
        }
        p
    };

    let corners = [corner(-1.0, 1.0), corner(1.0, 1.0), corner(-1.0, -1.0), corner(1.0, -1.0)];
    let start = mesh.vertex_count() as u32;
    for (position, uv) in corners.into_iter().zip(QUAD_UVS) {
        mesh.add_vertex(Vertex::new(position, normal, uv));
    }
    mesh.add_quad(start, start + 1, start + 2, start + 3);
    start
}
