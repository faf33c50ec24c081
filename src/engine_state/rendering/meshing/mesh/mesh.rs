//! Mesh data structures for voxel rendering.
//!
//! A chunk produces two independent meshes, one for solid blocks and one for
//! fluids, so a renderer can draw fluids in a separate translucent pass.

use crate::engine_state::rendering::Vertex;

use super::face::Face;

/// Vertex and index lists for one kind of geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// The vertex data, four per face
    pub vertices: Vec<Vertex>,
    /// The index data, six per face
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the vertices and indices of one face.
    pub fn add_face(&mut self, face: &Face) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.vertices());
        self.indices.extend_from_slice(&face.indices(base));
    }

    /// Number of quads in this mesh.
    pub fn face_count(&self) -> usize {
        self.indices.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// The geometry of one chunk, positioned at the chunk's world origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMesh {
    /// Faces of every non-fluid block
    pub solid: Mesh,
    /// Faces of fluid blocks
    pub fluid: Mesh,
    /// World position the vertex positions are relative to
    pub origin: [f32; 3],
}

impl ChunkMesh {
    /// Creates an empty pair of meshes at `origin`.
    pub fn new(origin: [f32; 3]) -> Self {
        ChunkMesh {
            solid: Mesh::new(),
            fluid: Mesh::new(),
            origin,
        }
    }

    /// Total number of quads across both meshes.
    pub fn face_count(&self) -> usize {
        self.solid.face_count() + self.fluid.face_count()
    }
}
