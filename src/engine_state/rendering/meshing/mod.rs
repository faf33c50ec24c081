//! Mesh generation for chunks.
//!
//! Chunks are meshed one visible face at a time: faces hidden by an opaque
//! neighbor are culled, the rest get directional shading and per-vertex
//! ambient occlusion. Solid and fluid faces are kept in separate meshes.

use log::debug;
use web_time::Instant;

use crate::engine_state::voxels::chunk::Chunk;

mod mesh;

pub use mesh::*;

/// Generates the geometry of `chunk`, logging how long it took.
///
/// Only shared borrows are taken, of the chunk and, through its neighbor
/// lookup, of any adjacent chunk.
pub fn mesh_chunk(chunk: &Chunk) -> ChunkMesh {
    let start = Instant::now();
    let mesh = culled(chunk);
    debug!(
        "Meshed chunk ({}, {}): {} solid and {} fluid faces in {:?}",
        chunk.position.x,
        chunk.position.z,
        mesh.solid.face_count(),
        mesh.fluid.face_count(),
        start.elapsed()
    );
    mesh
}
