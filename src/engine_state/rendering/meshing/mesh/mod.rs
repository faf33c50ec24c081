//! Mesh generation for voxel rendering.
//!
//! This module converts chunk block data into vertex and index lists.
//!
//! # Architecture
//! - [`Mesh`]: vertices and indices for one kind of geometry
//! - [`ChunkMesh`]: the solid and fluid meshes of one chunk
//! - [`Face`]: a single visible quad with per-corner occlusion
//! - [`culled`]: the per-face mesher that walks a chunk
//! - `ambient_occlusion`: corner darkening from the surrounding blocks

mod ambient_occlusion;
mod culled;
mod face;
mod mesh;

pub use ambient_occlusion::{face_occlusion, flip_diagonal, vertex_occlusion, AO_CURVE};
pub use culled::{culled, is_face_visible};
pub use face::Face;
pub use mesh::*;
