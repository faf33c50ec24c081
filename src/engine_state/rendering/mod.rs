//! Surface extraction for the voxel grid.
//!
//! Rendering-API resources (buffers, pipelines, shaders) live outside this
//! crate; here chunks are turned into plain vertex and index lists that a
//! renderer uploads as they are.

pub mod meshing;
mod vertex;

pub use vertex::Vertex;
