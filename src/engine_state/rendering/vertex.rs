//! Vertex data structures for voxel rendering.
//!
//! This module defines the vertex format produced by the mesher. It is plain
//! old data so a renderer can upload a slice of vertices without conversion.

/// A vertex of a chunk mesh.
///
/// Positions are relative to the chunk origin stored alongside the mesh.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Brightness: f32 (4 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the chunk origin
    pub position: [f32; 3],
    /// Outward unit normal of the face this vertex belongs to
    pub normal: [f32; 3],
    /// Normalized atlas coordinates
    pub tex_coords: [f32; 2],
    /// Directional shading multiplied by the ambient occlusion factor
    pub brightness: f32,
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - Position relative to the chunk origin
    /// * `normal` - Outward normal of the owning face
    /// * `tex_coords` - Atlas UV coordinates
    /// * `brightness` - Final shading factor in (0, 1]
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2], brightness: f32) -> Self {
        Vertex {
            position,
            normal,
            tex_coords,
            brightness,
        }
    }
}
