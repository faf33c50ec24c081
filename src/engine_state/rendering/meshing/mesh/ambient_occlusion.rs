//! Per-vertex ambient occlusion.
//!
//! Each corner of a visible face looks at the three blocks that touch it in
//! the layer in front of the face: the two edge neighbors and the diagonal
//! corner neighbor. The more of them occlude, the darker the corner.

use cgmath::Vector3;

use crate::engine_state::voxels::{block::block_side::BlockSide, chunk::Chunk};

/// Brightness factor for occlusion levels 0 through 3.
pub const AO_CURVE: [f32; 4] = [1.0, 0.8, 0.6, 0.45];

/// Occlusion level of one corner.
///
/// Two occluding edges hide the corner completely, whatever the diagonal
/// block is.
pub fn vertex_occlusion(edge1: bool, edge2: bool, corner: bool) -> u8 {
    if edge1 && edge2 {
        3
    } else {
        edge1 as u8 + edge2 as u8 + corner as u8
    }
}

/// Whether a quad with these corner levels should be split along the 1-3
/// diagonal. Ties keep the 0-2 diagonal.
pub fn flip_diagonal(occlusion: [u8; 4]) -> bool {
    occlusion[1] + occlusion[3] > occlusion[0] + occlusion[2]
}

/// Occlusion levels of the four corners of one face, in corner order.
///
/// Coordinates are local to `chunk`; samples outside it go through the
/// chunk's neighbor lookup.
pub fn face_occlusion(chunk: &Chunk, x: i32, y: i32, z: i32, side: BlockSide) -> [u8; 4] {
    let normal_axis = side.axis();
    let tangents: Vec<usize> = (0..3).filter(|axis| *axis != normal_axis).collect();
    let plane = Vector3::new(x, y, z) + side.offset();

    let occludes = |position: Vector3<i32>| {
        chunk
            .get(position.x, position.y, position.z)
            .properties()
            .occludes()
    };

    let mut levels = [0; 4];
    for (level, corner) in levels.iter_mut().zip(side.corners()) {
        let mut step_a = Vector3::new(0, 0, 0);
        let mut step_b = Vector3::new(0, 0, 0);
        step_a[tangents[0]] = if corner[tangents[0]] == 1 { 1 } else { -1 };
        step_b[tangents[1]] = if corner[tangents[1]] == 1 { 1 } else { -1 };

        *level = vertex_occlusion(
            occludes(plane + step_a),
            occludes(plane + step_b),
            occludes(plane + step_a + step_b),
        );
    }
    levels
}
