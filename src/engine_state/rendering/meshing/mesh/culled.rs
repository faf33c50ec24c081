//! Culled per-face meshing.
//!
//! Every non-air voxel contributes up to six quads, one per side whose
//! neighbor leaves it visible. No faces are merged, so each quad keeps its own
//! per-corner ambient occlusion.

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, block_type::BlockType, BlockProperties},
    chunk::{Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH},
};

use super::{ambient_occlusion::face_occlusion, face::Face, mesh::ChunkMesh};

/// Whether a face of a block with `props` is visible against `neighbor`.
///
/// Fluids only show against air, so submerged fluid surfaces are hidden.
/// Partial blocks always show all six faces. Everything else shows when the
/// neighbor is transparent.
pub fn is_face_visible(props: &BlockProperties, neighbor: BlockType) -> bool {
    if props.fluid {
        neighbor.is_air()
    } else if props.is_partial() {
        true
    } else {
        neighbor.properties().transparent
    }
}

/// Builds the solid and fluid meshes of a chunk.
pub fn culled(chunk: &Chunk) -> ChunkMesh {
    let (origin_x, origin_y, origin_z) = chunk.position.world_origin();
    let mut mesh = ChunkMesh::new([origin_x as f32, origin_y as f32, origin_z as f32]);

    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_DEPTH {
            for x in 0..CHUNK_WIDTH {
                let block_type = chunk.get(x, y, z);
                if block_type.is_air() {
                    continue;
                }
                let props = block_type.properties();

                for side in BlockSide::all() {
                    let offset = side.offset();
                    let neighbor = chunk.get(x + offset.x, y + offset.y, z + offset.z);
                    if !is_face_visible(props, neighbor) {
                        continue;
                    }

                    let occlusion = if props.fluid {
                        [0; 4]
                    } else {
                        face_occlusion(chunk, x, y, z, side)
                    };
                    let face = Face::new(x, y, z, block_type, side, occlusion);

                    if props.fluid {
                        mesh.fluid.add_face(&face);
                    } else {
                        mesh.solid.add_face(&face);
                    }
                }
            }
        }
    }

    mesh
}
