//! # Chunk Creation Module
//!
//! A builder that fills a chunk's dense storage one block at a time, in
//! storage order: X fastest, then Z, then Y. Generators drive it with nested
//! loops in the same order and never compute an index themselves.

use crate::engine_state::voxels::{
    block::block_type::BlockType,
    terrain::{TerrainGenerator, SEA_LEVEL},
};

use super::{
    Chunk, ChunkPosition, NeighborLookup, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH,
};

/// Builds a [`Chunk`] by pushing block types in storage order.
pub struct ChunkCreationIterator {
    /// The position of the chunk being created
    position: ChunkPosition,
    /// Blocks pushed so far
    blocks: Vec<BlockType>,
}

impl ChunkCreationIterator {
    /// Creates a builder for the chunk at `position`.
    pub fn new(position: ChunkPosition) -> Self {
        ChunkCreationIterator {
            position,
            blocks: Vec::with_capacity(CHUNK_VOLUME),
        }
    }

    /// Adds the next block in storage order.
    ///
    /// Pushes beyond the chunk volume are ignored.
    pub fn push_block_type(&mut self, block_type: BlockType) {
        if self.blocks.len() < CHUNK_VOLUME {
            self.blocks.push(block_type);
        }
    }

    /// Finalizes the chunk. Positions that were never pushed are air.
    pub fn return_chunk(mut self, neighbor_lookup: NeighborLookup) -> Chunk {
        self.blocks.resize(CHUNK_VOLUME, BlockType::AIR);
        Chunk::from_parts(self.position, self.blocks, neighbor_lookup)
    }
}

impl Chunk {
    /// Creates a chunk filled from the terrain generator.
    pub fn from_terrain(
        position: ChunkPosition,
        terrain: &TerrainGenerator,
        neighbor_lookup: NeighborLookup,
    ) -> Self {
        let mut cci = ChunkCreationIterator::new(position);
        let origin_x = position.x * CHUNK_WIDTH;
        let origin_z = position.z * CHUNK_DEPTH;

        // Column heights are shared by every Y layer.
        let mut heights = [[0; CHUNK_WIDTH as usize]; CHUNK_DEPTH as usize];
        for (k, row) in heights.iter_mut().enumerate() {
            for (i, height) in row.iter_mut().enumerate() {
                *height = terrain.height(origin_x + i as i32, origin_z + k as i32);
            }
        }

        for j in 0..CHUNK_HEIGHT {
            for k in 0..CHUNK_DEPTH {
                for i in 0..CHUNK_WIDTH {
                    let surface = heights[k as usize][i as usize];
                    if j > surface && j > SEA_LEVEL {
                        cci.push_block_type(BlockType::AIR);
                    } else {
                        cci.push_block_type(terrain.block_at(origin_x + i, j, origin_z + k));
                    }
                }
            }
        }

        cci.return_chunk(neighbor_lookup)
    }

    /// Creates a chunk containing only air.
    pub fn empty(position: ChunkPosition, neighbor_lookup: NeighborLookup) -> Self {
        ChunkCreationIterator::new(position).return_chunk(neighbor_lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::air_lookup;

    #[test]
    fn pushes_fill_in_storage_order() {
        let mut cci = ChunkCreationIterator::new(ChunkPosition::new(0, 0));
        cci.push_block_type(BlockType::STONE);
        cci.push_block_type(BlockType::DIRT);
        for _ in 0..CHUNK_WIDTH - 2 {
            cci.push_block_type(BlockType::AIR);
        }
        cci.push_block_type(BlockType::SAND);
        let chunk = cci.return_chunk(air_lookup());

        assert_eq!(chunk.get_local(0, 0, 0), Some(BlockType::STONE));
        assert_eq!(chunk.get_local(1, 0, 0), Some(BlockType::DIRT));
        assert_eq!(chunk.get_local(0, 0, 1), Some(BlockType::SAND));
        assert_eq!(chunk.get_local(5, 5, 5), Some(BlockType::AIR));
    }

    #[test]
    fn terrain_fill_matches_generator() {
        let terrain = TerrainGenerator::new(42);
        let position = ChunkPosition::new(-1, 2);
        let chunk = Chunk::from_terrain(position, &terrain, air_lookup());
        for (i, j, k) in [(0, 0, 0), (3, 20, 9), (15, 40, 15), (7, 33, 2), (8, 95, 8)] {
            let (wx, wy, wz) = chunk.to_world(i, j, k);
            assert_eq!(
                chunk.get_local(i, j, k),
                Some(terrain.block_at(wx, wy, wz)),
                "local ({}, {}, {})",
                i,
                j,
                k
            );
        }
    }
}
