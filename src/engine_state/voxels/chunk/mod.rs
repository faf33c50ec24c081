//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed-size column of the voxel
//! grid that is the unit of loading, unloading and meshing.
//!
//! ## Storage
//!
//! Blocks are stored densely, one [`BlockType`] per voxel, at index
//! `y * (CHUNK_WIDTH * CHUNK_DEPTH) + z * CHUNK_WIDTH + x`.
//!
//! ## Neighbor Lookup
//!
//! A chunk never owns or references its neighbors. Its owner injects a
//! read-only [`NeighborLookup`] that resolves world coordinates outside the
//! chunk. [`Chunk::get`] delegates to it for out-of-range coordinates, while
//! [`Chunk::get_local`] never does; lookups must only use `get_local` on other
//! chunks so that two adjacent chunks cannot recurse into each other.

use log::trace;

use crate::engine_state::rendering::meshing::{self, ChunkMesh};

use super::block::block_type::BlockType;

pub mod chunk_creation;

/// Size of a chunk along X, in blocks.
pub const CHUNK_WIDTH: i32 = 16;
/// Size of a chunk along Y, in blocks. Also the vertical extent of the world.
pub const CHUNK_HEIGHT: i32 = 96;
/// Size of a chunk along Z, in blocks.
pub const CHUNK_DEPTH: i32 = 16;
/// Number of blocks in one horizontal layer of a chunk.
pub const CHUNK_LAYER_SIZE: usize = (CHUNK_WIDTH * CHUNK_DEPTH) as usize;
/// Number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_LAYER_SIZE * CHUNK_HEIGHT as usize;

/// Resolves the block at a world position outside the querying chunk.
pub type NeighborLookup = Box<dyn Fn(i32, i32, i32) -> BlockType>;

/// A lookup that reports air everywhere, for chunks meshed on their own.
pub fn air_lookup() -> NeighborLookup {
    Box::new(|_, _, _| BlockType::AIR)
}

/// Identity of a chunk: its integer coordinates on the XZ chunk grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPosition {
    /// Chunk coordinate along X
    pub x: i32,
    /// Chunk coordinate along Z
    pub z: i32,
}

impl ChunkPosition {
    /// Creates a chunk position.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkPosition { x, z }
    }

    /// The chunk that contains the given world column.
    pub fn from_world(world_x: i32, world_z: i32) -> Self {
        ChunkPosition {
            x: world_x.div_euclid(CHUNK_WIDTH),
            z: world_z.div_euclid(CHUNK_DEPTH),
        }
    }

    /// The chunk that contains a continuous world position.
    pub fn from_world_f32(world_x: f32, world_z: f32) -> Self {
        Self::from_world(world_x.floor() as i32, world_z.floor() as i32)
    }

    /// World coordinates of this chunk's (0, 0, 0) block.
    pub fn world_origin(self) -> (i32, i32, i32) {
        (self.x * CHUNK_WIDTH, 0, self.z * CHUNK_DEPTH)
    }

    /// Distance to `other` in chunks, measured as the larger axis difference.
    pub fn chebyshev_distance(self, other: ChunkPosition) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// The chunk offset by (`dx`, `dz`).
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        ChunkPosition::new(self.x + dx, self.z + dz)
    }
}

/// Splits a world position into its chunk and the local coordinates inside it.
///
/// Y is passed through unchanged; callers check it against [`CHUNK_HEIGHT`].
pub fn world_to_local(world_x: i32, world_y: i32, world_z: i32) -> (ChunkPosition, i32, i32, i32) {
    (
        ChunkPosition::from_world(world_x, world_z),
        world_x.rem_euclid(CHUNK_WIDTH),
        world_y,
        world_z.rem_euclid(CHUNK_DEPTH),
    )
}

/// A 16x96x16 column of voxel blocks and the geometry derived from it.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkPosition,

    /// Dense block storage, see the module docs for the layout.
    blocks: Vec<BlockType>,

    /// Resolves blocks outside this chunk. Read-only; never used to mutate.
    neighbor_lookup: NeighborLookup,

    /// Solid and fluid geometry from the last rebuild, if any.
    mesh: Option<ChunkMesh>,
}

impl Chunk {
    pub(super) fn from_parts(
        position: ChunkPosition,
        blocks: Vec<BlockType>,
        neighbor_lookup: NeighborLookup,
    ) -> Self {
        debug_assert_eq!(blocks.len(), CHUNK_VOLUME);
        Chunk {
            position,
            blocks,
            neighbor_lookup,
            mesh: None,
        }
    }

    /// Storage index of a local coordinate, or `None` when it lies outside the chunk.
    fn index(x: i32, y: i32, z: i32) -> Option<usize> {
        if !(0..CHUNK_WIDTH).contains(&x)
            || !(0..CHUNK_HEIGHT).contains(&y)
            || !(0..CHUNK_DEPTH).contains(&z)
        {
            return None;
        }
        Some(y as usize * CHUNK_LAYER_SIZE + (z * CHUNK_WIDTH + x) as usize)
    }

    /// Converts local coordinates to world coordinates.
    pub fn to_world(&self, x: i32, y: i32, z: i32) -> (i32, i32, i32) {
        let (origin_x, origin_y, origin_z) = self.position.world_origin();
        (origin_x + x, origin_y + y, origin_z + z)
    }

    /// The block at local coordinates.
    ///
    /// Coordinates outside the chunk are resolved through the neighbor lookup,
    /// so this never reads out of bounds and never fails.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockType {
        match Self::index(x, y, z) {
            Some(index) => self.blocks[index],
            None => {
                let (world_x, world_y, world_z) = self.to_world(x, y, z);
                (self.neighbor_lookup)(world_x, world_y, world_z)
            }
        }
    }

    /// The block at local coordinates, without neighbor delegation.
    ///
    /// Returns `None` outside the chunk. Neighbor lookups use this on other
    /// chunks.
    pub fn get_local(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        Self::index(x, y, z).map(|index| self.blocks[index])
    }

    /// Writes a block at local coordinates.
    ///
    /// Writes outside the chunk are ignored; edits only ever target the
    /// owning chunk. Returns whether the write happened.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> bool {
        match Self::index(x, y, z) {
            Some(index) => {
                self.blocks[index] = block_type;
                true
            }
            None => {
                trace!(
                    "Ignoring out-of-range write at ({}, {}, {}) in chunk {:?}",
                    x,
                    y,
                    z,
                    self.position
                );
                false
            }
        }
    }

    /// Number of blocks of the given type in this chunk.
    pub fn count(&self, block_type: BlockType) -> usize {
        self.blocks.iter().filter(|b| **b == block_type).count()
    }

    /// Generates the solid and fluid geometry for the current block data.
    ///
    /// Takes `&self` so neighbors may be read through their own shared borrows
    /// while this chunk is being meshed.
    pub fn generate_mesh(&self) -> ChunkMesh {
        meshing::mesh_chunk(self)
    }

    /// Replaces the held geometry, disposing the previous one.
    pub fn replace_mesh(&mut self, mesh: ChunkMesh) {
        if let Some(old) = self.mesh.replace(mesh) {
            trace!(
                "Disposed {} solid and {} fluid vertices of chunk {:?}",
                old.solid.vertices.len(),
                old.fluid.vertices.len(),
                self.position
            );
        }
    }

    /// Rebuilds this chunk's geometry in place.
    pub fn build_mesh(&mut self) {
        let mesh = self.generate_mesh();
        self.replace_mesh(mesh);
    }

    /// The geometry from the last rebuild.
    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    /// Frees the held geometry. The block data is kept.
    pub fn dispose(&mut self) {
        self.mesh = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn set_then_get_inside_chunk() {
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0), air_lookup());
        assert!(chunk.set(3, 4, 5, BlockType::STONE));
        assert_eq!(chunk.get(3, 4, 5), BlockType::STONE);
        assert_eq!(chunk.get_local(3, 4, 5), Some(BlockType::STONE));
        assert_eq!(chunk.count(BlockType::STONE), 1);
    }

    #[test]
    fn out_of_range_set_is_ignored() {
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0), air_lookup());
        assert!(!chunk.set(-1, 0, 0, BlockType::STONE));
        assert!(!chunk.set(0, CHUNK_HEIGHT, 0, BlockType::STONE));
        assert!(!chunk.set(0, 0, CHUNK_DEPTH, BlockType::STONE));
        assert_eq!(chunk.count(BlockType::STONE), 0);
    }

    #[test]
    fn out_of_range_get_delegates_with_world_coordinates() {
        let seen = Rc::new(Cell::new((0, 0, 0)));
        let record = seen.clone();
        let lookup: NeighborLookup = Box::new(move |x, y, z| {
            record.set((x, y, z));
            BlockType::GLASS
        });
        let chunk = Chunk::empty(ChunkPosition::new(2, -1), lookup);

        assert_eq!(chunk.get(-1, 7, 0), BlockType::GLASS);
        assert_eq!(seen.get(), (2 * CHUNK_WIDTH - 1, 7, -CHUNK_DEPTH));

        assert_eq!(chunk.get(0, -1, CHUNK_DEPTH), BlockType::GLASS);
        assert_eq!(seen.get(), (2 * CHUNK_WIDTH, -1, 0));

        assert_eq!(chunk.get_local(-1, 7, 0), None);
    }

    #[test]
    fn storage_layout_is_y_major() {
        assert_eq!(Chunk::index(0, 0, 0), Some(0));
        assert_eq!(Chunk::index(1, 0, 0), Some(1));
        assert_eq!(Chunk::index(0, 0, 1), Some(CHUNK_WIDTH as usize));
        assert_eq!(Chunk::index(0, 1, 0), Some(CHUNK_LAYER_SIZE));
        assert_eq!(
            Chunk::index(CHUNK_WIDTH - 1, CHUNK_HEIGHT - 1, CHUNK_DEPTH - 1),
            Some(CHUNK_VOLUME - 1)
        );
    }

    #[test]
    fn world_to_local_wraps_negative_coordinates() {
        let (position, x, y, z) = world_to_local(-1, 12, -17);
        assert_eq!(position, ChunkPosition::new(-1, -2));
        assert_eq!((x, y, z), (CHUNK_WIDTH - 1, 12, CHUNK_DEPTH - 1));
    }

    #[test]
    fn chebyshev_distance_uses_larger_axis() {
        let a = ChunkPosition::new(0, 0);
        assert_eq!(a.chebyshev_distance(ChunkPosition::new(3, -1)), 3);
        assert_eq!(a.chebyshev_distance(ChunkPosition::new(-2, 5)), 5);
    }

    #[test]
    fn rebuild_replaces_and_dispose_frees_geometry() {
        let mut chunk = Chunk::empty(ChunkPosition::new(0, 0), air_lookup());
        chunk.set(1, 1, 1, BlockType::STONE);
        assert!(chunk.mesh().is_none());
        chunk.build_mesh();
        assert_eq!(chunk.mesh().map(|m| m.solid.face_count()), Some(6));
        chunk.set(2, 1, 1, BlockType::STONE);
        chunk.build_mesh();
        assert_eq!(chunk.mesh().map(|m| m.solid.face_count()), Some(10));
        chunk.dispose();
        assert!(chunk.mesh().is_none());
    }
}
