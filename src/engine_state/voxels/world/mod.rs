//! # World Module
//!
//! This module provides the `World` struct which owns every loaded chunk and
//! is the single entry point for reading and editing blocks.
//!
//! ## Architecture
//!
//! Chunks live in a map keyed by [`ChunkPosition`], at most one per position.
//! The map is wrapped in a [`StResource`] so that each chunk's neighbor lookup
//! can hold a weak handle to it: chunks read their neighbors through the world
//! without owning it, and dropping the world drops every chunk.
//!
//! Reads never fail. Positions in unloaded chunks or outside the vertical
//! range are answered by sampling the terrain generator.
//!
//! ## Editing
//!
//! [`World::set_block`] writes one block, runs the support cascade when the
//! block was removed, and re-meshes every affected chunk exactly once.

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use cgmath::Point3;
use log::{info, trace};

use crate::config::WorldConfig;
use crate::core::StResource;
use crate::engine_state::physics::BlockQuery;
use crate::engine_state::rendering::meshing::ChunkMesh;

use super::{
    block::block_type::BlockType,
    chunk::{
        world_to_local, Chunk, ChunkPosition, NeighborLookup, CHUNK_DEPTH, CHUNK_HEIGHT,
        CHUNK_WIDTH,
    },
    terrain::TerrainGenerator,
};

mod raycast;
mod spawn;
mod support;

pub use raycast::RayHit;
pub use spawn::{find_spawn, SquareSpiral};

type ChunkMap = HashMap<ChunkPosition, StResource<Chunk>>;

/// What a call to [`World::set_block`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// Whether the requested block was written
    pub applied: bool,
    /// Positions removed by the support cascade, in removal order
    pub cascade_removed: Vec<Point3<i32>>,
    /// Chunks whose geometry was rebuilt, each listed once
    pub remeshed: Vec<ChunkPosition>,
}

/// Chunks loaded and unloaded by one call to [`World::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkChanges {
    pub loaded: Vec<ChunkPosition>,
    pub unloaded: Vec<ChunkPosition>,
}

/// A voxel world streamed around a moving center.
pub struct World {
    /// Shared with every chunk's neighbor lookup
    terrain: Rc<TerrainGenerator>,
    /// A mapping from chunk coordinates to chunk data
    chunks: StResource<ChunkMap>,
    /// Chebyshev radius, in chunks, that [`World::update`] keeps loaded
    render_distance: i32,
}

impl World {
    /// Creates a world with no chunks loaded.
    ///
    /// # Arguments
    ///
    /// * `seed` - Terrain seed
    /// * `render_distance` - Radius, in chunks, kept loaded around the center
    pub fn new(seed: i64, render_distance: i32) -> Self {
        World {
            terrain: Rc::new(TerrainGenerator::new(seed)),
            chunks: StResource::new(HashMap::new()),
            render_distance: render_distance.max(0),
        }
    }

    /// Creates a world from its configuration section.
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.seed, config.render_distance)
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    /// Builds the lookup a chunk uses for positions outside itself.
    ///
    /// Resolution order: another loaded chunk's own storage, then the terrain
    /// generator when that chunk is unloaded or Y is out of range.
    fn neighbor_lookup(&self) -> NeighborLookup {
        let chunks = self.chunks.downgrade();
        let terrain = Rc::clone(&self.terrain);
        Box::new(move |x, y, z| {
            if (0..CHUNK_HEIGHT).contains(&y) {
                let (position, local_x, local_y, local_z) = world_to_local(x, y, z);
                if let Some(chunks) = chunks.upgrade() {
                    if let Some(chunk) = chunks.get().get(&position) {
                        if let Some(block_type) = chunk.get().get_local(local_x, local_y, local_z)
                        {
                            return block_type;
                        }
                    }
                }
            }
            terrain.block_at(x, y, z)
        })
    }

    /// Loads and unloads chunks around the chunk at (`center_x`, `center_z`).
    ///
    /// Every chunk within `render_distance` (Chebyshev) is loaded and every
    /// chunk farther than `render_distance + 1` is unloaded. New chunks are all
    /// inserted before any of them is meshed, so their boundary faces see each
    /// other's data.
    pub fn update(&mut self, center_x: i32, center_z: i32) -> ChunkChanges {
        let center = ChunkPosition::new(center_x, center_z);
        let radius = self.render_distance;

        let mut unloaded: Vec<ChunkPosition> = self
            .chunks
            .get()
            .keys()
            .filter(|position| position.chebyshev_distance(center) > radius + 1)
            .copied()
            .collect();
        unloaded.sort();
        for position in &unloaded {
            if let Some(chunk) = self.chunks.get_mut().remove(position) {
                chunk.get_mut().dispose();
            }
        }

        let mut loaded = Vec::new();
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                let position = center.offset(dx, dz);
                if self.is_chunk_loaded(position) {
                    continue;
                }
                let chunk = Chunk::from_terrain(position, &self.terrain, self.neighbor_lookup());
                self.chunks
                    .get_mut()
                    .insert(position, StResource::new(chunk));
                loaded.push(position);
            }
        }

        for position in &loaded {
            self.remesh(*position);
        }

        if !loaded.is_empty() || !unloaded.is_empty() {
            info!(
                "Chunks around ({}, {}): loaded {}, unloaded {}, {} resident",
                center_x,
                center_z,
                loaded.len(),
                unloaded.len(),
                self.loaded_chunk_count()
            );
        }

        ChunkChanges { loaded, unloaded }
    }

    /// [`World::update`] around the chunk containing a world position.
    pub fn update_around(&mut self, position: Point3<f32>) -> ChunkChanges {
        let center = ChunkPosition::from_world_f32(position.x, position.z);
        self.update(center.x, center.z)
    }

    /// The loaded chunk at `position`, if any.
    pub fn chunk(&self, position: ChunkPosition) -> Option<StResource<Chunk>> {
        self.chunks.get().get(&position).cloned()
    }

    pub fn is_chunk_loaded(&self, position: ChunkPosition) -> bool {
        self.chunks.get().contains_key(&position)
    }

    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.get().len()
    }

    /// Positions of every loaded chunk, sorted.
    pub fn loaded_positions(&self) -> Vec<ChunkPosition> {
        let mut positions: Vec<ChunkPosition> = self.chunks.get().keys().copied().collect();
        positions.sort();
        positions
    }

    /// Runs `f` on the current geometry of a loaded, meshed chunk.
    pub fn with_chunk_mesh<R>(
        &self,
        position: ChunkPosition,
        f: impl FnOnce(&ChunkMesh) -> R,
    ) -> Option<R> {
        let chunk = self.chunk(position)?;
        let chunk = chunk.get();
        chunk.mesh().map(f)
    }

    /// The block stored in a loaded chunk, or `None` when the chunk is not
    /// loaded or Y is out of range.
    pub fn loaded_block(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        let (position, local_x, local_y, local_z) = world_to_local(x, y, z);
        let chunk = self.chunk(position)?;
        let block_type = chunk.get().get_local(local_x, local_y, local_z);
        block_type
    }

    /// The block at a world position.
    ///
    /// Falls back to the terrain generator outside loaded chunks and outside
    /// the vertical range.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.loaded_block(x, y, z)
            .unwrap_or_else(|| self.terrain.block_at(x, y, z))
    }

    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z).properties().solid
    }

    pub fn is_fluid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z).properties().fluid
    }

    /// Writes a block without cascading or re-meshing.
    ///
    /// Returns false when the position is not in a loaded chunk.
    fn write_block(&self, x: i32, y: i32, z: i32, block_type: BlockType) -> bool {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return false;
        }
        let (position, local_x, local_y, local_z) = world_to_local(x, y, z);
        match self.chunk(position) {
            Some(chunk) => chunk.get_mut().set(local_x, local_y, local_z, block_type),
            None => false,
        }
    }

    /// Rebuilds the geometry of a loaded chunk. Returns false when not loaded.
    fn remesh(&self, position: ChunkPosition) -> bool {
        let Some(chunk) = self.chunk(position) else {
            return false;
        };
        let mesh = chunk.get().generate_mesh();
        chunk.get_mut().replace_mesh(mesh);
        true
    }

    /// Sets the block at a world position.
    ///
    /// Removing a block (writing air) runs the support cascade from that
    /// position. Every chunk touched by the edit or the cascade is re-meshed
    /// once; so is any loaded chunk that shares a face with a touched boundary
    /// block. Edits outside loaded chunks or the vertical range are ignored.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> EditOutcome {
        let mut outcome = EditOutcome::default();
        if !self.write_block(x, y, z, block_type) {
            trace!(
                "Ignoring edit at ({}, {}, {}): not in a loaded chunk",
                x,
                y,
                z
            );
            return outcome;
        }
        outcome.applied = true;

        let mut dirty = BTreeSet::new();
        mark_dirty(&mut dirty, x, z);

        if block_type.is_air() {
            outcome.cascade_removed = support::cascade(self, Point3::new(x, y, z));
            for removed in &outcome.cascade_removed {
                mark_dirty(&mut dirty, removed.x, removed.z);
            }
        }

        for position in dirty {
            if self.remesh(position) {
                outcome.remeshed.push(position);
            }
        }
        outcome
    }

    /// Removes a block the way a player breaks it.
    ///
    /// Air and fluids cannot be broken.
    pub fn break_block(&mut self, x: i32, y: i32, z: i32) -> EditOutcome {
        let current = self.get_block(x, y, z);
        if current.is_air() || current.properties().fluid {
            trace!("Nothing to break at ({}, {}, {})", x, y, z);
            return EditOutcome::default();
        }
        self.set_block(x, y, z, BlockType::AIR)
    }

    /// Places a block the way a player does.
    ///
    /// The target cell must hold a replaceable block, and a block that needs
    /// support is only placed where one of its support directions holds a
    /// support.
    pub fn place_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> EditOutcome {
        if block_type.is_air() || !self.get_block(x, y, z).properties().replaceable {
            trace!(
                "Cannot place {:?} at ({}, {}, {})",
                block_type,
                x,
                y,
                z
            );
            return EditOutcome::default();
        }
        if !support::is_supported(self, Point3::new(x, y, z), block_type) {
            trace!(
                "Cannot place {:?} at ({}, {}, {}): unsupported",
                block_type,
                x,
                y,
                z
            );
            return EditOutcome::default();
        }
        self.set_block(x, y, z, block_type)
    }
}

/// Adds the chunk of a touched block, plus the chunks sharing its faces when
/// it lies on a chunk boundary.
fn mark_dirty(dirty: &mut BTreeSet<ChunkPosition>, x: i32, z: i32) {
    let (position, local_x, _, local_z) = world_to_local(x, 0, z);
    dirty.insert(position);
    if local_x == 0 {
        dirty.insert(position.offset(-1, 0));
    }
    if local_x == CHUNK_WIDTH - 1 {
        dirty.insert(position.offset(1, 0));
    }
    if local_z == 0 {
        dirty.insert(position.offset(0, -1));
    }
    if local_z == CHUNK_DEPTH - 1 {
        dirty.insert(position.offset(0, 1));
    }
}

impl BlockQuery for World {
    fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        World::is_solid(self, x, y, z)
    }

    fn is_fluid(&self, x: i32, y: i32, z: i32) -> bool {
        World::is_fluid(self, x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_world(render_distance: i32) -> World {
        let mut world = World::new(42, render_distance);
        world.update(0, 0);
        world
    }

    #[test]
    fn update_loads_the_square_around_the_center() {
        let world = loaded_world(1);
        assert_eq!(world.loaded_chunk_count(), 9);
        for position in world.loaded_positions() {
            assert!(position.chebyshev_distance(ChunkPosition::new(0, 0)) <= 1);
            assert!(world.with_chunk_mesh(position, |_| ()).is_some());
        }
    }

    #[test]
    fn chunks_just_outside_the_radius_stay_loaded() {
        let mut world = loaded_world(1);
        let changes = world.update(1, 0);
        // Distance 2 from the new center is within the unload margin.
        assert!(changes.unloaded.is_empty());
        assert!(world.is_chunk_loaded(ChunkPosition::new(-1, 0)));
        let changes = world.update(2, 0);
        assert!(changes.unloaded.contains(&ChunkPosition::new(-1, 0)));
    }

    #[test]
    fn reads_fall_back_to_terrain() {
        let world = World::new(42, 1);
        assert_eq!(world.loaded_chunk_count(), 0);
        assert_eq!(world.get_block(8, 0, 8), world.terrain().block_at(8, 0, 8));
        assert_eq!(world.loaded_block(8, 0, 8), None);
        assert_eq!(world.get_block(8, -3, 8), BlockType::BEDROCK);
    }

    #[test]
    fn edits_outside_loaded_chunks_are_ignored() {
        let mut world = loaded_world(0);
        let outcome = world.set_block(100, 40, 100, BlockType::STONE);
        assert!(!outcome.applied);
        let outcome = world.set_block(3, CHUNK_HEIGHT, 3, BlockType::STONE);
        assert!(!outcome.applied);
        assert!(outcome.remeshed.is_empty());
    }

    #[test]
    fn interior_edit_remeshes_one_chunk() {
        let mut world = loaded_world(1);
        let outcome = world.set_block(5, 80, 5, BlockType::STONE);
        assert!(outcome.applied);
        assert_eq!(outcome.remeshed, vec![ChunkPosition::new(0, 0)]);
        assert_eq!(world.get_block(5, 80, 5), BlockType::STONE);
    }

    #[test]
    fn boundary_edit_remeshes_the_face_sharing_chunk() {
        let mut world = loaded_world(1);
        let outcome = world.set_block(0, 80, 5, BlockType::STONE);
        assert_eq!(
            outcome.remeshed,
            vec![ChunkPosition::new(-1, 0), ChunkPosition::new(0, 0)]
        );
        let outcome = world.set_block(15, 80, 15, BlockType::STONE);
        assert_eq!(outcome.remeshed.len(), 3);
    }

    #[test]
    fn neighbor_chunk_sees_edits_across_the_boundary() {
        let mut world = loaded_world(1);
        world.set_block(-1, 80, 5, BlockType::STONE);
        let chunk = world.chunk(ChunkPosition::new(0, 0)).unwrap();
        assert_eq!(chunk.get().get(-1, 80, 5), BlockType::STONE);
    }

    #[test]
    fn break_refuses_air_and_fluids() {
        let mut world = loaded_world(0);
        assert!(!world.break_block(5, 90, 5).applied);
        world.set_block(5, 80, 5, BlockType::WATER);
        assert!(!world.break_block(5, 80, 5).applied);
        world.set_block(5, 81, 5, BlockType::GLASS);
        assert!(world.break_block(5, 81, 5).applied);
        assert_eq!(world.get_block(5, 81, 5), BlockType::AIR);
    }

    #[test]
    fn place_requires_a_replaceable_cell_and_support() {
        let mut world = loaded_world(0);
        assert!(!world.place_block(5, 85, 5, BlockType::SAND).applied);
        assert!(world.place_block(5, 85, 5, BlockType::STONE).applied);
        assert!(!world.place_block(5, 85, 5, BlockType::GLASS).applied);
        assert!(world.place_block(5, 86, 5, BlockType::SAND).applied);
        assert!(world.place_block(5, 84, 5, BlockType::VINE).applied);
    }
}
