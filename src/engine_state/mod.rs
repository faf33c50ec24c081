//! # Engine State Module
//!
//! The core engine module that owns the world and the player and advances
//! them one step at a time.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `voxels` - Blocks, terrain generation, chunks and the world that owns them
//! * `rendering` - Conversion of chunk data into vertex and index buffers
//! * `physics` - Collision and fluid movement of box-shaped entities
//!
//! ## Architecture
//!
//! `EngineState` is the only owner of the simulation. There are no global
//! singletons: the renderer and UI read meshes, the player position and the
//! submerged flag through it, and input reaches it as a [`MovementIntent`]
//! per step.

use cgmath::{Point3, Vector3};
use log::{debug, info};

use crate::config::EngineConfig;

use physics::{Aabb, MovementIntent, PlayerController};
use voxels::{
    block::block_type::BlockType,
    chunk::ChunkPosition,
    world::{EditOutcome, RayHit, World},
};

pub mod physics;
pub mod rendering;
pub mod voxels;

/// The main state container for the voxel engine.
///
/// One call to [`EngineState::tick`] moves the player, then streams chunks
/// around the player's new position.
pub struct EngineState {
    /// The voxel world and all loaded chunks
    world: World,
    /// The player entity and its movement rules
    player: PlayerController,
    /// The configuration the engine was created with
    config: EngineConfig,
    /// Number of completed ticks
    ticks: u64,
}

impl EngineState {
    /// Creates the world, finds a spawn point near the origin and loads the
    /// chunks around it.
    ///
    /// # Arguments
    /// * `config` - Validated engine configuration
    pub fn new(config: EngineConfig) -> Self {
        let mut world = World::from_config(&config.world);
        let spawn = world.find_spawn(0, 0, config.world.spawn_search_radius);
        world.update_around(spawn);
        let player = PlayerController::new(spawn, config.physics.clone());

        info!(
            "Engine ready: seed {}, render distance {}, {} chunks loaded",
            config.world.seed,
            config.world.render_distance,
            world.loaded_chunk_count()
        );

        EngineState {
            world,
            player,
            config,
            ticks: 0,
        }
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// `dt` is clamped to `simulation.max_frame_time` so a stalled frame
    /// cannot launch the player through the world.
    pub fn tick(&mut self, dt: f32, intent: &MovementIntent) {
        let dt = dt.clamp(0.0, self.config.simulation.max_frame_time);
        self.player.step(&self.world, intent, dt);
        self.world.update_around(self.player.position());
        self.ticks += 1;
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// World position of the player's feet.
    pub fn player_position(&self) -> Point3<f32> {
        self.player.position()
    }

    /// Whether the player's eyes are inside a fluid block.
    pub fn is_submerged(&self) -> bool {
        self.player.is_submerged(&self.world)
    }

    /// The chunk the player is standing in.
    pub fn player_chunk(&self) -> ChunkPosition {
        let position = self.player.position();
        ChunkPosition::from_world_f32(position.x, position.z)
    }

    /// The block the player is looking at along `look`, within reach.
    pub fn target_block(&self, look: Vector3<f32>) -> Option<RayHit> {
        self.world.raycast(
            self.player.eye_position(),
            look,
            self.config.world.reach_distance,
        )
    }

    /// Breaks the block the player is looking at.
    pub fn break_target(&mut self, look: Vector3<f32>) -> EditOutcome {
        match self.target_block(look) {
            Some(hit) => {
                let outcome = self.world.break_block(hit.block.x, hit.block.y, hit.block.z);
                debug!(
                    "Broke block at {:?}: {} removed by cascade",
                    hit.block,
                    outcome.cascade_removed.len()
                );
                outcome
            }
            None => EditOutcome::default(),
        }
    }

    /// Places a block against the face the player is looking at.
    ///
    /// Placement is refused when the new block would overlap the player.
    pub fn place_target(&mut self, look: Vector3<f32>, block_type: BlockType) -> EditOutcome {
        let Some(hit) = self.target_block(look) else {
            return EditOutcome::default();
        };
        let place = hit.place;
        let cell = Aabb::block(place.x, place.y, place.z);
        if block_type.properties().solid && cell.intersects(&self.player.entity().aabb()) {
            debug!("Refusing to place {:?} inside the player", block_type);
            return EditOutcome::default();
        }
        self.world
            .place_block(place.x, place.y, place.z, block_type)
    }

    /// Runs `f` on the geometry of every loaded chunk, in chunk order.
    pub fn for_each_chunk_mesh(
        &self,
        mut f: impl FnMut(ChunkPosition, &rendering::meshing::ChunkMesh),
    ) {
        for position in self.world.loaded_positions() {
            self.world.with_chunk_mesh(position, |mesh| f(position, mesh));
        }
    }
}
