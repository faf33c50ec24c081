//! # Terrain Module
//!
//! Deterministic, seed-based procedural block assignment.
//!
//! The surface is a heightfield built from three frequencies of one 2D Perlin
//! noise. Below the surface, a 3D Perlin noise carves caves. Both noise
//! sources are seeded from a `fastrand` stream started from the world seed, so
//! the same seed always produces the same world and nothing depends on call
//! order or wall-clock time. Chunks sample [`TerrainGenerator::block_at`]
//! lazily, including for neighbors that are not loaded.

use noise::{NoiseFn, Perlin};

use super::block::block_type::BlockType;

/// Highest Y that is filled with water when above the surface.
pub const SEA_LEVEL: i32 = 32;
/// Surfaces lower than this are sand instead of grass.
pub const BEACH_HEIGHT: i32 = 34;
/// Added to the summed noise so that heights are typically positive.
pub const HEIGHT_OFFSET: f64 = 34.0;

/// Depth of the dirt layer under the surface block.
const DIRT_DEPTH: i32 = 3;
/// Caves never open within this many blocks of the surface or the floor.
const CAVE_MARGIN: i32 = 5;

const HILLS_FREQUENCY: f64 = 0.01;
const HILLS_AMPLITUDE: f64 = 20.0;
const RIDGES_FREQUENCY: f64 = 0.04;
const RIDGES_AMPLITUDE: f64 = 10.0;
const DETAIL_FREQUENCY: f64 = 0.12;
const DETAIL_AMPLITUDE: f64 = 3.0;

const CAVE_FREQUENCY: f64 = 0.07;
const CAVE_THRESHOLD: f64 = 0.35;

/// Procedural terrain source.
///
/// `TerrainGenerator` is immutable once seeded: sampling takes `&self` and has
/// no side effects, so it can be shared freely between the world and every
/// chunk's neighbor lookup.
#[derive(Clone)]
pub struct TerrainGenerator {
    seed: i64,
    surface_noise: Perlin,
    cave_noise: Perlin,
}

impl TerrainGenerator {
    /// Creates a generator for the given seed.
    pub fn new(seed: i64) -> Self {
        let (surface_noise, cave_noise) = Self::seeded_noise(seed);
        TerrainGenerator {
            seed,
            surface_noise,
            cave_noise,
        }
    }

    /// Reinitializes both noise sources from `seed`.
    pub fn set_seed(&mut self, seed: i64) {
        let (surface_noise, cave_noise) = Self::seeded_noise(seed);
        self.seed = seed;
        self.surface_noise = surface_noise;
        self.cave_noise = cave_noise;
    }

    /// The seed this generator was last initialized with.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    fn seeded_noise(seed: i64) -> (Perlin, Perlin) {
        let mut rng = fastrand::Rng::with_seed(seed as u64);
        let surface_noise = Perlin::new(rng.u32(..));
        let cave_noise = Perlin::new(rng.u32(..));
        (surface_noise, cave_noise)
    }

    /// Surface elevation of the column at (`world_x`, `world_z`).
    pub fn height(&self, world_x: i32, world_z: i32) -> i32 {
        let x = world_x as f64;
        let z = world_z as f64;
        let hills = self
            .surface_noise
            .get([x * HILLS_FREQUENCY, z * HILLS_FREQUENCY]);
        let ridges = self
            .surface_noise
            .get([x * RIDGES_FREQUENCY, z * RIDGES_FREQUENCY]);
        let detail = self
            .surface_noise
            .get([x * DETAIL_FREQUENCY, z * DETAIL_FREQUENCY]);

        (hills * HILLS_AMPLITUDE + ridges * RIDGES_AMPLITUDE + detail * DETAIL_AMPLITUDE
            + HEIGHT_OFFSET)
            .floor() as i32
    }

    /// Whether the 3D cave noise carves out the given position.
    ///
    /// Only consulted strictly between the floor margin and the surface margin.
    fn is_cave(&self, world_x: i32, world_y: i32, world_z: i32) -> bool {
        let sample = self.cave_noise.get([
            world_x as f64 * CAVE_FREQUENCY,
            world_y as f64 * CAVE_FREQUENCY,
            world_z as f64 * CAVE_FREQUENCY,
        ]);
        sample > CAVE_THRESHOLD
    }

    /// The generated block at a world position.
    ///
    /// Rules are applied in order:
    /// 1. below the world floor: bedrock
    /// 2. above the surface: water up to sea level, air above it
    /// 3. the two lowest layers: bedrock
    /// 4. inside the cave band, where the cave noise is high: air
    /// 5. the surface itself: sand on beaches, grass elsewhere
    /// 6. the layers just under the surface: dirt
    /// 7. everything else: stone
    pub fn block_at(&self, world_x: i32, world_y: i32, world_z: i32) -> BlockType {
        if world_y < 0 {
            return BlockType::BEDROCK;
        }

        let surface = self.height(world_x, world_z);
        if world_y > surface {
            return if world_y <= SEA_LEVEL {
                BlockType::WATER
            } else {
                BlockType::AIR
            };
        }

        if world_y <= 1 {
            return BlockType::BEDROCK;
        }

        if world_y > CAVE_MARGIN
            && world_y < surface - CAVE_MARGIN
            && self.is_cave(world_x, world_y, world_z)
        {
            return BlockType::AIR;
        }

        if world_y == surface {
            if surface < BEACH_HEIGHT {
                BlockType::SAND
            } else {
                BlockType::GRASS
            }
        } else if world_y >= surface - DIRT_DEPTH {
            BlockType::DIRT
        } else {
            BlockType::STONE
        }
    }
}
