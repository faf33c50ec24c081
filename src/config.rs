//! # Configuration
//!
//! Typed engine configuration. Every section has a `Default` so a config file
//! only needs the values it wants to change:
//!
//! ```json
//! { "world": { "seed": 42, "render_distance": 3 } }
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{VoxelError, VoxelResult};

/// Top-level configuration for an [`EngineState`](crate::engine_state::EngineState).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World generation and chunk streaming.
    pub world: WorldConfig,
    /// Player physics constants.
    pub physics: PhysicsConfig,
    /// Headless simulation loop settings.
    pub simulation: SimulationConfig,
}

impl EngineConfig {
    /// Reads and validates a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`VoxelError::ConfigRead`] when the file cannot be read,
    /// [`VoxelError::ConfigParse`] when it is not valid JSON for this struct, and
    /// [`VoxelError::InvalidConfig`] when a value is out of range.
    pub fn load(path: impl AsRef<Path>) -> VoxelResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| VoxelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a JSON configuration string.
    pub fn from_json(contents: &str) -> VoxelResult<Self> {
        let config: EngineConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values the engine cannot run without.
    pub fn validate(&self) -> VoxelResult<()> {
        if self.world.render_distance < 1 {
            return Err(VoxelError::InvalidConfig(
                "world.render_distance must be at least 1".to_string(),
            ));
        }
        if self.world.spawn_search_radius < 0 {
            return Err(VoxelError::InvalidConfig(
                "world.spawn_search_radius must not be negative".to_string(),
            ));
        }
        let physics = &self.physics;
        if physics.player_width <= 0.0 || physics.player_height <= 0.0 {
            return Err(VoxelError::InvalidConfig(
                "physics.player_width and physics.player_height must be positive".to_string(),
            ));
        }
        if physics.eye_height <= 0.0 || physics.eye_height > physics.player_height {
            return Err(VoxelError::InvalidConfig(
                "physics.eye_height must lie within the player box".to_string(),
            ));
        }
        if self.simulation.max_frame_time <= 0.0 || self.simulation.fixed_dt <= 0.0 {
            return Err(VoxelError::InvalidConfig(
                "simulation.max_frame_time and simulation.fixed_dt must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// World generation and chunk streaming settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Terrain seed; the same seed always yields the same world.
    pub seed: i64,
    /// Chebyshev radius, in chunks, kept loaded around the player.
    pub render_distance: i32,
    /// Half-size, in blocks, of the square searched for a spawn point.
    pub spawn_search_radius: i32,
    /// Maximum distance for block selection rays.
    pub reach_distance: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            render_distance: 4,
            spawn_search_radius: 64,
            reach_distance: 6.0,
        }
    }
}

/// Constants for gravity, walking and swimming.
///
/// Speeds are in blocks per second, accelerations in blocks per second squared,
/// drag rates in 1/second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub jump_speed: f32,
    pub walk_speed: f32,
    pub fluid_drag: f32,
    /// Speed above which `fluid_heavy_drag` replaces `fluid_drag`.
    pub fluid_drag_threshold: f32,
    pub fluid_heavy_drag: f32,
    pub fluid_gravity: f32,
    pub max_swim_up_speed: f32,
    pub max_fluid_horizontal_speed: f32,
    pub swim_acceleration: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub eye_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 28.0,
            terminal_velocity: 50.0,
            jump_speed: 8.5,
            walk_speed: 4.5,
            fluid_drag: 2.0,
            fluid_drag_threshold: 6.0,
            fluid_heavy_drag: 8.0,
            fluid_gravity: 5.0,
            max_swim_up_speed: 3.0,
            max_fluid_horizontal_speed: 3.0,
            swim_acceleration: 14.0,
            player_width: 0.6,
            player_height: 1.8,
            eye_height: 1.62,
        }
    }
}

/// Settings for the headless simulation driven by the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of ticks to simulate.
    pub ticks: u32,
    /// Step length fed to the engine each tick, in seconds.
    pub fixed_dt: f32,
    /// Upper bound applied to any step length, in seconds.
    pub max_frame_time: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            fixed_dt: 1.0 / 60.0,
            max_frame_time: 0.1,
        }
    }
}
