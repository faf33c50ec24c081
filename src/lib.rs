#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A voxel world engine: procedural terrain partitioned into streamed chunks,
//! culled and ambient-occluded chunk meshes, block editing with structural
//! support, and box collision with fluid physics.
//!
//! ## Key Modules
//!
//! * `core` - Shared-ownership primitives used throughout the engine
//! * `config` - Typed, JSON-loadable engine configuration
//! * `error` - The crate error type
//! * `engine_state` - The engine itself: voxels, meshing and physics
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_world::{EngineConfig, EngineState, MovementIntent};
//!
//! let mut engine = EngineState::new(EngineConfig::default());
//! engine.tick(1.0 / 60.0, &MovementIntent::default());
//! println!("player at {:?}", engine.player_position());
//! ```
//!
//! The binary runs the same loop headless for a configured number of ticks:
//!
//! ```text
//! RUST_LOG=info cargo run --release -- config.json
//! ```

use cgmath::Vector3;
use log::info;
use web_time::Instant;

pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;

pub use config::EngineConfig;
pub use engine_state::{
    physics::{MovementIntent, PlayerController},
    voxels::{block::block_type::BlockType, world::World},
    EngineState,
};
pub use error::{VoxelError, VoxelResult};

/// Ticks between changes of walking direction in the headless simulation.
const TURN_INTERVAL: u32 = 120;

/// Runs the headless simulation.
///
/// Initializes logging from `RUST_LOG`, loads the configuration named by the
/// first command line argument (or the defaults), then walks the player around
/// for `simulation.ticks` fixed steps.
///
/// # Errors
/// Returns an error when the configuration cannot be read, parsed or validated.
pub fn run() -> VoxelResult<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let simulation = config.simulation.clone();

    let start = Instant::now();
    let mut engine = EngineState::new(config);
    info!("Engine initialized in {:?}", start.elapsed());

    let start = Instant::now();
    for tick in 0..simulation.ticks {
        let intent = scripted_intent(tick);
        engine.tick(simulation.fixed_dt, &intent);

        if tick == simulation.ticks / 2 {
            let outcome = engine.break_target(Vector3::new(0.3, -1.0, 0.0));
            info!(
                "Dug at tick {}: applied {}, {} removed by cascade, {} chunks re-meshed",
                tick,
                outcome.applied,
                outcome.cascade_removed.len(),
                outcome.remeshed.len()
            );
        }
    }

    let position = engine.player_position();
    info!(
        "Simulated {} ticks in {:?}: player at ({:.2}, {:.2}, {:.2}), submerged {}, {} chunks loaded",
        engine.ticks(),
        start.elapsed(),
        position.x,
        position.y,
        position.z,
        engine.is_submerged(),
        engine.world().loaded_chunk_count()
    );

    Ok(())
}

/// Walks in a square, turning every [`TURN_INTERVAL`] ticks and jumping often
/// enough to climb single-block steps.
fn scripted_intent(tick: u32) -> MovementIntent {
    let direction = match (tick / TURN_INTERVAL) % 4 {
        0 => Vector3::new(1.0, 0.0, 0.0),
        1 => Vector3::new(0.0, 0.0, 1.0),
        2 => Vector3::new(-1.0, 0.0, 0.0),
        _ => Vector3::new(0.0, 0.0, -1.0),
    };
    MovementIntent {
        direction,
        jump: tick % 30 == 0,
        descend: false,
    }
}
