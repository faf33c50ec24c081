//! # Error Types
//!
//! The simulation path (terrain, meshing, physics) has no recoverable errors:
//! coordinate transforms are total and unloaded chunks degrade to terrain
//! sampling. What can fail is converting raw block ids and loading
//! configuration, and those failures are described here.

use std::path::PathBuf;

/// Errors surfaced by the voxel engine.
#[derive(Debug, thiserror::Error)]
pub enum VoxelError {
    /// A raw id that does not name any declared block type.
    #[error("Invalid block type id: {0}")]
    InvalidBlockType(u8),

    /// The configuration file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`EngineConfig`](crate::config::EngineConfig).
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The configuration parsed but holds values the engine cannot run with.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result alias used by fallible engine entry points.
pub type VoxelResult<T> = Result<T, VoxelError>;
