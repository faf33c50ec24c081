//! # Voxel World
//!
//! This module contains everything that represents and edits the block grid.
//!
//! ## Architecture
//!
//! * **Block**: the closed set of block types and the static registry of their properties
//! * **Terrain**: deterministic, seed-based generation of the initial blocks
//! * **Chunk**: fixed-size columns of blocks, the unit of loading and meshing
//! * **World**: owns the loaded chunks, streams them around a center, applies
//!   edits with their support cascades, and answers ray and spawn queries
//!
//! ## Data Flow
//!
//! 1. The world is asked to load chunks around the player
//! 2. New chunks are filled from the terrain generator, then meshed
//! 3. Edits go through the world, which re-meshes every affected chunk
//! 4. Physics reads solidity and fluids back through [`world::World`]

pub mod block;
pub mod chunk;
pub mod terrain;
pub mod world;
