//! # Physics
//!
//! Movement of box-shaped entities through the voxel grid.
//!
//! Physics never looks at chunks directly. It asks a [`BlockQuery`] whether a
//! block is solid or fluid, which [`World`](crate::engine_state::voxels::world::World)
//! implements and tests can implement with a handful of blocks.
//!
//! One step of a player runs in this order:
//! 1. intent (walking, jumping, swimming) sets or accelerates the velocity
//! 2. gravity on land, or drag and reduced gravity in fluid
//! 3. collision, resolved one axis at a time in X, Y, Z order

mod aabb;
mod collision;
mod entity;
mod fluid;
mod player;

pub use aabb::Aabb;
pub use collision::{move_entity, GROUND_EPSILON};
pub use entity::Entity;
pub use fluid::{apply_fluid_physics, in_fluid};
pub use player::{MovementIntent, PlayerController};

/// Read access to block solidity and fluids at world block coordinates.
pub trait BlockQuery {
    /// Whether the block at (`x`, `y`, `z`) blocks movement.
    fn is_solid(&self, x: i32, y: i32, z: i32) -> bool;

    /// Whether the block at (`x`, `y`, `z`) is a fluid.
    fn is_fluid(&self, x: i32, y: i32, z: i32) -> bool;
}

#[cfg(test)]
pub(crate) mod test_grid {
    use std::collections::HashSet;

    use super::BlockQuery;

    /// A sparse grid of solid and fluid blocks; everything else is empty.
    #[derive(Default)]
    pub struct TestGrid {
        pub solid: HashSet<(i32, i32, i32)>,
        pub fluid: HashSet<(i32, i32, i32)>,
    }

    impl TestGrid {
        /// A solid floor with its top surface at `y + 1`, spanning -`half`..=`half`.
        pub fn with_floor(y: i32, half: i32) -> Self {
            let mut grid = TestGrid::default();
            for x in -half..=half {
                for z in -half..=half {
                    grid.solid.insert((x, y, z));
                }
            }
            grid
        }
    }

    impl BlockQuery for TestGrid {
        fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
            self.solid.contains(&(x, y, z))
        }

        fn is_fluid(&self, x: i32, y: i32, z: i32) -> bool {
            self.fluid.contains(&(x, y, z))
        }
    }
}
