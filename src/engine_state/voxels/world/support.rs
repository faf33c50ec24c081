//! Structural support.
//!
//! Some blocks (sand, snow, vines) only stay in place while a supporting
//! block sits in one of their declared support directions. Removing a block
//! can therefore remove its dependents, and theirs in turn.

use std::collections::VecDeque;

use cgmath::Point3;
use log::trace;

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType};

use super::World;

/// Whether `block_type` would be held up at `position`.
///
/// Blocks that do not need support are always held up.
pub(super) fn is_supported(world: &World, position: Point3<i32>, block_type: BlockType) -> bool {
    let props = block_type.properties();
    !props.needs_support
        || props.support_offsets().any(|offset| {
            let support = position + offset;
            world
                .get_block(support.x, support.y, support.z)
                .properties()
                .is_support
        })
}

/// Removes every block left unsupported by the removal at `origin`.
///
/// Breadth-first from `origin`: each face neighbor that needs support and no
/// longer has any is turned to air, and the search continues from it. Only
/// blocks in loaded chunks are removed. Every removal turns a block into air,
/// so the search always terminates.
///
/// Returns the removed positions in removal order.
pub(super) fn cascade(world: &World, origin: Point3<i32>) -> Vec<Point3<i32>> {
    let mut removed = Vec::new();
    let mut queue = VecDeque::from([origin]);

    while let Some(position) = queue.pop_front() {
        for side in BlockSide::all() {
            let neighbor: Point3<i32> = position + side.offset();
            let Some(block_type) = world.loaded_block(neighbor.x, neighbor.y, neighbor.z) else {
                continue;
            };
            if !block_type.properties().needs_support
                || is_supported(world, neighbor, block_type)
            {
                continue;
            }

            if world.write_block(neighbor.x, neighbor.y, neighbor.z, BlockType::AIR) {
                trace!(
                    "Support lost: removed {:?} at ({}, {}, {})",
                    block_type,
                    neighbor.x,
                    neighbor.y,
                    neighbor.z
                );
                removed.push(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    removed
}
