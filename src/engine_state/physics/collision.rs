//! Swept, per-axis collision against the block grid.
//!
//! Each axis is moved and tested on its own, X then Y then Z, so an entity
//! blocked on one axis still slides along the others. Long moves are split
//! into sub-steps shorter than a block so fast entities cannot skip through
//! thin walls or floors.

use cgmath::Vector3;

use super::{BlockQuery, Entity};

/// Gap left between the feet and the floor after landing.
pub const GROUND_EPSILON: f32 = 0.001;

/// Longest distance moved along one axis before collision is tested again.
const MAX_SUBSTEP: f32 = 0.45;

/// Moves `entity` by its velocity over `dt`, resolving collisions.
///
/// - X or Z hit: the move on that axis is undone and its velocity zeroed.
/// - Y hit moving down: the feet are snapped onto the block top and the
///   entity becomes grounded.
/// - Y hit moving up: the move is undone.
/// - Any Y hit zeroes the vertical velocity; moving down without a hit
///   clears the grounded flag.
pub fn move_entity(entity: &mut Entity, query: &impl BlockQuery, dt: f32) {
    if dt <= 0.0 {
        return;
    }
    let longest = entity
        .velocity
        .x
        .abs()
        .max(entity.velocity.y.abs())
        .max(entity.velocity.z.abs())
        * dt;
    let steps = (longest / MAX_SUBSTEP).ceil().max(1.0) as u32;
    let step_dt = dt / steps as f32;

    for _ in 0..steps {
        move_axis(entity, query, 0, step_dt);
        move_axis(entity, query, 1, step_dt);
        move_axis(entity, query, 2, step_dt);
    }
}

fn move_axis(entity: &mut Entity, query: &impl BlockQuery, axis: usize, dt: f32) {
    let delta = entity.velocity[axis] * dt;
    if delta == 0.0 {
        return;
    }

    let mut offset = Vector3::new(0.0, 0.0, 0.0);
    offset[axis] = delta;
    entity.position += offset;
    let hit = entity.aabb().collides(query);

    if axis != 1 {
        if hit {
            entity.position -= offset;
            entity.velocity[axis] = 0.0;
        }
        return;
    }

    if hit {
        if delta < 0.0 {
            entity.position.y = entity.position.y.floor() + 1.0 + GROUND_EPSILON;
            entity.grounded = true;
        } else {
            entity.position -= offset;
        }
        entity.velocity.y = 0.0;
    } else if delta < 0.0 {
        entity.grounded = false;
    }
}
