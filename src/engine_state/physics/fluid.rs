//! Buoyancy and drag inside fluid blocks.

use cgmath::InnerSpace;

use crate::config::PhysicsConfig;

use super::{BlockQuery, Entity};

/// Height above the feet of the lower fluid sample.
const FEET_SAMPLE_HEIGHT: f32 = 0.1;

/// Whether the entity is in fluid at its feet or at its chest.
pub fn in_fluid(entity: &Entity, query: &impl BlockQuery) -> bool {
    let x = entity.position.x.floor() as i32;
    let z = entity.position.z.floor() as i32;
    let feet = (entity.position.y + FEET_SAMPLE_HEIGHT).floor() as i32;
    let chest = (entity.position.y + entity.height * 0.5).floor() as i32;
    query.is_fluid(x, feet, z) || query.is_fluid(x, chest, z)
}

/// Applies fluid drag, reduced gravity and speed limits to the velocity.
///
/// Drag decays the whole velocity exponentially, with a steeper rate while
/// the entity is faster than `fluid_drag_threshold` (for example right after
/// falling in). Vertical speed is capped at `max_swim_up_speed` and each
/// horizontal axis at `max_fluid_horizontal_speed`.
pub fn apply_fluid_physics(entity: &mut Entity, config: &PhysicsConfig, dt: f32) {
    let velocity = &mut entity.velocity;
    let rate = if velocity.magnitude() > config.fluid_drag_threshold {
        config.fluid_heavy_drag
    } else {
        config.fluid_drag
    };
    *velocity *= (-rate * dt).exp();

    velocity.y -= config.fluid_gravity * dt;

    let max_horizontal = config.max_fluid_horizontal_speed;
    velocity.y = velocity.y.min(config.max_swim_up_speed);
    velocity.x = velocity.x.clamp(-max_horizontal, max_horizontal);
    velocity.z = velocity.z.clamp(-max_horizontal, max_horizontal);
}
