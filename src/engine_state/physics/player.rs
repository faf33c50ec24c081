//! Player movement.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::config::PhysicsConfig;

use super::{apply_fluid_physics, in_fluid, move_entity, BlockQuery, Entity};

/// What the player asks for during one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    /// Desired horizontal direction in world space; Y is ignored. Lengths
    /// above one are normalized.
    pub direction: Vector3<f32>,
    /// Jump on land, swim up in fluid
    pub jump: bool,
    /// Swim down in fluid
    pub descend: bool,
}

impl Default for MovementIntent {
    fn default() -> Self {
        MovementIntent {
            direction: Vector3::new(0.0, 0.0, 0.0),
            jump: false,
            descend: false,
        }
    }
}

/// Drives the player entity from movement intents.
#[derive(Debug, Clone)]
pub struct PlayerController {
    entity: Entity,
    config: PhysicsConfig,
}

impl PlayerController {
    /// Creates a player at rest with its feet at `spawn`.
    pub fn new(spawn: Point3<f32>, config: PhysicsConfig) -> Self {
        PlayerController {
            entity: Entity::new(spawn, config.player_width, config.player_height),
            config,
        }
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn position(&self) -> Point3<f32> {
        self.entity.position
    }

    pub fn eye_position(&self) -> Point3<f32> {
        self.entity.position + Vector3::new(0.0, self.config.eye_height, 0.0)
    }

    /// Whether the block at eye height is a fluid.
    pub fn is_submerged(&self, query: &impl BlockQuery) -> bool {
        let eye = self.eye_position();
        query.is_fluid(
            eye.x.floor() as i32,
            eye.y.floor() as i32,
            eye.z.floor() as i32,
        )
    }

    /// Advances the player by `dt` seconds.
    ///
    /// On land the horizontal velocity is set straight from the intent,
    /// jumping needs ground contact, and gravity applies. In fluid the intent
    /// accelerates the player instead, followed by fluid drag and buoyancy.
    /// Collision always runs last.
    pub fn step(&mut self, query: &impl BlockQuery, intent: &MovementIntent, dt: f32) {
        let dt = dt.max(0.0);
        let config = &self.config;
        let entity = &mut self.entity;

        let mut direction = Vector3::new(intent.direction.x, 0.0, intent.direction.z);
        if direction.magnitude2() > 1.0 {
            direction = direction.normalize();
        }

        if in_fluid(entity, query) {
            let acceleration = config.swim_acceleration * dt;
            entity.velocity.x += direction.x * acceleration;
            entity.velocity.z += direction.z * acceleration;
            if intent.jump {
                entity.velocity.y += acceleration;
            }
            if intent.descend {
                entity.velocity.y -= acceleration;
            }
            apply_fluid_physics(entity, config, dt);
        } else {
            entity.velocity.x = direction.x * config.walk_speed;
            entity.velocity.z = direction.z * config.walk_speed;
            if intent.jump && entity.grounded {
                entity.velocity.y = config.jump_speed;
                entity.grounded = false;
            }
            entity.apply_gravity(config.gravity, config.terminal_velocity, dt);
        }

        move_entity(entity, query, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::physics::test_grid::TestGrid;

    const DT: f32 = 1.0 / 60.0;

    fn settle(player: &mut PlayerController, grid: &TestGrid) {
        for _ in 0..120 {
            player.step(grid, &MovementIntent::default(), DT);
        }
    }

    #[test]
    fn player_falls_and_stands_on_ground() {
        let grid = TestGrid::with_floor(9, 4);
        let mut player = PlayerController::new(Point3::new(0.5, 14.0, 0.5), PhysicsConfig::default());
        settle(&mut player, &grid);
        assert!(player.entity().grounded);
        assert!((player.position().y - 10.0).abs() < 0.01);
    }

    #[test]
    fn jump_only_from_the_ground() {
        let grid = TestGrid::with_floor(9, 4);
        let mut player = PlayerController::new(Point3::new(0.5, 14.0, 0.5), PhysicsConfig::default());
        let jump = MovementIntent {
            jump: true,
            ..MovementIntent::default()
        };
        player.step(&grid, &jump, DT);
        assert!(player.entity().velocity.y <= 0.0);

        settle(&mut player, &grid);
        player.step(&grid, &jump, DT);
        assert!(player.entity().velocity.y > 0.0);
        assert!(!player.entity().grounded);
    }

    #[test]
    fn walking_moves_at_walk_speed() {
        let grid = TestGrid::with_floor(9, 8);
        let config = PhysicsConfig::default();
        let mut player = PlayerController::new(Point3::new(0.5, 10.0, 0.5), config.clone());
        settle(&mut player, &grid);
        let start = player.position();
        let forward = MovementIntent {
            direction: Vector3::new(0.0, 0.0, 2.0),
            ..MovementIntent::default()
        };
        for _ in 0..60 {
            player.step(&grid, &forward, DT);
        }
        let travelled = player.position().z - start.z;
        assert!((travelled - config.walk_speed).abs() < 0.05);
        assert_eq!(player.position().x, start.x);
    }

    #[test]
    fn swimming_up_is_capped() {
        let mut grid = TestGrid::default();
        for y in 0..20 {
            grid.fluid.insert((0, y, 0));
        }
        let config = PhysicsConfig::default();
        let mut player = PlayerController::new(Point3::new(0.5, 5.0, 0.5), config.clone());
        let up = MovementIntent {
            jump: true,
            ..MovementIntent::default()
        };
        for _ in 0..120 {
            player.step(&grid, &up, DT);
            assert!(player.entity().velocity.y <= config.max_swim_up_speed);
        }
        assert!(player.position().y > 5.0);
        assert!(player.is_submerged(&grid));
    }
}
