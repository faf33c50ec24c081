use cgmath::{Point3, Vector3};

use super::Aabb;

/// A box-shaped body moving through the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Center of the bottom face of the box
    pub position: Point3<f32>,
    /// Blocks per second
    pub velocity: Vector3<f32>,
    /// Extent along X and Z
    pub width: f32,
    /// Extent along Y
    pub height: f32,
    /// Standing on a solid block since the last downward collision
    pub grounded: bool,
}

impl Entity {
    /// Creates an entity at rest.
    pub fn new(position: Point3<f32>, width: f32, height: f32) -> Self {
        Entity {
            position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            width,
            height,
            grounded: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_feet(self.position, self.width, self.height)
    }

    /// Accelerates downward, never faster than `terminal_velocity`.
    pub fn apply_gravity(&mut self, gravity: f32, terminal_velocity: f32, dt: f32) {
        self.velocity.y = (self.velocity.y - gravity * dt).max(-terminal_velocity);
    }
}
