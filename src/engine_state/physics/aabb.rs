use cgmath::{Point3, Vector3};

use super::BlockQuery;

/// An axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    /// The box of an entity standing at `feet`, centered horizontally.
    pub fn from_feet(feet: Point3<f32>, width: f32, height: f32) -> Self {
        let half = width * 0.5;
        Aabb {
            min: Point3::new(feet.x - half, feet.y, feet.z - half),
            max: Point3::new(feet.x + half, feet.y + height, feet.z + half),
        }
    }

    /// The unit cube of the block at (`x`, `y`, `z`).
    pub fn block(x: i32, y: i32, z: i32) -> Self {
        let min = Point3::new(x as f32, y as f32, z as f32);
        Aabb {
            min,
            max: min + Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Whether the interiors of the two boxes overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// This box moved by `offset`.
    pub fn offset(&self, offset: Vector3<f32>) -> Self {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Inclusive block coordinates the box overlaps, `floor(min)..=floor(max)`.
    pub fn block_range(&self) -> (Point3<i32>, Point3<i32>) {
        (
            Point3::new(
                self.min.x.floor() as i32,
                self.min.y.floor() as i32,
                self.min.z.floor() as i32,
            ),
            Point3::new(
                self.max.x.floor() as i32,
                self.max.y.floor() as i32,
                self.max.z.floor() as i32,
            ),
        )
    }

    /// Whether any solid block lies in the box's block range.
    pub fn collides(&self, query: &impl BlockQuery) -> bool {
        let (min, max) = self.block_range();
        (min.x..=max.x).any(|x| {
            (min.y..=max.y).any(|y| (min.z..=max.z).any(|z| query.is_solid(x, y, z)))
        })
    }
}
