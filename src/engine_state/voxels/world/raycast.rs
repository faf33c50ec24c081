//! Ray selection of blocks.
//!
//! Rays walk the voxel grid cell by cell (Amanatides and Woo traversal) and
//! stop at the first cell holding selectable geometry: any loaded block that
//! is neither air nor a fluid. Cells in unloaded chunks hold no geometry, so
//! the walk ends as soon as it leaves the loaded region for good.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::chunk::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

use super::World;

/// Distance the hit point is pulled back along the normal before flooring.
const HIT_EPSILON: f32 = 1e-3;

/// The first block a ray touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The block that was hit
    pub block: Point3<i32>,
    /// The empty cell in front of the hit face, where a placed block goes
    pub place: Point3<i32>,
    /// Where the ray meets the block surface
    pub point: Point3<f32>,
    /// Outward normal of the face that was hit
    pub normal: Vector3<i32>,
    /// Distance from the ray origin to `point`
    pub distance: f32,
}

impl World {
    /// Casts a ray and returns the first selectable block within `max_distance`.
    ///
    /// The cell containing the origin is never reported. Partial blocks are
    /// only hit where the ray crosses their slab. `max_distance` may be
    /// infinite; the walk still stops once the ray has left the loaded chunks
    /// and the vertical range without turning back.
    pub fn raycast(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<RayHit> {
        let finite_input = origin.x.is_finite()
            && origin.y.is_finite()
            && origin.z.is_finite()
            && direction.x.is_finite()
            && direction.y.is_finite()
            && direction.z.is_finite();
        if !finite_input
            || direction.magnitude2() == 0.0
            || max_distance.is_nan()
            || max_distance <= 0.0
        {
            return None;
        }
        let direction = direction.normalize();
        let (min_cell, max_cell) = self.loaded_cell_bounds()?;

        let mut cell = [
            origin.x.floor() as i32,
            origin.y.floor() as i32,
            origin.z.floor() as i32,
        ];
        let mut step = [0; 3];
        let mut t_max = [f32::INFINITY; 3];
        let mut t_delta = [f32::INFINITY; 3];
        for axis in 0..3 {
            let d = direction[axis];
            if d > 0.0 {
                step[axis] = 1;
                t_delta[axis] = 1.0 / d;
                t_max[axis] = ((cell[axis] + 1) as f32 - origin[axis]) / d;
            } else if d < 0.0 {
                step[axis] = -1;
                t_delta[axis] = -1.0 / d;
                t_max[axis] = (cell[axis] as f32 - origin[axis]) / d;
            }
        }

        loop {
            let axis = if t_max[0] < t_max[1] {
                if t_max[0] < t_max[2] {
                    0
                } else {
                    2
                }
            } else if t_max[1] < t_max[2] {
                1
            } else {
                2
            };

            let t = t_max[axis];
            if t > max_distance {
                return None;
            }
            cell[axis] += step[axis];
            t_max[axis] += t_delta[axis];

            let leaving = (0..3).any(|a| {
                (cell[a] < min_cell[a] && step[a] <= 0) || (cell[a] > max_cell[a] && step[a] >= 0)
            });
            if leaving {
                return None;
            }

            let mut normal = Vector3::new(0, 0, 0);
            normal[axis] = -step[axis];
            if let Some(hit) = self.hit_cell(origin, direction, cell, t, normal, max_distance) {
                return Some(hit);
            }
        }
    }

    /// Inclusive block bounds of every loaded chunk, or `None` when nothing is
    /// loaded.
    fn loaded_cell_bounds(&self) -> Option<([i32; 3], [i32; 3])> {
        let chunks = self.chunks.get();
        let min_x = chunks.keys().map(|position| position.x).min()?;
        let max_x = chunks.keys().map(|position| position.x).max()?;
        let min_z = chunks.keys().map(|position| position.z).min()?;
        let max_z = chunks.keys().map(|position| position.z).max()?;
        Some((
            [min_x * CHUNK_WIDTH, 0, min_z * CHUNK_DEPTH],
            [
                (max_x + 1) * CHUNK_WIDTH - 1,
                CHUNK_HEIGHT - 1,
                (max_z + 1) * CHUNK_DEPTH - 1,
            ],
        ))
    }

    /// Tests the ray against the geometry of one cell it has just entered at `t`.
    fn hit_cell(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        cell: [i32; 3],
        t: f32,
        normal: Vector3<i32>,
        max_distance: f32,
    ) -> Option<RayHit> {
        let block_type = self.loaded_block(cell[0], cell[1], cell[2])?;
        let props = block_type.properties();
        if block_type.is_air() || props.fluid {
            return None;
        }

        let (t, normal) = if props.is_partial() {
            let min = [cell[0] as f32, cell[1] as f32, cell[2] as f32];
            let max = [min[0] + 1.0, min[1] + props.height, min[2] + 1.0];
            intersect_box(origin, direction, min, max)?
        } else {
            (t, normal)
        };
        if t > max_distance {
            return None;
        }

        let point = origin + direction * t;
        let nudged = point - normal.cast::<f32>()? * HIT_EPSILON;
        let block = Point3::new(
            nudged.x.floor() as i32,
            nudged.y.floor() as i32,
            nudged.z.floor() as i32,
        );

        Some(RayHit {
            block,
            place: block + normal,
            point,
            normal,
            distance: t,
        })
    }
}

/// Slab intersection of a ray with an axis-aligned box.
///
/// Returns the entry distance and the outward normal of the entry face.
fn intersect_box(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    min: [f32; 3],
    max: [f32; 3],
) -> Option<(f32, Vector3<i32>)> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut normal = Vector3::new(0, 0, 0);

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d == 0.0 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let (mut t1, mut t2) = ((min[axis] - o) / d, (max[axis] - o) / d);
        let mut entry_sign = -1;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
            entry_sign = 1;
        }
        if t1 > t_near {
            t_near = t1;
            normal = Vector3::new(0, 0, 0);
            normal[axis] = entry_sign;
        }
        t_far = t_far.min(t2);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some((t_near.max(0.0), normal))
}
