//! Spawn point search.
//!
//! Candidates are visited in an outward square spiral around the target
//! column, so the closest acceptable column wins. Only the terrain generator is
//! consulted; nothing has to be loaded.

use cgmath::Point3;
use log::{info, warn};

use crate::engine_state::voxels::{
    block::block_type::BlockType,
    terrain::{TerrainGenerator, SEA_LEVEL},
};

use super::World;

/// Integer offsets in an outward square spiral: (0, 0), (1, 0), (1, 1),
/// (0, 1), (-1, 1), (-1, 0), ...
///
/// Yields every offset with both coordinates within `radius` exactly once.
#[derive(Debug, Clone)]
pub struct SquareSpiral {
    remaining: usize,
    x: i32,
    z: i32,
    dx: i32,
    dz: i32,
    leg_length: i32,
    leg_progress: i32,
    legs_done: u32,
}

impl SquareSpiral {
    pub fn new(radius: i32) -> Self {
        let side = 2 * radius.max(0) as usize + 1;
        SquareSpiral {
            remaining: side * side,
            x: 0,
            z: 0,
            dx: 1,
            dz: 0,
            leg_length: 1,
            leg_progress: 0,
            legs_done: 0,
        }
    }
}

impl Iterator for SquareSpiral {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = (self.x, self.z);

        self.x += self.dx;
        self.z += self.dz;
        self.leg_progress += 1;
        if self.leg_progress == self.leg_length {
            self.leg_progress = 0;
            (self.dx, self.dz) = (-self.dz, self.dx);
            self.legs_done += 1;
            if self.legs_done % 2 == 0 {
                self.leg_length += 1;
            }
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Whether a player can stand on the column at (`x`, `z`).
///
/// The surface must be at or above sea level and solid, with two blocks of
/// air above it.
fn is_standable(terrain: &TerrainGenerator, x: i32, z: i32) -> Option<i32> {
    let surface = terrain.height(x, z);
    if surface < SEA_LEVEL {
        return None;
    }
    let ground = terrain.block_at(x, surface, z).properties().solid;
    let clear = terrain.block_at(x, surface + 1, z) == BlockType::AIR
        && terrain.block_at(x, surface + 2, z) == BlockType::AIR;
    (ground && clear).then_some(surface)
}

/// Finds a dry, open column near (`target_x`, `target_z`).
///
/// Returns the feet position centered on the chosen column, one block above
/// its surface. When no column within `radius` qualifies, falls back to the
/// target column at its ground height.
pub fn find_spawn(
    terrain: &TerrainGenerator,
    target_x: i32,
    target_z: i32,
    radius: i32,
) -> Point3<f32> {
    for (dx, dz) in SquareSpiral::new(radius) {
        let (x, z) = (target_x + dx, target_z + dz);
        if let Some(surface) = is_standable(terrain, x, z) {
            let spawn = Point3::new(x as f32 + 0.5, (surface + 1) as f32, z as f32 + 0.5);
            info!(
                "Spawn at ({}, {}, {}), {} blocks from the target",
                spawn.x,
                spawn.y,
                spawn.z,
                dx.abs().max(dz.abs())
            );
            return spawn;
        }
    }

    let surface = terrain.height(target_x, target_z);
    warn!(
        "No dry spawn within {} blocks of ({}, {}); using ground height {}",
        radius, target_x, target_z, surface
    );
    Point3::new(target_x as f32, (surface + 1) as f32, target_z as f32)
}

impl World {
    /// [`find_spawn`] against this world's terrain.
    pub fn find_spawn(&self, target_x: i32, target_z: i32, radius: i32) -> Point3<f32> {
        find_spawn(self.terrain(), target_x, target_z, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn spiral_starts_at_the_center_and_walks_outward() {
        let first: Vec<(i32, i32)> = SquareSpiral::new(1).take(4).collect();
        assert_eq!(first, vec![(0, 0), (1, 0), (1, 1), (0, 1)]);
    }

    #[test]
    fn spiral_covers_the_square_exactly_once() {
        for radius in 0..5 {
            let offsets: Vec<(i32, i32)> = SquareSpiral::new(radius).collect();
            let unique: HashSet<(i32, i32)> = offsets.iter().copied().collect();
            let side = (2 * radius + 1) as usize;
            assert_eq!(offsets.len(), side * side);
            assert_eq!(unique.len(), offsets.len());
            assert!(offsets
                .iter()
                .all(|(x, z)| x.abs() <= radius && z.abs() <= radius));
        }
    }

    #[test]
    fn spiral_rings_never_shrink() {
        let mut ring = 0;
        for (x, z) in SquareSpiral::new(6) {
            let current = x.abs().max(z.abs());
            assert!(current >= ring);
            ring = current;
        }
    }

    #[test]
    fn columns_at_or_above_sea_level_are_standable() {
        let terrain = TerrainGenerator::new(42);
        for (x, z) in SquareSpiral::new(20) {
            let surface = terrain.height(x, z);
            assert_eq!(
                is_standable(&terrain, x, z).is_some(),
                surface >= SEA_LEVEL,
                "column ({}, {})",
                x,
                z
            );
        }
    }

    #[test]
    fn dry_target_spawns_on_itself() {
        let terrain = TerrainGenerator::new(42);
        let (x, z) = SquareSpiral::new(256)
            .find(|&(x, z)| terrain.height(x, z) >= SEA_LEVEL)
            .expect("seed 42 has dry land near the origin");

        let spawn = find_spawn(&terrain, x, z, 8);

        let surface = terrain.height(x, z);
        assert_eq!(
            spawn,
            Point3::new(x as f32 + 0.5, (surface + 1) as f32, z as f32 + 0.5)
        );
        assert!(terrain.block_at(x, surface, z).properties().solid);
        assert_eq!(terrain.block_at(x, surface + 1, z), BlockType::AIR);
        assert_eq!(terrain.block_at(x, surface + 2, z), BlockType::AIR);
    }

    #[test]
    fn wet_target_spawns_on_the_neighboring_shore() {
        let terrain = TerrainGenerator::new(42);
        let (x, z) = SquareSpiral::new(256)
            .find(|&(x, z)| {
                terrain.height(x, z) < SEA_LEVEL && terrain.height(x + 1, z) >= SEA_LEVEL
            })
            .expect("seed 42 has a shoreline near the origin");

        let spawn = find_spawn(&terrain, x, z, 1);

        let (spawn_x, spawn_z) = (spawn.x.floor() as i32, spawn.z.floor() as i32);
        assert!((spawn_x - x).abs() <= 1 && (spawn_z - z).abs() <= 1);
        assert_ne!((spawn_x, spawn_z), (x, z));
        let surface = is_standable(&terrain, spawn_x, spawn_z).expect("spawn column is dry");
        assert_eq!(spawn.y, (surface + 1) as f32);
        assert_eq!(spawn.x - spawn.x.floor(), 0.5);
    }

    #[test]
    fn fallback_uses_ground_height_at_the_target() {
        let terrain = TerrainGenerator::new(3);
        let (x, z) = SquareSpiral::new(256)
            .find(|&(x, z)| terrain.height(x, z) < SEA_LEVEL)
            .expect("seed 3 has sea near the origin");

        // Radius 0 only checks the target column.
        let spawn = find_spawn(&terrain, x, z, 0);

        let expected_y = (terrain.height(x, z) + 1) as f32;
        assert_eq!(spawn, Point3::new(x as f32, expected_y, z as f32));
    }
}
