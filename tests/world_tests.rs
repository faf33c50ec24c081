use cgmath::Point3;
use voxel_world::engine_state::voxels::{
    chunk::ChunkPosition,
    terrain::TerrainGenerator,
};
use voxel_world::{BlockType, World};

/// Loads a world of `render_distance` around chunk (0, 0).
fn loaded_world(seed: i64, render_distance: i32) -> World {
    let mut world = World::new(seed, render_distance);
    world.update(0, 0);
    world
}

#[test]
fn terrain_is_deterministic_for_a_seed() {
    let first = TerrainGenerator::new(42);
    let second = TerrainGenerator::new(42);
    for x in (-64..64).step_by(5) {
        for z in (-64..64).step_by(7) {
            for y in 0..90 {
                assert_eq!(first.block_at(x, y, z), second.block_at(x, y, z));
            }
        }
    }
}

#[test]
fn seed_42_floor_and_sky() {
    let terrain = TerrainGenerator::new(42);
    assert_eq!(terrain.block_at(8, 0, 8), BlockType::BEDROCK);
    assert_eq!(terrain.block_at(8, 200, 8), BlockType::AIR);
}

#[test]
fn snow_falls_with_its_support() {
    let mut world = loaded_world(42, 1);
    world.set_block(5, 9, 5, BlockType::STONE);
    world.set_block(5, 10, 5, BlockType::SNOW);
    assert_eq!(world.get_block(5, 10, 5), BlockType::SNOW);

    let outcome = world.set_block(5, 9, 5, BlockType::AIR);

    assert!(outcome.applied);
    assert_eq!(world.get_block(5, 10, 5), BlockType::AIR);
    assert!(outcome.cascade_removed.contains(&Point3::new(5, 10, 5)));
}

#[test]
fn stacked_sand_cascade_removes_exactly_the_stack() {
    for height in 1..=6 {
        let mut world = loaded_world(7, 1);
        world.set_block(3, 80, 3, BlockType::STONE);
        for y in 81..81 + height {
            world.set_block(3, y, 3, BlockType::SAND);
        }

        let outcome = world.break_block(3, 80, 3);

        assert_eq!(outcome.cascade_removed.len(), height as usize);
        for y in 80..81 + height {
            assert_eq!(world.get_block(3, y, 3), BlockType::AIR);
        }
    }
}

#[test]
fn moving_the_center_streams_chunks() {
    let radius = 2;
    let mut world = loaded_world(42, radius);
    let side = (2 * radius + 1) as usize;
    assert_eq!(world.loaded_chunk_count(), side * side);

    let changes = world.update(radius + 2, 0);

    let old_center = ChunkPosition::new(0, 0);
    let new_center = ChunkPosition::new(radius + 2, 0);
    assert!(!world.is_chunk_loaded(old_center));
    assert!(changes.unloaded.contains(&old_center));
    for dz in -radius..=radius {
        for dx in -radius..=radius {
            assert!(world.is_chunk_loaded(new_center.offset(dx, dz)));
        }
    }
    for position in world.loaded_positions() {
        assert!(position.chebyshev_distance(new_center) <= radius + 1);
    }
}

#[test]
fn edits_outside_loaded_chunks_are_ignored() {
    let mut world = loaded_world(42, 1);
    let outcome = world.set_block(500, 40, 500, BlockType::STONE);
    assert!(!outcome.applied);
    assert!(outcome.remeshed.is_empty());

    let outcome = world.set_block(2, 96, 2, BlockType::STONE);
    assert!(!outcome.applied);
    let outcome = world.set_block(2, -1, 2, BlockType::STONE);
    assert!(!outcome.applied);
}

#[test]
fn boundary_edit_remeshes_the_face_neighbor() {
    let mut world = loaded_world(42, 1);
    let outcome = world.set_block(15, 85, 4, BlockType::STONE);
    assert_eq!(
        outcome.remeshed,
        vec![ChunkPosition::new(0, 0), ChunkPosition::new(1, 0)]
    );

    let outcome = world.set_block(7, 85, 7, BlockType::STONE);
    assert_eq!(outcome.remeshed, vec![ChunkPosition::new(0, 0)]);
}

#[test]
fn raycast_down_finds_the_surface() {
    let world = loaded_world(42, 1);
    let surface = world.terrain().height(4, 4);
    let origin = Point3::new(4.5, 90.0, 4.5);
    let down = cgmath::Vector3::new(0.0, -1.0, 0.0);

    let hit = world.raycast(origin, down, 200.0);

    let hit = hit.expect("a column always has ground");
    assert_eq!(hit.block.x, 4);
    assert_eq!(hit.block.z, 4);
    // Water is not selectable, so the hit is the surface or the sea floor.
    assert!(hit.block.y <= surface.max(32));
    assert_eq!(hit.place, Point3::new(4, hit.block.y + 1, 4));
}

#[test]
fn raycast_into_empty_sky_misses() {
    let world = loaded_world(42, 1);
    let up = cgmath::Vector3::new(0.0, 1.0, 0.0);
    assert!(world.raycast(Point3::new(4.5, 90.0, 4.5), up, 50.0).is_none());
}
