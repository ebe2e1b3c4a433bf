/// Integration tests for the chunk pool, block access and remeshing
use blockworld::core::config::WorldConfig;
use blockworld::engine_state::rendering::RecordingRenderer;
use blockworld::engine_state::voxels::{
    block::block_type::BlockType,
    chunk::CHUNK_DIMENSION,
    coordinates::{chunk_origin, split_world_position},
    world::World,
};
use cgmath::Point3;

fn world_with_capacity(max_loaded_chunks: usize) -> World {
    World::new(&WorldConfig {
        max_loaded_chunks,
        ..WorldConfig::default()
    })
}

#[test]
fn test_pool_never_exceeds_capacity() {
    let mut world = world_with_capacity(4);
    for x in 0..10 {
        world.get_or_load_chunk(Point3::new(x, 0, 0));
        assert!(world.loaded_chunk_count() <= 4);
    }
    assert_eq!(world.loaded_chunk_count(), 4);
}

#[test]
fn test_coordinates_are_unique_among_loaded_chunks() {
    let mut world = world_with_capacity(16);
    for i in 0..40 {
        world.get_or_load_chunk(Point3::new(i % 5, 0, i % 3));
    }
    let mut seen: Vec<_> = world.loaded_chunks().map(|c| c.position).collect();
    let total = seen.len();
    seen.sort_by_key(|p| (p.x, p.y, p.z));
    seen.dedup();
    assert_eq!(seen.len(), total);
}

#[test]
fn test_eviction_keeps_chunks_near_observer() {
    let mut world = world_with_capacity(3);
    world.set_observer_position(Point3::new(100.0, 0.0, 0.0));
    world.get_or_load_chunk(Point3::new(6, 0, 0));
    world.get_or_load_chunk(Point3::new(0, 0, 0));
    world.get_or_load_chunk(Point3::new(7, 0, 0));
    world.get_or_load_chunk(Point3::new(5, 0, 0));

    assert!(!world.is_loaded(Point3::new(0, 0, 0)));
    assert!(world.is_loaded(Point3::new(5, 0, 0)));
    assert!(world.is_loaded(Point3::new(6, 0, 0)));
    assert!(world.is_loaded(Point3::new(7, 0, 0)));
}

#[test]
fn test_get_block_at_negative_positions() {
    let mut world = world_with_capacity(8);
    let position = Point3::new(-1, 200, -17);
    world.set_block_at(position, BlockType::BRICK);

    let (chunk, local) = split_world_position(position);
    assert_eq!(chunk, Point3::new(-1, 12, -2));
    assert_eq!(local, Point3::new(15, 8, 15));
    assert_eq!(
        world.get_block_at(position).map(|b| b.block_type),
        Some(BlockType::BRICK.id())
    );
}

#[test]
fn test_missing_chunk_reads_none() {
    let world = world_with_capacity(8);
    assert!(world.get_block_at(Point3::new(0, 0, 0)).is_none());
    assert!(world.get_chunk(Point3::new(0, 0, 0)).is_none());
}

#[test]
fn test_corner_edit_enqueues_three_neighbors() {
    let mut world = world_with_capacity(16);
    let center = Point3::new(0, 8, 0);
    for offset in [
        Point3::new(0, 0, 0),
        Point3::new(-1, 0, 0),
        Point3::new(0, -1, 0),
        Point3::new(0, 0, -1),
        Point3::new(1, 0, 0),
    ] {
        world.get_or_load_chunk(Point3::new(center.x + offset.x, center.y + offset.y, center.z + offset.z));
    }
    world.process_remesh_queue();

    let origin = chunk_origin(center);
    assert!(world.try_set_block_at(origin, BlockType::STONE));

    // The chunk itself, then its -x, -y and -z neighbors; +x is untouched.
    assert_eq!(world.pending_remeshes().len(), 4);
    assert_eq!(world.process_remesh_queue(), 4);
}

#[test]
fn test_boundary_faces_follow_neighbor_loading() {
    let mut world = world_with_capacity(8);
    let mut renderer = RecordingRenderer::new();

    // A single block on the +x face of an empty sky chunk.
    let block = Point3::new(CHUNK_DIMENSION - 1, 8 * CHUNK_DIMENSION + 4, 4);
    world.set_block_at(block, BlockType::STONE);
    world.process_remesh_queue();
    let vertices = |world: &World| {
        world
            .get_chunk(Point3::new(0, 8, 0))
            .map(|chunk| chunk.mesh.vertex_count())
            .unwrap_or(0)
    };
    assert_eq!(vertices(&world), 24);

    // Loading an empty neighbor keeps the face; filling its touching block hides it.
    world.get_or_load_chunk(Point3::new(1, 8, 0));
    world.set_block_at(Point3::new(CHUNK_DIMENSION, block.y, block.z), BlockType::DIRT);
    world.process_remesh_queue();
    assert_eq!(vertices(&world), 20);

    assert_eq!(world.draw(&mut renderer), 2);
}

#[test]
fn test_unloading_neighbor_restores_boundary_faces() {
    let mut world = world_with_capacity(8);
    let vertices = |world: &World| {
        world
            .get_chunk(Point3::new(0, 8, 0))
            .map(|chunk| chunk.mesh.vertex_count())
            .unwrap_or(0)
    };

    let y = 8 * CHUNK_DIMENSION + 4;
    world.set_block_at(Point3::new(CHUNK_DIMENSION - 1, y, 4), BlockType::STONE);
    world.set_block_at(Point3::new(CHUNK_DIMENSION, y, 4), BlockType::STONE);
    world.process_remesh_queue();
    assert_eq!(vertices(&world), 20);

    assert!(world.unload_chunk(Point3::new(1, 8, 0)));
    world.process_remesh_queue();
    assert_eq!(vertices(&world), 24);
}

#[test]
fn test_evicting_neighbor_restores_boundary_faces() {
    let mut world = world_with_capacity(2);
    world.set_observer_position(Point3::new(0.0, 8.0 * CHUNK_DIMENSION as f32, 0.0));

    let y = 8 * CHUNK_DIMENSION + 4;
    world.set_block_at(Point3::new(CHUNK_DIMENSION - 1, y, 4), BlockType::STONE);
    world.set_block_at(Point3::new(CHUNK_DIMENSION, y, 4), BlockType::STONE);
    world.process_remesh_queue();

    // The +x neighbor is farthest from the observer and gets evicted.
    world.get_or_load_chunk(Point3::new(0, 7, 0));
    assert!(!world.is_loaded(Point3::new(1, 8, 0)));
    world.process_remesh_queue();
    assert_eq!(
        world.get_chunk(Point3::new(0, 8, 0)).map(|chunk| chunk.mesh.vertex_count()),
        Some(24)
    );
}

#[test]
fn test_eviction_tie_goes_to_first_slot() {
    let mut world = world_with_capacity(2);
    world.set_observer_position(Point3::new(0.0, 0.0, 0.0));
    world.get_or_load_chunk(Point3::new(0, 0, 1));
    world.get_or_load_chunk(Point3::new(0, 0, -1));

    world.get_or_load_chunk(Point3::new(0, 1, 0));
    assert!(!world.is_loaded(Point3::new(0, 0, 1)));
    assert!(world.is_loaded(Point3::new(0, 0, -1)));
}

#[test]
fn test_unload_all_then_reload() {
    let mut world = world_with_capacity(8);
    let mut renderer = RecordingRenderer::new();
    for x in 0..3 {
        world.get_or_load_chunk(Point3::new(x, 0, 0));
    }
    world.process_remesh_queue();
    world.draw(&mut renderer);
    let uploaded = renderer.live_mesh_count();
    assert!(uploaded > 0);

    world.unload_all_chunks();
    assert_eq!(world.loaded_chunk_count(), 0);
    assert!(world.pending_remeshes().is_empty());
    world.draw(&mut renderer);
    assert_eq!(renderer.live_mesh_count(), 0);

    world.get_or_load_chunk(Point3::new(0, 0, 0));
    assert_eq!(world.loaded_chunk_count(), 1);
}

#[test]
fn test_regenerated_chunk_matches_first_load() {
    let mut world = world_with_capacity(1);
    world.get_or_load_chunk(Point3::new(2, 1, 2));
    let first = world.snapshot_chunk(Point3::new(2, 1, 2));
    assert!(first.is_some());
    world.get_or_load_chunk(Point3::new(9, 1, 9));
    assert!(!world.is_loaded(Point3::new(2, 1, 2)));

    world.get_or_load_chunk(Point3::new(2, 1, 2));
    assert_eq!(world.snapshot_chunk(Point3::new(2, 1, 2)), first);
}
