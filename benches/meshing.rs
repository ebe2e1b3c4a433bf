/// Benchmark suite for chunk generation and meshing
/// Measures culled-face meshing across empty, solid and generated chunks
use blockworld::core::config::WorldConfig;
use blockworld::engine_state::rendering::meshing::{mesh_chunk, ChunkNeighbors, Mesh};
use blockworld::engine_state::voxels::{
    block::{block_type::BlockType, Block},
    chunk::CHUNK_SIZE,
    terrain::TerrainGenerator,
    world::World,
};
use cgmath::Point3;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_mesh_uniform_air(c: &mut Criterion) {
    c.bench_function("mesh_uniform_air", |b| {
        let mut blocks = vec![Block::AIR; CHUNK_SIZE as usize];
        let mut mesh = Mesh::with_chunk_capacity();
        b.iter(|| mesh_chunk(black_box(&mut blocks), &ChunkNeighbors::none(), &mut mesh));
    });
}

fn bench_mesh_uniform_solid(c: &mut Criterion) {
    c.bench_function("mesh_uniform_solid", |b| {
        let mut blocks = vec![Block::new(BlockType::STONE); CHUNK_SIZE as usize];
        let mut mesh = Mesh::with_chunk_capacity();
        b.iter(|| mesh_chunk(black_box(&mut blocks), &ChunkNeighbors::none(), &mut mesh));
    });
}

fn bench_mesh_checkerboard(c: &mut Criterion) {
    c.bench_function("mesh_checkerboard", |b| {
        // Every other block solid: the worst case for emitted faces.
        let mut blocks: Vec<Block> = (0..CHUNK_SIZE as usize)
            .map(|i| {
                let (x, y, z) = (i % 16, (i / 16) % 16, i / 256);
                if (x + y + z) % 2 == 0 {
                    Block::new(BlockType::DIRT)
                } else {
                    Block::AIR
                }
            })
            .collect();
        let mut mesh = Mesh::with_chunk_capacity();
        b.iter(|| mesh_chunk(black_box(&mut blocks), &ChunkNeighbors::none(), &mut mesh));
    });
}

fn bench_generate_terrain(c: &mut Criterion) {
    let generator = TerrainGenerator::new(0);
    let mut group = c.benchmark_group("generate_terrain");

    for chunk_y in [0, 2, 4].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(chunk_y), chunk_y, |b, &chunk_y| {
            let mut blocks = vec![Block::AIR; CHUNK_SIZE as usize];
            b.iter(|| generator.generate(black_box(Point3::new(3, chunk_y, -2)), &mut blocks));
        });
    }
    group.finish();
}

fn bench_load_region(c: &mut Criterion) {
    c.bench_function("load_region_5x5x3", |b| {
        b.iter(|| {
            let mut world = World::new(&WorldConfig::default());
            for x in -2..=2 {
                for z in -2..=2 {
                    for y in 0..3 {
                        world.get_or_load_chunk(Point3::new(x, y, z));
                    }
                }
            }
            black_box(world.process_remesh_queue())
        });
    });
}

criterion_group!(
    benches,
    bench_mesh_uniform_air,
    bench_mesh_uniform_solid,
    bench_mesh_checkerboard,
    bench_generate_terrain,
    bench_load_region
);
criterion_main!(benches);
