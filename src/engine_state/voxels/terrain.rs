//! # Terrain Generation
//!
//! Deterministic noise-driven terrain. Two octaves of 2D Perlin noise give the
//! surface height of each column, and a 3D Perlin sample carves caves whose
//! likelihood fades out toward the surface.
//!
//! Generation reads nothing but the chunk coordinate and the noise seed, so
//! regenerating a coordinate always yields the same blocks.

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use super::{
    block::{block_type::BlockType, Block},
    chunk::CHUNK_DIMENSION,
    coordinates::{chunk_origin, local_index},
};

/// Base surface height before noise is added.
pub const BASE_HEIGHT: i32 = 10;
/// Frequency of the fine surface octave.
pub const DETAIL_FREQUENCY: f64 = 0.05;
/// Amplitude of the fine surface octave.
pub const DETAIL_AMPLITUDE: f64 = 10.0;
/// Frequency of the broad surface octave.
pub const BROAD_FREQUENCY: f64 = 0.01;
/// Amplitude of the broad surface octave.
pub const BROAD_AMPLITUDE: f64 = 30.0;
/// Depth below the surface where stone begins.
pub const DIRT_DEPTH: i32 = 5;
/// Frequency of the cave noise.
pub const CAVE_FREQUENCY: f64 = 0.1;
/// Cave threshold deep underground.
pub const CAVE_BASE_THRESHOLD: f32 = 0.4;
/// Depth below the surface where the cave threshold starts rising.
pub const CAVE_FADE_DEPTH: i32 = 10;
/// Threshold increase per block above the fade depth.
pub const CAVE_FADE_RATE: f32 = 0.06;

/// Generates chunk terrain from a seeded Perlin noise source.
#[derive(Clone)]
pub struct TerrainGenerator {
    perlin: Perlin,
}

impl TerrainGenerator {
    /// Creates a generator for the given noise seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// 2D noise remapped to `[0, 1]`.
    pub fn perlin2d(&self, x: f64, y: f64) -> f32 {
        ((self.perlin.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }

    /// 3D noise remapped to `[0, 1]`.
    pub fn perlin3d(&self, x: f64, y: f64, z: f64) -> f32 {
        ((self.perlin.get([x, y, z]) + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }

    /// Height of the grass block in the column at world `(x, z)`.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        let (x, z) = (x as f64, z as f64);
        let detail = self.perlin2d(x * DETAIL_FREQUENCY, z * DETAIL_FREQUENCY) as f64;
        let broad = self.perlin2d(x * BROAD_FREQUENCY, z * BROAD_FREQUENCY) as f64;

        BASE_HEIGHT + (detail * DETAIL_AMPLITUDE) as i32 + (broad * BROAD_AMPLITUDE) as i32
    }

    /// Block type at a world position, given the column's surface height.
    pub fn block_at(&self, x: i32, y: i32, z: i32, height: i32) -> BlockType {
        let cave_noise = self.perlin3d(
            x as f64 * CAVE_FREQUENCY,
            y as f64 * CAVE_FREQUENCY,
            z as f64 * CAVE_FREQUENCY,
        );

        let fade_start = height - CAVE_FADE_DEPTH;
        let cave_factor = if y > fade_start {
            CAVE_BASE_THRESHOLD + (y - fade_start) as f32 * CAVE_FADE_RATE
        } else {
            CAVE_BASE_THRESHOLD
        };

        if cave_noise > cave_factor {
            BlockType::AIR
        } else if y == height {
            BlockType::GRASS
        } else if y < height - DIRT_DEPTH {
            BlockType::STONE
        } else if y < height {
            BlockType::DIRT
        } else {
            BlockType::AIR
        }
    }

    /// Fills a chunk's block array for the given chunk coordinate.
    ///
    /// Only block types are written; mesh spans are reset.
    ///
    /// # Panics
    /// Panics if `blocks` does not hold exactly one chunk of blocks.
    pub fn generate(&self, chunk_coordinate: Point3<i32>, blocks: &mut [Block]) {
        assert_eq!(
            blocks.len(),
            (CHUNK_DIMENSION * CHUNK_DIMENSION * CHUNK_DIMENSION) as usize,
            "terrain generation needs a full chunk of blocks"
        );

        let origin = chunk_origin(chunk_coordinate);

        for x in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                let world_x = origin.x + x;
                let world_z = origin.z + z;
                let height = self.surface_height(world_x, world_z);

                for y in 0..CHUNK_DIMENSION {
                    let block_type = self.block_at(world_x, origin.y + y, world_z, height);
                    blocks[local_index(Point3::new(x, y, z))] = Block::new(block_type);
                }
            }
        }
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
