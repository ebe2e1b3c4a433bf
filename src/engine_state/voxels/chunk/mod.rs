//! # Chunk Module
//!
//! This module provides the `Chunk` struct for managing 16x16x16 blocks of voxel
//! data together with the chunk's mesh.
//!
//! ## Storage
//!
//! Blocks live in a flat array of [`CHUNK_SIZE`] entries, x-fastest
//! (`x + y * 16 + z * 256`). Chunks are pooled by the world: a pool slot keeps
//! its `Chunk` value between loads, and loading a new coordinate into it
//! reuses the block array and the mesh buffers.
//!
//! ### Mesh Lifecycle
//! - **Host buffers**: allocated at worst-case size on init, cleared per rebuild,
//!   freed by [`Chunk::forget`]
//! - **Device mesh**: uploaded lazily by [`Chunk::draw`] after a rebuild, the
//!   previous handle freed first

use cgmath::{Matrix4, Point3};
use chunk_iteration::ChunkBlockIterator;

use crate::engine_state::rendering::{
    meshing::{mesh_chunk, ChunkNeighbors, Mesh},
    MeshHandle, Renderer,
};

use super::block::block_type::BlockType;
use super::block::Block;
use super::coordinates::{chunk_translation, is_local_in_bounds, local_index};
use super::terrain::TerrainGenerator;

pub mod chunk_iteration;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Represents a 16x16x16 collection of voxel blocks in the world.
///
/// Chunks are the fundamental unit of world data, streaming and meshing. Each
/// chunk knows its position in chunk coordinates, its blocks and its mesh.
#[derive(Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,

    /// Block data, [`CHUNK_SIZE`] entries once initialised, empty before.
    pub blocks: Vec<Block>,

    /// Host-side mesh built from `blocks` by the last rebuild.
    pub mesh: Mesh,

    /// Device mesh uploaded from `mesh`, if any.
    gpu_mesh: Option<MeshHandle>,

    /// Set when `mesh` changed since the last upload.
    needs_upload: bool,
}

impl Default for Chunk {
    /// An unloaded pool slot: no blocks and no mesh buffers.
    fn default() -> Self {
        Chunk {
            position: Point3::new(0, 0, 0),
            blocks: Vec::new(),
            mesh: Mesh::new(),
            gpu_mesh: None,
            needs_upload: false,
        }
    }
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    ///
    /// # Returns
    /// A new `Chunk` filled with air, its mesh buffers allocated but empty.
    pub fn empty(position: Point3<i32>) -> Self {
        Chunk {
            position,
            blocks: vec![Block::AIR; CHUNK_SIZE as usize],
            mesh: Mesh::with_chunk_capacity(),
            gpu_mesh: None,
            needs_upload: false,
        }
    }

    /// Creates a chunk with generated terrain, meshed without neighbors.
    pub fn generated(position: Point3<i32>, terrain: &TerrainGenerator) -> Self {
        let mut chunk = Chunk::default();
        chunk.init(position, terrain);
        chunk.mesh(&ChunkNeighbors::none());
        chunk
    }

    /// Loads terrain for `position` into this chunk, reusing its storage.
    ///
    /// All blocks are zeroed before generation and the mesh buffers are grown
    /// to worst-case capacity. The mesh itself is not rebuilt; the caller
    /// meshes once neighbors are known.
    pub fn init(&mut self, position: Point3<i32>, terrain: &TerrainGenerator) {
        self.position = position;

        self.blocks.clear();
        self.blocks.resize(CHUNK_SIZE as usize, Block::AIR);
        terrain.generate(position, &mut self.blocks);

        self.mesh.clear();
        self.mesh.reserve_chunk_capacity();
    }

    /// Whether the chunk holds block data.
    pub fn is_initialised(&self) -> bool {
        self.blocks.len() == CHUNK_SIZE as usize
    }

    /// Returns the block at a local position.
    ///
    /// # Panics
    /// Panics if `local_position` is outside `[0, 16)` on any axis.
    pub fn get_block(&self, local_position: Point3<i32>) -> &Block {
        assert!(
            is_local_in_bounds(local_position),
            "local position {:?} is outside the chunk",
            local_position
        );
        &self.blocks[local_index(local_position)]
    }

    /// Sets the type of the block at a local position.
    ///
    /// Only the block type changes; the mesh is stale until the next rebuild.
    ///
    /// # Panics
    /// Panics if `local_position` is outside `[0, 16)` on any axis.
    pub fn set_block(&mut self, local_position: Point3<i32>, block_type: BlockType) {
        assert!(
            is_local_in_bounds(local_position),
            "local position {:?} is outside the chunk",
            local_position
        );
        self.blocks[local_index(local_position)].block_type = block_type.id();
    }

    /// Iterates the non-air blocks with their local positions.
    pub fn solid_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// Rebuilds the mesh against the given neighbors.
    ///
    /// # Returns
    /// The number of faces emitted.
    pub fn mesh(&mut self, neighbors: &ChunkNeighbors) -> usize {
        let faces = mesh_chunk(&mut self.blocks, neighbors, &mut self.mesh);
        self.needs_upload = true;
        faces
    }

    /// Moves the block array and mesh out so the world can mesh this chunk
    /// while borrowing its neighbors from the same pool.
    pub(crate) fn take_mesh_inputs(&mut self) -> (Vec<Block>, Mesh) {
        (
            std::mem::take(&mut self.blocks),
            std::mem::take(&mut self.mesh),
        )
    }

    /// Puts back what [`Chunk::take_mesh_inputs`] took, after a rebuild.
    pub(crate) fn restore_mesh_inputs(&mut self, blocks: Vec<Block>, mesh: Mesh) {
        self.blocks = blocks;
        self.mesh = mesh;
        self.needs_upload = true;
    }

    /// Releases the mesh buffers.
    ///
    /// # Returns
    /// The device mesh that must be freed by the renderer, if one was uploaded.
    pub fn forget(&mut self) -> Option<MeshHandle> {
        self.mesh.release();
        self.needs_upload = false;
        self.gpu_mesh.take()
    }

    /// Model transform placing the chunk mesh in the world.
    pub fn transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(chunk_translation(self.position))
    }

    /// Uploads a rebuilt mesh if needed and draws the chunk.
    ///
    /// Chunks with an empty mesh issue no draw call.
    ///
    /// # Returns
    /// Whether a draw call was issued.
    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        if self.needs_upload {
            if let Some(handle) = self.gpu_mesh.take() {
                renderer.free_mesh(handle);
            }
            if !self.mesh.is_empty() {
                self.gpu_mesh = Some(renderer.upload_mesh(&self.mesh.vertices, &self.mesh.indices));
            }
            self.needs_upload = false;
        }

        match self.gpu_mesh {
            Some(handle) if !self.mesh.is_empty() => {
                renderer.draw(handle, self.transform());
                true
            }
            _ => false,
        }
    }
}
