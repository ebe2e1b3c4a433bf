//! Mesh generation for voxel rendering.
//!
//! This module converts chunk block data into triangle meshes with per-face
//! visibility culling: a face is emitted only when the block across it is air
//! or transparent, or when that block lives in a chunk that is not loaded.
//!
//! # Architecture
//! - [`mesh_chunk`]: Rebuilds one chunk's mesh and records per-block spans
//! - [`ChunkNeighbors`]: The six loaded chunks consulted at chunk boundaries
//! - `mesh/`: Mesh buffers and single-face geometry
//!
//! # Performance Considerations
//! - Mesh buffers are allocated once at worst-case size and cleared per rebuild
//! - Air and unmeshed blocks are rejected before any neighbor lookup

pub mod mesh;
mod mesher;

pub use mesh::{Face, Mesh};
pub use mesher::{mesh_chunk, ChunkNeighbors};
