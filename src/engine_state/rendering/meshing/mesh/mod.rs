//! Mesh generation primitives for voxel rendering.
//!
//! This module provides the data structures the mesher writes into:
//!
//! # Architecture
//! - [`Mesh`]: The vertex and index buffers of one chunk
//! - [`Face`]: A single block face with its corners, normal and atlas UVs
//!
//! # Usage
//! ```no_run
//! use blockworld::engine_state::{
//!     rendering::meshing::mesh::{Face, Mesh},
//!     voxels::block::{block_side::BlockSide, block_type::BlockType},
//! };
//! use cgmath::Point3;
//!
//! let mut mesh = Mesh::with_chunk_capacity();
//! mesh.push_face(&Face::new(Point3::new(0, 0, 0), BlockType::STONE.id(), BlockSide::TOP));
//! ```

mod face;
mod mesh;

pub use face::Face;
pub use mesh::*;
