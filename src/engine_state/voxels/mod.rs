//! # Voxel Engine Core
//!
//! This module contains the core voxel engine functionality, providing the foundation
//! for representing, manipulating, and meshing a voxel-based world.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Defines block types, their registry flags and block faces
//! * **Chunk**: Manages fixed-size 3D arrays of blocks and their meshes
//! * **Coordinates**: Conversions between world, chunk and local positions
//! * **Terrain**: Deterministic noise-based chunk generation
//! * **World**: Pools loaded chunks and provides a unified interface for the entire voxel space
//! * **Snapshot**: Serializable copies of chunk block data
//!
//! ## Data Flow
//!
//! 1. World receives requests for block access or modification
//! 2. World delegates to appropriate chunk (loading if necessary)
//! 3. Changes enqueue remeshes of the chunk and its touched neighbors
//! 4. The queue is flushed once per frame and rebuilt meshes reach the renderer on draw

pub mod block;
pub mod chunk;
pub mod coordinates;
pub mod snapshot;
pub mod terrain;
pub mod world;
