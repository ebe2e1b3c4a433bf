//! Rendering system for the voxel engine.
//!
//! This module contains the CPU side of rendering: the vertex format, texture
//! atlas addressing, chunk meshing and the [`Renderer`] trait that a graphics
//! backend implements to receive chunk meshes.

pub mod meshing;
pub mod renderer;
pub mod texture;
mod vertex;

// Re-export commonly used types
pub use renderer::{MeshHandle, RecordingRenderer, Renderer};
pub use vertex::Vertex;
