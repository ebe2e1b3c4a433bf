//! Vertex data structures for chunk meshes.
//!
//! This module defines the vertex format produced by the mesher and consumed
//! by whatever renderer uploads chunk meshes.

use cgmath::{Point3, Vector3};

/// A vertex in a chunk mesh.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes), chunk-local
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes), atlas space
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the chunk origin
    pub position: [f32; 3],
    /// Face normal
    pub normal: [f32; 3],
    /// UV coordinates into the texture atlas (normalized 0.0-1.0)
    pub uv: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, uv: [f32; 2]) -> Self {
        Vertex {
            position: position.into(),
            normal: normal.into(),
            uv,
        }
    }
}
