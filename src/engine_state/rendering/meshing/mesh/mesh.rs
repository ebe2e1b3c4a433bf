//! Mesh data structures for voxel rendering.
//!
//! A [`Mesh`] holds the host-side vertex and index buffers of one chunk. The
//! buffers are sized once for the worst case (every block showing every face)
//! and reused by every rebuild, so remeshing never reallocates.

use crate::engine_state::{rendering::Vertex, voxels::chunk::CHUNK_SIZE};

use super::face::Face;

/// Vertices of a chunk where every block shows all six faces.
pub const MAX_CHUNK_VERTICES: usize = CHUNK_SIZE as usize * 6 * 4;
/// Indices of a chunk where every block shows all six faces.
pub const MAX_CHUNK_INDICES: usize = CHUNK_SIZE as usize * 6 * 6;

/// Host-side geometry of a chunk.
#[derive(Debug, Default)]
pub struct Mesh {
    /// Vertex data, chunk-local positions
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates a mesh with no buffers allocated.
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Creates a mesh whose buffers hold a worst-case chunk.
    pub fn with_chunk_capacity() -> Self {
        let mut mesh = Mesh::new();
        mesh.reserve_chunk_capacity();
        mesh
    }

    /// Grows the buffers to worst-case chunk capacity if they are smaller.
    pub fn reserve_chunk_capacity(&mut self) {
        if self.vertices.capacity() < MAX_CHUNK_VERTICES {
            self.vertices
                .reserve_exact(MAX_CHUNK_VERTICES - self.vertices.len());
        }
        if self.indices.capacity() < MAX_CHUNK_INDICES {
            self.indices.reserve_exact(MAX_CHUNK_INDICES - self.indices.len());
        }
    }

    /// Whether worst-case buffers are currently allocated.
    pub fn has_chunk_capacity(&self) -> bool {
        self.vertices.capacity() >= MAX_CHUNK_VERTICES && self.indices.capacity() >= MAX_CHUNK_INDICES
    }

    /// Empties the buffers, keeping their allocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Frees the buffers.
    pub fn release(&mut self) {
        self.vertices = Vec::new();
        self.indices = Vec::new();
    }

    /// Number of vertices written.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices written.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of quads written.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Appends one quad: four vertices and six indices.
    pub fn push_face(&mut self, face: &Face) {
        debug_assert!(
            self.vertices.len() + 4 <= MAX_CHUNK_VERTICES,
            "chunk mesh exceeded its worst-case vertex count"
        );

        let first_vertex = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.vertices());
        self.indices.extend_from_slice(&Face::indices(first_vertex));
    }
}
