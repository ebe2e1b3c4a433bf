//! Renderer seam for the voxel engine.
//!
//! The world never talks to a graphics API directly. Chunk meshes are handed
//! to a [`Renderer`], which owns the device-side buffers and returns opaque
//! [`MeshHandle`]s for them.
//!
//! # Architecture
//!
//! A renderer is responsible for:
//! 1. Uploading host mesh buffers and returning a handle
//! 2. Drawing a handle with a world transform
//! 3. Freeing handles of unloaded or rebuilt meshes
//!
//! [`RecordingRenderer`] implements the trait without a GPU and keeps
//! statistics, which the headless binary and the tests rely on.

use std::collections::HashMap;

use cgmath::Matrix4;
use log::trace;

use super::Vertex;

/// Opaque identifier of a mesh owned by a renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// A backend that can hold and draw chunk meshes.
pub trait Renderer {
    /// Uploads a triangle-list mesh and returns its handle.
    fn upload_mesh(&mut self, vertices: &[Vertex], indices: &[u32]) -> MeshHandle;

    /// Draws a previously uploaded mesh with a model transform.
    fn draw(&mut self, handle: MeshHandle, transform: Matrix4<f32>);

    /// Releases a previously uploaded mesh.
    fn free_mesh(&mut self, handle: MeshHandle);

    /// Sets the camera view matrix for the draws that follow.
    fn set_view(&mut self, _view: Matrix4<f32>) {}
}

/// Sizes of a mesh held by a [`RecordingRenderer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RecordedMesh {
    pub vertex_count: usize,
    pub index_count: usize,
}

/// A renderer that records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_handle: u32,
    meshes: HashMap<MeshHandle, RecordedMesh>,
    /// Draw calls issued since the last [`RecordingRenderer::begin_frame`]
    pub draws: Vec<(MeshHandle, Matrix4<f32>)>,
    /// Total uploads over the renderer's lifetime
    pub uploads: usize,
    /// Total frees over the renderer's lifetime
    pub frees: usize,
    /// Last view matrix set
    pub view: Option<Matrix4<f32>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        RecordingRenderer::default()
    }

    /// Forgets the draw calls of the previous frame.
    pub fn begin_frame(&mut self) {
        self.draws.clear();
    }

    /// Number of meshes currently held.
    pub fn live_mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Triangles drawn since the last [`RecordingRenderer::begin_frame`].
    pub fn triangles_drawn(&self) -> usize {
        self.draws
            .iter()
            .filter_map(|(handle, _)| self.meshes.get(handle))
            .map(|mesh| mesh.index_count / 3)
            .sum()
    }
}

impl Renderer for RecordingRenderer {
    fn upload_mesh(&mut self, vertices: &[Vertex], indices: &[u32]) -> MeshHandle {
        let handle = MeshHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.uploads += 1;
        self.meshes.insert(
            handle,
            RecordedMesh {
                vertex_count: vertices.len(),
                index_count: indices.len(),
            },
        );
        trace!("Uploaded mesh {:?} with {} vertices", handle, vertices.len());
        handle
    }

    fn draw(&mut self, handle: MeshHandle, transform: Matrix4<f32>) {
        self.draws.push((handle, transform));
    }

    fn free_mesh(&mut self, handle: MeshHandle) {
        if self.meshes.remove(&handle).is_some() {
            self.frees += 1;
        }
    }

    fn set_view(&mut self, view: Matrix4<f32>) {
        self.view = Some(view);
    }
}
