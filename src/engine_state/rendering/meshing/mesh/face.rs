use cgmath::{Point3, Vector3};

use crate::engine_state::{
    rendering::{texture::AtlasSlot, vertex::Vertex},
    voxels::block::{block_side::BlockSide, BlockTypeSize},
};

/// Corner offsets from a block's minimum corner, per side, in winding order.
const FACE_CORNERS: [[[i32; 3]; 4]; 6] = [
    // LEFT
    [[0, 0, 1], [0, 1, 1], [0, 1, 0], [0, 0, 0]],
    // RIGHT
    [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]],
    // BOTTOM
    [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
    // TOP
    [[0, 1, 0], [0, 1, 1], [1, 1, 1], [1, 1, 0]],
    // FRONT
    [[0, 0, 0], [0, 1, 0], [1, 1, 0], [1, 0, 0]],
    // BACK
    [[1, 0, 1], [1, 1, 1], [0, 1, 1], [0, 0, 1]],
];

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is defined by four corner points, corner 0 first, in a consistent
/// winding, and carries the block type and the side of the block it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Corners of the face in chunk-local coordinates
    pub corners: [Point3<i32>; 4],
    /// The block type as an integer, used for texture mapping
    pub block_type: BlockTypeSize,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a new face for a voxel at the given local position.
    ///
    /// # Arguments
    /// * `position` - The position of the voxel in chunk space
    /// * `block_type` - The type of the block, used for texture mapping
    /// * `block_side` - Which side of the block this face represents
    ///
    /// # Returns
    /// A new `Face` whose corners lie on the requested side of the unit cube at
    /// `position`.
    pub fn new(position: Point3<i32>, block_type: BlockTypeSize, block_side: BlockSide) -> Self {
        let corners = FACE_CORNERS[block_side as usize]
            .map(|[x, y, z]| Point3::new(position.x + x, position.y + y, position.z + z));

        Face {
            corners,
            block_type,
            block_side,
        }
    }

    /// The four vertices of this face, with normal and atlas UVs filled in.
    pub fn vertices(&self) -> [Vertex; 4] {
        let normal: Vector3<f32> = self.block_side.normal();
        let (slot, alternate) = AtlasSlot::for_face(self.block_type, self.block_side);

        let mut corner = 0;
        self.corners.map(|p| {
            let vertex = Vertex::new(
                Point3::new(p.x as f32, p.y as f32, p.z as f32),
                normal,
                slot.corner_uv(corner, alternate),
            );
            corner += 1;
            vertex
        })
    }

    /// Index pattern of one quad, relative to its first vertex.
    pub fn indices(first_vertex: u32) -> [u32; 6] {
        [
            first_vertex,
            first_vertex + 1,
            first_vertex + 2,
            first_vertex + 2,
            first_vertex + 3,
            first_vertex,
        ]
    }
}
