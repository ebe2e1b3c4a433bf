use cgmath::Point3;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, block_type::BlockFlags, Block},
    chunk::{Chunk, CHUNK_DIMENSION, CHUNK_SIZE},
    coordinates::{is_local_in_bounds, local_index, local_position_of},
};

use super::mesh::{Face, Mesh};

/// The loaded chunks adjacent to a chunk being meshed, indexed by [`BlockSide`].
///
/// A missing neighbor means the chunk is not loaded; faces on that boundary
/// are emitted so the world never shows holes at its streaming edge.
#[derive(Clone, Copy, Default)]
pub struct ChunkNeighbors<'a> {
    chunks: [Option<&'a Chunk>; 6],
}

impl<'a> ChunkNeighbors<'a> {
    /// No loaded neighbors.
    pub fn none() -> Self {
        ChunkNeighbors::default()
    }

    /// Neighbors given in [`BlockSide`] order.
    pub fn new(chunks: [Option<&'a Chunk>; 6]) -> Self {
        ChunkNeighbors { chunks }
    }

    /// Resolves each neighbor of `coordinate` through `lookup`.
    ///
    /// # Arguments
    /// * `coordinate` - Chunk coordinate of the chunk being meshed
    /// * `lookup` - Returns the loaded chunk at a chunk coordinate, if any
    pub fn from_lookup<F>(coordinate: Point3<i32>, mut lookup: F) -> Self
    where
        F: FnMut(Point3<i32>) -> Option<&'a Chunk>,
    {
        ChunkNeighbors {
            chunks: BlockSide::all().map(|side| lookup(coordinate + side.offset())),
        }
    }

    /// The neighbor across `side`, if loaded.
    #[inline]
    pub fn get(&self, side: BlockSide) -> Option<&'a Chunk> {
        self.chunks[side as usize]
    }
}

/// Whether the face of the block at `local` facing `side` should be drawn.
///
/// Faces toward air or transparent blocks are visible. Faces across the chunk
/// boundary consult the neighbor chunk and are always visible when it is not
/// loaded.
fn is_face_visible(blocks: &[Block], neighbors: &ChunkNeighbors, local: Point3<i32>, side: BlockSide) -> bool {
    let neighbor = local + side.offset();

    if is_local_in_bounds(neighbor) {
        return blocks[local_index(neighbor)].is_see_through();
    }

    match neighbors.get(side) {
        Some(chunk) => chunk.get_block(local_position_of(neighbor)).is_see_through(),
        None => true,
    }
}

/// Rebuilds the mesh of one chunk.
///
/// The mesh buffers are cleared and refilled. Every block records the span of
/// vertices and indices it emitted; blocks that emit nothing get an empty span.
///
/// # Arguments
/// * `blocks` - The chunk's blocks; mesh spans are written back into them
/// * `neighbors` - The loaded chunks around it, for boundary faces
/// * `mesh` - Buffers to fill
///
/// # Returns
/// The number of faces emitted.
///
/// # Panics
/// Panics if `blocks` does not hold exactly one chunk of blocks.
pub fn mesh_chunk(blocks: &mut [Block], neighbors: &ChunkNeighbors, mesh: &mut Mesh) -> usize {
    assert_eq!(blocks.len(), CHUNK_SIZE as usize, "meshing needs a full chunk of blocks");

    mesh.clear();
    mesh.reserve_chunk_capacity();

    for x in 0..CHUNK_DIMENSION {
        for y in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                let local = Point3::new(x, y, z);
                let index = local_index(local);
                let block = blocks[index];

                let vertex_offset = mesh.vertex_count() as u32;
                let index_offset = mesh.index_count() as u32;

                if !block.is_air() && block.flags().contains(BlockFlags::MESHED) {
                    for side in BlockSide::all() {
                        if is_face_visible(blocks, neighbors, local, side) {
                            mesh.push_face(&Face::new(local, block.block_type, side));
                        }
                    }
                }

                let block = &mut blocks[index];
                block.mesh_vertex_offset = vertex_offset;
                block.mesh_vertex_count = mesh.vertex_count() as u32 - vertex_offset;
                block.mesh_index_offset = index_offset;
                block.mesh_index_count = mesh.index_count() as u32 - index_offset;
            }
        }
    }

    mesh.face_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    fn air_chunk() -> Vec<Block> {
        vec![Block::AIR; CHUNK_SIZE as usize]
    }

    #[test]
    fn test_single_block_emits_six_faces() {
        let mut blocks = air_chunk();
        let index = local_index(Point3::new(5, 5, 5));
        blocks[index] = Block::new(BlockType::STONE);

        let mut mesh = Mesh::new();
        let faces = mesh_chunk(&mut blocks, &ChunkNeighbors::none(), &mut mesh);

        assert_eq!(faces, 6);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(blocks[index].mesh_vertex_offset, 0);
        assert_eq!(blocks[index].mesh_vertex_count, 24);
        assert_eq!(blocks[index].mesh_index_count, 36);
    }

    #[test]
    fn test_shared_faces_are_culled() {
        let mut blocks = air_chunk();
        blocks[local_index(Point3::new(5, 5, 5))] = Block::new(BlockType::STONE);
        blocks[local_index(Point3::new(6, 5, 5))] = Block::new(BlockType::DIRT);

        let mut mesh = Mesh::new();
        assert_eq!(mesh_chunk(&mut blocks, &ChunkNeighbors::none(), &mut mesh), 10);
    }

    #[test]
    fn test_transparent_neighbor_shows_face() {
        let mut blocks = air_chunk();
        blocks[local_index(Point3::new(5, 5, 5))] = Block::new(BlockType::STONE);
        blocks[local_index(Point3::new(6, 5, 5))] = Block::new(BlockType::GLASS);

        let mut mesh = Mesh::new();
        // Stone keeps the face toward the glass; glass hides its face toward the stone.
        assert_eq!(mesh_chunk(&mut blocks, &ChunkNeighbors::none(), &mut mesh), 11);
    }

    #[test]
    fn test_full_chunk_without_neighbors_shows_shell() {
        let mut blocks = vec![Block::new(BlockType::STONE); CHUNK_SIZE as usize];
        let mut mesh = Mesh::new();
        let faces = mesh_chunk(&mut blocks, &ChunkNeighbors::none(), &mut mesh);

        assert_eq!(faces, 6 * (CHUNK_DIMENSION * CHUNK_DIMENSION) as usize);
        let interior = local_index(Point3::new(8, 8, 8));
        assert_eq!(blocks[interior].mesh_vertex_count, 0);
    }

    #[test]
    fn test_remesh_resets_buffers() {
        let mut blocks = air_chunk();
        blocks[0] = Block::new(BlockType::BRICK);
        let mut mesh = Mesh::new();
        mesh_chunk(&mut blocks, &ChunkNeighbors::none(), &mut mesh);

        blocks[0] = Block::AIR;
        assert_eq!(mesh_chunk(&mut blocks, &ChunkNeighbors::none(), &mut mesh), 0);
        assert!(mesh.is_empty());
        assert_eq!(blocks[0].mesh_vertex_count, 0);
    }
}
