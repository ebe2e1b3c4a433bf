//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, the flag registry, block faces and the
//! per-block instance stored in chunks.

use block_type::{BlockFlags, BlockType};

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage and serialization of block data.
pub type BlockTypeSize = u8;

/// Represents a single voxel block in a chunk.
///
/// Besides its type, a block remembers which range of its chunk's mesh
/// buffers it wrote during the last mesh rebuild. The span fields are only
/// meaningful until the next edit in the same chunk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
    /// First vertex this block emitted in the last mesh rebuild
    pub mesh_vertex_offset: u32,
    /// Number of vertices emitted in the last mesh rebuild
    pub mesh_vertex_count: u32,
    /// First index this block emitted in the last mesh rebuild
    pub mesh_index_offset: u32,
    /// Number of indices emitted in the last mesh rebuild
    pub mesh_index_count: u32,
}

impl Block {
    /// An air block with an empty mesh span.
    pub const AIR: Block = Block {
        block_type: 0,
        mesh_vertex_offset: 0,
        mesh_vertex_count: 0,
        mesh_index_offset: 0,
        mesh_index_count: 0,
    };

    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
            ..Block::AIR
        }
    }

    /// Returns the registry flags of this block's type.
    #[inline]
    pub fn flags(&self) -> BlockFlags {
        block_type::flags_of(self.block_type)
    }

    /// Whether this block is air.
    #[inline]
    pub fn is_air(&self) -> bool {
        self.block_type == BlockType::AIR as BlockTypeSize
    }

    /// Whether faces of adjacent blocks are visible through this block.
    #[inline]
    pub fn is_see_through(&self) -> bool {
        self.is_air() || self.flags().contains(BlockFlags::TRANSPARENT)
    }
}
