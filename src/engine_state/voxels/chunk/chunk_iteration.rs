//! # Chunk Iteration Module
//!
//! This module provides an iterator for traversing all non-air blocks in a
//! chunk together with their local positions, in storage order.

use cgmath::Point3;

use crate::engine_state::voxels::{block::Block, coordinates::local_position_from_index};

use super::Chunk;

/// An iterator over all non-air blocks in a chunk.
///
/// Yields `(local_position, block)` pairs, x-fastest.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Index of the next block to inspect
    current_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` for the given chunk.
    ///
    /// # Arguments
    /// * `chunk_ref` - A reference to the chunk to iterate over
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_offset: 0,
        }
    }
}

impl<'a> Iterator for ChunkBlockIterator<'a> {
    type Item = (Point3<i32>, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let blocks = &self.chunk_ref.blocks;
        while self.current_offset < blocks.len() {
            let index = self.current_offset;
            self.current_offset += 1;

            let block = &blocks[index];
            if !block.is_air() {
                return Some((local_position_from_index(index), block));
            }
        }
        None
    }
}
