//! # Chunk Snapshots
//!
//! Serializable copies of a chunk's block types. A snapshot carries no mesh
//! data; restoring one rebuilds meshes through the remesh queue.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult};

use super::{
    block::{block_type::BlockType, BlockTypeSize},
    chunk::{Chunk, CHUNK_SIZE},
};

/// Block types of one chunk, in storage order (`x + y * 16 + z * 256`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSnapshot {
    /// Chunk coordinate the blocks belong to
    pub coordinate: [i32; 3],
    /// One block id per block
    pub blocks: Vec<BlockTypeSize>,
}

impl ChunkSnapshot {
    /// Captures the block types of a chunk.
    pub fn capture(chunk: &Chunk) -> Self {
        ChunkSnapshot {
            coordinate: chunk.position.into(),
            blocks: chunk.blocks.iter().map(|block| block.block_type).collect(),
        }
    }

    /// Chunk coordinate as a point.
    pub fn chunk_coordinate(&self) -> Point3<i32> {
        Point3::from(self.coordinate)
    }

    /// Checks the block count and that every id is in the registry.
    pub fn validate(&self) -> EngineResult<()> {
        if self.blocks.len() != CHUNK_SIZE as usize {
            return Err(EngineError::SnapshotSize {
                coordinate: self.coordinate,
                expected: CHUNK_SIZE as usize,
                actual: self.blocks.len(),
            });
        }

        if let Some(&block_id) = self
            .blocks
            .iter()
            .find(|&&id| BlockType::from_id(id).is_none())
        {
            return Err(EngineError::UnknownBlock {
                coordinate: self.coordinate,
                block_id,
            });
        }

        Ok(())
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_and_validate() {
        let mut chunk = Chunk::empty(Point3::new(-1, 0, 2));
        chunk.set_block(Point3::new(0, 0, 0), BlockType::GLASS);

        let snapshot = ChunkSnapshot::capture(&chunk);
        assert_eq!(snapshot.coordinate, [-1, 0, 2]);
        assert_eq!(snapshot.blocks[0], BlockType::GLASS.id());
        assert!(snapshot.validate().is_ok());

        let parsed = ChunkSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_validate_rejects_bad_payloads() {
        let short = ChunkSnapshot {
            coordinate: [0, 0, 0],
            blocks: vec![0; 10],
        };
        assert!(matches!(
            short.validate(),
            Err(EngineError::SnapshotSize { actual: 10, .. })
        ));

        let mut unknown = ChunkSnapshot {
            coordinate: [0, 0, 0],
            blocks: vec![0; CHUNK_SIZE as usize],
        };
        unknown.blocks[7] = 200;
        assert!(matches!(
            unknown.validate(),
            Err(EngineError::UnknownBlock { block_id: 200, .. })
        ));
    }
}
