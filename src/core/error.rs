//! Error types for the block world engine

use thiserror::Error;

/// Main error type for the engine.
///
/// Only operations that touch the outside world (configuration files,
/// restored chunk payloads) can fail. Contract violations inside the voxel
/// core are panics, and missing chunks are reported as `None`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Chunk snapshot at {coordinate:?} has {actual} blocks, expected {expected}")]
    SnapshotSize {
        coordinate: [i32; 3],
        expected: usize,
        actual: usize,
    },

    #[error("Chunk snapshot at {coordinate:?} contains unknown block id {block_id}")]
    UnknownBlock { coordinate: [i32; 3], block_id: u8 },
}

/// Convenience alias used by every fallible engine operation.
pub type EngineResult<T> = Result<T, EngineError>;
