//! # Core Module
//!
//! Ambient building blocks shared by every engine subsystem.
//!
//! ## Key Components
//! - `config`: Serde-backed engine configuration with reference defaults
//! - `error`: The engine error type and result alias

pub mod config;
pub mod error;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
