//! # Physics
//!
//! Ray queries against the voxel world, used for block picking and player
//! collision.

pub mod ray;

pub use ray::{Ray, RayHit, RayMarcher};
