//! # Camera State Management
//!
//! This module handles camera positioning and orientation. The camera is
//! owned by the player and follows the player's eye position each frame.
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space

pub mod camera;

pub use camera::Camera;
