//! # Player State
//!
//! The player controller: movement modes, walking physics with ray-probed
//! collision, mouse look and chunk streaming around the player.
//!
//! ## Core Components
//! - `Player`: Position, velocity and camera of the controllable player
//! - `MovementMode`: Walking or one of the two flying modes

pub mod player;

pub use player::{MovementMode, Player};
