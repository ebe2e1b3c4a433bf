//! # Engine Configuration
//!
//! Tunables for the world pool, terrain, ray marching and the player
//! controller. Every field has a default matching the reference sizing, so a
//! configuration file only needs to list the values it overrides.
//!
//! ```no_run
//! use blockworld::core::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "world": { "seed": 42 } }"#).unwrap();
//! assert_eq!(config.world.seed, 42);
//! assert_eq!(config.world.max_loaded_chunks, 256);
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};

/// Default number of chunk slots in the world pool (8 x 4 x 8 chunks).
pub const DEFAULT_MAX_LOADED_CHUNKS: usize = 256;

/// Top level configuration for an [`EngineState`](crate::engine_state::EngineState).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chunk pool and terrain settings
    pub world: WorldConfig,
    /// Player movement, reach and streaming settings
    pub player: PlayerConfig,
    /// Ray marcher settings shared by picking and collision
    pub ray: RayConfig,
}

/// Settings for the chunk pool and the terrain generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of chunk slots. Loading past this evicts the farthest chunk.
    pub max_loaded_chunks: usize,
    /// Seed for the terrain noise.
    pub seed: u32,
    /// Upper bound on pending remesh requests before a forced flush.
    pub remesh_queue_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_loaded_chunks: DEFAULT_MAX_LOADED_CHUNKS,
            seed: 0,
            remesh_queue_capacity: DEFAULT_MAX_LOADED_CHUNKS * 8,
        }
    }
}

/// Player controller constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn_position: [f32; 3],
    pub eye_height: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub jump_speed: f32,
    pub max_fall_speed: f32,
    pub gravity: f32,
    pub friction: f32,
    pub flying_speed: f32,
    pub noclip_speed: f32,
    pub look_sensitivity: f32,
    /// Maximum distance for block picking.
    pub reach: f32,
    /// Horizontal chunk radius streamed around the player.
    pub load_radius: i32,
    /// Disables chunk streaming around the player.
    pub no_chunk_load: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn_position: [48.0, 40.0, 48.0],
            eye_height: 1.62,
            max_speed: 5.0,
            acceleration: 32.0,
            jump_speed: 6.0,
            max_fall_speed: 50.0,
            gravity: 20.0,
            friction: 10.0,
            flying_speed: 10.0,
            noclip_speed: 40.0,
            look_sensitivity: 0.2,
            reach: 8.0,
            load_radius: 2,
            no_chunk_load: false,
        }
    }
}

/// Ray marcher settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayConfig {
    /// Distance advanced per ray march step, in blocks.
    pub step: f32,
}

impl Default for RayConfig {
    fn default() -> Self {
        Self { step: 0.05 }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON and validates it.
    ///
    /// # Errors
    /// Returns [`EngineError::ConfigParse`] for malformed JSON and
    /// [`EngineError::InvalidConfig`] for out-of-range values.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        log::info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Checks the values the engine cannot run with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.world.max_loaded_chunks == 0 {
            return Err(EngineError::InvalidConfig(
                "world.max_loaded_chunks must be at least 1".to_string(),
            ));
        }
        if self.world.remesh_queue_capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "world.remesh_queue_capacity must be at least 1".to_string(),
            ));
        }
        if !(self.ray.step > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "ray.step must be positive, got {}",
                self.ray.step
            )));
        }
        if !(self.player.reach > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "player.reach must be positive, got {}",
                self.player.reach
            )));
        }
        if self.player.load_radius < 0 {
            return Err(EngineError::InvalidConfig(format!(
                "player.load_radius must not be negative, got {}",
                self.player.load_radius
            )));
        }
        Ok(())
    }
}
