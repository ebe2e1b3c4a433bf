#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Block World
//!
//! A streaming voxel world engine: a bounded pool of 16³ chunks generated
//! from seeded Perlin noise, culled-face chunk meshing with a deferred remesh
//! queue, fixed-step ray queries and a walking/flying player controller.
//!
//! ## Key Modules
//!
//! * `core` - Configuration and error types used throughout the engine
//! * `engine_state` - The main engine components including voxels, meshing, physics and the player
//!
//! ## Architecture
//!
//! The engine follows a modular architecture with clear separation between:
//! * Voxel data management (blocks, chunks, terrain, the chunk pool)
//! * Meshing, which turns chunk blocks into vertex and index buffers
//! * A renderer seam, so any graphics backend can consume chunk meshes
//! * Simulation (player movement, collision, picking)
//!
//! ## Usage
//!
//! ```no_run
//! // Headless session with default settings
//! fn main() {
//!     blockworld::run(None).unwrap();
//! }
//! ```
//!
//! ## Performance Considerations
//!
//! * Chunk slots and mesh buffers are allocated once and reused
//! * Remeshing is deferred and deduplicated per frame
//! * Face culling keeps meshes to the visible shell of the terrain

use std::path::Path;

use log::info;
use web_time::{Duration, Instant};

use crate::core::{EngineConfig, EngineResult};
use crate::engine_state::{rendering::RecordingRenderer, EngineState, FrameStats, PlayerAction};

pub mod core;
pub mod engine_state;

/// Frames simulated by [`run`].
pub const SESSION_FRAMES: u32 = 360;

/// Scripted input for frame `frame` of the headless session.
fn scripted_actions(frame: u32) -> PlayerAction {
    let mut actions = PlayerAction::default();
    match frame {
        120..=239 => actions.move_forward = true,
        240 => actions.move_up = true,
        260 => actions.rotate_view = Some((0.0, 400.0)),
        270 => actions.break_block = true,
        280 => actions.place_block = true,
        300 => actions.cycle_movement_mode = true,
        301..=359 => actions.move_up = true,
        _ => {}
    }
    actions
}

/// Runs a headless session: a scripted player walks, edits and flies while a
/// recording renderer stands in for the GPU.
///
/// # Arguments
/// * `config_path` - JSON configuration file; defaults are used when `None`
pub fn run(config_path: Option<&Path>) -> EngineResult<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let mut engine_state = EngineState::new(config)?;
    let mut renderer = RecordingRenderer::new();
    let dt = Duration::from_secs_f64(1.0 / 60.0);

    let started = Instant::now();
    let mut totals = FrameStats::default();
    for frame in 0..SESSION_FRAMES {
        let stats = engine_state.update(dt, &scripted_actions(frame));
        totals.remeshed_chunks += stats.remeshed_chunks;
        totals.edited |= stats.edited;

        renderer.begin_frame();
        let drawn = engine_state.render(&mut renderer);

        if frame % 60 == 0 {
            info!(
                "Frame {}: player at {:?}, {} chunks loaded, {} drawn, {} triangles",
                frame,
                engine_state.player.position,
                stats.loaded_chunks,
                drawn,
                renderer.triangles_drawn()
            );
        }
    }

    info!(
        "Simulated {} frames in {:?}: {} remeshes, {} uploads, {} frees, edits made: {}",
        SESSION_FRAMES,
        started.elapsed(),
        totals.remeshed_chunks,
        renderer.uploads,
        renderer.frees,
        totals.edited
    );

    Ok(())
}
