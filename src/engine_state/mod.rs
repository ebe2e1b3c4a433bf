//! # Engine State Module
//!
//! The core engine module that manages the state and functionality of the voxel engine.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Camera position and orientation
//! * `physics` - Ray queries used for picking and collision
//! * `player_state` - Player movement, collision and chunk streaming
//! * `rendering` - Meshing and the renderer seam
//! * `voxels` - Blocks, chunks, terrain and the chunk pool
//!
//! ## Architecture
//!
//! The `EngineState` struct serves as the central coordinator. One call to
//! [`EngineState::update`] runs a whole simulation frame:
//!
//! 1. Player look, movement and collision
//! 2. Chunk streaming around the player
//! 3. Block picking under the crosshair
//! 4. Break and place edits
//! 5. Remesh queue flush
//!
//! [`EngineState::render`] then hands every loaded chunk to a [`Renderer`].

use log::info;
use web_time::Duration;

use crate::core::{EngineConfig, EngineResult};

use physics::{RayHit, RayMarcher};
use player_state::Player;
use rendering::Renderer;
use voxels::{
    block::block_type::{BlockFlags, BlockType},
    world::World,
};

pub mod camera_state;
pub mod physics;
pub mod player_state;
pub mod rendering;
pub mod voxels;

/// Statistics of one simulation frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Chunks rebuilt by the end-of-frame remesh flush
    pub remeshed_chunks: usize,
    /// Chunks loaded after the frame
    pub loaded_chunks: usize,
    /// Whether a break or place edit changed the world
    pub edited: bool,
}

/// The main state container for the voxel engine
///
/// This struct owns the world, the player and the ray marcher, and drives
/// them one frame at a time.
///
/// # Examples
///
/// ```
/// use blockworld::core::EngineConfig;
/// use blockworld::engine_state::{EngineState, PlayerAction};
/// use blockworld::engine_state::rendering::RecordingRenderer;
/// use web_time::Duration;
///
/// let mut engine_state = EngineState::new(EngineConfig::default()).unwrap();
/// let mut renderer = RecordingRenderer::new();
///
/// // Main game loop
/// for _ in 0..3 {
///     engine_state.update(Duration::from_millis(16), &PlayerAction::default());
///     engine_state.render(&mut renderer);
/// }
/// ```
pub struct EngineState {
    config: EngineConfig,
    /// The voxel world containing all loaded chunks
    pub world: World,
    /// The controllable player
    pub player: Player,
    /// Ray marcher shared by picking and collision
    pub ray_marcher: RayMarcher,
    /// Block under the crosshair after the last update
    pub selected_block: Option<RayHit>,
    /// Block type placed by place requests
    pub placement_block: BlockType,
}

impl EngineState {
    /// Creates a new engine state from a validated configuration.
    ///
    /// # Errors
    /// Returns [`crate::core::EngineError::InvalidConfig`] if the configuration
    /// fails validation.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;

        let world = World::new(&config.world);
        let player = Player::new(&config.player);
        let ray_marcher = RayMarcher::new(config.ray.step);

        info!(
            "Engine state ready, player at {:?} in {:?} mode",
            player.position, player.movement_mode
        );

        Ok(EngineState {
            config,
            world,
            player,
            ray_marcher,
            selected_block: None,
            placement_block: BlockType::BRICK,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one simulation frame.
    ///
    /// # Arguments
    ///
    /// * `dt` - The time elapsed since the last frame
    /// * `actions` - Player input for this frame
    pub fn update(&mut self, dt: Duration, actions: &PlayerAction) -> FrameStats {
        self.player
            .update(dt, actions, &mut self.world, &self.ray_marcher);

        self.selected_block = self.ray_marcher.cast(
            &self.world,
            &self.player.view_ray(),
            self.config.player.reach,
            BlockFlags::SOLID,
        );

        let mut edited = false;
        if let Some(hit) = self.selected_block {
            if actions.break_block {
                edited = self.break_block(&hit);
            } else if actions.place_block {
                self.place_block(&hit);
                edited = true;
            }
        }

        FrameStats {
            remeshed_chunks: self.world.process_remesh_queue(),
            loaded_chunks: self.world.loaded_chunk_count(),
            edited,
        }
    }

    fn break_block(&mut self, hit: &RayHit) -> bool {
        let destructible = self
            .world
            .get_block_at(hit.block_position)
            .is_some_and(|block| block.flags().contains(BlockFlags::DESTRUCTIBLE));
        if !destructible {
            return false;
        }

        let broken = self.world.try_set_block_at(hit.block_position, BlockType::AIR);
        if broken {
            info!("Broke block at {:?}", hit.block_position);
        }
        broken
    }

    fn place_block(&mut self, hit: &RayHit) {
        let target = hit.adjacent_position();
        self.world.set_block_at(target, self.placement_block);
        info!("Placed {:?} at {:?}", self.placement_block, target);
    }

    /// Draws the world from the player's camera.
    ///
    /// # Returns
    /// The number of chunk draw calls issued.
    pub fn render<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        renderer.set_view(self.player.camera.view_matrix());
        self.world.draw(renderer)
    }
}

/// Represents player actions derived from input
///
/// This struct contains flags for the actions a frame of input can request,
/// such as movement, camera control and block edits.
#[derive(Clone, Debug, Default)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Jump while walking, ascend while flying
    pub move_up: bool,
    /// Descend while flying
    pub move_down: bool,

    /// View rotation - mouse delta in pixels, if the mouse moved
    pub rotate_view: Option<(f64, f64)>,

    /// Break the selected block
    pub break_block: bool,
    /// Place a block against the selected face
    pub place_block: bool,
    /// Switch to the next movement mode
    pub cycle_movement_mode: bool,
}
