//! # Player Implementation
//!
//! The player is a point at the feet with a camera at eye height. Walking uses
//! simple kinematics with ray-probed collision; flying moves freely.
//!
//! ## Collision
//! Each walking frame probes the planned displacement with short rays along
//! ±x, ±z and +y from two heights on the body (0.5 and 1.8 above the feet).
//! A hit whose normal opposes the displacement removes that normal component
//! from both displacement and velocity. Downward motion is handled by a
//! ground probe and a landing probe instead.

use cgmath::{InnerSpace, Point3, Rad, Vector3, Zero};
use log::{debug, info};
use web_time::Duration;

use crate::core::config::PlayerConfig;
use crate::engine_state::{
    camera_state::Camera,
    physics::{Ray, RayMarcher},
    voxels::{
        block::block_type::BlockFlags,
        coordinates::{block_position_of, chunk_coordinate_of},
        world::World,
    },
    PlayerAction,
};

/// Length of the downward probe that decides whether the player stands.
pub const GROUND_PROBE_DISTANCE: f32 = 0.01;
/// Extra length added to collision probes beyond the frame displacement.
pub const COLLISION_PROBE_MARGIN: f32 = 0.02;
/// Heights above the feet that collision probes start from.
pub const COLLISION_PROBE_HEIGHTS: [f32; 2] = [0.5, 1.8];
/// Displacements shorter than this skip the remaining probes.
const MIN_DISPLACEMENT: f32 = 1e-4;

/// Directions probed for collisions.
fn collision_probe_directions() -> [Vector3<f32>; 5] {
    [
        Vector3::unit_x(),
        -Vector3::unit_x(),
        Vector3::unit_z(),
        -Vector3::unit_z(),
        Vector3::unit_y(),
    ]
}

/// How the player moves.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MovementMode {
    /// Gravity, jumping and collision
    WALKING,
    /// Free flight at normal speed
    FLYING,
    /// Free flight at high speed
    FLYING_NOCLIP,
}

impl MovementMode {
    /// The mode after this one in the cycle.
    pub fn next(self) -> Self {
        match self {
            MovementMode::WALKING => MovementMode::FLYING,
            MovementMode::FLYING => MovementMode::FLYING_NOCLIP,
            MovementMode::FLYING_NOCLIP => MovementMode::WALKING,
        }
    }
}

/// The controllable player.
#[derive(Debug, Clone)]
pub struct Player {
    /// Feet position in world space
    pub position: Point3<f32>,
    /// Velocity in units per second
    pub velocity: Vector3<f32>,
    /// Camera following the eye position
    pub camera: Camera,
    pub movement_mode: MovementMode,
    /// Whether the last walking update found ground below the feet
    pub on_ground: bool,
    /// Chunk streamed around most recently
    current_chunk: Option<Point3<i32>>,
    config: PlayerConfig,
}

impl Player {
    /// Creates a walking player at the configured spawn position.
    pub fn new(config: &PlayerConfig) -> Self {
        let position = Point3::from(config.spawn_position);
        let mut player = Player {
            position,
            velocity: Vector3::zero(),
            camera: Camera::new(position, Rad(0.0), Rad(0.0)),
            movement_mode: MovementMode::WALKING,
            on_ground: false,
            current_chunk: None,
            config: config.clone(),
        };
        player.sync_camera();
        player
    }

    /// World position of the eye.
    pub fn eye_position(&self) -> Point3<f32> {
        self.position + Vector3::new(0.0, self.config.eye_height, 0.0)
    }

    /// Ray from the eye along the view direction.
    pub fn view_ray(&self) -> Ray {
        self.camera.view_ray()
    }

    /// Chunk the player was last streamed around.
    pub fn current_chunk(&self) -> Option<Point3<i32>> {
        self.current_chunk
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Advances the player by one frame.
    ///
    /// # Arguments
    /// * `dt` - Time elapsed since the last frame
    /// * `actions` - Input for this frame
    /// * `world` - World to collide with and stream chunks into
    /// * `marcher` - Ray marcher used for probes
    pub fn update(&mut self, dt: Duration, actions: &PlayerAction, world: &mut World, marcher: &RayMarcher) {
        let dt = dt.as_secs_f32();

        if actions.cycle_movement_mode {
            self.movement_mode = self.movement_mode.next();
            self.velocity = Vector3::zero();
            info!("Movement mode is now {:?}", self.movement_mode);
        }

        self.look(dt, actions);

        match self.movement_mode {
            MovementMode::WALKING => self.walk(dt, actions, world, marcher),
            MovementMode::FLYING => self.fly(dt * self.config.flying_speed, actions),
            MovementMode::FLYING_NOCLIP => self.fly(dt * self.config.noclip_speed, actions),
        }

        self.sync_camera();
        self.stream_chunks(world);
    }

    fn sync_camera(&mut self) {
        self.camera.position = self.eye_position();
    }

    fn look(&mut self, dt: f32, actions: &PlayerAction) {
        if let Some((delta_x, delta_y)) = actions.rotate_view {
            let sensitivity = self.config.look_sensitivity * dt;
            self.camera.rotate(
                Rad(delta_x as f32 * sensitivity),
                Rad(-(delta_y as f32) * sensitivity),
            );
        }
    }

    /// Horizontal wish direction from the movement keys, not normalized.
    fn wish_direction(&self, actions: &PlayerAction) -> Vector3<f32> {
        let forward = self.camera.flat_forward();
        let right = self.camera.flat_right();
        let mut wish = Vector3::zero();

        if actions.move_forward {
            wish += forward;
        }
        if actions.move_backward {
            wish -= forward;
        }
        if actions.move_right {
            wish += right;
        }
        if actions.move_left {
            wish -= right;
        }
        wish
    }

    fn fly(&mut self, speed: f32, actions: &PlayerAction) {
        self.position += self.wish_direction(actions) * speed;

        if actions.move_up {
            self.position.y += speed;
        }
        if actions.move_down {
            self.position.y -= speed;
        }
        self.on_ground = false;
    }

    fn walk(&mut self, dt: f32, actions: &PlayerAction, world: &World, marcher: &RayMarcher) {
        let down = Vector3::new(0.0, -1.0, 0.0);

        self.on_ground = false;
        let mut ground_block = None;
        if self.velocity.y <= 0.0 {
            let probe = Ray::new(self.position, down);
            if let Some(hit) = marcher.cast(world, &probe, GROUND_PROBE_DISTANCE, BlockFlags::SOLID) {
                self.on_ground = true;
                ground_block = Some(hit.block_position);
            }
        }

        let wish = self.wish_direction(actions);
        let any_movement = wish != Vector3::zero();
        self.velocity += wish * (dt * self.config.acceleration);

        match ground_block {
            Some(block) => {
                self.velocity.y = 0.0;
                self.position.y = block.y as f32 + 1.0;

                if actions.move_up {
                    self.velocity.y = self.config.jump_speed;
                }

                if !any_movement {
                    let damping = (1.0 - dt * self.config.friction).max(0.0);
                    self.velocity.x *= damping;
                    self.velocity.z *= damping;
                }
            }
            None => self.velocity.y -= dt * self.config.gravity,
        }

        let horizontal = Vector3::new(self.velocity.x, 0.0, self.velocity.z);
        let horizontal_speed = horizontal.magnitude();
        if horizontal_speed > self.config.max_speed {
            let clamped = horizontal * (self.config.max_speed / horizontal_speed);
            self.velocity.x = clamped.x;
            self.velocity.z = clamped.z;
        }

        if self.velocity.y < -self.config.max_fall_speed {
            self.velocity.y = -self.config.max_fall_speed;
        }

        let mut displacement = self.velocity * dt;
        self.resolve_collisions(&mut displacement, world, marcher);
        self.land(&mut displacement, world, marcher);

        self.position += displacement;
    }

    /// Removes displacement and velocity components that run into blocks.
    fn resolve_collisions(&mut self, displacement: &mut Vector3<f32>, world: &World, marcher: &RayMarcher) {
        let cast_distance = displacement.magnitude() + COLLISION_PROBE_MARGIN;

        for height in COLLISION_PROBE_HEIGHTS {
            let origin = self.position + Vector3::new(0.0, height, 0.0);

            for direction in collision_probe_directions() {
                if displacement.magnitude() < MIN_DISPLACEMENT {
                    return;
                }

                let probe = Ray::new(origin, direction);
                if let Some(hit) = marcher.cast(world, &probe, cast_distance, BlockFlags::SOLID) {
                    let into_wall = displacement.dot(hit.normal);
                    if into_wall < 0.0 {
                        *displacement -= hit.normal * into_wall;
                        let velocity_into_wall = self.velocity.dot(hit.normal);
                        self.velocity -= hit.normal * velocity_into_wall;
                    }
                }
            }
        }
    }

    /// Stops a fall on the first solid block below the feet.
    fn land(&mut self, displacement: &mut Vector3<f32>, world: &World, marcher: &RayMarcher) {
        if displacement.y >= 0.0 {
            return;
        }

        let probe = Ray::new(self.position, Vector3::new(0.0, -1.0, 0.0));
        let reach = -displacement.y + COLLISION_PROBE_MARGIN;
        if let Some(hit) = marcher.cast(world, &probe, reach, BlockFlags::SOLID) {
            let surface = hit.block_position.y as f32 + 1.0;
            if surface <= self.position.y {
                displacement.y = surface - self.position.y;
                self.velocity.y = 0.0;
            }
        }
    }

    /// Loads the chunks around the player when it enters a new chunk.
    fn stream_chunks(&mut self, world: &mut World) {
        world.set_observer_position(self.position);

        let chunk = chunk_coordinate_of(block_position_of(self.position));
        if self.current_chunk == Some(chunk) {
            return;
        }
        self.current_chunk = Some(chunk);

        if self.config.no_chunk_load {
            return;
        }

        let radius = self.config.load_radius;
        let min_y = (chunk.y - 2).min(0);
        let max_y = chunk.y + 2;

        debug!("Streaming chunks around {:?}", chunk);
        for x in -radius..=radius {
            for z in -radius..=radius {
                for y in min_y..=max_y {
                    world.get_or_load_chunk(Point3::new(chunk.x + x, y, chunk.z + z));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_mode_cycle() {
        let mode = MovementMode::WALKING;
        assert_eq!(mode.next(), MovementMode::FLYING);
        assert_eq!(mode.next().next(), MovementMode::FLYING_NOCLIP);
        assert_eq!(mode.next().next().next(), MovementMode::WALKING);
    }

    #[test]
    fn test_new_player_at_spawn() {
        let config = PlayerConfig::default();
        let player = Player::new(&config);
        assert_eq!(player.position, Point3::new(48.0, 40.0, 48.0));
        assert_eq!(player.camera.position.y, 40.0 + config.eye_height);
        assert_eq!(player.current_chunk(), None);
    }
}
