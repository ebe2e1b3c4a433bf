//! # Coordinate Conversion
//!
//! The world uses three integer coordinate spaces:
//!
//! * **World** block positions, unbounded in every direction
//! * **Chunk** coordinates, one unit per chunk
//! * **Local** positions inside a chunk, always in `0..CHUNK_DIMENSION`
//!
//! Conversions floor toward negative infinity, so `(-1, 0, 0)` lives in chunk
//! `(-1, 0, 0)` at local `(15, 0, 0)` rather than in chunk `(0, 0, 0)`.

use cgmath::{Point3, Vector3};

use super::chunk::{CHUNK_DIMENSION, CHUNK_PLANE_SIZE};

/// Chunk coordinate containing the world block position.
#[inline]
pub fn chunk_coordinate_of(world_position: Point3<i32>) -> Point3<i32> {
    Point3::new(
        world_position.x.div_euclid(CHUNK_DIMENSION),
        world_position.y.div_euclid(CHUNK_DIMENSION),
        world_position.z.div_euclid(CHUNK_DIMENSION),
    )
}

/// Position of the world block inside its chunk.
#[inline]
pub fn local_position_of(world_position: Point3<i32>) -> Point3<i32> {
    Point3::new(
        world_position.x.rem_euclid(CHUNK_DIMENSION),
        world_position.y.rem_euclid(CHUNK_DIMENSION),
        world_position.z.rem_euclid(CHUNK_DIMENSION),
    )
}

/// Splits a world block position into `(chunk coordinate, local position)`.
#[inline]
pub fn split_world_position(world_position: Point3<i32>) -> (Point3<i32>, Point3<i32>) {
    (
        chunk_coordinate_of(world_position),
        local_position_of(world_position),
    )
}

/// Integer block position containing a continuous point.
#[inline]
pub fn block_position_of(point: Point3<f32>) -> Point3<i32> {
    Point3::new(
        point.x.floor() as i32,
        point.y.floor() as i32,
        point.z.floor() as i32,
    )
}

/// World block position of a chunk's local origin.
#[inline]
pub fn chunk_origin(chunk_coordinate: Point3<i32>) -> Point3<i32> {
    Point3::new(
        chunk_coordinate.x * CHUNK_DIMENSION,
        chunk_coordinate.y * CHUNK_DIMENSION,
        chunk_coordinate.z * CHUNK_DIMENSION,
    )
}

/// World space translation applied when drawing a chunk.
#[inline]
pub fn chunk_translation(chunk_coordinate: Point3<i32>) -> Vector3<f32> {
    let origin = chunk_origin(chunk_coordinate);
    Vector3::new(origin.x as f32, origin.y as f32, origin.z as f32)
}

/// Recombines a chunk coordinate and a local position.
#[inline]
pub fn world_position_of(chunk_coordinate: Point3<i32>, local_position: Point3<i32>) -> Point3<i32> {
    let origin = chunk_origin(chunk_coordinate);
    Point3::new(
        origin.x + local_position.x,
        origin.y + local_position.y,
        origin.z + local_position.z,
    )
}

/// Whether a local position lies inside a chunk.
#[inline]
pub fn is_local_in_bounds(local_position: Point3<i32>) -> bool {
    (0..CHUNK_DIMENSION).contains(&local_position.x)
        && (0..CHUNK_DIMENSION).contains(&local_position.y)
        && (0..CHUNK_DIMENSION).contains(&local_position.z)
}

/// Index of a local position in a chunk's block array.
///
/// The layout is x-fastest: `x + y * 16 + z * 256`.
#[inline]
pub fn local_index(local_position: Point3<i32>) -> usize {
    (local_position.x + local_position.y * CHUNK_DIMENSION + local_position.z * CHUNK_PLANE_SIZE)
        as usize
}

/// Inverse of [`local_index`].
#[inline]
pub fn local_position_from_index(index: usize) -> Point3<i32> {
    let index = index as i32;
    Point3::new(
        index % CHUNK_DIMENSION,
        (index / CHUNK_DIMENSION) % CHUNK_DIMENSION,
        index / CHUNK_PLANE_SIZE,
    )
}

/// Faces of the chunk that a local position touches, as neighbor chunk offsets.
///
/// A block in a chunk corner touches three faces; an interior block touches none.
pub fn touched_chunk_faces(local_position: Point3<i32>) -> impl Iterator<Item = Vector3<i32>> {
    let edge = CHUNK_DIMENSION - 1;
    let axis_offset = |value: i32| match value {
        0 => Some(-1),
        v if v == edge => Some(1),
        _ => None,
    };

    [
        axis_offset(local_position.x).map(|d| Vector3::new(d, 0, 0)),
        axis_offset(local_position.y).map(|d| Vector3::new(0, d, 0)),
        axis_offset(local_position.z).map(|d| Vector3::new(0, 0, d)),
    ]
    .into_iter()
    .flatten()
}
