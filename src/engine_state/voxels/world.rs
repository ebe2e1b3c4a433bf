//! # World Module
//!
//! This module provides the `World` struct which manages the pool of loaded
//! chunks. It serves as the central coordinator for chunk loading, eviction,
//! block access and deferred remeshing.
//!
//! ## Architecture
//!
//! Chunks live in a fixed pool of `max_loaded_chunks` slots allocated once.
//! A bitmap marks which slots hold a loaded chunk. When the pool is full,
//! loading a new chunk evicts the loaded chunk whose origin is farthest from
//! the observer position.
//!
//! ## Remeshing
//!
//! Block edits do not rebuild meshes directly. They enqueue the edited chunk
//! and every loaded neighbor whose boundary faces may have changed. The queue
//! is flushed once per frame by [`World::process_remesh_queue`], which rebuilds
//! each queued slot at most once no matter how often it was enqueued.
//!
//! ## Performance Considerations
//!
//! - Chunk lookup is a linear scan over taken slots, adequate for a few hundred chunks
//! - Slot storage and mesh buffers are reused across loads, so streaming does not allocate

use bitvec::prelude::BitVec;
use cgmath::{EuclideanSpace, MetricSpace, Point3};
use log::{debug, info, trace, warn};

use crate::core::{config::WorldConfig, EngineResult};
use crate::engine_state::rendering::{
    meshing::{mesh_chunk, ChunkNeighbors},
    MeshHandle, Renderer,
};

use super::{
    block::{block_side::BlockSide, block_type::BlockType, Block},
    chunk::Chunk,
    coordinates::{chunk_translation, split_world_position, touched_chunk_faces},
    snapshot::ChunkSnapshot,
    terrain::TerrainGenerator,
};

/// Index of a slot in the chunk pool.
pub type ChunkSlot = usize;

/// Represents the loaded part of a voxel world.
///
/// # Examples
///
/// ```
/// use blockworld::core::config::WorldConfig;
/// use blockworld::engine_state::voxels::world::World;
/// use cgmath::Point3;
///
/// let mut world = World::new(&WorldConfig::default());
/// world.get_or_load_chunk(Point3::new(0, 0, 0));
/// assert_eq!(world.loaded_chunk_count(), 1);
/// ```
pub struct World {
    /// The chunk pool; a slot's contents are meaningful only while taken.
    chunks: Vec<Chunk>,
    /// Slots holding a loaded chunk.
    taken: BitVec,
    /// Slots rebuilt during the current queue flush.
    remeshed: BitVec,
    /// Slots waiting for a mesh rebuild, possibly repeated.
    remesh_queue: Vec<ChunkSlot>,
    remesh_queue_capacity: usize,
    terrain: TerrainGenerator,
    /// Position used to choose eviction victims.
    observer_position: Point3<f32>,
    /// Device meshes of forgotten chunks, freed on the next draw.
    released_meshes: Vec<MeshHandle>,
}

impl World {
    /// Creates a world with an empty chunk pool.
    ///
    /// # Panics
    /// Panics if the configured pool or queue capacity is zero.
    pub fn new(config: &WorldConfig) -> Self {
        assert!(config.max_loaded_chunks > 0, "chunk pool needs at least one slot");
        assert!(config.remesh_queue_capacity > 0, "remesh queue needs capacity");

        let mut chunks = Vec::with_capacity(config.max_loaded_chunks);
        chunks.resize_with(config.max_loaded_chunks, Chunk::default);

        info!(
            "Created world with {} chunk slots and seed {}",
            config.max_loaded_chunks, config.seed
        );

        World {
            chunks,
            taken: BitVec::repeat(false, config.max_loaded_chunks),
            remeshed: BitVec::repeat(false, config.max_loaded_chunks),
            remesh_queue: Vec::with_capacity(config.remesh_queue_capacity),
            remesh_queue_capacity: config.remesh_queue_capacity,
            terrain: TerrainGenerator::new(config.seed),
            observer_position: Point3::new(0.0, 0.0, 0.0),
            released_meshes: Vec::new(),
        }
    }

    /// Number of loaded chunks.
    pub fn loaded_chunk_count(&self) -> usize {
        self.taken.count_ones()
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    /// Sets the position eviction distances are measured from.
    pub fn set_observer_position(&mut self, position: Point3<f32>) {
        self.observer_position = position;
    }

    /// Iterates the loaded chunks.
    pub fn loaded_chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.taken.iter_ones().map(move |slot| &self.chunks[slot])
    }

    /// Pool slot of the loaded chunk at a chunk coordinate.
    pub fn find_slot(&self, coordinate: Point3<i32>) -> Option<ChunkSlot> {
        self.taken
            .iter_ones()
            .find(|&slot| self.chunks[slot].position == coordinate)
    }

    /// The loaded chunk at a chunk coordinate.
    pub fn get_chunk(&self, coordinate: Point3<i32>) -> Option<&Chunk> {
        self.find_slot(coordinate).map(|slot| &self.chunks[slot])
    }

    /// Whether a chunk coordinate is loaded.
    pub fn is_loaded(&self, coordinate: Point3<i32>) -> bool {
        self.find_slot(coordinate).is_some()
    }

    /// Returns the chunk at a coordinate, loading it first if needed.
    ///
    /// A newly loaded chunk is generated and meshed immediately, and every
    /// loaded neighbor is enqueued for a rebuild so its boundary faces match.
    pub fn get_or_load_chunk(&mut self, coordinate: Point3<i32>) -> &Chunk {
        let slot = self.get_or_load_slot(coordinate);
        &self.chunks[slot]
    }

    fn get_or_load_slot(&mut self, coordinate: Point3<i32>) -> ChunkSlot {
        if let Some(slot) = self.find_slot(coordinate) {
            return slot;
        }

        let slot = self.get_chunk_slot();
        self.chunks[slot].init(coordinate, &self.terrain);
        self.taken.set(slot, true);
        self.remesh_slot(slot);

        trace!(
            "Loaded chunk {:?} into slot {} with {} solid blocks",
            coordinate,
            slot,
            self.chunks[slot].solid_blocks().count()
        );

        for side in BlockSide::all() {
            if let Some(neighbor) = self.find_slot(coordinate + side.offset()) {
                self.enqueue_remesh(neighbor);
            }
        }

        slot
    }

    /// Returns a free slot, evicting the farthest loaded chunk if none is free.
    fn get_chunk_slot(&mut self) -> ChunkSlot {
        if let Some(slot) = self.taken.first_zero() {
            return slot;
        }
        self.evict_farthest()
    }

    fn evict_farthest(&mut self) -> ChunkSlot {
        let mut farthest: Option<(ChunkSlot, f32)> = None;

        for slot in self.taken.iter_ones() {
            let origin = Point3::from_vec(chunk_translation(self.chunks[slot].position));
            let distance = origin.distance(self.observer_position);
            match farthest {
                Some((_, best)) if distance <= best => {}
                _ => farthest = Some((slot, distance)),
            }
        }

        let Some((slot, distance)) = farthest else {
            unreachable!("a full chunk pool has at least one taken slot");
        };

        debug!(
            "Evicting chunk {:?} from slot {} at distance {:.1}",
            self.chunks[slot].position, slot, distance
        );
        self.release_slot(slot);
        slot
    }

    /// Forgets the chunk in `slot` and enqueues its loaded neighbors, whose
    /// boundary faces toward it must reappear.
    fn release_slot(&mut self, slot: ChunkSlot) {
        self.forget_slot(slot);

        let coordinate = self.chunks[slot].position;
        for side in BlockSide::all() {
            if let Some(neighbor) = self.find_slot(coordinate + side.offset()) {
                self.enqueue_remesh(neighbor);
            }
        }
    }

    fn forget_slot(&mut self, slot: ChunkSlot) {
        if let Some(handle) = self.chunks[slot].forget() {
            self.released_meshes.push(handle);
        }
        self.taken.set(slot, false);
    }

    /// Unloads the chunk at a coordinate.
    ///
    /// # Returns
    /// Whether a chunk was loaded there.
    pub fn unload_chunk(&mut self, coordinate: Point3<i32>) -> bool {
        match self.find_slot(coordinate) {
            Some(slot) => {
                self.release_slot(slot);
                debug!("Unloaded chunk {:?}", coordinate);
                true
            }
            None => false,
        }
    }

    /// Unloads every chunk and drops pending remeshes.
    pub fn unload_all_chunks(&mut self) {
        let slots: Vec<ChunkSlot> = self.taken.iter_ones().collect();
        for slot in slots {
            self.forget_slot(slot);
        }
        self.remesh_queue.clear();
        info!("Unloaded all chunks");
    }

    /// Queues a slot for a mesh rebuild.
    ///
    /// A full queue is flushed before the slot is added.
    pub fn enqueue_remesh(&mut self, slot: ChunkSlot) {
        if self.remesh_queue.len() >= self.remesh_queue_capacity {
            warn!(
                "Remesh queue full at {} entries, flushing early",
                self.remesh_queue.len()
            );
            self.process_remesh_queue();
        }
        self.remesh_queue.push(slot);
    }

    /// Slots currently waiting for a rebuild, duplicates included.
    pub fn pending_remeshes(&self) -> &[ChunkSlot] {
        &self.remesh_queue
    }

    /// Rebuilds the mesh of every queued slot once and empties the queue.
    ///
    /// Slots that were unloaded after being queued are skipped.
    ///
    /// # Returns
    /// The number of chunks remeshed.
    pub fn process_remesh_queue(&mut self) -> usize {
        if self.remesh_queue.is_empty() {
            return 0;
        }

        let mut queue = std::mem::take(&mut self.remesh_queue);
        self.remeshed.fill(false);

        let mut remeshed = 0;
        for &slot in &queue {
            if !self.taken[slot] || self.remeshed[slot] {
                continue;
            }
            self.remesh_slot(slot);
            self.remeshed.set(slot, true);
            remeshed += 1;
        }

        trace!("Remeshed {} chunks from {} queued entries", remeshed, queue.len());

        queue.clear();
        self.remesh_queue = queue;
        remeshed
    }

    /// Rebuilds one slot's mesh against its currently loaded neighbors.
    fn remesh_slot(&mut self, slot: ChunkSlot) {
        let coordinate = self.chunks[slot].position;
        let neighbor_slots = BlockSide::all().map(|side| self.find_slot(coordinate + side.offset()));

        let (mut blocks, mut mesh) = self.chunks[slot].take_mesh_inputs();
        {
            let chunks = &self.chunks;
            let neighbors = ChunkNeighbors::new(neighbor_slots.map(|s| s.map(|i| &chunks[i])));
            mesh_chunk(&mut blocks, &neighbors, &mut mesh);
        }
        self.chunks[slot].restore_mesh_inputs(blocks, mesh);
    }

    /// The block at a world position, if its chunk is loaded.
    pub fn get_block_at(&self, world_position: Point3<i32>) -> Option<&Block> {
        let (coordinate, local) = split_world_position(world_position);
        self.get_chunk(coordinate).map(|chunk| chunk.get_block(local))
    }

    /// Sets a block, loading its chunk if necessary, and enqueues remeshes.
    pub fn set_block_at(&mut self, world_position: Point3<i32>, block_type: BlockType) {
        let (coordinate, local) = split_world_position(world_position);
        let slot = self.get_or_load_slot(coordinate);
        self.write_block(slot, local, block_type);
    }

    /// Sets a block only if its chunk is loaded.
    ///
    /// # Returns
    /// Whether the block was written.
    pub fn try_set_block_at(&mut self, world_position: Point3<i32>, block_type: BlockType) -> bool {
        let (coordinate, local) = split_world_position(world_position);
        match self.find_slot(coordinate) {
            Some(slot) => {
                self.write_block(slot, local, block_type);
                true
            }
            None => false,
        }
    }

    fn write_block(&mut self, slot: ChunkSlot, local: Point3<i32>, block_type: BlockType) {
        self.chunks[slot].set_block(local, block_type);
        self.enqueue_remesh(slot);

        let coordinate = self.chunks[slot].position;
        for offset in touched_chunk_faces(local) {
            if let Some(neighbor) = self.find_slot(coordinate + offset) {
                self.enqueue_remesh(neighbor);
            }
        }
    }

    /// Frees released meshes, then uploads and draws every loaded chunk.
    ///
    /// # Returns
    /// The number of draw calls issued.
    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        for handle in self.released_meshes.drain(..) {
            renderer.free_mesh(handle);
        }

        let mut drawn = 0;
        for slot in self.taken.iter_ones() {
            if self.chunks[slot].draw(renderer) {
                drawn += 1;
            }
        }
        drawn
    }

    /// Snapshot of the loaded chunk at a coordinate.
    pub fn snapshot_chunk(&self, coordinate: Point3<i32>) -> Option<ChunkSnapshot> {
        self.get_chunk(coordinate).map(ChunkSnapshot::capture)
    }

    /// Snapshots of every loaded chunk, in slot order.
    pub fn snapshot_all(&self) -> Vec<ChunkSnapshot> {
        self.loaded_chunks().map(ChunkSnapshot::capture).collect()
    }

    /// Writes a snapshot's blocks into the world.
    ///
    /// The chunk is loaded first if necessary. The chunk and all its loaded
    /// neighbors are enqueued for remeshing.
    pub fn restore_chunk(&mut self, snapshot: &ChunkSnapshot) -> EngineResult<()> {
        snapshot.validate()?;

        let coordinate = snapshot.chunk_coordinate();
        let slot = self.get_or_load_slot(coordinate);
        for (block, &block_id) in self.chunks[slot].blocks.iter_mut().zip(&snapshot.blocks) {
            block.block_type = block_id;
        }

        self.enqueue_remesh(slot);
        for side in BlockSide::all() {
            if let Some(neighbor) = self.find_slot(coordinate + side.offset()) {
                self.enqueue_remesh(neighbor);
            }
        }

        debug!("Restored chunk {:?}", coordinate);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::RecordingRenderer;
    use crate::engine_state::voxels::chunk::CHUNK_SIZE;

    fn world(max_loaded_chunks: usize) -> World {
        World::new(&WorldConfig {
            max_loaded_chunks,
            ..WorldConfig::default()
        })
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut world = world(8);
        world.get_or_load_chunk(Point3::new(0, 0, 0));
        world.get_or_load_chunk(Point3::new(0, 0, 0));
        assert_eq!(world.loaded_chunk_count(), 1);
        assert_eq!(world.find_slot(Point3::new(0, 0, 0)), Some(0));
    }

    #[test]
    fn test_loading_enqueues_loaded_neighbors() {
        let mut world = world(8);
        world.get_or_load_chunk(Point3::new(0, 0, 0));
        assert!(world.pending_remeshes().is_empty());

        world.get_or_load_chunk(Point3::new(1, 0, 0));
        assert_eq!(world.pending_remeshes(), &[0]);
        assert_eq!(world.process_remesh_queue(), 1);
        assert_eq!(world.process_remesh_queue(), 0);
    }

    #[test]
    fn test_eviction_prefers_farthest_chunk() {
        let mut world = world(2);
        world.set_observer_position(Point3::new(0.0, 0.0, 0.0));
        world.get_or_load_chunk(Point3::new(0, 0, 0));
        world.get_or_load_chunk(Point3::new(5, 0, 0));
        world.get_or_load_chunk(Point3::new(0, 0, 1));

        assert_eq!(world.loaded_chunk_count(), 2);
        assert!(world.is_loaded(Point3::new(0, 0, 0)));
        assert!(!world.is_loaded(Point3::new(5, 0, 0)));
        assert!(world.is_loaded(Point3::new(0, 0, 1)));
    }

    #[test]
    fn test_eviction_tie_evicts_first_scanned_slot() {
        let mut world = world(2);
        world.set_observer_position(Point3::new(0.0, 0.0, 0.0));
        world.get_or_load_chunk(Point3::new(1, 0, 0));
        world.get_or_load_chunk(Point3::new(-1, 0, 0));
        assert_eq!(world.find_slot(Point3::new(1, 0, 0)), Some(0));

        // Both origins lie 16 units away; the first scanned slot goes.
        world.get_or_load_chunk(Point3::new(0, 0, 0));
        assert!(!world.is_loaded(Point3::new(1, 0, 0)));
        assert!(world.is_loaded(Point3::new(-1, 0, 0)));
        assert_eq!(world.find_slot(Point3::new(0, 0, 0)), Some(0));
    }

    #[test]
    fn test_unload_enqueues_loaded_neighbors() {
        let mut world = world(8);
        world.get_or_load_chunk(Point3::new(0, 8, 0));
        world.get_or_load_chunk(Point3::new(1, 8, 0));
        world.get_or_load_chunk(Point3::new(5, 8, 0));
        world.process_remesh_queue();

        assert!(world.unload_chunk(Point3::new(1, 8, 0)));
        assert_eq!(world.pending_remeshes(), &[0]);
    }

    #[test]
    fn test_flush_remeshes_each_slot_once() {
        let mut world = world(8);
        world.get_or_load_chunk(Point3::new(0, 8, 0));
        world.process_remesh_queue();

        world.set_block_at(Point3::new(3, 130, 3), BlockType::STONE);
        world.set_block_at(Point3::new(4, 130, 3), BlockType::STONE);
        assert_eq!(world.pending_remeshes().len(), 2);
        assert_eq!(world.process_remesh_queue(), 1);
        assert!(world.pending_remeshes().is_empty());
    }

    #[test]
    fn test_try_set_skips_unloaded_chunks() {
        let mut world = world(8);
        assert!(!world.try_set_block_at(Point3::new(1, 1, 1), BlockType::BRICK));
        assert_eq!(world.loaded_chunk_count(), 0);

        world.set_block_at(Point3::new(1, 1, 1), BlockType::BRICK);
        assert_eq!(world.loaded_chunk_count(), 1);
        assert_eq!(
            world.get_block_at(Point3::new(1, 1, 1)).map(|b| b.block_type),
            Some(BlockType::BRICK.id())
        );
    }

    #[test]
    fn test_boundary_edit_enqueues_neighbor() {
        let mut world = world(8);
        world.get_or_load_chunk(Point3::new(0, 8, 0));
        world.get_or_load_chunk(Point3::new(-1, 8, 0));
        world.process_remesh_queue();

        assert!(world.try_set_block_at(Point3::new(0, 130, 5), BlockType::GLASS));
        let west = world.find_slot(Point3::new(-1, 8, 0));
        let own = world.find_slot(Point3::new(0, 8, 0));
        assert_eq!(world.pending_remeshes(), &[own.unwrap(), west.unwrap()]);
    }

    #[test]
    fn test_unload_releases_device_mesh() {
        let mut world = world(8);
        let mut renderer = RecordingRenderer::new();
        world.set_block_at(Point3::new(0, 130, 0), BlockType::STONE);
        world.process_remesh_queue();
        assert_eq!(world.draw(&mut renderer), 1);
        assert_eq!(renderer.live_mesh_count(), 1);

        assert!(world.unload_chunk(Point3::new(0, 8, 0)));
        assert!(!world.unload_chunk(Point3::new(0, 8, 0)));
        assert_eq!(world.draw(&mut renderer), 0);
        assert_eq!(renderer.live_mesh_count(), 0);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut world = world(8);
        world.set_block_at(Point3::new(2, 130, 2), BlockType::GLASS);
        let snapshot = world.snapshot_chunk(Point3::new(0, 8, 0)).unwrap();
        assert_eq!(snapshot.blocks.len(), CHUNK_SIZE as usize);

        world.unload_all_chunks();
        assert_eq!(world.loaded_chunk_count(), 0);

        world.restore_chunk(&snapshot).unwrap();
        assert_eq!(
            world.get_block_at(Point3::new(2, 130, 2)).map(|b| b.block_type),
            Some(BlockType::GLASS.id())
        );
        assert_eq!(world.snapshot_all(), vec![snapshot]);
    }
}
