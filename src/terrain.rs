//! The chunk registry and streaming driver.
//!
//! `Terrain` owns every live chunk, keyed by packed origin, and keeps the
//! loaded area centered on the player: when the player's zone changes it
//! diffs the old and new zone squares, tears down geometry that fell out of
//! range, and schedules fill work for zones never populated before. Worker
//! outcomes are drained once per tick on the main thread; nothing else
//! mutates the registry's bookkeeping.
//!
//! ## Chunk lifecycle
//!
//! instantiated -> filled (fill worker) -> meshed (mesh worker, once all
//! linked neighbors are filled) -> committed (geometry uploaded). Leaving
//! the active area only discards geometry; block data stays resident so a
//! returning player re-meshes instead of re-filling.

use std::collections::{HashMap, HashSet};

use cgmath::{Point2, Point3, Vector3};
use log::{debug, error, info};

use crate::block::{BlockType, Direction};
use crate::chunk::{self, Chunk, Generator, NeighborHandles};
use crate::coords::{self, CHUNK_DIM, CHUNK_HEIGHT, ZONE_DIM};
use crate::error::WorldError;
use crate::render::RenderBackend;
use crate::shared::Shared;
use crate::targeting;
use crate::workers::{self, TaskPool, WorkerChannels};

/// Seconds between expansion checks.
const EXPANSION_PERIOD: f32 = 0.5;

/// How far the player's look ray reaches when breaking or placing blocks.
const REACH: f32 = 3.0;

/// Tuning knobs for the streaming core.
#[derive(Copy, Clone, Debug)]
pub struct TerrainConfig {
    /// Zones kept loaded beyond the player's own zone on each side; radius 2
    /// means a 5x5 zone square.
    pub zone_radius: i32,
    /// Committed-chunk count that marks the initial load as done.
    pub initial_chunk_target: usize,
    /// Block generator handed to fill workers.
    pub generator: Generator,
    /// Worker execution mode.
    pub pool: TaskPool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            zone_radius: 2,
            initial_chunk_target: 400,
            generator: Generator::Biome,
            pool: TaskPool::Threaded,
        }
    }
}

/// Registry of live chunks plus the streaming state machine around them.
pub struct Terrain {
    chunks: HashMap<i64, Shared<Chunk>>,
    /// Zones whose fill work has been scheduled. Marked at schedule time so
    /// a zone is never scheduled twice; un-marked if a fill worker fails.
    filled_zones: HashSet<i64>,
    /// Filled chunks waiting for their linked neighbors to finish filling
    /// before they can be meshed.
    pending_mesh: Vec<i64>,
    channels: WorkerChannels,
    backend: Box<dyn RenderBackend>,
    config: TerrainConfig,
    committed: usize,
    prev_zone: Option<(i32, i32)>,
    expansion_timer: f32,
}

impl Terrain {
    /// An empty registry with default streaming parameters.
    pub fn new(backend: Box<dyn RenderBackend>) -> Self {
        Self::with_config(TerrainConfig::default(), backend)
    }

    /// An empty registry with explicit streaming parameters.
    pub fn with_config(config: TerrainConfig, backend: Box<dyn RenderBackend>) -> Self {
        Terrain {
            chunks: HashMap::new(),
            filled_zones: HashSet::new(),
            pending_mesh: Vec::new(),
            channels: WorkerChannels::new(),
            backend,
            config,
            committed: 0,
            prev_zone: None,
            expansion_timer: 0.0,
        }
    }

    /// Whether a chunk exists at the given world x/z.
    pub fn has_chunk_at(&self, x: i32, z: i32) -> bool {
        let (cx, cz) = coords::chunk_origin(x, z);
        self.chunks.contains_key(&coords::to_key(cx, cz))
    }

    /// The chunk covering the given world x/z, if instantiated.
    pub fn chunk_at(&self, x: i32, z: i32) -> Option<Shared<Chunk>> {
        let (cx, cz) = coords::chunk_origin(x, z);
        self.chunks.get(&coords::to_key(cx, cz)).cloned()
    }

    /// Creates the chunk covering world x/z and links it to any existing
    /// horizontal neighbors. Returns the existing chunk if already present.
    pub fn instantiate_chunk_at(&mut self, x: i32, z: i32) -> Shared<Chunk> {
        let (cx, cz) = coords::chunk_origin(x, z);
        let key = coords::to_key(cx, cz);
        if let Some(existing) = self.chunks.get(&key) {
            return existing.clone();
        }

        let chunk = Shared::new(Chunk::new(Point2::new(cx, cz)));
        for direction in Direction::HORIZONTAL {
            let offset = direction.offset();
            let neighbor_key =
                coords::to_key(cx + offset.x * CHUNK_DIM, cz + offset.z * CHUNK_DIM);
            if let Some(neighbor) = self.chunks.get(&neighbor_key) {
                chunk::link_neighbors(&chunk, neighbor, direction);
            }
        }
        self.chunks.insert(key, chunk.clone());
        chunk
    }

    /// Reads the block at a world coordinate.
    ///
    /// Above and below the world is unbounded air; a horizontal coordinate
    /// with no chunk behind it is an error the caller must handle.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Result<BlockType, WorldError> {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return Ok(BlockType::Empty);
        }
        let chunk = self
            .chunk_at(x, z)
            .ok_or_else(|| missing_chunk(x, z))?;
        let guard = chunk.get();
        let origin = guard.origin();
        guard.block_at(x - origin.x, y, z - origin.y)
    }

    /// Writes the block at a world coordinate and, if the owning chunk is
    /// already filled, rebuilds and re-uploads its geometry synchronously.
    ///
    /// Edits on a chunk border leave the neighbor's geometry stale until its
    /// next scheduled rebuild.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> Result<(), WorldError> {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return Err(WorldError::OutOfRange { x, y, z });
        }
        let chunk = self
            .chunk_at(x, z)
            .ok_or_else(|| missing_chunk(x, z))?;

        let (key, filled) = {
            let mut guard = chunk.get_mut();
            let origin = guard.origin();
            guard.set_block_at(x - origin.x, y, z - origin.y, block)?;
            (guard.key(), guard.is_filled())
        };
        if filled {
            self.rebuild_chunk(key, &chunk);
        }
        Ok(())
    }

    fn rebuild_chunk(&mut self, key: i64, chunk: &Shared<Chunk>) {
        let handles = self.neighbor_handles(key);
        let mesh = chunk.get().build_mesh(&handles);
        let origin = chunk.get().origin();
        self.backend.upload_chunk(origin, &mesh);
        chunk.get_mut().set_mesh(mesh);
    }

    /// Breaks the first solid block within reach of the look ray, returning
    /// the broken cell. Water and lava are never targeted.
    pub fn remove_block(
        &mut self,
        eye: Point3<f32>,
        look: Vector3<f32>,
    ) -> Result<Option<Point3<i32>>, WorldError> {
        match targeting::march(eye, look * REACH, self)? {
            Some(hit) => {
                self.set_block(hit.cell.x, hit.cell.y, hit.cell.z, BlockType::Empty)?;
                Ok(Some(hit.cell))
            }
            None => Ok(None),
        }
    }

    /// Places a block in the cell the look ray passed through just before
    /// hitting a solid block, returning the placed cell.
    pub fn place_block(
        &mut self,
        eye: Point3<f32>,
        look: Vector3<f32>,
        block: BlockType,
    ) -> Result<Option<Point3<i32>>, WorldError> {
        match targeting::march(eye, look * REACH, self)? {
            Some(hit) => {
                self.set_block(hit.prev_cell.x, hit.prev_cell.y, hit.prev_cell.z, block)?;
                Ok(Some(hit.prev_cell))
            }
            None => Ok(None),
        }
    }

    /// Advances the streaming clock: expansion checks run every
    /// [`EXPANSION_PERIOD`] seconds, worker outcomes drain every call.
    pub fn tick(&mut self, dt: f32, position: Point3<f32>) {
        self.expansion_timer += dt;
        if self.prev_zone.is_none() || self.expansion_timer >= EXPANSION_PERIOD {
            self.expansion_timer = 0.0;
            self.try_expand(position);
        }
        self.drain_worker_results();
    }

    /// Re-centers the loaded area on the player's zone. A no-op while the
    /// player stays in the same zone.
    pub fn try_expand(&mut self, position: Point3<f32>) {
        let zone = coords::zone_origin_of(position);
        if self.prev_zone == Some(zone) {
            return;
        }
        debug!(
            "player crossed into zone ({}, {}), re-centering",
            zone.0, zone.1
        );

        let current: HashSet<i64> = self
            .zone_keys_around(zone, self.config.zone_radius, false)
            .into_iter()
            .collect();
        let previous: HashSet<i64> = match self.prev_zone {
            Some(prev) => self
                .zone_keys_around(prev, self.config.zone_radius, false)
                .into_iter()
                .collect(),
            None => HashSet::new(),
        };

        for &zone_key in previous.difference(&current) {
            self.teardown_zone(zone_key);
        }
        for &zone_key in &current {
            if !self.filled_zones.contains(&zone_key) {
                self.schedule_zone_fill(zone_key);
            } else if !previous.contains(&zone_key) {
                self.restore_zone_geometry(zone_key);
            }
        }

        self.prev_zone = Some(zone);
    }

    /// Packed keys of the zones in a square of the given radius around a
    /// zone origin; with `circumference_only` set, just the outer ring.
    pub fn zone_keys_around(
        &self,
        zone: (i32, i32),
        radius: i32,
        circumference_only: bool,
    ) -> Vec<i64> {
        let mut keys = Vec::new();
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                if circumference_only && dx.abs().max(dz.abs()) != radius {
                    continue;
                }
                keys.push(coords::to_key(zone.0 + dx * ZONE_DIM, zone.1 + dz * ZONE_DIM));
            }
        }
        keys
    }

    fn schedule_zone_fill(&mut self, zone_key: i64) {
        let (zx, zz) = coords::to_coords(zone_key);
        let chunks: Vec<Shared<Chunk>> = coords::zone_chunk_origins((zx, zz))
            .into_iter()
            .map(|(cx, cz)| self.instantiate_chunk_at(cx, cz))
            .collect();

        self.filled_zones.insert(zone_key);
        workers::spawn_fill_task(
            self.config.pool,
            zone_key,
            chunks,
            self.config.generator,
            self.channels.fill_tx.clone(),
        );
    }

    // Geometry for a previously filled zone the player walked back into.
    fn restore_zone_geometry(&mut self, zone_key: i64) {
        let (zx, zz) = coords::to_coords(zone_key);
        for (cx, cz) in coords::zone_chunk_origins((zx, zz)) {
            let key = coords::to_key(cx, cz);
            let needs_mesh = self
                .chunks
                .get(&key)
                .map(|chunk| {
                    let guard = chunk.get();
                    guard.is_filled() && !guard.has_mesh()
                })
                .unwrap_or(false);
            if needs_mesh {
                self.queue_mesh(key);
            }
        }
    }

    // Frees a zone's geometry; block data stays resident.
    fn teardown_zone(&mut self, zone_key: i64) {
        let (zx, zz) = coords::to_coords(zone_key);
        for (cx, cz) in coords::zone_chunk_origins((zx, zz)) {
            let key = coords::to_key(cx, cz);
            if let Some(chunk) = self.chunks.get(&key) {
                if chunk.get_mut().take_mesh().is_some() {
                    self.backend.discard_chunk(Point2::new(cx, cz));
                }
            }
        }
    }

    /// Applies everything the workers finished since the last drain:
    /// fill reports feed the mesh queue, mesh reports commit geometry.
    pub fn drain_worker_results(&mut self) {
        while let Ok(outcome) = self.channels.fill_rx.try_recv() {
            match outcome.result {
                Ok(chunk_key) => {
                    self.queue_mesh(chunk_key);
                    // Neighbors meshed before this chunk existed withheld
                    // their shared border; rebuild them against real blocks.
                    for neighbor_key in self.meshed_neighbors(chunk_key) {
                        self.queue_mesh(neighbor_key);
                    }
                }
                Err(err) => {
                    let (zx, zz) = coords::to_coords(outcome.zone_key);
                    error!("fill failed in zone ({zx}, {zz}): {err}");
                    self.filled_zones.remove(&outcome.zone_key);
                }
            }
        }

        let pending = std::mem::take(&mut self.pending_mesh);
        for chunk_key in pending {
            if self.ready_to_mesh(chunk_key) {
                self.schedule_mesh(chunk_key);
            } else if self.chunks.contains_key(&chunk_key) {
                self.pending_mesh.push(chunk_key);
            }
        }

        self.commit_finished_meshes();
    }

    fn queue_mesh(&mut self, chunk_key: i64) {
        if !self.pending_mesh.contains(&chunk_key) {
            self.pending_mesh.push(chunk_key);
        }
    }

    // Linked neighbors that already carry geometry.
    fn meshed_neighbors(&self, chunk_key: i64) -> Vec<i64> {
        let Some(chunk) = self.chunks.get(&chunk_key) else {
            return Vec::new();
        };
        let guard = chunk.get();
        Direction::HORIZONTAL
            .into_iter()
            .filter_map(|direction| guard.neighbor(direction))
            .filter(|key| {
                self.chunks
                    .get(key)
                    .map(|neighbor| neighbor.get().has_mesh())
                    .unwrap_or(false)
            })
            .collect()
    }

    fn commit_finished_meshes(&mut self) {
        while let Ok(outcome) = self.channels.mesh_rx.try_recv() {
            match outcome.result {
                Ok(mesh) => {
                    if let Some(chunk) = self.chunks.get(&outcome.chunk_key).cloned() {
                        let origin = chunk.get().origin();
                        self.backend.upload_chunk(origin, &mesh);
                        chunk.get_mut().set_mesh(mesh);
                        self.committed += 1;
                        if self.committed == self.config.initial_chunk_target {
                            info!("initial load complete: {} chunks committed", self.committed);
                        }
                    }
                }
                Err(err) => {
                    let (cx, cz) = coords::to_coords(outcome.chunk_key);
                    error!("mesh failed for chunk ({cx}, {cz}): {err}");
                }
            }
        }
    }

    // A chunk can be meshed once it is filled and every linked neighbor is
    // filled too; unlinked borders never block.
    fn ready_to_mesh(&self, chunk_key: i64) -> bool {
        let Some(chunk) = self.chunks.get(&chunk_key) else {
            return false;
        };
        let guard = chunk.get();
        if !guard.is_filled() {
            return false;
        }
        Direction::HORIZONTAL.into_iter().all(|direction| {
            match guard.neighbor(direction) {
                Some(neighbor_key) => self
                    .chunks
                    .get(&neighbor_key)
                    .map(|neighbor| neighbor.get().is_filled())
                    .unwrap_or(true),
                None => true,
            }
        })
    }

    fn schedule_mesh(&mut self, chunk_key: i64) {
        let Some(chunk) = self.chunks.get(&chunk_key).cloned() else {
            return;
        };
        let handles = self.neighbor_handles(chunk_key);
        workers::spawn_mesh_task(
            self.config.pool,
            chunk,
            handles,
            self.channels.mesh_tx.clone(),
        );
    }

    // Resolves a chunk's linked neighbor keys to live handles; meshing must
    // not touch the registry from a worker thread.
    fn neighbor_handles(&self, chunk_key: i64) -> NeighborHandles {
        let mut handles = NeighborHandles::default();
        let Some(chunk) = self.chunks.get(&chunk_key) else {
            return handles;
        };
        let guard = chunk.get();
        for direction in Direction::HORIZONTAL {
            if let Some(neighbor_key) = guard.neighbor(direction) {
                if let Some(neighbor) = self.chunks.get(&neighbor_key) {
                    handles.set(direction, neighbor.clone());
                }
            }
        }
        handles
    }

    /// Whether enough chunks have committed geometry for the world around
    /// the spawn zone to be considered presentable.
    pub fn initial_load_complete(&self) -> bool {
        self.committed >= self.config.initial_chunk_target
    }

    /// Whether fill work has been scheduled or completed for a zone.
    pub fn is_zone_filled(&self, zone_key: i64) -> bool {
        self.filled_zones.contains(&zone_key)
    }

    /// Number of instantiated chunks, resident or visible.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total chunks with committed geometry since startup.
    pub fn committed_chunks(&self) -> usize {
        self.committed
    }
}

fn missing_chunk(x: i32, z: i32) -> WorldError {
    let (cx, cz) = coords::chunk_origin(x, z);
    WorldError::MissingChunk { x: cx, z: cz }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkMesh;
    use crate::render::NullBackend;
    use std::sync::{Arc, Mutex};

    // Records upload and discard traffic for assertions.
    #[derive(Default)]
    struct Recording {
        uploads: Vec<(i32, i32)>,
        discards: Vec<(i32, i32)>,
    }

    struct RecordingBackend(Arc<Mutex<Recording>>);

    impl RenderBackend for RecordingBackend {
        fn upload_chunk(&mut self, origin: Point2<i32>, _mesh: &ChunkMesh) {
            self.0.lock().unwrap().uploads.push((origin.x, origin.y));
        }

        fn discard_chunk(&mut self, origin: Point2<i32>) {
            self.0.lock().unwrap().discards.push((origin.x, origin.y));
        }
    }

    fn test_terrain(log: &Arc<Mutex<Recording>>) -> Terrain {
        let config = TerrainConfig {
            zone_radius: 1,
            initial_chunk_target: 9 * 16,
            generator: Generator::Flat,
            pool: TaskPool::Inline,
        };
        Terrain::with_config(config, Box::new(RecordingBackend(log.clone())))
    }

    #[test]
    fn zone_square_and_ring_have_the_expected_keys() {
        let terrain = Terrain::new(Box::new(NullBackend));
        let square = terrain.zone_keys_around((0, 0), 1, false);
        assert_eq!(square.len(), 9);
        for x in [-64, 0, 64] {
            for z in [-64, 0, 64] {
                assert!(square.contains(&coords::to_key(x, z)));
            }
        }

        let ring = terrain.zone_keys_around((0, 0), 1, true);
        assert_eq!(ring.len(), 8);
        assert!(!ring.contains(&coords::to_key(0, 0)));
    }

    #[test]
    fn instantiation_links_and_never_duplicates() {
        let mut terrain = Terrain::new(Box::new(NullBackend));
        let a = terrain.instantiate_chunk_at(0, 0);
        let b = terrain.instantiate_chunk_at(16, 0);
        let again = terrain.instantiate_chunk_at(5, 7);

        assert_eq!(terrain.chunk_count(), 2);
        assert_eq!(a.get().key(), again.get().key());
        assert_eq!(a.get().neighbor(Direction::XPos), Some(b.get().key()));
        assert_eq!(b.get().neighbor(Direction::XNeg), Some(a.get().key()));
    }

    #[test]
    fn get_block_distinguishes_sky_from_missing_chunks() {
        let mut terrain = Terrain::new(Box::new(NullBackend));
        terrain.instantiate_chunk_at(0, 0);

        assert_eq!(terrain.get_block(3, 300, 3).unwrap(), BlockType::Empty);
        assert_eq!(terrain.get_block(3, -1, 3).unwrap(), BlockType::Empty);
        assert_eq!(terrain.get_block(3, 50, 3).unwrap(), BlockType::Empty);
        assert_eq!(
            terrain.get_block(100, 50, 3),
            Err(WorldError::MissingChunk { x: 96, z: 0 })
        );
    }

    #[test]
    fn first_expansion_commits_the_full_zone_square() {
        let log = Arc::new(Mutex::new(Recording::default()));
        let mut terrain = test_terrain(&log);

        // Inline pool: fill, mesh, and commit all complete within the tick.
        terrain.tick(0.0, Point3::new(8.0, 140.0, 8.0));

        assert_eq!(terrain.chunk_count(), 9 * 16);
        assert!(terrain.initial_load_complete());
        assert_eq!(log.lock().unwrap().uploads.len(), 9 * 16);
        assert_eq!(terrain.get_block(8, 0, 8).unwrap(), BlockType::Bedrock);
        assert_eq!(terrain.get_block(8, 101, 8).unwrap(), BlockType::Grass);
    }

    #[test]
    fn unfilled_chunks_are_never_meshed() {
        let log = Arc::new(Mutex::new(Recording::default()));
        let mut terrain = test_terrain(&log);

        let chunk = terrain.instantiate_chunk_at(512, 512);
        let key = chunk.get().key();
        terrain.queue_mesh(key);
        terrain.drain_worker_results();

        // Still pending: no fill worker has reported this chunk.
        assert!(terrain.pending_mesh.contains(&key));
        assert!(log.lock().unwrap().uploads.is_empty());

        terrain.try_expand(Point3::new(8.0, 140.0, 8.0));
        assert!(terrain.is_zone_filled(coords::to_key(0, 0)));
    }

    #[test]
    fn leaving_a_zone_discards_geometry_but_keeps_blocks() {
        let log = Arc::new(Mutex::new(Recording::default()));
        let mut terrain = test_terrain(&log);

        terrain.tick(0.0, Point3::new(8.0, 140.0, 8.0));
        terrain.drain_worker_results();

        // Jump three zones east: the western column of the old square falls
        // out of range.
        terrain.try_expand(Point3::new(8.0 + 3.0 * 64.0, 140.0, 8.0));
        terrain.drain_worker_results();
        terrain.drain_worker_results();

        let discards = log.lock().unwrap().discards.clone();
        assert!(!discards.is_empty());
        let (dx, dz) = discards[0];
        let chunk = terrain.chunk_at(dx, dz).expect("blocks stay resident");
        assert!(!chunk.get().has_mesh());
        assert!(chunk.get().is_filled());
        assert_eq!(terrain.get_block(dx, 0, dz).unwrap(), BlockType::Bedrock);
    }

    #[test]
    fn returning_to_a_zone_remeshes_without_refilling() {
        let log = Arc::new(Mutex::new(Recording::default()));
        let mut terrain = test_terrain(&log);

        let home = Point3::new(8.0, 140.0, 8.0);
        terrain.tick(0.0, home);
        terrain.drain_worker_results();
        let filled_after_load = terrain.chunk_count();

        terrain.try_expand(Point3::new(8.0 + 3.0 * 64.0, 140.0, 8.0));
        terrain.drain_worker_results();
        terrain.drain_worker_results();
        log.lock().unwrap().uploads.clear();

        terrain.try_expand(home);
        terrain.drain_worker_results();
        terrain.drain_worker_results();

        let uploads = log.lock().unwrap().uploads.clone();
        assert!(!uploads.is_empty());
        // Re-entry reuses the resident block data; only brand-new zones from
        // the eastward trip added chunks.
        let key = coords::to_key(uploads[0].0, uploads[0].1);
        assert!(terrain.chunks.contains_key(&key));
        assert!(terrain.chunk_count() > filled_after_load);
    }

    #[test]
    fn set_block_rebuilds_filled_chunks_synchronously() {
        let log = Arc::new(Mutex::new(Recording::default()));
        let mut terrain = test_terrain(&log);

        terrain.tick(0.0, Point3::new(8.0, 140.0, 8.0));
        terrain.drain_worker_results();
        log.lock().unwrap().uploads.clear();

        terrain.set_block(8, 150, 8, BlockType::Stone).unwrap();
        assert_eq!(terrain.get_block(8, 150, 8).unwrap(), BlockType::Stone);
        assert_eq!(log.lock().unwrap().uploads, vec![(0, 0)]);
    }

    #[test]
    fn set_block_rejects_vertical_overflow() {
        let mut terrain = Terrain::new(Box::new(NullBackend));
        terrain.instantiate_chunk_at(0, 0);
        assert_eq!(
            terrain.set_block(0, 256, 0, BlockType::Stone),
            Err(WorldError::OutOfRange { x: 0, y: 256, z: 0 })
        );
    }

    #[test]
    fn remove_and_place_edit_the_marched_cells() {
        let log = Arc::new(Mutex::new(Recording::default()));
        let mut terrain = test_terrain(&log);
        terrain.tick(0.0, Point3::new(8.0, 140.0, 8.0));
        terrain.drain_worker_results();

        // Look straight down at the flat slab's grass cap from above.
        let eye = Point3::new(8.5, 103.5, 8.5);
        let look = Vector3::new(0.0, -1.0, 0.0);

        let broken = terrain.remove_block(eye, look).unwrap();
        assert_eq!(broken, Some(Point3::new(8, 101, 8)));
        assert_eq!(terrain.get_block(8, 101, 8).unwrap(), BlockType::Empty);

        // The ray now reaches the stone below; placing fills the cell just
        // above the new hit.
        let placed = terrain.place_block(eye, look, BlockType::Sand).unwrap();
        assert_eq!(placed, Some(Point3::new(8, 101, 8)));
        assert_eq!(terrain.get_block(8, 101, 8).unwrap(), BlockType::Sand);
    }
}
