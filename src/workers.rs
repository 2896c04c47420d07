//! Background fill and mesh workers.
//!
//! Terrain streaming is fire-and-forget: the registry hands a zone's chunks
//! to a fill task, or a single chunk plus its neighbor snapshot to a mesh
//! task, and moves on. Workers report back through unbounded channels as
//! typed [`Result`] outcomes; the registry drains those once per frame on
//! the main thread and is the only place that mutates shared bookkeeping.
//!
//! A panicking worker is converted into an `Err` outcome instead of taking
//! the process down, so one bad chunk cannot wedge the whole stream.

use std::panic::{self, AssertUnwindSafe};

use crossbeam::channel::{self, Receiver, Sender};

use crate::chunk::{Chunk, ChunkMesh, Generator, NeighborHandles};
use crate::error::WorldError;
use crate::shared::Shared;

/// Where worker closures actually run.
///
/// `Threaded` hands jobs to the global rayon pool; `Inline` runs them on the
/// caller's thread so tests can drive the whole pipeline deterministically.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TaskPool {
    /// Jobs run on the global rayon pool.
    #[default]
    Threaded,
    /// Jobs run immediately on the calling thread.
    Inline,
}

impl TaskPool {
    fn spawn(self, job: impl FnOnce() + Send + 'static) {
        match self {
            TaskPool::Threaded => rayon::spawn(job),
            TaskPool::Inline => job(),
        }
    }
}

/// Report from a fill worker, one per chunk in the zone batch.
#[derive(Clone, Debug)]
pub struct FillOutcome {
    /// Zone the batch was scheduled for; a failed fill un-marks it.
    pub zone_key: i64,
    /// The filled chunk's key on success.
    pub result: Result<i64, WorldError>,
}

/// Report from a mesh worker.
#[derive(Clone, Debug)]
pub struct MeshOutcome {
    /// The meshed chunk's key.
    pub chunk_key: i64,
    /// The built geometry, or why building it failed.
    pub result: Result<ChunkMesh, WorldError>,
}

/// The channel pairs connecting workers back to the registry. The registry
/// keeps the receivers; senders are cloned into each spawned task.
pub struct WorkerChannels {
    /// Cloned into every fill task.
    pub fill_tx: Sender<FillOutcome>,
    /// Drained by the registry each tick.
    pub fill_rx: Receiver<FillOutcome>,
    /// Cloned into every mesh task.
    pub mesh_tx: Sender<MeshOutcome>,
    /// Drained by the registry each tick.
    pub mesh_rx: Receiver<MeshOutcome>,
}

impl WorkerChannels {
    /// A fresh pair of unbounded fill and mesh channels.
    pub fn new() -> Self {
        let (fill_tx, fill_rx) = channel::unbounded();
        let (mesh_tx, mesh_rx) = channel::unbounded();
        WorkerChannels {
            fill_tx,
            fill_rx,
            mesh_tx,
            mesh_rx,
        }
    }
}

impl Default for WorkerChannels {
    fn default() -> Self {
        Self::new()
    }
}

/// Schedules a zone's worth of freshly instantiated chunks for block fill.
///
/// Sends one [`FillOutcome`] per chunk; the registry counts them against the
/// zone to know when the zone's chunks can be meshed.
pub fn spawn_fill_task(
    pool: TaskPool,
    zone_key: i64,
    chunks: Vec<Shared<Chunk>>,
    generator: Generator,
    tx: Sender<FillOutcome>,
) {
    pool.spawn(move || {
        for chunk in chunks {
            let fill = panic::catch_unwind(AssertUnwindSafe(|| {
                chunk.get_mut().fill(generator);
                chunk.get().key()
            }));
            let result = fill.map_err(|payload| WorldError::TaskFailed(panic_message(&payload)));
            // The registry may drop its receiver during shutdown.
            let _ = tx.send(FillOutcome { zone_key, result });
        }
    });
}

/// Schedules one filled chunk for meshing against a pre-resolved snapshot of
/// its linked neighbors.
pub fn spawn_mesh_task(
    pool: TaskPool,
    chunk: Shared<Chunk>,
    neighbors: NeighborHandles,
    tx: Sender<MeshOutcome>,
) {
    pool.spawn(move || {
        let chunk_key = chunk.get().key();
        let built = panic::catch_unwind(AssertUnwindSafe(|| chunk.get().build_mesh(&neighbors)));
        let result = built.map_err(|payload| WorldError::TaskFailed(panic_message(&payload)));
        let _ = tx.send(MeshOutcome { chunk_key, result });
    });
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::coords;
    use cgmath::Point2;
    use std::time::Duration;

    #[test]
    fn inline_fill_task_reports_every_chunk() {
        let channels = WorkerChannels::new();
        let zone_key = coords::to_key(0, 0);
        let chunks: Vec<_> = (0..4)
            .map(|i| Shared::new(Chunk::new(Point2::new(i * 16, 0))))
            .collect();

        spawn_fill_task(
            TaskPool::Inline,
            zone_key,
            chunks.clone(),
            Generator::Flat,
            channels.fill_tx.clone(),
        );

        let outcomes: Vec<_> = channels.fill_rx.try_iter().collect();
        assert_eq!(outcomes.len(), 4);
        for outcome in &outcomes {
            assert_eq!(outcome.zone_key, zone_key);
            assert!(outcome.result.is_ok());
        }
        for chunk in &chunks {
            assert!(chunk.get().is_filled());
            assert_eq!(chunk.get().block_at(0, 0, 0).unwrap(), BlockType::Bedrock);
        }
    }

    #[test]
    fn inline_mesh_task_returns_geometry() {
        let channels = WorkerChannels::new();
        let chunk = Shared::new(Chunk::solid(Point2::new(0, 0), BlockType::Stone));

        spawn_mesh_task(
            TaskPool::Inline,
            chunk.clone(),
            NeighborHandles::default(),
            channels.mesh_tx.clone(),
        );

        let outcome = channels.mesh_rx.try_recv().unwrap();
        assert_eq!(outcome.chunk_key, chunk.get().key());
        assert!(!outcome.result.unwrap().is_empty());
    }

    #[test]
    fn threaded_fill_task_delivers_through_the_channel() {
        let channels = WorkerChannels::new();
        let chunk = Shared::new(Chunk::new(Point2::new(-16, 32)));

        spawn_fill_task(
            TaskPool::Threaded,
            coords::to_key(-64, 0),
            vec![chunk.clone()],
            Generator::Flat,
            channels.fill_tx.clone(),
        );

        let outcome = channels
            .fill_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("fill worker never reported");
        assert_eq!(outcome.result.unwrap(), chunk.get().key());
        assert!(chunk.get().is_filled());
    }
}
