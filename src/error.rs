//! # Error Module
//!
//! The failure taxonomy for the voxel world core. Every fallible operation in
//! the crate reports one of these variants; none of them are recoverable by
//! retrying the same call with the same arguments.

use thiserror::Error;

/// Errors surfaced by the chunk store, the registry and the targeting code.
///
/// `OutOfRange` and `MissingChunk` are caller bugs when they escape the
/// guarded paths (`has_chunk_at`, zone membership checks); `DegenerateRay` is
/// a precondition violation on the grid march. `TaskFailed` wraps a worker
/// task that died partway so its chunks are never reported as completed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// A block coordinate fell outside a chunk's local 16x256x16 bounds.
    #[error("block coordinate ({x}, {y}, {z}) is outside chunk bounds")]
    OutOfRange {
        /// Offending local x coordinate.
        x: i32,
        /// Offending local y coordinate.
        y: i32,
        /// Offending local z coordinate.
        z: i32,
    },

    /// A registry accessor was asked about a chunk that was never instantiated.
    #[error("no chunk has been instantiated at world coordinate ({x}, {z})")]
    MissingChunk {
        /// World-space x of the query.
        x: i32,
        /// World-space z of the query.
        z: i32,
    },

    /// The grid march found no axis with a non-zero direction component.
    #[error("ray direction has no non-zero axis component")]
    DegenerateRay,

    /// A fill or mesh worker panicked before reporting its chunks.
    #[error("worker task failed: {0}")]
    TaskFailed(String),
}
