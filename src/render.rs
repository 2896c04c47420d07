//! Geometry hand-off boundary.
//!
//! The streaming core never talks to a GPU directly; it hands finished
//! [`ChunkMesh`] buffers to whatever implements [`RenderBackend`] and tells
//! it when a chunk's geometry is torn down. The soak binary plugs in
//! [`NullBackend`]; tests plug in recording backends to observe the upload
//! and discard traffic.

use cgmath::Point2;

use crate::chunk::ChunkMesh;

/// Receiver for committed chunk geometry, keyed by chunk origin.
pub trait RenderBackend: Send {
    /// Called on the main thread when a chunk's mesh is committed. A second
    /// upload for the same origin replaces the previous geometry.
    fn upload_chunk(&mut self, origin: Point2<i32>, mesh: &ChunkMesh);

    /// Called when a chunk leaves the active area and its geometry should be
    /// released. May arrive for origins that never uploaded.
    fn discard_chunk(&mut self, origin: Point2<i32>);
}

/// Backend that drops everything on the floor; used headless.
#[derive(Default)]
pub struct NullBackend;

impl RenderBackend for NullBackend {
    fn upload_chunk(&mut self, _origin: Point2<i32>, _mesh: &ChunkMesh) {}

    fn discard_chunk(&mut self, _origin: Point2<i32>) {}
}
