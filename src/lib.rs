#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! The simulation core of an infinite, procedurally generated voxel world:
//! chunked block storage, noise-driven terrain fill, face-culled meshing,
//! and zone-based streaming that follows a moving player.
//!
//! ## Key Modules
//!
//! * `terrain` - The chunk registry and streaming state machine
//! * `chunk` - Block storage, procedural fill, and the mesher
//! * `workers` - Fire-and-forget fill/mesh tasks and their result channels
//! * `targeting` - Grid-marched block targeting and swept collision
//! * `noise` - The deterministic noise primitives terrain shape is built on
//! * `render` - The backend trait geometry is handed across
//!
//! ## Architecture
//!
//! The world is a flat grid of 16x256x16 chunks grouped into 64x64 zones,
//! the unit of streaming. When the player crosses a zone border the terrain
//! registry diffs the loaded zone square against the new one, schedules fill
//! work for unseen zones, and tears down geometry that fell out of range.
//! Workers run on a thread pool and report typed results over channels; the
//! registry drains them once per tick, so all bookkeeping stays on the main
//! thread.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_world::{NullBackend, Terrain};
//!
//! let mut terrain = Terrain::new(Box::new(NullBackend));
//! terrain.tick(0.016, Point3::new(0.0, 160.0, 0.0));
//! ```

pub mod block;
pub mod chunk;
pub mod coords;
pub mod error;
pub mod noise;
pub mod render;
pub mod shared;
pub mod targeting;
pub mod terrain;
pub mod workers;

pub use block::BlockType;
pub use chunk::{Chunk, ChunkMesh, Generator};
pub use error::WorldError;
pub use render::{NullBackend, RenderBackend};
pub use targeting::{march, sweep_player_box, RayHit};
pub use terrain::{Terrain, TerrainConfig};
