//! # Chunk Module
//!
//! A [`Chunk`] is a 16x256x16 column of blocks, the atomic unit of storage
//! and meshing. Blocks are stored densely, one byte-sized tag per voxel,
//! indexed `x + 16*y + 16*256*z`.
//!
//! Chunks never reference each other directly. Each chunk records the packed
//! registry keys of its up-to-four horizontal neighbors; anything that needs
//! a neighbor's blocks resolves those keys through the registry and hands the
//! resulting handles to the chunk (see [`Chunk::build_mesh`]). That keeps the
//! links valid no matter how the registry stores its chunks.

use cgmath::Point2;

use crate::block::{BlockType, Direction};
use crate::coords::{self, CHUNK_DIM, CHUNK_HEIGHT};
use crate::error::WorldError;
use crate::shared::Shared;

mod fill;
mod mesh;

pub use fill::Generator;
pub use mesh::{ChunkMesh, MeshBuffers, NeighborHandles, Vertex};

/// Number of blocks in one chunk (16 * 256 * 16).
pub const BLOCKS_PER_CHUNK: usize = (CHUNK_DIM * CHUNK_HEIGHT * CHUNK_DIM) as usize;

/// A 16x256x16 voxel column anchored at a fixed world-space origin.
pub struct Chunk {
    /// World-space block coordinate of the chunk's lower-left corner; always
    /// a multiple of 16 on both axes.
    origin: Point2<i32>,
    /// Dense block storage, `x + 16*y + 4096*z`.
    blocks: Box<[BlockType; BLOCKS_PER_CHUNK]>,
    /// Packed keys of the linked horizontal neighbors, indexed by
    /// `Direction::horizontal_index`.
    neighbors: [Option<i64>; 4],
    /// Set once the fill worker has populated `blocks`. Meshing must not
    /// observe a chunk (or neighbor) with this unset.
    filled: bool,
    /// The most recently committed geometry, if any.
    mesh: Option<ChunkMesh>,
}

impl Chunk {
    /// Creates an all-empty chunk at the given origin.
    ///
    /// The origin must be chunk-aligned; the registry is the only caller and
    /// always passes multiples of 16.
    pub fn new(origin: Point2<i32>) -> Self {
        debug_assert!(origin.x % CHUNK_DIM == 0 && origin.y % CHUNK_DIM == 0);
        Chunk {
            origin,
            blocks: Box::new([BlockType::Empty; BLOCKS_PER_CHUNK]),
            neighbors: [None; 4],
            filled: false,
            mesh: None,
        }
    }

    /// A chunk completely filled with one block type; used by tests and the
    /// soak binary.
    pub fn solid(origin: Point2<i32>, block: BlockType) -> Self {
        let mut chunk = Chunk::new(origin);
        chunk.blocks.fill(block);
        chunk.filled = true;
        chunk
    }

    /// A chunk with a 3D checkerboard of the given block type and air.
    pub fn checkerboard(origin: Point2<i32>, block: BlockType) -> Self {
        let mut chunk = Chunk::new(origin);
        for z in 0..CHUNK_DIM {
            for y in 0..CHUNK_HEIGHT {
                for x in 0..CHUNK_DIM {
                    if (x + y + z) % 2 == 0 {
                        chunk.blocks[Self::index(x, y, z)] = block;
                    }
                }
            }
        }
        chunk.filled = true;
        chunk
    }

    /// World-space origin of this chunk.
    pub fn origin(&self) -> Point2<i32> {
        self.origin
    }

    /// The packed key this chunk is stored under in the registry.
    pub fn key(&self) -> i64 {
        coords::to_key(self.origin.x, self.origin.y)
    }

    fn index(x: i32, y: i32, z: i32) -> usize {
        (x + CHUNK_DIM * y + CHUNK_DIM * CHUNK_HEIGHT * z) as usize
    }

    fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_DIM).contains(&x) && (0..CHUNK_HEIGHT).contains(&y) && (0..CHUNK_DIM).contains(&z)
    }

    /// Bounds-checked read of a local block coordinate.
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> Result<BlockType, WorldError> {
        if Self::in_bounds(x, y, z) {
            Ok(self.blocks[Self::index(x, y, z)])
        } else {
            Err(WorldError::OutOfRange { x, y, z })
        }
    }

    /// Bounds-checked write of a local block coordinate.
    pub fn set_block_at(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> Result<(), WorldError> {
        if Self::in_bounds(x, y, z) {
            self.blocks[Self::index(x, y, z)] = block;
            Ok(())
        } else {
            Err(WorldError::OutOfRange { x, y, z })
        }
    }

    // Unchecked local read for the hot meshing loop; callers stay inside the
    // chunk by construction.
    fn block_unchecked(&self, x: i32, y: i32, z: i32) -> BlockType {
        debug_assert!(Self::in_bounds(x, y, z));
        self.blocks[Self::index(x, y, z)]
    }

    /// The linked neighbor's registry key in the given horizontal direction,
    /// if one has been linked.
    pub fn neighbor(&self, direction: Direction) -> Option<i64> {
        direction
            .horizontal_index()
            .and_then(|idx| self.neighbors[idx])
    }

    fn set_neighbor(&mut self, direction: Direction, key: i64) {
        if let Some(idx) = direction.horizontal_index() {
            self.neighbors[idx] = Some(key);
        }
    }

    /// Whether the fill worker has populated this chunk's blocks.
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// Marks the block data as populated; called exactly once per chunk by
    /// the fill path.
    pub fn mark_filled(&mut self) {
        self.filled = true;
    }

    /// Stores committed geometry on the chunk.
    pub fn set_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = Some(mesh);
    }

    /// Tears down committed geometry, returning it so the caller can release
    /// GPU-side resources. Block data is untouched; the chunk simply needs a
    /// fresh mesh before it can draw again.
    pub fn take_mesh(&mut self) -> Option<ChunkMesh> {
        self.mesh.take()
    }

    /// Whether this chunk currently holds committed geometry.
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }
}

/// Establishes the mutual neighbor link between two chunks. `direction` is
/// the direction from `chunk` toward `other`; the opposite link is written
/// into `other` so the relation is symmetric by construction.
pub fn link_neighbors(chunk: &Shared<Chunk>, other: &Shared<Chunk>, direction: Direction) {
    let other_key = other.get().key();
    let chunk_key = chunk.get().key();
    chunk.get_mut().set_neighbor(direction, other_key);
    other.get_mut().set_neighbor(direction.opposite(), chunk_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point2;

    #[test]
    fn set_then_get_round_trips_in_bounds() {
        let mut chunk = Chunk::new(Point2::new(0, 0));
        chunk.set_block_at(3, 200, 9, BlockType::Sand).unwrap();
        assert_eq!(chunk.block_at(3, 200, 9).unwrap(), BlockType::Sand);
        assert_eq!(chunk.block_at(3, 201, 9).unwrap(), BlockType::Empty);
    }

    #[test]
    fn out_of_range_coordinates_fail_instead_of_wrapping() {
        let mut chunk = Chunk::new(Point2::new(16, -32));
        for (x, y, z) in [(-1, 0, 0), (16, 0, 0), (0, -1, 0), (0, 256, 0), (0, 0, 16)] {
            assert_eq!(
                chunk.block_at(x, y, z),
                Err(WorldError::OutOfRange { x, y, z })
            );
            assert_eq!(
                chunk.set_block_at(x, y, z, BlockType::Stone),
                Err(WorldError::OutOfRange { x, y, z })
            );
        }
    }

    #[test]
    fn linking_is_symmetric() {
        let a = Shared::new(Chunk::new(Point2::new(0, 0)));
        let b = Shared::new(Chunk::new(Point2::new(16, 0)));
        link_neighbors(&a, &b, Direction::XPos);

        assert_eq!(a.get().neighbor(Direction::XPos), Some(b.get().key()));
        assert_eq!(b.get().neighbor(Direction::XNeg), Some(a.get().key()));
        assert_eq!(b.get().neighbor(Direction::XPos), None);
    }

    #[test]
    fn vertical_directions_never_link() {
        let a = Shared::new(Chunk::new(Point2::new(0, 0)));
        let b = Shared::new(Chunk::new(Point2::new(0, 16)));
        link_neighbors(&a, &b, Direction::YPos);
        assert_eq!(a.get().neighbor(Direction::YPos), None);
    }
}
