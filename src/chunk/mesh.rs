//! Face-culling mesher.
//!
//! Walks every cell of a chunk and emits a quad for each face that touches
//! a non-occluding neighbor, splitting the output into an opaque buffer and
//! a transparent buffer so the renderer can draw water and ice in a second
//! pass. Horizontal faces on a chunk border consult the adjacent chunk
//! through [`NeighborHandles`]; an unlinked border stays unmeshed and gets
//! rebuilt once the neighbor exists.

use bytemuck::{Pod, Zeroable};

use crate::block::{self, BlockType, Direction};
use crate::coords::{CHUNK_DIM, CHUNK_HEIGHT};
use crate::shared::Shared;

use super::Chunk;

/// One corner of a block face, laid out to match the vertex shader input.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// World-space position, w = 1.
    pub position: [f32; 4],
    /// Outward face normal, w = 0.
    pub normal: [f32; 4],
    /// Top-left texture coordinate of this corner's atlas cell.
    pub uv: [f32; 2],
}

/// Interleaved vertices plus a triangle-list index buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// Four vertices per emitted face.
    pub vertices: Vec<Vertex>,
    /// Two triangles per emitted face.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Whether no face has been emitted into this buffer.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn push_face(&mut self, corners: [Vertex; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Finished geometry for one chunk, ready to hand to the render backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// Geometry drawn in the first pass.
    pub opaque: MeshBuffers,
    /// Water, ice, and lava faces, drawn after the opaque pass.
    pub transparent: MeshBuffers,
}

impl ChunkMesh {
    /// Total quad count across both buffers.
    pub fn face_count(&self) -> usize {
        (self.opaque.vertices.len() + self.transparent.vertices.len()) / 4
    }

    /// Whether no face survived culling in either buffer.
    pub fn is_empty(&self) -> bool {
        self.opaque.vertices.is_empty() && self.transparent.vertices.is_empty()
    }
}

/// Snapshot of a chunk's linked horizontal neighbors, resolved from the
/// registry before the mesh task is handed to a worker. Indexed by
/// [`Direction::horizontal_index`].
#[derive(Clone, Default)]
pub struct NeighborHandles {
    handles: [Option<Shared<Chunk>>; 4],
}

impl NeighborHandles {
    /// Records the neighbor in the given horizontal direction; vertical
    /// directions are ignored.
    pub fn set(&mut self, direction: Direction, chunk: Shared<Chunk>) {
        if let Some(idx) = direction.horizontal_index() {
            self.handles[idx] = Some(chunk);
        }
    }

    fn get(&self, direction: Direction) -> Option<&Shared<Chunk>> {
        direction
            .horizontal_index()
            .and_then(|idx| self.handles[idx].as_ref())
    }
}

// Counter-clockwise corner positions per face, viewed from outside the
// block, in the same order as Direction::ALL.
const FACE_CORNERS: [[[i32; 3]; 4]; 6] = [
    [[1, 0, 1], [1, 0, 0], [1, 1, 0], [1, 1, 1]], // +x
    [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]], // -x
    [[0, 1, 1], [1, 1, 1], [1, 1, 0], [0, 1, 0]], // +y
    [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]], // -y
    [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]], // +z
    [[1, 0, 0], [0, 0, 0], [0, 1, 0], [1, 1, 0]], // -z
];

// Texture-cell offsets for the corners above, inset one atlas step.
const FACE_UVS: [[f32; 2]; 4] = [
    [0.0, 0.0],
    [block::ATLAS_STEP, 0.0],
    [block::ATLAS_STEP, block::ATLAS_STEP],
    [0.0, block::ATLAS_STEP],
];

impl Chunk {
    /// Builds this chunk's geometry from its current blocks.
    ///
    /// Pure with respect to the chunk: meshing never mutates block data, so
    /// rebuilding an unchanged chunk reproduces identical buffers.
    pub fn build_mesh(&self, neighbors: &NeighborHandles) -> ChunkMesh {
        let mut mesh = ChunkMesh::default();

        for z in 0..CHUNK_DIM {
            for y in 0..CHUNK_HEIGHT {
                for x in 0..CHUNK_DIM {
                    let block = self.block_unchecked(x, y, z);
                    if block.is_empty() {
                        continue;
                    }
                    for direction in Direction::ALL {
                        match self.face_neighbor(x, y, z, direction, neighbors) {
                            Some(other) if occludes(block, other) => {}
                            None => {}
                            Some(_) => self.emit_face(&mut mesh, block, x, y, z, direction),
                        }
                    }
                }
            }
        }

        mesh
    }

    // The block on the far side of a face, crossing into a linked neighbor
    // chunk at horizontal borders. `None` means the border is unlinked and
    // the face must not be emitted yet.
    fn face_neighbor(
        &self,
        x: i32,
        y: i32,
        z: i32,
        direction: Direction,
        neighbors: &NeighborHandles,
    ) -> Option<BlockType> {
        let offset = direction.offset();
        let (nx, ny, nz) = (x + offset.x, y + offset.y, z + offset.z);

        // The world has nothing above or below it; boundary faces always show.
        if ny < 0 || ny >= CHUNK_HEIGHT {
            return Some(BlockType::Empty);
        }
        if Self::in_bounds(nx, ny, nz) {
            return Some(self.block_unchecked(nx, ny, nz));
        }

        if self.neighbor(direction).is_none() {
            return None;
        }
        let handle = neighbors.get(direction)?;
        let wrapped_x = nx.rem_euclid(CHUNK_DIM);
        let wrapped_z = nz.rem_euclid(CHUNK_DIM);
        Some(handle.get().block_unchecked(wrapped_x, ny, wrapped_z))
    }

    fn emit_face(&self, mesh: &mut ChunkMesh, block: BlockType, x: i32, y: i32, z: i32, direction: Direction) {
        let normal = direction.offset();
        let uv_base = block::atlas_uv(block, direction);
        let corners = &FACE_CORNERS[direction as usize];

        let mut face = [Vertex::zeroed(); 4];
        for (vertex, (corner, uv)) in face.iter_mut().zip(corners.iter().zip(FACE_UVS)) {
            vertex.position = [
                (self.origin.x + x + corner[0]) as f32,
                (y + corner[1]) as f32,
                (self.origin.y + z + corner[2]) as f32,
                1.0,
            ];
            vertex.normal = [normal.x as f32, normal.y as f32, normal.z as f32, 0.0];
            vertex.uv = [uv_base[0] + uv[0], uv_base[1] + uv[1]];
        }

        if block.is_opaque() {
            mesh.opaque.push_face(face);
        } else {
            mesh.transparent.push_face(face);
        }
    }
}

// A face is hidden when its neighbor is opaque, or when both cells hold the
// same transparent block (no internal faces inside a body of water).
fn occludes(block: BlockType, other: BlockType) -> bool {
    if other.is_empty() {
        return false;
    }
    other.is_opaque() || other == block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::link_neighbors;
    use cgmath::Point2;

    fn keyed(chunk: Chunk) -> Shared<Chunk> {
        Shared::new(chunk)
    }

    #[test]
    fn lone_block_shows_all_six_faces() {
        let mut chunk = Chunk::new(Point2::new(0, 0));
        chunk.set_block_at(4, 100, 4, BlockType::Stone).unwrap();
        let mesh = chunk.build_mesh(&NeighborHandles::default());
        assert_eq!(mesh.opaque.vertices.len(), 24);
        assert_eq!(mesh.opaque.indices.len(), 36);
        assert!(mesh.transparent.is_empty());
    }

    #[test]
    fn buried_block_emits_nothing_extra() {
        let mut chunk = Chunk::new(Point2::new(0, 0));
        for z in 3..6 {
            for y in 99..102 {
                for x in 3..6 {
                    chunk.set_block_at(x, y, z, BlockType::Stone).unwrap();
                }
            }
        }
        let mesh = chunk.build_mesh(&NeighborHandles::default());
        // A 3x3x3 cube has the same outer surface as six 3x3 sides.
        assert_eq!(mesh.opaque.vertices.len() / 4, 6 * 9);
    }

    #[test]
    fn fully_surrounded_solid_chunk_keeps_only_world_caps() {
        let center = keyed(Chunk::solid(Point2::new(0, 0), BlockType::Stone));
        let mut handles = NeighborHandles::default();
        for direction in Direction::HORIZONTAL {
            let offset = direction.offset();
            let origin = Point2::new(offset.x * CHUNK_DIM, offset.z * CHUNK_DIM);
            let side = keyed(Chunk::solid(origin, BlockType::Stone));
            link_neighbors(&center, &side, direction);
            handles.set(direction, side);
        }

        let mesh = center.get().build_mesh(&handles);
        // 16x16 top at y = 255 plus 16x16 bottom at y = 0.
        assert_eq!(mesh.opaque.vertices.len() / 4, 512);
    }

    #[test]
    fn unlinked_border_faces_are_withheld() {
        let chunk = Chunk::solid(Point2::new(0, 0), BlockType::Stone);
        let mesh = chunk.build_mesh(&NeighborHandles::default());
        // With no neighbors linked, only the two world caps remain.
        assert_eq!(mesh.opaque.vertices.len() / 4, 512);
    }

    #[test]
    fn water_against_stone_splits_into_both_buffers() {
        let mut chunk = Chunk::new(Point2::new(0, 0));
        chunk.set_block_at(8, 100, 8, BlockType::Stone).unwrap();
        chunk.set_block_at(8, 101, 8, BlockType::Water).unwrap();
        let mesh = chunk.build_mesh(&NeighborHandles::default());
        // Stone keeps all six faces; its top shows through the water.
        assert_eq!(mesh.opaque.vertices.len() / 4, 6);
        // Water keeps five faces; the face against stone is occluded.
        assert_eq!(mesh.transparent.vertices.len() / 4, 5);
    }

    #[test]
    fn same_fluid_suppresses_internal_faces() {
        let mut chunk = Chunk::new(Point2::new(0, 0));
        chunk.set_block_at(8, 100, 8, BlockType::Water).unwrap();
        chunk.set_block_at(8, 101, 8, BlockType::Water).unwrap();
        let mesh = chunk.build_mesh(&NeighborHandles::default());
        // A 1x2x1 column of water: ten outer faces, no seam between cells.
        assert_eq!(mesh.transparent.vertices.len() / 4, 10);
    }

    #[test]
    fn remeshing_an_unchanged_chunk_is_reproducible() {
        let chunk = Chunk::checkerboard(Point2::new(-16, 48), BlockType::Stone);
        let first = chunk.build_mesh(&NeighborHandles::default());
        let second = chunk.build_mesh(&NeighborHandles::default());
        assert_eq!(first, second);
    }

    #[test]
    fn linked_neighbor_occludes_the_shared_border() {
        let west = keyed(Chunk::solid(Point2::new(0, 0), BlockType::Stone));
        let east = keyed(Chunk::solid(Point2::new(CHUNK_DIM, 0), BlockType::Stone));
        link_neighbors(&west, &east, Direction::XPos);

        let mut handles = NeighborHandles::default();
        handles.set(Direction::XPos, east);

        let open = west.get().build_mesh(&NeighborHandles::default());
        let linked = west.get().build_mesh(&handles);
        assert_eq!(open.face_count(), linked.face_count());
    }
}
