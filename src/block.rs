//! # Block Module
//!
//! Block taxonomy for the voxel world: the 8-bit [`BlockType`] tag, the
//! classification predicates the mesher and the grid march rely on, the six
//! axis-aligned [`Direction`]s, and the per-type per-face texture atlas
//! table.
//!
//! A block is fully owned by value; there is no identity beyond the tag, and
//! a chunk's storage is nothing more than 65,536 of these tags in a row.

use cgmath::Vector3;
use num_derive::FromPrimitive;

/// The integer type a [`BlockType`] is stored as inside a chunk.
pub type BlockRepr = u8;

/// Every kind of block the world can contain.
///
/// The `FromPrimitive` derive allows converting the stored [`BlockRepr`] back
/// to the enum without a hand-written match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// Air. The default content of every freshly instantiated chunk.
    Empty,
    /// Grass-topped soil.
    Grass,
    /// Plain dirt.
    Dirt,
    /// Stone, the bulk of the underground.
    Stone,
    /// Desert sand.
    Sand,
    /// Still water. Translucent and traversable.
    Water,
    /// Sheet ice. Translucent but solid to the grid march.
    Ice,
    /// Lava. Rendered translucent on purpose so pools are visible before the
    /// player walks into them.
    Lava,
    /// Snow cover on high terrain.
    Snow,
    /// The indestructible world floor at y = 0.
    Bedrock,
    /// Decorative metal used by the logo stamp.
    Bronze,
    /// Debug marker block; shows up magenta in any sane atlas.
    Debug,
}

impl BlockType {
    /// Recovers a block type from its stored representation.
    ///
    /// Returns `None` for byte values no variant maps to, which can only
    /// happen on corrupted data.
    pub fn from_repr(value: BlockRepr) -> Option<Self> {
        num::FromPrimitive::from_u8(value)
    }

    /// Whether this block occludes the faces of its neighbors.
    ///
    /// Empty space and the three translucent types (water, ice, lava) do not;
    /// everything else does.
    pub fn is_opaque(self) -> bool {
        !matches!(
            self,
            BlockType::Empty | BlockType::Water | BlockType::Ice | BlockType::Lava
        )
    }

    /// Whether this block is a fluid the targeting ray passes through.
    pub fn is_fluid(self) -> bool {
        matches!(self, BlockType::Water | BlockType::Lava)
    }

    /// Whether this block is air.
    pub fn is_empty(self) -> bool {
        self == BlockType::Empty
    }
}

/// The six axis-aligned directions, used both for chunk neighbor links
/// (horizontal only) and for face emission during meshing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward +x (east).
    XPos,
    /// Toward -x (west).
    XNeg,
    /// Toward +y (up).
    YPos,
    /// Toward -y (down).
    YNeg,
    /// Toward +z (north).
    ZPos,
    /// Toward -z (south).
    ZNeg,
}

impl Direction {
    /// All six directions, in the order the atlas table is indexed.
    pub const ALL: [Direction; 6] = [
        Direction::XPos,
        Direction::XNeg,
        Direction::YPos,
        Direction::YNeg,
        Direction::ZPos,
        Direction::ZNeg,
    ];

    /// The four horizontal directions a chunk keeps neighbor links for.
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::XPos,
        Direction::XNeg,
        Direction::ZPos,
        Direction::ZNeg,
    ];

    /// The direction pointing the opposite way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::XPos => Direction::XNeg,
            Direction::XNeg => Direction::XPos,
            Direction::YPos => Direction::YNeg,
            Direction::YNeg => Direction::YPos,
            Direction::ZPos => Direction::ZNeg,
            Direction::ZNeg => Direction::ZPos,
        }
    }

    /// Unit offset to the neighboring cell in this direction.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            Direction::XPos => Vector3::new(1, 0, 0),
            Direction::XNeg => Vector3::new(-1, 0, 0),
            Direction::YPos => Vector3::new(0, 1, 0),
            Direction::YNeg => Vector3::new(0, -1, 0),
            Direction::ZPos => Vector3::new(0, 0, 1),
            Direction::ZNeg => Vector3::new(0, 0, -1),
        }
    }

    /// Index into a chunk's 4-entry neighbor array, or `None` for the
    /// vertical directions.
    pub fn horizontal_index(self) -> Option<usize> {
        match self {
            Direction::XPos => Some(0),
            Direction::XNeg => Some(1),
            Direction::ZPos => Some(2),
            Direction::ZNeg => Some(3),
            Direction::YPos | Direction::YNeg => None,
        }
    }

    fn atlas_index(self) -> usize {
        match self {
            Direction::XPos => 0,
            Direction::XNeg => 1,
            Direction::YPos => 2,
            Direction::YNeg => 3,
            Direction::ZPos => 4,
            Direction::ZNeg => 5,
        }
    }
}

/// Side length of one atlas cell in UV space (a 32x32 grid).
pub const ATLAS_STEP: f32 = 0.03125;

// Lower-left atlas corner per block type per face, indexed
// [type][XPos, XNeg, YPos, YNeg, ZPos, ZNeg]. Grass is the only type with
// per-face cells (sides, top, dirt underside).
static ATLAS_UV: [[[f32; 2]; 6]; 12] = [
    [[0.0, 0.0]; 6],     // Empty, never emitted
    [
        [0.03125, 0.0],
        [0.03125, 0.0],
        [0.0625, 0.0],
        [0.09375, 0.0],
        [0.03125, 0.0],
        [0.03125, 0.0],
    ],                   // Grass
    [[0.09375, 0.0]; 6], // Dirt
    [[0.125, 0.0]; 6],   // Stone
    [[0.15625, 0.0]; 6], // Sand
    [[0.1875, 0.0]; 6],  // Water
    [[0.21875, 0.0]; 6], // Ice
    [[0.25, 0.0]; 6],    // Lava
    [[0.28125, 0.0]; 6], // Snow
    [[0.3125, 0.0]; 6],  // Bedrock
    [[0.34375, 0.0]; 6], // Bronze
    [[0.375, 0.0]; 6],   // Debug
];

/// The lower-left UV corner of the atlas cell for one face of a block type.
pub fn atlas_uv(block: BlockType, direction: Direction) -> [f32; 2] {
    ATLAS_UV[block as usize][direction.atlas_index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repr_round_trips_every_variant() {
        for repr in 0..12u8 {
            let block = BlockType::from_repr(repr).unwrap();
            assert_eq!(block as BlockRepr, repr);
        }
        assert_eq!(BlockType::from_repr(200), None);
    }

    #[test]
    fn translucent_types_are_not_opaque() {
        assert!(!BlockType::Empty.is_opaque());
        assert!(!BlockType::Water.is_opaque());
        assert!(!BlockType::Ice.is_opaque());
        assert!(!BlockType::Lava.is_opaque());
        assert!(BlockType::Stone.is_opaque());
        assert!(BlockType::Snow.is_opaque());
    }

    #[test]
    fn fluids_exclude_ice() {
        assert!(BlockType::Water.is_fluid());
        assert!(BlockType::Lava.is_fluid());
        assert!(!BlockType::Ice.is_fluid());
    }

    #[test]
    fn opposites_are_involutions() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.offset() + dir.opposite().offset(), Vector3::new(0, 0, 0));
        }
    }

    #[test]
    fn horizontal_indices_are_distinct() {
        let mut seen = [false; 4];
        for dir in Direction::HORIZONTAL {
            let idx = dir.horizontal_index().unwrap();
            assert!(!seen[idx]);
            seen[idx] = true;
        }
        assert!(Direction::YPos.horizontal_index().is_none());
    }

    #[test]
    fn grass_uses_distinct_top_and_bottom_cells() {
        let side = atlas_uv(BlockType::Grass, Direction::XPos);
        let top = atlas_uv(BlockType::Grass, Direction::YPos);
        let bottom = atlas_uv(BlockType::Grass, Direction::YNeg);
        assert_ne!(side, top);
        assert_ne!(top, bottom);
        assert_eq!(bottom, atlas_uv(BlockType::Dirt, Direction::YNeg));
    }
}
