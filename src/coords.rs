//! # Coordinate Utilities
//!
//! World coordinates, chunk origins and generation-zone origins all live on
//! the same x-z integer grid; this module holds the pure helpers that move
//! between them, along with the 64-bit key packing used by every map in the
//! registry.
//!
//! The packing stores the signed 32-bit X coordinate in the upper half of an
//! `i64` and the signed 32-bit Z coordinate in the lower half. Sign extension
//! on decode is the easy thing to get wrong, which is why the arithmetic is
//! confined to this module and round-trip tested.

use cgmath::Point3;

/// Horizontal dimension of a chunk, in blocks.
pub const CHUNK_DIM: i32 = 16;
/// Vertical dimension of a chunk, in blocks.
pub const CHUNK_HEIGHT: i32 = 256;
/// Horizontal dimension of a generation zone, in blocks (4x4 chunks).
pub const ZONE_DIM: i32 = 64;

/// Packs a world-space (x, z) pair into a single map key.
///
/// X occupies the upper 32 bits and Z the lower 32 bits.
pub fn to_key(x: i32, z: i32) -> i64 {
    ((x as i64) << 32) | ((z as i64) & 0xffff_ffff)
}

/// Recovers the (x, z) pair packed by [`to_key`], sign-extending both halves.
pub fn to_coords(key: i64) -> (i32, i32) {
    ((key >> 32) as i32, key as i32)
}

/// Maps a world-space block coordinate to the origin of the chunk containing
/// it (the nearest multiple of 16 at or below it on both axes).
pub fn chunk_origin(x: i32, z: i32) -> (i32, i32) {
    (x.div_euclid(CHUNK_DIM) * CHUNK_DIM, z.div_euclid(CHUNK_DIM) * CHUNK_DIM)
}

/// Maps a world-space block coordinate to the origin of the 64x64 generation
/// zone containing it.
pub fn zone_origin(x: i32, z: i32) -> (i32, i32) {
    (x.div_euclid(ZONE_DIM) * ZONE_DIM, z.div_euclid(ZONE_DIM) * ZONE_DIM)
}

/// Zone origin for a continuous position, e.g. the player's feet.
pub fn zone_origin_of(pos: Point3<f32>) -> (i32, i32) {
    zone_origin(pos.x.floor() as i32, pos.z.floor() as i32)
}

/// The chunk origins making up one generation zone, in row-major order.
pub fn zone_chunk_origins(zone: (i32, i32)) -> Vec<(i32, i32)> {
    let mut origins = Vec::with_capacity(16);
    for x in (zone.0..zone.0 + ZONE_DIM).step_by(CHUNK_DIM as usize) {
        for z in (zone.1..zone.1 + ZONE_DIM).step_by(CHUNK_DIM as usize) {
            origins.push((x, z));
        }
    }
    origins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips_fixed_values() {
        for &(x, z) in &[
            (0, 0),
            (16, -16),
            (-64, 64),
            (i32::MAX, i32::MIN),
            (i32::MIN, i32::MAX),
            (-1, -1),
        ] {
            assert_eq!(to_coords(to_key(x, z)), (x, z));
        }
    }

    #[test]
    fn key_round_trips_random_values() {
        for _ in 0..10_000 {
            let x = fastrand::i32(..);
            let z = fastrand::i32(..);
            assert_eq!(to_coords(to_key(x, z)), (x, z));
        }
    }

    #[test]
    fn negative_z_does_not_leak_into_x() {
        let key = to_key(32, -1);
        assert_eq!(to_coords(key), (32, -1));
        let key = to_key(-1, 32);
        assert_eq!(to_coords(key), (-1, 32));
    }

    #[test]
    fn origins_floor_toward_negative_infinity() {
        assert_eq!(chunk_origin(-1, -1), (-16, -16));
        assert_eq!(chunk_origin(15, 17), (0, 16));
        assert_eq!(zone_origin(-1, 63), (-64, 0));
        assert_eq!(zone_origin(64, -65), (64, -128));
    }

    #[test]
    fn zone_contains_sixteen_chunks() {
        let origins = zone_chunk_origins((0, 0));
        assert_eq!(origins.len(), 16);
        assert!(origins.contains(&(0, 0)));
        assert!(origins.contains(&(48, 48)));
        assert!(!origins.contains(&(64, 0)));
    }
}
