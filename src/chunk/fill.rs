//! Procedural block fill.
//!
//! Fills all 65,536 blocks of a chunk from its world origin, one 1x256
//! column at a time: a bedrock floor, a cave band carved by 3D gradient
//! noise (with lava pooling near the bottom), and a surface band whose
//! shape and palette depend on two climate booleans derived from rotated
//! noise fields.
//!
//! Every constant below is part of the world-format contract: the same
//! origin always fills to the same blocks.

use cgmath::{Vector2, Vector3};

use crate::block::BlockType;
use crate::coords::{CHUNK_DIM, CHUNK_HEIGHT};
use crate::noise::{self, biome};

use super::Chunk;

/// Water surface height; wet-cold basins fill up to here.
pub const SEA_LEVEL: i32 = 138;
/// Top of the cave band; the biome surface starts here.
pub const CAVE_CEILING: i32 = 96;
/// Cave voids below this height fill with lava instead of air.
pub const LAVA_CEILING: i32 = 25;

// Per-axis frequency of the 3D cave field.
const CAVE_FREQUENCY: f32 = 1.0 / 32.0;

// Climate booleans: the raw field is remapped from [-1, 1] to [0, 1],
// eased through this band, and compared against the threshold.
const CLIMATE_BAND_LO: f32 = 0.4;
const CLIMATE_BAND_HI: f32 = 0.75;
const CLIMATE_THRESHOLD: f32 = 0.3;

// Chance that a chunk gets a logo stamped on its center column.
const LOGO_CHANCE: f32 = 0.02;

/// How a chunk's blocks get populated.
///
/// `Biome` is the real terrain; `Flat` is a cheap slab used by tests and the
/// soak binary where the streaming machinery, not the terrain, is under
/// observation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Generator {
    /// Full noise-driven terrain.
    #[default]
    Biome,
    /// Bedrock, stone to y = 100, grass cap at y = 101.
    Flat,
}

// Surface strategy per (wet, warm) climate combination.
#[derive(Copy, Clone, PartialEq, Eq)]
enum ColumnKind {
    Alpine,  // wet + warm
    Wetland, // wet + cold
    Glacier, // dry + cold
    Desert,  // dry + warm
}

impl Chunk {
    /// Populates every block of the chunk from its world origin.
    ///
    /// Runs on a fill worker; the chunk is not visible to the mesher until
    /// the worker reports completion.
    pub fn fill(&mut self, generator: Generator) {
        match generator {
            Generator::Biome => self.fill_biome(),
            Generator::Flat => self.fill_flat(),
        }
        self.filled = true;
    }

    fn fill_flat(&mut self) {
        for z in 0..CHUNK_DIM {
            for x in 0..CHUNK_DIM {
                self.blocks[Self::index(x, 0, z)] = BlockType::Bedrock;
                for y in 1..=100 {
                    self.blocks[Self::index(x, y, z)] = BlockType::Stone;
                }
                self.blocks[Self::index(x, 101, z)] = BlockType::Grass;
            }
        }
    }

    fn fill_biome(&mut self) {
        let mut kind_counts = [0u16; 4];

        for z in 0..CHUNK_DIM {
            for x in 0..CHUNK_DIM {
                let wx = (self.origin.x + x) as f32;
                let wz = (self.origin.y + z) as f32;
                let uv = Vector2::new(wx, wz);

                self.blocks[Self::index(x, 0, z)] = BlockType::Bedrock;
                self.carve_caves(x, z, wx, wz);

                let kind = column_kind(uv);
                kind_counts[kind as usize] += 1;
                let height = column_height(kind, uv)
                    .round()
                    .clamp(CAVE_CEILING as f32, (CHUNK_HEIGHT - 1) as f32)
                    as i32;
                self.fill_surface(x, z, kind, height);
            }
        }

        self.maybe_stamp_logo(&kind_counts);
    }

    fn carve_caves(&mut self, x: i32, z: i32, wx: f32, wz: f32) {
        for y in 1..CAVE_CEILING {
            let sample = Vector3::new(wx, y as f32, wz) * CAVE_FREQUENCY;
            let block = if noise::perlin3(sample) >= 0.0 {
                BlockType::Stone
            } else if y < LAVA_CEILING {
                BlockType::Lava
            } else {
                continue;
            };
            self.blocks[Self::index(x, y, z)] = block;
        }
    }

    fn fill_surface(&mut self, x: i32, z: i32, kind: ColumnKind, height: i32) {
        match kind {
            ColumnKind::Alpine => {
                let upper = if height > 180 {
                    BlockType::Snow
                } else {
                    BlockType::Dirt
                };
                for y in CAVE_CEILING..=height {
                    self.blocks[Self::index(x, y, z)] =
                        if y <= 128 { BlockType::Stone } else { upper };
                }
                if upper == BlockType::Dirt {
                    self.blocks[Self::index(x, height, z)] = BlockType::Grass;
                }
            }
            ColumnKind::Wetland => {
                if height <= SEA_LEVEL {
                    for y in CAVE_CEILING..=height {
                        self.blocks[Self::index(x, y, z)] = BlockType::Stone;
                    }
                    for y in height + 1..SEA_LEVEL {
                        self.blocks[Self::index(x, y, z)] = BlockType::Water;
                    }
                    self.blocks[Self::index(x, SEA_LEVEL, z)] = BlockType::Ice;
                } else {
                    for y in CAVE_CEILING..height {
                        self.blocks[Self::index(x, y, z)] = BlockType::Stone;
                    }
                    self.blocks[Self::index(x, height, z)] = BlockType::Grass;
                }
            }
            ColumnKind::Glacier => {
                for y in CAVE_CEILING..=height {
                    self.blocks[Self::index(x, y, z)] = BlockType::Ice;
                }
            }
            ColumnKind::Desert => {
                for y in CAVE_CEILING..=height {
                    self.blocks[Self::index(x, y, z)] = BlockType::Sand;
                }
            }
        }
    }

    // Cosmetic easter egg: roughly one chunk in fifty stamps a small
    // pixel-art logo above its center column, reproducibly per origin.
    fn maybe_stamp_logo(&mut self, kind_counts: &[u16; 4]) {
        let origin_uv = Vector2::new(self.origin.x as f32, self.origin.y as f32);
        if noise::random1(origin_uv / 16.0) >= LOGO_CHANCE {
            return;
        }

        let logo: &[(i32, i32)] = if noise::random1(origin_uv / 64.0) < 0.5 {
            LOGO_PEAK
        } else {
            LOGO_WAVE
        };

        let dominant = kind_counts
            .iter()
            .enumerate()
            .max_by_key(|(_, count)| **count)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let palette = match dominant {
            0 | 1 => BlockType::Bronze, // alpine / wetland
            _ => BlockType::Debug,      // glacier / desert
        };

        let cx = CHUNK_DIM / 2;
        let cz = CHUNK_DIM / 2;
        let top = (1..CHUNK_HEIGHT)
            .rev()
            .find(|&y| !self.blocks[Self::index(cx, y, cz)].is_empty())
            .unwrap_or(0);

        for &(dx, dy) in logo {
            let (x, y) = (cx + dx, top + 1 + dy);
            if Self::in_bounds(x, y, cz) {
                self.blocks[Self::index(x, y, cz)] = palette;
            }
        }
    }
}

// Vertical pixel art, drawn in the x-y plane as (dx, dy) offsets from one
// block above the center column's summit.
const LOGO_PEAK: &[(i32, i32)] = &[
    (-2, 0),
    (-1, 1),
    (0, 2),
    (0, 3),
    (1, 1),
    (2, 0),
];
const LOGO_WAVE: &[(i32, i32)] = &[
    (-2, 1),
    (-2, 2),
    (-1, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (2, 1),
    (2, 2),
];

fn column_kind(uv: Vector2<f32>) -> ColumnKind {
    let wet = climate_flag(biome::moisture(uv));
    let warm = climate_flag(biome::temperature(uv));
    match (wet, warm) {
        (true, true) => ColumnKind::Alpine,
        (true, false) => ColumnKind::Wetland,
        (false, false) => ColumnKind::Glacier,
        (false, true) => ColumnKind::Desert,
    }
}

fn climate_flag(raw: f32) -> bool {
    let remapped = raw * 0.5 + 0.5;
    noise::smoothstep(CLIMATE_BAND_LO, CLIMATE_BAND_HI, remapped) > CLIMATE_THRESHOLD
}

fn column_height(kind: ColumnKind, uv: Vector2<f32>) -> f32 {
    match kind {
        ColumnKind::Alpine | ColumnKind::Wetland => {
            let (elevation, moisture) = biome::elevation_moisture(uv / 256.0);
            let blend = noise::smoothstep(0.4, 0.6, elevation + 0.25 * (0.5 - moisture));
            let grass = biome::grassland_value(uv);
            let mountain = biome::mountain_value(uv);
            grass + (mountain - grass) * blend
        }
        ColumnKind::Glacier => biome::island_value(uv),
        ColumnKind::Desert => biome::desert_value(uv),
    }
}
