//! Composite biome fields built from the primitives in the parent module.
//!
//! Each height profile maps a 2D world coordinate to a column height in
//! blocks. The magic constants define each biome's vertical range and were
//! tuned empirically; they are preserved as-is for world compatibility and
//! should not be reinterpreted.

use cgmath::Vector2;

use super::{fbm, fractal_perlin, perlin2, ridged_perlin, smooth_mix, smoothstep, worley2};

fn step(e: f32, x: f32) -> f32 {
    if x < e {
        0.0
    } else {
        1.0
    }
}

fn rotate(v: Vector2<f32>, radians: f32) -> Vector2<f32> {
    let (sin, cos) = radians.sin_cos();
    Vector2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Desert dunes and mesas; roughly 133..183.
pub fn desert_value(uv: Vector2<f32>) -> f32 {
    let uv = uv / 256.0;
    let x = fractal_perlin(uv, 4);
    let height = (0.05 * (1.0 - (4.0 * (x - 0.42)).powi(2))).max(0.0)
        + smoothstep(0.05, 0.2, x)
            * (((0.4 - x * x) * 0.2).max(0.0)
                + (step(x, 0.69)
                    + step(0.69, x)
                        * ((x * 100.0).floor().rem_euclid(2.0).abs() * 0.1 + 0.9)
                        * step(x, 0.8)
                    + 1.0
                    - step(x, 0.8))
                    * ((smoothstep(0.0, 0.9, smoothstep(0.0, 1.0, x)).powi(100) + x * 0.1)
                        / 1.1));
    (1.0 - height) * 50.0 + 133.0
}

/// Ridged alpine terrain; roughly 150..255.
pub fn mountain_value(uv: Vector2<f32>) -> f32 {
    let perlin = ridged_perlin(uv / 128.0, 6);
    perlin.powi(3) * 105.0 + 150.0
}

/// Rolling grassland with Worley plateaus; roughly 118..150.
pub fn grassland_value(uv: Vector2<f32>) -> f32 {
    let uv = uv / 256.0;
    let (raw, cell_height) = worley2(uv * 4.0);
    let mut worley = (raw - 0.1).max(0.0);
    worley = smooth_mix(0.0, 1.0, worley);
    worley *= cell_height;

    let fbm_noise = fractal_perlin(uv, 8);

    (worley * 0.33 + fbm_noise * 0.67) * 32.0 + 118.0
}

/// Scattered island mounds; roughly 100..145.
pub fn island_value(uv: Vector2<f32>) -> f32 {
    let uv = uv / 128.0;
    let (raw, _cell_height) = worley2(uv + Vector2::new(128.0, 256.0));
    let noise = 0.67 * raw + fbm(uv, 4) * 0.33;
    smoothstep(0.0, 1.0, noise) * 45.0 + 100.0
}

/// Domain-warped ridge field; near zero along river channels.
pub fn river_noise(uv: Vector2<f32>) -> f32 {
    let warp = Vector2::new(
        perlin2(uv * 2.0),
        perlin2(uv * 2.0 + Vector2::new(123.456, -789.101112)),
    );
    perlin2(uv + warp).abs()
}

/// The (elevation, moisture) blending pair: two fBm fields clamped to
/// [0, 1] with opposite biases, so elevation skews low and moisture skews
/// high.
pub fn elevation_moisture(uv: Vector2<f32>) -> (f32, f32) {
    let elevation = (fbm(uv, 3) - 0.2).clamp(0.0, 1.0);
    let moisture = (fbm(uv + Vector2::new(-1000.0, 1024.0), 3) + 0.3).clamp(0.0, 1.0);
    (elevation, moisture)
}

/// Large-scale humidity field in [-1, 1], sampled on rotated coordinates so
/// it decorrelates from the height fields.
pub fn moisture(uv: Vector2<f32>) -> f32 {
    perlin2(rotate(uv / 512.0, 0.61))
}

/// Large-scale temperature field in [-1, 1], independently rotated and
/// offset from [`moisture`].
pub fn temperature(uv: Vector2<f32>) -> f32 {
    perlin2(rotate(uv / 512.0 + Vector2::new(-578.0, 1024.0), -1.07))
}
