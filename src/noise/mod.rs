//! # Noise Library
//!
//! Pure, stateless noise primitives. Every function here is a deterministic
//! map from a coordinate to a value; there is no seed object and no global
//! random state, so resampling the same coordinate always returns the same
//! bits. Terrain regeneration depends on that for correctness, not just
//! reproducibility: a torn-down zone must refill to the identical world.
//!
//! The hashes are the classic fract-sin-dot constructions; their magic
//! constants are part of the world-format contract and must not be "cleaned
//! up".

use cgmath::{InnerSpace, Vector2, Vector3};

pub mod biome;

fn fract(x: f32) -> f32 {
    x - x.floor()
}

fn fract2(v: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(fract(v.x), fract(v.y))
}

fn floor2(v: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(v.x.floor(), v.y.floor())
}

/// Hashes a 2D point to a scalar in [0, 1).
pub fn random1(p: Vector2<f32>) -> f32 {
    fract(p.dot(Vector2::new(420.6, 631.2)).sin() * 43758.5453)
}

/// Hashes a 2D point to a 2D vector with components in [0, 1).
pub fn random2(p: Vector2<f32>) -> Vector2<f32> {
    let s = Vector2::new(
        p.dot(Vector2::new(127.1, 311.7)).sin(),
        p.dot(Vector2::new(269.5, 183.3)).sin(),
    );
    fract2(s * 43758.5453)
}

/// Hashes a 3D point to a 3D vector with components in [0, 1).
pub fn random3(p: Vector3<f32>) -> Vector3<f32> {
    let a = p.dot(Vector3::new(127.1, 311.7, 420.69)).sin();
    let b = p.dot(Vector3::new(269.5, 183.3, 632.897)).sin();
    let c = (p - Vector3::new(5.555, 10.95645, 70.266))
        .dot(Vector3::new(765.54, 631.2, 109.21))
        .sin();
    Vector3::new(
        fract(a * 43758.5453),
        fract(b * 43758.5453),
        fract(c * 43758.5453),
    )
}

// Quintic smootherstep falloff: 1 - 6t^5 + 15t^4 - 10t^3.
fn quintic(t: f32) -> f32 {
    1.0 - 6.0 * t.powi(5) + 15.0 * t.powi(4) - 10.0 * t.powi(3)
}

fn surflet2(p: Vector2<f32>, grid_point: Vector2<f32>) -> f32 {
    let t_x = quintic((p.x - grid_point.x).abs());
    let t_y = quintic((p.y - grid_point.y).abs());
    let gradient = random2(grid_point);
    let diff = p - grid_point;
    diff.dot(gradient) * t_x * t_y
}

/// Gradient (Perlin-style) noise over a 2D point; sums the surflets of the
/// four surrounding lattice points. Output is roughly in [-1, 1].
pub fn perlin2(p: Vector2<f32>) -> f32 {
    let ll = floor2(p);
    surflet2(p, ll)
        + surflet2(p, ll + Vector2::new(1.0, 0.0))
        + surflet2(p, ll + Vector2::new(1.0, 1.0))
        + surflet2(p, ll + Vector2::new(0.0, 1.0))
}

fn surflet3(p: Vector3<f32>, grid_point: Vector3<f32>) -> f32 {
    let t_x = quintic((p.x - grid_point.x).abs());
    let t_y = quintic((p.y - grid_point.y).abs());
    let t_z = quintic((p.z - grid_point.z).abs());
    let gradient = random3(grid_point);
    let diff = p - grid_point;
    diff.dot(gradient) * t_x * t_y * t_z
}

/// Gradient noise over a 3D point; sums the surflets of the eight
/// surrounding lattice points. Drives the underground cave field.
pub fn perlin3(p: Vector3<f32>) -> f32 {
    let base = Vector3::new(p.x.floor(), p.y.floor(), p.z.floor());
    let mut sum = 0.0;
    for x in 0..=1 {
        for y in 0..=1 {
            for z in 0..=1 {
                sum += surflet3(p, base + Vector3::new(x as f32, y as f32, z as f32));
            }
        }
    }
    sum
}

/// Cubic-eased interpolation between `a` and `b`.
pub fn smooth_mix(a: f32, b: f32, t: f32) -> f32 {
    let t = t * t * (3.0 - 2.0 * t);
    a + (b - a) * t
}

/// Hermite threshold ramp: 0 below `edge0`, 1 above `edge1`, smooth between.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Value noise: hashes the four lattice corners to scalars in [0, 1) and
/// smooth-interpolates between them.
pub fn bilerp_noise(uv: Vector2<f32>) -> f32 {
    let uv_fract = fract2(uv);
    let base = floor2(uv);
    let ll = random1(base);
    let lr = random1(base + Vector2::new(1.0, 0.0));
    let ul = random1(base + Vector2::new(0.0, 1.0));
    let ur = random1(base + Vector2::new(1.0, 1.0));

    let lerp_lower = smooth_mix(ll, lr, uv_fract.x);
    let lerp_upper = smooth_mix(ul, ur, uv_fract.x);
    smooth_mix(lerp_lower, lerp_upper, uv_fract.y)
}

/// Fractal sum of [`bilerp_noise`]: `octaves` layers at doubling frequency
/// and halving amplitude, starting at frequency 4 and amplitude 0.5.
pub fn fbm(uv: Vector2<f32>, octaves: u32) -> f32 {
    let mut amp = 0.5;
    let mut freq = 4.0;
    let mut sum = 0.0;
    for _ in 0..octaves {
        sum += bilerp_noise(uv * freq) * amp;
        amp *= 0.5;
        freq *= 2.0;
    }
    sum
}

/// Fractal sum of inverted-absolute Perlin octaves; reads as rolling hills.
pub fn fractal_perlin(uv: Vector2<f32>, octaves: u32) -> f32 {
    let mut amp = 0.5;
    let mut freq = 4.0;
    let mut sum = 0.0;
    for _ in 0..octaves {
        sum += (1.0 - perlin2(uv * freq).abs()) * amp;
        amp *= 0.5;
        freq *= 2.0;
    }
    sum
}

/// Normalized ridged fractal: each octave inverts the absolute base noise
/// and is additionally multiplied by the previous octave's value, which
/// sharpens ridgelines. Output is normalized to [0, 1]; used for mountains.
pub fn ridged_perlin(uv: Vector2<f32>, octaves: u32) -> f32 {
    let mut amp = 0.5;
    let mut freq = 1.0;
    let mut sum = 0.0;
    let mut max_sum = 0.0;
    let mut prev = 1.0;
    for _ in 0..octaves {
        max_sum += amp;
        let mut noise = 1.0 - perlin2(uv * freq).abs();
        noise *= prev;
        prev = noise;
        sum += noise * amp;
        amp *= 0.5;
        freq *= 2.0;
    }
    sum / max_sum
}

/// Two-point cellular (Worley) noise.
///
/// Places one hashed point per integer cell in the 3x3 neighborhood of `uv`,
/// jittered by a noise-driven angular offset, and tracks the two nearest
/// squared distances. Returns `(second_nearest - nearest, cell_height)`
/// where `cell_height` is a hash of the nearest cell's interior point
/// remapped to [0.5, 1), usable as a per-cell plateau height.
pub fn worley2(uv: Vector2<f32>) -> (f32, f32) {
    let uv_int = floor2(uv);
    let mut uv_fract = fract2(uv);
    let angle = perlin2(uv * 2.0) * std::f32::consts::PI;
    uv_fract += Vector2::new(angle.cos(), angle.sin()) * 0.25;

    let mut min_dist1 = 1.0f32;
    let mut min_dist2 = 1.0f32;
    let mut cell_height = 1.0f32;

    for y in -1..=1 {
        for x in -1..=1 {
            let neighbor = Vector2::new(x as f32, y as f32);
            let point = random2(uv_int + neighbor);
            let diff = neighbor + point - uv_fract;
            let dist = diff.x * diff.x + diff.y * diff.y;
            if dist < min_dist1 {
                cell_height = random2(point).x;
                min_dist2 = min_dist1;
                min_dist1 = dist;
            } else if dist < min_dist2 {
                min_dist2 = dist;
            }
        }
    }

    (min_dist2 - min_dist1, 0.5 * cell_height + 0.5)
}
