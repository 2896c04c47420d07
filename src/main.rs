//! # Headless Soak Runner
//!
//! Drives the streaming core without a renderer: waits for the initial load
//! around spawn, then walks the player east across several zone borders so
//! expansion, teardown, and re-entry all get exercised. Progress is logged;
//! tune verbosity with `RUST_LOG`.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

use std::thread;
use std::time::{Duration, Instant};

use cgmath::Point3;
use log::info;

use voxel_world::{NullBackend, Terrain};

// Simulated frame length and walk speed.
const DT: f32 = 0.05;
const WALK_SPEED: f32 = 8.0;

fn main() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let mut terrain = Terrain::new(Box::new(NullBackend));
    let mut position = Point3::new(8.0, 180.0, 8.0);

    let start = Instant::now();
    while !terrain.initial_load_complete() {
        terrain.tick(DT, position);
        thread::sleep(Duration::from_millis(5));
    }
    info!(
        "initial load: {} chunks committed in {:.2?} ({} instantiated)",
        terrain.committed_chunks(),
        start.elapsed(),
        terrain.chunk_count()
    );

    // Walk east far enough to cross several zone borders, then turn around
    // and come home so re-entry meshing runs too.
    let out_and_back = [WALK_SPEED, -WALK_SPEED];
    for leg_speed in out_and_back {
        for _ in 0..1200 {
            position.x += leg_speed * DT;
            terrain.tick(DT, position);
        }
        info!(
            "at x = {:.0}: {} chunks resident, {} meshes committed",
            position.x,
            terrain.chunk_count(),
            terrain.committed_chunks()
        );
    }

    // Let in-flight workers finish reporting before reading final numbers.
    for _ in 0..100 {
        terrain.tick(DT, position);
        thread::sleep(Duration::from_millis(5));
    }
    info!(
        "soak done in {:.2?}: {} chunks resident, {} meshes committed",
        start.elapsed(),
        terrain.chunk_count(),
        terrain.committed_chunks()
    );
}
