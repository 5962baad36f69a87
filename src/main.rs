//! # Voxel Terrain Entry Point
//!
//! Headless driver: generates one world and logs the instance batches.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

fn main() {
    voxel_terrain::run();
}
