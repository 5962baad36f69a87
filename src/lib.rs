#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! Generates a bounded voxel world from procedural noise and works out which
//! voxels are visible, producing one instance-transform batch per block type
//! for an instancing renderer.
//!
//! ## Key Modules
//!
//! * `voxels` - Block types, the block catalog, the voxel grid and the world that owns it
//! * `generation` - Seeded randomness, the noise seam, and the resource and terrain passes
//! * `rendering` - Exposure culling and the instance batches handed to a renderer
//! * `settings` - The parameter surface that edits a shared world and triggers regeneration
//! * `config` - JSON configuration loading
//!
//! ## Pipeline
//!
//! Every generation rebuilds the whole world:
//! resources → terrain → visibility → instance batches.
//!
//! ## Usage
//!
//! ```rust
//! use voxel_terrain::{BlockCatalog, World, WorldSize};
//!
//! let mut world = World::new(WorldSize { width: 32, height: 16 });
//! let batches = world.generate(&BlockCatalog::default()).expect("valid configuration");
//! for batch in batches.iter() {
//!     println!("{}: {} instances", batch.name(), batch.len());
//! }
//! ```

use log::{error, info};

pub mod config;
pub mod core;
pub mod error;
pub mod generation;
pub mod rendering;
pub mod settings;
pub mod voxels;

pub use config::GeneratorConfig;
pub use error::{Result, WorldError};
pub use rendering::{InstanceBatch, InstanceBatches, InstanceRenderer, LogRenderer};
pub use settings::{SettingChange, SettingsPanel};
pub use voxels::block::catalog::BlockCatalog;
pub use voxels::world::{World, WorldParams, WorldSize};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "VOXEL_TERRAIN_CONFIG";

/// Runs the headless generator.
///
/// Loads the configuration named by the first command line argument, or by
/// [`CONFIG_ENV_VAR`], falling back to defaults. Then generates the world once
/// and hands the batches to a [`LogRenderer`].
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    if let Err(err) = generate_once() {
        error!("Generation failed: {}", err);
        std::process::exit(1);
    }
}

fn generate_once() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV_VAR).ok());

    let config = match config_path {
        Some(path) => GeneratorConfig::load(path)?,
        None => {
            info!("No configuration given, using defaults");
            GeneratorConfig::default()
        }
    };

    let world = crate::core::MtResource::new(config.build_world());
    let mut panel = SettingsPanel::new(world, config.catalog, LogRenderer::default());
    panel.regenerate()?;

    let handle = panel.world();
    let world = handle.get();
    info!(
        "World ready: {} batches, {} instances",
        world.batches().len(),
        world.batches().total_instances()
    );
    Ok(())
}
