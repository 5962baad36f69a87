//! JSON generator configuration.
//!
//! Every field is optional; anything left out takes its default. A complete
//! configuration looks like:
//!
//! ```json
//! {
//!   "size": { "width": 64, "height": 24 },
//!   "params": { "seed": 7, "terrain": { "scale": 30.0, "magnitude": 0.6, "offset": 0.15 } },
//!   "catalog": {
//!     "blocks": [
//!       { "id": 1, "name": "Grass" },
//!       { "id": 2, "name": "Dirt" },
//!       { "id": 3, "name": "Stone", "resource": { "scale": { "x": 30.0, "y": 30.0, "z": 30.0 }, "scarcity": 0.3 } }
//!     ],
//!     "surface_block": 1,
//!     "fill_block": 2
//!   }
//! }
//! ```

use std::{fs, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::voxels::{
    block::catalog::BlockCatalog,
    world::{World, WorldParams, WorldSize},
};

/// Everything needed to build and generate a world.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// World extent.
    pub size: WorldSize,
    /// Seed and terrain shape.
    pub params: WorldParams,
    /// Block types, resources and terrain roles.
    pub catalog: BlockCatalog,
}

impl GeneratorConfig {
    /// Parses a configuration from JSON text and validates the catalog.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.catalog.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!("Loaded generator configuration from {}", path.display());
        Ok(config)
    }

    /// Serializes the configuration as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// An ungenerated world with this configuration's size and parameters.
    pub fn build_world(&self) -> World {
        World::with_params(self.size, self.params)
    }
}
