//! Heightmap terrain.
//!
//! Each `(x, z)` column samples 2D noise once to find its surface height,
//! then one vertical sweep lays the column out:
//!
//! * below the surface, empty cells become the fill block and resources survive
//! * at the surface, the surface block always wins
//! * above the surface, everything is cleared, resources included
//!
//! The sweep runs `y` from `0` to `height` inclusive. The last step is past
//! the top row and only ever takes the "above" branch, whose write the grid
//! drops as out of bounds.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};
use crate::voxels::{
    block::{catalog::BlockCatalog, EMPTY_BLOCK},
    grid::VoxelGrid,
};

use super::noise_field::{NoiseField, NoiseSource};

/// Shape parameters of the height noise.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Horizontal divisor applied before sampling. Larger is smoother.
    pub scale: f64,
    /// Multiplier on the raw noise value.
    pub magnitude: f64,
    /// Added to the scaled noise; the mean surface height as a fraction of world height.
    pub offset: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        TerrainParams {
            scale: 30.0,
            magnitude: 0.6,
            offset: 0.15,
        }
    }
}

impl TerrainParams {
    /// Rejects NaN and infinite values, and scales that are not positive.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(WorldError::InvalidTerrainParam {
                name: "scale",
                value: self.scale,
            });
        }
        for (name, value) in [("magnitude", self.magnitude), ("offset", self.offset)] {
            if !value.is_finite() {
                return Err(WorldError::InvalidTerrainParam { name, value });
            }
        }
        Ok(())
    }

    /// Converts a raw noise sample into a surface height.
    ///
    /// # Arguments
    /// * `raw` - Noise value, nominally in `[-1, 1]`
    /// * `world_height` - Vertical extent of the grid
    ///
    /// # Returns
    /// `floor(world_height * (offset + magnitude * raw))`, clamped to `[0, world_height - 1]`.
    pub fn surface_height(&self, raw: f64, world_height: usize) -> usize {
        let scaled = self.offset + self.magnitude * raw;
        let height = (world_height as f64 * scaled).floor();
        let top = world_height.saturating_sub(1) as f64;
        height.clamp(0.0, top) as usize
    }
}

/// Carves the surface and fills beneath it.
pub struct TerrainGenerator<'a> {
    params: &'a TerrainParams,
    catalog: &'a BlockCatalog,
}

impl<'a> TerrainGenerator<'a> {
    /// Creates a generator using the catalog's surface and fill blocks.
    pub fn new(params: &'a TerrainParams, catalog: &'a BlockCatalog) -> Self {
        TerrainGenerator { params, catalog }
    }

    /// Lays out every column of `grid`. Draws exactly one field from `source`.
    pub fn generate<S: NoiseSource>(&self, grid: &mut VoxelGrid, source: &mut S) {
        let field = source.next_field();
        let world_height = grid.height();
        let surface_block = self.catalog.surface_block();
        let fill_block = self.catalog.fill_block();

        let mut lowest = usize::MAX;
        let mut highest = 0;

        for x in 0..grid.width() {
            for z in 0..grid.width() {
                let raw = field.sample_2d(
                    x as f64 / self.params.scale,
                    z as f64 / self.params.scale,
                );
                let height = self.params.surface_height(raw, world_height);
                lowest = lowest.min(height);
                highest = highest.max(height);

                let (xi, zi) = (x as i32, z as i32);
                for y in 0..=world_height {
                    let yi = y as i32;
                    if y < height && grid.block_type_at(xi, yi, zi) == EMPTY_BLOCK {
                        grid.set_block_type(xi, yi, zi, fill_block);
                    } else if y == height {
                        grid.set_block_type(xi, yi, zi, surface_block);
                    } else if y > height {
                        grid.set_block_type(xi, yi, zi, EMPTY_BLOCK);
                    }
                }
            }
        }

        if !grid.is_empty() {
            debug!("Surface heights range from {} to {}", lowest, highest);
        }
    }
}
