//! # World Module
//!
//! This module provides the `World` struct, which owns the voxel grid and
//! runs the full generation pipeline over it.
//!
//! ## Generation
//!
//! A generation request always rebuilds the whole world, in this order:
//! 1. Resources are scattered through an empty grid
//! 2. Terrain carves the surface over them
//! 3. Visibility assigns instance ids to exposed voxels and builds the batches
//!
//! The new grid is built on the side and only replaces the current one once
//! every pass has finished, so a `World` never holds a half-built grid.
//!
//! ## Concurrency
//!
//! Generation is synchronous and takes `&mut self`. Callers sharing a world
//! across threads wrap it in [`crate::core::MtResource`], whose write guard
//! keeps readers out for the duration of a regeneration.

use log::info;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::error::{Result, WorldError};
use crate::generation::{
    NoiseSource, ResourceGenerator, SimplexSource, TerrainGenerator, TerrainParams,
};
use crate::rendering::{InstanceBatches, VisibilityResolver};

use super::block::catalog::BlockCatalog;
use super::grid::VoxelGrid;

/// Largest accepted value for either world dimension.
pub const MAX_DIMENSION: u32 = 4096;

/// Largest accepted `width * height * width`.
pub const MAX_VOXELS: u64 = 1 << 26;

// Instance ids are u32 slots; a batch can never outgrow them.
const _: () = assert!(MAX_VOXELS <= u32::MAX as u64);

/// Extent of the world. `width` applies to both horizontal axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSize {
    /// Extent of the x and z axes.
    pub width: u32,
    /// Extent of the y axis.
    pub height: u32,
}

impl Default for WorldSize {
    fn default() -> Self {
        WorldSize {
            width: 128,
            height: 20,
        }
    }
}

impl WorldSize {
    /// Number of voxels a grid of this size holds, or `None` on overflow.
    pub fn voxel_count(&self) -> Option<u64> {
        u64::from(self.width)
            .checked_mul(u64::from(self.height))?
            .checked_mul(u64::from(self.width))
    }

    /// Rejects zero, anything above [`MAX_DIMENSION`], and sizes over [`MAX_VOXELS`].
    pub fn validate(&self) -> Result<()> {
        let valid = 1..=MAX_DIMENSION;
        if !valid.contains(&self.width) || !valid.contains(&self.height) {
            return Err(WorldError::InvalidSize {
                width: self.width,
                height: self.height,
                max: MAX_DIMENSION,
            });
        }
        match self.voxel_count() {
            Some(voxels) if voxels <= MAX_VOXELS => Ok(()),
            voxels => Err(WorldError::TooManyVoxels {
                width: self.width,
                height: self.height,
                voxels: voxels.unwrap_or(u64::MAX),
                max: MAX_VOXELS,
            }),
        }
    }
}

/// Everything besides the size and the catalog that shapes a generated world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldParams {
    /// Seed of the noise field sequence. Same seed, same world.
    pub seed: u32,
    /// Height map shape.
    pub terrain: TerrainParams,
}

impl WorldParams {
    /// Default parameters with a freshly randomized seed.
    pub fn with_random_seed() -> Self {
        WorldParams {
            seed: fastrand::u32(..),
            ..WorldParams::default()
        }
    }
}

/// A bounded voxel world and the instance batches describing its visible voxels.
///
/// # Examples
///
/// ```
/// use voxel_terrain::{BlockCatalog, World, WorldSize};
///
/// let mut world = World::new(WorldSize { width: 16, height: 8 });
/// let catalog = BlockCatalog::default();
/// let batches = world.generate(&catalog).expect("valid configuration");
/// assert!(batches.total_instances() > 0);
/// ```
#[derive(Debug, Default)]
pub struct World {
    /// Requested extent, applied on the next generation.
    pub size: WorldSize,
    /// Requested generation parameters, applied on the next generation.
    pub params: WorldParams,
    grid: VoxelGrid,
    batches: InstanceBatches,
}

impl World {
    /// Creates a world of the given size with default parameters.
    ///
    /// Nothing is generated until [`World::generate`] is called.
    pub fn new(size: WorldSize) -> Self {
        Self::with_params(size, WorldParams::default())
    }

    /// Creates a world of the given size and parameters.
    pub fn with_params(size: WorldSize, params: WorldParams) -> Self {
        World {
            size,
            params,
            grid: VoxelGrid::default(),
            batches: InstanceBatches::default(),
        }
    }

    /// The grid produced by the last successful generation.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// The batches produced by the last successful generation.
    pub fn batches(&self) -> &InstanceBatches {
        &self.batches
    }

    /// Rebuilds the world from `params.seed` using simplex noise.
    ///
    /// # Errors
    /// Fails without touching the current grid if the size, the terrain
    /// parameters or the catalog are invalid.
    pub fn generate(&mut self, catalog: &BlockCatalog) -> Result<&InstanceBatches> {
        let mut source = SimplexSource::new(self.params.seed);
        self.generate_with(catalog, &mut source)
    }

    /// Rebuilds the world drawing noise fields from `source`.
    ///
    /// One field is drawn per catalog resource, in catalog order, then one
    /// for the height map.
    ///
    /// # Errors
    /// Same as [`World::generate`].
    pub fn generate_with<S: NoiseSource>(
        &mut self,
        catalog: &BlockCatalog,
        source: &mut S,
    ) -> Result<&InstanceBatches> {
        self.size.validate()?;
        self.params.terrain.validate()?;
        catalog.validate()?;

        let started = Instant::now();
        let mut grid = VoxelGrid::try_new(self.size.width, self.size.height)?;

        let resource_cells = ResourceGenerator::new(catalog).generate(&mut grid, source);
        TerrainGenerator::new(&self.params.terrain, catalog).generate(&mut grid, source);
        let batches = VisibilityResolver::new(catalog).resolve(&mut grid);

        info!(
            "Generated {}x{}x{} world ({} resource writes, {} of {} voxels exposed) in {:?}",
            self.size.width,
            self.size.height,
            self.size.width,
            resource_cells,
            batches.total_instances(),
            grid.len(),
            started.elapsed()
        );

        self.grid = grid;
        self.batches = batches;
        Ok(&self.batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ConstantSource;
    use crate::voxels::block::{block_type::BlockType, EMPTY_BLOCK};

    fn small_world(seed: u32) -> World {
        World::with_params(
            WorldSize {
                width: 24,
                height: 16,
            },
            WorldParams {
                seed,
                terrain: TerrainParams {
                    scale: 10.0,
                    magnitude: 0.5,
                    offset: 0.4,
                },
            },
        )
    }

    #[test]
    fn same_seed_same_world() {
        let catalog = BlockCatalog::default();
        let mut first = small_world(1234);
        let mut second = small_world(1234);

        first.generate(&catalog).expect("first generation");
        second.generate(&catalog).expect("second generation");

        assert_eq!(first.grid(), second.grid());
        assert_eq!(first.batches(), second.batches());
    }

    #[test]
    fn regenerating_in_place_is_idempotent() {
        let catalog = BlockCatalog::default();
        let mut world = small_world(99);

        world.generate(&catalog).expect("first generation");
        let grid = world.grid().clone();
        world.generate(&catalog).expect("second generation");

        assert_eq!(world.grid(), &grid);
    }

    #[test]
    fn different_seeds_differ() {
        let catalog = BlockCatalog::default();
        let mut first = small_world(1);
        let mut second = small_world(2);

        first.generate(&catalog).expect("first generation");
        second.generate(&catalog).expect("second generation");

        assert_ne!(first.grid(), second.grid());
    }

    #[test]
    fn size_changes_apply_on_regeneration() {
        let catalog = BlockCatalog::default();
        let mut world = small_world(5);
        world.generate(&catalog).expect("generation");

        world.size = WorldSize {
            width: 8,
            height: 8,
        };
        world.generate(&catalog).expect("regeneration");

        assert_eq!(world.grid().width(), 8);
        assert_eq!(world.grid().height(), 8);
        assert_eq!(world.grid().len(), 512);
    }

    #[test]
    fn invalid_configuration_keeps_the_previous_world() {
        let catalog = BlockCatalog::default();
        let mut world = small_world(5);
        world.generate(&catalog).expect("generation");
        let grid = world.grid().clone();

        world.size.width = 0;
        assert!(matches!(
            world.generate(&catalog),
            Err(WorldError::InvalidSize { .. })
        ));
        assert_eq!(world.grid(), &grid);

        world.size.width = 24;
        world.params.terrain.scale = -1.0;
        assert!(world.generate(&catalog).is_err());
        assert_eq!(world.grid(), &grid);
    }

    #[test]
    fn oversized_world_is_rejected_before_allocating() {
        let catalog = BlockCatalog::default();
        let mut world = small_world(5);
        world.generate(&catalog).expect("generation");
        let grid = world.grid().clone();
        let batches = world.batches().clone();

        world.size = WorldSize {
            width: MAX_DIMENSION,
            height: MAX_DIMENSION,
        };
        assert!(matches!(
            world.generate(&catalog),
            Err(WorldError::TooManyVoxels { voxels, .. }) if voxels == 1 << 36
        ));
        assert_eq!(world.grid(), &grid);
        assert_eq!(world.batches(), &batches);
    }

    #[test]
    fn voxel_budget_boundary() {
        let at_budget = WorldSize {
            width: 4096,
            height: 4,
        };
        assert_eq!(at_budget.voxel_count(), Some(MAX_VOXELS));
        assert!(at_budget.validate().is_ok());

        let over_budget = WorldSize {
            width: 4096,
            height: 5,
        };
        assert!(matches!(
            over_budget.validate(),
            Err(WorldError::TooManyVoxels { .. })
        ));
    }

    #[test]
    fn flat_world_from_constant_noise() {
        let catalog = BlockCatalog::default().without_resources();
        let mut world = World::with_params(
            WorldSize {
                width: 4,
                height: 10,
            },
            WorldParams {
                seed: 0,
                terrain: TerrainParams {
                    scale: 1.0,
                    magnitude: 0.5,
                    offset: 0.25,
                },
            },
        );

        // offset + magnitude * 0.5 = 0.5, so every surface sits at y = 5
        world
            .generate_with(&catalog, &mut ConstantSource::new(0.5))
            .expect("generation");

        let grid = world.grid();
        assert_eq!(grid.count_of(BlockType::GRASS.id()), 16);
        assert_eq!(grid.count_of(BlockType::DIRT.id()), 16 * 5);
        assert_eq!(grid.count_of(EMPTY_BLOCK), 16 * 4);

        // The top layer and the dirt along the sides and bottom are exposed;
        // only the 2x2 dirt core of each inner layer is hidden.
        let batches = world.batches();
        assert_eq!(batches.get(BlockType::GRASS.id()).map(|b| b.len()), Some(16));
        assert_eq!(
            batches.get(BlockType::DIRT.id()).map(|b| b.len()),
            Some(16 * 5 - 4 * 4)
        );
    }

    #[test]
    fn random_seed_params_keep_defaults() {
        let params = WorldParams::with_random_seed();
        assert_eq!(params.terrain, TerrainParams::default());
    }
}
