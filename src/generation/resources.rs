//! Resource scattering.
//!
//! Runs on an empty grid before terrain fill. Every resource type in the
//! catalog samples its own 3D noise field and claims each cell whose sample
//! is strictly above the resource's scarcity. Resources are processed in
//! catalog order, so a later resource overwrites an earlier one where both
//! pass. Terrain later clears whatever landed above the surface.

use log::debug;

use crate::voxels::{block::catalog::BlockCatalog, grid::VoxelGrid};

use super::noise_field::{NoiseField, NoiseSource};

/// Places resource block types through the grid using per-type 3D noise.
pub struct ResourceGenerator<'a> {
    catalog: &'a BlockCatalog,
}

impl<'a> ResourceGenerator<'a> {
    /// Creates a generator for the resources listed in `catalog`.
    pub fn new(catalog: &'a BlockCatalog) -> Self {
        ResourceGenerator { catalog }
    }

    /// Scatters every resource through `grid`.
    ///
    /// Draws exactly one field from `source` per resource, in catalog order.
    ///
    /// # Returns
    /// The number of cell writes performed, overwrites included.
    pub fn generate<S: NoiseSource>(&self, grid: &mut VoxelGrid, source: &mut S) -> usize {
        let mut total = 0;

        for (block, resource) in self.catalog.resources() {
            let field = source.next_field();
            let mut placed = 0;

            for x in 0..grid.width() {
                for y in 0..grid.height() {
                    for z in 0..grid.width() {
                        let [nx, ny, nz] = resource.scale.apply(x, y, z);
                        if field.sample_3d(nx, ny, nz) > resource.scarcity {
                            grid.set_block_type(x as i32, y as i32, z as i32, block.id);
                            placed += 1;
                        }
                    }
                }
            }

            debug!("Placed {} cells of {}", placed, block.name);
            total += placed;
        }

        total
    }
}
