//! Exposure culling.
//!
//! A non-empty voxel needs a render instance only if at least one of its six
//! axis neighbors is empty. Neighbors outside the grid count as empty, so
//! every voxel on the outer faces of the world is always exposed. Fully
//! enclosed voxels are skipped entirely.
//!
//! Must run after every generation pass has finished writing block types;
//! a later write would leave instance ids describing a grid that no longer exists.

use cgmath::Point3;
use log::debug;

use crate::voxels::{
    block::{block_side::BlockSide, catalog::BlockCatalog, EMPTY_BLOCK},
    grid::VoxelGrid,
};

use super::instance::{InstanceBatchBuilder, InstanceBatches};

/// Assigns instance ids to exposed voxels and builds the matching batches.
pub struct VisibilityResolver<'a> {
    catalog: &'a BlockCatalog,
}

impl<'a> VisibilityResolver<'a> {
    /// Creates a resolver that opens one batch per catalog block type.
    pub fn new(catalog: &'a BlockCatalog) -> Self {
        VisibilityResolver { catalog }
    }

    /// Whether any of the six neighbors of `(x, y, z)` is empty or outside the grid.
    pub fn is_exposed(grid: &VoxelGrid, x: i32, y: i32, z: i32) -> bool {
        BlockSide::all().iter().any(|side| {
            let offset = side.neighbor_offset();
            grid.block_type_at(x + offset.x, y + offset.y, z + offset.z) == EMPTY_BLOCK
        })
    }

    /// Resolves exposure for every voxel of `grid`.
    ///
    /// Previous instance ids are cleared first. Voxels are visited in
    /// `x → y → z` order; each exposed voxel receives the next id of its block
    /// type, and the same id is its slot in the returned batch.
    ///
    /// # Returns
    /// One batch per catalog block type, plus one for any stray type found in the grid.
    pub fn resolve(&self, grid: &mut VoxelGrid) -> InstanceBatches {
        grid.clear_instance_ids();
        let mut builder = InstanceBatchBuilder::new(self.catalog, grid.len());
        let mut occluded = 0usize;

        for x in 0..grid.width() {
            for y in 0..grid.height() {
                for z in 0..grid.width() {
                    let (xi, yi, zi) = (x as i32, y as i32, z as i32);
                    let block_type = grid.block_type_at(xi, yi, zi);
                    if block_type == EMPTY_BLOCK {
                        continue;
                    }

                    if Self::is_exposed(grid, xi, yi, zi) {
                        let instance_id = builder.push(block_type, Point3::new(x, y, z));
                        grid.set_instance_id(xi, yi, zi, instance_id);
                    } else {
                        occluded += 1;
                    }
                }
            }
        }

        let batches = builder.finish();
        debug!(
            "Resolved {} exposed voxels, culled {} occluded voxels",
            batches.total_instances(),
            occluded
        );
        batches
    }
}
