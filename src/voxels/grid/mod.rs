//! # Voxel Grid Module
//!
//! This module provides the `VoxelGrid`, the dense 3D data model every
//! generation pass writes into and the visibility resolver reads from.
//!
//! ## Memory Layout
//!
//! The grid is a single contiguous buffer. A cell at `(x, y, z)` lives at
//! `x * height * width + y * width + z`, so iterating the buffer front to back
//! visits cells in the `x → y → z` scan order used by every pass.
//!
//! ## Bounds
//!
//! All accessors take signed coordinates and treat anything outside
//! `[0, width) × [0, height) × [0, width)` as empty. Reads return `None` (or
//! the empty id) and writes are silently dropped, so neighbor lookups and
//! column sweeps never special-case the edges.

use cgmath::Point3;

use crate::error::Result;

use super::block::{BlockTypeSize, EMPTY_BLOCK};

pub mod grid_iteration;

pub use grid_iteration::GridIterator;

/// The contents of one grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Voxel {
    /// The block type occupying this cell, `EMPTY_BLOCK` for air.
    pub block_type: BlockTypeSize,
    /// Slot within this block type's instance batch. Set only for exposed, non-empty cells.
    pub instance_id: Option<u32>,
}

impl Voxel {
    /// An unoccupied cell with no instance.
    pub const EMPTY: Voxel = Voxel {
        block_type: EMPTY_BLOCK,
        instance_id: None,
    };

    /// Whether the cell holds no block.
    pub fn is_empty(&self) -> bool {
        self.block_type == EMPTY_BLOCK
    }
}

/// A bounded `width × height × width` block of voxels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    /// Creates a grid of the given size with every cell empty.
    pub fn new(width: u32, height: u32) -> Self {
        let mut grid = VoxelGrid::default();
        grid.reset(width, height);
        grid
    }

    /// Creates a grid of the given size, reporting allocation failure instead of aborting.
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        let (width, height) = (width as usize, height as usize);
        let mut voxels = Vec::new();
        voxels.try_reserve_exact(width * height * width)?;
        voxels.resize(width * height * width, Voxel::EMPTY);
        Ok(VoxelGrid {
            width,
            height,
            voxels,
        })
    }

    /// Discards all contents and reallocates for the given size.
    ///
    /// # Arguments
    /// * `width` - Extent of both horizontal axes
    /// * `height` - Extent of the vertical axis
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width as usize;
        self.height = height as usize;
        self.voxels.clear();
        self.voxels
            .resize(self.width * self.height * self.width, Voxel::EMPTY);
    }

    /// Extent of the x and z axes.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Extent of the y axis.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells, `width * height * width`.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Whether the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Checks whether the coordinates address a cell of this grid.
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && (z as usize) < self.width
    }

    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if !self.in_bounds(x, y, z) {
            return None;
        }
        Some(x as usize * self.height * self.width + y as usize * self.width + z as usize)
    }

    /// Gets the cell at the given coordinates.
    ///
    /// # Returns
    /// The cell, or `None` if the coordinates are outside the grid.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<&Voxel> {
        self.index(x, y, z).map(|index| &self.voxels[index])
    }

    /// Gets the cell at a point, with the same bounds contract as [`VoxelGrid::get`].
    pub fn get_at(&self, position: Point3<i32>) -> Option<&Voxel> {
        self.get(position.x, position.y, position.z)
    }

    /// The block type at the given coordinates, `EMPTY_BLOCK` when out of bounds.
    pub fn block_type_at(&self, x: i32, y: i32, z: i32) -> BlockTypeSize {
        self.get(x, y, z).map_or(EMPTY_BLOCK, |voxel| voxel.block_type)
    }

    /// Overwrites the block type of a cell. The instance id is left untouched.
    ///
    /// Does nothing if the coordinates are outside the grid.
    pub fn set_block_type(&mut self, x: i32, y: i32, z: i32, block_type: BlockTypeSize) {
        if let Some(index) = self.index(x, y, z) {
            self.voxels[index].block_type = block_type;
        }
    }

    /// Overwrites the instance id of a cell. The block type is left untouched.
    ///
    /// Does nothing if the coordinates are outside the grid.
    pub fn set_instance_id(&mut self, x: i32, y: i32, z: i32, instance_id: u32) {
        if let Some(index) = self.index(x, y, z) {
            self.voxels[index].instance_id = Some(instance_id);
        }
    }

    /// Unsets every instance id, keeping all block types.
    pub fn clear_instance_ids(&mut self) {
        for voxel in &mut self.voxels {
            voxel.instance_id = None;
        }
    }

    /// Counts the cells holding the given block type.
    pub fn count_of(&self, block_type: BlockTypeSize) -> usize {
        self.voxels
            .iter()
            .filter(|voxel| voxel.block_type == block_type)
            .count()
    }

    /// Iterates every cell with its position in `x → y → z` scan order.
    pub fn iter(&self) -> GridIterator<'_> {
        GridIterator::new(self)
    }
}
