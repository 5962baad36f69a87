//! # Grid Iteration Module
//!
//! This module provides an iterator over every cell of a `VoxelGrid` together
//! with its position. Cells are yielded in buffer order, which is the
//! `x → y → z` scan order shared by the generation and visibility passes.

use cgmath::Point3;

use super::{Voxel, VoxelGrid};

/// An iterator over all cells of a grid, empty ones included.
pub struct GridIterator<'a> {
    /// Reference to the grid being iterated over
    grid_ref: &'a VoxelGrid,
    /// Flat index of the next cell to yield
    current_offset: usize,
}

impl<'a> GridIterator<'a> {
    /// Creates a new `GridIterator` positioned at `(0, 0, 0)`.
    pub fn new(grid_ref: &'a VoxelGrid) -> Self {
        GridIterator {
            grid_ref,
            current_offset: 0,
        }
    }
}

impl<'a> Iterator for GridIterator<'a> {
    type Item = (Point3<usize>, &'a Voxel);

    fn next(&mut self) -> Option<Self::Item> {
        let voxel = self.grid_ref.voxels.get(self.current_offset)?;

        let width = self.grid_ref.width;
        let plane = self.grid_ref.height * width;
        let position = Point3::new(
            self.current_offset / plane,
            (self.current_offset % plane) / width,
            self.current_offset % width,
        );

        self.current_offset += 1;
        Some((position, voxel))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid_ref.voxels.len() - self.current_offset;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIterator<'_> {}
