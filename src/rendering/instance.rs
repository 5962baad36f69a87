//! Instance transform batches handed to the renderer.
//!
//! One batch exists per non-empty block type. Each exposed voxel contributes
//! one transform placing a unit cube at the voxel's center, and the position
//! of that transform in its batch is the voxel's instance id.

use std::collections::BTreeMap;

use cgmath::{Matrix4, Point3, Vector3};

use crate::voxels::block::{catalog::BlockCatalog, BlockTypeSize};

/// A per-instance model matrix, laid out for direct upload to an instance buffer.
///
/// # Memory Layout
/// - Model: 4x4 f32, column-major (64 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    /// Column-major model matrix. Column 3 holds the translation.
    model: [[f32; 4]; 4],
}

impl InstanceRaw {
    /// A pure translation to the center of the cell at `position`.
    pub fn at_cell(position: Point3<usize>) -> Self {
        let translation = Matrix4::from_translation(Vector3::new(
            position.x as f32 + 0.5,
            position.y as f32 + 0.5,
            position.z as f32 + 0.5,
        ));
        InstanceRaw {
            model: translation.into(),
        }
    }

    /// The full model matrix.
    pub fn model(&self) -> [[f32; 4]; 4] {
        self.model
    }

    /// The world-space point this instance is centered on.
    pub fn translation(&self) -> [f32; 3] {
        [self.model[3][0], self.model[3][1], self.model[3][2]]
    }
}

/// The instance transforms of one block type.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceBatch {
    block_type: BlockTypeSize,
    name: String,
    color: Option<[u8; 3]>,
    max_instances: usize,
    transforms: Vec<InstanceRaw>,
}

impl InstanceBatch {
    fn new(
        block_type: BlockTypeSize,
        name: String,
        color: Option<[u8; 3]>,
        max_instances: usize,
    ) -> Self {
        InstanceBatch {
            block_type,
            name,
            color,
            max_instances,
            transforms: Vec::new(),
        }
    }

    /// Block type id every instance of this batch shares.
    pub fn block_type(&self) -> BlockTypeSize {
        self.block_type
    }

    /// Display name of the block type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display tint of the block type, if it has one.
    pub fn color(&self) -> Option<[u8; 3]> {
        self.color
    }

    /// Upper bound on the batch size: the cell count of the grid it was built from.
    pub fn max_instances(&self) -> usize {
        self.max_instances
    }

    /// Number of instances in the batch.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether no voxel of this type is exposed.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Transforms in instance-id order.
    pub fn transforms(&self) -> &[InstanceRaw] {
        &self.transforms
    }

    /// The transforms as raw bytes for an instance buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.transforms)
    }

    fn push(&mut self, position: Point3<usize>) -> u32 {
        debug_assert!(self.transforms.len() < self.max_instances);
        let instance_id = self.transforms.len() as u32;
        self.transforms.push(InstanceRaw::at_cell(position));
        instance_id
    }
}

/// The finished batches of one generation, ordered by block type id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceBatches {
    batches: BTreeMap<BlockTypeSize, InstanceBatch>,
}

impl InstanceBatches {
    /// The batch for a block type.
    pub fn get(&self, block_type: BlockTypeSize) -> Option<&InstanceBatch> {
        self.batches.get(&block_type)
    }

    /// All batches, empty ones included, by ascending block type id.
    pub fn iter(&self) -> impl Iterator<Item = &InstanceBatch> {
        self.batches.values()
    }

    /// Number of batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Whether there are no batches at all.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Sum of instances over every batch.
    pub fn total_instances(&self) -> usize {
        self.batches.values().map(InstanceBatch::len).sum()
    }
}

/// Accumulates exposed voxels into per-type batches.
///
/// The id returned by [`InstanceBatchBuilder::push`] is the slot the transform
/// occupies, so the id stored on a voxel and its batch position cannot drift.
pub struct InstanceBatchBuilder {
    max_instances: usize,
    batches: BTreeMap<BlockTypeSize, InstanceBatch>,
}

impl InstanceBatchBuilder {
    /// Opens an empty batch for every block type in the catalog.
    ///
    /// # Arguments
    /// * `catalog` - Block types to open batches for
    /// * `max_instances` - Cell count of the grid, the most any batch can hold
    pub fn new(catalog: &BlockCatalog, max_instances: usize) -> Self {
        let batches = catalog
            .blocks()
            .iter()
            .map(|block| {
                (
                    block.id,
                    InstanceBatch::new(block.id, block.name.clone(), block.color, max_instances),
                )
            })
            .collect();

        InstanceBatchBuilder {
            max_instances,
            batches,
        }
    }

    /// Appends an instance centered on `position` to the batch of `block_type`.
    ///
    /// # Returns
    /// The instance id, equal to the batch length before the push.
    pub fn push(&mut self, block_type: BlockTypeSize, position: Point3<usize>) -> u32 {
        let max_instances = self.max_instances;
        self.batches
            .entry(block_type)
            .or_insert_with(|| {
                InstanceBatch::new(block_type, "Unknown".to_string(), None, max_instances)
            })
            .push(position)
    }

    /// Closes the builder.
    pub fn finish(self) -> InstanceBatches {
        InstanceBatches {
            batches: self.batches,
        }
    }
}
