//! # Rendering Boundary
//!
//! Everything on this side of the crate turns a finished voxel grid into data
//! an instancing renderer can draw. No graphics API is touched here.
//!
//! * [`visibility`] decides which voxels are exposed and assigns their instance ids
//! * [`instance`] holds the per-block-type transform batches those ids index into
//! * [`InstanceRenderer`] is the seam the actual renderer plugs into

use log::info;

pub mod instance;
pub mod visibility;

pub use instance::{InstanceBatch, InstanceBatchBuilder, InstanceBatches, InstanceRaw};
pub use visibility::VisibilityResolver;

/// Consumer of finished instance batches, one GPU instance batch per block type.
pub trait InstanceRenderer {
    /// Replaces whatever was drawn before with `batches`.
    fn upload(&mut self, batches: &InstanceBatches);
}

/// A renderer that only reports what it was given. Used by the headless driver.
#[derive(Debug, Default)]
pub struct LogRenderer {
    uploads: usize,
}

impl LogRenderer {
    /// How many times batches have been uploaded.
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

impl InstanceRenderer for LogRenderer {
    fn upload(&mut self, batches: &InstanceBatches) {
        self.uploads += 1;
        for batch in batches.iter() {
            info!(
                "{}: {} instances ({} bytes)",
                batch.name(),
                batch.len(),
                batch.as_bytes().len()
            );
        }
    }
}
