//! Error type shared by configuration loading and world generation.
//!
//! Out-of-bounds grid access is not an error; reads return the empty block
//! and writes are dropped. Everything below is caught before the first voxel
//! is written.

use thiserror::Error;

use crate::voxels::block::{catalog::Axis, BlockTypeSize};

/// Everything that can stop a generation request or a configuration load.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Width or height is zero or larger than the supported maximum.
    #[error("world size {width}x{height} is outside 1..={max}")]
    InvalidSize {
        /// Requested horizontal extent.
        width: u32,
        /// Requested vertical extent.
        height: u32,
        /// Largest accepted value for either dimension.
        max: u32,
    },

    /// Both dimensions are in range but the world holds more voxels than the budget allows.
    #[error("world size {width}x{height} needs {voxels} voxels, more than {max}")]
    TooManyVoxels {
        /// Requested horizontal extent.
        width: u32,
        /// Requested vertical extent.
        height: u32,
        /// `width * height * width`.
        voxels: u64,
        /// Voxel budget.
        max: u64,
    },

    /// The voxel buffer could not be allocated.
    #[error("failed to allocate the voxel grid: {0}")]
    Allocation(#[from] std::collections::TryReserveError),

    /// A terrain parameter is NaN, infinite, or (for the scale) not positive.
    #[error("terrain {name} = {value} is not usable")]
    InvalidTerrainParam {
        /// Parameter name as it appears in the configuration.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A resource scarcity threshold falls outside `[0, 1]`.
    #[error("block {block} scarcity {value} is outside [0, 1]")]
    InvalidScarcity {
        /// Display name of the resource.
        block: String,
        /// Offending value.
        value: f64,
    },

    /// A resource noise scale component is NaN, infinite or not positive.
    #[error("block {block} noise scale {axis:?} = {value} must be finite and positive")]
    InvalidNoiseScale {
        /// Display name of the resource.
        block: String,
        /// Axis of the offending component.
        axis: Axis,
        /// Offending value.
        value: f64,
    },

    /// Two catalog entries share an id.
    #[error("block id {0} is defined more than once")]
    DuplicateBlock(BlockTypeSize),

    /// A catalog entry claims the id reserved for empty cells.
    #[error("block {0} uses the reserved empty id")]
    ReservedEmptyId(String),

    /// A terrain role or a resource edit references an id missing from the catalog.
    #[error("{role} block {id} is not in the catalog")]
    UnknownBlock {
        /// Which terrain role referenced the id.
        role: &'static str,
        /// Id that has no catalog entry.
        id: BlockTypeSize,
    },

    /// A resource edit named a block type that is cataloged but not a resource.
    #[error("block {name} ({id}) is not a resource")]
    NotAResource {
        /// Display name of the block type.
        name: String,
        /// Its id.
        id: BlockTypeSize,
    },

    /// A settings edit carried a value that cannot be clamped into its range.
    #[error("{name} = {value} is not a number")]
    InvalidSetting {
        /// Setting being edited.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for a generator config.
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, WorldError>;
