//! # Block Module
//!
//! This module provides the block-related types of the voxel world: the
//! built-in block types, the configurable catalog the generators read, and
//! the six faces used for neighbor checks.

pub mod block_side;
pub mod block_type;
pub mod catalog;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// The id reserved for "no block". Never present in a catalog.
pub const EMPTY_BLOCK: BlockTypeSize = block_type::BlockType::EMPTY as BlockTypeSize;
