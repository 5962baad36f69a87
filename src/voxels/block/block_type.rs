//! # Block Type Module
//!
//! This module defines the built-in block types of the voxel world.
//! It provides conversion between the compact stored id and the rich enum type.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates the block types shipped with the default catalog.
///
/// Each variant's discriminant is the id stored in the voxel grid. The
/// `FromPrimitive` derive allows conversion back from the stored integer.
/// Custom catalogs may use ids outside this enum; only `EMPTY` is reserved.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// No block. The grid is initialized to this and it is never rendered.
    EMPTY = 0,

    /// The visible cap placed at the surface height of every column.
    GRASS = 1,

    /// Fill placed below the surface wherever no resource was generated.
    DIRT = 2,

    /// A common resource scattered by 3D noise before terrain fill.
    STONE = 3,

    /// A rarer resource, generated after stone so it wins overlapping cells.
    COAL_ORE = 4,
}

impl BlockType {
    /// Converts a stored `BlockTypeSize` to a built-in `BlockType`.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` for ids that only a custom
    /// catalog knows about.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// The compact id stored in the grid for this block type.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Human readable name, as shown in the settings surface.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::EMPTY => "Empty",
            BlockType::GRASS => "Grass",
            BlockType::DIRT => "Dirt",
            BlockType::STONE => "Stone",
            BlockType::COAL_ORE => "Coal Ore",
        }
    }

    /// Display color used by renderers that tint instances instead of texturing them.
    pub fn color(self) -> Option<[u8; 3]> {
        match self {
            BlockType::EMPTY => None,
            BlockType::GRASS => Some([225, 85, 20]),
            BlockType::DIRT => Some([170, 60, 10]),
            BlockType::STONE => Some([226, 109, 50]),
            BlockType::COAL_ORE => Some([255, 195, 165]),
        }
    }
}
