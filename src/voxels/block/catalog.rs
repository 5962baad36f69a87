//! # Block Catalog Module
//!
//! The catalog is the configuration describing which block types exist, which
//! of them are resources scattered by 3D noise, and which ids the terrain pass
//! uses for the surface cap and the fill beneath it.
//!
//! The catalog is owned by the caller (normally the settings surface) and is
//! only ever read by the generators and the visibility resolver.
//!
//! ## Ordering
//!
//! Resource order is part of the contract: resources are generated in the
//! order they appear here, and a later resource overwrites an earlier one
//! wherever both pass their scarcity threshold.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};

use super::{block_type::BlockType, BlockTypeSize, EMPTY_BLOCK};

/// One of the three grid axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal axis, first grid index.
    X,
    /// Vertical axis, second grid index.
    Y,
    /// Horizontal axis, third grid index.
    Z,
}

/// Per-axis divisor applied to grid coordinates before sampling noise.
///
/// Larger values stretch the noise, producing bigger and smoother deposits.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseScale {
    /// Divisor for the x coordinate.
    pub x: f64,
    /// Divisor for the y coordinate.
    pub y: f64,
    /// Divisor for the z coordinate.
    pub z: f64,
}

impl NoiseScale {
    /// The same divisor on every axis.
    pub fn uniform(scale: f64) -> Self {
        NoiseScale {
            x: scale,
            y: scale,
            z: scale,
        }
    }

    /// Reads the component for `axis`.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Overwrites the component for `axis`.
    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    /// Maps a grid coordinate into noise space.
    pub fn apply(&self, x: usize, y: usize, z: usize) -> [f64; 3] {
        [x as f64 / self.x, y as f64 / self.y, z as f64 / self.z]
    }
}

/// Generation parameters carried by resource block types only.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceParams {
    /// Noise-space divisor per axis.
    pub scale: NoiseScale,
    /// A cell becomes this resource when its noise sample is strictly above this threshold.
    pub scarcity: f64,
}

/// A single catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    /// Id stored in the voxel grid.
    pub id: BlockTypeSize,
    /// Display name.
    pub name: String,
    /// Optional display tint.
    #[serde(default)]
    pub color: Option<[u8; 3]>,
    /// Present only for resource block types.
    #[serde(default)]
    pub resource: Option<ResourceParams>,
}

impl BlockDefinition {
    /// Builds the definition of a built-in block type with no resource parameters.
    pub fn from_block_type(block_type: BlockType) -> Self {
        BlockDefinition {
            id: block_type.id(),
            name: block_type.name().to_string(),
            color: block_type.color(),
            resource: None,
        }
    }

    /// Marks this block type as a resource.
    pub fn with_resource(mut self, scale: NoiseScale, scarcity: f64) -> Self {
        self.resource = Some(ResourceParams { scale, scarcity });
        self
    }

    /// Whether the resource generator places this block type.
    pub fn is_resource(&self) -> bool {
        self.resource.is_some()
    }
}

/// The ordered set of block types known to a generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockCatalog {
    blocks: Vec<BlockDefinition>,
    surface_block: BlockTypeSize,
    fill_block: BlockTypeSize,
}

impl BlockCatalog {
    /// Creates a catalog and validates it.
    ///
    /// # Arguments
    /// * `blocks` - Every non-empty block type, resources in generation order
    /// * `surface_block` - Id placed at the surface height of each column
    /// * `fill_block` - Id placed in empty cells below the surface
    ///
    /// # Errors
    /// Returns the first problem [`BlockCatalog::validate`] finds.
    pub fn new(
        blocks: Vec<BlockDefinition>,
        surface_block: BlockTypeSize,
        fill_block: BlockTypeSize,
    ) -> Result<Self> {
        let catalog = BlockCatalog {
            blocks,
            surface_block,
            fill_block,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks the catalog invariants.
    ///
    /// * no entry uses the reserved empty id
    /// * ids are unique
    /// * the surface and fill blocks have entries
    /// * every resource has a scarcity in `[0, 1]` and finite, positive noise scales
    pub fn validate(&self) -> Result<()> {
        for (index, block) in self.blocks.iter().enumerate() {
            if block.id == EMPTY_BLOCK {
                return Err(WorldError::ReservedEmptyId(block.name.clone()));
            }
            if self.blocks[..index].iter().any(|other| other.id == block.id) {
                return Err(WorldError::DuplicateBlock(block.id));
            }
            if let Some(resource) = &block.resource {
                if !(0.0..=1.0).contains(&resource.scarcity) {
                    return Err(WorldError::InvalidScarcity {
                        block: block.name.clone(),
                        value: resource.scarcity,
                    });
                }
                for axis in [Axis::X, Axis::Y, Axis::Z] {
                    let value = resource.scale.get(axis);
                    if !value.is_finite() || value <= 0.0 {
                        return Err(WorldError::InvalidNoiseScale {
                            block: block.name.clone(),
                            axis,
                            value,
                        });
                    }
                }
            }
        }

        for (role, id) in [("surface", self.surface_block), ("fill", self.fill_block)] {
            if self.get(id).is_none() {
                return Err(WorldError::UnknownBlock { role, id });
            }
        }

        Ok(())
    }

    /// All non-empty block types in catalog order.
    pub fn blocks(&self) -> &[BlockDefinition] {
        &self.blocks
    }

    /// Looks up a block type by id.
    pub fn get(&self, id: BlockTypeSize) -> Option<&BlockDefinition> {
        self.blocks.iter().find(|block| block.id == id)
    }

    /// Display name for an id, `"Empty"` for the reserved id and `"Unknown"` otherwise.
    pub fn name_of(&self, id: BlockTypeSize) -> &str {
        if id == EMPTY_BLOCK {
            return BlockType::EMPTY.name();
        }
        self.get(id).map_or("Unknown", |block| block.name.as_str())
    }

    /// The resource subset, in generation order.
    pub fn resources(&self) -> impl Iterator<Item = (&BlockDefinition, &ResourceParams)> {
        self.blocks
            .iter()
            .filter_map(|block| block.resource.as_ref().map(|resource| (block, resource)))
    }

    /// Mutable access to a resource's parameters, for the settings surface.
    pub fn resource_mut(&mut self, id: BlockTypeSize) -> Option<&mut ResourceParams> {
        self.blocks
            .iter_mut()
            .find(|block| block.id == id)
            .and_then(|block| block.resource.as_mut())
    }

    /// Id placed at each column's surface height.
    pub fn surface_block(&self) -> BlockTypeSize {
        self.surface_block
    }

    /// Id placed below the surface where no resource landed.
    pub fn fill_block(&self) -> BlockTypeSize {
        self.fill_block
    }

    /// The same catalog with every block type demoted to a plain block.
    pub fn without_resources(mut self) -> Self {
        for block in &mut self.blocks {
            block.resource = None;
        }
        self
    }
}

impl Default for BlockCatalog {
    /// Grass over dirt, with stone and then coal ore as resources.
    fn default() -> Self {
        BlockCatalog {
            blocks: vec![
                BlockDefinition::from_block_type(BlockType::GRASS),
                BlockDefinition::from_block_type(BlockType::DIRT),
                BlockDefinition::from_block_type(BlockType::STONE)
                    .with_resource(NoiseScale::uniform(30.0), 0.3),
                BlockDefinition::from_block_type(BlockType::COAL_ORE)
                    .with_resource(NoiseScale::uniform(30.0), 0.7),
            ],
            surface_block: BlockType::GRASS.id(),
            fill_block: BlockType::DIRT.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid_and_orders_resources() {
        let catalog = BlockCatalog::default();
        assert!(catalog.validate().is_ok());

        let resources: Vec<BlockTypeSize> =
            catalog.resources().map(|(block, _)| block.id).collect();
        assert_eq!(
            resources,
            vec![BlockType::STONE.id(), BlockType::COAL_ORE.id()]
        );
        assert_eq!(catalog.surface_block(), BlockType::GRASS.id());
        assert_eq!(catalog.fill_block(), BlockType::DIRT.id());
    }

    #[test]
    fn empty_id_cannot_be_cataloged() {
        let result = BlockCatalog::new(
            vec![
                BlockDefinition::from_block_type(BlockType::EMPTY),
                BlockDefinition::from_block_type(BlockType::GRASS),
            ],
            BlockType::GRASS.id(),
            BlockType::GRASS.id(),
        );
        assert!(matches!(result, Err(WorldError::ReservedEmptyId(_))));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = BlockCatalog::new(
            vec![
                BlockDefinition::from_block_type(BlockType::GRASS),
                BlockDefinition::from_block_type(BlockType::GRASS),
            ],
            BlockType::GRASS.id(),
            BlockType::GRASS.id(),
        );
        assert!(matches!(result, Err(WorldError::DuplicateBlock(1))));
    }

    #[test]
    fn terrain_blocks_must_exist() {
        let result = BlockCatalog::new(
            vec![BlockDefinition::from_block_type(BlockType::GRASS)],
            BlockType::GRASS.id(),
            BlockType::DIRT.id(),
        );
        assert!(matches!(
            result,
            Err(WorldError::UnknownBlock { role: "fill", id: 2 })
        ));
    }

    #[test]
    fn scarcity_outside_unit_range_is_rejected() {
        let mut catalog = BlockCatalog::default();
        if let Some(stone) = catalog.resource_mut(BlockType::STONE.id()) {
            stone.scarcity = 1.5;
        }
        assert!(matches!(
            catalog.validate(),
            Err(WorldError::InvalidScarcity { .. })
        ));
    }

    #[test]
    fn zero_noise_scale_is_rejected() {
        let mut catalog = BlockCatalog::default();
        if let Some(coal) = catalog.resource_mut(BlockType::COAL_ORE.id()) {
            coal.scale.set(Axis::Y, 0.0);
        }
        assert!(matches!(
            catalog.validate(),
            Err(WorldError::InvalidNoiseScale { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn without_resources_keeps_blocks() {
        let catalog = BlockCatalog::default().without_resources();
        assert_eq!(catalog.resources().count(), 0);
        assert_eq!(catalog.blocks().len(), 4);
        assert_eq!(catalog.name_of(BlockType::COAL_ORE.id()), "Coal Ore");
        assert_eq!(catalog.name_of(EMPTY_BLOCK), "Empty");
        assert_eq!(catalog.name_of(99), "Unknown");
    }

    #[test]
    fn noise_scale_divides_each_axis() {
        let scale = NoiseScale {
            x: 2.0,
            y: 4.0,
            z: 8.0,
        };
        assert_eq!(scale.apply(4, 4, 4), [2.0, 1.0, 0.5]);
    }
}
