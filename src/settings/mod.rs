//! # Settings Surface
//!
//! The parameter panel a user tweaks the world through. Every edit is clamped
//! into the range its slider allows, written into the world or the catalog,
//! and followed by a full regeneration whose batches go straight to the
//! renderer. NaN has no place in any range and is rejected outright.
//!
//! Edits are staged on a copy of the world settings and the catalog, and
//! only written back once every edit of a batch has been accepted.
//!
//! Regeneration holds the world's write lock from the first pass until the
//! batches are built, so edits arriving from several owners are applied one
//! after another rather than interleaved.

use std::ops::RangeInclusive;

use log::warn;

use crate::core::MtResource;
use crate::error::{Result, WorldError};
use crate::rendering::InstanceRenderer;
use crate::voxels::{
    block::{
        catalog::{Axis, BlockCatalog, ResourceParams},
        BlockTypeSize,
    },
    world::{World, WorldParams, WorldSize},
};

/// Allowed world width.
pub const WIDTH_RANGE: RangeInclusive<u32> = 8..=128;
/// Allowed world height.
pub const HEIGHT_RANGE: RangeInclusive<u32> = 8..=128;
/// Allowed terrain noise scale.
pub const TERRAIN_SCALE_RANGE: RangeInclusive<f64> = 1.0..=100.0;
/// Allowed terrain magnitude.
pub const TERRAIN_MAGNITUDE_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Allowed terrain offset.
pub const TERRAIN_OFFSET_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Allowed resource scarcity.
pub const SCARCITY_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Allowed resource noise scale, per axis.
pub const RESOURCE_SCALE_RANGE: RangeInclusive<f64> = 10.0..=100.0;

/// A single edit made through the panel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SettingChange {
    /// New horizontal extent.
    Width(u32),
    /// New vertical extent.
    Height(u32),
    /// New noise seed.
    Seed(u32),
    /// New terrain noise scale.
    TerrainScale(f64),
    /// New terrain magnitude.
    TerrainMagnitude(f64),
    /// New terrain offset.
    TerrainOffset(f64),
    /// New scarcity for one resource.
    ResourceScarcity {
        /// Resource block id.
        block: BlockTypeSize,
        /// New threshold.
        scarcity: f64,
    },
    /// New noise scale for one axis of one resource.
    ResourceScale {
        /// Resource block id.
        block: BlockTypeSize,
        /// Axis being edited.
        axis: Axis,
        /// New divisor.
        scale: f64,
    },
}

fn clamp_setting<T>(name: &'static str, value: T, range: &RangeInclusive<T>) -> Result<T>
where
    T: PartialOrd + Copy + std::fmt::Debug + Into<f64>,
{
    if value.partial_cmp(range.start()).is_none() {
        return Err(WorldError::InvalidSetting {
            name,
            value: value.into(),
        });
    }
    let clamped = if value < *range.start() {
        *range.start()
    } else if value > *range.end() {
        *range.end()
    } else {
        value
    };
    if clamped != value {
        warn!("{} {:?} is outside {:?}, using {:?}", name, value, range, clamped);
    }
    Ok(clamped)
}

fn resource_params(
    catalog: &mut BlockCatalog,
    block: BlockTypeSize,
) -> Result<&mut ResourceParams> {
    let name = match catalog.get(block) {
        Some(definition) => definition.name.clone(),
        None => {
            return Err(WorldError::UnknownBlock {
                role: "resource",
                id: block,
            })
        }
    };
    catalog
        .resource_mut(block)
        .ok_or(WorldError::NotAResource { name, id: block })
}

/// The editable state, copied out so a batch of edits commits all at once.
struct Staged {
    size: WorldSize,
    params: WorldParams,
    catalog: BlockCatalog,
}

impl Staged {
    fn write(&mut self, change: SettingChange) -> Result<()> {
        match change {
            SettingChange::Width(width) => {
                self.size.width = clamp_setting("width", width, &WIDTH_RANGE)?
            }
            SettingChange::Height(height) => {
                self.size.height = clamp_setting("height", height, &HEIGHT_RANGE)?
            }
            SettingChange::Seed(seed) => self.params.seed = seed,
            SettingChange::TerrainScale(scale) => {
                self.params.terrain.scale =
                    clamp_setting("terrain scale", scale, &TERRAIN_SCALE_RANGE)?
            }
            SettingChange::TerrainMagnitude(magnitude) => {
                self.params.terrain.magnitude =
                    clamp_setting("magnitude", magnitude, &TERRAIN_MAGNITUDE_RANGE)?
            }
            SettingChange::TerrainOffset(offset) => {
                self.params.terrain.offset =
                    clamp_setting("offset", offset, &TERRAIN_OFFSET_RANGE)?
            }
            SettingChange::ResourceScarcity { block, scarcity } => {
                let scarcity = clamp_setting("scarcity", scarcity, &SCARCITY_RANGE)?;
                resource_params(&mut self.catalog, block)?.scarcity = scarcity;
            }
            SettingChange::ResourceScale { block, axis, scale } => {
                let scale = clamp_setting("resource scale", scale, &RESOURCE_SCALE_RANGE)?;
                resource_params(&mut self.catalog, block)?
                    .scale
                    .set(axis, scale);
            }
        }
        Ok(())
    }
}

/// Owns the catalog and drives regeneration of a shared world.
pub struct SettingsPanel<R: InstanceRenderer> {
    world: MtResource<World>,
    catalog: BlockCatalog,
    renderer: R,
}

impl<R: InstanceRenderer> SettingsPanel<R> {
    /// Creates a panel editing `world` with `catalog`, feeding `renderer`.
    pub fn new(world: MtResource<World>, catalog: BlockCatalog, renderer: R) -> Self {
        SettingsPanel {
            world,
            catalog,
            renderer,
        }
    }

    /// Another handle to the world this panel edits.
    pub fn world(&self) -> MtResource<World> {
        self.world.clone()
    }

    /// The catalog as currently edited.
    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    /// The renderer batches are pushed to.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Applies one edit and regenerates.
    ///
    /// # Errors
    /// Fails if the value is NaN or the edit names a block that is not a
    /// resource. Nothing is written and nothing is regenerated in that case.
    pub fn apply(&mut self, change: SettingChange) -> Result<()> {
        self.apply_all([change])
    }

    /// Applies several edits and regenerates once at the end.
    ///
    /// The edits commit together: if any of them is rejected, none are
    /// written and the world keeps its current settings and grid.
    pub fn apply_all<I>(&mut self, changes: I) -> Result<()>
    where
        I: IntoIterator<Item = SettingChange>,
    {
        let mut world = self.world.get_mut();
        let mut staged = Staged {
            size: world.size,
            params: world.params,
            catalog: self.catalog.clone(),
        };
        for change in changes {
            staged.write(change)?;
        }

        world.size = staged.size;
        world.params = staged.params;
        self.catalog = staged.catalog;

        let batches = world.generate(&self.catalog)?;
        self.renderer.upload(batches);
        Ok(())
    }

    /// Rebuilds the world from the current settings and uploads the batches.
    pub fn regenerate(&mut self) -> Result<()> {
        let mut world = self.world.get_mut();
        let batches = world.generate(&self.catalog)?;
        self.renderer.upload(batches);
        Ok(())
    }
}
