//! # Generation
//!
//! The passes that fill a voxel grid from noise, in the order they run:
//!
//! 1. [`resources::ResourceGenerator`] scatters resource block types through the empty grid
//! 2. [`terrain::TerrainGenerator`] carves the surface, fills beneath it and clears above it
//!
//! Both passes draw their noise from a [`noise_field::NoiseSource`], one field
//! per resource type followed by one for the height map.

pub mod noise_field;
pub mod resources;
pub mod rng;
pub mod terrain;

pub use noise_field::{ConstantSource, NoiseField, NoiseSource, SimplexSource};
pub use resources::ResourceGenerator;
pub use rng::SeededRng;
pub use terrain::{TerrainGenerator, TerrainParams};
