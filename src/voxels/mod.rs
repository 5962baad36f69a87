//! # Voxel Data
//!
//! This module contains the data model of the voxel world.
//!
//! ## Architecture
//!
//! * **Block**: Block type ids, the catalog describing them, and the six block faces
//! * **Grid**: The dense `width × height × width` array of voxels
//! * **World**: Owns the grid and runs the generation pipeline over it
//!
//! ## Data Flow
//!
//! 1. The world allocates a fresh grid for every generation request
//! 2. Resource and terrain passes write block types into it
//! 3. The visibility pass assigns instance ids to exposed voxels
//! 4. The finished grid replaces the previous one and its batches go to the renderer

pub mod block;
pub mod grid;
pub mod world;
