//! # Core Module
//!
//! Shared-ownership primitives used where a world crosses thread or owner
//! boundaries, such as a settings surface and a renderer holding the same world.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted resource with read-write locking

pub mod mt_resource;

pub use mt_resource::MtResource;
