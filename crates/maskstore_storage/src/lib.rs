//! Entity registry, capability masks, and dense component storage for Maskstore.
//!
//! This crate provides:
//! - [`EntityRegistry`] - Handle allocation and recycling under a [`CapacityPolicy`]
//! - [`MaskTable`] - Per-entity capability bitmasks with per-tag indices
//! - [`ComponentStore`] - Type-erased dense arrays, one per registered tag
//! - [`World`] - The accessor layer tying the three together

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod config;
pub mod entity;
pub mod iter;
pub mod mask;
pub mod world;

pub use component::{Column, ComponentStore, ErasedColumn};
pub use config::{CapacityPolicy, DEFAULT_MAX_ENTITIES, StorageConfig};
pub use entity::{EntityRegistry, Release};
pub use iter::{Iter, IterMut};
pub use mask::MaskTable;
pub use world::World;
