//! Maskstore - flat entity-component storage
//!
//! This crate re-exports both layers of the Maskstore system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: maskstore_storage    — Entity registry, capability masks, component stores
//! Layer 0: maskstore_foundation — Core types (EntityHandle, ComponentMask, Tag, Error)
//! ```

pub use maskstore_foundation as foundation;
pub use maskstore_storage as storage;

pub use maskstore_foundation::{
    ComponentMask, ComponentTag, EntityHandle, Error, ErrorKind, MAX_COMPONENTS, Result, Tag,
    Tagged,
};
pub use maskstore_storage::{CapacityPolicy, StorageConfig, World};
