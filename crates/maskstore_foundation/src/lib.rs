//! Core types for Maskstore.
//!
//! This crate provides:
//! - [`EntityHandle`] - Opaque integer entity handles
//! - [`Tag`], [`Tagged`], [`ComponentTag`] - Compile-time component tags
//! - [`ComponentMask`] - Per-entity capability bitmask
//! - [`IndexSet`] - Word-backed bitset over entity indices
//! - [`Error`] - Error kinds for every rejected storage operation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bitset;
pub mod entity;
pub mod error;
pub mod mask;
pub mod tag;

pub use bitset::IndexSet;
pub use entity::EntityHandle;
pub use error::{Error, ErrorKind, Result};
pub use mask::ComponentMask;
pub use tag::{ComponentTag, MAX_COMPONENTS, Tag, Tagged, tag_of};
