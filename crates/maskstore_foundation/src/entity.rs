//! Opaque entity handles.

use std::fmt;

/// Opaque entity handle.
///
/// A handle is nothing more than an index into the capability mask table
/// and into every component's dense array. Handles are recycled after
/// unregistration, so holding one past `unregister_entity` is the caller's
/// responsibility.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(u32);

impl EntityHandle {
    /// Creates a handle from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the index as a `usize`, for slicing into storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for EntityHandle {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityHandle({})", self.0)
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
