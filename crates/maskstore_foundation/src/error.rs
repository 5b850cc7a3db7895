//! Error types for Maskstore.
//!
//! Every storage operation that can be rejected returns a [`Result`]; the
//! [`ErrorKind`] says which precondition failed. No rejection leaves the
//! storage half-modified.

use thiserror::Error;

use crate::entity::EntityHandle;
use crate::tag::ComponentTag;

/// The main error type for Maskstore operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

/// Shorthand for results carrying a Maskstore [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a capacity exhausted error.
    #[must_use]
    pub fn capacity_exhausted(max_entities: usize) -> Self {
        Self::new(ErrorKind::CapacityExhausted { max_entities })
    }

    /// Creates an invalid handle error.
    #[must_use]
    pub fn invalid_handle(handle: EntityHandle, bound: usize) -> Self {
        Self::new(ErrorKind::InvalidHandle { handle, bound })
    }

    /// Creates an entity not alive error.
    #[must_use]
    pub fn not_alive(handle: EntityHandle) -> Self {
        Self::new(ErrorKind::EntityNotAlive(handle))
    }

    /// Creates an already enabled error.
    #[must_use]
    pub fn already_enabled(handle: EntityHandle, tag: ComponentTag) -> Self {
        Self::new(ErrorKind::AlreadyEnabled { handle, tag })
    }

    /// Creates an already disabled error.
    #[must_use]
    pub fn already_disabled(handle: EntityHandle, tag: ComponentTag) -> Self {
        Self::new(ErrorKind::AlreadyDisabled { handle, tag })
    }

    /// Creates a component disabled error.
    #[must_use]
    pub fn disabled(handle: EntityHandle, tag: ComponentTag) -> Self {
        Self::new(ErrorKind::ComponentDisabled { handle, tag })
    }

    /// Creates a component not registered error.
    #[must_use]
    pub fn not_registered(tag: ComponentTag) -> Self {
        Self::new(ErrorKind::ComponentNotRegistered(tag))
    }

    /// Creates an already registered error.
    #[must_use]
    pub fn already_registered(tag: ComponentTag) -> Self {
        Self::new(ErrorKind::AlreadyRegistered(tag))
    }

    /// Creates a tag out of range error.
    #[must_use]
    pub fn tag_out_of_range(index: usize) -> Self {
        Self::new(ErrorKind::TagOutOfRange(index))
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(tag: ComponentTag, expected: &'static str, actual: &'static str) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            tag,
            expected,
            actual,
        })
    }

    /// Creates an invariant violation error.
    #[must_use]
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvariantViolated(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Bounded storage already holds its maximum number of live entities.
    #[error("capacity exhausted: {max_entities} entities already live")]
    CapacityExhausted {
        /// The configured ceiling.
        max_entities: usize,
    },

    /// Handle lies outside the addressable index range.
    #[error("invalid handle: {handle:?} (bound {bound})")]
    InvalidHandle {
        /// The rejected handle.
        handle: EntityHandle,
        /// The addressable range at the time of the call.
        bound: usize,
    },

    /// Handle is in range but not currently registered.
    #[error("entity not alive: {0:?}")]
    EntityNotAlive(EntityHandle),

    /// Component was already enabled for the entity.
    #[error("component {tag} already enabled on {handle:?}")]
    AlreadyEnabled {
        /// The entity.
        handle: EntityHandle,
        /// The component tag.
        tag: ComponentTag,
    },

    /// Component was already disabled for the entity.
    #[error("component {tag} already disabled on {handle:?}")]
    AlreadyDisabled {
        /// The entity.
        handle: EntityHandle,
        /// The component tag.
        tag: ComponentTag,
    },

    /// Component is not enabled for the entity.
    #[error("component {tag} not enabled on {handle:?}")]
    ComponentDisabled {
        /// The entity.
        handle: EntityHandle,
        /// The component tag.
        tag: ComponentTag,
    },

    /// No store is registered for the component tag.
    #[error("component not registered: {0}")]
    ComponentNotRegistered(ComponentTag),

    /// A store is already registered for the component tag.
    #[error("component already registered: {0}")]
    AlreadyRegistered(ComponentTag),

    /// Tag index does not fit in a capability mask.
    #[error("tag index out of range: {0}")]
    TagOutOfRange(usize),

    /// Tag is registered with a different value type.
    #[error("type mismatch for component {tag}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The component tag.
        tag: ComponentTag,
        /// The value type the caller asked for.
        expected: &'static str,
        /// The value type the store holds.
        actual: &'static str,
    },

    /// Internal bookkeeping disagrees with itself.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}
