//! Storage configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default entity ceiling for bounded storage.
pub const DEFAULT_MAX_ENTITIES: usize = 100;

/// How the entity index space is sized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CapacityPolicy {
    /// Fixed ceiling. Mask rows and component arrays are allocated once at
    /// full size; registration fails once `max_entities` are live.
    Bounded {
        /// Maximum number of live entities.
        max_entities: usize,
    },
    /// No ceiling. The mask table grows one row per new index and component
    /// arrays catch up lazily on access.
    Growable,
}

impl CapacityPolicy {
    /// Returns the entity ceiling, if any.
    #[must_use]
    pub fn max_entities(self) -> Option<usize> {
        match self {
            Self::Bounded { max_entities } => Some(max_entities),
            Self::Growable => None,
        }
    }

    /// Returns true for the growable policy.
    #[must_use]
    pub fn is_growable(self) -> bool {
        matches!(self, Self::Growable)
    }
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self::Bounded {
            max_entities: DEFAULT_MAX_ENTITIES,
        }
    }
}

/// Configuration for a [`World`](crate::World).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StorageConfig {
    /// Capacity policy for the entity index space.
    pub policy: CapacityPolicy,

    /// Slots to reserve up front in growable mask tables and component
    /// arrays. Ignored by the bounded policy, which allocates everything.
    pub reserve: usize,
}

impl StorageConfig {
    /// Creates a bounded configuration with the given ceiling.
    #[must_use]
    pub fn bounded(max_entities: usize) -> Self {
        Self {
            policy: CapacityPolicy::Bounded { max_entities },
            ..Self::default()
        }
    }

    /// Creates a growable configuration.
    #[must_use]
    pub fn growable() -> Self {
        Self {
            policy: CapacityPolicy::Growable,
            ..Self::default()
        }
    }

    /// Builder method to set the growable reservation.
    #[must_use]
    pub fn with_reserve(mut self, reserve: usize) -> Self {
        self.reserve = reserve;
        self
    }

    /// Returns the entity ceiling, if any.
    #[must_use]
    pub fn max_entities(&self) -> Option<usize> {
        self.policy.max_entities()
    }
}
