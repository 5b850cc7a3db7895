//! Entity handle allocation and recycling.
//!
//! The `EntityRegistry` hands out integer handles, reclaims them on
//! unregistration, and defines the addressable index range that the mask
//! table and every component array are indexed by.

// Handles are u32; the bound is checked before narrowing.
#![allow(clippy::cast_possible_truncation)]

use maskstore_foundation::{EntityHandle, Error, IndexSet, Result};
use tracing::trace;

use crate::config::CapacityPolicy;

/// What happened to the index space when a handle was released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// The handle went onto the recycling stack.
    Recycled,
    /// The handle was the top index and the range shrank by one.
    Truncated,
}

/// Manages entity handle lifecycle.
///
/// Handles are reused from the recycling stack (most recently freed first)
/// before the index space grows. Under the growable policy, releasing the
/// top index shrinks the range instead of recycling it.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    /// Capacity policy fixed at construction.
    policy: CapacityPolicy,
    /// Addressable index range: every allocated index is below this.
    bound: usize,
    /// Indices currently handed out.
    alive: IndexSet,
    /// Freed handles available for reuse.
    recycled: Vec<EntityHandle>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new(CapacityPolicy::default())
    }
}

impl EntityRegistry {
    /// Creates an empty registry under the given policy.
    #[must_use]
    pub fn new(policy: CapacityPolicy) -> Self {
        let alive = match policy {
            CapacityPolicy::Bounded { max_entities } => IndexSet::with_capacity(max_entities),
            CapacityPolicy::Growable => IndexSet::new(),
        };
        Self {
            policy,
            bound: 0,
            alive,
            recycled: Vec::new(),
        }
    }

    /// Allocates a handle.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExhausted` when bounded storage already holds
    /// `max_entities` live entities, or when the index space no longer fits
    /// in a handle.
    pub fn register(&mut self) -> Result<EntityHandle> {
        if let CapacityPolicy::Bounded { max_entities } = self.policy {
            if self.len() >= max_entities {
                return Err(Error::capacity_exhausted(max_entities));
            }
        }

        let handle = if let Some(handle) = self.recycled.pop() {
            handle
        } else {
            let index = u32::try_from(self.bound)
                .map_err(|_| Error::capacity_exhausted(u32::MAX as usize))?;
            self.bound += 1;
            EntityHandle::new(index)
        };

        self.alive.insert(handle.index());
        trace!(?handle, live = self.len(), "entity registered");
        Ok(handle)
    }

    /// Releases a handle.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHandle` if the handle is outside the addressable
    /// range, or `EntityNotAlive` if it is in range but not handed out.
    pub fn unregister(&mut self, handle: EntityHandle) -> Result<Release> {
        self.validate(handle)?;
        self.alive.remove(handle.index());

        let release = if self.policy.is_growable() && handle.index() + 1 == self.bound {
            self.bound -= 1;
            Release::Truncated
        } else {
            self.recycled.push(handle);
            Release::Recycled
        };

        trace!(?handle, ?release, live = self.len(), "entity unregistered");
        Ok(release)
    }

    /// Validates that a handle is addressable and live.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHandle` or `EntityNotAlive` with the offending handle.
    pub fn validate(&self, handle: EntityHandle) -> Result<()> {
        if handle.index() >= self.bound {
            return Err(Error::invalid_handle(handle, self.bound));
        }
        if !self.alive.contains(handle.index()) {
            return Err(Error::not_alive(handle));
        }
        Ok(())
    }

    /// Checks if a handle is currently live.
    #[must_use]
    pub fn is_alive(&self, handle: EntityHandle) -> bool {
        handle.index() < self.bound && self.alive.contains(handle.index())
    }

    /// Returns the addressable index range.
    ///
    /// Bounded: the high-water mark of allocated indices, which never
    /// shrinks. Growable: one past the current top index.
    #[must_use]
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Returns the entity ceiling, if any.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.policy.max_entities()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Returns the recycling stack, oldest first.
    #[must_use]
    pub fn recycled(&self) -> &[EntityHandle] {
        &self.recycled
    }

    /// Iterates over live handles in index order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = EntityHandle> + '_ {
        self.alive.iter().map(|index| EntityHandle::new(index as u32))
    }

    /// Checks the registry's own bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolated` describing the first inconsistency found.
    pub fn check_invariants(&self) -> Result<()> {
        if let Some(max_entities) = self.capacity() {
            if self.len() > max_entities || self.bound > max_entities {
                return Err(Error::invariant(format!(
                    "{} live entities and bound {} exceed capacity {max_entities}",
                    self.len(),
                    self.bound
                )));
            }
        }
        if let Some(handle) = self.iter().find(|h| h.index() >= self.bound) {
            return Err(Error::invariant(format!(
                "live {handle:?} lies outside bound {}",
                self.bound
            )));
        }

        let mut seen = IndexSet::with_capacity(self.bound);
        for &handle in &self.recycled {
            if handle.index() >= self.bound {
                return Err(Error::invariant(format!(
                    "recycled {handle:?} lies outside bound {}",
                    self.bound
                )));
            }
            if self.alive.contains(handle.index()) {
                return Err(Error::invariant(format!("recycled {handle:?} is alive")));
            }
            if !seen.insert(handle.index()) {
                return Err(Error::invariant(format!("{handle:?} recycled twice")));
            }
        }

        if self.len() + self.recycled.len() != self.bound {
            return Err(Error::invariant(format!(
                "{} live + {} recycled does not cover bound {}",
                self.len(),
                self.recycled.len(),
                self.bound
            )));
        }
        Ok(())
    }
}
