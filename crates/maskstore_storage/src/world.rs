//! The accessor layer.
//!
//! `World` owns the entity registry, the capability mask table, and the
//! component store, and is the only way to read or write component values.
//! Every typed access checks the handle, the capability bit, and the
//! presence of a store before touching memory.

use maskstore_foundation::{ComponentMask, EntityHandle, Error, Result, Tag, tag_of};
use tracing::{debug, trace, warn};

use crate::component::ComponentStore;
use crate::config::{CapacityPolicy, StorageConfig};
use crate::entity::{EntityRegistry, Release};
use crate::iter::{Iter, IterMut};
use crate::mask::MaskTable;

/// Entity-component storage context.
///
/// Construct one per independent set of entities; dropping it releases
/// every component array.
///
/// ```
/// use maskstore_foundation::Tagged;
/// use maskstore_storage::World;
///
/// type ItemName = Tagged<String, 0>;
///
/// let mut world = World::default();
/// world.register_component::<ItemName>().unwrap();
///
/// let cloak = world.register_entity().unwrap();
/// world.enable::<ItemName>(cloak).unwrap();
/// world.set::<ItemName>(cloak, "cloak".to_string()).unwrap();
///
/// assert_eq!(world.get::<ItemName>(cloak).unwrap(), "cloak");
/// ```
#[derive(Debug)]
pub struct World {
    config: StorageConfig,
    entities: EntityRegistry,
    masks: MaskTable,
    components: ComponentStore,
}

impl Default for World {
    fn default() -> Self {
        Self::new(StorageConfig::default())
    }
}

impl World {
    /// Creates an empty world.
    ///
    /// Bounded worlds allocate their full mask table here; growable worlds
    /// start empty, reserving `config.reserve` rows.
    #[must_use]
    pub fn new(config: StorageConfig) -> Self {
        let masks = match config.policy {
            CapacityPolicy::Bounded { max_entities } => MaskTable::with_rows(max_entities),
            CapacityPolicy::Growable => {
                let mut masks = MaskTable::new();
                masks.reserve(config.reserve);
                masks
            }
        };
        debug!(policy = ?config.policy, "world created");
        Self {
            entities: EntityRegistry::new(config.policy),
            masks,
            components: ComponentStore::new(),
            config,
        }
    }

    /// Creates a bounded world with the given entity ceiling.
    #[must_use]
    pub fn bounded(max_entities: usize) -> Self {
        Self::new(StorageConfig::bounded(max_entities))
    }

    /// Creates a growable world.
    #[must_use]
    pub fn growable() -> Self {
        Self::new(StorageConfig::growable())
    }

    /// Returns the configuration this world was built with.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns the addressable index range.
    #[must_use]
    pub fn bound(&self) -> usize {
        self.entities.bound()
    }

    /// Returns the entity registry.
    #[must_use]
    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    /// Checks if a handle is currently live.
    #[must_use]
    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.entities.is_alive(handle)
    }

    // --- Entity Operations ---

    /// Registers an entity and returns its handle.
    ///
    /// A recycled handle comes back with every capability disabled.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExhausted` when a bounded world is full.
    pub fn register_entity(&mut self) -> Result<EntityHandle> {
        let handle = self.entities.register()?;
        self.masks.ensure_row(handle);
        self.masks.reset_row(handle);
        Ok(handle)
    }

    /// Unregisters an entity, clearing its capability row and putting its
    /// slot in every component store back to the default value.
    ///
    /// Under the growable policy, releasing the top handle shrinks the
    /// addressable range; any other handle is recycled.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHandle` for a handle outside the addressable range,
    /// or `EntityNotAlive` for one already unregistered.
    pub fn unregister_entity(&mut self, handle: EntityHandle) -> Result<()> {
        let release = self.entities.unregister(handle)?;
        self.masks.reset_row(handle);
        self.components.reset_slot(handle.index());
        if release == Release::Truncated {
            self.masks.truncate(self.entities.bound());
        }
        Ok(())
    }

    // --- Component Registration ---

    /// Allocates the store for `T`.
    ///
    /// Bounded worlds size it to the entity ceiling once; growable worlds
    /// start it empty and grow it on access.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if `T`'s tag already has a store.
    pub fn register_component<T: Tag>(&mut self) -> Result<()> {
        let len = self.config.max_entities().unwrap_or(0);
        self.components.register::<T>(len, self.config.reserve)?;
        debug!(
            tag = T::INDEX,
            value_type = std::any::type_name::<T::Value>(),
            len,
            "component registered"
        );
        Ok(())
    }

    /// Releases the store for `T` and disables `T` on every entity.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` if `T`'s tag has no store.
    pub fn unregister_component<T: Tag>(&mut self) -> Result<()> {
        let tag = tag_of::<T>();
        self.components.unregister::<T>()?;
        let cleared = self.masks.clear_tag(tag);
        debug!(tag = T::INDEX, cleared, "component unregistered");
        Ok(())
    }

    /// Checks whether `T` has a store.
    #[must_use]
    pub fn is_registered<T: Tag>(&self) -> bool {
        self.components.is_registered(tag_of::<T>())
    }

    // --- Capability Toggles ---

    /// Enables `T` for `handle`.
    ///
    /// This is a pure mask operation; `T` need not have a store yet.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyEnabled` if the bit is set, or a handle error.
    pub fn enable<T: Tag>(&mut self, handle: EntityHandle) -> Result<()> {
        let tag = tag_of::<T>();
        self.entities.validate(handle)?;
        self.masks.enable(handle, tag)?;
        trace!(?handle, %tag, "component enabled");
        Ok(())
    }

    /// Disables `T` for `handle`. The stored value is left in place.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyDisabled` if the bit is clear, or a handle error.
    pub fn disable<T: Tag>(&mut self, handle: EntityHandle) -> Result<()> {
        let tag = tag_of::<T>();
        self.entities.validate(handle)?;
        self.masks.disable(handle, tag)?;
        trace!(?handle, %tag, "component disabled");
        Ok(())
    }

    /// Checks whether `T` is enabled for `handle`.
    #[must_use]
    pub fn is_enabled<T: Tag>(&self, handle: EntityHandle) -> bool {
        self.masks.is_enabled(handle, tag_of::<T>())
    }

    /// Returns the capability row for `handle`.
    ///
    /// # Errors
    ///
    /// Returns a handle error if `handle` is not live.
    pub fn mask(&self, handle: EntityHandle) -> Result<ComponentMask> {
        self.entities.validate(handle)?;
        Ok(self.masks.row(handle).unwrap_or_default())
    }

    // --- Component Access ---

    /// Writes `value` as `handle`'s `T` component.
    ///
    /// # Errors
    ///
    /// Returns a handle error, `ComponentDisabled` if `T` is not enabled for
    /// `handle`, or `ComponentNotRegistered` if `T` has no store.
    pub fn set<T: Tag>(&mut self, handle: EntityHandle, value: T::Value) -> Result<()> {
        *self.get_mut::<T>(handle)? = value;
        Ok(())
    }

    /// Reads `handle`'s `T` component.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`set`](Self::set).
    pub fn get<T: Tag>(&self, handle: EntityHandle) -> Result<&T::Value> {
        self.check_gate::<T>(handle)?;
        Ok(self.components.column::<T>()?.get(handle.index()))
    }

    /// Reads `handle`'s `T` component by value.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`set`](Self::set).
    pub fn get_cloned<T: Tag>(&self, handle: EntityHandle) -> Result<T::Value>
    where
        T::Value: Clone,
    {
        self.get::<T>(handle).cloned()
    }

    /// Returns `handle`'s `T` component mutably, growing the store if it
    /// has not reached `handle` yet.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`set`](Self::set).
    pub fn get_mut<T: Tag>(&mut self, handle: EntityHandle) -> Result<&mut T::Value> {
        self.check_gate::<T>(handle)?;
        Ok(self.components.column_mut::<T>()?.get_mut(handle.index()))
    }

    // --- Iteration ---

    /// Iterates entities with `T` enabled, in handle order.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` if `T` has no store.
    pub fn iter<T: Tag>(&self) -> Result<Iter<'_, T::Value>> {
        let tag = tag_of::<T>();
        let column = self.components.column::<T>()?;
        Ok(Iter::new(column, self.masks.enabled(tag), self.entities.bound()))
    }

    /// Iterates entities with `T` enabled, yielding mutable values.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` if `T` has no store.
    pub fn iter_mut<T: Tag>(&mut self) -> Result<IterMut<'_, T::Value>> {
        let tag = tag_of::<T>();
        let bound = self.entities.bound();
        let column = self.components.column_mut::<T>()?;
        column.grow_to(bound);
        let slots = &mut column.as_mut_slice()[..bound];
        Ok(IterMut::new(slots, self.masks.enabled(tag)))
    }

    /// Returns `T`'s whole backing array, ignoring capability bits.
    ///
    /// Unlike [`iter_mut`](Self::iter_mut), this exposes every slot: slots of
    /// entities with `T` disabled, slots of unregistered or recycled
    /// entities holding stale values, and default filler created by lazy
    /// growth. A growable store is first grown to the addressable range.
    /// The slice borrows the world, so it cannot outlive a resize or the
    /// unregistration of `T`.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` if `T` has no store.
    pub fn unfiltered_slots_mut<T: Tag>(&mut self) -> Result<&mut [T::Value]> {
        let bound = self.entities.bound();
        let column = self.components.column_mut::<T>()?;
        column.grow_to(bound);
        Ok(column.as_mut_slice())
    }

    // --- Diagnostics ---

    /// Verifies the storage invariants.
    ///
    /// Checks that live and recycled handles partition the addressable
    /// range, that mask rows cover it and agree with the per-tag indices,
    /// that no unregistered row has a bit set, and that bounded stores span
    /// the whole entity ceiling.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolated` describing the first violation found.
    pub fn check_invariants(&self) -> Result<()> {
        self.verify().inspect_err(|err| warn!(%err, "storage invariant violated"))
    }

    fn verify(&self) -> Result<()> {
        self.entities.check_invariants()?;
        self.masks.check_invariants()?;

        let bound = self.entities.bound();
        let rows = self.masks.len();
        let rows_ok = match self.config.policy {
            CapacityPolicy::Bounded { max_entities } => rows == max_entities,
            CapacityPolicy::Growable => rows == bound,
        };
        if !rows_ok {
            return Err(Error::invariant(format!(
                "mask table has {rows} rows for bound {bound}"
            )));
        }

        for handle in self.entities.recycled() {
            if self.masks.row(*handle).is_some_and(|row| !row.is_empty()) {
                return Err(Error::invariant(format!(
                    "recycled {handle:?} still has capabilities enabled"
                )));
            }
        }

        if let Some(max_entities) = self.config.max_entities() {
            for (tag, column) in self.components.iter() {
                if column.len() != max_entities {
                    return Err(Error::invariant(format!(
                        "store {tag} has {} slots, expected {max_entities}",
                        column.len()
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_gate<T: Tag>(&self, handle: EntityHandle) -> Result<()> {
        let tag = tag_of::<T>();
        self.entities.validate(handle)?;
        if !self.masks.is_enabled(handle, tag) {
            return Err(Error::disabled(handle, tag));
        }
        if !self.components.is_registered(tag) {
            return Err(Error::not_registered(tag));
        }
        Ok(())
    }
}
