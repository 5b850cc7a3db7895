//! Type-erased dense component storage.
//!
//! Each registered tag owns one [`Column`], a dense `Vec` indexed by entity
//! handle. Columns are held as `Box<dyn ErasedColumn>` and re-typed through
//! a checked downcast on every typed access, so a tag bound to the wrong
//! value type is reported rather than reinterpreted.

use std::any::{self, Any};
use std::array;
use std::fmt;

use maskstore_foundation::{ComponentTag, Error, MAX_COMPONENTS, Result, Tag, tag_of};

/// Object-safe view of a [`Column`] with its value type erased.
pub trait ErasedColumn: Any {
    /// Returns the number of materialized slots.
    fn len(&self) -> usize;

    /// Returns true if no slot is materialized.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Puts the slot at `index` back to the default value, if materialized.
    fn reset(&mut self, index: usize);

    /// Returns the value type's name, for diagnostics.
    fn value_type_name(&self) -> &'static str;

    /// Upcasts for downcasting back to a concrete column.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts for downcasting back to a concrete column.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Dense array of one component's values, indexed by entity handle.
///
/// Slots past the end of the array have not been materialized yet; reads
/// see a default-initialized filler and writes grow the array first.
#[derive(Debug)]
pub struct Column<V> {
    slots: Vec<V>,
    filler: V,
}

impl<V: Default> Default for Column<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Default> Column<V> {
    /// Creates an empty column.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            filler: V::default(),
        }
    }

    /// Creates a column with `len` default slots and room for `capacity`.
    #[must_use]
    pub fn with_len(len: usize, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(len.max(capacity));
        slots.resize_with(len, V::default);
        Self {
            slots,
            filler: V::default(),
        }
    }

    /// Returns the number of materialized slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slot is materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Extends the array with default values up to `len` slots.
    pub fn grow_to(&mut self, len: usize) {
        if self.slots.len() < len {
            self.slots.resize_with(len, V::default);
        }
    }

    /// Reads the slot at `index`; unmaterialized slots read as the default.
    #[must_use]
    pub fn get(&self, index: usize) -> &V {
        self.slots.get(index).unwrap_or(&self.filler)
    }

    /// Returns the slot at `index`, growing the array to reach it.
    pub fn get_mut(&mut self, index: usize) -> &mut V {
        self.grow_to(index + 1);
        &mut self.slots[index]
    }

    /// Puts the slot at `index` back to the default value.
    ///
    /// Unmaterialized slots already read as the default and are left alone.
    pub fn reset(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = V::default();
        }
    }

    /// Writes `value` at `index`, growing the array to reach it.
    pub fn set(&mut self, index: usize, value: V) {
        *self.get_mut(index) = value;
    }

    /// Returns the materialized slots.
    #[must_use]
    pub fn as_slice(&self) -> &[V] {
        &self.slots
    }

    /// Returns the materialized slots mutably.
    pub fn as_mut_slice(&mut self) -> &mut [V] {
        &mut self.slots
    }
}

impl<V: Default + 'static> ErasedColumn for Column<V> {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn reset(&mut self, index: usize) {
        Column::reset(self, index);
    }

    fn value_type_name(&self) -> &'static str {
        any::type_name::<V>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Owns one type-erased column per registered component tag.
pub struct ComponentStore {
    columns: [Option<Box<dyn ErasedColumn>>; MAX_COMPONENTS],
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(tag, column)| {
                (tag, (column.value_type_name(), column.len()))
            }))
            .finish()
    }
}

impl ComponentStore {
    /// Creates a store with no registered components.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: array::from_fn(|_| None),
        }
    }

    /// Registers a column for `T` with `len` default slots.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if `T`'s tag already has a column.
    pub fn register<T: Tag>(&mut self, len: usize, reserve: usize) -> Result<()> {
        let tag = tag_of::<T>();
        let slot = &mut self.columns[tag.index()];
        if slot.is_some() {
            return Err(Error::already_registered(tag));
        }
        *slot = Some(Box::new(Column::<T::Value>::with_len(len, reserve)));
        Ok(())
    }

    /// Releases the column for `T`.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` if `T`'s tag has no column.
    pub fn unregister<T: Tag>(&mut self) -> Result<()> {
        let tag = tag_of::<T>();
        self.columns[tag.index()]
            .take()
            .map(drop)
            .ok_or_else(|| Error::not_registered(tag))
    }

    /// Resets the slot at `index` in every registered column.
    pub fn reset_slot(&mut self, index: usize) {
        for column in self.columns.iter_mut().flatten() {
            column.reset(index);
        }
    }

    /// Checks whether `tag` has a column.
    #[must_use]
    pub fn is_registered(&self, tag: ComponentTag) -> bool {
        self.columns[tag.index()].is_some()
    }

    /// Returns the number of registered columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().flatten().count()
    }

    /// Returns true if no column is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Option::is_none)
    }

    /// Returns the typed column for `T`.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` if no column exists, or
    /// `TypeMismatch` if the column holds a different value type.
    pub fn column<T: Tag>(&self) -> Result<&Column<T::Value>> {
        let tag = tag_of::<T>();
        let column = self.columns[tag.index()]
            .as_deref()
            .ok_or_else(|| Error::not_registered(tag))?;
        let actual = column.value_type_name();
        column
            .as_any()
            .downcast_ref::<Column<T::Value>>()
            .ok_or_else(|| Error::type_mismatch(tag, any::type_name::<T::Value>(), actual))
    }

    /// Returns the typed column for `T` mutably.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` if no column exists, or
    /// `TypeMismatch` if the column holds a different value type.
    pub fn column_mut<T: Tag>(&mut self) -> Result<&mut Column<T::Value>> {
        let tag = tag_of::<T>();
        let column = self.columns[tag.index()]
            .as_deref_mut()
            .ok_or_else(|| Error::not_registered(tag))?;
        let actual = column.value_type_name();
        column
            .as_any_mut()
            .downcast_mut::<Column<T::Value>>()
            .ok_or_else(|| Error::type_mismatch(tag, any::type_name::<T::Value>(), actual))
    }

    /// Iterates registered columns in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentTag, &dyn ErasedColumn)> + '_ {
        self.columns.iter().enumerate().filter_map(|(index, column)| {
            let tag = ComponentTag::new(index).ok()?;
            column.as_deref().map(|column| (tag, column))
        })
    }
}
