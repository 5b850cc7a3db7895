//! Capability mask table.
//!
//! One [`ComponentMask`] row per entity index, plus one [`IndexSet`] per tag
//! holding the same bits column-wise. Rows answer "what does this entity
//! have enabled"; columns let iteration jump straight to the next entity
//! with a given tag enabled.

use std::array;

use maskstore_foundation::{
    ComponentMask, ComponentTag, EntityHandle, Error, IndexSet, MAX_COMPONENTS, Result,
};

/// Per-entity capability bitmasks.
#[derive(Clone, Debug)]
pub struct MaskTable {
    rows: Vec<ComponentMask>,
    columns: [IndexSet; MAX_COMPONENTS],
}

impl Default for MaskTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rows(0)
    }

    /// Creates a table with `rows` all-clear rows.
    #[must_use]
    pub fn with_rows(rows: usize) -> Self {
        Self {
            rows: vec![ComponentMask::empty(); rows],
            columns: array::from_fn(|_| IndexSet::with_capacity(rows)),
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reserves room for `additional` more rows.
    pub fn reserve(&mut self, additional: usize) {
        self.rows.reserve(additional);
    }

    /// Makes sure a row exists for `handle`, appending clear rows as needed.
    pub fn ensure_row(&mut self, handle: EntityHandle) {
        if handle.index() >= self.rows.len() {
            self.rows.resize(handle.index() + 1, ComponentMask::empty());
        }
    }

    /// Drops every row at or above `len`.
    pub fn truncate(&mut self, len: usize) {
        for index in len..self.rows.len() {
            self.clear_row_at(index);
        }
        self.rows.truncate(len);
    }

    /// Clears every bit in the row for `handle`.
    pub fn reset_row(&mut self, handle: EntityHandle) {
        self.clear_row_at(handle.index());
    }

    /// Returns the row for `handle`.
    #[must_use]
    pub fn row(&self, handle: EntityHandle) -> Option<ComponentMask> {
        self.rows.get(handle.index()).copied()
    }

    /// Checks whether `tag` is enabled for `handle`.
    #[must_use]
    pub fn is_enabled(&self, handle: EntityHandle, tag: ComponentTag) -> bool {
        self.row(handle).is_some_and(|row| row.contains(tag))
    }

    /// Returns the indices with `tag` enabled.
    #[must_use]
    pub fn enabled(&self, tag: ComponentTag) -> &IndexSet {
        &self.columns[tag.index()]
    }

    /// Sets `tag` for `handle`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHandle` if no row exists for `handle`, or
    /// `AlreadyEnabled` if the bit was already set.
    pub fn enable(&mut self, handle: EntityHandle, tag: ComponentTag) -> Result<()> {
        let bound = self.rows.len();
        let row = self
            .rows
            .get_mut(handle.index())
            .ok_or_else(|| Error::invalid_handle(handle, bound))?;
        if !row.insert(tag) {
            return Err(Error::already_enabled(handle, tag));
        }
        self.columns[tag.index()].insert(handle.index());
        Ok(())
    }

    /// Clears `tag` for `handle`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHandle` if no row exists for `handle`, or
    /// `AlreadyDisabled` if the bit was already clear.
    pub fn disable(&mut self, handle: EntityHandle, tag: ComponentTag) -> Result<()> {
        let bound = self.rows.len();
        let row = self
            .rows
            .get_mut(handle.index())
            .ok_or_else(|| Error::invalid_handle(handle, bound))?;
        if !row.remove(tag) {
            return Err(Error::already_disabled(handle, tag));
        }
        self.columns[tag.index()].remove(handle.index());
        Ok(())
    }

    /// Clears `tag` in every row. Returns how many rows had it set.
    pub fn clear_tag(&mut self, tag: ComponentTag) -> usize {
        let column = &mut self.columns[tag.index()];
        let cleared = column.len();
        for index in column.iter() {
            self.rows[index].remove(tag);
        }
        column.clear();
        cleared
    }

    /// Checks that rows and per-tag columns hold the same bits.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolated` describing the first disagreement.
    pub fn check_invariants(&self) -> Result<()> {
        for (index, row) in self.rows.iter().enumerate() {
            for tag in row.iter() {
                if !self.columns[tag.index()].contains(index) {
                    return Err(Error::invariant(format!(
                        "row {index} has {tag} set but its column does not"
                    )));
                }
            }
        }
        for (tag_index, column) in self.columns.iter().enumerate() {
            let row_count = self
                .rows
                .iter()
                .filter(|row| row.bits() & (1 << tag_index) != 0)
                .count();
            if column.len() != row_count {
                return Err(Error::invariant(format!(
                    "column #{tag_index} holds {} indices but {row_count} rows have it set",
                    column.len()
                )));
            }
        }
        Ok(())
    }

    fn clear_row_at(&mut self, index: usize) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        for tag in row.iter() {
            self.columns[tag.index()].remove(index);
        }
        row.clear();
    }
}
