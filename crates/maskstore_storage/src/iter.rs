//! Filtered iteration over one component.
//!
//! Both iterators walk `[0, bound)` and yield only indices whose bit for
//! the queried tag is set, jumping between them with the tag's
//! [`IndexSet`] instead of testing every slot. They are double-ended and
//! borrow the world, so they always reflect the mask state of the
//! traversal that created them.

// Indices stay below the registry bound, which fits in a u32 handle.
#![allow(clippy::cast_possible_truncation)]

use std::iter::FusedIterator;
use std::slice;

use maskstore_foundation::{EntityHandle, IndexSet};

use crate::component::Column;

/// Shared filtered iterator, created by [`World::iter`](crate::World::iter).
pub struct Iter<'a, V> {
    column: &'a Column<V>,
    enabled: &'a IndexSet,
    front: usize,
    back: usize,
}

impl<'a, V: Default> Iter<'a, V> {
    pub(crate) fn new(column: &'a Column<V>, enabled: &'a IndexSet, bound: usize) -> Self {
        Self {
            column,
            enabled,
            front: 0,
            back: bound,
        }
    }
}

impl<'a, V: Default> Iterator for Iter<'a, V> {
    type Item = (EntityHandle, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.enabled.next_set(self.front, self.back)?;
        self.front = index + 1;
        Some((EntityHandle::new(index as u32), self.column.get(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.back.saturating_sub(self.front)))
    }
}

impl<V: Default> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.enabled.prev_set(self.front, self.back)?;
        self.back = index;
        Some((EntityHandle::new(index as u32), self.column.get(index)))
    }
}

impl<V: Default> FusedIterator for Iter<'_, V> {}

/// Mutable filtered iterator, created by [`World::iter_mut`](crate::World::iter_mut).
///
/// `slots` always covers exactly `[front, back)`, so skipping to the next
/// enabled index is a single `nth` on the slice iterator.
pub struct IterMut<'a, V> {
    slots: slice::IterMut<'a, V>,
    enabled: &'a IndexSet,
    front: usize,
    back: usize,
}

impl<'a, V> IterMut<'a, V> {
    pub(crate) fn new(slots: &'a mut [V], enabled: &'a IndexSet) -> Self {
        let back = slots.len();
        Self {
            slots: slots.iter_mut(),
            enabled,
            front: 0,
            back,
        }
    }
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (EntityHandle, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.enabled.next_set(self.front, self.back)?;
        let slot = self.slots.nth(index - self.front)?;
        self.front = index + 1;
        Some((EntityHandle::new(index as u32), slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.back - self.front))
    }
}

impl<V> DoubleEndedIterator for IterMut<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.enabled.prev_set(self.front, self.back)?;
        let slot = self.slots.nth_back(self.back - 1 - index)?;
        self.back = index;
        Some((EntityHandle::new(index as u32), slot))
    }
}

impl<V> FusedIterator for IterMut<'_, V> {}
