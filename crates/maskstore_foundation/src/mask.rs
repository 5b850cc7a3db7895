//! Per-entity capability bitmask.

use std::fmt;

use crate::tag::{ComponentTag, MAX_COMPONENTS};

/// One bit per component tag: bit `i` set means component `i` is enabled.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct ComponentMask(u32);

impl ComponentMask {
    /// Creates a mask with every bit clear.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Creates a mask from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Checks whether `tag` is enabled.
    #[must_use]
    pub const fn contains(self, tag: ComponentTag) -> bool {
        self.0 & tag.bit() != 0
    }

    /// Sets the bit for `tag`. Returns `false` if it was already set.
    pub fn insert(&mut self, tag: ComponentTag) -> bool {
        let was_clear = !self.contains(tag);
        self.0 |= tag.bit();
        was_clear
    }

    /// Clears the bit for `tag`. Returns `false` if it was already clear.
    pub fn remove(&mut self, tag: ComponentTag) -> bool {
        let was_set = self.contains(tag);
        self.0 &= !tag.bit();
        was_set
    }

    /// Clears every bit.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Returns true if no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of enabled components.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates enabled tags in ascending order.
    pub fn iter(self) -> impl Iterator<Item = ComponentTag> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            ComponentTag::new(index).ok()
        })
    }
}

impl fmt::Debug for ComponentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentMask({:0width$b})", self.0, width = MAX_COMPONENTS)
    }
}
