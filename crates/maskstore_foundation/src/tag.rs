//! Compile-time component tags.
//!
//! A tag binds a small integer in `[0, MAX_COMPONENTS)` to a value type.
//! The integer picks the bit in every [`ComponentMask`](crate::ComponentMask)
//! and the slot in the component store; the value type is what the store
//! holds for that slot.

use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};

/// Number of distinct component tags, and the width of a capability mask.
pub const MAX_COMPONENTS: usize = 32;

/// Binds a tag index to a component value type.
///
/// The host is responsible for keeping indices unique per value type.
/// Binding one index to two different value types is caught at access time
/// as a type mismatch, never as a reinterpretation of memory. An index of
/// `MAX_COMPONENTS` or more is rejected at compile time by [`tag_of`].
///
/// ```
/// use maskstore_foundation::{Tag, Tagged};
///
/// type ItemName = Tagged<String, 0>;
/// assert_eq!(<ItemName as Tag>::INDEX, 0);
/// ```
pub trait Tag: 'static {
    /// Position of this component's bit in the capability mask.
    const INDEX: usize;

    /// Value type stored for this component.
    ///
    /// `Default` fills slots that exist but were never written.
    type Value: Default + 'static;
}

/// Generic tag binding, usable as a type alias.
pub struct Tagged<T, const INDEX: usize>(PhantomData<fn() -> T>);

impl<T, const INDEX: usize> Tag for Tagged<T, INDEX>
where
    T: Default + 'static,
{
    const INDEX: usize = INDEX;
    type Value = T;
}

/// A validated tag index in `[0, MAX_COMPONENTS)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ComponentTag(u8);

impl ComponentTag {
    /// Validates a raw tag index.
    ///
    /// # Errors
    ///
    /// Returns `TagOutOfRange` if `index >= MAX_COMPONENTS`.
    pub fn new(index: usize) -> Result<Self> {
        match u8::try_from(index) {
            Ok(raw) if index < MAX_COMPONENTS => Ok(Self(raw)),
            _ => Err(Error::tag_out_of_range(index)),
        }
    }

    /// Returns the tag index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the single-bit mask for this tag.
    #[must_use]
    pub const fn bit(self) -> u32 {
        1 << self.0
    }
}

impl fmt::Debug for ComponentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentTag({})", self.0)
    }
}

impl fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Returns the tag for `T`.
///
/// `T::INDEX` is checked when `tag_of` is instantiated, so binding a value
/// type to an index past the mask width does not compile:
///
/// ```compile_fail
/// use maskstore_foundation::{Tagged, tag_of};
///
/// type TooWide = Tagged<u32, 32>;
/// let _ = tag_of::<TooWide>();
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn tag_of<T: Tag>() -> ComponentTag {
    const {
        assert!(T::INDEX < MAX_COMPONENTS, "component tag index exceeds MAX_COMPONENTS");
    }
    ComponentTag(T::INDEX as u8)
}
