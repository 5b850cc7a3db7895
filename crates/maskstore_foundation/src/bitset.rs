//! Growable bitset over entity indices.
//!
//! Backs the per-tag "which entities have this enabled" index and the
//! registry's liveness set. Scanning uses `trailing_zeros`/`leading_zeros`
//! so that stepping to the next enabled index skips 64 disabled slots per
//! word instead of testing them one at a time.

const WORD_BITS: usize = u64::BITS as usize;

/// A set of entity indices stored as packed `u64` words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexSet {
    words: Vec<u64>,
    count: usize,
}

impl IndexSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for indices below `bits`.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(WORD_BITS)],
            count: 0,
        }
    }

    /// Returns the number of indices in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the set holds no index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Checks whether `index` is in the set.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .is_some_and(|word| word & (1u64 << (index % WORD_BITS)) != 0)
    }

    /// Adds `index`. Returns `false` if it was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        let word_index = index / WORD_BITS;
        if word_index >= self.words.len() {
            self.words.resize(word_index + 1, 0);
        }
        let bit = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[word_index];
        if *word & bit != 0 {
            return false;
        }
        *word |= bit;
        self.count += 1;
        true
    }

    /// Removes `index`. Returns `false` if it was not present.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(word) = self.words.get_mut(index / WORD_BITS) else {
            return false;
        };
        let bit = 1u64 << (index % WORD_BITS);
        if *word & bit == 0 {
            return false;
        }
        *word &= !bit;
        self.count -= 1;
        true
    }

    /// Removes every index.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|word| *word = 0);
        self.count = 0;
    }

    /// Finds the smallest index in `[start, end)` that is in the set.
    #[must_use]
    pub fn next_set(&self, start: usize, end: usize) -> Option<usize> {
        if start >= end {
            return None;
        }
        let mut word_index = start / WORD_BITS;
        let mut word = *self.words.get(word_index)? & (u64::MAX << (start % WORD_BITS));
        loop {
            if word != 0 {
                let index = word_index * WORD_BITS + word.trailing_zeros() as usize;
                return (index < end).then_some(index);
            }
            word_index += 1;
            if word_index * WORD_BITS >= end {
                return None;
            }
            word = *self.words.get(word_index)?;
        }
    }

    /// Finds the largest index in `[start, end)` that is in the set.
    #[must_use]
    pub fn prev_set(&self, start: usize, end: usize) -> Option<usize> {
        if start >= end || self.words.is_empty() {
            return None;
        }
        let last = end - 1;
        let mut word_index = last / WORD_BITS;
        let mut word = if word_index < self.words.len() {
            self.words[word_index] & (u64::MAX >> (WORD_BITS - 1 - last % WORD_BITS))
        } else {
            word_index = self.words.len() - 1;
            self.words[word_index]
        };
        loop {
            if word != 0 {
                let index = word_index * WORD_BITS + (WORD_BITS - 1)
                    - word.leading_zeros() as usize;
                return (index >= start).then_some(index);
            }
            if word_index * WORD_BITS <= start {
                return None;
            }
            word_index -= 1;
            word = self.words[word_index];
        }
    }

    /// Iterates indices in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, &word)| {
                (0..WORD_BITS)
                    .filter(move |bit| word & (1u64 << bit) != 0)
                    .map(move |bit| word_index * WORD_BITS + bit)
            })
    }
}
