//! Fixed-capacity circular history buffer.
//!
//! A [`RingBuffer`] keeps the last `N` values written to it. Every slot is
//! default-initialized at construction, so the buffer always reports
//! `len() == capacity()`; writes overwrite the oldest slot.
//!
//! ```text
//!   push 1, 2, 3, 4 into capacity 3
//!
//!   slots   [ 4 | 2 | 3 ]        cursor ──▶ slot 1 (next write, oldest)
//!   peek    0 = 4, 1 = 3, 2 = 2
//! ```
//!
//! Never-written slots hold `T::default()` and cannot be told apart from a
//! written default by [`RingBuffer::contains`]. [`RingBuffer::filled`] and
//! [`RingBuffer::contains_written`] only consider slots that were written.

use std::iter::{Chain, FusedIterator, Rev};
use std::ops::{Index, IndexMut};
use std::slice;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{OpackError, Result};

/// Capacity used by [`RingBuffer::default`].
pub const DEFAULT_CAPACITY: usize = 1;

/// Fixed-capacity circular buffer indexed from most recent to oldest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    /// Slot the next write lands in; also the oldest slot.
    cursor: usize,
    /// Number of writes, saturating at the capacity.
    filled: usize,
}

impl<T: Default> RingBuffer<T> {
    /// Create a buffer with `capacity` default-initialized slots.
    ///
    /// # Panics
    /// Panics if `capacity` is zero. Use [`RingBuffer::try_new`] when the
    /// capacity comes from user input.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be at least 1");
        Self {
            slots: std::iter::repeat_with(T::default).take(capacity).collect(),
            cursor: 0,
            filled: 0,
        }
    }

    /// Create a buffer with `capacity` slots, rejecting a zero capacity.
    ///
    /// # Errors
    /// Returns [`OpackError::ZeroCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(OpackError::ZeroCapacity);
        }
        Ok(Self::new(capacity))
    }

    /// Write a default value into the oldest slot and return it for
    /// in-place construction.
    pub fn emplace(&mut self) -> &mut T {
        let index = self.cursor;
        self.slots[index] = T::default();
        self.advance();
        &mut self.slots[index]
    }

    /// Return every slot to its default value and forget all writes.
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = T::default());
        self.cursor = 0;
        self.filled = 0;
    }
}

impl<T: Default> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> RingBuffer<T> {
    /// Overwrite the oldest slot with `value`.
    pub fn push(&mut self, value: T) {
        self.slots[self.cursor] = value;
        self.advance();
    }

    /// Return the `n`-th most recent value. `0` is the latest write and
    /// `len() - 1` the oldest.
    ///
    /// # Panics
    /// Panics if `n >= len()`.
    #[must_use]
    pub fn peek(&self, n: usize) -> &T {
        self.assert_in_range(n);
        &self.slots[self.slot_index(n)]
    }

    /// Mutable variant of [`RingBuffer::peek`].
    ///
    /// # Panics
    /// Panics if `n >= len()`.
    pub fn peek_mut(&mut self, n: usize) -> &mut T {
        self.assert_in_range(n);
        let index = self.slot_index(n);
        &mut self.slots[index]
    }

    /// Checked variant of [`RingBuffer::peek`].
    #[must_use]
    pub fn get(&self, n: usize) -> Option<&T> {
        (n < self.len()).then(|| &self.slots[self.slot_index(n)])
    }

    /// Checked variant of [`RingBuffer::peek_mut`].
    pub fn get_mut(&mut self, n: usize) -> Option<&mut T> {
        if n < self.len() {
            let index = self.slot_index(n);
            Some(&mut self.slots[index])
        } else {
            None
        }
    }

    /// Number of slots. Always equal to [`RingBuffer::capacity`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: a ring buffer has at least one slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots, fixed at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// How many of the slots have been written, at most `capacity()`.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Iterate from the most recent value to the oldest.
    ///
    /// The iterator is double-ended: `.rev()` walks oldest to most recent.
    pub fn iter(&self) -> Iter<'_, T> {
        let (head, tail) = self.slots.split_at(self.cursor);
        Iter {
            inner: head.iter().rev().chain(tail.iter().rev()),
        }
    }

    /// Mutable iteration from the most recent value to the oldest.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (head, tail) = self.slots.split_at_mut(self.cursor);
        IterMut {
            inner: head.iter_mut().rev().chain(tail.iter_mut().rev()),
        }
    }

    fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.filled = (self.filled + 1).min(self.slots.len());
    }

    fn slot_index(&self, n: usize) -> usize {
        let len = self.slots.len();
        (self.cursor + len - 1 - n) % len
    }

    fn assert_in_range(&self, n: usize) {
        assert!(
            n < self.len(),
            "peek index {n} out of range for ring buffer of capacity {}",
            self.len()
        );
    }
}

impl<T: PartialEq> RingBuffer<T> {
    /// `true` if any slot equals `value`.
    ///
    /// All slots are scanned, including never-written defaults.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.slots.contains(value)
    }

    /// `true` if one of the written slots equals `value`.
    #[must_use]
    pub fn contains_written(&self, value: &T) -> bool {
        self.iter().take(self.filled).any(|slot| slot == value)
    }
}

impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    fn index(&self, n: usize) -> &T {
        self.peek(n)
    }
}

impl<T> IndexMut<usize> for RingBuffer<T> {
    fn index_mut(&mut self, n: usize) -> &mut T {
        self.peek_mut(n)
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RingBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Iterator over a [`RingBuffer`], most recent first.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    inner: Chain<Rev<slice::Iter<'a, T>>, Rev<slice::Iter<'a, T>>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable iterator over a [`RingBuffer`], most recent first.
#[derive(Debug)]
pub struct IterMut<'a, T> {
    inner: Chain<Rev<slice::IterMut<'a, T>>, Rev<slice::IterMut<'a, T>>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RingBufferState<T> {
    slots: Vec<T>,
    cursor: usize,
    #[serde(default)]
    filled: usize,
}

impl<T> TryFrom<RingBufferState<T>> for RingBuffer<T> {
    type Error = OpackError;

    fn try_from(state: RingBufferState<T>) -> Result<Self> {
        let capacity = state.slots.len();
        if capacity == 0 {
            return Err(OpackError::ZeroCapacity);
        }
        if state.cursor >= capacity {
            return Err(OpackError::CursorOutOfRange {
                cursor: state.cursor,
                capacity,
            });
        }
        Ok(Self {
            slots: state.slots,
            cursor: state.cursor,
            filled: state.filled.min(capacity),
        })
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for RingBuffer<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let state = RingBufferState::<T>::deserialize(deserializer)?;
        Self::try_from(state).map_err(serde::de::Error::custom)
    }
}
