use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Index;
use std::slice;

use super::core::BufferCore;
use crate::util::error::{IndexError, OutOfBoundary};
use crate::util::result::ResultExtension;

/// A buffer with the same dual-ended slot addressing as
/// [`StaticBuffer`](super::StaticBuffer), which grows by a configured
/// increment instead of running out of room.
///
/// Growth extends the slots at the high end, which rewrites the negative
/// address of every slot: `-1` names the last slot of the *new* capacity.
/// Negative indexes are therefore only stable between growths.
///
/// Two operations can grow the buffer. [`append`](DynamicBuffer::append)
/// grows when the watermark reaches the capacity, and
/// [`insert`](DynamicBuffer::insert) accepts indexes up to one growth window
/// beyond either end (`-2 * capacity ..= 2 * capacity - 1`), growing until
/// the index becomes addressable. Reads never grow: [`get`](DynamicBuffer::get),
/// [`replace`](DynamicBuffer::replace) and [`remove`](DynamicBuffer::remove)
/// resolve strictly against the current capacity.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The capacity of the buffer.
///
/// | Method | Complexity |
/// |-|-|
/// | `append` | `O(1)`, `O(n)` when growing |
/// | `insert` | `O(n)` |
/// | `get` | `O(1)` |
/// | `replace` | `O(1)` |
/// | `remove` | `O(1)` |
/// | `index_of` | `O(n)` |
/// | `map` | `O(n)` |
///
/// # Examples
/// ```
/// # use linear_collections::collections::buffer::DynamicBuffer;
/// let mut buf = DynamicBuffer::with_increment(2, 2);
/// buf.append(1);
/// buf.append(2);
/// buf.append(3);
///
/// assert_eq!(buf.cap(), 4);
/// assert_eq!(buf.get(2), Some(&3));
/// assert_eq!(buf.get(-2), Some(&3));
/// ```
pub struct DynamicBuffer<T> {
    pub(crate) core: BufferCore<T>,
    pub(crate) increment: usize,
}

impl<T> DynamicBuffer<T> {
    /// Creates a buffer of `capacity` empty slots which grows by `capacity`
    /// slots at a time.
    ///
    /// # Panics
    /// Panics if `capacity` is zero, since the growth increment defaults to
    /// it, or if memory layout size exceeds [`isize::MAX`].
    pub fn new(capacity: usize) -> DynamicBuffer<T> {
        Self::with_increment(capacity, capacity)
    }

    /// Creates a buffer of `capacity` empty slots which grows by `increment`
    /// slots at a time.
    ///
    /// # Panics
    /// Panics if `increment` is zero or if memory layout size exceeds
    /// [`isize::MAX`].
    pub fn with_increment(capacity: usize, increment: usize) -> DynamicBuffer<T> {
        assert!(increment > 0, "Growth increment must be at least one slot!");

        DynamicBuffer {
            core: BufferCore::new(capacity),
            increment,
        }
    }

    /// Returns the number of occupied slots.
    pub const fn len(&self) -> usize {
        self.core.size
    }

    /// Returns `true` if no slot is occupied.
    pub const fn is_empty(&self) -> bool {
        self.core.size == 0
    }

    /// Returns the current number of slots, occupied or not.
    pub const fn cap(&self) -> usize {
        self.core.cap()
    }

    /// Returns the number of slots added per growth.
    pub const fn increment(&self) -> usize {
        self.increment
    }

    /// Extends the slots by one increment.
    ///
    /// # Panics
    /// Panics if the new capacity would exceed [`usize::MAX`] or its memory
    /// layout size would exceed [`isize::MAX`].
    fn grow(&mut self) {
        let new_cap = self
            .cap()
            .checked_add(self.increment)
            .expect("Capacity overflow!");

        self.core.slots.extend_to(new_cap);
    }

    /// Places `value` in the slot at the watermark, one past the highest slot
    /// ever occupied, growing first if the watermark has reached the
    /// capacity.
    ///
    /// As for the static variant, the watermark never moves down, so a
    /// removal-riddled buffer keeps growing rather than refilling its holes;
    /// the holes remain reachable through [`insert`](DynamicBuffer::insert).
    ///
    /// # Panics
    /// Panics if growth overflows the capacity or the memory layout size.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::DynamicBuffer;
    /// let mut buf = DynamicBuffer::with_increment(1, 1);
    /// buf.append(1);
    /// buf.append(2);
    ///
    /// assert_eq!(buf.cap(), 2);
    /// assert_eq!(buf.len(), 2);
    /// ```
    pub fn append(&mut self, value: T) {
        if self.core.watermark == self.cap() {
            self.grow();
        }

        let idx = self.core.watermark;
        self.core.place(idx, value);
    }

    /// Resolves an index through the growth rule: indexes up to one growth
    /// window beyond either end trigger growth until they become
    /// addressable.
    fn resolve_growing(&mut self, index: isize) -> Result<usize, IndexError> {
        loop {
            match self.core.resolve(index) {
                Ok(idx) => return Ok(idx),
                Err(IndexError::OutOfBoundary(_)) if self.within_growth_window(index) => {
                    self.grow();
                },
                Err(IndexError::OutOfBoundary(_)) => {
                    return Err(OutOfBoundary {
                        index,
                        extent: self.cap().saturating_mul(2),
                    }
                    .into());
                },
                Err(err) => return Err(err),
            }
        }
    }

    /// Whether `index` falls within `-2 * capacity ..= 2 * capacity - 1`, the
    /// band inserts may reach by growing.
    fn within_growth_window(&self, index: isize) -> bool {
        let window = self.cap().saturating_mul(2);

        if index >= 0 {
            (index as usize) < window
        } else {
            index.unsigned_abs() <= window
        }
    }

    /// Inserts `value` at `index`, which may reach up to one growth window
    /// beyond either end of the current capacity.
    ///
    /// Within capacity this behaves exactly like the static insert: an empty
    /// target slot is occupied directly, an occupied one shifts its run of
    /// occupants toward the nearest empty slot. A buffer with no empty slot
    /// at all grows once and shifts everything from `index` up one slot
    /// instead of failing.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside the growth window.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::DynamicBuffer;
    /// let mut buf = DynamicBuffer::with_increment(2, 2);
    /// buf.try_insert(3, 9).unwrap();
    ///
    /// // The index was beyond the old capacity, so the buffer grew.
    /// assert_eq!(buf.cap(), 4);
    /// assert_eq!(buf.get(3), Some(&9));
    /// ```
    pub fn try_insert(&mut self, index: isize, value: T) -> Result<(), IndexError> {
        let idx = self.resolve_growing(index)?;

        match self.core.insert_shifting(idx, value) {
            Ok(()) => Ok(()),
            Err(value) => {
                // No empty slot anywhere, so every slot below the watermark is
                // occupied and growth puts the first empty slot right at it.
                self.grow();
                self.core.insert_spilling(idx, value);
                Ok(())
            },
        }
    }

    /// Inserts `value` at `index`. See
    /// [`try_insert`](DynamicBuffer::try_insert).
    ///
    /// # Panics
    /// Panics if the index falls outside the growth window.
    pub fn insert(&mut self, index: isize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Returns a reference to the occupant of the slot at `index`, or [`None`]
    /// for an empty slot. Never grows.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside
    /// `-capacity..capacity`.
    pub fn try_get(&self, index: isize) -> Result<Option<&T>, IndexError> {
        self.core.get(index)
    }

    /// Returns a reference to the occupant of the slot at `index`, or [`None`]
    /// for an empty slot. See [`try_get`](DynamicBuffer::try_get).
    ///
    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    pub fn get(&self, index: isize) -> Option<&T> {
        self.try_get(index).throw()
    }

    /// Returns a mutable reference to the occupant of the slot at `index`, or
    /// [`None`] for an empty slot. Never grows.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside
    /// `-capacity..capacity`.
    pub fn try_get_mut(&mut self, index: isize) -> Result<Option<&mut T>, IndexError> {
        self.core.get_mut(index)
    }

    /// Returns a mutable reference to the occupant of the slot at `index`, or
    /// [`None`] for an empty slot. See
    /// [`try_get_mut`](DynamicBuffer::try_get_mut).
    ///
    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    pub fn get_mut(&mut self, index: isize) -> Option<&mut T> {
        self.try_get_mut(index).throw()
    }

    /// Writes `value` into the slot at `index` and returns the previous
    /// occupant. Writing an empty slot occupies it. Never grows.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside
    /// `-capacity..capacity`.
    pub fn try_replace(&mut self, index: isize, value: T) -> Result<Option<T>, IndexError> {
        self.core.replace(index, value)
    }

    /// Writes `value` into the slot at `index` and returns the previous
    /// occupant. See [`try_replace`](DynamicBuffer::try_replace).
    ///
    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    pub fn replace(&mut self, index: isize, value: T) -> Option<T> {
        self.try_replace(index, value).throw()
    }

    /// Empties the slot at `index` and returns its occupant, leaving a hole
    /// behind. Never grows or shrinks.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside
    /// `-capacity..capacity`.
    pub fn try_remove(&mut self, index: isize) -> Result<Option<T>, IndexError> {
        self.core.remove(index)
    }

    /// Empties the slot at `index` and returns its occupant. See
    /// [`try_remove`](DynamicBuffer::try_remove).
    ///
    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    pub fn remove(&mut self, index: isize) -> Option<T> {
        self.try_remove(index).throw()
    }

    /// First slot whose occupant satisfies `compare` against `value`, called
    /// as `compare(occupant, value)`. Empty slots are skipped.
    pub fn index_of_by(
        &self,
        value: &T,
        compare: impl FnMut(&T, &T) -> bool,
    ) -> Option<usize> {
        self.core.index_of_by(value, compare)
    }

    /// Empties the first slot whose occupant satisfies `compare` against
    /// `value` and returns the occupant.
    pub fn remove_item_by(
        &mut self,
        value: &T,
        compare: impl FnMut(&T, &T) -> bool,
    ) -> Option<T> {
        self.core.remove_item_by(value, compare)
    }

    /// Builds a buffer of the same capacity and growth increment by applying
    /// `produce` to every slot, occupied or not.
    pub fn map<U>(&self, produce: impl FnMut(usize, Option<&T>) -> Option<U>) -> DynamicBuffer<U> {
        DynamicBuffer {
            core: self.core.map_core(produce),
            increment: self.increment,
        }
    }

    /// Empties every slot and resets the watermark. The capacity stays
    /// wherever growth left it.
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// An iterator over all slots in positional order, empty ones included.
    pub fn iter(&self) -> slice::Iter<'_, Option<T>> {
        self.core.slots.iter()
    }

    /// A view of all slots in positional order, empty ones included.
    pub fn slots(&self) -> &[Option<T>] {
        &self.core.slots
    }
}

impl<T: PartialEq> DynamicBuffer<T> {
    /// First slot whose occupant equals `value`. Empty slots are skipped.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.index_of_by(value, T::eq)
    }

    /// Returns `true` if any occupant equals `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Empties the first slot whose occupant equals `value` and returns the
    /// occupant.
    pub fn remove_item(&mut self, value: &T) -> Option<T> {
        self.remove_item_by(value, T::eq)
    }
}

impl<T> Index<isize> for DynamicBuffer<T> {
    type Output = Option<T>;

    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    fn index(&self, index: isize) -> &Self::Output {
        let idx = self.core.resolve(index).throw();
        &self.core.slots[idx]
    }
}

impl<'a, T> IntoIterator for &'a DynamicBuffer<T> {
    type Item = &'a Option<T>;
    type IntoIter = slice::Iter<'a, Option<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for DynamicBuffer<T> {
    /// An empty buffer which grows one slot at a time until given a real
    /// shape.
    fn default() -> Self {
        Self::with_increment(0, 1)
    }
}

impl<T: Clone> Clone for DynamicBuffer<T> {
    fn clone(&self) -> Self {
        DynamicBuffer {
            core: self.core.clone(),
            increment: self.increment,
        }
    }
}

impl<T: PartialEq> PartialEq for DynamicBuffer<T> {
    /// Buffers are equal when their slots match position for position, holes
    /// included. The growth increment is configuration rather than content
    /// and doesn't participate.
    fn eq(&self, other: &Self) -> bool {
        *self.core.slots == *other.core.slots
    }
}

impl<T: Eq> Eq for DynamicBuffer<T> {}

impl<T: Debug> Debug for DynamicBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicBuffer")
            .field("slots", &self.slots())
            .field("len", &self.len())
            .field("increment", &self.increment)
            .finish()
    }
}

impl<T: Debug> Display for DynamicBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
