use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Index;
use std::slice;

use super::core::BufferCore;
use super::error::{CapacityExceeded, InsertError};
use crate::util::error::IndexError;
use crate::util::result::ResultExtension;

/// A fixed-capacity buffer whose slots are addressable from both ends: the
/// slot at `i` can equally be reached at `i - capacity`, so `-1` is always
/// the last slot and `-capacity` the first.
///
/// Emptiness is per slot rather than per region. Values land wherever they
/// are put, removal leaves a hole behind instead of closing the gap, and
/// [`append`](StaticBuffer::append) tracks a watermark one past the highest
/// slot ever occupied. The watermark never moves down, so appending can fail
/// for lack of space while interior holes still exist; those holes remain
/// reachable through [`insert`](StaticBuffer::insert).
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The capacity of the buffer.
///
/// | Method | Complexity |
/// |-|-|
/// | `append` | `O(1)` |
/// | `insert` | `O(n)` |
/// | `get` | `O(1)` |
/// | `replace` | `O(1)` |
/// | `remove` | `O(1)` |
/// | `index_of` | `O(n)` |
/// | `map` | `O(n)` |
/// | `clear` | `O(n)` |
///
/// # Examples
/// ```
/// # use linear_collections::collections::buffer::StaticBuffer;
/// let mut buf = StaticBuffer::new(4);
/// buf.append(1);
/// buf.append(2);
///
/// assert_eq!(buf.get(0), Some(&1));
/// assert_eq!(buf.get(-4), Some(&1));
/// assert_eq!(buf.get(2), None);
/// assert_eq!(buf.len(), 2);
/// ```
pub struct StaticBuffer<T> {
    pub(crate) core: BufferCore<T>,
}

impl<T> StaticBuffer<T> {
    /// Creates a buffer of `capacity` empty slots.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::StaticBuffer;
    /// let buf: StaticBuffer<u8> = StaticBuffer::new(3);
    /// assert_eq!(buf.cap(), 3);
    /// assert!(buf.is_empty());
    /// ```
    pub fn new(capacity: usize) -> StaticBuffer<T> {
        StaticBuffer {
            core: BufferCore::new(capacity),
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

    /// Returns the total number of slots, occupied or not.
    pub const fn cap(&self) -> usize {
        self.core.cap()
    }

    /// Places `value` in the slot at the watermark, one past the highest slot
    /// ever occupied.
    ///
    /// Because the watermark never moves down, a buffer which was ever full
    /// rejects appends even after removals have emptied slots again.
    ///
    /// # Errors
    /// Returns [`CapacityExceeded`] if the watermark has reached the
    /// capacity.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::StaticBuffer;
    /// let mut buf = StaticBuffer::from([1, 2]);
    /// assert!(buf.try_append(3).is_err());
    ///
    /// buf.remove(0);
    /// // The hole at slot 0 doesn't lower the watermark.
    /// assert!(buf.try_append(3).is_err());
    /// ```
    pub fn try_append(&mut self, value: T) -> Result<(), CapacityExceeded> {
        if self.core.watermark == self.cap() {
            return Err(CapacityExceeded { capacity: self.cap() });
        }

        let idx = self.core.watermark;
        self.core.place(idx, value);
        Ok(())
    }

    /// Places `value` in the slot at the watermark. See
    /// [`try_append`](StaticBuffer::try_append).
    ///
    /// # Panics
    /// Panics if the watermark has reached the capacity.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::StaticBuffer;
    /// let mut buf = StaticBuffer::new(2);
    /// buf.append(7);
    /// assert_eq!(buf.get(0), Some(&7));
    /// ```
    pub fn append(&mut self, value: T) {
        self.try_append(value).throw()
    }

    /// Inserts `value` at `index`, which may be negative to count back from
    /// the capacity.
    ///
    /// An empty target slot is simply occupied. An occupied one has its run
    /// of occupants shifted by one toward the nearest empty slot, preferring
    /// slots to the right, so that `value` can land exactly at `index`.
    ///
    /// # Errors
    /// Returns [`InsertError`] if the index falls outside
    /// `-capacity..capacity` or if no slot anywhere is empty.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::StaticBuffer;
    /// let mut buf = StaticBuffer::new(5);
    /// buf.append(1);
    /// buf.try_insert(0, 9).unwrap();
    ///
    /// // 9 landed at slot 0 and pushed 1 to the right.
    /// assert_eq!(buf.get(0), Some(&9));
    /// assert_eq!(buf.get(1), Some(&1));
    /// ```
    pub fn try_insert(&mut self, index: isize, value: T) -> Result<(), InsertError> {
        let idx = self.core.resolve(index)?;

        self.core
            .insert_shifting(idx, value)
            .map_err(|_| CapacityExceeded { capacity: self.cap() }.into())
    }

    /// Inserts `value` at `index`. See
    /// [`try_insert`](StaticBuffer::try_insert).
    ///
    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity` or if no slot
    /// anywhere is empty.
    pub fn insert(&mut self, index: isize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Returns a reference to the occupant of the slot at `index`, or [`None`]
    /// for an empty slot.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside
    /// `-capacity..capacity`.
    pub fn try_get(&self, index: isize) -> Result<Option<&T>, IndexError> {
        self.core.get(index)
    }

    /// Returns a reference to the occupant of the slot at `index`, or [`None`]
    /// for an empty slot. See [`try_get`](StaticBuffer::try_get).
    ///
    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::StaticBuffer;
    /// let buf = StaticBuffer::from([4, 5, 6]);
    /// assert_eq!(buf.get(1), Some(&5));
    /// assert_eq!(buf.get(-1), Some(&6));
    /// ```
    pub fn get(&self, index: isize) -> Option<&T> {
        self.try_get(index).throw()
    }

    /// Returns a mutable reference to the occupant of the slot at `index`, or
    /// [`None`] for an empty slot.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside
    /// `-capacity..capacity`.
    pub fn try_get_mut(&mut self, index: isize) -> Result<Option<&mut T>, IndexError> {
        self.core.get_mut(index)
    }

    /// Returns a mutable reference to the occupant of the slot at `index`, or
    /// [`None`] for an empty slot. See
    /// [`try_get_mut`](StaticBuffer::try_get_mut).
    ///
    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    pub fn get_mut(&mut self, index: isize) -> Option<&mut T> {
        self.try_get_mut(index).throw()
    }

    /// Writes `value` into the slot at `index` and returns the previous
    /// occupant. Writing an empty slot occupies it, raising the length and,
    /// if needed, the watermark.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside
    /// `-capacity..capacity`.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::StaticBuffer;
    /// let mut buf = StaticBuffer::from([1, 2]);
    /// assert_eq!(buf.try_replace(1, 9), Ok(Some(2)));
    /// assert_eq!(buf.get(1), Some(&9));
    /// ```
    pub fn try_replace(&mut self, index: isize, value: T) -> Result<Option<T>, IndexError> {
        self.core.replace(index, value)
    }

    /// Writes `value` into the slot at `index` and returns the previous
    /// occupant. See [`try_replace`](StaticBuffer::try_replace).
    ///
    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    pub fn replace(&mut self, index: isize, value: T) -> Option<T> {
        self.try_replace(index, value).throw()
    }

    /// Empties the slot at `index` and returns its occupant. Other slots stay
    /// where they are and the watermark is untouched, so a hole is left
    /// behind.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside
    /// `-capacity..capacity`.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::StaticBuffer;
    /// let mut buf = StaticBuffer::from([1, 2, 3]);
    /// assert_eq!(buf.try_remove(1), Ok(Some(2)));
    ///
    /// // The neighbors did not move in.
    /// assert_eq!(buf.get(0), Some(&1));
    /// assert_eq!(buf.get(1), None);
    /// assert_eq!(buf.get(2), Some(&3));
    /// ```
    pub fn try_remove(&mut self, index: isize) -> Result<Option<T>, IndexError> {
        self.core.remove(index)
    }

    /// Empties the slot at `index` and returns its occupant. See
    /// [`try_remove`](StaticBuffer::try_remove).
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

    /// Builds a buffer of the same capacity by applying `produce` to every
    /// slot, occupied or not. Wherever `produce` returns [`None`] the new
    /// slot stays empty, so occupancy of the result is entirely up to the
    /// caller.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::StaticBuffer;
    /// let buf = StaticBuffer::from([1, 2, 3]);
    /// let doubled = buf.map(|_, slot| slot.map(|v| v * 2));
    ///
    /// assert_eq!(doubled.get(1), Some(&4));
    /// assert_eq!(doubled.len(), 3);
    /// ```
    pub fn map<U>(&self, produce: impl FnMut(usize, Option<&T>) -> Option<U>) -> StaticBuffer<U> {
        StaticBuffer {
            core: self.core.map_core(produce),
        }
    }

    /// Empties every slot and resets the watermark, so appends start from
    /// slot 0 again.
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

impl<T: PartialEq> StaticBuffer<T> {
    /// First slot whose occupant equals `value`. Empty slots are skipped.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::StaticBuffer;
    /// let mut buf = StaticBuffer::from([1, 2, 3]);
    /// buf.remove(0);
    ///
    /// assert_eq!(buf.index_of(&3), Some(2));
    /// assert_eq!(buf.index_of(&1), None);
    /// ```
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

impl<T, const N: usize> From<[T; N]> for StaticBuffer<T> {
    /// Creates a buffer with capacity `N`, fully occupied by the given
    /// values.
    fn from(values: [T; N]) -> Self {
        let mut buffer = StaticBuffer::new(N);

        for value in values {
            // UNWRAP: The buffer has room for exactly these values.
            buffer.try_append(value).throw();
        }

        buffer
    }
}

impl<T> Index<isize> for StaticBuffer<T> {
    type Output = Option<T>;

    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    fn index(&self, index: isize) -> &Self::Output {
        let idx = self.core.resolve(index).throw();
        &self.core.slots[idx]
    }
}

impl<'a, T> IntoIterator for &'a StaticBuffer<T> {
    type Item = &'a Option<T>;
    type IntoIter = slice::Iter<'a, Option<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for StaticBuffer<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: Clone> Clone for StaticBuffer<T> {
    fn clone(&self) -> Self {
        StaticBuffer {
            core: self.core.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for StaticBuffer<T> {
    /// Buffers are equal when their slots match position for position, holes
    /// included. Capacity is part of that comparison; the watermark is not
    /// directly observable and doesn't participate.
    fn eq(&self, other: &Self) -> bool {
        *self.core.slots == *other.core.slots
    }
}

impl<T: Eq> Eq for StaticBuffer<T> {}

impl<T: Debug> Debug for StaticBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticBuffer")
            .field("slots", &self.slots())
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Debug> Display for StaticBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
