use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Index;
use std::slice;

use derive_more::IsVariant;

use super::dynamic_buffer::DynamicBuffer;
use super::error::{CapacityExceeded, InsertError, InvalidDataType};
use super::static_buffer::StaticBuffer;
use crate::collections::kind::ContainerKind;
use crate::util::error::IndexError;
use crate::util::result::ResultExtension;

/// Either buffer variant behind one handle, chosen at runtime through
/// [`Buffer::create`].
///
/// Every operation delegates to the wrapped variant, so the behavioral
/// differences between the two are exactly those documented on
/// [`StaticBuffer`] and [`DynamicBuffer`]: the static variant rejects work it
/// has no room for, the dynamic one grows.
///
/// # Examples
/// ```
/// # use linear_collections::collections::buffer::Buffer;
/// # use linear_collections::collections::ContainerKind;
/// let mut buf = Buffer::create(ContainerKind::DynamicBuffer, 2, Some(2)).unwrap();
/// buf.append(1);
/// buf.append(2);
/// buf.append(3);
///
/// assert!(buf.is_dynamic());
/// assert_eq!(buf.cap(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, IsVariant)]
pub enum Buffer<T> {
    Static(StaticBuffer<T>),
    Dynamic(DynamicBuffer<T>),
}

impl<T> Buffer<T> {
    /// Constructs the buffer variant for `kind`.
    ///
    /// A dynamic buffer grows by `increment` slots at a time, defaulting to
    /// `capacity` when [`None`] is given. An explicit increment of zero means
    /// "never grow" and produces a static buffer instead.
    ///
    /// # Errors
    /// Returns [`InvalidDataType`] for kinds the factory has no buffer
    /// implementation for.
    ///
    /// # Panics
    /// Panics if a dynamic buffer would end up with a zero growth increment,
    /// which happens for capacity zero with no explicit increment.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::Buffer;
    /// # use linear_collections::collections::ContainerKind;
    /// let stat: Buffer<u8> = Buffer::create(ContainerKind::StaticBuffer, 4, None).unwrap();
    /// assert!(stat.is_static());
    ///
    /// // A zero increment pins the capacity, so the result is static too.
    /// let pinned: Buffer<u8> = Buffer::create(ContainerKind::DynamicBuffer, 4, Some(0)).unwrap();
    /// assert!(pinned.is_static());
    ///
    /// assert!(Buffer::<u8>::create(ContainerKind::LinkedSequence, 4, None).is_err());
    /// ```
    pub fn create(
        kind: ContainerKind,
        capacity: usize,
        increment: Option<usize>,
    ) -> Result<Buffer<T>, InvalidDataType> {
        match kind {
            ContainerKind::StaticBuffer => Ok(Buffer::Static(StaticBuffer::new(capacity))),
            ContainerKind::DynamicBuffer if increment == Some(0) => {
                Ok(Buffer::Static(StaticBuffer::new(capacity)))
            },
            ContainerKind::DynamicBuffer => Ok(Buffer::Dynamic(DynamicBuffer::with_increment(
                capacity,
                increment.unwrap_or(capacity),
            ))),
            kind => Err(InvalidDataType { kind }),
        }
    }

    /// Returns the number of occupied slots.
    pub const fn len(&self) -> usize {
        match self {
            Buffer::Static(buf) => buf.len(),
            Buffer::Dynamic(buf) => buf.len(),
        }
    }

    /// Returns `true` if no slot is occupied.
    pub const fn is_empty(&self) -> bool {
        match self {
            Buffer::Static(buf) => buf.is_empty(),
            Buffer::Dynamic(buf) => buf.is_empty(),
        }
    }

    /// Returns the current number of slots, occupied or not.
    pub const fn cap(&self) -> usize {
        match self {
            Buffer::Static(buf) => buf.cap(),
            Buffer::Dynamic(buf) => buf.cap(),
        }
    }

    /// The growth increment, or [`None`] for the static variant.
    pub const fn increment(&self) -> Option<usize> {
        match self {
            Buffer::Static(_) => None,
            Buffer::Dynamic(buf) => Some(buf.increment()),
        }
    }

    /// Places `value` at the watermark. The dynamic variant grows when out
    /// of room and never fails.
    ///
    /// # Errors
    /// Returns [`CapacityExceeded`] if a static buffer's watermark has
    /// reached its capacity.
    pub fn try_append(&mut self, value: T) -> Result<(), CapacityExceeded> {
        match self {
            Buffer::Static(buf) => buf.try_append(value),
            Buffer::Dynamic(buf) => {
                buf.append(value);
                Ok(())
            },
        }
    }

    /// Places `value` at the watermark. See
    /// [`try_append`](Buffer::try_append).
    ///
    /// # Panics
    /// Panics if a static buffer's watermark has reached its capacity.
    pub fn append(&mut self, value: T) {
        self.try_append(value).throw()
    }

    /// Inserts `value` at `index` under the wrapped variant's rules: strict
    /// capacity bounds for static, the growth window for dynamic.
    ///
    /// # Errors
    /// Returns [`InsertError`] if the index is out of reach or a static
    /// buffer has no empty slot left.
    pub fn try_insert(&mut self, index: isize, value: T) -> Result<(), InsertError> {
        match self {
            Buffer::Static(buf) => buf.try_insert(index, value),
            Buffer::Dynamic(buf) => buf.try_insert(index, value).map_err(InsertError::from),
        }
    }

    /// Inserts `value` at `index`. See [`try_insert`](Buffer::try_insert).
    ///
    /// # Panics
    /// Panics if the index is out of reach or a static buffer has no empty
    /// slot left.
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
        match self {
            Buffer::Static(buf) => buf.try_get(index),
            Buffer::Dynamic(buf) => buf.try_get(index),
        }
    }

    /// Returns a reference to the occupant of the slot at `index`, or [`None`]
    /// for an empty slot. See [`try_get`](Buffer::try_get).
    ///
    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
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
        match self {
            Buffer::Static(buf) => buf.try_get_mut(index),
            Buffer::Dynamic(buf) => buf.try_get_mut(index),
        }
    }

    /// Returns a mutable reference to the occupant of the slot at `index`, or
    /// [`None`] for an empty slot. See [`try_get_mut`](Buffer::try_get_mut).
    ///
    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    pub fn get_mut(&mut self, index: isize) -> Option<&mut T> {
        self.try_get_mut(index).throw()
    }

    /// Writes `value` into the slot at `index` and returns the previous
    /// occupant. Writing an empty slot occupies it.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside
    /// `-capacity..capacity`.
    pub fn try_replace(&mut self, index: isize, value: T) -> Result<Option<T>, IndexError> {
        match self {
            Buffer::Static(buf) => buf.try_replace(index, value),
            Buffer::Dynamic(buf) => buf.try_replace(index, value),
        }
    }

    /// Writes `value` into the slot at `index` and returns the previous
    /// occupant. See [`try_replace`](Buffer::try_replace).
    ///
    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    pub fn replace(&mut self, index: isize, value: T) -> Option<T> {
        self.try_replace(index, value).throw()
    }

    /// Empties the slot at `index` and returns its occupant, leaving a hole
    /// behind.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside
    /// `-capacity..capacity`.
    pub fn try_remove(&mut self, index: isize) -> Result<Option<T>, IndexError> {
        match self {
            Buffer::Static(buf) => buf.try_remove(index),
            Buffer::Dynamic(buf) => buf.try_remove(index),
        }
    }

    /// Empties the slot at `index` and returns its occupant. See
    /// [`try_remove`](Buffer::try_remove).
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
        match self {
            Buffer::Static(buf) => buf.index_of_by(value, compare),
            Buffer::Dynamic(buf) => buf.index_of_by(value, compare),
        }
    }

    /// Empties the first slot whose occupant satisfies `compare` against
    /// `value` and returns the occupant.
    pub fn remove_item_by(
        &mut self,
        value: &T,
        compare: impl FnMut(&T, &T) -> bool,
    ) -> Option<T> {
        match self {
            Buffer::Static(buf) => buf.remove_item_by(value, compare),
            Buffer::Dynamic(buf) => buf.remove_item_by(value, compare),
        }
    }

    /// Builds a buffer of the same variant and capacity by applying `produce`
    /// to every slot, occupied or not.
    pub fn map<U>(&self, produce: impl FnMut(usize, Option<&T>) -> Option<U>) -> Buffer<U> {
        match self {
            Buffer::Static(buf) => Buffer::Static(buf.map(produce)),
            Buffer::Dynamic(buf) => Buffer::Dynamic(buf.map(produce)),
        }
    }

    /// Empties every slot and resets the watermark.
    pub fn clear(&mut self) {
        match self {
            Buffer::Static(buf) => buf.clear(),
            Buffer::Dynamic(buf) => buf.clear(),
        }
    }

    /// An iterator over all slots in positional order, empty ones included.
    pub fn iter(&self) -> slice::Iter<'_, Option<T>> {
        match self {
            Buffer::Static(buf) => buf.iter(),
            Buffer::Dynamic(buf) => buf.iter(),
        }
    }

    /// A view of all slots in positional order, empty ones included.
    pub fn slots(&self) -> &[Option<T>] {
        match self {
            Buffer::Static(buf) => buf.slots(),
            Buffer::Dynamic(buf) => buf.slots(),
        }
    }
}

impl<T: PartialEq> Buffer<T> {
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

impl<T> Index<isize> for Buffer<T> {
    type Output = Option<T>;

    /// # Panics
    /// Panics if the index falls outside `-capacity..capacity`.
    fn index(&self, index: isize) -> &Self::Output {
        match self {
            Buffer::Static(buf) => &buf[index],
            Buffer::Dynamic(buf) => &buf[index],
        }
    }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
    type Item = &'a Option<T>;
    type IntoIter = slice::Iter<'a, Option<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Debug> Display for Buffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Buffer::Static(buf) => Display::fmt(buf, f),
            Buffer::Dynamic(buf) => Display::fmt(buf, f),
        }
    }
}
