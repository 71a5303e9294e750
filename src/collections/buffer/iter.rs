use std::alloc;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use super::dynamic_buffer::DynamicBuffer;
use super::factory::Buffer;
use super::slots::Slots;
use super::static_buffer::StaticBuffer;

/// An owning iterator over every slot of a buffer, in positional order and
/// with empty slots included, so positions can be recovered by enumeration.
///
/// The iterator takes over the buffer's allocation and reads slots out of it
/// one by one from either end, deallocating once dropped.
pub struct IntoIter<T> {
    ptr: NonNull<Option<T>>,
    extent: usize,
    front: usize,
    back: usize,
    _phantom: PhantomData<Option<T>>,
}

impl<T> IntoIter<T> {
    fn new(slots: Slots<T>) -> IntoIter<T> {
        let (ptr, extent) = slots.into_parts();

        IntoIter {
            ptr,
            extent,
            front: 0,
            back: extent,
            _phantom: PhantomData,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        // SAFETY: front is below back and therefore within the allocated extent.
        // Advancing front afterwards ensures each slot is read out exactly once.
        let slot = unsafe { self.ptr.add(self.front).read() };
        self.front += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        // SAFETY: back now names the last unread slot, which is read out exactly
        // once because no other index can reach it again.
        Some(unsafe { self.ptr.add(self.back).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for i in self.front..self.back {
            // SAFETY: Slots between front and back are initialized and were never
            // read out, so they are dropped exactly once here.
            unsafe {
                ptr::drop_in_place(self.ptr.add(i).as_ptr());
            }
        }

        let layout = Slots::<T>::make_layout(self.extent);

        if layout.size() != 0 {
            // SAFETY: The allocation was taken over from Slots and uses this exact
            // layout. Zero-sized layouts were never allocated.
            unsafe {
                alloc::dealloc(self.ptr.as_ptr().cast(), layout);
            }
        }
    }
}

impl<T> IntoIterator for StaticBuffer<T> {
    type Item = Option<T>;
    type IntoIter = IntoIter<T>;

    /// # Examples
    /// ```
    /// # use linear_collections::collections::buffer::StaticBuffer;
    /// let mut buf = StaticBuffer::from([1, 2, 3]);
    /// buf.remove(1);
    ///
    /// let mut slots = buf.into_iter();
    /// assert_eq!(slots.next(), Some(Some(1)));
    /// assert_eq!(slots.next(), Some(None));
    /// assert_eq!(slots.next(), Some(Some(3)));
    /// assert_eq!(slots.next(), None);
    /// ```
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.core.slots)
    }
}

impl<T> IntoIterator for DynamicBuffer<T> {
    type Item = Option<T>;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.core.slots)
    }
}

impl<T> IntoIterator for Buffer<T> {
    type Item = Option<T>;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Buffer::Static(buf) => buf.into_iter(),
            Buffer::Dynamic(buf) => buf.into_iter(),
        }
    }
}
