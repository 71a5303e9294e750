use std::alloc::{self, Layout};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

const MAX_BYTES: usize = isize::MAX as usize;

/// The backing store shared by both buffer variants: a run of always
/// initialized slots, where an occupied slot holds [`Some`] and an empty slot
/// holds [`None`].
///
/// Keeping every slot initialized means reads never have to reason about
/// uninitialized memory and emptiness is ordinary data. The store only ever
/// grows; the buffers built on top never shrink their extent.
pub(crate) struct Slots<T> {
    ptr: NonNull<Option<T>>,
    extent: usize,
}

impl<T> Slots<T> {
    /// Allocates a store of `extent` empty slots.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn new(extent: usize) -> Slots<T> {
        let layout = Self::make_layout(extent);
        let ptr = Self::make_ptr(layout);

        let mut slots = Slots { ptr, extent };
        slots.fill_empty(0);
        slots
    }

    /// Returns the number of slots in the store.
    pub const fn extent(&self) -> usize {
        self.extent
    }

    /// Reallocates the store to hold `new_extent` slots, keeping existing
    /// slots in place and filling the added tail with empty ones.
    ///
    /// # Panics
    /// Panics if `new_extent` is below the current extent or if the new
    /// memory layout size exceeds [`isize::MAX`].
    pub fn extend_to(&mut self, new_extent: usize) {
        assert!(new_extent >= self.extent, "Slots never shrink!");

        let new_ptr = match (self.extent, new_extent) {
            (_, _) if size_of::<Option<T>>() == 0 => {
                // Zero-sized slots occupy no memory, so only the extent
                // changes and the dangling pointer is kept.
                self.ptr
            },
            (old, new) if old == new => return,
            (0, _) => {
                let layout = Self::make_layout(new_extent);

                // SAFETY: Layout will have non-zero size because both 0 extent and
                // zero-sized slots are guarded against.
                let raw_ptr: *mut Option<T> = unsafe { alloc::alloc(layout).cast() };

                NonNull::new(raw_ptr).unwrap_or_else(|| alloc::handle_alloc_error(layout))
            },
            (old, new) => {
                let layout = Self::make_layout(old);
                let new_bytes = new.checked_mul(size_of::<Option<T>>())
                    .filter(|bytes| *bytes <= MAX_BYTES)
                    .expect("Capacity overflow!");

                // SAFETY: The same layout and allocator are used as for the original
                // allocation, and the new byte size is > 0 and <= isize::MAX.
                let raw_ptr: *mut Option<T> = unsafe {
                    alloc::realloc(self.ptr.as_ptr().cast(), layout, new_bytes).cast()
                };

                NonNull::new(raw_ptr).unwrap_or_else(|| alloc::handle_alloc_error(layout))
            },
        };

        let old_extent = self.extent;
        self.ptr = new_ptr;
        self.extent = new_extent;
        self.fill_empty(old_extent);
    }

    /// Writes an empty slot into every position from `start` up to the
    /// extent. The target positions must be allocated but are allowed to be
    /// uninitialized, so nothing is dropped.
    fn fill_empty(&mut self, start: usize) {
        for i in start..self.extent {
            // SAFETY: The offset is within the allocated extent and write does not
            // read or drop whatever bytes were there.
            unsafe {
                self.ptr.add(i).write(None);
            }
        }
    }

    /// Decomposes the store into its pointer and extent without releasing the
    /// allocation. The caller takes over dropping the slots and deallocating
    /// with the layout for `extent`.
    pub fn into_parts(self) -> (NonNull<Option<T>>, usize) {
        let parts = (self.ptr, self.extent);
        mem::forget(self);
        parts
    }

    /// A helper function to create a [`Layout`] for `extent` slots.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub(crate) fn make_layout(extent: usize) -> Layout {
        Layout::array::<Option<T>>(extent).expect("Capacity overflow!")
    }

    /// A helper function to allocate for the provided [`Layout`]. Returns a
    /// dangling pointer for a zero-sized layout.
    ///
    /// # Errors
    /// In the event of an allocation error, this method calls
    /// [`alloc::handle_alloc_error`] as recommended, to avoid new allocations
    /// rather than panicking.
    pub(crate) fn make_ptr(layout: Layout) -> NonNull<Option<T>> {
        if layout.size() == 0 {
            NonNull::dangling()
        } else {
            NonNull::new(
                // SAFETY: Zero-sized layouts have been guarded against.
                unsafe { alloc::alloc(layout).cast() }
            ).unwrap_or_else(|| alloc::handle_alloc_error(layout))
        }
    }
}

impl<T> Drop for Slots<T> {
    fn drop(&mut self) {
        let layout = Self::make_layout(self.extent);

        for i in 0..self.extent {
            // SAFETY: Every slot within the extent is initialized, properly aligned
            // and ready to drop.
            unsafe {
                ptr::drop_in_place(self.ptr.add(i).as_ptr());
            }
        }

        if layout.size() != 0 {
            // SAFETY: ptr is always allocated in the global allocator and layout is
            // the same as when allocated. Zero-sized layouts aren't allocated and are
            // guarded against deallocation.
            unsafe {
                alloc::dealloc(self.ptr.as_ptr().cast(), layout)
            }
        }
    }
}

impl<T> Deref for Slots<T> {
    type Target = [Option<T>];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The held data uses Layout::array(extent) and is therefore valid
        // and properly aligned. Every slot is initialized and the extent is no
        // greater than isize::MAX bytes. The safe API doesn't leak raw pointers, so
        // the borrow checker prevents mutation for the lifetime of the slice.
        unsafe {
            slice::from_raw_parts(self.ptr.as_ptr(), self.extent)
        }
    }
}

impl<T> DerefMut for Slots<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As for Deref, with exclusivity guaranteed by the mutable borrow
        // of the store itself.
        unsafe {
            slice::from_raw_parts_mut(self.ptr.as_ptr(), self.extent)
        }
    }
}

// SAFETY: The store owns its allocation through a unique pointer, so it is safe
// for Send when T: Send.
unsafe impl<T: Send> Send for Slots<T> {}
// SAFETY: The safe API obeys all rules of the borrow checker and holds no
// interior mutability, so Slots<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync> Sync for Slots<T> {}

impl<T: Clone> Clone for Slots<T> {
    fn clone(&self) -> Self {
        let mut new = Slots::new(self.extent);

        for (slot, value) in new.iter_mut().zip(self.iter()) {
            *slot = value.clone();
        }

        new
    }
}
