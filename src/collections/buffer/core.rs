use super::slots::Slots;
use crate::util::error::IndexError;
use crate::util::index::{self, Bound};

/// Bookkeeping shared by both buffer variants.
///
/// `size` counts occupied slots. `watermark` is one past the highest slot
/// ever occupied and never moves down: removal leaves holes behind rather
/// than compacting, so appends land beyond everything that was ever written
/// even when earlier slots have been emptied again.
#[derive(Clone)]
pub(crate) struct BufferCore<T> {
    pub slots: Slots<T>,
    pub size: usize,
    pub watermark: usize,
}

impl<T> BufferCore<T> {
    pub fn new(capacity: usize) -> BufferCore<T> {
        BufferCore {
            slots: Slots::new(capacity),
            size: 0,
            watermark: 0,
        }
    }

    pub const fn cap(&self) -> usize {
        self.slots.extent()
    }

    /// Resolves `index` against the current capacity. Negative indexes map
    /// onto `index + capacity`, mirroring every slot at a second address.
    pub fn resolve(&self, index: isize) -> Result<usize, IndexError> {
        index::resolve(index, self.cap(), Bound::Exclusive)
    }

    pub fn get(&self, index: isize) -> Result<Option<&T>, IndexError> {
        Ok(self.slots[self.resolve(index)?].as_ref())
    }

    pub fn get_mut(&mut self, index: isize) -> Result<Option<&mut T>, IndexError> {
        let idx = self.resolve(index)?;
        Ok(self.slots[idx].as_mut())
    }

    /// Writes the slot unconditionally, returning whatever occupied it. A
    /// previously empty slot counts as a new occupant and raises the
    /// watermark.
    pub fn replace(&mut self, index: isize, value: T) -> Result<Option<T>, IndexError> {
        let idx = self.resolve(index)?;
        let old = self.slots[idx].replace(value);

        if old.is_none() {
            self.size += 1;
            self.cover(idx);
        }

        Ok(old)
    }

    /// Empties the slot, returning its occupant. The watermark stays where it
    /// is, leaving a hole rather than closing the gap.
    pub fn remove(&mut self, index: isize) -> Result<Option<T>, IndexError> {
        let idx = self.resolve(index)?;
        let old = self.slots[idx].take();

        if old.is_some() {
            self.size -= 1;
        }

        Ok(old)
    }

    /// Occupies the empty slot at `idx` directly.
    pub fn place(&mut self, idx: usize, value: T) {
        self.slots[idx] = Some(value);
        self.size += 1;
        self.cover(idx);
    }

    /// Raises the watermark to cover `idx` if it doesn't already.
    fn cover(&mut self, idx: usize) {
        if idx >= self.watermark {
            self.watermark = idx + 1;
        }
    }

    /// The empty slot closest to `idx`, preferring the right-hand side: the
    /// scan runs from `idx + 1` to the end, then back down from `idx - 1`.
    fn nearest_empty(&self, idx: usize) -> Option<usize> {
        (idx + 1..self.cap())
            .find(|&i| self.slots[i].is_none())
            .or_else(|| (0..idx).rev().find(|&i| self.slots[i].is_none()))
    }

    /// Inserts at `idx`, shifting occupants toward the nearest empty slot
    /// when the target is taken. Hands the value back if no slot anywhere is
    /// empty.
    pub fn insert_shifting(&mut self, idx: usize, value: T) -> Result<(), T> {
        if self.slots[idx].is_none() {
            self.place(idx, value);
            return Ok(());
        }

        let Some(empty) = self.nearest_empty(idx) else {
            return Err(value);
        };

        if empty > idx {
            // The empty slot wraps around to idx, where the value lands.
            self.slots[idx..=empty].rotate_right(1);
            self.cover(empty);
        } else {
            self.slots[empty..=idx].rotate_left(1);
        }

        self.slots[idx] = Some(value);
        self.size += 1;
        Ok(())
    }

    /// The growth-path insert: shifts `idx..watermark` right by one into the
    /// slot at the watermark. Callable only when that whole span is occupied
    /// and the slot at the watermark exists and is empty, which is the state
    /// directly after growing a full buffer.
    pub fn insert_spilling(&mut self, idx: usize, value: T) {
        let end = self.watermark;

        self.slots[idx..=end].rotate_right(1);
        self.slots[idx] = Some(value);
        self.size += 1;
        self.watermark = end + 1;
    }

    /// First occupied slot whose value satisfies `compare` against `value`.
    /// Empty slots are skipped, so occupants keep their positions in the
    /// reported index even when holes precede them.
    pub fn index_of_by(
        &self,
        value: &T,
        mut compare: impl FnMut(&T, &T) -> bool,
    ) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|stored| compare(stored, value)))
    }

    pub fn remove_item_by(
        &mut self,
        value: &T,
        compare: impl FnMut(&T, &T) -> bool,
    ) -> Option<T> {
        let idx = self.index_of_by(value, compare)?;
        // idx refers to a slot index_of_by found occupied.
        self.size -= 1;
        self.slots[idx].take()
    }

    /// Builds a core of the same capacity by applying `produce` to every
    /// slot, occupied or not. Occupancy of the result follows what `produce`
    /// returns, and the watermark is recomputed from it.
    pub fn map_core<U>(
        &self,
        mut produce: impl FnMut(usize, Option<&T>) -> Option<U>,
    ) -> BufferCore<U> {
        let mut new = BufferCore::new(self.cap());

        for idx in 0..self.cap() {
            if let Some(value) = produce(idx, self.slots[idx].as_ref()) {
                new.place(idx, value);
            }
        }

        new
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }

        self.size = 0;
        self.watermark = 0;
    }
}
