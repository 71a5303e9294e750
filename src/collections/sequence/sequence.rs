use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::ops::Index;

use derive_more::IsVariant;

use super::error::{InvalidArgument, StoreError};
use super::{DrainBack, DrainFront, Iter, Length, NodeHandle, ONE, SequenceNode};
use crate::collections::traits::Acceptable;
use crate::util::error::{IndexError, OutOfBoundary};
use crate::util::index::{self, Bound};
use crate::util::result::ResultExtension;

/// A sequence with links in both directions, gated by [`Acceptable`]: values
/// that fail the check are skipped by the bulk operations and rejected with
/// an error by the positional ones, so the chain only ever holds acceptable
/// values.
///
/// Positions may be addressed from either end. Non-negative indexes count
/// from the front and negative ones count back from the length, so `-1` is
/// the last element. Seeking starts from whichever end is closer.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of elements in the LinkedSequence.
/// - `i`: The index of the element in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front/back` | `O(1)` |
/// | `push_front/back` | `O(1)` |
/// | `pop_front/back` | `O(1)` |
/// | `get` | `O(min(i, n-i))` |
/// | `insert` | `O(min(i, n-i))` |
/// | `remove` | `O(min(i, n-i))` |
/// | `replace` | `O(min(i, n-i))` |
/// | `index_of` | `O(n)` |
///
/// # Examples
/// ```
/// # use linear_collections::collections::sequence::LinkedSequence;
/// let mut seq = LinkedSequence::new();
/// seq.push_back(1.5);
/// seq.push_back(f64::NAN);
/// seq.push_back(2.5);
///
/// // The NaN was skipped by the acceptance check.
/// assert_eq!(seq.len(), 2);
/// assert_eq!(seq.front(), Some(&1.5));
/// assert_eq!(seq.get(-1), &2.5);
/// ```
#[derive(PartialEq, Eq)]
pub struct LinkedSequence<T> {
    pub(crate) state: SequenceState<T>,
    pub(crate) _phantom: PhantomData<T>,
}

#[derive(Default, PartialEq, Eq, IsVariant)]
pub(crate) enum SequenceState<T> {
    #[default]
    Empty,
    Full(SequenceContents<T>),
}

use SequenceState::*;

pub(crate) struct SequenceContents<T> {
    pub len: Length,
    pub head: NodeHandle<T>,
    pub tail: NodeHandle<T>,
}

impl<T> LinkedSequence<T> {
    /// Creates a new LinkedSequence with no elements.
    pub const fn new() -> LinkedSequence<T> {
        LinkedSequence {
            state: Empty,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of elements in the LinkedSequence.
    pub const fn len(&self) -> usize {
        self.state.len()
    }

    /// Returns true if the LinkedSequence contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Returns a reference to the first element, if it exists.
    pub fn front(&self) -> Option<&T> {
        match self.state {
            Empty => None,
            Full(SequenceContents { head, .. }) => Some(head.value()),
        }
    }

    /// Returns a reference to the last element, if it exists.
    pub fn back(&self) -> Option<&T> {
        match self.state {
            Empty => None,
            Full(SequenceContents { tail, .. }) => Some(tail.value()),
        }
    }

    /// Removes the first element and returns it, if the sequence isn't empty.
    pub fn pop_front(&mut self) -> Option<T> {
        match &mut self.state {
            Empty => None,
            Full(SequenceContents { len, head, .. }) => {
                let node = head.take_node();

                match len.checked_sub(1) {
                    Some(new_len) => {
                        // SAFETY: The previous length was greater than 1, so another
                        // node follows the old head.
                        let new_head = unsafe { node.next.unwrap_unchecked() };
                        *head = new_head;
                        *new_head.prev_mut() = None;
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(node.value)
            },
        }
    }

    /// Removes the last element and returns it, if the sequence isn't empty.
    pub fn pop_back(&mut self) -> Option<T> {
        match &mut self.state {
            Empty => None,
            Full(SequenceContents { len, tail, .. }) => {
                let node = tail.take_node();

                match len.checked_sub(1) {
                    Some(new_len) => {
                        // SAFETY: The previous length was greater than 1, so another
                        // node precedes the old tail.
                        let new_tail = unsafe { node.prev.unwrap_unchecked() };
                        *tail = new_tail;
                        *new_tail.next_mut() = None;
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(node.value)
            },
        }
    }

    /// Returns a reference to the element at `index`, which may be negative
    /// to count back from the length.
    ///
    /// The same functionality can be achieved using the [`Index`] operator.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside `-len..len`.
    pub fn try_get(&self, index: isize) -> Result<&T, IndexError> {
        let idx = self.resolve(index, Bound::Exclusive)?;

        match &self.state {
            Full(contents) => Ok(contents.seek(idx).value()),
            // resolve rejects every index on an empty sequence.
            Empty => Err(OutOfBoundary { index, extent: 0 }.into()),
        }
    }

    /// Returns a reference to the element at `index`. See
    /// [`try_get`](LinkedSequence::try_get).
    ///
    /// # Panics
    /// Panics if the index falls outside `-len..len`.
    pub fn get(&self, index: isize) -> &T {
        self.try_get(index).throw()
    }

    /// Removes the element at `index` and returns it, stitching its
    /// neighbors together.
    ///
    /// # Errors
    /// Returns [`IndexError`] if the index falls outside `-len..len`.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::sequence::LinkedSequence;
    /// let mut seq: LinkedSequence<i32> = (1..=4).collect();
    ///
    /// assert_eq!(seq.try_remove(-2), Ok(3));
    /// assert_eq!(seq.len(), 3);
    /// assert_eq!(seq.get(2), &4);
    /// ```
    pub fn try_remove(&mut self, index: isize) -> Result<T, IndexError> {
        let len = self.len();
        let idx = self.resolve(index, Bound::Exclusive)?;

        if idx == 0 {
            // SAFETY: resolve only accepts indexes below the length, so there is
            // a front to pop.
            return Ok(unsafe { self.pop_front().unwrap_unchecked() });
        }
        if idx == len - 1 {
            // SAFETY: As above, there is a back to pop.
            return Ok(unsafe { self.pop_back().unwrap_unchecked() });
        }

        match &mut self.state {
            Full(contents) => Ok(contents.unsplice(idx)),
            // Interior indexes only resolve on a populated sequence.
            Empty => Err(OutOfBoundary { index, extent: 0 }.into()),
        }
    }

    /// Removes the element at `index` and returns it. See
    /// [`try_remove`](LinkedSequence::try_remove).
    ///
    /// # Panics
    /// Panics if the index falls outside `-len..len`.
    pub fn remove(&mut self, index: isize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes up to `count` elements from the front, yielding them in
    /// removal order. Asking for more elements than exist drains what there
    /// is.
    ///
    /// Dropping the iterator finishes the removal, so an unconsumed drain
    /// still takes the elements out.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::sequence::LinkedSequence;
    /// let mut seq: LinkedSequence<i32> = (1..=5).collect();
    /// let mut drained = seq.drain_front(2);
    ///
    /// assert_eq!(drained.next(), Some(1));
    /// assert_eq!(drained.next(), Some(2));
    /// assert_eq!(drained.next(), None);
    /// drop(drained);
    ///
    /// assert_eq!(seq.len(), 3);
    /// ```
    pub fn drain_front(&mut self, count: usize) -> DrainFront<'_, T> {
        DrainFront::new(self, count)
    }

    /// Removes up to `count` elements from the back, yielding them in
    /// removal order, last element first. Asking for more elements than
    /// exist drains what there is.
    ///
    /// Dropping the iterator finishes the removal, so an unconsumed drain
    /// still takes the elements out.
    pub fn drain_back(&mut self, count: usize) -> DrainBack<'_, T> {
        DrainBack::new(self, count)
    }

    /// Removes every element, releasing the whole chain.
    pub fn clear(&mut self) {
        if let Full(SequenceContents { head, .. }) = mem::take(&mut self.state) {
            let mut curr = Some(head);

            while let Some(handle) = curr {
                curr = *handle.next();
                // SAFETY: The chain was detached whole, so each node is released
                // exactly once as the walk passes it.
                unsafe { handle.drop_node() };
            }
        }
    }

    /// First position whose element satisfies `compare` against `value`,
    /// called as `compare(element, value)` and scanning from the front.
    ///
    /// The walk is bounded by the recorded length, so it terminates even if
    /// the chain were miswired into a cycle.
    pub fn index_of_by(
        &self,
        value: &T,
        mut compare: impl FnMut(&T, &T) -> bool,
    ) -> Option<usize> {
        self.iter().position(|element| compare(element, value))
    }

    /// Returns true if any element satisfies `compare` against `value`.
    pub fn contains_by(
        &self,
        value: &T,
        compare: impl FnMut(&T, &T) -> bool,
    ) -> bool {
        self.index_of_by(value, compare).is_some()
    }

    /// Removes the first element satisfying `compare` against `value` and
    /// returns it.
    pub fn remove_item_by(
        &mut self,
        value: &T,
        compare: impl FnMut(&T, &T) -> bool,
    ) -> Option<T> {
        let idx = self.index_of_by(value, compare)?;
        self.try_remove(idx as isize).ok()
    }

    /// Borrowed iteration from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    fn resolve(&self, index: isize, bound: Bound) -> Result<usize, IndexError> {
        index::resolve(index, self.len(), bound)
    }

    pub(crate) fn push_front_raw(&mut self, value: T) {
        match &mut self.state {
            Empty => self.state = SequenceState::single(value),
            Full(contents) => contents.push_front(value),
        }
    }

    pub(crate) fn push_back_raw(&mut self, value: T) {
        match &mut self.state {
            Empty => self.state = SequenceState::single(value),
            Full(contents) => contents.push_back(value),
        }
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn verify_links(&self) {
        match self.state {
            Empty => {},
            Full(SequenceContents { len, head, tail }) => {
                let mut curr = head;
                let mut count = 1;

                while let Some(next) = curr.next() {
                    // UNWRAP: This needs to panic if prev is missing.
                    assert!(next.prev().unwrap() == curr);
                    curr = *next;
                    count += 1;
                }

                assert!(tail == curr);
                assert_eq!(len.get(), count);
            },
        }
    }
}

impl<T: Acceptable> LinkedSequence<T> {
    /// Adds the value as the new first element. Values failing the
    /// acceptance check are skipped, leaving the sequence unchanged.
    pub fn push_front(&mut self, value: T) {
        if value.is_acceptable() {
            self.push_front_raw(value);
        }
    }

    /// Adds the value as the new last element. Values failing the acceptance
    /// check are skipped, leaving the sequence unchanged.
    pub fn push_back(&mut self, value: T) {
        if value.is_acceptable() {
            self.push_back_raw(value);
        }
    }

    /// Pushes every value to the front in turn, so the accepted values end
    /// up before the existing elements in reverse of the order given.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::sequence::LinkedSequence;
    /// let mut seq: LinkedSequence<i32> = [3, 4].into_iter().collect();
    /// seq.extend_front([2, 1]);
    ///
    /// assert_eq!(seq.front(), Some(&1));
    /// assert_eq!(seq.len(), 4);
    /// ```
    pub fn extend_front<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.push_front(value);
        }
    }

    /// Pushes every value to the back in turn, keeping the order given for
    /// the accepted values.
    pub fn extend_back<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.push_back(value);
        }
    }

    /// Inserts `value` so that it ends up at `index`. Both ends count as
    /// insertion points, so indexes from `-len` to `len` inclusive resolve,
    /// with negative ones counting back from the length.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the value fails the acceptance check or the
    /// index falls outside `-len..=len`.
    ///
    /// # Examples
    /// ```
    /// # use linear_collections::collections::sequence::LinkedSequence;
    /// let mut seq: LinkedSequence<i32> = [1, 3].into_iter().collect();
    /// seq.try_insert(1, 2).unwrap();
    /// seq.try_insert(3, 4).unwrap();
    ///
    /// assert_eq!(seq.get(1), &2);
    /// assert_eq!(seq.back(), Some(&4));
    /// ```
    pub fn try_insert(&mut self, index: isize, value: T) -> Result<(), StoreError> {
        if !value.is_acceptable() {
            return Err(InvalidArgument.into());
        }

        let len = self.len();
        let idx = self.resolve(index, Bound::Inclusive)?;

        match idx {
            0 => self.push_front_raw(value),
            val if val == len => self.push_back_raw(value),
            val => {
                // 0 < val < len, so the sequence is populated and the target
                // node has a predecessor.
                if let Full(contents) = &mut self.state {
                    contents.splice_before(val, value);
                }
            },
        }

        Ok(())
    }

    /// Inserts `value` so that it ends up at `index`. See
    /// [`try_insert`](LinkedSequence::try_insert).
    ///
    /// # Panics
    /// Panics if the value fails the acceptance check or the index falls
    /// outside `-len..=len`.
    pub fn insert(&mut self, index: isize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Swaps the element at `index` for `value` and returns the old element.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the value fails the acceptance check or the
    /// index falls outside `-len..len`.
    pub fn try_replace(&mut self, index: isize, value: T) -> Result<T, StoreError> {
        if !value.is_acceptable() {
            return Err(InvalidArgument.into());
        }

        let idx = self.resolve(index, Bound::Exclusive)?;

        match &mut self.state {
            Full(contents) => Ok(mem::replace(contents.seek(idx).value_mut(), value)),
            // resolve rejects every index on an empty sequence.
            Empty => Err(OutOfBoundary { index, extent: 0 }.into()),
        }
    }

    /// Swaps the element at `index` for `value` and returns the old element.
    /// See [`try_replace`](LinkedSequence::try_replace).
    ///
    /// # Panics
    /// Panics if the value fails the acceptance check or the index falls
    /// outside `-len..len`.
    pub fn replace(&mut self, index: isize, value: T) -> T {
        self.try_replace(index, value).throw()
    }
}

impl<T: PartialEq> LinkedSequence<T> {
    /// First position whose element equals `value`, scanning from the front.
    ///
    /// Unacceptable values are never stored, so searching for one simply
    /// finds nothing.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.index_of_by(value, T::eq)
    }

    /// Returns true if any element equals `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Removes the first element equal to `value` and returns it.
    pub fn remove_item(&mut self, value: &T) -> Option<T> {
        self.remove_item_by(value, T::eq)
    }
}

impl<T> SequenceContents<T> {
    pub fn seek(&self, index: usize) -> NodeHandle<T> {
        if index < self.len.get() / 2 {
            self.seek_fwd(index, self.head)
        } else {
            self.seek_bwd(self.last_index() - index, self.tail)
        }
    }

    pub fn seek_fwd(&self, count: usize, mut node: NodeHandle<T>) -> NodeHandle<T> {
        for _ in 0..count {
            // UNWRAP: count keeps the walk inside the chain.
            node = node.next().unwrap();
        }
        node
    }

    pub fn seek_bwd(&self, count: usize, mut node: NodeHandle<T>) -> NodeHandle<T> {
        for _ in 0..count {
            // UNWRAP: count keeps the walk inside the chain.
            node = node.prev().unwrap();
        }
        node
    }

    pub fn push_front(&mut self, value: T) {
        self.len = self.len.checked_add(1).expect("Length overflow!");

        let node = NodeHandle::from_node(SequenceNode {
            value,
            prev: None,
            next: Some(self.head),
        });

        *self.head.prev_mut() = Some(node);
        self.head = node;
    }

    pub fn push_back(&mut self, value: T) {
        self.len = self.len.checked_add(1).expect("Length overflow!");

        let node = NodeHandle::from_node(SequenceNode {
            value,
            prev: Some(self.tail),
            next: None,
        });

        *self.tail.next_mut() = Some(node);
        self.tail = node;
    }

    /// Splices `value` in immediately before the node at `idx`, which must
    /// be an interior index.
    pub fn splice_before(&mut self, idx: usize, value: T) {
        let target = self.seek(idx);

        self.len = self.len.checked_add(1).expect("Length overflow!");

        // SAFETY: idx is at least 1, so the target node has a predecessor.
        let prev_node = unsafe { target.prev().unwrap_unchecked() };

        let node = NodeHandle::from_node(SequenceNode {
            value,
            prev: Some(prev_node),
            next: Some(target),
        });

        *prev_node.next_mut() = Some(node);
        *target.prev_mut() = Some(node);
    }

    /// Removes the interior node at `idx`, stitching its neighbors together.
    /// The end positions are handled by the pops instead.
    pub fn unsplice(&mut self, idx: usize) -> T {
        let node = self.seek(idx).take_node();

        // SAFETY: Interior nodes have a neighbor on each side.
        unsafe {
            *node.prev.unwrap_unchecked().next_mut() = node.next;
            *node.next.unwrap_unchecked().prev_mut() = node.prev;
        }
        // SAFETY: A length of 1 has no interior indexes, so at least one
        // element remains.
        self.len = unsafe { self.len.checked_sub(1).unwrap_unchecked() };

        node.value
    }

    pub fn wrap_one(value: T) -> SequenceContents<T> {
        let node = NodeHandle::from_node(SequenceNode {
            value,
            prev: None,
            next: None,
        });

        SequenceContents {
            len: ONE,
            head: node,
            tail: node,
        }
    }

    pub const fn last_index(&self) -> usize {
        self.len.get() - 1
    }
}

impl<T> SequenceState<T> {
    pub fn single(value: T) -> SequenceState<T> {
        Full(SequenceContents::wrap_one(value))
    }

    pub const fn len(&self) -> usize {
        match self {
            Empty => 0,
            Full(SequenceContents { len, .. }) => len.get(),
        }
    }
}

impl<T> Index<isize> for LinkedSequence<T> {
    type Output = T;

    /// # Panics
    /// Panics if the index falls outside `-len..len`.
    fn index(&self, index: isize) -> &Self::Output {
        self.get(index)
    }
}

impl<T: Acceptable> FromIterator<T> for LinkedSequence<T> {
    /// Collects the acceptable values in order, skipping the rest.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = LinkedSequence::new();
        sequence.extend_back(iter);
        sequence
    }
}

impl<T: Acceptable> Extend<T> for LinkedSequence<T> {
    /// Appends the acceptable values in order, skipping the rest.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.extend_back(iter);
    }
}

impl<T> Default for LinkedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedSequence<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: PartialEq> PartialEq for SequenceContents<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut node_a = self.head;
        let mut node_b = other.head;

        loop {
            if node_a.value() != node_b.value() {
                break false;
            }
            match (node_a.next(), node_b.next()) {
                (Some(next_a), Some(next_b)) => {
                    node_a = *next_a;
                    node_b = *next_b;
                },
                // The lengths matched, so both chains run out together.
                _ => break true,
            }
        }
    }
}

impl<T: Eq> Eq for SequenceContents<T> {}

impl<T> Clone for SequenceContents<T> {
    /// A shallow clone sharing the nodes, for iteration. Never hand one
    /// anywhere that could release or rewire the chain.
    fn clone(&self) -> Self {
        SequenceContents {
            len: self.len,
            head: self.head,
            tail: self.tail,
        }
    }
}

impl<T> Clone for SequenceState<T> {
    fn clone(&self) -> Self {
        match self {
            Empty => Empty,
            Full(contents) => Full(contents.clone()),
        }
    }
}

impl<T: Debug> Debug for LinkedSequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Debug> Display for LinkedSequence<T> {
    /// Renders the chain in travel order, `HEAD -> [1] -> [2] -> TAIL`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "HEAD")?;

        for value in self.iter() {
            write!(f, " -> [{value:?}]")?;
        }

        write!(f, " -> TAIL")
    }
}
