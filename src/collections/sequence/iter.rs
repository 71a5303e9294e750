use std::iter::FusedIterator;
use std::marker::PhantomData;

use SequenceState::*;

use super::{LinkedSequence, SequenceContents, SequenceState};

impl<T> IntoIterator for LinkedSequence<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            sequence: self,
        }
    }
}

/// Owned iteration in front-to-back order.
pub struct IntoIter<T> {
    // The iterator holds the whole sequence and pops from the ends.
    pub(crate) sequence: LinkedSequence<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.sequence.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.sequence.pop_back()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.sequence.len()
    }
}

impl<'a, T> IntoIterator for &'a LinkedSequence<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            state: self.state.clone(),
            _phantom: PhantomData,
        }
    }
}

/// Borrowed iteration in front-to-back order.
pub struct Iter<'a, T> {
    // Although the fields are exactly those of a sequence, this structure never
    // modifies the underlying nodes and uses len to track the number of items
    // left to yield.
    pub(crate) state: SequenceState<T>,
    pub(crate) _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            Empty => None,
            Full(SequenceContents { len, head, .. }) => {
                let value = head.value();

                match len.checked_sub(1) {
                    Some(new_len) => {
                        // SAFETY: The previous length was greater than 1, so the first
                        // element is followed by at least one more.
                        let new_head = unsafe { head.next().unwrap_unchecked() };
                        *head = new_head;
                        // Never actually modify the node itself.
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(value)
            },
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            Empty => None,
            Full(SequenceContents { len, tail, .. }) => {
                let value = tail.value();

                match len.checked_sub(1) {
                    Some(new_len) => {
                        // SAFETY: The previous length was greater than 1, so the last
                        // element is preceded by at least one more.
                        let new_tail = unsafe { tail.prev().unwrap_unchecked() };
                        *tail = new_tail;
                        // Never actually modify the node itself.
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(value)
            },
        }
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    fn len(&self) -> usize {
        self.state.len()
    }
}

/// Removal from the front, created by
/// [`drain_front`](LinkedSequence::drain_front).
pub struct DrainFront<'a, T> {
    pub(crate) sequence: &'a mut LinkedSequence<T>,
    pub(crate) remaining: usize,
}

impl<'a, T> DrainFront<'a, T> {
    pub(crate) fn new(sequence: &'a mut LinkedSequence<T>, count: usize) -> DrainFront<'a, T> {
        let remaining = count.min(sequence.len());

        DrainFront {
            sequence,
            remaining,
        }
    }
}

impl<'a, T> Iterator for DrainFront<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.remaining.checked_sub(1) {
            Some(remaining) => {
                self.remaining = remaining;
                self.sequence.pop_front()
            },
            None => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> Drop for DrainFront<'a, T> {
    fn drop(&mut self) {
        // Unconsumed elements still leave the sequence.
        while self.next().is_some() {}
    }
}

impl<'a, T> FusedIterator for DrainFront<'a, T> {}

impl<'a, T> ExactSizeIterator for DrainFront<'a, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// Removal from the back, created by
/// [`drain_back`](LinkedSequence::drain_back).
pub struct DrainBack<'a, T> {
    pub(crate) sequence: &'a mut LinkedSequence<T>,
    pub(crate) remaining: usize,
}

impl<'a, T> DrainBack<'a, T> {
    pub(crate) fn new(sequence: &'a mut LinkedSequence<T>, count: usize) -> DrainBack<'a, T> {
        let remaining = count.min(sequence.len());

        DrainBack {
            sequence,
            remaining,
        }
    }
}

impl<'a, T> Iterator for DrainBack<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.remaining.checked_sub(1) {
            Some(remaining) => {
                self.remaining = remaining;
                self.sequence.pop_back()
            },
            None => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> Drop for DrainBack<'a, T> {
    fn drop(&mut self) {
        // Unconsumed elements still leave the sequence.
        while self.next().is_some() {}
    }
}

impl<'a, T> FusedIterator for DrainBack<'a, T> {}

impl<'a, T> ExactSizeIterator for DrainBack<'a, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}
