use std::ptr::NonNull;

pub(crate) type Link<T> = Option<NodeHandle<T>>;

// NOTE: Nodes are allocated through Box<T> rather than alloc, because Box<T>
// has the special property that dereferencing it allows a value to be moved
// out of the heap.

pub(crate) struct SequenceNode<T> {
    pub value: T,
    pub prev: Link<T>,
    pub next: Link<T>,
}

/// A copyable non-owning handle to a heap node. The sequence holding the
/// chain decides when each node is released, so every accessor hands out
/// unbounded lifetimes which the sequence's own borrows then constrain.
#[derive(Debug)]
pub(crate) struct NodeHandle<T>(NonNull<SequenceNode<T>>);

impl<T> NodeHandle<T> {
    pub fn from_node(node: SequenceNode<T>) -> NodeHandle<T> {
        NodeHandle(NonNull::from(Box::leak(Box::new(node))))
    }

    /// Reclaims the node as an owned value, moving it off the heap. No copy
    /// of this handle may be used afterwards.
    pub fn take_node(self) -> SequenceNode<T> {
        // SAFETY: The pointer came from Box::leak in from_node, and each
        // allocation is reclaimed at most once.
        unsafe { *Box::from_raw(self.0.as_ptr()) }
    }

    /// Releases the node without reclaiming it. No copy of this handle may be
    /// used afterwards.
    ///
    /// # Safety
    /// The caller must guarantee the node has not already been taken or
    /// dropped through another copy of the handle.
    pub unsafe fn drop_node(self) {
        // SAFETY: The pointer came from Box::leak in from_node; single release
        // is the caller's guarantee.
        drop(unsafe { Box::from_raw(self.0.as_ptr()) });
    }

    pub fn value<'a>(&self) -> &'a T {
        // SAFETY: The sequence keeps the node alive for as long as any handle to
        // it remains reachable.
        unsafe { &(*self.0.as_ptr()).value }
    }

    pub fn value_mut<'a>(&mut self) -> &'a mut T {
        // SAFETY: As for value, with exclusivity inherited from the mutable
        // borrow of the sequence that produced this handle.
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    pub fn prev<'a>(&self) -> &'a Link<T> {
        // SAFETY: As for value.
        unsafe { &(*self.0.as_ptr()).prev }
    }

    #[allow(clippy::mut_from_ref)]
    pub fn prev_mut<'a>(&self) -> &'a mut Link<T> {
        // SAFETY: As for value_mut; link rewiring goes through methods taking the
        // sequence mutably.
        unsafe { &mut (*self.0.as_ptr()).prev }
    }

    pub fn next<'a>(&self) -> &'a Link<T> {
        // SAFETY: As for value.
        unsafe { &(*self.0.as_ptr()).next }
    }

    #[allow(clippy::mut_from_ref)]
    pub fn next_mut<'a>(&self) -> &'a mut Link<T> {
        // SAFETY: As for value_mut; link rewiring goes through methods taking the
        // sequence mutably.
        unsafe { &mut (*self.0.as_ptr()).next }
    }
}

impl<T> Clone for NodeHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeHandle<T> {}

impl<T> PartialEq for NodeHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
