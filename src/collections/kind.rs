use derive_more::IsVariant;

/// The container families this crate can construct, used by the
/// [`Buffer::create`] factory to select a concrete implementation.
///
/// [`Buffer::create`]: crate::collections::buffer::Buffer::create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum ContainerKind {
    /// A fixed-capacity buffer addressable from both ends.
    StaticBuffer,
    /// A buffer which grows by a configured increment when it runs out of
    /// room.
    DynamicBuffer,
    /// A doubly-linked sequence of heap nodes.
    LinkedSequence,
}
