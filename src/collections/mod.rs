//! The collection types and the traits that shape them.
//!
//! # Purpose
//! Two families live here. The buffers are contiguous and slot-addressed,
//! with emptiness tracked per position, and the sequence is linked, with
//! admission controlled by [`Acceptable`](traits::Acceptable). A
//! [`ContainerKind`] names each concrete shape so callers can pick one at
//! runtime through the buffer factory.

pub mod buffer;
pub mod kind;
pub mod sequence;
pub mod traits;

pub use kind::ContainerKind;
