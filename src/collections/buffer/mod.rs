//! A module containing the slot buffer family: [`StaticBuffer`],
//! [`DynamicBuffer`] and the [`Buffer`] handle produced by its factory.
//!
//! Both variants share the same storage model. Every slot is addressable at
//! two indexes, a non-negative one counted from the front and a negative one
//! counted back from the capacity, and emptiness is a per-slot property:
//! removal leaves a hole where the value was rather than closing ranks. The
//! variants differ only in what happens when room runs out, with the static
//! buffer refusing and the dynamic one growing by its configured increment.
//!
//! [`IntoIter`] provides owned iteration over all slots.
//! [`Iter`](std::slice::Iter) from [`std::slice`] is used for borrowed
//! iteration.

mod core;
mod dynamic_buffer;
mod error;
mod factory;
mod iter;
mod slots;
mod static_buffer;
mod tests;

pub use dynamic_buffer::*;
pub use error::*;
pub use factory::*;
pub use iter::*;
pub use static_buffer::*;

pub(crate) use self::core::*;
pub(crate) use slots::*;

#[doc(inline)]
pub use crate::util::error::{IndexError, InvalidIndex, OutOfBoundary};
