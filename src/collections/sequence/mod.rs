mod error;
mod iter;
mod length;
mod node;
mod sequence;

pub use error::*;
pub use iter::*;
pub(crate) use length::*;
pub(crate) use node::*;
pub use sequence::*;

#[doc(inline)]
pub use crate::util::error::{IndexError, InvalidIndex, OutOfBoundary};
