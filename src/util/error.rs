use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index which falls outside the addressable range of a collection.
///
/// `extent` is the addressable reach at the time of the failure: the capacity
/// for buffers (doubled for the growable insert window) and the length for
/// sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBoundary {
    pub index: isize,
    pub extent: usize,
}

impl Display for OutOfBoundary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Index {} out of boundary for {} addressable positions!",
            self.index, self.extent
        )
    }
}

impl Error for OutOfBoundary {}

/// An index which cannot be interpreted as an integer slot position.
///
/// Signed indexes rule out the fractional and non-numeric cases statically,
/// so this only arises when a collection's extent itself exceeds the signed
/// address space, which requires zero-sized slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidIndex {
    pub index: isize,
}

impl Display for InvalidIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} cannot be resolved to an integer slot position!", self.index)
    }
}

impl Error for InvalidIndex {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum IndexError {
    OutOfBoundary(OutOfBoundary),
    InvalidIndex(InvalidIndex),
}
