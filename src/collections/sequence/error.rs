use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

use crate::util::error::{IndexError, InvalidIndex, OutOfBoundary};

/// A value which failed the sequence's acceptance check on an operation that
/// has to store exactly what it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidArgument;

impl Display for InvalidArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Value is not acceptable for storage in this sequence!")
    }
}

impl Error for InvalidArgument {}

/// Everything that can go wrong when storing a value at a sequence position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum StoreError {
    OutOfBoundary(OutOfBoundary),
    InvalidIndex(InvalidIndex),
    InvalidArgument(InvalidArgument),
}

impl From<IndexError> for StoreError {
    fn from(error: IndexError) -> Self {
        match error {
            IndexError::OutOfBoundary(inner) => StoreError::OutOfBoundary(inner),
            IndexError::InvalidIndex(inner) => StoreError::InvalidIndex(inner),
        }
    }
}
