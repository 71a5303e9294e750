use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

use crate::collections::kind::ContainerKind;
use crate::util::error::{IndexError, InvalidIndex, OutOfBoundary};

/// A fixed-capacity buffer with no empty slot left anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub capacity: usize,
}

impl Display for CapacityExceeded {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "No space left in a buffer with capacity {}!", self.capacity)
    }
}

impl Error for CapacityExceeded {}

/// A [`ContainerKind`] the buffer factory has no implementation for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDataType {
    pub kind: ContainerKind,
}

impl Display for InvalidDataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "The buffer factory cannot construct {:?} containers!", self.kind)
    }
}

impl Error for InvalidDataType {}

/// Everything that can go wrong during a positional buffer insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum InsertError {
    OutOfBoundary(OutOfBoundary),
    InvalidIndex(InvalidIndex),
    CapacityExceeded(CapacityExceeded),
}

impl From<IndexError> for InsertError {
    fn from(error: IndexError) -> Self {
        match error {
            IndexError::OutOfBoundary(inner) => InsertError::OutOfBoundary(inner),
            IndexError::InvalidIndex(inner) => InsertError::InvalidIndex(inner),
        }
    }
}
