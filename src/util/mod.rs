#![warn(missing_docs)]

pub mod alloc;
pub mod error;
pub mod index;
pub mod panic;
pub mod result;
