//! Linear collections addressed by position from either end.
//!
//! # Purpose
//! I wrote these types to explore how far positional storage can drift from a
//! plain array while still being addressed like one. The buffers here keep a
//! slot for every position and let elements come and go without sliding their
//! neighbors around, and the linked sequence vets every value before it is
//! allowed in. All of them accept negative indexes, which count back from the
//! far end the way positive ones count forward from zero.
//!
//! # Method
//! The contiguous types manage their own allocations rather than leaning on
//! [`Vec`]; in fact this crate doesn't use [`Vec`] at all. I've tried to keep
//! the unsafe code small and justified, with the pointer handling fenced into
//! a couple of modules that the rest of the crate goes through.
//!
//! # Error Handling
//! Methods that can fail come in pairs: a `try_` form returning a strongly
//! typed [`Result`], and a short form that panics with the same message for
//! callers who have already ruled the failure out. The error types are plain
//! structs gathered into enums per operation, so matching on them stays
//! static.
//!
//! # Dependencies
//! A couple of derive macros cover the repetitive trait impls. The data
//! structures themselves are all hand-rolled.

// #![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;
