//! Contiguous growable array built on raw vessel storage.
//!
//! [`GrowableArray<T>`] owns a [`RawBuffer<T>`](vessel_raw::RawBuffer) and a
//! live-element count. Slots `[0, len)` hold live values; slots
//! `[len, capacity)` are uninitialized. Every operation that constructs,
//! destroys or relocates values keeps that split exact, including when an
//! element constructor fails or panics halfway through a bulk operation.
//!
//! # Architecture
//!
//! ```text
//! GrowableArray<T>
//! ├── RawBuffer<T>        storage only (vessel-raw)
//! ├── len                 live prefix length
//! ├── guard::PartialRun   unwinds a half-built run of values
//! └── relocate            bitwise moves between and within blocks
//! ```
//!
//! # Failure contracts
//!
//! | Operation | On allocation failure | On element failure |
//! |-----------|-----------------------|--------------------|
//! | `try_from_fn`, `clone` | nothing allocated | constructed prefix destroyed in reverse, buffer released |
//! | `try_reserve` | unchanged | n/a (relocation cannot fail) |
//! | `try_resize_with` (grow) | unchanged | new run destroyed, `len` unchanged, capacity may have grown |
//! | `try_emplace` (reallocating) | unchanged | unchanged, new block released |
//! | `try_emplace` (in place) | n/a | unchanged |
//! | `clone_from` (fits capacity) | n/a | valid, partially assigned |
//!
//! Non-`try_` variants panic with `"capacity overflow"` or call
//! [`std::alloc::handle_alloc_error`] on allocation failure, and propagate
//! panics from `Clone`, `Default` and constructor closures after the same
//! rollback.
//!
//! Traversal handles (`&T`, slices, iterators) borrow the array, so any
//! reallocating or shifting operation is statically prevented while one is
//! alive.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
mod capacity;
mod clone;
mod failure;
mod guard;
pub mod iter;
mod mutation;
mod relocate;

pub use array::GrowableArray;
pub use iter::IntoIter;
pub use vessel_core::{AllocError, ArrayError, GrowthPolicy};
