//! Raw element storage for the vessel containers.
//!
//! A [`RawBuffer<T>`] owns one block of correctly aligned, uninitialized
//! storage with room for exactly `capacity` values of `T`. It never
//! constructs or destroys a `T`: which slots hold live values is tracked by
//! whoever owns the buffer. This crate is one of two that may contain
//! `unsafe` code (along with `vessel-array`), and the allocator calls are
//! confined to `raw.rs`.
//!
//! # Slot states
//!
//! ```text
//! RawBuffer<T>  (ptr, capacity)
//! ├── [0, capacity)   allocated, contents unknown to the buffer
//! └── capacity        one-past-end address, never dereferenced
//! ```
//!
//! A zero-capacity buffer is the *sentinel*: it holds a dangling pointer
//! and no allocation, so dropping or releasing it is free. Buffers of a
//! zero-sized `T` never touch the allocator either.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod buffer;
mod raw;

pub use buffer::RawBuffer;
pub use vessel_core::AllocError;
