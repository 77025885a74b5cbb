//! Vessel: a contiguous growable array built directly on raw memory.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the vessel sub-crates. For most users, adding `vessel` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use vessel::prelude::*;
//!
//! let mut array = GrowableArray::new();
//! array.push(1);
//! array.push(2);
//! array.push(3);
//! array.insert(1, 99);
//! assert_eq!(array, [1, 99, 2, 3]);
//!
//! let next = array.erase(1);
//! assert_eq!(array[next], 2);
//!
//! array.reserve(100);
//! assert!(array.capacity() >= 100);
//! assert_eq!(array, [1, 2, 3]);
//!
//! // Fallible construction reports the constructor's own error after
//! // unwinding everything it built.
//! let parsed = GrowableArray::try_from_fn(3, |i| ["1", "2", "x"][i].parse::<i32>());
//! assert!(matches!(parsed, Err(ArrayError::Element(_))));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`array`] | `vessel-array` | `GrowableArray`, owning `IntoIter` |
//! | [`raw`] | `vessel-raw` | `RawBuffer` storage handle |
//! | [`types`] | `vessel-core` | Error types and `GrowthPolicy` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The growable array and its iterators (`vessel-array`).
pub use vessel_array as array;

/// Raw, uninitialized element storage (`vessel-raw`).
///
/// Only needed when building another container on the same storage layer.
pub use vessel_raw as raw;

/// Error taxonomy and growth configuration (`vessel-core`).
pub use vessel_core as types;

/// Common imports for typical usage.
///
/// ```rust
/// use vessel::prelude::*;
/// ```
pub mod prelude {
    pub use vessel_array::{GrowableArray, IntoIter};
    pub use vessel_core::{AllocError, ArrayError, GrowthPolicy};
    pub use vessel_raw::RawBuffer;
}
