//! Core types for the vessel container workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! error taxonomy shared by the raw storage layer and the growable array,
//! and the growth policy that decides how much storage a reallocation asks
//! for.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;

pub use config::GrowthPolicy;
pub use error::{AllocError, ArrayError};
