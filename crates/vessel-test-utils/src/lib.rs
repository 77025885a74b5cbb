//! Test utilities for vessel development.
//!
//! Provides [`Probe`], an element type that reports its own lifetime to a
//! per-thread ledger and can be told to fail, so tests can check that a
//! container constructs, relocates and destroys exactly what it should:
//!
//! - [`live_probes`]: probes currently alive on this thread.
//! - [`drop_log`]: values of destroyed probes, in destruction order.
//! - [`fail_clone_after`] / [`fail_default_after`]: make the N+1th
//!   `clone`/`default` panic while the returned [`FaultGuard`] is alive.
//!
//! The ledger is thread-local, so tests running in parallel do not see
//! each other's probes. Call [`reset_probes`] at the start of each test.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod probe;

pub use probe::{
    drop_log, fail_clone_after, fail_default_after, live_probes, reset_probes, FaultGuard, Probe,
};
