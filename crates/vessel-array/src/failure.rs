//! Turning `try_` results into the panicking API.

use std::convert::Infallible;

use vessel_core::{AllocError, ArrayError};

/// Report an allocation failure the way the std collections do.
#[cold]
#[track_caller]
pub(crate) fn handle_alloc_failure(err: AllocError) -> ! {
    match err {
        AllocError::CapacityOverflow { .. } => panic!("capacity overflow"),
        AllocError::OutOfMemory { layout } => std::alloc::handle_alloc_error(layout),
    }
}

/// Unwrap the result of a `try_` operation whose constructor cannot fail.
#[track_caller]
pub(crate) fn infallible<R>(result: Result<R, ArrayError<Infallible>>) -> R {
    match result {
        Ok(value) => value,
        Err(ArrayError::Alloc(err)) => handle_alloc_failure(err),
        Err(ArrayError::Element(never)) => match never {},
    }
}
