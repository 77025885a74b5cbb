//! Global allocator primitives.
//!
//! The only place in the workspace that calls into `std::alloc`. Every
//! `unsafe` block carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use vessel_core::AllocError;

/// Layout of a block holding `capacity` values of `T`.
pub(crate) fn layout_for<T>(capacity: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow {
        requested: capacity,
    })
}

/// Allocate uninitialized storage for `capacity` values of `T`.
///
/// Zero-byte layouts (empty requests and zero-sized `T`) return a dangling,
/// well-aligned pointer without calling the allocator.
pub(crate) fn allocate<T>(capacity: usize) -> Result<NonNull<T>, AllocError> {
    let layout = layout_for::<T>(capacity)?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }
    // SAFETY: `layout` has a non-zero size.
    let ptr = unsafe { alloc::alloc(layout) };
    NonNull::new(ptr.cast::<T>()).ok_or_else(|| {
        tracing::debug!(
            requested = capacity,
            bytes = layout.size(),
            align = layout.align(),
            "allocation refused by global allocator"
        );
        AllocError::OutOfMemory { layout }
    })
}

/// Return storage obtained from [`allocate`] to the allocator.
///
/// # Safety
///
/// `ptr` must have been returned by `allocate::<T>(capacity)` with this
/// same `capacity`, and must not be used afterwards.
pub(crate) unsafe fn deallocate<T>(ptr: NonNull<T>, capacity: usize) {
    // The layout was valid when the block was allocated, so it still is.
    let Ok(layout) = layout_for::<T>(capacity) else {
        return;
    };
    if layout.size() == 0 {
        return;
    }
    // SAFETY: the caller guarantees `ptr` came from `alloc::alloc(layout)`
    // with exactly this layout and has not been freed.
    unsafe { alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) }
}
