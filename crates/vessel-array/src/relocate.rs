//! Moving live values between and within storage blocks.
//!
//! A Rust move is a bitwise copy that cannot fail, for every type. The
//! "copy instead of move when moving might fail" choice a reallocating
//! container would otherwise make is therefore always resolved to *move*:
//! relocation never calls `Clone`, never panics, and leaves the source
//! slots logically uninitialized. Only destruction consults the element
//! type, skipping the drop loop for types without drop glue.

#![allow(unsafe_code)]

use std::mem;
use std::ptr;

/// Move `count` live values from `src` into uninitialized slots at `dst`.
///
/// # Safety
///
/// `[src, src + count)` must be live and `[dst, dst + count)` uninitialized;
/// the ranges must not overlap. Afterwards the source range is uninitialized
/// and must not be dropped.
pub(crate) unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    // SAFETY: forwarded from the caller.
    unsafe { ptr::copy_nonoverlapping(src, dst, count) }
}

/// Shift `count` live values starting at `base + from` one slot up.
///
/// # Safety
///
/// `[base + from, base + from + count)` must be live and slot
/// `base + from + count` must be uninitialized storage in the same block.
/// Afterwards slot `base + from` is uninitialized.
pub(crate) unsafe fn shift_up<T>(base: *mut T, from: usize, count: usize) {
    // SAFETY: forwarded from the caller; `ptr::copy` handles the overlap
    // by copying from the highest index down.
    unsafe { ptr::copy(base.add(from), base.add(from + 1), count) }
}

/// Shift `count` live values starting at `base + from + 1` one slot down.
///
/// # Safety
///
/// Slot `base + from` must be uninitialized (its value already moved out)
/// and `[base + from + 1, base + from + 1 + count)` live. Afterwards slot
/// `base + from + count` is uninitialized.
pub(crate) unsafe fn shift_down<T>(base: *mut T, from: usize, count: usize) {
    // SAFETY: forwarded from the caller.
    unsafe { ptr::copy(base.add(from + 1), base.add(from), count) }
}

/// Destroy `count` live values starting at `start`, in ascending order.
///
/// # Safety
///
/// `[start, start + count)` must be live. Afterwards it is uninitialized.
pub(crate) unsafe fn destroy<T>(start: *mut T, count: usize) {
    if mem::needs_drop::<T>() {
        // SAFETY: forwarded from the caller.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, count)) }
    }
}
