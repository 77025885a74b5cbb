//! The owning storage handle.

#![allow(unsafe_code)]

use std::fmt;
use std::mem;
use std::ptr::NonNull;

use vessel_core::AllocError;

use crate::raw;

/// Exclusive owner of uninitialized storage for `capacity` values of `T`.
///
/// The buffer knows nothing about which slots are live. Dropping it only
/// returns the block to the allocator; any live values in it must have been
/// destroyed or moved out by the owner beforehand, or they are leaked.
///
/// `RawBuffer` is move-only. Copying raw storage would duplicate ownership
/// of the bytes without duplicating their contents, so there is no `Clone`.
/// Ownership can also be transferred in place with [`swap`](Self::swap)
/// and [`take`](Self::take).
///
/// The handle holds a `NonNull<T>` and is neither `Send` nor `Sync`.
pub struct RawBuffer<T> {
    ptr: NonNull<T>,
    capacity: usize,
}

impl<T> RawBuffer<T> {
    /// The zero-capacity sentinel. Holds no allocation.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Allocate storage for exactly `capacity` values of `T`.
    ///
    /// `allocate(0)` returns the sentinel. On failure nothing is held and
    /// there is nothing to release.
    pub fn allocate(capacity: usize) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        let ptr = raw::allocate::<T>(capacity)?;
        Ok(Self { ptr, capacity })
    }

    /// Number of element slots the block can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` for the zero-capacity sentinel.
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Address of slot 0. Dangling (but aligned) for the sentinel.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable address of slot 0. Dangling (but aligned) for the sentinel.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Address of slot `index`.
    ///
    /// `index == capacity` is allowed and yields the one-past-end address,
    /// which must never be dereferenced.
    ///
    /// # Panics
    ///
    /// Panics if `index > capacity`.
    pub fn slot(&self, index: usize) -> *mut T {
        assert!(
            index <= self.capacity,
            "slot index {index} out of range for capacity {}",
            self.capacity
        );
        // SAFETY: `index <= capacity`, so the offset stays within (or one
        // past the end of) the allocated block. For the sentinel and for
        // zero-sized `T` the offset is zero bytes.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Exchange blocks and capacities with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Move the block out, leaving the sentinel behind.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Return the block to the allocator and become the sentinel.
    ///
    /// A no-op on the sentinel.
    pub fn release(&mut self) {
        if self.capacity == 0 {
            return;
        }
        let ptr = mem::replace(&mut self.ptr, NonNull::dangling());
        let capacity = mem::replace(&mut self.capacity, 0);
        // SAFETY: `ptr` was returned by `raw::allocate::<T>(capacity)` in
        // `allocate`, ownership is exclusive, and the handle no longer
        // refers to it.
        unsafe { raw::deallocate(ptr, capacity) }
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T> fmt::Debug for RawBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_sentinel() {
        let buf = RawBuffer::<u32>::new();
        assert_eq!(buf.capacity(), 0);
        assert!(buf.is_empty());
        assert_eq!(buf.as_ptr(), NonNull::<u32>::dangling().as_ptr());
    }

    #[test]
    fn allocate_zero_is_sentinel() {
        let buf = RawBuffer::<String>::allocate(0).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn allocate_holds_exact_capacity() {
        let buf = RawBuffer::<u64>::allocate(17).unwrap();
        assert_eq!(buf.capacity(), 17);
        assert!(!buf.is_empty());
        assert_eq!(buf.as_ptr() as usize % mem::align_of::<u64>(), 0);
    }

    #[test]
    fn slots_are_contiguous() {
        let buf = RawBuffer::<u32>::allocate(4).unwrap();
        let base = buf.slot(0) as usize;
        assert_eq!(buf.slot(3) as usize - base, 3 * mem::size_of::<u32>());
        assert_eq!(buf.slot(4) as usize - base, 4 * mem::size_of::<u32>());
    }

    #[test]
    fn slots_hold_written_values() {
        let buf = RawBuffer::<u64>::allocate(3).unwrap();
        for i in 0..3 {
            // SAFETY: slot `i < capacity`, u64 has no drop glue.
            unsafe { buf.slot(i).write(i as u64 * 10) };
        }
        // SAFETY: all three slots were written above.
        let read: Vec<u64> = (0..3).map(|i| unsafe { buf.slot(i).read() }).collect();
        assert_eq!(read, [0, 10, 20]);
    }

    #[test]
    #[should_panic(expected = "slot index 5 out of range for capacity 4")]
    fn slot_past_end_panics() {
        let buf = RawBuffer::<u8>::allocate(4).unwrap();
        let _ = buf.slot(5);
    }

    #[test]
    fn sentinel_one_past_end_is_allowed() {
        let buf = RawBuffer::<u8>::new();
        assert_eq!(buf.slot(0), buf.as_ptr() as *mut u8);
    }

    #[test]
    fn swap_exchanges_blocks() {
        let mut a = RawBuffer::<u16>::allocate(2).unwrap();
        let mut b = RawBuffer::<u16>::allocate(9).unwrap();
        let (pa, pb) = (a.as_ptr(), b.as_ptr());
        a.swap(&mut b);
        assert_eq!(a.capacity(), 9);
        assert_eq!(b.capacity(), 2);
        assert_eq!(a.as_ptr(), pb);
        assert_eq!(b.as_ptr(), pa);
    }

    #[test]
    fn take_leaves_sentinel() {
        let mut a = RawBuffer::<u16>::allocate(5).unwrap();
        let ptr = a.as_ptr();
        let b = a.take();
        assert!(a.is_empty());
        assert_eq!(b.capacity(), 5);
        assert_eq!(b.as_ptr(), ptr);
    }

    #[test]
    fn release_is_idempotent() {
        let mut buf = RawBuffer::<u64>::allocate(8).unwrap();
        buf.release();
        assert!(buf.is_empty());
        buf.release();
        assert!(buf.is_empty());
    }

    #[test]
    fn zero_sized_elements_report_capacity() {
        let buf = RawBuffer::<()>::allocate(1 << 40).unwrap();
        assert_eq!(buf.capacity(), 1 << 40);
    }

    #[test]
    fn oversized_request_is_capacity_overflow() {
        let err = RawBuffer::<u64>::allocate(usize::MAX / 2).unwrap_err();
        assert!(matches!(err, AllocError::CapacityOverflow { .. }));
    }

    #[test]
    fn unsatisfiable_request_is_out_of_memory() {
        let err = RawBuffer::<u8>::allocate(isize::MAX as usize).unwrap_err();
        match err {
            AllocError::OutOfMemory { layout } => {
                assert_eq!(layout.size(), isize::MAX as usize);
            }
            other => panic!("expected OutOfMemory, got {other:?}"),
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn capacity_matches_request(capacity in 0usize..4096) {
                let buf = RawBuffer::<u32>::allocate(capacity).unwrap();
                prop_assert_eq!(buf.capacity(), capacity);
                prop_assert_eq!(buf.is_empty(), capacity == 0);
            }

            #[test]
            fn swap_twice_is_identity(a in 0usize..256, b in 0usize..256) {
                let mut x = RawBuffer::<u8>::allocate(a).unwrap();
                let mut y = RawBuffer::<u8>::allocate(b).unwrap();
                let (px, py) = (x.as_ptr(), y.as_ptr());
                x.swap(&mut y);
                x.swap(&mut y);
                prop_assert_eq!(x.as_ptr(), px);
                prop_assert_eq!(y.as_ptr(), py);
                prop_assert_eq!(x.capacity(), a);
                prop_assert_eq!(y.capacity(), b);
            }
        }
    }
}
