//! Rollback for bulk construction.

#![allow(unsafe_code)]

use std::mem;
use std::ptr;

/// Tracks a run of values being constructed into consecutive slots.
///
/// If the run is dropped before [`commit`](Self::commit) (an early `?`
/// return or a panic unwinding through the loop), every value constructed
/// so far is destroyed in reverse construction order. The storage itself
/// is left alone; its owner releases it.
pub(crate) struct PartialRun<T> {
    start: *mut T,
    constructed: usize,
}

impl<T> PartialRun<T> {
    pub(crate) fn new(start: *mut T) -> Self {
        Self {
            start,
            constructed: 0,
        }
    }

    /// Write `value` into the next slot of the run.
    ///
    /// # Safety
    ///
    /// Slot `start + constructed` must be uninitialized storage inside the
    /// block that `start` points into.
    pub(crate) unsafe fn push(&mut self, value: T) {
        // SAFETY: forwarded from the caller.
        unsafe { self.start.add(self.constructed).write(value) };
        self.constructed += 1;
    }

    /// Keep the constructed values and return how many there are.
    pub(crate) fn commit(self) -> usize {
        let constructed = self.constructed;
        mem::forget(self);
        constructed
    }
}

impl<T> Drop for PartialRun<T> {
    fn drop(&mut self) {
        if !mem::needs_drop::<T>() {
            return;
        }
        while self.constructed > 0 {
            self.constructed -= 1;
            // SAFETY: slots `[start, start + constructed)` were written by
            // `push` and not yet handed off.
            unsafe { ptr::drop_in_place(self.start.add(self.constructed)) };
        }
    }
}

/// Construct `count` values into consecutive slots starting at `start`.
///
/// `make(i)` produces the value for slot `start + i`. If it returns an
/// error or panics, the values already constructed by this call are
/// destroyed before the error is returned or the panic continues.
///
/// # Safety
///
/// `[start, start + count)` must be uninitialized storage inside one block.
pub(crate) unsafe fn construct_run<T, E>(
    start: *mut T,
    count: usize,
    mut make: impl FnMut(usize) -> Result<T, E>,
) -> Result<(), E> {
    let mut run = PartialRun::new(start);
    for i in 0..count {
        let value = make(i)?;
        // SAFETY: `i < count`, and the caller guarantees the range is
        // uninitialized storage.
        unsafe { run.push(value) };
    }
    run.commit();
    Ok(())
}
