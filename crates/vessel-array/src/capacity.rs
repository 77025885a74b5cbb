//! Reserving, resizing and truncating.

#![allow(unsafe_code)]

use std::convert::Infallible;

use vessel_core::{AllocError, ArrayError};
use vessel_raw::RawBuffer;

use crate::array::GrowableArray;
use crate::failure::{handle_alloc_failure, infallible};
use crate::guard::construct_run;
use crate::relocate::{destroy, relocate};

impl<T> GrowableArray<T> {
    /// Ensure the array can hold at least `capacity` values in total.
    ///
    /// Unlike `Vec::reserve`, the argument is the total capacity wanted,
    /// not the additional room. A no-op when `capacity <= self.capacity()`;
    /// otherwise storage for exactly `capacity` values is allocated and the
    /// live values are relocated into it. On error the array is unchanged.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), AllocError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        let mut fresh = RawBuffer::<T>::allocate(capacity)?;
        tracing::trace!(
            old_capacity = self.capacity(),
            new_capacity = capacity,
            len = self.len,
            "relocating into larger storage"
        );
        // SAFETY: `[0, len)` is live in the old block and the fresh block
        // has `capacity > len` uninitialized slots. Relocation leaves the
        // old slots uninitialized, so releasing the old block (when `fresh`
        // drops after the swap) destroys nothing.
        unsafe { relocate(self.buffer.as_ptr(), fresh.as_mut_ptr(), self.len) };
        self.buffer.swap(&mut fresh);
        Ok(())
    }

    /// Ensure the array can hold at least `capacity` values in total.
    ///
    /// # Panics
    ///
    /// Panics with `"capacity overflow"` if the request cannot be laid out;
    /// aborts through [`std::alloc::handle_alloc_error`] if the allocator
    /// refuses it.
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(err) = self.try_reserve(capacity) {
            handle_alloc_failure(err);
        }
    }

    /// Resize to `new_len`, filling new slots with values from `make`.
    ///
    /// Shrinking destroys `[new_len, len)`. Growing first reserves exactly
    /// `new_len` slots, then constructs `[len, new_len)`. If `make` fails,
    /// the values it already produced during this call are destroyed and
    /// the length is unchanged; any capacity reserved is kept.
    pub fn try_resize_with<E>(
        &mut self,
        new_len: usize,
        mut make: impl FnMut() -> Result<T, E>,
    ) -> Result<(), ArrayError<E>> {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.try_reserve(new_len)?;
        let start = self.buffer.slot(self.len);
        // SAFETY: after the reserve, `[len, new_len)` is uninitialized
        // storage inside the current block.
        unsafe { construct_run(start, new_len - self.len, |_| make()) }
            .map_err(ArrayError::Element)?;
        self.len = new_len;
        Ok(())
    }

    /// Resize to `new_len`, filling new slots with values from `make`.
    ///
    /// A panic in `make` destroys the values built by this call and leaves
    /// the length unchanged.
    pub fn resize_with(&mut self, new_len: usize, mut make: impl FnMut() -> T) {
        infallible(self.try_resize_with(new_len, || Ok::<_, Infallible>(make())));
    }

    /// Resize to `new_len`, filling new slots with `T::default()`.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Destroy every value past `len`. Capacity is unchanged.
    ///
    /// A no-op when `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = self.len - len;
        self.len = len;
        // SAFETY: `[len, len + tail)` was live and is now outside the live
        // prefix, so it is destroyed exactly once.
        unsafe { destroy(self.buffer.slot(len), tail) }
    }

    /// Destroy every value. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }
}
