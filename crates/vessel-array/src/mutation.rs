//! Appending, inserting and removing single values.

#![allow(unsafe_code)]

use std::convert::Infallible;

use vessel_core::{ArrayError, GrowthPolicy};
use vessel_raw::RawBuffer;

use crate::array::GrowableArray;
use crate::failure::infallible;
use crate::relocate::{relocate, shift_down, shift_up};

/// Growth applied when an insertion finds the array full.
pub(crate) const GROWTH: GrowthPolicy = GrowthPolicy::DOUBLING;

impl<T> GrowableArray<T> {
    /// Append `value`. Amortized constant time.
    pub fn push(&mut self, value: T) {
        self.emplace_back(|| value);
    }

    /// Append the value built by `make` and return a reference to it.
    pub fn emplace_back(&mut self, make: impl FnOnce() -> T) -> &mut T {
        infallible(self.try_emplace_back(|| Ok::<_, Infallible>(make())))
    }

    /// Append the value built by `make` and return a reference to it.
    ///
    /// If `make` fails the array is unchanged.
    pub fn try_emplace_back<E>(
        &mut self,
        make: impl FnOnce() -> Result<T, E>,
    ) -> Result<&mut T, ArrayError<E>> {
        self.try_emplace(self.len, make)
    }

    /// Remove and return the last value, or `None` if the array is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was the last live slot and is now outside the
        // live prefix, so ownership moves to the caller exactly once.
        Some(unsafe { self.buffer.slot(self.len).read() })
    }

    /// Insert `value` at `index`, shifting later values up by one.
    ///
    /// Returns a reference to the inserted value.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.emplace(index, || value)
    }

    /// Insert the value built by `make` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, and propagates a panic from `make` with the
    /// array unchanged.
    pub fn emplace(&mut self, index: usize, make: impl FnOnce() -> T) -> &mut T {
        infallible(self.try_emplace(index, || Ok::<_, Infallible>(make())))
    }

    /// Insert the value built by `make` at `index`.
    ///
    /// When the array is full, storage for `max(1, 2 * len)` values is
    /// allocated, the new value is constructed into its final slot there
    /// and the old values are relocated around it. Otherwise the value is
    /// constructed first and later values are shifted up to make room.
    /// If `make` fails or allocation is refused, the array is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn try_emplace<E>(
        &mut self,
        index: usize,
        make: impl FnOnce() -> Result<T, E>,
    ) -> Result<&mut T, ArrayError<E>> {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
        if self.len == self.capacity() {
            self.emplace_with_realloc(index, make)
        } else {
            self.emplace_in_place(index, make)
        }
    }

    fn emplace_with_realloc<E>(
        &mut self,
        index: usize,
        make: impl FnOnce() -> Result<T, E>,
    ) -> Result<&mut T, ArrayError<E>> {
        let new_capacity = GROWTH.next_capacity(self.len)?;
        let mut fresh = RawBuffer::<T>::allocate(new_capacity)?;
        let value = make().map_err(ArrayError::Element)?;
        tracing::trace!(
            old_capacity = self.capacity(),
            new_capacity,
            len = self.len,
            index,
            "growing on insert"
        );
        let src = self.buffer.as_ptr();
        let dst = fresh.as_mut_ptr();
        // SAFETY: `fresh` has `new_capacity > len` uninitialized slots. The
        // new value goes to `index`, the prefix `[0, index)` to the same
        // slots and the suffix `[index, len)` one slot up. Relocation cannot
        // fail and leaves the old slots uninitialized, so the old block is
        // released (when `fresh` drops after the swap) without destroying
        // anything.
        unsafe {
            dst.add(index).write(value);
            relocate(src, dst, index);
            relocate(src.add(index), dst.add(index + 1), self.len - index);
        }
        self.buffer.swap(&mut fresh);
        self.len += 1;
        // SAFETY: slot `index` was written above and is live.
        Ok(unsafe { &mut *self.buffer.slot(index) })
    }

    fn emplace_in_place<E>(
        &mut self,
        index: usize,
        make: impl FnOnce() -> Result<T, E>,
    ) -> Result<&mut T, ArrayError<E>> {
        let value = make().map_err(ArrayError::Element)?;
        let base = self.buffer.as_mut_ptr();
        // SAFETY: `len < capacity`, so slot `len` is free storage. Shifting
        // `[index, len)` up one slot vacates `index`, which then receives
        // the new value. Nothing here can panic between the shift and the
        // write.
        unsafe {
            shift_up(base, index, self.len - index);
            base.add(index).write(value);
        }
        self.len += 1;
        // SAFETY: slot `index` was written above and is live.
        Ok(unsafe { &mut *base.add(index) })
    }

    /// Remove and return the value at `index`, shifting later values down.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index (is {index}) should be < len (is {})",
            self.len
        );
        let base = self.buffer.as_mut_ptr();
        // SAFETY: `index < len`. The value is moved out first, then
        // `[index + 1, len)` slides down over the vacated slot, leaving slot
        // `len - 1` uninitialized before the length drops.
        unsafe {
            let value = base.add(index).read();
            shift_down(base, index, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Destroy the value at `index`, shifting later values down.
    ///
    /// Returns `index`, which now holds the value that followed the erased
    /// one (or equals `len` if the last value was erased).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use vessel_test_utils::{drop_log, live_probes, reset_probes, Probe};

    fn one_two_three() -> GrowableArray<i32> {
        let mut array = GrowableArray::new();
        array.push(1);
        array.push(2);
        array.push(3);
        array
    }

    #[test]
    fn push_appends_in_order() {
        let array = one_two_three();
        assert_eq!(array.len(), 3);
        assert_eq!(array, [1, 2, 3]);
    }

    #[test]
    fn push_doubles_capacity() {
        let mut array = GrowableArray::new();
        let mut seen = Vec::new();
        for i in 0..9 {
            array.push(i);
            seen.push(array.capacity());
        }
        assert_eq!(seen, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
    }

    #[test]
    fn emplace_back_returns_new_element() {
        let mut array = one_two_three();
        let slot = array.emplace_back(|| 40);
        *slot += 2;
        assert_eq!(array, [1, 2, 3, 42]);
    }

    #[test]
    fn try_emplace_back_failure_changes_nothing() {
        let mut array = one_two_three();
        let capacity = array.capacity();
        let result = array.try_emplace_back(|| Err::<i32, _>("nope"));
        assert_eq!(result.unwrap_err(), ArrayError::Element("nope"));
        assert_eq!(array, [1, 2, 3]);
        assert_eq!(array.capacity(), capacity);
    }

    #[test]
    fn failed_construction_during_growth_changes_nothing() {
        let mut array = GrowableArray::from_fn(4, |i| i as i32);
        assert_eq!(array.len(), array.capacity());
        let ptr = array.as_ptr();
        let result = array.try_emplace(2, || Err::<i32, _>(7u8));
        assert_eq!(result.unwrap_err(), ArrayError::Element(7));
        assert_eq!(array, [0, 1, 2, 3]);
        assert_eq!(array.capacity(), 4);
        assert_eq!(array.as_ptr(), ptr);
    }

    #[test]
    fn panicking_construction_during_growth_changes_nothing() {
        reset_probes();
        let mut array = GrowableArray::from_fn(2, |i| Probe::new(i as i32));
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            array.emplace(1, || panic!("constructor exploded"));
        }));
        assert!(outcome.is_err());
        assert_eq!(array.len(), 2);
        assert_eq!(array.capacity(), 2);
        assert_eq!(live_probes(), 2);
    }

    #[test]
    fn pop_returns_last() {
        let mut array = one_two_three();
        assert_eq!(array.pop(), Some(3));
        assert_eq!(array, [1, 2]);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn pop_empty_is_none() {
        let mut array = GrowableArray::<u8>::new();
        assert_eq!(array.pop(), None);
        assert_eq!(array.len(), 0);
    }

    #[test]
    fn insert_in_middle() {
        let mut array = one_two_three();
        let inserted = array.insert(1, 99);
        assert_eq!(*inserted, 99);
        assert_eq!(array, [1, 99, 2, 3]);
        assert_eq!(array.len(), 4);
    }

    #[test]
    fn insert_in_middle_with_reallocation() {
        let mut array = GrowableArray::from_fn(3, |i| i as i32 + 1);
        assert_eq!(array.capacity(), 3);
        array.insert(1, 99);
        assert_eq!(array, [1, 99, 2, 3]);
        assert_eq!(array.capacity(), 6);
    }

    #[test]
    fn insert_at_front_and_end() {
        let mut array = one_two_three();
        array.insert(0, 0);
        array.insert(4, 4);
        assert_eq!(array, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn insert_into_empty() {
        let mut array = GrowableArray::new();
        array.insert(0, "only");
        assert_eq!(array, ["only"]);
        assert_eq!(array.capacity(), 1);
    }

    #[test]
    #[should_panic(expected = "insertion index (is 4) should be <= len (is 3)")]
    fn insert_past_end_panics() {
        let mut array = one_two_three();
        array.insert(4, 0);
    }

    #[test]
    fn insert_does_not_drop_or_duplicate() {
        reset_probes();
        let mut array = GrowableArray::new();
        for i in 0..5 {
            array.insert(0, Probe::new(i));
        }
        assert_eq!(live_probes(), 5);
        assert!(drop_log().is_empty());
        let values: Vec<i32> = array.iter().map(Probe::value).collect();
        assert_eq!(values, [4, 3, 2, 1, 0]);
    }

    #[test]
    fn erase_returns_follower_position() {
        let mut array = one_two_three();
        let pos = array.erase(1);
        assert_eq!(array, [1, 3]);
        assert_eq!(array.len(), 2);
        assert_eq!(array[pos], 3);
    }

    #[test]
    fn erase_last_returns_end() {
        let mut array = one_two_three();
        assert_eq!(array.erase(2), 2);
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn erase_destroys_exactly_one() {
        reset_probes();
        let mut array = GrowableArray::from_fn(4, |i| Probe::new(i as i32));
        array.erase(1);
        assert_eq!(drop_log(), [1]);
        assert_eq!(live_probes(), 3);
    }

    #[test]
    fn remove_hands_value_back() {
        let mut array = GrowableArray::from_fn(3, |i| format!("v{i}"));
        assert_eq!(array.remove(0), "v0");
        assert_eq!(array, ["v1", "v2"]);
    }

    #[test]
    #[should_panic(expected = "removal index (is 0) should be < len (is 0)")]
    fn remove_from_empty_panics() {
        let mut array = GrowableArray::<u8>::new();
        array.remove(0);
    }
}
