//! Copy construction and copy assignment.

#![allow(unsafe_code)]

use crate::array::GrowableArray;

impl<T: Clone> Clone for GrowableArray<T> {
    /// Copy every value into fresh storage sized to `self.len()`.
    ///
    /// A panic in `T::clone` destroys the copies made so far and releases
    /// the new storage; `self` is never touched.
    fn clone(&self) -> Self {
        let source = self.as_slice();
        Self::from_fn(source.len(), |i| source[i].clone())
    }

    /// Overwrite `self` with copies of `source`'s values.
    ///
    /// If `source` does not fit in the current capacity, a complete copy is
    /// built first and swapped in, so a panic leaves `self` unchanged.
    ///
    /// Otherwise the storage is reused: the common prefix is assigned with
    /// `T::clone_from`, then the surplus tail is destroyed or the missing
    /// tail is cloned in. A panic on this path leaves `self` valid but only
    /// partially assigned. This trades the all-or-nothing guarantee for
    /// skipping a reallocation.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut copy = source.clone();
            self.swap_with(&mut copy);
            return;
        }
        let common = self.len.min(source.len);
        self.as_mut_slice()[..common].clone_from_slice(&source.as_slice()[..common]);
        if self.len > source.len {
            self.truncate(source.len);
            return;
        }
        for value in &source.as_slice()[common..] {
            let cloned = value.clone();
            // SAFETY: `len < source.len <= capacity`, so slot `len` is free
            // storage. The length grows only after the write, so a panic in
            // the next `clone` leaves every constructed value accounted for.
            unsafe { self.buffer.slot(self.len).write(cloned) };
            self.len += 1;
        }
    }
}

impl<T: Clone> From<&[T]> for GrowableArray<T> {
    fn from(values: &[T]) -> Self {
        Self::from_fn(values.len(), |i| values[i].clone())
    }
}

impl<T, const N: usize> From<[T; N]> for GrowableArray<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}
