//! Iteration over a [`GrowableArray`].
//!
//! Borrowed traversal goes through the slice iterators (`iter`,
//! `iter_mut`). [`IntoIter`] takes the storage over and yields the values
//! by move, front to back or back to front.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::slice;

use vessel_raw::RawBuffer;

use crate::array::GrowableArray;
use crate::failure::handle_alloc_failure;
use crate::mutation::GROWTH;
use crate::relocate::destroy;

/// Owning iterator over the values of a [`GrowableArray`].
///
/// Values not yet yielded are destroyed when the iterator is dropped, then
/// the storage is released.
pub struct IntoIter<T> {
    buffer: RawBuffer<T>,
    /// Slots `[front, back)` are live.
    front: usize,
    back: usize,
    _owns: PhantomData<T>,
}

impl<T> IntoIter<T> {
    /// The values not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` is live and inside the block.
        unsafe { slice::from_raw_parts(self.buffer.slot(self.front), self.back - self.front) }
    }

    /// The values not yet yielded, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, with exclusive access.
        unsafe { slice::from_raw_parts_mut(self.buffer.slot(self.front), self.back - self.front) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let slot = self.buffer.slot(self.front);
        self.front += 1;
        // SAFETY: the slot was live and is now outside `[front, back)`.
        Some(unsafe { slot.read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: the slot was live and is now outside `[front, back)`.
        Some(unsafe { self.buffer.slot(self.back).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.back - self.front;
        let start = self.buffer.slot(self.front);
        self.front = self.back;
        // SAFETY: `[front, back)` was live and is destroyed exactly once.
        unsafe { destroy(start, remaining) }
    }
}

impl<T> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &(self.back - self.front))
            .finish_non_exhaustive()
    }
}

impl<T> IntoIterator for GrowableArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        // The array's own destructor must not run: its values now belong to
        // the iterator.
        let mut array = ManuallyDrop::new(self);
        let len = array.len;
        IntoIter {
            buffer: array.buffer.take(),
            front: 0,
            back: len,
            _owns: PhantomData,
        }
    }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowableArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> Extend<T> for GrowableArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > self.capacity() - self.len {
            let wanted = GROWTH
                .next_capacity(self.len)
                .map(|grown| grown.max(self.len.saturating_add(lower)));
            if let Err(err) = wanted.and_then(|capacity| self.try_reserve(capacity)) {
                handle_alloc_failure(err);
            }
        }
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for GrowableArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for GrowableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}
