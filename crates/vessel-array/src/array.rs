//! The growable array: layout, construction, queries and destruction.
//!
//! Capacity management lives in `capacity.rs`, element mutation in
//! `mutation.rs`, copying in `clone.rs` and iteration in [`crate::iter`].

#![allow(unsafe_code)]

use std::borrow::{Borrow, BorrowMut};
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice::{self, SliceIndex};

use vessel_core::{AllocError, ArrayError};
use vessel_raw::RawBuffer;

use crate::failure::{handle_alloc_failure, infallible};
use crate::guard::construct_run;
use crate::relocate::destroy;

/// A contiguous, growable sequence of `T` stored in a [`RawBuffer<T>`].
///
/// Invariant: `len <= buffer.capacity()`, slots `[0, len)` hold live values
/// and slots `[len, capacity)` are uninitialized.
///
/// Moving an array is a constant-time transfer of its buffer and length.
/// [`std::mem::take`] moves the contents out and leaves the empty,
/// zero-capacity array behind.
///
/// Not `Send` or `Sync`: the array is single-threaded by contract.
pub struct GrowableArray<T> {
    pub(crate) buffer: RawBuffer<T>,
    pub(crate) len: usize,
    _owns: PhantomData<T>,
}

impl<T> GrowableArray<T> {
    /// An empty array with zero capacity. Does not allocate.
    pub const fn new() -> Self {
        Self {
            buffer: RawBuffer::new(),
            len: 0,
            _owns: PhantomData,
        }
    }

    pub(crate) fn from_parts(buffer: RawBuffer<T>, len: usize) -> Self {
        debug_assert!(len <= buffer.capacity());
        Self {
            buffer,
            len,
            _owns: PhantomData,
        }
    }

    /// An empty array with room for exactly `capacity` values.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self::from_parts(RawBuffer::allocate(capacity)?, 0))
    }

    /// An empty array with room for exactly `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics with `"capacity overflow"` if the request cannot be laid out;
    /// aborts through [`std::alloc::handle_alloc_error`] if the allocator
    /// refuses it.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(array) => array,
            Err(err) => handle_alloc_failure(err),
        }
    }

    /// An array of `len` values where slot `i` holds `make(i)`.
    ///
    /// Storage for exactly `len` values is allocated up front. If `make`
    /// fails, the values built so far are destroyed in reverse order and
    /// the storage released before the error is returned.
    pub fn try_from_fn<E>(
        len: usize,
        make: impl FnMut(usize) -> Result<T, E>,
    ) -> Result<Self, ArrayError<E>> {
        let mut buffer = RawBuffer::<T>::allocate(len)?;
        // SAFETY: the fresh buffer holds `len` uninitialized slots.
        unsafe { construct_run(buffer.as_mut_ptr(), len, make) }.map_err(ArrayError::Element)?;
        Ok(Self::from_parts(buffer, len))
    }

    /// An array of `len` values where slot `i` holds `make(i)`.
    ///
    /// A panic in `make` destroys the values built so far, releases the
    /// storage and keeps unwinding.
    pub fn from_fn(len: usize, mut make: impl FnMut(usize) -> T) -> Self {
        infallible(Self::try_from_fn(len, |i| Ok::<_, Infallible>(make(i))))
    }

    /// An array of `len` default values.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(len, |_| T::default())
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of values the current storage can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Pointer to the first slot. Dangling when the capacity is zero.
    pub fn as_ptr(&self) -> *const T {
        self.buffer.as_ptr()
    }

    /// Mutable pointer to the first slot. Dangling when the capacity is zero.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.as_mut_ptr()
    }

    /// The live values as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is live and the pointer is aligned and non-null
        // even for the zero-capacity sentinel.
        unsafe { slice::from_raw_parts(self.buffer.as_ptr(), self.len) }
    }

    /// The live values as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, with exclusive access through `&mut self`.
        unsafe { slice::from_raw_parts_mut(self.buffer.as_mut_ptr(), self.len) }
    }

    /// Exchange contents with `other` in constant time.
    pub fn swap_with(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
        mem::swap(&mut self.len, &mut other.len);
    }
}

impl<T> Drop for GrowableArray<T> {
    fn drop(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        // SAFETY: `[0, len)` is live; the buffer releases the block after.
        unsafe { destroy(self.buffer.as_mut_ptr(), len) }
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for GrowableArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowableArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for GrowableArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for GrowableArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for GrowableArray<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for GrowableArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for GrowableArray<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for GrowableArray<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, U> PartialEq<GrowableArray<U>> for GrowableArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &GrowableArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowableArray<T> {}

impl<T, U> PartialEq<[U]> for GrowableArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<&[U]> for GrowableArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for GrowableArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

/// Reports only the length and capacity; contents are never formatted.
impl<T> fmt::Debug for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableArray")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
