//! Shared buffers handed to every worker of a run.
//!
//! A [`SharedSlice`] borrows a buffer mutably for the whole run and gives
//! workers either a disjoint sub-range to write or a read-only view of all
//! of it. The partitioning scheme guarantees write ranges never overlap
//! within a phase, and the phase barrier guarantees no worker reads a
//! buffer in the same phase that another writes it. Nothing is checked at
//! runtime, so both guarantees are preconditions of the unsafe accessors.

use std::marker::PhantomData;
use std::ops::Range;

/// A mutably borrowed slice shared across worker threads.
pub struct SharedSlice<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: access goes through the unsafe accessors below, whose callers
// uphold the disjoint-write and phase-ordering preconditions.
unsafe impl<T: Send> Send for SharedSlice<'_, T> {}
unsafe impl<T: Send + Sync> Sync for SharedSlice<'_, T> {}

impl<'a, T> SharedSlice<'a, T> {
    pub fn new(slice: &'a mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// Exclusive access to `range`.
    ///
    /// # Safety
    ///
    /// While the returned slice is alive no other reference, shared or
    /// mutable, may cover any index in `range`.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn slice_mut(&self, range: Range<usize>) -> &mut [T] {
        assert!(
            range.start <= range.end && range.end <= self.len,
            "range {range:?} out of bounds for length {}",
            self.len
        );
        std::slice::from_raw_parts_mut(self.ptr.add(range.start), range.end - range.start)
    }

    /// Shared access to the whole buffer.
    ///
    /// # Safety
    ///
    /// While the returned slice is alive no mutable reference obtained from
    /// [`slice_mut`](Self::slice_mut) may be alive.
    pub unsafe fn as_slice(&self) -> &[T] {
        std::slice::from_raw_parts(self.ptr, self.len)
    }
}
