//! Low-level owned allocation for the container.
//!
//! A [`RawBuf`] is a pointer-plus-capacity pair that owns an untyped block
//! of element slots. It knows nothing about which slots are initialized;
//! tracking the live prefix is [`DynArray`]'s job. All calls into
//! `std::alloc` live in this module, each behind a `// SAFETY:` comment.
//!
//! Zero-sized element types never allocate: the pointer stays dangling and
//! the reported capacity is `usize::MAX`.
//!
//! [`DynArray`]: crate::DynArray

#![allow(unsafe_code)]

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::mem;
use std::ptr::NonNull;

use crate::error::ArrayError;

/// An owned, uninitialized block of `cap` element slots.
///
/// Dropping a `RawBuf` releases the block without running any element
/// destructors. The owner must drop live elements first.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
}

impl<T> RawBuf<T> {
    /// An empty buffer: no allocation, dangling pointer, capacity 0.
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
        }
    }

    /// Allocate a buffer of exactly `cap` slots, aborting on failure.
    ///
    /// Capacity-overflow requests panic; allocator refusal goes through
    /// [`handle_alloc_error`]. Used by the infallible growth paths.
    pub(crate) fn allocate(cap: usize) -> Self {
        match Self::try_allocate(cap) {
            Ok(buf) => buf,
            Err(ArrayError::AllocFailed { .. }) => {
                let layout = Layout::array::<T>(cap)
                    .expect("allocation was attempted, so the layout is valid");
                handle_alloc_error(layout)
            }
            Err(err) => panic!("{err}"),
        }
    }

    /// Allocate a buffer of exactly `cap` slots, reporting failure.
    ///
    /// Returns [`ArrayError::CapacityOverflow`] when `cap` elements cannot
    /// be described by a valid layout and [`ArrayError::AllocFailed`] when
    /// the allocator returns null. No existing storage is involved, so a
    /// failure here leaves the caller untouched.
    pub(crate) fn try_allocate(cap: usize) -> Result<Self, ArrayError> {
        if mem::size_of::<T>() == 0 || cap == 0 {
            // ZSTs and empty requests never allocate. The stored cap is
            // irrelevant for ZSTs; `capacity()` reports usize::MAX.
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
            });
        }
        let layout = Layout::array::<T>(cap)
            .map_err(|_| ArrayError::CapacityOverflow { requested: cap })?;
        if layout.size() > isize::MAX as usize {
            return Err(ArrayError::CapacityOverflow { requested: cap });
        }
        // SAFETY: layout has non-zero size (cap > 0 and T is not a ZST).
        let raw = unsafe { alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => Ok(Self { ptr, cap }),
            None => Err(ArrayError::AllocFailed {
                bytes: layout.size(),
            }),
        }
    }

    /// Number of element slots this buffer can hold.
    pub(crate) fn capacity(&self) -> usize {
        if mem::size_of::<T>() == 0 {
            usize::MAX
        } else {
            self.cap
        }
    }

    /// Base pointer of the block. Dangling (but aligned) when unallocated.
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if mem::size_of::<T>() == 0 || self.cap == 0 {
            return;
        }
        let layout = Layout::array::<T>(self.cap)
            .expect("an allocated buffer always has a valid layout");
        // SAFETY: ptr was returned by `alloc` with this exact layout and
        // has not been released yet; RawBuf owns the block exclusively.
        unsafe { dealloc(self.ptr.as_ptr().cast(), layout) };
    }
}

// SAFETY: RawBuf owns its block exclusively; sending or sharing it is
// exactly as safe as sending or sharing the elements themselves.
unsafe impl<T: Send> Send for RawBuf<T> {}
// SAFETY: see above.
unsafe impl<T: Sync> Sync for RawBuf<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_has_zero_capacity() {
        let buf = RawBuf::<u64>::new();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn allocate_reports_requested_capacity() {
        let buf = RawBuf::<u32>::allocate(16);
        assert_eq!(buf.capacity(), 16);
        assert!(!buf.ptr().is_null());
    }

    #[test]
    fn zero_capacity_allocates_nothing() {
        let buf = RawBuf::<u32>::try_allocate(0).unwrap();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn zst_capacity_is_unbounded() {
        let buf = RawBuf::<()>::try_allocate(4).unwrap();
        assert_eq!(buf.capacity(), usize::MAX);
    }

    #[test]
    fn absurd_capacity_is_overflow_not_abort() {
        let result = RawBuf::<u64>::try_allocate(usize::MAX / 2);
        assert!(matches!(
            result,
            Err(ArrayError::CapacityOverflow { .. })
        ));
    }
}
