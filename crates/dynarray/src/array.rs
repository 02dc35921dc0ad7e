//! The growable array container.
//!
//! [`DynArray`] keeps its elements in one contiguous owned block with an
//! explicit live length and slot capacity. Indexed access is O(1), `push`
//! is amortized O(1), and mid-sequence `insert`/`remove` are O(n) in the
//! distance to the end. Any operation that can reallocate (growth) or
//! shift elements (`insert`, `remove`) invalidates outstanding references
//! into the buffer; the borrow checker enforces this structurally.
//!
//! Growth policy: a full `push` or `insert` doubles the capacity (minimum
//! 1 slot); `resize` past capacity grows to `max(capacity * 2, new_len)`;
//! [`reserve`] allocates exactly the requested capacity and never shrinks.
//!
//! [`reserve`]: DynArray::reserve

#![allow(unsafe_code)]

use std::cmp::{self, Ordering};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::error::ArrayError;
use crate::raw::RawBuf;

/// A contiguous, owning, growable sequence of `T`.
///
/// Slots `[0, len)` hold live values; slots `[len, capacity)` are
/// allocated but uninitialized. The single structural invariant
/// `len <= capacity` holds across every operation, including the failure
/// paths: old storage is only released after replacement storage has been
/// obtained.
///
/// Comparison is by value: equality requires equal length and pairwise
/// equal elements, ordering is lexicographic with a shorter equal prefix
/// sorting first.
pub struct DynArray<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> DynArray<T> {
    /// An empty array: no allocation, length and capacity 0.
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// An empty array with exactly `cap` slots pre-allocated.
    ///
    /// The first `cap` pushes are guaranteed not to reallocate.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: RawBuf::allocate(cap),
            len: 0,
        }
    }

    /// An array of `len` default-constructed elements, with
    /// `capacity == len`.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut array = Self::with_capacity(len);
        array.resize(len);
        array
    }

    /// An array of `len` clones of `value`, with `capacity == len`.
    pub fn filled(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_capacity(len);
        for _ in 0..len {
            array.push(value.clone());
        }
        array
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots. Always `>= len()`.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Whether the array holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialized, the pointer is aligned
        // (dangling-but-aligned when unallocated, which is valid for a
        // zero-length slice), and no mutable borrow can coexist with &self.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as `as_slice`, and &mut self guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Checked element access.
    ///
    /// Returns [`ArrayError::IndexOutOfBounds`] when `index >= len()`.
    /// This is the recoverable twin of indexing, which panics instead.
    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        self.as_slice().get(index).ok_or(ArrayError::IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    /// Checked mutable element access.
    ///
    /// Returns [`ArrayError::IndexOutOfBounds`] when `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::IndexOutOfBounds { index, len })
    }

    /// Drop all live elements, keeping the allocation.
    ///
    /// `capacity()` is unchanged; subsequent pushes reuse the block.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drop the tail `[new_len, len)`. No-op when `new_len >= len()`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail_len = self.len - new_len;
        // Shorten first so a panicking destructor cannot leave dropped
        // elements inside the live range.
        self.len = new_len;
        // SAFETY: the former slots [new_len, len) held live elements that
        // are no longer reachable through the (already shortened) array.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.ptr().add(new_len), tail_len);
            ptr::drop_in_place(tail);
        }
    }

    /// Resize to exactly `new_len` elements.
    ///
    /// Shrinking drops the tail. Growing fills `[len, new_len)` with
    /// `T::default()`, reallocating to `max(capacity * 2, new_len)` slots
    /// if the current capacity is insufficient.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        if new_len > self.capacity() {
            self.grow_to(self.grown_capacity(new_len));
        }
        while self.len < new_len {
            // SAFETY: len < new_len <= capacity, so the slot is allocated
            // and uninitialized. Length is bumped per element so a panic
            // in `default` leaves only live elements in [0, len).
            unsafe { ptr::write(self.buf.ptr().add(self.len), T::default()) };
            self.len += 1;
        }
    }

    /// Ensure capacity for at least `new_cap` slots.
    ///
    /// No-op when `new_cap <= capacity()`; otherwise allocates exactly
    /// `new_cap` slots and moves the live elements over. Never shrinks.
    /// All outstanding element addresses are invalidated on growth.
    pub fn reserve(&mut self, new_cap: usize) {
        if new_cap <= self.capacity() {
            return;
        }
        self.grow_to(new_cap);
    }

    /// Fallible [`reserve`](Self::reserve).
    ///
    /// On `Err` the array is untouched: the new block is obtained before
    /// the old one is released, so the contents, length, and capacity all
    /// remain exactly as they were.
    pub fn try_reserve(&mut self, new_cap: usize) -> Result<(), ArrayError> {
        if new_cap <= self.capacity() {
            return Ok(());
        }
        let new_buf = RawBuf::try_allocate(new_cap)?;
        self.move_into(new_buf);
        Ok(())
    }

    /// Append a value.
    ///
    /// Within capacity this is O(1) and leaves existing element addresses
    /// valid. At capacity it grows to `max(1, capacity * 2)` slots, an
    /// O(len) move that amortizes to O(1) per push.
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            let required = self.len.checked_add(1).expect("length overflow");
            self.grow_to(self.grown_capacity(required));
        }
        // SAFETY: len < capacity after the growth check; the slot at
        // `len` is allocated and uninitialized.
        unsafe { ptr::write(self.buf.ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Remove and return the last element, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` held a live element that
        // is no longer part of the (already shortened) live range.
        Some(unsafe { ptr::read(self.buf.ptr().add(self.len)) })
    }

    /// Insert `value` at `index`, shifting the suffix right.
    ///
    /// `index == len()` appends. Returns a reference to the inserted
    /// element. O(len - index), plus a full O(len) move when at capacity.
    /// All element addresses at or past `index` are invalidated, and all
    /// addresses are invalidated when growth occurs.
    ///
    /// # Panics
    ///
    /// Panics when `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
        if self.len == self.capacity() {
            let required = self.len.checked_add(1).expect("length overflow");
            let new_buf = RawBuf::allocate(self.grown_capacity(required));
            // SAFETY: the old and new blocks are disjoint; [0, index) and
            // [index, len) are live in the old block and are moved bitwise
            // around the gap left for `value`. The old buffer is released
            // without running destructors, so each element remains owned
            // exactly once.
            unsafe {
                let src = self.buf.ptr();
                let dst = new_buf.ptr();
                ptr::copy_nonoverlapping(src, dst, index);
                ptr::write(dst.add(index), value);
                ptr::copy_nonoverlapping(src.add(index), dst.add(index + 1), self.len - index);
            }
            self.buf = new_buf;
        } else {
            // SAFETY: len < capacity, so the slot at `len` is allocated;
            // the overlapping copy moves [index, len) one slot right
            // (ptr::copy handles the overlap), leaving slot `index` as a
            // logically uninitialized gap that `value` then fills.
            unsafe {
                let gap = self.buf.ptr().add(index);
                ptr::copy(gap, gap.add(1), self.len - index);
                ptr::write(gap, value);
            }
        }
        self.len += 1;
        // SAFETY: index < len, and the slot was just initialized.
        unsafe { &mut *self.buf.ptr().add(index) }
    }

    /// Remove and return the element at `index`, shifting the suffix left.
    ///
    /// O(len - index). The slot formerly after the removed element is now
    /// at `index`. Element addresses at or past `index` are invalidated.
    ///
    /// # Panics
    ///
    /// Panics when `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index (is {index}) should be < len (is {})",
            self.len
        );
        // SAFETY: index < len, so the slot is live; after the read the
        // overlapping copy moves [index + 1, len) one slot left, closing
        // the gap, and the length is shortened to drop the stale tail
        // slot from the live range.
        unsafe {
            let gap = self.buf.ptr().add(index);
            let value = ptr::read(gap);
            ptr::copy(gap.add(1), gap, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Exchange contents with `other` in O(1). Never fails.
    ///
    /// Named `swap_with` so it does not shadow the slice method `swap`.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.buf, &mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Move the contents out, leaving `self` empty with capacity 0.
    ///
    /// The explicit form of move-construction: the returned array owns
    /// the storage, and `self` is reset to the unallocated empty state.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Iterate over the live elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over the live elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Capacity to allocate when growth must cover `required` slots:
    /// doubles the current capacity, floored at `required`.
    fn grown_capacity(&self, required: usize) -> usize {
        cmp::max(self.capacity().saturating_mul(2), required)
    }

    /// Replace the buffer with a fresh allocation of `new_cap` slots,
    /// moving the live prefix across. Aborts on allocation failure.
    fn grow_to(&mut self, new_cap: usize) {
        debug_assert!(new_cap >= self.len);
        self.move_into(RawBuf::allocate(new_cap));
    }

    /// Move the live elements into `new_buf` and adopt it, releasing the
    /// old block. `new_buf` must have capacity for at least `len`.
    fn move_into(&mut self, new_buf: RawBuf<T>) {
        debug_assert!(new_buf.capacity() >= self.len);
        // SAFETY: the blocks are disjoint and [0, len) is live in the old
        // block. The bitwise copy transfers ownership of each element;
        // the old buffer is then released without running destructors.
        unsafe { ptr::copy_nonoverlapping(self.buf.ptr(), new_buf.ptr(), self.len) };
        self.buf = new_buf;
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // Elements first; RawBuf's Drop releases the block.
        self.clear();
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Deep copy. The clone's capacity equals the source's length, not
    /// its capacity: spare slots are not reproduced.
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.len);
        for item in self.as_slice() {
            out.push(item.clone());
        }
        out
    }

    /// Copy-assignment with the strong guarantee: the full copy is built
    /// first and swapped in, so a panic mid-clone leaves `self` unchanged.
    /// An empty source resets `self` to the unallocated empty state
    /// (capacity 0), keeping capacity consistent with storage.
    fn clone_from(&mut self, source: &Self) {
        if source.is_empty() {
            *self = Self::new();
            return;
        }
        let mut temp = source.clone();
        self.swap_with(&mut temp);
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq> PartialEq<&[T]> for DynArray<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialOrd> PartialOrd for DynArray<T> {
    /// Lexicographic: element-wise comparison, with a shorter array that
    /// is a prefix of the longer one sorting first.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for DynArray<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(values: [T; N]) -> Self {
        let mut out = Self::with_capacity(N);
        for value in values {
            out.push(value);
        }
        out
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    fn from(values: &[T]) -> Self {
        let mut out = Self::with_capacity(values.len());
        for value in values {
            out.push(value.clone());
        }
        out
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity(iter.size_hint().0);
        for value in iter {
            out.push(value);
        }
        out
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(self.len.saturating_add(iter.size_hint().0));
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
