//! A contiguous growable array container with explicit capacity management.
//!
//! The crate provides one type, [`DynArray`], an owning dynamic array in
//! the classic pointer/length/capacity shape. It exists to make manual
//! memory management legible: the allocation core is isolated in one
//! module, the growth policy is spelled out, and every operation documents
//! whether it can invalidate element addresses.
//!
//! # Quick start
//!
//! ```rust
//! use dynarray::{dyn_array, DynArray};
//!
//! let mut values = dyn_array![1, 2, 3];
//! values.insert(1, 9);
//! assert_eq!(values, [1, 9, 2, 3]);
//!
//! values.remove(0);
//! assert_eq!(values, [9, 2, 3]);
//!
//! let mut reserved = DynArray::with_capacity(8);
//! for i in 0..8 {
//!     reserved.push(i); // no reallocation
//! }
//! assert_eq!(reserved.capacity(), 8);
//! ```
//!
//! # Unsafe discipline
//!
//! `unsafe` is confined to the `raw` allocation module and the pointer
//! moves in `array`; every unsafe block carries a `SAFETY:` comment. The
//! rest of the crate, and all of its tests, are safe code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod error;
mod raw;

pub use array::DynArray;
pub use error::ArrayError;

/// Construct a [`DynArray`] from a list of values or a repeated value.
///
/// `dyn_array![a, b, c]` builds an array holding exactly those values
/// (`len == capacity == 3`); `dyn_array![v; n]` builds `n` clones of `v`.
///
/// ```rust
/// use dynarray::dyn_array;
///
/// let listed = dyn_array![1, 2, 3];
/// assert_eq!(listed.len(), 3);
///
/// let repeated = dyn_array![0u8; 4];
/// assert_eq!(repeated, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynArray::new()
    };
    ($value:expr; $n:expr) => {
        $crate::DynArray::filled($n, $value)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::DynArray::from([$($value),+])
    };
}
