//! Container-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during container operations.
///
/// Only the checked-access and fallible-reservation paths produce these;
/// contract violations (out-of-range indices passed to [`insert`] or
/// [`remove`]) panic instead.
///
/// [`insert`]: crate::DynArray::insert
/// [`remove`]: crate::DynArray::remove
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// A checked access with an index at or past the live range.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of live elements at the time of the access.
        len: usize,
    },
    /// A requested capacity whose byte size cannot be represented.
    CapacityOverflow {
        /// The capacity that was requested, in elements.
        requested: usize,
    },
    /// The allocator refused to provide a block of the required size.
    AllocFailed {
        /// Size of the failed request in bytes.
        bytes: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: index {index}, len {len}")
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements exceed the addressable range")
            }
            Self::AllocFailed { bytes } => {
                write!(f, "allocation failed: could not obtain {bytes} bytes")
            }
        }
    }
}

impl Error for ArrayError {}
