//! ndmat_array provides [`NdArray`], an owned two dimensional array with
//! NumPy-style indexing, slicing and reductions.
//!
//! # Layout
//!
//! An array owns a contiguous buffer of elements in row-major order together
//! with a [`Shape`] of `rows x cols`. One dimensional data is stored as a
//! single row. Every operation other than the in-place ones (`fill`,
//! `reshape`, compound assignment) returns a new array. There are no views.
//!
//! ```
//! use ndmat_array::{Axis, NdArray, Slice};
//!
//! let x = NdArray::from([[1, 2, 3], [4, 5, 6]]);
//!
//! assert_eq!(x[(1, -1)], 6);
//! assert_eq!(x.slice(Slice::new(0, 6, 2)).unwrap(), NdArray::from([1, 3, 5]));
//! assert_eq!(x.max(Axis::Row).unwrap(), NdArray::from([4, 5, 6]));
//! assert_eq!(x.transpose().shape().rows, 3);
//! ```
//!
//! # Serialization
//!
//! With the `serde` feature enabled, arrays serialize as a struct holding the
//! shape and the elements in row-major order:
//!
//! ```json
//! {
//!   "shape": [2, 2],
//!   "data": [0.5, 1.0, 1.5, 2.0]
//! }
//! ```

mod arith;
mod array;
pub mod errors;
mod impl_display;
#[cfg(feature = "serde")]
mod impl_serialize;
mod reductions;
mod shape;
mod slice;

/// Trait for sources of random data, for use with [`NdArray::rand`].
pub trait RandomSource<T> {
    /// Generate the next random value.
    fn next(&mut self) -> T;
}

pub use array::{Endian, NdArray, Scalar};
pub use errors::{ArrayError, SliceError};
pub use impl_display::{FormatArray, FormatOptions};
pub use reductions::Axis;
pub use shape::Shape;
pub use slice::{Slice, SliceItem};

// Public for use by other crates in this workspace, but considered internal.
#[doc(hidden)]
pub mod rng;
#[doc(hidden)]
pub mod test_util;
