//! ndmat is a small library of owned two dimensional numeric arrays with
//! NumPy-style operations and basic dense linear algebra.
//!
//! The array type, [`NdArray`], lives in the [ndmat-array](ndmat_array) crate
//! and is re-exported here. This crate adds:
//!
//! - [`linalg`]: determinant and inverse of square matrices.
//! - [`poly`]: one dimensional polynomials with array coefficients.
//!
//! ```
//! use ndmat::linalg::{det, inv};
//! use ndmat::NdArray;
//!
//! let a = NdArray::from([[4., 7.], [2., 6.]]);
//! assert_eq!(det(&a), Ok(10.));
//!
//! let a_inv = inv(&a).unwrap();
//! let eye = a.dot(&a_inv).unwrap();
//! assert!((eye[(0, 0)] - 1.).abs() < 1e-12);
//! assert!(eye[(0, 1)].abs() < 1e-12);
//! ```
//!
//! # Logging
//!
//! Validation failures are logged at `debug` level via the [log] crate
//! before being returned. Potentially slow or numerically unstable
//! operations log warnings.
//!
//! # Configuration
//!
//! - `NDMAT_CHECK_PIVOTS`: if set to a true value ("1", "true", "yes"),
//!   [`linalg::inv`] fails on a zero pivot instead of producing infinities.

pub mod env;
pub mod linalg;
pub mod poly;

pub use ndmat_array::*;
