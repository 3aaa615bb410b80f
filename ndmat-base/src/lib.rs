//! Common utilities used by other ndmat crates.
//!
//! This is an internal crate which holds the numeric traits that the array
//! container and the linear algebra routines are generic over.

pub mod num;
