use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::iter::zip;

use crate::NdArray;

/// Trait that tests whether two values are approximately equal.
///
/// Values are close if `(self - other).abs() <= atol + rtol * other.abs()`,
/// the same rule as NumPy's `allclose`.
pub trait ApproxEq: Sized {
    fn default_abs_tolerance() -> Self;

    fn default_rel_tolerance() -> Self;

    fn approx_eq_with_atol_rtol(&self, other: &Self, atol: Self, rtol: Self) -> bool;

    /// Test if `other` is within `epsilon` of `self`, plus the default
    /// relative tolerance.
    fn approx_eq_with_tolerance(&self, other: &Self, epsilon: Self) -> bool {
        self.approx_eq_with_atol_rtol(other, epsilon, Self::default_rel_tolerance())
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self.approx_eq_with_atol_rtol(
            other,
            Self::default_abs_tolerance(),
            Self::default_rel_tolerance(),
        )
    }
}

macro_rules! impl_approx_eq_float {
    ($($ty:ty),*) => {
        $(
            impl ApproxEq for $ty {
                fn default_abs_tolerance() -> $ty {
                    1e-8
                }

                fn default_rel_tolerance() -> $ty {
                    1e-5
                }

                fn approx_eq_with_atol_rtol(&self, other: &$ty, atol: $ty, rtol: $ty) -> bool {
                    (self - other).abs() <= atol + rtol * other.abs()
                }
            }
        )*
    };
}

impl_approx_eq_float!(f32, f64);

impl ApproxEq for i32 {
    fn default_abs_tolerance() -> i32 {
        0
    }

    fn default_rel_tolerance() -> i32 {
        0
    }

    fn approx_eq_with_atol_rtol(&self, other: &i32, atol: i32, rtol: i32) -> bool {
        (self - other).abs() <= atol + rtol * other.abs()
    }
}

#[derive(Debug)]
pub enum ExpectEqualError {
    ShapeMismatch(String),
    ValueMismatch(String),
}

impl Display for ExpectEqualError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpectEqualError::ShapeMismatch(details) => write!(f, "{}", details),
            ExpectEqualError::ValueMismatch(details) => write!(f, "{}", details),
        }
    }
}

impl Error for ExpectEqualError {}

/// Check that two arrays have the same shape and approximately equal
/// contents, using the default tolerances for the element type.
pub fn expect_equal<T>(x: &NdArray<T>, y: &NdArray<T>) -> Result<(), ExpectEqualError>
where
    T: Copy + Debug + ApproxEq,
{
    expect_equal_with_tolerance(x, y, T::default_abs_tolerance(), T::default_rel_tolerance())
}

/// Variant of [`expect_equal`] with custom tolerances.
///
/// On failure the error lists the number of mismatches and the first few
/// `(row, col)` positions where the arrays differ.
pub fn expect_equal_with_tolerance<T>(
    x: &NdArray<T>,
    y: &NdArray<T>,
    atol: T,
    rtol: T,
) -> Result<(), ExpectEqualError>
where
    T: Copy + Debug + ApproxEq,
{
    if x.shape() != y.shape() {
        return Err(ExpectEqualError::ShapeMismatch(format!(
            "Arrays have different shapes. {:?} vs. {:?}",
            x.shape(),
            y.shape()
        )));
    }

    let cols = x.shape().cols.max(1);
    let mismatches: Vec<_> = zip(x.iter(), y.iter())
        .enumerate()
        .filter(|(_, (xi, yi))| !xi.approx_eq_with_atol_rtol(yi, atol, rtol))
        .map(|(i, (xi, yi))| ((i / cols, i % cols), xi, yi))
        .collect();

    if mismatches.is_empty() {
        return Ok(());
    }

    let max_examples = 16;
    Err(ExpectEqualError::ValueMismatch(format!(
        "Array values differ at {} of {} indexes: {:?}{}",
        mismatches.len(),
        x.size(),
        &mismatches[..mismatches.len().min(max_examples)],
        if mismatches.len() > max_examples {
            "..."
        } else {
            ""
        }
    )))
}

#[cfg(test)]
mod tests {
    use super::{expect_equal, expect_equal_with_tolerance, ApproxEq};
    use crate::NdArray;

    #[test]
    fn test_approx_eq() {
        assert!(1.0f32.approx_eq(&1.000001));
        assert!(!1.0f64.approx_eq(&1.001));
        assert!(1.0f64.approx_eq_with_tolerance(&1.001, 0.01));
        assert!(3i32.approx_eq(&3));
        assert!(!3i32.approx_eq(&4));
    }

    #[test]
    fn test_expect_equal() {
        let x = NdArray::from([[1.0, 2.0], [3.0, 4.0]]);
        let y = NdArray::from([[1.0, 2.0], [3.0, 4.0 + 1e-9]]);
        assert!(expect_equal(&x, &y).is_ok());

        let z = NdArray::from([[1.0, 2.0], [3.5, 4.0]]);
        let err = expect_equal(&x, &z).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Array values differ at 1 of 4 indexes: [((1, 0), 3.0, 3.5)]"
        );
        assert!(expect_equal_with_tolerance(&x, &z, 0.5, 0.).is_ok());

        let w = NdArray::from([1.0, 2.0, 3.0, 4.0]);
        assert!(expect_equal(&x, &w).is_err());
    }
}
