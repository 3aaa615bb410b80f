//! Determinant and inverse of small dense matrices.
//!
//! These routines work directly on the row-major storage of an [`NdArray`]
//! and favor simplicity over speed. The determinant uses cofactor expansion,
//! whose cost grows factorially with the matrix order.

use std::error::Error;
use std::fmt;
use std::ops::{Add, Mul, Sub};

use ndmat_array::{ArrayError, NdArray, Shape};
use ndmat_base::num::{Cast, Identities};

use crate::env::{env_flag, CHECK_PIVOTS_VAR};

/// Order above which [`det`] logs a warning about its cost.
pub const DET_WARN_ORDER: usize = 10;

/// Errors reported by [`det`] and [`inv`].
#[derive(Clone, Debug, PartialEq)]
pub enum LinalgError {
    /// The input is not a square matrix.
    NotSquare(Shape),

    /// A zero pivot was found while eliminating `row`, and pivot checks were
    /// enabled.
    Singular { row: usize },

    /// An array operation failed.
    Array(ArrayError),
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinalgError::NotSquare(shape) => write!(
                f,
                "input array must be square, got shape [{}, {}]",
                shape.rows, shape.cols
            ),
            LinalgError::Singular { row } => {
                write!(f, "matrix is singular, pivot in row {} is zero", row)
            }
            LinalgError::Array(err) => write!(f, "{}", err),
        }
    }
}

impl Error for LinalgError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LinalgError::Array(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ArrayError> for LinalgError {
    fn from(err: ArrayError) -> LinalgError {
        LinalgError::Array(err)
    }
}

fn check_square(shape: Shape) -> Result<usize, LinalgError> {
    if !shape.is_square() {
        let err = LinalgError::NotSquare(shape);
        log::debug!("{}", err);
        return Err(err);
    }
    Ok(shape.rows)
}

/// Return the matrix formed by deleting the first row and column `col` of a
/// square matrix.
fn first_row_minor<T: Copy>(a: &NdArray<T>, col: usize) -> Result<NdArray<T>, ArrayError> {
    let order = a.shape().rows - 1;
    let data = a
        .rows()
        .skip(1)
        .flat_map(|row| {
            row.iter()
                .enumerate()
                .filter(move |(c, _)| *c != col)
                .map(|(_, &x)| x)
        })
        .collect();
    NdArray::from_data(Shape::square(order), data)
}

fn det_square<T>(a: &NdArray<T>) -> Result<T, ArrayError>
where
    T: Copy + Identities + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    let det = match a.shape().rows {
        0 => T::one(),
        1 => a[(0, 0)],
        2 => a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)],
        3 => {
            // Rule of Sarrus.
            a[(0, 0)] * a[(1, 1)] * a[(2, 2)]
                + a[(0, 1)] * a[(1, 2)] * a[(2, 0)]
                + a[(0, 2)] * a[(1, 0)] * a[(2, 1)]
                - a[(0, 2)] * a[(1, 1)] * a[(2, 0)]
                - a[(0, 1)] * a[(1, 0)] * a[(2, 2)]
                - a[(0, 0)] * a[(1, 2)] * a[(2, 1)]
        }
        order => {
            let mut det = T::zero();
            for col in 0..order {
                let term = a[col as isize] * det_square(&first_row_minor(a, col)?)?;
                // Cofactor signs alternate along the row.
                det = if col % 2 == 0 { det + term } else { det - term };
            }
            det
        }
    };
    Ok(det)
}

/// Compute the determinant of a square matrix.
///
/// Orders 1 to 3 use closed-form expansions. Larger matrices are expanded
/// recursively along the first row. The determinant of a `0 x 0` matrix is
/// one.
///
/// ```
/// use ndmat::linalg::det;
/// use ndmat::NdArray;
///
/// assert_eq!(det(&NdArray::from([[1, 2], [3, 4]])), Ok(-2));
/// ```
pub fn det<T>(a: &NdArray<T>) -> Result<T, LinalgError>
where
    T: Copy + Identities + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    let order = check_square(a.shape())?;
    if order > DET_WARN_ORDER {
        log::warn!(
            "computing determinant of order {} by cofactor expansion, this may be slow",
            order
        );
    }
    Ok(det_square(a)?)
}

/// Options for [`inv_with_options`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvOptions {
    /// Report [`LinalgError::Singular`] if a pivot is zero, instead of
    /// continuing with infinite or NaN values.
    ///
    /// Defaults to the value of the `NDMAT_CHECK_PIVOTS` environment
    /// variable, or false if unset.
    pub check_pivots: bool,
}

impl Default for InvOptions {
    fn default() -> Self {
        InvOptions {
            check_pivots: env_flag(CHECK_PIVOTS_VAR, false),
        }
    }
}

/// Compute the inverse of a square matrix using the default options.
///
/// See [`inv_with_options`].
pub fn inv<T: Copy + Cast<f64>>(a: &NdArray<T>) -> Result<NdArray<f64>, LinalgError> {
    inv_with_options(a, InvOptions::default())
}

/// Compute the inverse of a square matrix by Gauss-Jordan elimination.
///
/// The input is converted to `f64` and augmented with the identity. Each
/// pivot row is divided by its pivot and then subtracted from every other
/// row to clear the pivot column. Rows are not exchanged, so a zero on the
/// diagonal during elimination yields infinities or NaNs in the result
/// unless [`InvOptions::check_pivots`] is set.
pub fn inv_with_options<T: Copy + Cast<f64>>(
    a: &NdArray<T>,
    opts: InvOptions,
) -> Result<NdArray<f64>, LinalgError> {
    let n = check_square(a.shape())?;
    let width = 2 * n;

    let mut aug = NdArray::<f64>::zeros(n, width);
    let work = aug.data_mut();
    for (r, row) in a.rows().enumerate() {
        let out = &mut work[r * width..(r + 1) * width];
        for (dst, &src) in out.iter_mut().zip(row) {
            *dst = src.cast();
        }
        out[n + r] = 1.0;
    }

    for p in 0..n {
        let pivot = work[p * width + p];
        if pivot == 0.0 {
            if opts.check_pivots {
                let err = LinalgError::Singular { row: p };
                log::debug!("{}", err);
                return Err(err);
            }
            log::warn!("zero pivot in row {} of matrix inverse", p);
        }

        for x in &mut work[p * width + p..(p + 1) * width] {
            *x /= pivot;
        }

        let pivot_row = work[p * width..(p + 1) * width].to_vec();
        for r in (0..n).filter(|&r| r != p) {
            let row = &mut work[r * width..(r + 1) * width];
            let factor = row[p];
            for (x, &y) in row.iter_mut().zip(&pivot_row) {
                *x -= factor * y;
            }
        }
    }

    let data = aug.rows().flat_map(|row| row[n..].iter().copied()).collect();
    Ok(NdArray::from_data(a.shape(), data)?)
}

#[cfg(test)]
mod tests {
    use ndmat_array::rng::XorShiftRng;
    use ndmat_array::test_util::{expect_equal, expect_equal_with_tolerance};
    use ndmat_array::{NdArray, Shape};
    use ndmat_testing::TestCases;

    use super::{det, inv, inv_with_options, InvOptions, LinalgError};

    fn identity(n: usize) -> NdArray<f64> {
        let mut eye = NdArray::zeros(n, n);
        for i in 0..n as isize {
            eye[(i, i)] = 1.0;
        }
        eye
    }

    #[test]
    fn test_det() {
        #[derive(Debug)]
        struct Case {
            input: NdArray<i64>,
            expected: i64,
        }

        let cases = [
            Case {
                input: NdArray::from([[7]]),
                expected: 7,
            },
            Case {
                input: NdArray::from([[1, 2], [3, 4]]),
                expected: -2,
            },
            Case {
                input: NdArray::from([[6, 1, 1], [4, -2, 5], [2, 8, 7]]),
                expected: -306,
            },
            Case {
                input: NdArray::from([[1, 0, 2, -1], [3, 0, 0, 5], [2, 1, 4, -3], [1, 0, 5, 0]]),
                expected: 30,
            },
            Case {
                input: NdArray::from([
                    [2, -1, 0, 3, 1],
                    [1, 4, 2, 0, -2],
                    [0, 3, 5, 1, 1],
                    [-1, 2, 0, 4, 2],
                    [3, 0, 1, -2, 6],
                ]),
                expected: 1848,
            },
        ];

        cases.test_each(|case| {
            assert_eq!(det(&case.input), Ok(case.expected));
        })
    }

    #[test]
    fn test_det_order_3_term_order() {
        let mut rng = XorShiftRng::new(4321);
        for _ in 0..10 {
            let m: NdArray<f64> = NdArray::rand(Shape::square(3), &mut rng);
            let [a, b, c, d, e, f, g, h, i]: [f64; 9] = m.data().try_into().unwrap();
            let expected = a * e * i + b * f * g + c * d * h - c * e * g - b * d * i - a * f * h;
            assert_eq!(det(&m), Ok(expected));
        }
    }

    #[test]
    fn test_det_empty() {
        assert_eq!(det(&NdArray::<f64>::new()), Ok(1.0));
    }

    #[test]
    fn test_det_of_product() {
        let mut rng = XorShiftRng::new(1234);
        let a: NdArray<f64> = NdArray::rand(Shape::square(4), &mut rng);
        let b: NdArray<f64> = NdArray::rand(Shape::square(4), &mut rng);
        let ab = a.dot(&b).unwrap();

        let expected = det(&a).unwrap() * det(&b).unwrap();
        let actual = det(&ab).unwrap();
        assert!(
            (actual - expected).abs() < 1e-9,
            "{} != {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_not_square() {
        let x = NdArray::from([[1., 2., 3.], [4., 5., 6.]]);
        assert_eq!(det(&x), Err(LinalgError::NotSquare(Shape::new(2, 3))));
        assert_eq!(inv(&x), Err(LinalgError::NotSquare(Shape::new(2, 3))));
        assert_eq!(
            det(&x).unwrap_err().to_string(),
            "input array must be square, got shape [2, 3]"
        );
    }

    #[test]
    fn test_inv() {
        let a = NdArray::from([[2, -1, 0], [-1, 2, -1], [0, -1, 2]]);
        let a_inv = inv(&a).unwrap();

        let expected = NdArray::from([[0.75, 0.5, 0.25], [0.5, 1., 0.5], [0.25, 0.5, 0.75]]);
        expect_equal(&a_inv, &expected).unwrap();
        let product = a.astype::<f64>().dot(&a_inv).unwrap();
        expect_equal_with_tolerance(&product, &identity(3), 1e-12, 0.).unwrap();

        let b = NdArray::from([[4., 7.], [2., 6.]]);
        expect_equal(&inv(&b).unwrap(), &NdArray::from([[0.6, -0.7], [-0.2, 0.4]])).unwrap();
    }

    #[test]
    fn test_inv_random() {
        let mut rng = XorShiftRng::new(5678);
        for n in 1..6 {
            // Diagonal dominance keeps the pivots away from zero.
            let mut a: NdArray<f64> = NdArray::rand(Shape::square(n), &mut rng);
            for i in 0..n as isize {
                a[(i, i)] += n as f64;
            }

            let product = a.dot(&inv(&a).unwrap()).unwrap();
            expect_equal_with_tolerance(&product, &identity(n), 1e-10, 0.).unwrap();
        }
    }

    #[test]
    fn test_inv_zero_pivot() {
        let singular = NdArray::from([[1., 2.], [2., 4.]]);

        let checked = InvOptions { check_pivots: true };
        assert_eq!(
            inv_with_options(&singular, checked),
            Err(LinalgError::Singular { row: 1 })
        );

        let unchecked = InvOptions {
            check_pivots: false,
        };
        let result = inv_with_options(&singular, unchecked).unwrap();
        assert!(result.iter().any(|x| !x.is_finite()));

        // Rows are never exchanged, so a leading zero fails even when the
        // matrix is invertible.
        let swap = NdArray::from([[0., 1.], [1., 0.]]);
        assert_eq!(
            inv_with_options(&swap, checked),
            Err(LinalgError::Singular { row: 0 })
        );
    }
}
