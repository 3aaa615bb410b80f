use std::ops::{Add, AddAssign, Mul, MulAssign};

use ndmat_base::num::Identities;

use crate::errors::{reported, ArrayError};
use crate::{Axis, NdArray, Scalar, Shape};

impl<T: Clone> NdArray<T> {
    /// Return a new array with rows and columns swapped.
    pub fn transpose(&self) -> NdArray<T> {
        let Shape { rows, cols } = self.shape;
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..cols {
            for row in 0..rows {
                data.push(self.data[row * cols + col].clone());
            }
        }
        NdArray {
            shape: self.shape.transposed(),
            endian: self.endian,
            data,
        }
    }

    /// Return a new array with the elements of `other` appended along `axis`.
    ///
    /// - [`Axis::None`] flattens both arrays into a single row.
    /// - [`Axis::Row`] appends the rows of `other`. Column counts must match.
    /// - [`Axis::Col`] appends the columns of `other`. Row counts must match.
    pub fn append(&self, other: &NdArray<T>, axis: Axis) -> Result<NdArray<T>, ArrayError> {
        let mismatch = || {
            reported(ArrayError::ShapeMismatch {
                expected: self.shape,
                actual: other.shape,
            })
        };

        match axis {
            Axis::None => Ok(self.iter().chain(other.iter()).cloned().collect()),
            Axis::Row => {
                if self.shape.cols != other.shape.cols {
                    return Err(mismatch());
                }
                let mut data = self.data.clone();
                data.extend_from_slice(&other.data);
                NdArray::from_data(
                    (self.shape.rows + other.shape.rows, self.shape.cols),
                    data,
                )
            }
            Axis::Col => {
                if self.shape.rows != other.shape.rows {
                    return Err(mismatch());
                }
                let mut data = Vec::with_capacity(self.size() + other.size());
                for (lhs, rhs) in self.rows().zip(other.rows()) {
                    data.extend_from_slice(lhs);
                    data.extend_from_slice(rhs);
                }
                NdArray::from_data(
                    (self.shape.rows, self.shape.cols + other.shape.cols),
                    data,
                )
            }
        }
    }

    fn check_same_shape(&self, other: &NdArray<T>) -> Result<(), ArrayError> {
        if self.shape != other.shape {
            return Err(reported(ArrayError::ShapeMismatch {
                expected: self.shape,
                actual: other.shape,
            }));
        }
        Ok(())
    }
}

impl<T> NdArray<T>
where
    T: Copy + Identities + AddAssign + Mul<Output = T>,
{
    /// Compute the dot product of `self` and `other`.
    ///
    /// If both arrays are vectors of the same shape, this returns their inner
    /// product as a `1 x 1` array. Otherwise it returns the matrix product,
    /// which requires `self.shape().cols == other.shape().rows`.
    ///
    /// ```
    /// use ndmat_array::NdArray;
    ///
    /// let a = NdArray::from([[1, 1], [1, 1]]);
    /// assert_eq!(a.dot(&a).unwrap(), NdArray::from([[2, 2], [2, 2]]));
    /// ```
    pub fn dot(&self, other: &NdArray<T>) -> Result<NdArray<T>, ArrayError> {
        if self.shape == other.shape && self.shape.is_vector() {
            let mut sum = T::zero();
            for (&x, &y) in self.iter().zip(other.iter()) {
                sum += x * y;
            }
            return Ok(NdArray::from_vec(vec![sum]));
        }

        if self.shape.cols != other.shape.rows {
            return Err(reported(ArrayError::IncompatibleShapes(
                self.shape,
                other.shape,
            )));
        }

        let (m, k, n) = (self.shape.rows, self.shape.cols, other.shape.cols);
        let mut out = NdArray::full((m, n), T::zero());
        for i in 0..m {
            for j in 0..n {
                let mut sum = T::zero();
                for p in 0..k {
                    sum += self.data[i * k + p] * other.data[p * n + j];
                }
                out.data[i * n + j] = sum;
            }
        }
        Ok(out)
    }
}

macro_rules! impl_binary_op {
    ($op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident, $try_op:ident, $try_assign:ident) => {
        impl<T: Copy + $assign_trait> NdArray<T> {
            #[doc = concat!("Apply `", stringify!($assign_fn), "` elementwise with `other`, which must have the same shape.")]
            pub fn $try_assign(&mut self, other: &NdArray<T>) -> Result<(), ArrayError> {
                self.check_same_shape(other)?;
                for (x, &y) in self.data.iter_mut().zip(other.data.iter()) {
                    $assign_trait::$assign_fn(x, y);
                }
                Ok(())
            }

            #[doc = concat!("Return a new array holding the elementwise `", stringify!($op_fn), "` of `self` and `other`.")]
            pub fn $try_op(&self, other: &NdArray<T>) -> Result<NdArray<T>, ArrayError> {
                let mut out = self.clone();
                out.$try_assign(other)?;
                Ok(out)
            }
        }

        impl<T: Copy + $assign_trait + Scalar> $assign_trait<T> for NdArray<T> {
            fn $assign_fn(&mut self, rhs: T) {
                for x in self.data.iter_mut() {
                    $assign_trait::$assign_fn(x, rhs);
                }
            }
        }

        impl<T: Copy + $assign_trait> $assign_trait<&NdArray<T>> for NdArray<T> {
            /// Panics if the shapes differ.
            fn $assign_fn(&mut self, rhs: &NdArray<T>) {
                if let Err(err) = self.$try_assign(rhs) {
                    panic!("{}", err);
                }
            }
        }

        impl<T: Copy + $assign_trait> $op_trait<&NdArray<T>> for &NdArray<T> {
            type Output = NdArray<T>;

            fn $op_fn(self, rhs: &NdArray<T>) -> NdArray<T> {
                let mut out = self.clone();
                $assign_trait::$assign_fn(&mut out, rhs);
                out
            }
        }

        impl<T: Copy + $assign_trait> $op_trait<&NdArray<T>> for NdArray<T> {
            type Output = NdArray<T>;

            fn $op_fn(mut self, rhs: &NdArray<T>) -> NdArray<T> {
                $assign_trait::$assign_fn(&mut self, rhs);
                self
            }
        }

        impl<T: Copy + $assign_trait + Scalar> $op_trait<T> for &NdArray<T> {
            type Output = NdArray<T>;

            fn $op_fn(self, rhs: T) -> NdArray<T> {
                let mut out = self.clone();
                $assign_trait::$assign_fn(&mut out, rhs);
                out
            }
        }

        impl<T: Copy + $assign_trait + Scalar> $op_trait<T> for NdArray<T> {
            type Output = NdArray<T>;

            fn $op_fn(mut self, rhs: T) -> NdArray<T> {
                $assign_trait::$assign_fn(&mut self, rhs);
                self
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, try_add, try_add_assign);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, try_mul, try_mul_assign);
