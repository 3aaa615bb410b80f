use std::cmp::Ordering;

use ndmat_base::num::AsBool;

use crate::errors::{reported, ArrayError};
use crate::NdArray;

/// Selects how an array is grouped for a reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Axis {
    /// Reduce all elements, in row-major order, to a single value.
    #[default]
    None,

    /// Reduce each column to one value. The result has shape `1 x cols`.
    Row,

    /// Reduce each row to one value. The result has shape `1 x rows`.
    Col,
}

/// Return the position of the first element for which no later element
/// compares as `wins` against it.
fn arg_extremum<T: PartialOrd>(values: &[T], wins: Ordering) -> Option<usize> {
    let mut best = 0;
    let first = values.first()?;
    let mut best_value = first;
    for (i, value) in values.iter().enumerate().skip(1) {
        if value.partial_cmp(best_value) == Some(wins) {
            best = i;
            best_value = value;
        }
    }
    Some(best)
}

/// Return the indices that stably sort `values` in ascending order.
///
/// Incomparable values (eg. NaN) are treated as equal to everything.
fn sorted_indices<T: PartialOrd>(values: &[T]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(Ordering::Equal)
    });
    indices
}

impl<T: Clone> NdArray<T> {
    /// Apply `f` to each group selected by `axis` and collect the results
    /// into a row.
    ///
    /// Column-wise groups are handled by transposing so that every column
    /// becomes a contiguous row.
    fn reduce<U, F: Fn(&[T]) -> U>(&self, axis: Axis, f: F) -> NdArray<U> {
        match axis {
            Axis::None => NdArray::from_vec(vec![f(self.data())]),
            Axis::Col => self.rows().map(f).collect(),
            Axis::Row => self.transpose().reduce(Axis::Col, f),
        }
    }

    /// Variant of [`reduce`](NdArray::reduce) for reductions which are
    /// undefined for empty groups.
    fn try_reduce<U, F: Fn(&[T]) -> Option<U>>(
        &self,
        axis: Axis,
        f: F,
    ) -> Result<NdArray<U>, ArrayError> {
        self.reduce(axis, f)
            .into_iter()
            .collect::<Option<NdArray<U>>>()
            .ok_or_else(|| reported(ArrayError::EmptyReduction))
    }

    /// Test whether all elements in each group are nonzero.
    pub fn all(&self, axis: Axis) -> NdArray<bool>
    where
        T: AsBool,
    {
        self.reduce(axis, |group| group.iter().all(|x| x.as_bool()))
    }

    /// Test whether any element in each group is nonzero.
    pub fn any(&self, axis: Axis) -> NdArray<bool>
    where
        T: AsBool,
    {
        self.reduce(axis, |group| group.iter().any(|x| x.as_bool()))
    }

    pub fn max(&self, axis: Axis) -> Result<NdArray<T>, ArrayError>
    where
        T: PartialOrd,
    {
        self.try_reduce(axis, |group| {
            arg_extremum(group, Ordering::Greater).map(|i| group[i].clone())
        })
    }

    pub fn min(&self, axis: Axis) -> Result<NdArray<T>, ArrayError>
    where
        T: PartialOrd,
    {
        self.try_reduce(axis, |group| {
            arg_extremum(group, Ordering::Less).map(|i| group[i].clone())
        })
    }

    /// Return the index of the largest element in each group.
    ///
    /// If the maximum occurs more than once, the index of the first
    /// occurrence is returned. With [`Axis::None`] the index is into the
    /// row-major sequence of all elements.
    pub fn argmax(&self, axis: Axis) -> Result<NdArray<usize>, ArrayError>
    where
        T: PartialOrd,
    {
        self.try_reduce(axis, |group| arg_extremum(group, Ordering::Greater))
    }

    /// Return the index of the smallest element in each group.
    ///
    /// See [`argmax`](NdArray::argmax) for how ties are resolved.
    pub fn argmin(&self, axis: Axis) -> Result<NdArray<usize>, ArrayError>
    where
        T: PartialOrd,
    {
        self.try_reduce(axis, |group| arg_extremum(group, Ordering::Less))
    }

    /// Return the indices that would sort each group in ascending order.
    ///
    /// The sort is stable. With [`Axis::None`] the result is a `1 x N` row
    /// of flat indices. Otherwise the result has the same shape as `self`:
    /// [`Axis::Col`] sorts within each row and [`Axis::Row`] sorts within each
    /// column.
    pub fn argsort(&self, axis: Axis) -> NdArray<usize>
    where
        T: PartialOrd,
    {
        match axis {
            Axis::None => NdArray::from_vec(sorted_indices(self.data())),
            Axis::Col => {
                let data = self.rows().flat_map(sorted_indices).collect();
                NdArray {
                    shape: self.shape,
                    endian: self.endian,
                    data,
                }
            }
            Axis::Row => self.transpose().argsort(Axis::Col).transpose(),
        }
    }
}

#[cfg(test)]
mod tests {
    use ndmat_testing::TestCases;

    use super::Axis;
    use crate::errors::ArrayError;
    use crate::rng::XorShiftRng;
    use crate::{NdArray, Shape};

    #[test]
    fn test_all_any() {
        let x = NdArray::from([[1, 0, 1], [1, 1, 1]]);

        assert_eq!(x.all(Axis::None), NdArray::from([false]));
        assert_eq!(x.any(Axis::None), NdArray::from([true]));
        assert_eq!(x.all(Axis::Col), NdArray::from([false, true]));
        assert_eq!(x.all(Axis::Row), NdArray::from([true, false, true]));
        assert_eq!(x.any(Axis::Row), NdArray::from([true, true, true]));

        let empty = NdArray::<f32>::new();
        assert_eq!(empty.all(Axis::None), NdArray::from([true]));
        assert_eq!(empty.any(Axis::None), NdArray::from([false]));
    }

    #[test]
    fn test_value_reductions() {
        #[derive(Debug)]
        struct Case {
            axis: Axis,
            max: NdArray<i32>,
            min: NdArray<i32>,
            argmax: NdArray<usize>,
            argmin: NdArray<usize>,
        }

        let x = NdArray::from([[3, 1, 4], [1, 5, 9], [2, 6, 5]]);

        let cases = [
            Case {
                axis: Axis::None,
                max: NdArray::from([9]),
                min: NdArray::from([1]),
                argmax: NdArray::from([5]),
                argmin: NdArray::from([1]),
            },
            Case {
                axis: Axis::Col,
                max: NdArray::from([4, 9, 6]),
                min: NdArray::from([1, 1, 2]),
                argmax: NdArray::from([2, 2, 1]),
                argmin: NdArray::from([1, 0, 0]),
            },
            Case {
                axis: Axis::Row,
                max: NdArray::from([3, 6, 9]),
                min: NdArray::from([1, 1, 4]),
                argmax: NdArray::from([0, 2, 1]),
                argmin: NdArray::from([1, 0, 0]),
            },
        ];

        cases.test_each(|case| {
            assert_eq!(x.max(case.axis).as_ref(), Ok(&case.max));
            assert_eq!(x.min(case.axis).as_ref(), Ok(&case.min));
            assert_eq!(x.argmax(case.axis).as_ref(), Ok(&case.argmax));
            assert_eq!(x.argmin(case.axis).as_ref(), Ok(&case.argmin));
        })
    }

    #[test]
    fn test_argmax_returns_first_occurrence() {
        let mut rng = XorShiftRng::new(5678);
        for _ in 0..20 {
            // Small value range so that ties are common.
            let x = NdArray::<u8>::rand(Shape::new(4, 6), &mut rng).map(|v| v % 4);
            let flat = x.data();

            let max = x.max(Axis::None).unwrap().item().unwrap();
            let argmax = x.argmax(Axis::None).unwrap().item().unwrap();
            assert_eq!(flat.iter().position(|&v| v == max), Some(argmax));

            let min = x.min(Axis::None).unwrap().item().unwrap();
            let argmin = x.argmin(Axis::None).unwrap().item().unwrap();
            assert_eq!(flat.iter().position(|&v| v == min), Some(argmin));
        }
    }

    #[test]
    fn test_empty_reduction() {
        let empty = NdArray::<f32>::new();
        assert_eq!(empty.max(Axis::None), Err(ArrayError::EmptyReduction));
        assert_eq!(empty.argmin(Axis::None), Err(ArrayError::EmptyReduction));

        // Rows with no columns cannot be reduced either.
        let no_cols = NdArray::<f32>::zeros(2, 0);
        assert_eq!(no_cols.min(Axis::Col), Err(ArrayError::EmptyReduction));
    }

    #[test]
    fn test_argsort() {
        let x = NdArray::from([[3., 1., 2.], [0., 5., 4.]]);

        assert_eq!(x.argsort(Axis::None), NdArray::from([3, 1, 2, 0, 5, 4]));
        assert_eq!(
            x.argsort(Axis::Col),
            NdArray::from([[1, 2, 0], [0, 2, 1]])
        );

        let by_col = x.argsort(Axis::Row);
        assert_eq!(by_col.shape(), x.shape());
        assert_eq!(by_col, NdArray::from([[1, 0, 0], [0, 1, 1]]));
    }

    #[test]
    fn test_argsort_is_stable() {
        let x = NdArray::from([2, 1, 2, 1, 0]);
        assert_eq!(x.argsort(Axis::None), NdArray::from([4, 1, 3, 0, 2]));
    }
}
