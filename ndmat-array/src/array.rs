use std::collections::{BTreeSet, VecDeque};
use std::ops::{Index, IndexMut};

use ndmat_base::num::{AsBool, Cast, CheckedAdd, NaN};

use crate::errors::{reported, ArrayError, SliceError};
use crate::{RandomSource, Shape, Slice, SliceItem};

/// Byte order of the values in an array's buffer.
///
/// This is informational only. Arrays are always created with
/// [`Endian::Native`] and no operation currently converts between orders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endian {
    #[default]
    Native,
    Big,
    Little,
}

/// An owned, row-major, two dimensional array.
///
/// The element at `(row, col)` is stored at offset `row * cols + col` of a
/// contiguous buffer whose length always equals `shape.rows * shape.cols`.
/// One dimensional data is represented as a single row.
///
/// Cloning an array copies its buffer. [`NdArray::take`] moves the buffer
/// out, leaving an empty `[0, 0]` array in its place.
///
/// # Indexing
///
/// There are two tiers of element access:
///
/// - The `Index` impls (`array[i]`, `array[(row, col)]`) wrap negative
///   indices once and compute an offset, without validating each axis. An
///   index that is out of range for its axis but lands inside the buffer
///   silently refers to another element. Offsets outside the buffer panic.
/// - [`get`](NdArray::get), [`get_at`](NdArray::get_at) and the slicing
///   methods validate every index and report failures.
#[derive(Clone, Debug)]
pub struct NdArray<T> {
    pub(crate) shape: Shape,
    pub(crate) endian: Endian,
    pub(crate) data: Vec<T>,
}

impl<T> Default for NdArray<T> {
    fn default() -> Self {
        NdArray {
            shape: Shape::default(),
            endian: Endian::Native,
            data: Vec::new(),
        }
    }
}

impl<T> NdArray<T> {
    /// Create an empty array with shape `[0, 0]`.
    pub fn new() -> NdArray<T> {
        NdArray::default()
    }

    /// Create an array from a shape and a row-major buffer.
    ///
    /// Fails if the buffer length does not equal `shape.size()`.
    pub fn from_data(shape: impl Into<Shape>, data: Vec<T>) -> Result<NdArray<T>, ArrayError> {
        let shape = shape.into();
        if data.len() != shape.size() {
            return Err(reported(ArrayError::Reshape {
                size: data.len(),
                shape,
            }));
        }
        Ok(NdArray {
            shape,
            endian: Endian::Native,
            data,
        })
    }

    /// Create a `1 x N` array from a vector.
    pub fn from_vec(data: Vec<T>) -> NdArray<T> {
        NdArray {
            shape: Shape::new(1, data.len()),
            endian: Endian::Native,
            data,
        }
    }

    /// Create an array filled with default values (zero for numbers).
    pub fn from_shape(shape: impl Into<Shape>) -> NdArray<T>
    where
        T: Clone + Default,
    {
        NdArray::full(shape, T::default())
    }

    /// Create a `size x size` array filled with default values.
    pub fn square(size: usize) -> NdArray<T>
    where
        T: Clone + Default,
    {
        NdArray::from_shape(Shape::square(size))
    }

    /// Create a `rows x cols` array filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> NdArray<T>
    where
        T: Clone + Default,
    {
        NdArray::from_shape((rows, cols))
    }

    /// Create an array with every element set to `value`.
    pub fn full(shape: impl Into<Shape>, value: T) -> NdArray<T>
    where
        T: Clone,
    {
        let shape = shape.into();
        NdArray {
            shape,
            endian: Endian::Native,
            data: vec![value; shape.size()],
        }
    }

    /// Create an array from a list of equal length rows.
    ///
    /// The row count is the length of `rows` and the column count is the
    /// length of the first row. Fails if any row has a different length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<NdArray<T>, ArrayError>
    where
        T: Clone,
    {
        let cols = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(reported(ArrayError::RaggedRows {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                }));
            }
            data.extend_from_slice(row);
        }
        NdArray::from_data((rows.len(), cols), data)
    }

    /// Create a `1 x N` array by copying a slice.
    pub fn from_slice(values: &[T]) -> NdArray<T>
    where
        T: Clone,
    {
        NdArray::from_vec(values.to_vec())
    }

    /// Create a `1 x N` array holding the sequence `start, start + step, ...`
    /// up to but excluding `stop`.
    ///
    /// A negative step counts down towards `stop`. Fails if the step is zero
    /// or points away from `stop`. The sequence ends early if the next value
    /// is not representable in `T`.
    pub fn arange(start: T, stop: T, step: T) -> Result<NdArray<T>, ArrayError>
    where
        T: Copy + PartialOrd + Default + CheckedAdd,
    {
        let zero = T::default();
        let ascending = step > zero;
        if step == zero || (ascending && stop < start) || (step < zero && stop > start) {
            return Err(reported(ArrayError::InvalidArange));
        }

        let mut data = Vec::new();
        let mut value = start;
        while (ascending && value < stop) || (!ascending && value > stop) {
            data.push(value);
            // Overflow means the next value is already past `stop`.
            match value.checked_add(step) {
                Some(next) => value = next,
                None => break,
            }
        }
        Ok(NdArray::from_vec(data))
    }

    /// Create an array filled with values drawn from `source`.
    pub fn rand<R: RandomSource<T>>(shape: impl Into<Shape>, source: &mut R) -> NdArray<T> {
        let shape = shape.into();
        let data = std::iter::repeat_with(|| source.next())
            .take(shape.size())
            .collect();
        NdArray {
            shape,
            endian: Endian::Native,
            data,
        }
    }

    /// Move the contents out of this array, leaving it empty.
    pub fn take(&mut self) -> NdArray<T> {
        std::mem::take(self)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Return the number of elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return the size of the element buffer in bytes.
    pub fn nbytes(&self) -> usize {
        std::mem::size_of::<T>() * self.data.len()
    }

    pub fn endianness(&self) -> Endian {
        self.endian
    }

    /// Return the elements in row-major order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the array and return its row-major buffer.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    fn row_range(&self, row: usize) -> Result<std::ops::Range<usize>, ArrayError> {
        if row >= self.shape.rows {
            return Err(reported(ArrayError::InvalidRow {
                row,
                rows: self.shape.rows,
            }));
        }
        let start = row * self.shape.cols;
        Ok(start..start + self.shape.cols)
    }

    /// Return the elements of row `row`.
    pub fn row(&self, row: usize) -> Result<&[T], ArrayError> {
        let range = self.row_range(row)?;
        Ok(&self.data[range])
    }

    pub fn row_mut(&mut self, row: usize) -> Result<&mut [T], ArrayError> {
        let range = self.row_range(row)?;
        Ok(&mut self.data[range])
    }

    /// Iterate over the rows of the array.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        let cols = self.shape.cols;
        (0..self.shape.rows).map(move |row| &self.data[row * cols..(row + 1) * cols])
    }

    /// Resolve a flat index, counting back from the end if negative.
    fn flat_offset(&self, index: isize) -> usize {
        if index < 0 {
            (index + self.data.len() as isize) as usize
        } else {
            index as usize
        }
    }

    /// Resolve a `(row, col)` index, wrapping negative values per axis.
    fn offset(&self, row: isize, col: isize) -> usize {
        let row = if row < 0 {
            row + self.shape.rows as isize
        } else {
            row
        };
        let col = if col < 0 {
            col + self.shape.cols as isize
        } else {
            col
        };
        (row * self.shape.cols as isize + col) as usize
    }

    /// Return the element at flat index `index`, or `None` if out of bounds.
    ///
    /// Negative indices count back from the end.
    pub fn get(&self, index: isize) -> Option<&T> {
        let len = self.data.len() as isize;
        if index < -len || index >= len {
            return None;
        }
        self.data.get(self.flat_offset(index))
    }

    pub fn get_mut(&mut self, index: isize) -> Option<&mut T> {
        let len = self.data.len() as isize;
        if index < -len || index >= len {
            return None;
        }
        let offset = self.flat_offset(index);
        self.data.get_mut(offset)
    }

    /// Return the element at `(row, col)`, or `None` if either index is out
    /// of bounds for its axis.
    pub fn get_at(&self, row: isize, col: isize) -> Option<&T> {
        let (rows, cols) = (self.shape.rows as isize, self.shape.cols as isize);
        if row < -rows || row >= rows || col < -cols || col >= cols {
            return None;
        }
        self.data.get(self.offset(row, col))
    }

    /// Return the element at `(row, col)` without any bounds checks.
    ///
    /// # Safety
    ///
    /// `row` must be less than `shape().rows` and `col` less than
    /// `shape().cols`.
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> &T {
        self.data.get_unchecked(row * self.shape.cols + col)
    }

    /// Return the single element of a one-element array.
    pub fn item(&self) -> Result<T, ArrayError>
    where
        T: Clone,
    {
        match self.data.as_slice() {
            [value] => Ok(value.clone()),
            _ => Err(reported(ArrayError::NotSingleElement(self.data.len()))),
        }
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    /// Set every element to zero.
    pub fn zeros_in_place(&mut self)
    where
        T: Clone + Default,
    {
        self.fill(T::default());
    }

    /// Set every element to NaN.
    pub fn nans(&mut self)
    where
        T: Clone + NaN,
    {
        self.fill(T::nan());
    }

    /// Change the shape of the array in place, keeping the row-major order of
    /// elements.
    ///
    /// Fails if the new shape has a different number of elements.
    pub fn reshape(&mut self, shape: impl Into<Shape>) -> Result<(), ArrayError> {
        let shape = shape.into();
        if shape.size() != self.data.len() {
            return Err(reported(ArrayError::Reshape {
                size: self.data.len(),
                shape,
            }));
        }
        self.shape = shape;
        Ok(())
    }

    /// Return a deep copy of this array.
    pub fn copy(&self) -> NdArray<T>
    where
        T: Clone,
    {
        self.clone()
    }

    /// Convert each element to type `U` using `as`-style casts.
    pub fn astype<U>(&self) -> NdArray<U>
    where
        T: Copy + Cast<U>,
    {
        self.map(|&x| x.cast())
    }

    /// Return a new array of the same shape with `f` applied to each element.
    pub fn map<U, F: Fn(&T) -> U>(&self, f: F) -> NdArray<U> {
        NdArray {
            shape: self.shape,
            endian: self.endian,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Return the flat indices of the nonzero elements, in row-major order.
    pub fn nonzero(&self) -> Vec<usize>
    where
        T: AsBool,
    {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, x)| x.as_bool().then_some(i))
            .collect()
    }

    /// Return a `1 x K` array of the elements selected by `slice` from the
    /// flattened array.
    pub fn slice(&self, slice: impl Into<Slice>) -> Result<NdArray<T>, SliceError>
    where
        T: Clone,
    {
        let mut slice = slice.into();
        slice.normalize(self.size()).map_err(reported)?;
        Ok(slice
            .indices()
            .map(|i| self[i as isize].clone())
            .collect())
    }

    /// Return a `1 x M` array of the elements where `mask` is nonzero.
    ///
    /// `mask` must have the same shape as this array.
    pub fn mask<M: AsBool>(&self, mask: &NdArray<M>) -> Result<NdArray<T>, ArrayError>
    where
        T: Clone,
    {
        if mask.shape() != self.shape {
            return Err(reported(ArrayError::ShapeMismatch {
                expected: self.shape,
                actual: mask.shape(),
            }));
        }
        Ok(mask
            .nonzero()
            .into_iter()
            .map(|i| self.data[i].clone())
            .collect())
    }

    /// Return a new array containing the rows selected by `rows` and the
    /// columns selected by `cols`.
    ///
    /// Each argument can be a [`Slice`], a range, `..` for the whole axis or
    /// a scalar index. A scalar index keeps its axis with size 1.
    pub fn slice_axes(
        &self,
        rows: impl Into<SliceItem>,
        cols: impl Into<SliceItem>,
    ) -> Result<NdArray<T>, SliceError>
    where
        T: Clone,
    {
        let row_slice = rows.into().resolve(self.shape.rows).map_err(reported)?;
        let col_slice = cols.into().resolve(self.shape.cols).map_err(reported)?;

        let n_rows = row_slice.indices().count();
        let n_cols = col_slice.indices().count();
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in row_slice.indices() {
            for col in col_slice.indices() {
                data.push(self.data[row * self.shape.cols + col].clone());
            }
        }

        Ok(NdArray {
            shape: Shape::new(n_rows, n_cols),
            endian: self.endian,
            data,
        })
    }
}

impl<T> Index<isize> for NdArray<T> {
    type Output = T;

    /// Return the element at a flat index. Negative indices wrap once.
    ///
    /// Panics if the resolved offset is outside the buffer.
    fn index(&self, index: isize) -> &T {
        &self.data[self.flat_offset(index)]
    }
}

impl<T> IndexMut<isize> for NdArray<T> {
    fn index_mut(&mut self, index: isize) -> &mut T {
        let offset = self.flat_offset(index);
        &mut self.data[offset]
    }
}

impl<T> Index<(isize, isize)> for NdArray<T> {
    type Output = T;

    /// Return the element at `(row, col)`. Negative indices wrap once per
    /// axis. Individual axes are not bounds checked.
    ///
    /// Panics if the resolved offset is outside the buffer.
    fn index(&self, (row, col): (isize, isize)) -> &T {
        &self.data[self.offset(row, col)]
    }
}

impl<T> IndexMut<(isize, isize)> for NdArray<T> {
    fn index_mut(&mut self, (row, col): (isize, isize)) -> &mut T {
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }
}

impl<T: PartialEq> PartialEq for NdArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.data == other.data
    }
}

/// Trait for scalar (ie. non-array) element types.
///
/// This is used to prevent generic types from being inferred as array types
/// in [`NdArray::from`], and to distinguish scalar operands from array
/// operands in arithmetic.
pub trait Scalar {}

macro_rules! impl_scalar {
    ($($ty:ty),*) => {
        $(impl Scalar for $ty {})*
    };
}
impl_scalar!(bool, u8, i8, u16, i16, u32, i32, u64, i64, usize, isize, f32, f64);

impl<T: Clone + Scalar, const N: usize> From<[T; N]> for NdArray<T> {
    /// Construct a `1 x N` array from an array literal.
    fn from(value: [T; N]) -> Self {
        NdArray::from_vec(value.to_vec())
    }
}

impl<T: Clone + Scalar, const R: usize, const C: usize> From<[[T; C]; R]> for NdArray<T> {
    /// Construct an `R x C` array from a nested array literal.
    fn from(value: [[T; C]; R]) -> Self {
        let data: Vec<T> = value.iter().flat_map(|row| row.iter()).cloned().collect();
        NdArray {
            shape: Shape::new(R, C),
            endian: Endian::Native,
            data,
        }
    }
}

impl<T> From<Vec<T>> for NdArray<T> {
    fn from(value: Vec<T>) -> Self {
        NdArray::from_vec(value)
    }
}

impl<T: Clone> From<&[T]> for NdArray<T> {
    fn from(value: &[T]) -> Self {
        NdArray::from_slice(value)
    }
}

impl<T> From<VecDeque<T>> for NdArray<T> {
    fn from(value: VecDeque<T>) -> Self {
        NdArray::from_vec(value.into())
    }
}

impl<T> From<BTreeSet<T>> for NdArray<T> {
    /// Construct a `1 x N` array from the set's elements in sorted order.
    fn from(value: BTreeSet<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<T> FromIterator<T> for NdArray<T> {
    /// Collect an iterator into a `1 x N` array.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        NdArray::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a NdArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> IntoIterator for NdArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
