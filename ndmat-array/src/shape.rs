use std::fmt;

/// Row and column extents of an [`NdArray`](crate::NdArray).
///
/// Rank-1 data is represented as a single row (`1 x N`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Shape {
        Shape { rows, cols }
    }

    /// Shape of a square matrix of order `size`.
    pub fn square(size: usize) -> Shape {
        Shape::new(size, size)
    }

    /// Return the number of elements, `rows * cols`.
    pub fn size(&self) -> usize {
        self.rows * self.cols
    }

    /// Return true if this is the default `[0, 0]` shape.
    pub fn is_null(&self) -> bool {
        self.rows == 0 && self.cols == 0
    }

    /// Return true if either dimension is 1.
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Return the shape with rows and columns swapped.
    pub fn transposed(&self) -> Shape {
        Shape::new(self.cols, self.rows)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Shape {
        Shape::new(rows, cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}, {}]", self.rows, self.cols)
    }
}
