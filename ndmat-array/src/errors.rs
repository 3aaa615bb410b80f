//! Error types that are reported by various array operations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::Shape;

/// Errors that can occur when resolving a [`Slice`](crate::Slice) or
/// [`SliceItem`](crate::SliceItem) against an axis.
#[derive(Clone, Debug, PartialEq)]
pub enum SliceError {
    /// The start index is outside `[0, len - 1]` after wrapping negative
    /// values.
    InvalidStart { start: isize, len: usize },

    /// The stop index is outside `[0, len]` after wrapping negative values.
    InvalidStop { stop: isize, len: usize },

    /// The ordering of start and stop disagrees with the sign of the step.
    InvalidRange { start: isize, stop: isize, step: isize },

    /// The step is zero.
    InvalidStep,

    /// A scalar index is out of bounds for the axis.
    InvalidIndex { index: isize, len: usize },
}

impl Display for SliceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SliceError::InvalidStart { start, len } => {
                write!(f, "invalid start value {} for array of size {}", start, len)
            }
            SliceError::InvalidStop { stop, len } => {
                write!(f, "invalid stop value {} for array of size {}", stop, len)
            }
            SliceError::InvalidRange { start, stop, step } => {
                write!(f, "invalid slice values [{}:{}:{}]", start, stop, step)
            }
            SliceError::InvalidStep => write!(f, "slice step cannot be 0"),
            SliceError::InvalidIndex { index, len } => {
                write!(f, "index {} is out of bounds for axis of size {}", index, len)
            }
        }
    }
}

impl Error for SliceError {}

/// Errors reported by [`NdArray`](crate::NdArray) construction and
/// operations.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayError {
    /// Operands of an elementwise operation, or a mask and the array it
    /// indexes, have different shapes.
    ShapeMismatch { expected: Shape, actual: Shape },

    /// The operand shapes are not compatible for a matrix or vector product.
    IncompatibleShapes(Shape, Shape),

    /// Rows of a nested literal do not all have the same length.
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A reshape was requested to a shape with a different element count.
    Reshape { size: usize, shape: Shape },

    /// A scalar was requested from an array that does not have exactly one
    /// element.
    NotSingleElement(usize),

    /// A value reduction (eg. max, argmin) was applied to an empty group.
    EmptyReduction,

    /// A row index passed to a row accessor is out of bounds.
    InvalidRow { row: usize, rows: usize },

    /// The start, stop and step arguments of an arithmetic sequence are
    /// inconsistent.
    InvalidArange,

    /// Slicing failed.
    Slice(SliceError),
}

fn write_shape(f: &mut Formatter<'_>, shape: &Shape) -> std::fmt::Result {
    write!(f, "[{}, {}]", shape.rows, shape.cols)
}

impl Display for ArrayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ArrayError::ShapeMismatch { expected, actual } => {
                write!(f, "expected array of shape ")?;
                write_shape(f, expected)?;
                write!(f, " but got shape ")?;
                write_shape(f, actual)
            }
            ArrayError::IncompatibleShapes(lhs, rhs) => {
                write!(f, "array shapes of ")?;
                write_shape(f, lhs)?;
                write!(f, " and ")?;
                write_shape(f, rhs)?;
                write!(f, " are not consistent")
            }
            ArrayError::RaggedRows {
                row,
                expected,
                actual,
            } => write!(
                f,
                "all rows need the same number of elements, row {} has {} instead of {}",
                row, actual, expected
            ),
            ArrayError::Reshape { size, shape } => {
                write!(f, "cannot reshape array of size {} into shape ", size)?;
                write_shape(f, shape)
            }
            ArrayError::NotSingleElement(size) => write!(
                f,
                "can only convert an array of size 1 to a scalar, array has size {}",
                size
            ),
            ArrayError::EmptyReduction => write!(f, "cannot reduce an empty sequence"),
            ArrayError::InvalidRow { row, rows } => {
                write!(f, "row {} is out of bounds for array with {} rows", row, rows)
            }
            ArrayError::InvalidArange => {
                write!(f, "step direction does not lead from start to stop")
            }
            ArrayError::Slice(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ArrayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ArrayError::Slice(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SliceError> for ArrayError {
    fn from(err: SliceError) -> ArrayError {
        ArrayError::Slice(err)
    }
}

/// Log a validation failure before handing it back to the caller.
pub(crate) fn reported<E: Display>(err: E) -> E {
    log::debug!("{}", err);
    err
}
