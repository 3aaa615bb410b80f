use std::fmt;
use std::iter::StepBy;
use std::ops::{Range, RangeFull};

use crate::errors::SliceError;

/// A `start:stop:step` range for slicing one axis of an
/// [`NdArray`](crate::NdArray).
///
/// `stop` is exclusive. Negative `start` and `stop` values count back from the
/// end of the axis, as in NumPy. A slice must be normalized against a concrete
/// axis length before its indices can be walked, see [`Slice::normalize`].
///
/// Unlike NumPy, out of range endpoints are rejected rather than clamped, and
/// a range whose endpoints are reversed relative to the step is traversed
/// forwards after normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slice {
    pub start: isize,

    /// Exclusive end of the range.
    pub stop: isize,

    pub step: isize,
}

impl Default for Slice {
    fn default() -> Slice {
        Slice {
            start: 0,
            stop: 1,
            step: 1,
        }
    }
}

impl Slice {
    pub fn new(start: isize, stop: isize, step: isize) -> Slice {
        Slice { start, stop, step }
    }

    /// Create a slice from `start` to `stop` with a step of 1.
    pub fn range(start: isize, stop: isize) -> Slice {
        Slice::new(start, stop, 1)
    }

    /// Create a slice from the start of the axis up to `stop`.
    pub fn to(stop: isize) -> Slice {
        Slice::new(0, stop, 1)
    }

    /// Resolve negative endpoints against an axis of length `len` and check
    /// that the result is a valid forward range.
    ///
    /// This modifies the slice in place. If `stop < start` and `step < 0`, the
    /// endpoints are swapped and the step negated, so that a normalized slice
    /// is always walked in increasing index order.
    pub fn normalize(&mut self, len: usize) -> Result<(), SliceError> {
        let ilen = len as isize;

        if self.start < 0 {
            self.start += ilen;
        }
        if self.start < 0 || self.start > ilen - 1 {
            return Err(SliceError::InvalidStart {
                start: self.start,
                len,
            });
        }

        if self.stop < 0 {
            self.stop += ilen;
        }
        if self.stop < 0 || self.stop > ilen {
            return Err(SliceError::InvalidStop {
                stop: self.stop,
                len,
            });
        }

        if self.step == 0 {
            return Err(SliceError::InvalidStep);
        }

        let invalid_range = SliceError::InvalidRange {
            start: self.start,
            stop: self.stop,
            step: self.step,
        };
        if self.start < self.stop && self.step < 0 {
            return Err(invalid_range);
        }
        if self.stop < self.start {
            if self.step > 0 {
                return Err(invalid_range);
            }
            self.step = self.step.checked_neg().ok_or(SliceError::InvalidStep)?;
            std::mem::swap(&mut self.start, &mut self.stop);
        }

        Ok(())
    }

    /// Normalize the slice for an axis of length `len` and return the number
    /// of indices it selects.
    ///
    /// Be aware that this modifies the slice, as with [`Slice::normalize`].
    pub fn num_elements(&mut self, len: usize) -> Result<usize, SliceError> {
        self.normalize(len)?;
        Ok(self.indices().count())
    }

    /// Return the indices visited by this slice.
    ///
    /// This assumes the slice has been normalized. Non-normalized slices which
    /// do not describe a forward range yield no indices.
    pub fn indices(&self) -> StepBy<Range<usize>> {
        if self.start < 0 || self.stop <= self.start || self.step <= 0 {
            return (0..0).step_by(1);
        }
        (self.start as usize..self.stop as usize).step_by(self.step as usize)
    }
}

impl From<Range<isize>> for Slice {
    fn from(r: Range<isize>) -> Slice {
        Slice::range(r.start, r.end)
    }
}

impl From<Range<i32>> for Slice {
    fn from(r: Range<i32>) -> Slice {
        Slice::range(r.start as isize, r.end as isize)
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}:{}:{}]", self.start, self.stop, self.step)
    }
}

/// Selects part of one axis in [`NdArray::slice_axes`](crate::NdArray::slice_axes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceItem {
    /// Select a single index. Negative values count back from the end of the
    /// axis. The axis is kept with size 1.
    Index(isize),

    /// Select a range of indices.
    Range(Slice),

    /// Select the whole axis.
    Full,
}

impl SliceItem {
    /// Resolve this item into a normalized slice for an axis of length `len`.
    pub fn resolve(&self, len: usize) -> Result<Slice, SliceError> {
        match *self {
            SliceItem::Index(index) => {
                let wrapped = if index < 0 { index + len as isize } else { index };
                if wrapped < 0 || wrapped >= len as isize {
                    return Err(SliceError::InvalidIndex { index, len });
                }
                Ok(Slice::range(wrapped, wrapped + 1))
            }
            SliceItem::Range(mut slice) => {
                slice.normalize(len)?;
                Ok(slice)
            }
            SliceItem::Full => Ok(Slice::range(0, len as isize)),
        }
    }
}

// Conversions exist for both `i32` and `isize` so that untyped integer
// literals resolve to the `i32` impl.
impl From<i32> for SliceItem {
    fn from(index: i32) -> SliceItem {
        SliceItem::Index(index as isize)
    }
}

impl From<isize> for SliceItem {
    fn from(index: isize) -> SliceItem {
        SliceItem::Index(index)
    }
}

impl From<usize> for SliceItem {
    fn from(index: usize) -> SliceItem {
        SliceItem::Index(index as isize)
    }
}

impl From<Slice> for SliceItem {
    fn from(slice: Slice) -> SliceItem {
        SliceItem::Range(slice)
    }
}

impl From<Range<i32>> for SliceItem {
    fn from(r: Range<i32>) -> SliceItem {
        SliceItem::Range(r.into())
    }
}

impl From<Range<isize>> for SliceItem {
    fn from(r: Range<isize>) -> SliceItem {
        SliceItem::Range(r.into())
    }
}

impl From<RangeFull> for SliceItem {
    fn from(_: RangeFull) -> SliceItem {
        SliceItem::Full
    }
}

#[cfg(test)]
mod tests {
    use ndmat_testing::TestCases;

    use super::{Slice, SliceItem};
    use crate::errors::SliceError;

    #[test]
    fn test_negative_endpoints() {
        let mut slice = Slice::range(-2, -1);
        assert_eq!(slice.num_elements(5), Ok(1));
        assert_eq!(slice, Slice::new(3, 4, 1));
    }

    #[test]
    fn test_num_elements() {
        #[derive(Debug)]
        struct Case {
            slice: Slice,
            len: usize,
            expected: Result<usize, SliceError>,
            indices: Vec<usize>,
        }

        let cases = [
            Case {
                slice: Slice::range(0, 4),
                len: 6,
                expected: Ok(4),
                indices: vec![0, 1, 2, 3],
            },
            Case {
                slice: Slice::new(0, 5, 2),
                len: 5,
                expected: Ok(3),
                indices: vec![0, 2, 4],
            },
            Case {
                slice: Slice::new(1, 6, 4),
                len: 6,
                expected: Ok(2),
                indices: vec![1, 5],
            },
            // Empty range
            Case {
                slice: Slice::range(2, 2),
                len: 4,
                expected: Ok(0),
                indices: vec![],
            },
            // Reversed endpoints with a negative step are walked forwards.
            Case {
                slice: Slice::new(4, 1, -1),
                len: 5,
                expected: Ok(3),
                indices: vec![1, 2, 3],
            },
            Case {
                slice: Slice::new(-1, 0, -2),
                len: 5,
                expected: Ok(2),
                indices: vec![0, 2],
            },
            // Default slice selects the first element.
            Case {
                slice: Slice::default(),
                len: 3,
                expected: Ok(1),
                indices: vec![0],
            },
        ];

        cases.test_each(|case| {
            let mut slice = case.slice;
            assert_eq!(slice.num_elements(case.len), case.expected);
            let indices: Vec<_> = slice.indices().collect();
            assert_eq!(indices, case.indices);
        })
    }

    #[test]
    fn test_invalid_slices() {
        #[derive(Debug)]
        struct Case {
            slice: Slice,
            len: usize,
            expected: SliceError,
        }

        let cases = [
            Case {
                slice: Slice::range(5, 6),
                len: 5,
                expected: SliceError::InvalidStart { start: 5, len: 5 },
            },
            Case {
                slice: Slice::range(-7, 2),
                len: 5,
                expected: SliceError::InvalidStart { start: -2, len: 5 },
            },
            Case {
                slice: Slice::range(0, 6),
                len: 5,
                expected: SliceError::InvalidStop { stop: 6, len: 5 },
            },
            Case {
                slice: Slice::new(0, 3, -1),
                len: 5,
                expected: SliceError::InvalidRange {
                    start: 0,
                    stop: 3,
                    step: -1,
                },
            },
            Case {
                slice: Slice::new(3, 0, 1),
                len: 5,
                expected: SliceError::InvalidRange {
                    start: 3,
                    stop: 0,
                    step: 1,
                },
            },
            // The step cannot be negated when normalizing.
            Case {
                slice: Slice::new(4, 1, isize::MIN),
                len: 5,
                expected: SliceError::InvalidStep,
            },
            Case {
                slice: Slice::new(0, 3, 0),
                len: 5,
                expected: SliceError::InvalidStep,
            },
            // Every slice is invalid for an empty axis.
            Case {
                slice: Slice::range(0, 0),
                len: 0,
                expected: SliceError::InvalidStart { start: 0, len: 0 },
            },
        ];

        cases.test_each(|case| {
            let mut slice = case.slice;
            assert_eq!(slice.num_elements(case.len), Err(case.expected.clone()));
        })
    }

    #[test]
    fn test_slice_item_resolve() {
        assert_eq!(SliceItem::from(-1).resolve(4), Ok(Slice::range(3, 4)));
        assert_eq!(
            SliceItem::from(4).resolve(4),
            Err(SliceError::InvalidIndex { index: 4, len: 4 })
        );
        assert_eq!(SliceItem::from(..).resolve(3), Ok(Slice::range(0, 3)));
        assert_eq!(SliceItem::from(1..3).resolve(3), Ok(Slice::range(1, 3)));
        assert_eq!(
            SliceItem::from(Slice::new(-1, 0, -1)).resolve(3),
            Ok(Slice::new(0, 2, 1))
        );
    }

    #[test]
    fn test_slice_display() {
        assert_eq!(Slice::new(1, 5, 2).to_string(), "[1:5:2]\n");
    }
}
