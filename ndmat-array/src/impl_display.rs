use std::fmt::{Display, Error, Formatter};

use crate::NdArray;

/// Configuration for text rendering of an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Maximum number of columns to print before eliding.
    pub max_columns: usize,

    /// Maximum number of rows to print before eliding.
    pub max_rows: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            max_columns: usize::MAX,
            max_rows: usize::MAX,
        }
    }
}

/// A [`Display`]-implementing wrapper around an array reference with custom
/// formatting options.
///
/// Created by [`NdArray::display_with`].
pub struct FormatArray<'a, T> {
    array: &'a NdArray<T>,
    opts: FormatOptions,
}

impl<T: Display> FormatArray<'_, T> {
    /// Format one row as `[v0, v1, ...]`, eliding the middle of long rows.
    fn write_row(&self, f: &mut Formatter<'_>, row: &[T]) -> Result<(), Error> {
        let max_columns = self.opts.max_columns;
        let head = if row.len() > max_columns {
            max_columns / 2
        } else {
            row.len()
        };
        let tail = if row.len() > max_columns {
            row.len() - (max_columns - head)
        } else {
            row.len()
        };

        write!(f, "[")?;
        for (i, value) in row[..head].iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        if row.len() > max_columns {
            if head > 0 {
                write!(f, ", ")?;
            }
            write!(f, "...")?;
            for value in &row[tail..] {
                write!(f, ", {}", value)?;
            }
        }
        write!(f, "]")
    }
}

impl<T: Display> Display for FormatArray<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let n_rows = self.array.shape().rows;
        let shown = n_rows.min(self.opts.max_rows);

        write!(f, "[")?;
        for (i, row) in self.array.rows().take(shown).enumerate() {
            self.write_row(f, row)?;
            if i + 1 < shown {
                writeln!(f)?;
            }
        }
        if n_rows > shown {
            write!(f, "\n...")?;
        }
        writeln!(f, "]")
    }
}

impl<T> NdArray<T> {
    /// Return a wrapper which renders this array using `opts`.
    ///
    /// ```
    /// use ndmat_array::{FormatOptions, NdArray};
    ///
    /// let x = NdArray::from([[1, 2, 3, 4, 5, 6]]);
    /// let opts = FormatOptions {
    ///     max_columns: 4,
    ///     ..Default::default()
    /// };
    /// assert_eq!(x.display_with(opts).to_string(), "[[1, 2, ..., 5, 6]]\n");
    /// ```
    pub fn display_with(&self, opts: FormatOptions) -> FormatArray<'_, T> {
        FormatArray { array: self, opts }
    }
}

impl<T: Display> Display for NdArray<T> {
    /// Render the array as bracketed rows, eg. `[[1, 2]\n[3, 4]]\n`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.display_with(FormatOptions::default()))
    }
}
