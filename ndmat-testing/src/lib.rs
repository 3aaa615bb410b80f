//! Internal testing utilities for the ndmat crates.

use std::fmt::Debug;
use std::panic::{RefUnwindSafe, UnwindSafe};

/// Runs a table of test cases, collecting failures instead of stopping at the
/// first one.
///
/// Declare a `Case` struct deriving `Debug`, build an array or `Vec` of cases
/// and call `test_each` with the assertion body. Every case is run inside
/// [`catch_unwind`](std::panic::catch_unwind). When one or more cases panic,
/// the final panic message lists how many failed along with their debug
/// representation, so a single run reports every broken row of the table.
///
/// ```
/// use ndmat_testing::TestCases;
///
/// #[derive(Debug)]
/// struct Case {
///     rows: usize,
///     cols: usize,
///     size: usize,
/// }
///
/// let cases = [
///     Case { rows: 2, cols: 3, size: 6 },
///     Case { rows: 0, cols: 4, size: 0 },
/// ];
///
/// cases.test_each(|case| {
///     assert_eq!(case.rows * case.cols, case.size);
/// });
/// ```
///
/// Cases and the test closure must be unwind safe. Wrap offending values in
/// [`AssertUnwindSafe`](std::panic::AssertUnwindSafe), or construct them
/// inside the closure, if they are not.
pub trait TestCases {
    /// The data for a single test case.
    type Case;

    /// Call `test` with a reference to each case.
    fn test_each(self, test: impl Fn(&Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe;

    /// Call `test` with each case by value.
    ///
    /// The debug representation of each case is captured before the call so
    /// that it can still be reported if the case is consumed by a failing
    /// test.
    fn test_each_value(self, test: impl Fn(Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe;
}

fn report_failures<D: Debug>(failures: &[D]) {
    assert!(
        failures.is_empty(),
        "{} test cases failed: {:?}",
        failures.len(),
        failures
    );
}

impl<I: IntoIterator> TestCases for I {
    type Case = I::Item;

    fn test_each(self, test: impl Fn(&I::Item) + RefUnwindSafe)
    where
        I::Item: Debug + RefUnwindSafe,
    {
        let failures: Vec<I::Item> = self
            .into_iter()
            .filter(|case| std::panic::catch_unwind(|| test(case)).is_err())
            .collect();
        report_failures(&failures);
    }

    fn test_each_value(self, test: impl Fn(I::Item) + RefUnwindSafe)
    where
        I::Item: Debug + UnwindSafe,
    {
        let mut failures = Vec::new();
        for case in self {
            let desc = format!("{:?}", case);
            let test = &test;
            if std::panic::catch_unwind(move || test(case)).is_err() {
                failures.push(desc);
            }
        }
        report_failures(&failures);
    }
}
