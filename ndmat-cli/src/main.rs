use std::error::Error;
use std::ffi::OsString;

use ndmat::linalg::{det, inv};
use ndmat::{Axis, NdArray, RandomSource, Shape};

#[derive(Debug, Default, PartialEq)]
struct Args {
    /// Order of a random matrix to invert after the demo.
    order: Option<usize>,

    /// Seed for the random matrix.
    seed: Option<u64>,

    /// Enable debug logging.
    verbose: bool,
}

fn parse_args<I>(args: I) -> Result<Args, lexopt::Error>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    use lexopt::prelude::*;

    let mut parsed = Args::default();

    let mut parser = lexopt::Parser::from_args(args);
    while let Some(arg) = parser.next()? {
        match arg {
            Short('n') | Long("order") => parsed.order = Some(parser.value()?.parse()?),
            Short('s') | Long("seed") => parsed.seed = Some(parser.value()?.parse()?),
            Short('v') | Long("verbose") => parsed.verbose = true,
            Short('h') | Long("help") => {
                println!(
                    "Demonstrate ndmat array operations.

Usage: ndmat [OPTIONS]

  -n, --order <N>  Also compute the determinant and inverse of a random N x N matrix
  -s, --seed <N>   Seed for the random matrix
  -v, --verbose    Enable debug logging
  -h, --help       Print help
"
                );
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(parsed)
}

/// Source for [`NdArray::rand`] that generates floats in `[0, 1)`.
struct FloatRng {
    rng: fastrand::Rng,
}

impl FloatRng {
    fn new(seed: Option<u64>) -> FloatRng {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        FloatRng { rng }
    }
}

impl RandomSource<f64> for FloatRng {
    fn next(&mut self) -> f64 {
        self.rng.f64()
    }
}

fn demo() -> Result<(), Box<dyn Error>> {
    let a1 = NdArray::from([[1, 1], [1, 2], [1, 3]]);
    println!("a1 + 1 =\n{}", &a1 + 1);
    println!("a1 * 2 =\n{}", &a1 * 2);
    println!("max(a1, row) =\n{}", a1.max(Axis::Row)?);
    println!("min(a1, col) =\n{}", a1.min(Axis::Col)?);
    println!("argmax(a1) =\n{}", a1.argmax(Axis::None)?);
    println!("argmin(a1) =\n{}", a1.argmin(Axis::None)?);

    let a3 = NdArray::from([[1, 1], [1, 1]]);
    let a4 = a3.copy();
    println!("a3 * a4 =\n{}", a3.try_mul(&a4)?);
    println!("a3 + a4 =\n{}", a3.try_add(&a4)?);
    println!("dot(a3, a4) =\n{}", a3.dot(&a4)?);
    println!("copy(a3) =\n{}", a4);

    let b1 = NdArray::from([[1, 2], [3, 4]]);
    println!("det(b1) = {}\n", det(&b1)?);

    // This matrix is singular, so the inverse contains non-finite values
    // unless pivot checks are enabled.
    let b3 = NdArray::from([[1, 1, 1], [2, 2, 2], [3, 3, 3]]);
    match inv(&b3) {
        Ok(b3_inv) => println!("inv(b3) =\n{}", b3_inv),
        Err(err) => println!("inv(b3) failed: {}\n", err),
    }

    Ok(())
}

fn random_inverse(order: usize, seed: Option<u64>) -> Result<(), Box<dyn Error>> {
    let mut rng = FloatRng::new(seed);
    let a: NdArray<f64> = NdArray::rand(Shape::square(order), &mut rng);
    println!("a =\n{}", a);
    println!("det(a) = {}\n", det(&a)?);

    let a_inv = inv(&a)?;
    println!("inv(a) =\n{}", a_inv);
    println!("a . inv(a) =\n{}", a.dot(&a_inv)?);
    Ok(())
}

/// Demo program which prints the results of common array operations.
///
/// ```text
/// cargo run -p ndmat-cli -- --order 4
/// ```
///
/// Set `RUST_LOG=debug` or pass `--verbose` to log validation failures.
fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args(std::env::args_os().skip(1))?;

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    demo()?;

    if let Some(order) = args.order {
        log::info!("inverting random matrix of order {}", order);
        random_inverse(order, args.seed)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use ndmat_testing::TestCases;

    use super::{parse_args, random_inverse, Args};

    #[test]
    fn test_parse_args() {
        #[derive(Debug)]
        struct Case<'a> {
            args: &'a [&'a str],
            expected: Result<Args, String>,
        }

        let cases = [
            Case {
                args: &[],
                expected: Ok(Args::default()),
            },
            Case {
                args: &["-v", "--order", "4"],
                expected: Ok(Args {
                    order: Some(4),
                    seed: None,
                    verbose: true,
                }),
            },
            Case {
                args: &["-n3", "--seed=42"],
                expected: Ok(Args {
                    order: Some(3),
                    seed: Some(42),
                    verbose: false,
                }),
            },
            Case {
                args: &["--order", "many"],
                expected: Err("\"many\"".into()),
            },
            Case {
                args: &["extra"],
                expected: Err("unexpected argument".into()),
            },
        ];

        cases.test_each(|case| {
            let result = parse_args(case.args.iter().copied()).map_err(|e| e.to_string());
            match (&result, &case.expected) {
                (Ok(actual), Ok(expected)) => assert_eq!(actual, expected),
                (Err(actual), Err(expected)) => assert!(
                    actual.contains(expected.as_str()),
                    "expected \"{}\" to contain \"{}\"",
                    actual,
                    expected
                ),
                _ => panic!("expected {:?}, got {:?}", case.expected, result),
            }
        })
    }

    #[test]
    fn test_random_inverse() {
        random_inverse(3, Some(1234)).unwrap();
    }
}
