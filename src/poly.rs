//! One dimensional polynomials.

use std::error::Error;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use ndmat_array::NdArray;
use ndmat_base::num::Identities;

/// Maximum number of values a polynomial can be created from.
pub const MAX_ORDER: usize = u8::MAX as usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolyError {
    /// More than [`MAX_ORDER`] coefficients or roots were supplied.
    OrderTooLarge(usize),
}

impl fmt::Display for PolyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolyError::OrderTooLarge(len) => write!(
                f,
                "can only make a polynomial of order {}, got {} values",
                MAX_ORDER, len
            ),
        }
    }
}

impl Error for PolyError {}

/// A polynomial in one variable, `c0 + c1 x + c2 x^2 + ...`.
///
/// Coefficients are stored in order of ascending power.
#[derive(Clone, Debug, PartialEq)]
pub struct Poly1d<T> {
    coefficients: Vec<T>,
}

impl<T> Default for Poly1d<T> {
    /// Return a polynomial with no coefficients, which evaluates to zero.
    fn default() -> Self {
        Poly1d {
            coefficients: Vec::new(),
        }
    }
}

fn check_len(len: usize) -> Result<(), PolyError> {
    if len > MAX_ORDER {
        let err = PolyError::OrderTooLarge(len);
        log::debug!("{}", err);
        return Err(err);
    }
    Ok(())
}

impl<T: Copy> Poly1d<T> {
    /// Create a polynomial from coefficients in order of ascending power.
    pub fn new(coefficients: &NdArray<T>) -> Result<Poly1d<T>, PolyError> {
        check_len(coefficients.size())?;
        Ok(Poly1d {
            coefficients: coefficients.data().to_vec(),
        })
    }

    /// Create the monic polynomial `(x - r0)(x - r1)...` with the given roots.
    ///
    /// ```
    /// use ndmat::poly::Poly1d;
    /// use ndmat::NdArray;
    ///
    /// let p = Poly1d::from_roots(&NdArray::from([1, 2])).unwrap();
    /// assert_eq!(p.coefficients(), NdArray::from([2, -3, 1]));
    /// ```
    pub fn from_roots(roots: &NdArray<T>) -> Result<Poly1d<T>, PolyError>
    where
        T: Identities + Add<Output = T> + Mul<Output = T> + Neg<Output = T>,
    {
        check_len(roots.size())?;
        let mut poly = Poly1d {
            coefficients: vec![T::one()],
        };
        for &root in roots.iter() {
            let factor = Poly1d {
                coefficients: vec![-root, T::one()],
            };
            poly = &poly * &factor;
        }
        Ok(poly)
    }

    /// Return the coefficients as a `1 x N` array, lowest power first.
    pub fn coefficients(&self) -> NdArray<T> {
        NdArray::from_slice(&self.coefficients)
    }

    /// Return the highest power with a stored coefficient.
    ///
    /// Zero leading coefficients are not trimmed, so this is one less than
    /// the number of coefficients.
    pub fn order(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluate the polynomial at `x`.
    pub fn eval(&self, x: T) -> T
    where
        T: Identities + Add<Output = T> + Mul<Output = T>,
    {
        self.coefficients
            .iter()
            .rev()
            .fold(T::zero(), |acc, &c| acc * x + c)
    }

    /// Raise the polynomial to a non-negative integer power.
    pub fn pow(&self, power: u32) -> Poly1d<T>
    where
        T: Identities + Add<Output = T> + Mul<Output = T>,
    {
        let mut result = Poly1d {
            coefficients: vec![T::one()],
        };
        for _ in 0..power {
            result = &result * self;
        }
        result
    }

    /// Raise the polynomial to a non-negative integer power in place.
    pub fn pow_assign(&mut self, power: u32)
    where
        T: Identities + Add<Output = T> + Mul<Output = T>,
    {
        *self = self.pow(power);
    }

    /// Combine coefficients of equal power, padding the shorter polynomial
    /// with zeros.
    fn zip_with(&self, other: &Poly1d<T>, f: impl Fn(T, T) -> T) -> Poly1d<T>
    where
        T: Identities,
    {
        let len = self.coefficients.len().max(other.coefficients.len());
        let coeff = |p: &Poly1d<T>, i: usize| p.coefficients.get(i).copied().unwrap_or(T::zero());
        Poly1d {
            coefficients: (0..len).map(|i| f(coeff(self, i), coeff(other, i))).collect(),
        }
    }
}

impl<T: Copy + Identities + Add<Output = T>> Add for &Poly1d<T> {
    type Output = Poly1d<T>;

    fn add(self, rhs: Self) -> Poly1d<T> {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<T: Copy + Identities + Sub<Output = T>> Sub for &Poly1d<T> {
    type Output = Poly1d<T>;

    fn sub(self, rhs: Self) -> Poly1d<T> {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl<T: Copy + Identities + Add<Output = T> + Mul<Output = T>> Mul for &Poly1d<T> {
    type Output = Poly1d<T>;

    fn mul(self, rhs: Self) -> Poly1d<T> {
        let (a, b) = (&self.coefficients, &rhs.coefficients);
        if a.is_empty() || b.is_empty() {
            return Poly1d::default();
        }

        let mut coefficients = vec![T::zero(); a.len() + b.len() - 1];
        for (i, &x) in a.iter().enumerate() {
            for (j, &y) in b.iter().enumerate() {
                coefficients[i + j] = coefficients[i + j] + x * y;
            }
        }
        Poly1d { coefficients }
    }
}

macro_rules! impl_owned_op {
    ($trait:ident, $fn:ident, $($bound:tt)*) => {
        impl<T: Copy + Identities + $($bound)*> $trait for Poly1d<T> {
            type Output = Poly1d<T>;

            fn $fn(self, rhs: Poly1d<T>) -> Poly1d<T> {
                (&self).$fn(&rhs)
            }
        }
    };
}

impl_owned_op!(Add, add, Add<Output = T>);
impl_owned_op!(Sub, sub, Sub<Output = T>);
impl_owned_op!(Mul, mul, Add<Output = T> + Mul<Output = T>);

macro_rules! impl_assign_op {
    ($trait:ident, $fn:ident, $op_fn:ident, $($bound:tt)*) => {
        impl<T: Copy + Identities + $($bound)*> $trait<&Poly1d<T>> for Poly1d<T> {
            fn $fn(&mut self, rhs: &Poly1d<T>) {
                *self = (&*self).$op_fn(rhs);
            }
        }

        impl<T: Copy + Identities + $($bound)*> $trait for Poly1d<T> {
            fn $fn(&mut self, rhs: Poly1d<T>) {
                $trait::$fn(self, &rhs);
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, add, Add<Output = T>);
impl_assign_op!(SubAssign, sub_assign, sub, Sub<Output = T>);
impl_assign_op!(MulAssign, mul_assign, mul, Add<Output = T> + Mul<Output = T>);

impl<T: fmt::Display> fmt::Display for Poly1d<T> {
    /// Render as `c0 x^0 + c1 x^1 + ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (power, c) in self.coefficients.iter().enumerate() {
            if power > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{} x^{}", c, power)?;
        }
        Ok(())
    }
}
