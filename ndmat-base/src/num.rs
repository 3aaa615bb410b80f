//! Numeric traits and functions.

/// Trait for number -> bool conversions.
///
/// The conversion matches how these conversions work in most popular languages
/// where zero is treated as false and other values coerce to true.
pub trait AsBool {
    fn as_bool(&self) -> bool;
}

impl AsBool for bool {
    fn as_bool(&self) -> bool {
        *self
    }
}

macro_rules! impl_as_bool_int {
    ($($type:ty),*) => {
        $(
            impl AsBool for $type {
                fn as_bool(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

macro_rules! impl_as_bool_float {
    ($($type:ty),*) => {
        $(
            impl AsBool for $type {
                // NaN compares unequal to zero, so it counts as true.
                fn as_bool(&self) -> bool {
                    *self != 0.
                }
            }
        )*
    };
}

impl_as_bool_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_as_bool_float!(f32, f64);

/// Trait providing additive and multiplicative identities.
pub trait Identities {
    fn one() -> Self;
    fn zero() -> Self;
}

macro_rules! impl_float_identities {
    ($($type:ty),*) => {
        $(
            impl Identities for $type {
                fn one() -> Self {
                    1.
                }

                fn zero() -> Self {
                    0.
                }
            }
        )*
    };
}

macro_rules! impl_int_identities {
    ($($type:ty),*) => {
        $(
            impl Identities for $type {
                fn one() -> Self {
                    1
                }

                fn zero() -> Self {
                    0
                }
            }
        )*
    };
}

impl_float_identities!(f32, f64);
impl_int_identities!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Addition which reports overflow instead of panicking or wrapping.
pub trait CheckedAdd: Sized {
    /// Return `self + rhs`, or `None` if the result is not representable.
    ///
    /// Float addition never fails.
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_checked_add_int {
    ($($type:ty),*) => {
        $(
            impl CheckedAdd for $type {
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$type>::checked_add(self, rhs)
                }
            }
        )*
    };
}

macro_rules! impl_checked_add_float {
    ($($type:ty),*) => {
        $(
            impl CheckedAdd for $type {
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }
            }
        )*
    };
}

impl_checked_add_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_checked_add_float!(f32, f64);

/// Float types which have a "Not a number" value.
pub trait NaN {
    fn nan() -> Self;
}

impl NaN for f32 {
    fn nan() -> Self {
        f32::NAN
    }
}

impl NaN for f64 {
    fn nan() -> Self {
        f64::NAN
    }
}

/// Provides Rust's `as` conversions as a trait.
///
/// See <https://doc.rust-lang.org/reference/expressions/operator-expr.html#type-cast-expressions>
/// for details. Float to int conversions saturate and map NaN to zero.
pub trait Cast<T> {
    /// Convert `self` to type T using `self as T`.
    fn cast(self) -> T;
}

macro_rules! impl_cast_from {
    ($src:ty => $($dest:ty),*) => {
        $(
            impl Cast<$dest> for $src {
                #[inline]
                fn cast(self) -> $dest {
                    self as $dest
                }
            }
        )*
    };
}

macro_rules! impl_cast {
    ($($src:ty),*) => {
        $(
            impl_cast_from!($src => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
        )*
    };
}

impl_cast!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
