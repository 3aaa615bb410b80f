use crate::RandomSource;

/// Small, fast, non-cryptographic random number generator.
///
/// This is used to fill arrays with reproducible pseudo-random values in
/// tests and demos. See <https://en.wikipedia.org/wiki/Xorshift>.
#[derive(Clone, Debug)]
pub struct XorShiftRng {
    state: u64,
}

impl XorShiftRng {
    /// Create a generator from a seed. The seed must be nonzero, otherwise
    /// every output is zero.
    pub fn new(seed: u64) -> XorShiftRng {
        XorShiftRng { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Return a value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        // Use the top 53 bits, the width of an f64 mantissa.
        let bits = self.next_u64() >> 11;
        bits as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Return a value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        let bits = self.next_u64() >> 40;
        bits as f32 * (1.0 / (1u32 << 24) as f32)
    }

    /// Return an infinite iterator of random values of type `T`.
    pub fn iter<T>(&mut self) -> impl Iterator<Item = T> + '_
    where
        Self: RandomSource<T>,
    {
        std::iter::from_fn(|| Some(self.next()))
    }
}

impl RandomSource<f32> for XorShiftRng {
    fn next(&mut self) -> f32 {
        self.next_f32()
    }
}

impl RandomSource<f64> for XorShiftRng {
    fn next(&mut self) -> f64 {
        self.next_f64()
    }
}

macro_rules! impl_random_source {
    ($($ty:ty),*) => {
        $(
            impl RandomSource<$ty> for XorShiftRng {
                fn next(&mut self) -> $ty {
                    // Keep the low bits.
                    self.next_u64() as $ty
                }
            }
        )*
    };
}

impl_random_source!(u8, i8, u16, i16, u32, i32, u64, i64);

#[cfg(test)]
mod tests {
    use super::XorShiftRng;

    #[test]
    fn test_next_u64() {
        let mut rng = XorShiftRng::new(1);
        // 1 ^ (1 << 13) = 8193; 8193 ^ (8193 >> 7) = 8257;
        // 8257 ^ (8257 << 17) = 1082269761.
        assert_eq!(rng.next_u64(), 1082269761);
    }

    #[test]
    fn test_floats_in_unit_range() {
        let mut rng = XorShiftRng::new(1234);
        let xs: Vec<f64> = rng.iter().take(1000).collect();
        assert!(xs.iter().all(|x| (0.0..1.0).contains(x)));

        let ys: Vec<f32> = rng.iter().take(1000).collect();
        assert!(ys.iter().all(|y| (0.0..1.0).contains(y)));

        // Values should be spread over the range.
        let mean = xs.iter().sum::<f64>() / xs.len() as f64;
        assert!((0.4..0.6).contains(&mean), "mean {}", mean);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a: Vec<i32> = XorShiftRng::new(42).iter().take(16).collect();
        let b: Vec<i32> = XorShiftRng::new(42).iter().take(16).collect();
        let c: Vec<i32> = XorShiftRng::new(43).iter().take(16).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
