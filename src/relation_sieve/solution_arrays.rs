// src/relation_sieve/solution_arrays.rs
//
// Read-only view of the filtered factor base for one polynomial, laid out
// as parallel arrays the way the sieve consumes them. The sieve driver owns
// and refreshes these; the classifier only borrows them.

/// Parallel factor-base arrays. Index 0 is the prime 2; `x1_array` and
/// `x2_array` hold the two solutions of Q(x) == 0 (mod p) for the current
/// polynomial.
#[derive(Clone, Debug, Default)]
pub struct SolutionArrays {
    /// base primes
    pub primes: Vec<i32>,
    /// exponent contributed per hit (above 1 for small prime powers)
    pub exponents: Vec<i32>,
    /// the divisor actually used in pass 2: the prime or a small power of it
    pub p_array: Vec<i32>,
    /// floor(2^32 / p), the Barrett reciprocal for signed 32-bit numerators
    pub pinv_array: Vec<i64>,
    pub x1_array: Vec<i32>,
    pub x2_array: Vec<i32>,
}

impl SolutionArrays {
    /// Builds the view from (prime, exponent, divisor) triples; solution
    /// arrays start zeroed and are filled by the polynomial generator.
    pub fn from_base(entries: &[(i32, i32, i32)]) -> Self {
        let mut arrays = SolutionArrays::default();
        for &(prime, exponent, divisor) in entries {
            arrays.primes.push(prime);
            arrays.exponents.push(exponent);
            arrays.p_array.push(divisor);
            arrays.pinv_array.push(barrett_reciprocal(divisor));
            arrays.x1_array.push(0);
            arrays.x2_array.push(0);
        }
        arrays
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }
}

/// floor(2^32 / p) for the Barrett reduction below.
pub fn barrett_reciprocal(p: i32) -> i64 {
    debug_assert!(p > 0);
    ((1u64 << 32) / p as u64) as i64
}

/// x mod p in [0, p) by long-valued Barrett reduction. The reciprocal
/// bounds the quotient error to one, so a single +-p correction is enough.
/// Requires |x| < 2^31 and 0 < p < 2^31; the product x * pinv stays inside
/// a signed 64-bit register.
#[inline]
pub fn barrett_mod(x: i32, p: i32, pinv: i64) -> i32 {
    let q = ((x as i64).wrapping_mul(pinv) as u64) >> 32;
    let mut r = (x as i64).wrapping_sub((q as i64).wrapping_mul(p as i64)) as i32;
    if r < 0 {
        r += p;
    } else if r >= p {
        r -= p;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_mod(x: i32, p: i32) -> i32 {
        ((x % p) + p) % p
    }

    #[test]
    fn test_barrett_matches_reference() {
        let primes = [3, 5, 7, 11, 101, 1009, 65_537, 1_000_003];
        let xs = [
            i32::MIN,
            i32::MIN + 1,
            -1_000_000_000,
            -65_536,
            -3,
            -1,
            0,
            1,
            2,
            65_535,
            123_456_789,
            i32::MAX - 1,
            i32::MAX,
        ];
        for &p in &primes {
            let pinv = barrett_reciprocal(p);
            for &x in &xs {
                assert_eq!(
                    barrett_mod(x, p, pinv),
                    reference_mod(x, p),
                    "x={} p={}",
                    x,
                    p
                );
            }
        }
    }

    #[test]
    fn test_barrett_dense_sweep() {
        for &p in &[3, 7, 31, 8191] {
            let pinv = barrett_reciprocal(p);
            for x in -10_000..10_000 {
                assert_eq!(barrett_mod(x, p, pinv), reference_mod(x, p), "x={} p={}", x, p);
            }
        }
    }

    #[test]
    fn test_from_base_fills_reciprocals() {
        let arrays = SolutionArrays::from_base(&[(2, 1, 2), (3, 1, 3), (11, 1, 11)]);
        assert_eq!(arrays.len(), 3);
        assert_eq!(arrays.pinv_array[1], (1i64 << 32) / 3);
        assert_eq!(arrays.x1_array, vec![0, 0, 0]);
    }
}
