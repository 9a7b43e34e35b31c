// src/integer_math/roots.rs
//
// Integer square roots for 64-bit values. The factoring engines test
// "is a*a - 4kN a perfect square" in their innermost loops; the helpers
// here start from the hardware sqrt and fix up the at-most-one-off
// rounding of the double result.

/// Floor of the square root of `n`.
pub fn isqrt64(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut r = (n as f64).sqrt() as u64;
    // f64 has 52 mantissa bits; the cast can be off by one in either
    // direction for n > 2^52.
    while r > 0 && r.checked_mul(r).map_or(true, |rr| rr > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).map_or(false, |rr| rr <= n) {
        r += 1;
    }
    r
}

/// Returns `Some(sqrt(n))` iff `n` is a perfect square.
pub fn exact_sqrt64(n: u64) -> Option<u64> {
    // quadratic residues mod 64 rule out most inputs with one table lookup
    const SQUARES_MOD_64: u64 = 0x0202_0212_0203_0213;
    if (SQUARES_MOD_64 >> (n & 63)) & 1 == 0 {
        return None;
    }
    let r = isqrt64(n);
    if r * r == n {
        Some(r)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isqrt64() {
        assert_eq!(isqrt64(0), 0);
        assert_eq!(isqrt64(1), 1);
        assert_eq!(isqrt64(3), 1);
        assert_eq!(isqrt64(4), 2);
        assert_eq!(isqrt64(99), 9);
        assert_eq!(isqrt64(100), 10);
        assert_eq!(isqrt64(u64::MAX), (1 << 32) - 1);
        // around the f64 precision edge
        let n = (1u64 << 60) - 1;
        let r = isqrt64(n);
        assert!(r * r <= n);
        assert!((r + 1) * (r + 1) > n);
    }

    #[test]
    fn test_exact_sqrt64() {
        assert_eq!(exact_sqrt64(0), Some(0));
        assert_eq!(exact_sqrt64(16), Some(4));
        assert_eq!(exact_sqrt64(17), None);
        assert_eq!(exact_sqrt64(1 << 40), Some(1 << 20));
        assert_eq!(exact_sqrt64((1 << 40) + 1), None);
        for b in 1000u64..1100 {
            assert_eq!(exact_sqrt64(b * b), Some(b));
            assert_eq!(exact_sqrt64(b * b + 1), None);
        }
    }
}
