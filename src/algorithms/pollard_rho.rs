// src/algorithms/pollard_rho.rs
//
// Pollard's Rho with Brent's cycle detection over Montgomery arithmetic,
// R = 2^64. The iteration x -> x^2 + c runs entirely in Montgomery form;
// differences are accumulated into a running product so that one gcd
// covers a whole batch of steps.
//
// Two engines cover the classifier's dispatch windows: the lazy-reduction
// multiply (results in [0, 2n)) for residues below 57 bits, and the fully
// reduced multiply for residues up to 63 bits.
//
// References:
// R.P. Brent, An improved Monte Carlo factorization algorithm, 1980
// P.L. Montgomery, Speeding the Pollard and Elliptic Curve methods of
// Factorization (Math. Comp. 48, 1987)

use crate::integer_math::gcd::gcd64;
use crate::integer_math::montgomery::{mont_mul63, mont_mul64, neg_inv_u64};
use log::debug;

/// Rho engine using the lazy Montgomery multiply; valid for odd n < 2^57.
pub struct PollardRhoBrent63;

/// Rho engine using the fully reduced Montgomery multiply; odd n < 2^63.
pub struct PollardRhoBrent64;

impl PollardRhoBrent63 {
    pub fn new() -> Self {
        PollardRhoBrent63
    }

    /// Returns a nontrivial factor of composite `n`, or 1 on failure.
    pub fn find_single_factor(&self, n: u64) -> u64 {
        find_single_factor_with(n, mont_mul63)
    }
}

impl PollardRhoBrent64 {
    pub fn new() -> Self {
        PollardRhoBrent64
    }

    /// Returns a nontrivial factor of composite `n`, or 1 on failure.
    pub fn find_single_factor(&self, n: u64) -> u64 {
        find_single_factor_with(n, mont_mul64)
    }
}

impl Default for PollardRhoBrent63 {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for PollardRhoBrent64 {
    fn default() -> Self {
        Self::new()
    }
}

fn find_single_factor_with(n: u64, mul: fn(u64, u64, u64, u64) -> u64) -> u64 {
    if n < 4 {
        return 1;
    }
    if n & 1 == 0 {
        return 2;
    }
    let iters = iteration_budget(n);
    // several polynomial offsets; a single unlucky c can have a cycle far
    // longer than the expected sqrt(p)
    for c in 1..=8 {
        if let Some(factor) = rho_brent(n, c, iters, mul) {
            debug!("pollard rho: {} = {} * {} (c={})", n, factor, n / factor, c);
            return factor;
        }
    }
    1
}

fn iteration_budget(n: u64) -> u64 {
    match 64 - n.leading_zeros() {
        0..=32 => 1 << 11,
        33..=40 => 1 << 13,
        41..=48 => 1 << 15,
        49..=54 => 1 << 17,
        55..=60 => 1 << 18,
        _ => 1 << 19,
    }
}

// Brent intervals: the hare x2 runs e2 = 1, 2, ..., the tortoise x1 is
// pinned at powers of two, and only the second half of each power-of-two
// interval is compared.
fn rho_brent(n: u64, c: u64, iters: u64, mul: fn(u64, u64, u64, u64) -> u64) -> Option<u64> {
    let n_neg_inv = neg_inv_u64(n);
    let (mut x1, mut x2) = (2u64, 2u64);
    let mut prod: u64 = 1;
    let mut next_interval_start = 0u64;
    let mut next_interval_end = 1u64;
    for e2 in 1..iters {
        x2 = mul(x2, x2, n, n_neg_inv);
        x2 = x2.wrapping_add(c);
        if e2 < next_interval_start {
            continue;
        }
        let diff = x1.abs_diff(x2);
        let prod_next = mul(prod, diff, n, n_neg_inv);
        if prod_next == 0 || prod_next == n {
            // the factor was just absorbed into the product; recover it
            // from the last difference alone
            let d = gcd64(diff % n, n);
            if d > 1 && d < n {
                return Some(d);
            }
        }
        if e2 >= 512 && e2 & 127 == 127 {
            let d = gcd64(prod % n, n);
            if d > 1 && d < n {
                return Some(d);
            }
        }
        prod = prod_next;
        if e2 == next_interval_end {
            x1 = x2;
            let pow2k = e2 + 1;
            next_interval_start = pow2k + pow2k / 2;
            next_interval_end = 2 * pow2k - 1;
        }
    }
    let d = gcd64(prod % n, n);
    if d > 1 && d < n {
        return Some(d);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rho63_semiprimes() {
        let rho = PollardRhoBrent63::new();
        for &n in &[
            235_075_827_453_629u64, // ~48 bits
            166_130_059_616_737,
            224_077_614_412_439,
            1_022_117, // 1009 * 1013
            8051,      // 83 * 97
        ] {
            let f = rho.find_single_factor(n);
            assert!(f > 1 && f < n, "n={} f={}", n, f);
            assert_eq!(n % f, 0, "n={} f={}", n, f);
        }
    }

    #[test]
    fn test_rho64_semiprimes() {
        let rho = PollardRhoBrent64::new();
        for &n in &[
            1_000_003u64 * 1_000_033,
            2_147_483_647u64 * 65_537,
            999_983u64 * 999_979,
        ] {
            let f = rho.find_single_factor(n);
            assert!(f > 1 && f < n, "n={} f={}", n, f);
            assert_eq!(n % f, 0, "n={} f={}", n, f);
        }
    }

    #[test]
    fn test_rho64_large_semiprime() {
        // 59-bit semiprime
        let p: u64 = 536_870_909; // 2^29 - 3
        let q: u64 = 1_073_741_789;
        let n = p * q;
        let rho = PollardRhoBrent64::new();
        let f = rho.find_single_factor(n);
        assert!(f == p || f == q, "n={} f={}", n, f);
    }

    #[test]
    fn test_even_and_tiny() {
        let rho = PollardRhoBrent64::new();
        assert_eq!(rho.find_single_factor(10), 2);
        assert_eq!(rho.find_single_factor(3), 1);
    }
}
