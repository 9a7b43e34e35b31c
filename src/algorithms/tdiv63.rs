// src/algorithms/tdiv63.rs
//
// Trial division for 63-bit integers using precomputed double reciprocals:
// the candidate quotient floor(N/p) comes from one multiplication, and a
// single integer multiply verifies divisibility. The Lehman engine runs
// this up to cbrt(N) before or after its k-loop.

use log::debug;

/// Truncation guard added before casting the reciprocal product.
const DISCRIMINATOR: f64 = 1.0 / (1 << 10) as f64;

pub struct TDiv63 {
    primes: Vec<u32>,
    reciprocals: Vec<f64>,
}

impl TDiv63 {
    /// Precomputes all primes below `factor_limit` and their reciprocals.
    pub fn new(factor_limit: u32) -> Self {
        let limit = factor_limit as usize;
        let mut is_composite = vec![false; limit.max(2)];
        let mut primes = Vec::new();
        let mut reciprocals = Vec::new();
        let mut p = 2usize;
        while p < limit {
            if !is_composite[p] {
                primes.push(p as u32);
                reciprocals.push(1.0 / p as f64);
                let mut multiple = p * p;
                while multiple < limit {
                    is_composite[multiple] = true;
                    multiple += p;
                }
            }
            p += 1;
        }
        debug!(
            "trial division table: {} primes below {}",
            primes.len(),
            factor_limit
        );
        TDiv63 {
            primes,
            reciprocals,
        }
    }

    /// Returns the smallest prime factor of `n` not exceeding `test_limit`,
    /// or 1 if none exists within the table.
    pub fn find_single_factor(&self, n: i64, test_limit: i32) -> i64 {
        for (i, &p) in self.primes.iter().enumerate() {
            if p as i32 > test_limit {
                break;
            }
            let quotient = (n as f64 * self.reciprocals[i] + DISCRIMINATOR) as i64;
            if quotient * p as i64 == n {
                return p as i64;
            }
        }
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_small_factors() {
        let tdiv = TDiv63::new(1 << 16);
        assert_eq!(tdiv.find_single_factor(15, 100), 3);
        assert_eq!(tdiv.find_single_factor(5 * 1_000_003, 100), 5);
        assert_eq!(tdiv.find_single_factor(49, 100), 7);
        assert_eq!(tdiv.find_single_factor(2 * 3 * 5 * 7, 100), 2);
    }

    #[test]
    fn test_respects_limit() {
        let tdiv = TDiv63::new(1 << 16);
        // 10403 = 101 * 103; a limit of 100 must not find either factor
        assert_eq!(tdiv.find_single_factor(10_403, 100), 1);
        assert_eq!(tdiv.find_single_factor(10_403, 103), 101);
    }

    #[test]
    fn test_prime_input() {
        let tdiv = TDiv63::new(1 << 16);
        assert_eq!(tdiv.find_single_factor(1_000_003, 1000), 1);
    }

    #[test]
    fn test_large_dividend() {
        let tdiv = TDiv63::new(1 << 20);
        assert_eq!(tdiv.find_single_factor(3 * 2_147_483_647, 1 << 20), 3);
        assert_eq!(
            tdiv.find_single_factor(104_729 * 104_723, 1 << 20),
            104_723
        );
    }
}
