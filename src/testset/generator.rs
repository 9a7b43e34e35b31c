// src/testset/generator.rs
//
// Generation of random N that are not too easy to factor. The standard
// case are semiprimes where the smaller factor is at least cbrt(N); the
// weaker natures exist for exercising trial-division-friendly paths.

use crate::core::static_random::{with_process_rng, StaticRandom};
use crate::integer_math::primality::{is_probable_prime, next_probable_prime};
use log::debug;
use num::{BigUint, One};

/// The nature of the numbers requested from [`generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestNumberNature {
    /// uniform composites of the requested size
    RandomComposite,
    /// uniform odd composites
    RandomOddComposite,
    /// semiprimes with the smaller factor roughly between cbrt(N) and sqrt(N)
    ModerateSemiprime,
    /// like ModerateSemiprime, but both factor bit lengths forced exactly
    ModerateSemiprime2,
    /// semiprimes with two factors of about bits/2 bits each
    HardSemiprime,
}

impl TestNumberNature {
    pub fn name(&self) -> &str {
        match self {
            TestNumberNature::RandomComposite => "random composites",
            TestNumberNature::RandomOddComposite => "random odd composites",
            TestNumberNature::ModerateSemiprime => "moderate semiprimes",
            TestNumberNature::ModerateSemiprime2 => "moderate semiprimes 2",
            TestNumberNature::HardSemiprime => "hard semiprimes",
        }
    }
}

/// Generates `count` numbers of exactly `bits` bits with the given nature.
/// Rejects-and-retries until enough numbers are collected; fails eagerly
/// when no number of the requested size can exist.
pub fn generate(
    count: usize,
    bits: u64,
    nature: TestNumberNature,
) -> Result<Vec<BigUint>, String> {
    match nature {
        TestNumberNature::RandomComposite => {
            if bits < 3 {
                return Err(format!("there are no composites with {} bits", bits));
            }
            let mut numbers = Vec::with_capacity(count);
            while numbers.len() < count {
                let n = with_process_rng(|rng| rng.next_bits(bits));
                if n.bits() == bits && !is_probable_prime(&n) {
                    numbers.push(n);
                }
            }
            Ok(numbers)
        }

        TestNumberNature::RandomOddComposite => {
            if bits < 4 {
                return Err(format!("there are no odd composites with {} bits", bits));
            }
            let mut numbers = Vec::with_capacity(count);
            while numbers.len() < count {
                let n = with_process_rng(|rng| rng.next_bits(bits)) | BigUint::one();
                if n.bits() == bits && !is_probable_prime(&n) {
                    numbers.push(n);
                }
            }
            Ok(numbers)
        }

        TestNumberNature::ModerateSemiprime => {
            if bits < 4 {
                return Err(format!("there are no odd semiprimes with {} bits", bits));
            }
            let min_bits = (bits + 2) / 3; // analogue of cbrt(N)
            let max_bits = (bits + 1) / 2;
            let mut numbers = Vec::with_capacity(count);
            while numbers.len() < count {
                let (n1_bits, n1_seed, n_rand) = with_process_rng(|rng| {
                    let n1_bits =
                        uniform_random_integer(rng, min_bits as i64, max_bits as i64) as u64;
                    (n1_bits, rng.next_bits(n1_bits), rng.next_bits(bits))
                });
                let n1 = next_probable_prime(&n1_seed);
                if n1.bits() != n1_bits {
                    continue;
                }
                let n2 = next_probable_prime(&(n_rand / &n1));
                let n = &n1 * &n2;
                if n.bits() != bits {
                    continue;
                }
                debug!("moderate semiprime: {} = {} * {}", n, n1, n2);
                numbers.push(n);
            }
            Ok(numbers)
        }

        TestNumberNature::ModerateSemiprime2 => {
            if bits < 4 {
                return Err(format!("there are no odd semiprimes with {} bits", bits));
            }
            let min_bits = (bits + 2) / 3;
            let max_bits = (bits + 1) / 2;
            let mut numbers = Vec::with_capacity(count);
            while numbers.len() < count {
                let (n1_bits, n1_seed) = with_process_rng(|rng| {
                    let n1_bits =
                        uniform_random_integer(rng, min_bits as i64, max_bits as i64) as u64;
                    (n1_bits, rng.next_bits(n1_bits))
                });
                let n1 = next_probable_prime(&with_high_bit(n1_seed, n1_bits));
                if n1.bits() >= bits {
                    continue;
                }
                let n2_bits = bits - n1.bits();
                let n2_seed = with_process_rng(|rng| rng.next_bits(n2_bits));
                let n2 = next_probable_prime(&with_high_bit(n2_seed, n2_bits));
                let n = &n1 * &n2;
                // skip cases where the construction missed the bit length
                if n.bits() != bits {
                    continue;
                }
                numbers.push(n);
            }
            Ok(numbers)
        }

        TestNumberNature::HardSemiprime => {
            if bits < 4 {
                return Err(format!("there are no odd semiprimes with {} bits", bits));
            }
            let n1_bits = (bits + 1) / 2;
            let mut numbers = Vec::with_capacity(count);
            while numbers.len() < count {
                let n1_seed = with_process_rng(|rng| rng.next_bits(n1_bits));
                let n1 = next_probable_prime(&with_high_bit(n1_seed, n1_bits));
                if n1.bits() != n1_bits {
                    continue;
                }
                let n2_bits = bits - n1_bits;
                let n2_seed = with_process_rng(|rng| rng.next_bits(n2_bits));
                let n2 = next_probable_prime(&with_high_bit(n2_seed, n2_bits));
                if n2.bits() != n2_bits {
                    continue;
                }
                let n = &n1 * &n2;
                if n.bits() != bits {
                    continue;
                }
                debug!("hard semiprime: {} = {} * {}", n, n1, n2);
                numbers.push(n);
            }
            Ok(numbers)
        }
    }
}

/// Uniform draw from [min_value, max_value - 1]. Degenerate ranges promote
/// the width to 1, so `max_value <= min_value` yields `min_value`.
pub fn uniform_random_integer(rng: &mut StaticRandom, min_value: i64, max_value: i64) -> i64 {
    let normed_max = (max_value - min_value).max(1) as u32;
    rng.next_range(0, normed_max) as i64 + min_value
}

fn with_high_bit(seed: BigUint, bits: u64) -> BigUint {
    if bits == 0 {
        return seed;
    }
    seed | (BigUint::one() << (bits - 1))
}
