// src/relation_sieve/aq_pair.rs
//
// Congruence records produced by the trial-division stage. Each pair
// relates A(x)^2 == Q(x) (mod kN) with Q factored over the prime base,
// possibly up to one or two large primes; the matrix stage combines them.

use num::BigInt;
use std::collections::BTreeMap;

/// Sorted (factor, exponent) accumulator for the small factors of one Q.
/// The factor -1 encodes the sign. Content is copied into the emitted
/// AQ-pair; the accumulator itself is reset per candidate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SmallFactorList {
    factors: Vec<i32>,
    exponents: Vec<u16>,
}

impl SmallFactorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.factors.clear();
        self.exponents.clear();
    }

    pub fn add(&mut self, factor: i32) {
        self.add_with_exponent(factor, 1);
    }

    pub fn add_with_exponent(&mut self, factor: i32, exponent: u16) {
        match self.factors.binary_search(&factor) {
            Ok(i) => self.exponents[i] += exponent,
            Err(i) => {
                self.factors.insert(i, factor);
                self.exponents.insert(i, exponent);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, u16)> + '_ {
        self.factors
            .iter()
            .copied()
            .zip(self.exponents.iter().copied())
    }
}

/// One relation A^2 == Q (mod kN), tagged by how completely Q factored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AQPair {
    /// Q factored completely over the base
    SmoothPerfect {
        a: BigInt,
        small_factors: SmallFactorList,
    },
    /// the residue was the square of a single prime above pMax
    Smooth1LargeSquare {
        a: BigInt,
        small_factors: SmallFactorList,
        large_factor: i64,
    },
    /// one prime above pMax survived
    Partial1Large {
        a: BigInt,
        small_factors: SmallFactorList,
        large_factor: i64,
    },
    /// two distinct primes above pMax survived
    Partial2Large {
        a: BigInt,
        small_factors: SmallFactorList,
        large_factor1: i64,
        large_factor2: i64,
    },
}

impl AQPair {
    pub fn a(&self) -> &BigInt {
        match self {
            AQPair::SmoothPerfect { a, .. }
            | AQPair::Smooth1LargeSquare { a, .. }
            | AQPair::Partial1Large { a, .. }
            | AQPair::Partial2Large { a, .. } => a,
        }
    }

    pub fn small_factors(&self) -> &SmallFactorList {
        match self {
            AQPair::SmoothPerfect { small_factors, .. }
            | AQPair::Smooth1LargeSquare { small_factors, .. }
            | AQPair::Partial1Large { small_factors, .. }
            | AQPair::Partial2Large { small_factors, .. } => small_factors,
        }
    }

    /// All factors of Q merged into one (factor, exponent) map, large
    /// primes included. The product over the map reconstructs Q exactly.
    pub fn all_q_factors(&self) -> BTreeMap<i64, u32> {
        let mut merged: BTreeMap<i64, u32> = BTreeMap::new();
        for (factor, exponent) in self.small_factors().iter() {
            *merged.entry(factor as i64).or_insert(0) += exponent as u32;
        }
        match self {
            AQPair::SmoothPerfect { .. } => {}
            AQPair::Smooth1LargeSquare { large_factor, .. } => {
                *merged.entry(*large_factor).or_insert(0) += 2;
            }
            AQPair::Partial1Large { large_factor, .. } => {
                *merged.entry(*large_factor).or_insert(0) += 1;
            }
            AQPair::Partial2Large {
                large_factor1,
                large_factor2,
                ..
            } => {
                *merged.entry(*large_factor1).or_insert(0) += 1;
                *merged.entry(*large_factor2).or_insert(0) += 1;
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_factor_list_sorted_insert() {
        let mut list = SmallFactorList::new();
        list.add(5);
        list.add(-1);
        list.add(2);
        list.add_with_exponent(2, 3);
        let collected: Vec<(i32, u16)> = list.iter().collect();
        assert_eq!(collected, vec![(-1, 1), (2, 4), (5, 1)]);
    }

    #[test]
    fn test_reset() {
        let mut list = SmallFactorList::new();
        list.add(3);
        list.reset();
        assert!(list.is_empty());
    }

    #[test]
    fn test_all_q_factors_merges_large() {
        let mut small = SmallFactorList::new();
        small.add_with_exponent(2, 6);
        small.add(11);
        let pair = AQPair::Partial2Large {
            a: BigInt::from(21),
            small_factors: small,
            large_factor1: 101,
            large_factor2: 9973,
        };
        let merged = pair.all_q_factors();
        assert_eq!(merged[&2], 6);
        assert_eq!(merged[&11], 1);
        assert_eq!(merged[&101], 1);
        assert_eq!(merged[&9973], 1);
    }

    #[test]
    fn test_square_counts_twice() {
        let pair = AQPair::Smooth1LargeSquare {
            a: BigInt::from(7),
            small_factors: SmallFactorList::new(),
            large_factor: 49999,
        };
        assert_eq!(pair.all_q_factors()[&49999], 2);
    }
}
