// src/relation_sieve/trial_division.rs
//
// Trial division engine for sieve candidates, with partials allowed up to
// two large primes. Pass 1 selects the base primes dividing Q(x) by
// comparing x against the precomputed polynomial roots modulo p (one
// Barrett reduction per prime, no division). Pass 2 performs the actual
// divisions on an in-place unsigned scratch integer. Whatever residue
// survives is classified: smooth, one large prime, a large prime square,
// or two large primes after a size-dispatched factoring step.

use crate::algorithms::{Factorizer, HartRace, PollardRhoBrent63, PollardRhoBrent64};
use crate::core::timer::Timer;
use crate::integer_math::primality::is_probable_prime;
use crate::integer_math::unsigned_scratch::UnsignedScratch;
use crate::relation_sieve::aq_pair::{AQPair, SmallFactorList};
use crate::relation_sieve::report::TDivReport;
use crate::relation_sieve::solution_arrays::{barrett_mod, SolutionArrays};
use log::debug;
use num::{BigInt, BigUint, One, Signed, ToPrimitive, Zero};
use std::collections::BTreeMap;
use std::time::Duration;

const SCRATCH_WORDS: usize = 50;
const PASS2_CAPACITY: usize = 100;

pub struct TrialDivision<'b> {
    // factoring target and polynomial parameters
    kn: BigInt,
    da: BigInt,
    b_param: BigInt,
    /// Q is sufficiently smooth if the unfactored residue stays below this
    max_q_rest: f64,

    // borrowed factor-base view, valid for one polynomial
    arrays: Option<&'b SolutionArrays>,
    base_size: usize,
    p_max: i32,
    p_max_square: BigUint,
    unsieved_base_elements: &'b [i32],

    // scratch state owned by this instance; never shared
    q_rest: UnsignedScratch,
    quotient: UnsignedScratch,
    pass2_primes: Vec<i32>,
    pass2_exponents: Vec<i32>,
    pass2_powers: Vec<i32>,
    small_factors: SmallFactorList,

    // engines for composite residues
    hart: HartRace,
    rho63: PollardRhoBrent63,
    rho64: PollardRhoBrent64,
    factorizer: Box<dyn Factorizer>,

    // statistics
    profile: bool,
    test_count: u64,
    sufficient_smooth_count: u64,
    aq_duration: Duration,
    pass1_duration: Duration,
    pass2_duration: Duration,
    prime_test_duration: Duration,
    factor_duration: Duration,
    q_rest_sizes: BTreeMap<u64, u64>,
}

impl<'b> TrialDivision<'b> {
    /// `factorizer` handles composite residues of 63 bits and more; a SIQS
    /// driver injects a reduced-parameter instance of itself here.
    pub fn new(factorizer: Box<dyn Factorizer>) -> Self {
        TrialDivision {
            kn: BigInt::zero(),
            da: BigInt::zero(),
            b_param: BigInt::zero(),
            max_q_rest: 0.0,
            arrays: None,
            base_size: 0,
            p_max: 0,
            p_max_square: BigUint::zero(),
            unsieved_base_elements: &[],
            q_rest: UnsignedScratch::with_capacity(SCRATCH_WORDS),
            quotient: UnsignedScratch::with_capacity(SCRATCH_WORDS),
            pass2_primes: vec![0; PASS2_CAPACITY],
            pass2_exponents: vec![0; PASS2_CAPACITY],
            pass2_powers: vec![0; PASS2_CAPACITY],
            small_factors: SmallFactorList::new(),
            hart: HartRace::new(),
            rho63: PollardRhoBrent63::new(),
            rho64: PollardRhoBrent64::new(),
            factorizer,
            profile: false,
            test_count: 0,
            sufficient_smooth_count: 0,
            aq_duration: Duration::ZERO,
            pass1_duration: Duration::ZERO,
            pass2_duration: Duration::ZERO,
            prime_test_duration: Duration::ZERO,
            factor_duration: Duration::ZERO,
            q_rest_sizes: BTreeMap::new(),
        }
    }

    /// Installs the factoring target. `max_q_rest` is the biggest
    /// unfactored residue for which a Q still counts as smooth enough.
    pub fn initialize_for_n(&mut self, n_approx: f64, kn: BigInt, max_q_rest: f64, profile: bool) {
        debug!(
            "initializing trial division for N ~ {:.3e}, maxQRest = {:.3e}",
            n_approx, max_q_rest
        );
        self.kn = kn;
        self.max_q_rest = max_q_rest;
        self.profile = profile;
        self.test_count = 0;
        self.sufficient_smooth_count = 0;
        self.aq_duration = Duration::ZERO;
        self.pass1_duration = Duration::ZERO;
        self.pass2_duration = Duration::ZERO;
        self.prime_test_duration = Duration::ZERO;
        self.factor_duration = Duration::ZERO;
        self.q_rest_sizes = BTreeMap::new();
    }

    /// Installs polynomial coefficients and the factor-base view for the
    /// next group of candidates. A(x) = da*x + b with d = 1 or 2 depending
    /// on kN mod 8.
    pub fn initialize_for_a_parameter(
        &mut self,
        da: BigInt,
        b: BigInt,
        arrays: &'b SolutionArrays,
        filtered_base_size: usize,
        unsieved_base_elements: &'b [i32],
    ) {
        assert!(filtered_base_size <= arrays.len());
        self.da = da;
        self.b_param = b;
        self.base_size = filtered_base_size;
        self.p_max = arrays.primes[filtered_base_size - 1];
        self.p_max_square = BigUint::from(self.p_max as u64 * self.p_max as u64);
        self.arrays = Some(arrays);
        self.unsieved_base_elements = unsieved_base_elements;
    }

    /// Updates only the linear coefficient between sub-polynomials sharing
    /// the same a.
    pub fn set_b_parameter(&mut self, b: BigInt) {
        self.b_param = b;
    }

    /// Trial-divides every sieve position in `x_list`. Emitted AQ-pairs
    /// keep the input order; candidates that do not yield a usable
    /// congruence are dropped silently.
    pub fn test_list(&mut self, x_list: &[i32]) -> Vec<AQPair> {
        let mut timer = Timer::start();
        let mut aq_pairs = Vec::new();
        for &x in x_list {
            self.small_factors.reset();
            self.test_count += 1;
            let a = &self.da * BigInt::from(x) + &self.b_param;
            let q = &a * &a - &self.kn;
            if self.profile {
                self.aq_duration += timer.capture();
            }
            let aq_pair = self.test(&a, &q, x, &mut timer);
            if self.profile {
                self.factor_duration += timer.capture();
            }
            if let Some(pair) = aq_pair {
                self.check_invariants(&pair, &q);
                aq_pairs.push(pair);
                self.sufficient_smooth_count += 1;
            }
        }
        if self.profile {
            self.aq_duration += timer.capture();
        }
        aq_pairs
    }

    fn test(&mut self, a: &BigInt, q: &BigInt, x: i32, timer: &mut Timer) -> Option<AQPair> {
        if q.is_zero() {
            return None;
        }
        let arrays = self.arrays?;

        // sign
        if q.is_negative() {
            self.small_factors.add(-1);
        }
        let mut q_rest_val: BigUint = q.magnitude().clone();

        // remove multiples of 2
        let lsb = q_rest_val.trailing_zeros().unwrap_or(0);
        if lsb > 0 {
            self.small_factors.add_with_exponent(2, lsb as u16);
            q_rest_val >>= lsb;
        }

        // unsieved base elements are divided unconditionally in pass 2
        let mut pass2_count = 0;
        for &element in self.unsieved_base_elements {
            self.pass2_primes[pass2_count] = element;
            self.pass2_powers[pass2_count] = element;
            self.pass2_exponents[pass2_count] = 1;
            pass2_count += 1;
        }

        // Pass 1: find base primes with x == x1 or x2 (mod p). Many p are
        // bigger than any sieve position, and skipping the reduction there
        // is worth a lot.
        let x_abs = x.unsigned_abs();
        for p_index in (1..self.base_size).rev() {
            // index 0 is the prime 2, already handled
            let p = arrays.p_array[p_index];
            let x_mod_p = if x_abs < p as u32 {
                if x < 0 {
                    x + p
                } else {
                    x
                }
            } else {
                barrett_mod(x, p, arrays.pinv_array[p_index])
            };
            if x_mod_p == arrays.x1_array[p_index] || x_mod_p == arrays.x2_array[p_index] {
                self.pass2_primes[pass2_count] = arrays.primes[p_index];
                self.pass2_exponents[pass2_count] = arrays.exponents[p_index];
                self.pass2_powers[pass2_count] = p;
                pass2_count += 1;
                // dividing Q here measures slower than deferring to pass 2
            }
        }
        if self.profile {
            self.pass1_duration += timer.capture();
        }

        // Pass 2: exact divisions, swapping quotient and dividend
        self.q_rest.set(&q_rest_val);
        for i in 0..pass2_count {
            let divisor = self.pass2_powers[i] as u32;
            loop {
                let rem = self.q_rest.div_rem_u32(divisor, &mut self.quotient);
                if rem > 0 {
                    break;
                }
                std::mem::swap(&mut self.q_rest, &mut self.quotient);
                self.small_factors
                    .add_with_exponent(self.pass2_primes[i], self.pass2_exponents[i] as u16);
            }
        }
        if self.profile {
            self.pass2_duration += timer.capture();
        }
        if self.q_rest.is_one() {
            return Some(AQPair::SmoothPerfect {
                a: a.clone(),
                small_factors: self.small_factors.clone(),
            });
        }
        let q_rest = self.q_rest.to_biguint();

        // Division by all p <= pMax was not enough. The residue is either a
        // prime above pMax or a composite above pMax^2.
        if q_rest.to_f64().unwrap_or(f64::INFINITY) >= self.max_q_rest {
            return None; // Q not sufficiently smooth
        }

        let rest_is_prime = q_rest < self.p_max_square || is_probable_prime(&q_rest);
        if self.profile {
            self.prime_test_duration += timer.capture();
        }
        if rest_is_prime {
            if q_rest.bits() > 31 {
                return None;
            }
            return Some(AQPair::Partial1Large {
                a: a.clone(),
                small_factors: self.small_factors.clone(),
                large_factor: q_rest.to_i64().unwrap(),
            });
        }

        // The residue is odd, composite, and every factor exceeds pMax;
        // trial division cannot help from here.
        let q_rest_bits = q_rest.bits();
        if self.profile {
            *self.q_rest_sizes.entry(q_rest_bits).or_insert(0) += 1;
        }
        let factor1: BigUint = if q_rest_bits < 50 {
            BigUint::from(self.hart.find_single_factor(q_rest.to_u64().unwrap()))
        } else if q_rest_bits < 57 {
            BigUint::from(self.rho63.find_single_factor(q_rest.to_u64().unwrap()))
        } else if q_rest_bits < 63 {
            BigUint::from(self.rho64.find_single_factor(q_rest.to_u64().unwrap()))
        } else {
            debug!(
                "dispatching {}-bit residue to {}",
                q_rest_bits,
                self.factorizer.name()
            );
            self.factorizer.find_single_factor(&q_rest)
        };
        if factor1 <= BigUint::one() {
            return None; // engine failed; drop the candidate
        }
        if factor1.bits() > 31 {
            return None;
        }
        let factor2 = &q_rest / &factor1;
        if factor2.bits() > 31 {
            return None;
        }
        debug_assert!(factor1.to_i64().unwrap() > self.p_max as i64);
        debug_assert!(factor2.to_i64().unwrap() > self.p_max as i64);

        if factor1 == factor2 {
            Some(AQPair::Smooth1LargeSquare {
                a: a.clone(),
                small_factors: self.small_factors.clone(),
                large_factor: factor1.to_i64().unwrap(),
            })
        } else {
            Some(AQPair::Partial2Large {
                a: a.clone(),
                small_factors: self.small_factors.clone(),
                large_factor1: factor1.to_i64().unwrap(),
                large_factor2: factor2.to_i64().unwrap(),
            })
        }
    }

    #[allow(unused_variables)]
    fn check_invariants(&self, pair: &AQPair, q: &BigInt) {
        #[cfg(debug_assertions)]
        {
            use num::Integer;
            if !self.kn.is_zero() {
                let a = pair.a();
                debug_assert_eq!((a * a).mod_floor(&self.kn), q.mod_floor(&self.kn));
            }
            let mut product = BigInt::one();
            for (factor, exponent) in pair.all_q_factors() {
                product *= BigInt::from(factor).pow(exponent);
            }
            debug_assert_eq!(&product, q, "factor product must reconstruct Q");
        }
    }

    pub fn report(&self) -> TDivReport {
        TDivReport {
            test_count: self.test_count,
            sufficient_smooth_count: self.sufficient_smooth_count,
            aq_duration: self.aq_duration,
            pass1_duration: self.pass1_duration,
            pass2_duration: self.pass2_duration,
            prime_test_duration: self.prime_test_duration,
            factor_duration: self.factor_duration,
            q_rest_sizes: self.q_rest_sizes.clone(),
        }
    }

    /// Drops the borrowed factor-base view.
    pub fn clean_up(&mut self) {
        self.arrays = None;
        self.unsieved_base_elements = &[];
        self.base_size = 0;
    }
}
