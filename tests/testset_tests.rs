// Integration tests for the calibrated test-number generator.

use num::{BigUint, ToPrimitive};
use siqs::algorithms::HartRace;
use siqs::integer_math::primality::is_probable_prime;
use siqs::testset::{generate, TestNumberNature};

/// Splits a semiprime below 50 bits into its two prime factors.
fn split_semiprime(n: &BigUint) -> (BigUint, BigUint) {
    let n64 = n.to_u64().expect("semiprime fits u64 in these tests");
    let hart = HartRace::new();
    let f = hart.find_single_factor(n64);
    assert!(f > 1 && f < n64, "failed to split {}", n64);
    let p = BigUint::from(f.min(n64 / f));
    let q = BigUint::from(f.max(n64 / f));
    (p, q)
}

#[test]
fn test_random_composites() {
    let numbers = generate(20, 12, TestNumberNature::RandomComposite).unwrap();
    assert_eq!(numbers.len(), 20);
    for n in &numbers {
        assert_eq!(n.bits(), 12);
        assert!(!is_probable_prime(n), "{} must be composite", n);
    }
}

#[test]
fn test_random_odd_composites() {
    let numbers = generate(10, 10, TestNumberNature::RandomOddComposite).unwrap();
    assert_eq!(numbers.len(), 10);
    for n in &numbers {
        assert_eq!(n.bits(), 10);
        assert_eq!((n % 2u32).to_u32(), Some(1), "{} must be odd", n);
        assert!(!is_probable_prime(n), "{} must be composite", n);
    }
}

#[test]
fn test_hard_semiprimes_40_bits() {
    let numbers = generate(10, 40, TestNumberNature::HardSemiprime).unwrap();
    assert_eq!(numbers.len(), 10);
    for n in &numbers {
        assert_eq!(n.bits(), 40);
        assert!(!is_probable_prime(n));
        let (p, q) = split_semiprime(n);
        assert_eq!(&p * &q, *n);
        assert_eq!(p.bits(), 20, "n={} p={}", n, p);
        assert_eq!(q.bits(), 20, "n={} q={}", n, q);
        assert!(is_probable_prime(&p));
        assert!(is_probable_prime(&q));
    }
}

#[test]
fn test_moderate_semiprimes_factor_window() {
    let bits = 30u64;
    let min_bits = (bits + 2) / 3;
    let max_bits = (bits + 1) / 2;
    let numbers = generate(5, bits, TestNumberNature::ModerateSemiprime).unwrap();
    for n in &numbers {
        assert_eq!(n.bits(), bits);
        let (p, q) = split_semiprime(n);
        assert_eq!(&p * &q, *n);
        assert!(is_probable_prime(&p));
        assert!(is_probable_prime(&q));
        assert!(
            (min_bits..=max_bits).contains(&p.bits()),
            "smaller factor of {} has {} bits, window is [{}, {}]",
            n,
            p.bits(),
            min_bits,
            max_bits
        );
    }
}

#[test]
fn test_moderate_semiprimes2_factor_window() {
    let bits = 30u64;
    let min_bits = (bits + 2) / 3;
    let max_bits = (bits + 1) / 2;
    let numbers = generate(5, bits, TestNumberNature::ModerateSemiprime2).unwrap();
    for n in &numbers {
        assert_eq!(n.bits(), bits);
        let (p, q) = split_semiprime(n);
        assert_eq!(&p * &q, *n);
        assert!(is_probable_prime(&p));
        assert!(is_probable_prime(&q));
        assert!(
            (min_bits..=max_bits).contains(&p.bits()),
            "smaller factor of {} has {} bits, window is [{}, {}]",
            n,
            p.bits(),
            min_bits,
            max_bits
        );
    }
}

#[test]
fn test_input_out_of_range() {
    let err = generate(1, 2, TestNumberNature::RandomComposite).unwrap_err();
    assert!(err.contains("2 bits"), "{}", err);
    assert!(generate(1, 3, TestNumberNature::RandomOddComposite).is_err());
    assert!(generate(1, 3, TestNumberNature::HardSemiprime).is_err());
}
