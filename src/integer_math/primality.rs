// src/integer_math/primality.rs
//
// Baillie-PSW probable prime test: a small-prime screen, one strong
// probable-prime test to base 2, then a strong Lucas test with Selfridge
// parameters. No composite below 2^64 passes the combination, and no
// counterexample of any size is known.

use num::{BigInt, BigUint, Integer, One, ToPrimitive, Zero};

const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// BPSW probable-prime test.
pub fn is_probable_prime(n: &BigUint) -> bool {
    if *n < BigUint::from(2u32) {
        return false;
    }
    for &p in SMALL_PRIMES.iter() {
        let p_big = BigUint::from(p);
        if *n == p_big {
            return true;
        }
        if (n % &p_big).is_zero() {
            return false;
        }
    }
    if !strong_probable_prime(n, 2) {
        return false;
    }
    strong_lucas_probable_prime(n)
}

/// Smallest probable prime that is not below `n`.
pub fn next_probable_prime(n: &BigUint) -> BigUint {
    let two = BigUint::from(2u32);
    if *n <= two {
        return two;
    }
    let mut candidate = n.clone();
    if candidate.is_even() {
        candidate += 1u32;
    }
    while !is_probable_prime(&candidate) {
        candidate += 2u32;
    }
    candidate
}

/// Strong probable-prime (Miller-Rabin) test for a single base.
fn strong_probable_prime(n: &BigUint, base: u32) -> bool {
    let n_minus_1 = n - 1u32;
    let s = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> s;

    let mut x = BigUint::from(base).modpow(&d, n);
    if x.is_one() || x == n_minus_1 {
        return true;
    }
    for _ in 1..s {
        x = (&x * &x) % n;
        if x == n_minus_1 {
            return true;
        }
        if x.is_one() {
            return false;
        }
    }
    false
}

/// Jacobi symbol (a | n) for odd positive n.
pub fn jacobi(a: &BigInt, n: &BigUint) -> i32 {
    debug_assert!(n.is_odd());
    let mut n = BigInt::from(n.clone());
    let mut a = a.mod_floor(&n);
    let mut result = 1;
    let three = BigInt::from(3);
    while !a.is_zero() {
        while a.is_even() {
            a >>= 1;
            let n_mod_8 = (&n % 8i32).to_i32().unwrap();
            if n_mod_8 == 3 || n_mod_8 == 5 {
                result = -result;
            }
        }
        std::mem::swap(&mut a, &mut n);
        if (&a % 4) == three && (&n % 4) == three {
            result = -result;
        }
        a = a.mod_floor(&n);
    }
    if n.is_one() {
        result
    } else {
        0
    }
}

fn is_perfect_square(n: &BigUint) -> bool {
    let root = n.sqrt();
    &root * &root == *n
}

/// Strong Lucas probable-prime test with Selfridge's method A parameters:
/// D = 5, -7, 9, -11, ... with (D | n) = -1, P = 1, Q = (1 - D) / 4.
fn strong_lucas_probable_prime(n: &BigUint) -> bool {
    let n_int = BigInt::from(n.clone());

    let mut d = 5i64;
    loop {
        let j = jacobi(&BigInt::from(d), n);
        if j == 0 {
            // |D| shares a factor with n; n survived the small-prime
            // screen, so that factor is proper
            return false;
        }
        if j == -1 {
            break;
        }
        if d == 13 && is_perfect_square(n) {
            return false;
        }
        d = if d > 0 { -(d + 2) } else { -(d - 2) };
    }
    let q = (1 - d) / 4;

    // n + 1 = odd_part * 2^s
    let n_plus_1 = n + 1u32;
    let s = n_plus_1.trailing_zeros().unwrap_or(0);
    let odd_part = &n_plus_1 >> s;

    // U_1 = 1, V_1 = P = 1
    let mut u = BigInt::one();
    let mut v = BigInt::one();
    let d_big = BigInt::from(d);
    let q_big = BigInt::from(q);
    let mut qk = q_big.mod_floor(&n_int);

    let bits = odd_part.bits();
    for i in (0..bits - 1).rev() {
        // index doubling: U_2k = U_k * V_k, V_2k = V_k^2 - 2 Q^k
        u = (&u * &v).mod_floor(&n_int);
        v = (&v * &v - 2i64 * &qk).mod_floor(&n_int);
        qk = (&qk * &qk).mod_floor(&n_int);
        if odd_part.bit(i) {
            // index increment with P = 1:
            // U_{k+1} = (U_k + V_k) / 2, V_{k+1} = (D U_k + V_k) / 2
            let u_next = half_mod(&(&u + &v), &n_int);
            let v_next = half_mod(&(&d_big * &u + &v), &n_int);
            u = u_next;
            v = v_next;
            qk = (&qk * &q_big).mod_floor(&n_int);
        }
    }

    // U_odd == 0, or V_{odd * 2^r} == 0 for some 0 <= r < s
    if u.is_zero() || v.is_zero() {
        return true;
    }
    for _ in 1..s {
        v = (&v * &v - 2i64 * &qk).mod_floor(&n_int);
        if v.is_zero() {
            return true;
        }
        qk = (&qk * &qk).mod_floor(&n_int);
    }
    false
}

/// Halves x modulo odd n.
fn half_mod(x: &BigInt, n: &BigInt) -> BigInt {
    let x = x.mod_floor(n);
    if x.is_even() {
        x >> 1
    } else {
        (x + n) >> 1
    }
}
