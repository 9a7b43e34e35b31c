// src/core/static_random.rs

use lazy_static::lazy_static;
use num::BigUint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;

pub struct StaticRandom {
    rng: ChaCha8Rng,
}

impl StaticRandom {
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill(&mut seed);
        let mut rng = ChaCha8Rng::from_seed(seed);
        let counter = rng.gen_range(100..200);
        for _ in 0..counter {
            rng.gen::<u32>();
        }
        StaticRandom { rng }
    }

    pub fn next(&mut self) -> u32 {
        self.rng.gen()
    }

    pub fn next_range(&mut self, min_value: u32, max_value: u32) -> u32 {
        self.rng.gen_range(min_value..max_value)
    }

    pub fn next_bytes(&mut self, bytes: &mut [u8]) {
        self.rng.fill(bytes);
    }

    /// Uniform draw from `[0, 2^bits)`.
    pub fn next_bits(&mut self, bits: u64) -> BigUint {
        if bits == 0 {
            return BigUint::from(0u32);
        }
        let bytes = ((bits + 7) / 8) as usize;
        let mut buffer = vec![0u8; bytes];
        self.next_bytes(&mut buffer);
        let excess = (bytes as u64) * 8 - bits;
        buffer[0] &= 0xffu8 >> excess;
        BigUint::from_bytes_be(&buffer)
    }
}

impl Default for StaticRandom {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref PROCESS_RNG: Mutex<StaticRandom> = Mutex::new(StaticRandom::new());
}

/// Runs `f` against the process-scope random source. The test-number
/// generator draws through this so repeated calls share one entropy-seeded
/// stream regardless of the calling thread.
pub fn with_process_rng<T>(f: impl FnOnce(&mut StaticRandom) -> T) -> T {
    let mut rng = PROCESS_RNG.lock().unwrap();
    f(&mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_bits_length() {
        let mut rng = StaticRandom::new();
        for bits in [1u64, 7, 8, 9, 31, 32, 40, 127] {
            for _ in 0..50 {
                let value = rng.next_bits(bits);
                assert!(value.bits() <= bits, "bits={} value={}", bits, value);
            }
        }
    }

    #[test]
    fn test_next_bits_hits_full_length() {
        // with 200 draws of 16 bits, missing the top bit every time is a
        // 2^-200 event
        let mut rng = StaticRandom::new();
        let full = (0..200).any(|_| rng.next_bits(16).bits() == 16);
        assert!(full);
    }

    #[test]
    fn test_next_range() {
        let mut rng = StaticRandom::new();
        for _ in 0..100 {
            let v = rng.next_range(10, 20);
            assert!((10..20).contains(&v));
        }
    }

    #[test]
    fn test_process_rng_accessible() {
        let a = with_process_rng(|rng| rng.next());
        let b = with_process_rng(|rng| rng.next());
        // two draws from a 32-bit stream colliding is unlikely but legal;
        // this mainly exercises the lock
        let _ = (a, b);
    }
}
