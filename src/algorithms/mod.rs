// src/algorithms/mod.rs
//
// Factoring engines for the residues left over by trial division, plus the
// indirection the relation classifier uses for residues its own 63-bit
// engines cannot split.

pub mod hart;
pub mod lehman;
pub mod pollard_rho;
pub mod tdiv63;

use log::warn;
use num::{BigUint, One, ToPrimitive};

pub use hart::HartRace;
pub use lehman::Lehman;
pub use pollard_rho::{PollardRhoBrent63, PollardRhoBrent64};
pub use tdiv63::TDiv63;

/// Opaque factoring engine. The relation classifier owns one behind a box
/// for composite residues of 63 bits and more; a full SIQS driver injects a
/// reduced-parameter instance of itself here, which breaks the classifier /
/// sieve dependency cycle at the type level.
pub trait Factorizer {
    /// Returns a nontrivial factor of composite `n`, or 1 on failure.
    fn find_single_factor(&self, n: &BigUint) -> BigUint;

    fn name(&self) -> &str;
}

/// Size-dispatched combination of the 63-bit engines. Suitable as the
/// injected factorizer whenever residues are known to stay below 63 bits;
/// anything larger is reported and rejected rather than attempted.
pub struct SmallEngineFactorizer {
    hart: HartRace,
    rho63: PollardRhoBrent63,
    rho64: PollardRhoBrent64,
}

impl SmallEngineFactorizer {
    pub fn new() -> Self {
        SmallEngineFactorizer {
            hart: HartRace::new(),
            rho63: PollardRhoBrent63::new(),
            rho64: PollardRhoBrent64::new(),
        }
    }
}

impl Default for SmallEngineFactorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Factorizer for SmallEngineFactorizer {
    fn find_single_factor(&self, n: &BigUint) -> BigUint {
        let bits = n.bits();
        match n.to_u64() {
            Some(n64) if bits < 50 => BigUint::from(self.hart.find_single_factor(n64)),
            Some(n64) if bits < 57 => BigUint::from(self.rho63.find_single_factor(n64)),
            Some(n64) if bits < 63 => BigUint::from(self.rho64.find_single_factor(n64)),
            _ => {
                warn!("no engine for a {}-bit residue, rejecting", bits);
                BigUint::one()
            }
        }
    }

    fn name(&self) -> &str {
        "hart+rho(63)"
    }
}

impl Factorizer for Lehman {
    fn find_single_factor(&self, n: &BigUint) -> BigUint {
        match n.to_u64() {
            Some(n64) if n.bits() < 64 => BigUint::from(Lehman::find_single_factor(self, n64)),
            _ => {
                warn!("lehman limited to 63-bit inputs, got {} bits", n.bits());
                BigUint::one()
            }
        }
    }

    fn name(&self) -> &str {
        "lehman"
    }
}
