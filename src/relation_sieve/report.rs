// src/relation_sieve/report.rs

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Statistics block of one trial-division pass over a polynomial group.
/// Durations are only accumulated when profiling is enabled; the counters
/// are always maintained.
#[derive(Clone, Debug, Default)]
pub struct TDivReport {
    pub test_count: u64,
    pub sufficient_smooth_count: u64,
    pub aq_duration: Duration,
    pub pass1_duration: Duration,
    pub pass2_duration: Duration,
    pub prime_test_duration: Duration,
    pub factor_duration: Duration,
    /// residue bit length at entry to the large-factor branch -> count
    pub q_rest_sizes: BTreeMap<u64, u64>,
}

impl TDivReport {
    pub fn smooth_ratio(&self) -> f64 {
        if self.test_count == 0 {
            0.0
        } else {
            self.sufficient_smooth_count as f64 / self.test_count as f64
        }
    }
}

impl fmt::Display for TDivReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tested {} candidates, {} sufficiently smooth ({:.2}%); \
             aq={:?} pass1={:?} pass2={:?} prp={:?} factor={:?}",
            self.test_count,
            self.sufficient_smooth_count,
            100.0 * self.smooth_ratio(),
            self.aq_duration,
            self.pass1_duration,
            self.pass2_duration,
            self.prime_test_duration,
            self.factor_duration,
        )?;
        if !self.q_rest_sizes.is_empty() {
            write!(f, "; residue bits {:?}", self.q_rest_sizes)?;
        }
        Ok(())
    }
}
