// src/config/sieve_config.rs

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime tuning for the relation-collection engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SieveConfig {
    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Collect per-phase timings and the residue-size histogram in the
    /// trial-division classifier
    pub profile: bool,

    /// Exponent e of the smoothness cutoff maxQRest = N^e. Candidates whose
    /// unfactored residue exceeds the cutoff are rejected without a prime
    /// test.
    pub max_q_rest_exponent: f64,

    /// Run trial division before the Lehman k-loop. Recommended when inputs
    /// frequently have factors below cbrt(N).
    pub lehman_tdiv_first: bool,
}

impl Default for SieveConfig {
    fn default() -> Self {
        SieveConfig {
            log_level: "info".to_string(),
            profile: false,
            max_q_rest_exponent: 0.16,
            lehman_tdiv_first: false,
        }
    }
}

impl SieveConfig {
    /// Load configuration with precedence: config file → env vars → defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("log_level", "info")?
            .set_default("profile", false)?
            .set_default("max_q_rest_exponent", 0.16)?
            .set_default("lehman_tdiv_first", false)?;

        if Path::new("siqs.toml").exists() {
            builder = builder.add_source(File::with_name("siqs.toml"));
        }

        // Override with environment variables (prefix: SIQS_)
        builder = builder.add_source(
            Environment::with_prefix("SIQS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// The smoothness cutoff for a factoring target of magnitude `n_approx`.
    pub fn max_q_rest(&self, n_approx: f64) -> f64 {
        n_approx.powf(self.max_q_rest_exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SieveConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.profile);
        assert_eq!(config.max_q_rest_exponent, 0.16);
        assert!(!config.lehman_tdiv_first);
    }

    #[test]
    fn test_load_without_file() {
        let config = SieveConfig::load().unwrap_or_else(|_| SieveConfig::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_max_q_rest_grows_with_n() {
        let config = SieveConfig::default();
        let small = config.max_q_rest(1e40);
        let large = config.max_q_rest(1e80);
        assert!(large > small);
        assert!((config.max_q_rest(1e50) - 1e8).abs() < 1e3);
    }
}
