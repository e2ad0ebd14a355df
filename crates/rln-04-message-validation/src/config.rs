//! Validation pipeline configuration from environment variables.

use rln_01_proof_verification::{VerifierConfig, DEFAULT_EPOCH_ERROR_RANGE};
use shared_crypto::{DEFAULT_TREE_DEPTH, MAX_TREE_DEPTH};
use std::env;
use std::time::Duration;

/// Default interval between ephemeral cache sweeps.
pub const DEFAULT_CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(10);

/// Default timeout for external group service requests.
pub const DEFAULT_EXTERNAL_GROUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the whole validation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Proof verifier tunables
    pub verifier: VerifierConfig,

    /// How often stale cache entries are dropped
    pub cache_sweep_interval: Duration,

    /// Request timeout for the external group service
    pub external_group_timeout: Duration,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            verifier: VerifierConfig::default(),
            cache_sweep_interval: DEFAULT_CACHE_SWEEP_INTERVAL,
            external_group_timeout: DEFAULT_EXTERNAL_GROUP_TIMEOUT,
        }
    }
}

impl ValidationConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RLN_EPOCH_ERROR_RANGE`: Epoch tolerance (default: 1)
    /// - `RLN_SNARK_TIMEOUT_MS`: SNARK verification timeout (default: none)
    /// - `RLN_CACHE_SWEEP_INTERVAL_MS`: Cache sweep interval (default: 10000)
    /// - `RLN_MERKLE_DEPTH`: Membership tree depth (default: 20)
    /// - `RLN_EXTERNAL_GROUP_TIMEOUT_MS`: External group request timeout (default: 5000)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let merkle_depth = number("RLN_MERKLE_DEPTH")
            .map(|d| d as usize)
            .filter(|d| (1..=MAX_TREE_DEPTH).contains(d))
            .unwrap_or(DEFAULT_TREE_DEPTH);

        Self {
            verifier: VerifierConfig {
                epoch_error_range: number("RLN_EPOCH_ERROR_RANGE")
                    .unwrap_or(DEFAULT_EPOCH_ERROR_RANGE),
                snark_timeout: number("RLN_SNARK_TIMEOUT_MS")
                    .filter(|ms| *ms > 0)
                    .map(Duration::from_millis),
                merkle_depth,
            },
            cache_sweep_interval: number("RLN_CACHE_SWEEP_INTERVAL_MS")
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_CACHE_SWEEP_INTERVAL),
            external_group_timeout: number("RLN_EXTERNAL_GROUP_TIMEOUT_MS")
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_EXTERNAL_GROUP_TIMEOUT),
        }
    }
}
