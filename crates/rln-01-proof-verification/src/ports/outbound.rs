//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define dependencies this subsystem needs.

use async_trait::async_trait;
use shared_types::{RlnFullProof, U256};
use thiserror::Error;

/// Error from the SNARK verification backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnarkError {
    /// Proof points could not be decoded by the backend
    #[error("Invalid proof encoding: {0}")]
    InvalidEncoding(String),

    /// Backend failed or is unreachable
    #[error("Verifier backend error: {0}")]
    Backend(String),
}

/// Zero-knowledge verification primitive for the RLN circuit.
///
/// Holds the circuit's verification key. The relay treats it as a black box:
/// `Ok(true)` is the only accepting answer.
#[async_trait]
pub trait SnarkVerifier: Send + Sync {
    /// Verify `proof` for the application `rln_identifier`.
    async fn verify(&self, rln_identifier: &U256, proof: &RlnFullProof)
        -> Result<bool, SnarkError>;
}

/// Time source abstraction for testability.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Manually driven clock.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTimeSource {
    time: std::sync::atomic::AtomicU64,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTimeSource {
    pub fn new(initial_ms: u64) -> Self {
        Self {
            time: std::sync::atomic::AtomicU64::new(initial_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn set(&self, time_ms: u64) {
        self.time.store(time_ms, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl TimeSource for MockTimeSource {
    fn now_ms(&self) -> u64 {
        self.time.load(std::sync::atomic::Ordering::SeqCst)
    }
}
