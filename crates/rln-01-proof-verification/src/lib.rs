//! # Proof Verification Subsystem (RLN-01)
//!
//! Decides whether a message carries a valid RLN proof for its room and
//! epoch.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Epoch clock and pure verification gates
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Service Layer** (`service.rs`): Runs the gates and calls the SNARK verifier
//!
//! ## Security Notes
//!
//! - **Content Binding**: `x` must equal the content hash, so a proof cannot be
//!   replayed against different content
//! - **Context Binding**: RLN identifier, epoch and external nullifier must
//!   all match the room and the claimed epoch
//! - **Root Check is Advisory**: a stale membership root is logged; the
//!   SNARK verifier has the final word

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::{VerifierConfig, DEFAULT_EPOCH_ERROR_RANGE};
pub use domain::epoch::{current_epoch, EpochWindow};
pub use domain::errors::ProofRejection;
pub use domain::gates::{expected_external_nullifier, RootCheck};
pub use ports::inbound::ProofVerificationApi;
pub use ports::outbound::{SnarkError, SnarkVerifier, SystemTimeSource, TimeSource};
pub use service::ProofVerificationService;

#[cfg(any(test, feature = "test-utils"))]
pub use ports::outbound::MockTimeSource;
