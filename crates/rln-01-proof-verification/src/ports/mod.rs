//! # Ports Layer
//!
//! - `inbound`: API offered to the message validation orchestrator
//! - `outbound`: SNARK verifier and clock this subsystem depends on

pub mod inbound;
pub mod outbound;

pub use inbound::ProofVerificationApi;
pub use outbound::{SnarkError, SnarkVerifier, SystemTimeSource, TimeSource};

#[cfg(any(test, feature = "test-utils"))]
pub use outbound::MockTimeSource;
