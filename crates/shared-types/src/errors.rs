//! # Error Types
//!
//! Defines the errors raised while turning wire input into typed values.

use thiserror::Error;

/// Errors raised while parsing a message from its wire form.
///
/// Every variant is a `MalformedInput` case: the message is rejected without
/// any further processing and never triggers a ban.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WireError {
    /// A required field was absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field value is not a decimal or `0x` hex integer.
    #[error("Invalid field value: {0}")]
    InvalidFieldValue(String),

    /// The proof could not be decoded into an RLN proof.
    #[error("Malformed proof: {0}")]
    MalformedProof(String),
}
