//! # Domain Layer
//!
//! Validation outcomes and pipeline errors.

pub mod errors;
pub mod outcome;

pub use errors::ValidationError;
pub use outcome::ValidationOutcome;
