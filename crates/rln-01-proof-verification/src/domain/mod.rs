//! # Domain Layer
//!
//! Pure verification logic: the epoch clock, the ordered gates, and the
//! rejection taxonomy. No I/O.

pub mod epoch;
pub mod errors;
pub mod gates;

pub use epoch::{current_epoch, EpochWindow};
pub use errors::ProofRejection;
pub use gates::RootCheck;
