//! # Domain Layer

pub mod entities;

pub use entities::{
    ban_notice, derive_commitments, BannedCommitments, ExternalRemoval, RevocationError,
    RevocationOutcome,
};
