//! # Revocation Subsystem (RLN-03)
//!
//! Bans an identity once its secret has been recovered from a rate-limit
//! violation.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Commitment derivation and result types
//! - **Ports Layer** (`ports/`): `RevocationApi` in; membership store,
//!   external group service and notice sink out
//! - **Service Layer** (`service.rs`): `RevocationHandler`
//! - **Adapters** (`adapters/`): HTTP client for the external group service
//!
//! ## Consistency
//!
//! The local ban is authoritative. The external group removal runs on a
//! detached task; its failure is logged and never rolls the ban back.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::HttpExternalGroupClient;
pub use domain::{
    ban_notice, derive_commitments, BannedCommitments, ExternalRemoval, RevocationError,
    RevocationOutcome,
};
pub use ports::inbound::RevocationApi;
pub use ports::outbound::{
    BanStatus, ExternalGroupClient, ExternalGroupError, MembershipError, MembershipStore,
    NoticeError, SystemNoticeSink,
};
pub use service::RevocationHandler;
