//! # Message Validation Subsystem (RLN-04)
//!
//! Orchestrates proof verification, collision detection and revocation for
//! every inbound message and decides whether it is relayed.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `ValidationOutcome`, `ValidationError`
//! - **Ports Layer** (`ports/`): `MessageValidationApi` in; message store,
//!   room directory and relay sink out
//! - **Service Layer** (`service.rs`): `MessageValidationService`
//! - **Container** (`container.rs`): wires subsystems RLN-01 to RLN-04
//! - **Adapters** (`adapters/`): in-memory store and recording sinks
//!
//! ## Guarantees
//!
//! - A message is broadcast only after it is accepted
//! - Accepted messages in persistent rooms are stored before the verdict
//!   is returned
//! - Any collaborator failure is an error, never an acceptance

pub mod adapters;
pub mod config;
pub mod container;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{InMemoryRelayStore, RecordingExternalGroups, RecordingRelay};
pub use config::{ValidationConfig, DEFAULT_CACHE_SWEEP_INTERVAL, DEFAULT_EXTERNAL_GROUP_TIMEOUT};
pub use container::{RelayContainer, RelayPorts};
pub use domain::{ValidationError, ValidationOutcome};
pub use ports::inbound::MessageValidationApi;
pub use ports::outbound::{
    DirectoryError, MessageStore, RelayError, RelaySink, RoomDirectory, StoreError,
};
pub use service::MessageValidationService;
