//! # Collision Detection Subsystem (RLN-02)
//!
//! Detects a second message under the same RLN nullifier and recovers the
//! sender's identity secret from the two shares.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Ephemeral cache, collision classification
//! - **Ports Layer** (`ports/`): `CollisionDetectionApi` in, `MessageHistory` out
//! - **Service Layer** (`service.rs`): `CollisionDetector`
//!
//! ## Guarantees
//!
//! - At most one `NoCollision` per `(room, epoch, nullifier)`, however many
//!   submissions race
//! - A history outage is an error, never a silent "no collision"
//! - Equal `x` values are a duplicate, not a fault

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::cache::{spawn_sweeper, CacheKey, EphemeralMessageCache, SHARD_COUNT};
pub use domain::errors::CollisionError;
pub use domain::recovery::{classify, CollisionResult, RecoveredSecret};
pub use ports::inbound::CollisionDetectionApi;
pub use ports::outbound::{HistoryError, MessageHistory};
pub use service::CollisionDetector;
