//! # Domain Layer
//!
//! The ephemeral cache and collision classification.

pub mod cache;
pub mod errors;
pub mod recovery;

pub use cache::{spawn_sweeper, CacheKey, EphemeralMessageCache, SHARD_COUNT};
pub use errors::CollisionError;
pub use recovery::{classify, CollisionResult, RecoveredSecret};
