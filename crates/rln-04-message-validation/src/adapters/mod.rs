//! # Adapters
//!
//! In-process implementations of the relay's storage ports.

pub mod memory;

pub use memory::{InMemoryRelayStore, RecordingExternalGroups, RecordingRelay};
