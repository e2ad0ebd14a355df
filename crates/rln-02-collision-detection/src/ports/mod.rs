//! # Ports Layer

pub mod inbound;
pub mod outbound;

pub use inbound::CollisionDetectionApi;
pub use outbound::{HistoryError, MessageHistory};
