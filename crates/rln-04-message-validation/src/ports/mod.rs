//! # Ports Layer

pub mod inbound;
pub mod outbound;

pub use inbound::MessageValidationApi;
pub use outbound::{
    DirectoryError, MessageStore, RelayError, RelaySink, RoomDirectory, StoreError,
};
