//! # Shared Types Crate
//!
//! Data model shared by every relay subsystem: rooms, messages, RLN proofs,
//! and the wire form messages arrive in.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Parse Once**: [`RawMessage::into_message`] is the only place that deals
//!   with missing fields or string-vs-object proofs. Everything downstream
//!   works with the strict [`Message`].
//! - **Decimal Field Strings**: Field values travel as decimal strings
//!   ([`DecimalField`]) and live as [`U256`] in memory.

pub mod entities;
pub mod errors;
pub mod field;
pub mod proof;
pub mod wire;

pub use entities::*;
pub use errors::*;
pub use field::{parse_field_str, DecimalField};
pub use proof::{Groth16Proof, ProofPayload, PublicSignals, RlnFullProof, SnarkProof};
pub use wire::RawMessage;
