//! # Shared Crypto - RLN Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `field` | BN254 scalar field | Signal arithmetic |
//! | `hashing` | Keccak-256, Poseidon (circom) | Signal binding, commitments |
//! | `merkle` | Incremental Poseidon tree | Membership root |
//! | `shamir` | Two-point interpolation | Secret recovery |
//!
//! ## Compatibility
//!
//! Every function here must produce bit-identical results to the client
//! libraries that generate RLN proofs. Poseidon uses the circom round
//! constants; Keccak outputs are shifted right by 8 bits to fit the field.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod field;
pub mod hashing;
pub mod merkle;
pub mod shamir;

// Re-exports
pub use errors::CryptoError;
pub use field::{FieldElement, MODULUS};
pub use hashing::{
    external_nullifier, hash_to_field, identity_commitment, keccak256, poseidon_hash,
    rate_commitment, signal_hash,
};
pub use merkle::{membership_root, MembershipTree, DEFAULT_TREE_DEPTH, MAX_TREE_DEPTH};
pub use shamir::{interpolate_line, recover_secret, Polynomial, Share};
