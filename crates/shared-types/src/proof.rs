//! # RLN Proof Types
//!
//! Canonical in-memory representation of an RLN proof. Clients send the
//! proof either as a JSON object or as a JSON-encoded string; both are
//! normalized into [`RlnFullProof`] once, at the boundary.

use crate::errors::WireError;
use crate::field::DecimalField;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// Public signals exposed by the RLN circuit.
///
/// `(x, y)` is the point on the sender's per-epoch line: `x` is the
/// message-hash binding and `y = a0 + a1 * x`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSignals {
    /// Message-hash binding.
    #[serde_as(as = "DecimalField")]
    pub x: U256,
    /// Secret share evaluated at `x`.
    #[serde_as(as = "DecimalField")]
    pub y: U256,
    /// Membership Merkle root the proof was generated against.
    #[serde_as(as = "DecimalField")]
    pub root: U256,
    /// RLN nullifier for `(identity, epoch)`.
    #[serde_as(as = "DecimalField")]
    pub nullifier: U256,
    /// `Poseidon(epoch, rln_identifier)`.
    #[serde_as(as = "DecimalField")]
    pub external_nullifier: U256,
}

impl PublicSignals {
    /// The `(x, y)` share carried by this proof.
    pub fn share(&self) -> (U256, U256) {
        (self.x, self.y)
    }
}

/// Groth16 proof points as produced by snarkjs.
///
/// Opaque to the relay; handed to the SNARK verifier untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Groth16Proof {
    /// G1 point A.
    pub pi_a: Vec<String>,
    /// G2 point B.
    pub pi_b: Vec<Vec<String>>,
    /// G1 point C.
    pub pi_c: Vec<String>,
    /// Proof system identifier (usually `groth16`).
    #[serde(default)]
    pub protocol: String,
    /// Curve identifier (usually `bn128`).
    #[serde(default)]
    pub curve: String,
}

/// SNARK witness plus the public signals it commits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnarkProof {
    /// Opaque Groth16 proof.
    pub proof: Groth16Proof,
    /// Public signals bound into the proof.
    pub public_signals: PublicSignals,
}

/// A complete RLN proof.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RlnFullProof {
    /// The SNARK proof and its public signals.
    pub snark_proof: SnarkProof,
    /// Epoch the proof was generated for.
    #[serde_as(as = "DecimalField")]
    pub epoch: U256,
    /// Application identifier; the room id for this relay.
    #[serde_as(as = "DecimalField")]
    pub rln_identifier: U256,
}

impl RlnFullProof {
    /// Shorthand for the public signals.
    pub fn signals(&self) -> &PublicSignals {
        &self.snark_proof.public_signals
    }
}

/// Proof as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProofPayload {
    /// Structured JSON object.
    Structured(Box<RlnFullProof>),
    /// JSON object serialized into a string.
    Encoded(String),
}

impl ProofPayload {
    /// Normalize into the canonical proof.
    pub fn into_proof(self) -> Result<RlnFullProof, WireError> {
        match self {
            Self::Structured(proof) => Ok(*proof),
            Self::Encoded(text) => serde_json::from_str(&text)
                .map_err(|e| WireError::MalformedProof(e.to_string())),
        }
    }
}
