//! # RLN Hash Functions
//!
//! The exact hash functions RLN clients use when building proofs. The relay
//! recomputes them, so any divergence here rejects honest messages.
//!
//! | Function | Construction |
//! |----------|--------------|
//! | [`signal_hash`] | `keccak256(json_string(content)) >> 8` |
//! | [`identity_commitment`] | `Poseidon([secret])` |
//! | [`rate_commitment`] | `Poseidon([identity_commitment, limit])` |
//! | [`external_nullifier`] | `Poseidon([epoch, rln_identifier])` |
//!
//! Poseidon uses the circom parameters over BN254.

use crate::errors::CryptoError;
use crate::field::FieldElement;
use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonHasher};
use primitive_types::U256;
use sha3::{Digest, Keccak256};

/// Keccak-256 output.
pub type Hash = [u8; 32];

/// Hash data with Keccak-256 (one-shot).
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Keccak-256 shifted right by 8 bits.
///
/// The result is below 2^248 and therefore always a valid field element.
pub fn hash_to_field(data: &[u8]) -> U256 {
    U256::from_big_endian(&keccak256(data)) >> 8
}

/// Message-hash binder: the value a proof must carry as `x`.
///
/// The content is hashed in its JSON string form (quoted and escaped), which
/// is how clients serialize it before hashing.
pub fn signal_hash(content: &str) -> U256 {
    let encoded = serde_json::Value::String(content.to_owned()).to_string();
    hash_to_field(encoded.as_bytes())
}

/// Circom-compatible Poseidon over 1..=12 inputs.
pub fn poseidon_hash(inputs: &[FieldElement]) -> Result<FieldElement, CryptoError> {
    let mut hasher = Poseidon::<Fr>::new_circom(inputs.len())
        .map_err(|e| CryptoError::Poseidon(e.to_string()))?;
    let frs: Vec<Fr> = inputs.iter().map(FieldElement::inner).collect();
    hasher
        .hash(&frs)
        .map(FieldElement::from)
        .map_err(|e| CryptoError::Poseidon(e.to_string()))
}

/// Public commitment to an identity secret.
pub fn identity_commitment(secret: FieldElement) -> Result<FieldElement, CryptoError> {
    poseidon_hash(&[secret])
}

/// Membership leaf binding an identity to its per-epoch quota.
pub fn rate_commitment(
    identity_commitment: FieldElement,
    user_message_limit: u64,
) -> Result<FieldElement, CryptoError> {
    poseidon_hash(&[identity_commitment, FieldElement::from_u64(user_message_limit)])
}

/// Per-room, per-epoch domain separator bound into every proof.
pub fn external_nullifier(
    epoch: FieldElement,
    rln_identifier: FieldElement,
) -> Result<FieldElement, CryptoError> {
    poseidon_hash(&[epoch, rln_identifier])
}
