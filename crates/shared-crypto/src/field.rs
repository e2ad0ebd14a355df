//! # BN254 Scalar Field
//!
//! Prime field with
//! p = 21888242871839275222246405745257275088548364400416034343698204186575808495617,
//! the field every RLN circuit signal lives in.
//!
//! ## Properties
//!
//! - Values on the wire are 256-bit integers; only those below `p` convert
//! - Arithmetic is delegated to `ark-bn254` (Montgomery form)
//! - Division by zero surfaces as `None` from [`FieldElement::inverse`]

use crate::errors::CryptoError;
use ark_bn254::Fr;
use ark_ff::{BigInt, Field, PrimeField, Zero};
use primitive_types::U256;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// BN254 scalar modulus as a 256-bit integer.
pub const MODULUS: U256 = U256(<Fr as PrimeField>::MODULUS.0);

/// Element of the BN254 scalar field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldElement(Fr);

impl FieldElement {
    /// Convert a canonical integer into the field.
    ///
    /// Values `>= p` are rejected instead of reduced, so two distinct wire
    /// values never alias the same element.
    pub fn from_u256(value: &U256) -> Result<Self, CryptoError> {
        Fr::from_bigint(BigInt::new(value.0))
            .map(Self)
            .ok_or_else(|| CryptoError::NotInField(value.to_string()))
    }

    /// Create from a small integer.
    pub fn from_u64(value: u64) -> Self {
        Self(Fr::from(value))
    }

    /// Canonical integer form.
    pub fn to_u256(&self) -> U256 {
        U256(self.0.into_bigint().0)
    }

    /// Zero element.
    pub fn zero() -> Self {
        Self(Fr::zero())
    }

    /// Check if zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn inverse(&self) -> Option<Self> {
        Field::inverse(&self.0).map(Self)
    }

    /// Underlying arkworks element.
    pub fn inner(&self) -> Fr {
        self.0
    }
}

impl From<Fr> for FieldElement {
    fn from(value: Fr) -> Self {
        Self(value)
    }
}

impl From<FieldElement> for U256 {
    fn from(value: FieldElement) -> Self {
        value.to_u256()
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ark's Display trims to the shortest form; U256 prints plain decimal.
        write!(f, "{}", self.to_u256())
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}
