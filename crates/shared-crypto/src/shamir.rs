//! # Linear Secret Recovery
//!
//! An RLN sender publishes one point per message on the line
//! `y = a0 + a1 * x`, where `a0` is their identity secret and `a1` is fixed
//! for the epoch. Two points reveal the line and with it `a0`.

use crate::errors::CryptoError;
use crate::field::FieldElement;

/// A share: one evaluation point of a sender's line.
pub type Share = (FieldElement, FieldElement);

/// Polynomial represented as coefficients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coeffs: Vec<FieldElement>,
}

impl Polynomial {
    /// Create polynomial from coefficients (lowest degree first).
    pub fn new(coeffs: Vec<FieldElement>) -> Self {
        let mut p = Self { coeffs };
        p.normalize();
        p
    }

    /// Get degree (-1 for zero polynomial).
    pub fn degree(&self) -> isize {
        self.coeffs.len() as isize - 1
    }

    /// Evaluate polynomial at point.
    pub fn evaluate(&self, x: FieldElement) -> FieldElement {
        // Horner's method
        self.coeffs
            .iter()
            .rev()
            .fold(FieldElement::zero(), |acc, coeff| acc * x + *coeff)
    }

    /// Value at zero.
    pub fn constant_term(&self) -> FieldElement {
        self.coeffs.first().copied().unwrap_or_default()
    }

    /// Get coefficients.
    pub fn coefficients(&self) -> &[FieldElement] {
        &self.coeffs
    }

    /// Remove leading zeros.
    fn normalize(&mut self) {
        while self.coeffs.last().is_some_and(|c| c.is_zero()) {
            self.coeffs.pop();
        }
    }
}

/// The unique line through two shares.
///
/// Fails with [`CryptoError::DegenerateShares`] when both shares have the
/// same `x`, instead of dividing by zero.
pub fn interpolate_line(first: Share, second: Share) -> Result<Polynomial, CryptoError> {
    let (x1, y1) = first;
    let (x2, y2) = second;

    let dx_inv = (x1 - x2).inverse().ok_or(CryptoError::DegenerateShares)?;
    let slope = (y1 - y2) * dx_inv;
    let intercept = y1 - slope * x1;

    Ok(Polynomial::new(vec![intercept, slope]))
}

/// Recover the sender's secret from two shares.
pub fn recover_secret(first: Share, second: Share) -> Result<FieldElement, CryptoError> {
    interpolate_line(first, second).map(|line| line.constant_term())
}
