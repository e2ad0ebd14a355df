//! # Field Value Encoding
//!
//! Field values (room ids, public signals, commitments) are 256-bit integers.
//! Clients exchange them as decimal strings because they originate from
//! JavaScript `bigint`s; hex strings with a `0x` prefix and plain JSON numbers
//! are accepted too.

use crate::errors::WireError;
use primitive_types::U256;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

/// Parse a field value from its textual wire form.
///
/// Accepts decimal (`"12345"`) and `0x`-prefixed hex (`"0x3039"`).
pub fn parse_field_str(text: &str) -> Result<U256, WireError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(WireError::InvalidFieldValue(text.to_string()));
    }

    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => U256::from_str_radix(hex, 16).ok(),
        None => U256::from_dec_str(trimmed).ok(),
    };

    parsed.ok_or_else(|| WireError::InvalidFieldValue(text.to_string()))
}

/// `serde_with` adapter that encodes a [`U256`] as a decimal string.
///
/// ```rust,ignore
/// #[serde_as]
/// #[derive(Serialize, Deserialize)]
/// struct Signals {
///     #[serde_as(as = "DecimalField")]
///     x: U256,
/// }
/// ```
pub struct DecimalField;

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldRepr {
    Text(String),
    Number(u64),
}

impl SerializeAs<U256> for DecimalField {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(source)
    }
}

impl<'de> DeserializeAs<'de, U256> for DecimalField {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        match FieldRepr::deserialize(deserializer)? {
            FieldRepr::Text(text) => parse_field_str(&text).map_err(D::Error::custom),
            FieldRepr::Number(n) => Ok(U256::from(n)),
        }
    }
}
