//! Extraction and validation of the `encryptedKey` field.
//!
//! The field is untrusted input: it is checked to be well-formed hex before
//! anything tries to decode or decrypt it.

use serde_json::Value;

use crate::core::constants::ENCRYPTED_KEY_FIELD;
use crate::core::locator::ConfigRecord;
use crate::error::{Error, Result};

/// A validated, even-length hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexString(String);

impl HexString {
    /// Validate `s` as ciphertext hex.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEncoding` if `s` is empty, contains a character
    /// outside `[0-9a-fA-F]`, or has odd length.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidEncoding("value is empty".to_string()));
        }

        if let Some(i) = s.chars().position(|c| !c.is_ascii_hexdigit()) {
            return Err(Error::InvalidEncoding(format!(
                "non-hex character at position {}",
                i + 1
            )));
        }

        if s.len() % 2 != 0 {
            return Err(Error::InvalidEncoding(format!(
                "odd number of hex digits ({})",
                s.len()
            )));
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Pull `encryptedKey` out of the config record and validate it.
///
/// # Errors
///
/// Returns `Error::MissingField` if the field is absent, not a string, or
/// empty, and `Error::InvalidEncoding` if it is not valid hex.
pub fn extract(record: &ConfigRecord) -> Result<HexString> {
    match record.field(ENCRYPTED_KEY_FIELD) {
        Some(Value::String(s)) if !s.is_empty() => HexString::parse(s),
        _ => Err(Error::MissingField),
    }
}

/// Decode validated hex into ciphertext bytes.
pub fn decode(hex: &HexString) -> Result<Vec<u8>> {
    hex::decode(hex.as_str()).map_err(|e| Error::InvalidEncoding(e.to_string()))
}
