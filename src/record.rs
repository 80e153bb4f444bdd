//! Credential record encoding.
//!
//! Format:
//! ```text
//! SALT_HEX ":" DERIVED_KEY_HEX
//! ```
//!
//! Both halves are hex; freshly hashed records use uppercase digits. The
//! record does not carry the KDF parameters, so it can only be verified with
//! the configuration that produced it.

use std::fmt;
use std::str::FromStr;

use crate::crypto::{bytes_to_hex, hex_to_bytes};
use crate::error::HashError;

/// Separator between the salt and derived key halves.
pub const DELIMITER: char = ':';

/// A parsed `SALT_HEX:KEY_HEX` credential record.
///
/// Records are immutable; a password change produces a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    salt: Vec<u8>,
    salt_hex: String,
    key_hex: String,
}

impl CredentialRecord {
    pub(crate) fn new(salt: Vec<u8>, key_hex: String) -> Self {
        Self {
            salt_hex: bytes_to_hex(&salt),
            salt,
            key_hex,
        }
    }

    /// Parses a stored record, splitting on the first delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::MalformedRecord`] if:
    /// - The delimiter is missing
    /// - Either half contains a non-hex character (including a second `:`)
    /// - Either half has an odd number of characters
    pub fn parse(stored: &str) -> Result<Self, HashError> {
        let (salt_hex, key_hex) = stored
            .split_once(DELIMITER)
            .ok_or_else(|| HashError::MalformedRecord(format!("missing '{DELIMITER}' delimiter")))?;

        let salt = hex_to_bytes(salt_hex)?;
        hex_to_bytes(key_hex)?;

        Ok(Self {
            salt,
            salt_hex: salt_hex.to_string(),
            key_hex: key_hex.to_string(),
        })
    }

    /// Returns the raw salt bytes.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Returns the salt half exactly as encoded.
    pub fn salt_hex(&self) -> &str {
        &self.salt_hex
    }

    /// Returns the derived key half exactly as encoded.
    pub fn key_hex(&self) -> &str {
        &self.key_hex
    }
}

impl fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DELIMITER}{}", self.salt_hex, self.key_hex)
    }
}

impl FromStr for CredentialRecord {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
