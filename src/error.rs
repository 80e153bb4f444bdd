use thiserror::Error;

/// Failures surfaced by hashing and verification.
///
/// A wrong password is not an error: [`crate::PasswordHasher::verify`]
/// returns `Ok(false)` for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// A required primitive (KDF variant or OS random source) is missing.
    #[error("algorithm unavailable: {0}")]
    AlgorithmUnavailable(String),

    /// Iteration count, key size or salt size is out of range.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A stored credential record does not match `SALT_HEX:KEY_HEX`.
    #[error("malformed credential record: {0}")]
    MalformedRecord(String),
}

impl HashError {
    /// Returns `true` if the stored record itself is corrupt, as opposed to
    /// an environment or configuration problem.
    pub fn is_malformed(&self) -> bool {
        matches!(self, HashError::MalformedRecord(_))
    }
}
