//! Salted PBKDF2 password hashing and verification.

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::crypto::{self, KdfParams};
use crate::error::HashError;
use crate::record::CredentialRecord;

/// Hashes passwords into [`CredentialRecord`]s and verifies candidates
/// against them.
///
/// The hasher holds only its immutable [`KdfParams`], so one instance can be
/// shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    kdf: KdfParams,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
        }
    }
}

impl PasswordHasher {
    /// Creates a hasher for the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidParameters`] if the parameters do not validate.
    pub fn new(kdf: KdfParams) -> Result<Self, HashError> {
        kdf.validate()?;
        Ok(Self { kdf })
    }

    /// Returns the parameters used for hashing and verification.
    pub fn params(&self) -> &KdfParams {
        &self.kdf
    }

    /// Hashes `password` with a fresh random salt.
    ///
    /// Two calls with the same password yield different records.
    pub fn hash(&self, password: &[u8]) -> Result<CredentialRecord, HashError> {
        debug!(
            algorithm = %self.kdf.algorithm(),
            iterations = self.kdf.iterations(),
            "hashing password"
        );

        let salt = crypto::generate_salt(self.kdf.salt_len())?;
        let key_hex = self.hash_with_salt(password, &salt)?;

        Ok(CredentialRecord::new(salt, key_hex))
    }

    /// Derives the hex-encoded key for `password` under a known salt.
    ///
    /// Only the key is returned; reusing a salt for a new record is never
    /// correct, so this stays internal to verification.
    pub(crate) fn hash_with_salt(&self, password: &[u8], salt: &[u8]) -> Result<String, HashError> {
        let key = crypto::derive_key(password, salt, &self.kdf)?;
        Ok(crypto::bytes_to_hex(&key))
    }

    /// Checks `password` against a stored record.
    ///
    /// Returns `Ok(false)` on a wrong password. The comparison covers the
    /// full hex encoding and runs in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::MalformedRecord`] if `stored` cannot be parsed.
    pub fn verify(&self, password: &[u8], stored: &str) -> Result<bool, HashError> {
        let record = CredentialRecord::parse(stored).inspect_err(|e| {
            debug!(reason = %e, "rejecting malformed credential record");
        })?;

        self.verify_record(password, &record)
    }

    /// Checks `password` against an already parsed record.
    pub fn verify_record(
        &self,
        password: &[u8],
        record: &CredentialRecord,
    ) -> Result<bool, HashError> {
        debug!(
            algorithm = %self.kdf.algorithm(),
            iterations = self.kdf.iterations(),
            "verifying password"
        );

        let check_hex = self.hash_with_salt(password, record.salt())?;
        let matches: bool = check_hex
            .as_bytes()
            .ct_eq(record.key_hex().as_bytes())
            .into();

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{KdfAlgorithm, SALT_LEN};

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::new(KdfParams::new(KdfAlgorithm::HmacSha256, 64, 256, SALT_LEN).unwrap())
            .unwrap()
    }

    #[test]
    fn record_segments_have_expected_lengths() {
        let record = PasswordHasher::default().hash(b"Password").unwrap();
        let encoded = record.to_string();

        let (salt_hex, key_hex) = encoded.split_once(':').unwrap();
        assert_eq!(salt_hex.len(), 64);
        assert_eq!(key_hex.len(), 64);
        assert_eq!(encoded.len(), 129);
        assert!(
            encoded
                .chars()
                .all(|c| c == ':' || c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = fast_hasher();

        let r1 = hasher.hash(b"Password").unwrap();
        let r2 = hasher.hash(b"Password").unwrap();

        assert_ne!(r1, r2);
        assert_ne!(r1.salt(), r2.salt());
    }

    #[test]
    fn reference_scenario() {
        let hasher = PasswordHasher::default();
        let record = hasher.hash(b"Password").unwrap().to_string();

        assert!(hasher.verify(b"Password", &record).unwrap());
        assert!(!hasher.verify(b"password", &record).unwrap());
        assert!(!hasher.verify(b"Passowrd", &record).unwrap());
    }

    #[test]
    fn verify_accepts_own_records() {
        let hasher = fast_hasher();

        for password in ["", "a", "correct horse battery staple", "pässwörd"] {
            let record = hasher.hash(password.as_bytes()).unwrap();
            assert!(hasher.verify(password.as_bytes(), &record.to_string()).unwrap());
            assert!(hasher.verify_record(password.as_bytes(), &record).unwrap());
        }
    }

    #[test]
    fn verify_rejects_other_passwords() {
        let hasher = fast_hasher();
        let record = hasher.hash(b"alpha").unwrap().to_string();

        for candidate in ["beta", "alpha ", "Alpha", ""] {
            assert!(!hasher.verify(candidate.as_bytes(), &record).unwrap());
        }
    }

    #[test]
    fn hash_with_salt_is_deterministic() {
        let hasher = PasswordHasher::default();
        let salt = [0x5au8; SALT_LEN];

        let k1 = hasher.hash_with_salt(b"Password", &salt).unwrap();
        let k2 = hasher.hash_with_salt(b"Password", &salt).unwrap();

        assert_eq!(k1, k2);
        assert_eq!(k1.len(), 64);
    }

    #[test]
    fn verify_matches_precomputed_record() {
        // PBKDF2-HMAC-SHA1, 1 iteration, 160-bit key; RFC 6070 vector 1
        let hasher =
            PasswordHasher::new(KdfParams::new(KdfAlgorithm::HmacSha1, 1, 160, 4).unwrap())
                .unwrap();
        let stored = "73616C74:0C60C80F961F0E71F3A9B524AF6012062FE037A6";

        assert!(hasher.verify(b"password", stored).unwrap());
        assert!(!hasher.verify(b"passwore", stored).unwrap());
    }

    #[test]
    fn verify_compares_full_hex_string() {
        let hasher = fast_hasher();
        let record = hasher.hash(b"pw").unwrap();

        let truncated = format!("{}:{}", record.salt_hex(), &record.key_hex()[..62]);
        assert!(!hasher.verify(b"pw", &truncated).unwrap());

        let lowercase = record.to_string().to_ascii_lowercase();
        assert!(!hasher.verify(b"pw", &lowercase).unwrap());
    }

    #[test]
    fn verify_with_other_params_fails() {
        let record = fast_hasher().hash(b"pw").unwrap().to_string();
        let other =
            PasswordHasher::new(KdfParams::new(KdfAlgorithm::HmacSha256, 65, 256, SALT_LEN).unwrap())
                .unwrap();

        assert!(!other.verify(b"pw", &record).unwrap());
    }

    #[test]
    fn malformed_records_are_errors_not_mismatches() {
        let hasher = fast_hasher();

        for stored in ["", "NODELIMITER", "ABC:DEF0", "AB:XYZ0", "GG:00", "AB:CD:EF"] {
            let err = hasher.verify(b"pw", stored).unwrap_err();
            assert!(
                matches!(err, HashError::MalformedRecord(_)),
                "{stored:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn new_rejects_invalid_params() {
        let invalid: KdfParams = serde_json::from_str(r#"{"iterations": 0}"#).unwrap();
        assert!(matches!(
            PasswordHasher::new(invalid),
            Err(HashError::InvalidParameters(_))
        ));
    }

    #[test]
    fn hasher_is_shareable_across_threads() {
        let hasher = fast_hasher();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let password = format!("user-{i}");
                    let record = hasher.hash(password.as_bytes()).unwrap();
                    hasher.verify(password.as_bytes(), &record.to_string()).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
