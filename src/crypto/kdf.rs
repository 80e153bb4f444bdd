use std::fmt;
use std::str::FromStr;

use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use zeroize::Zeroizing;

use super::{ITERATIONS, KEY_BITS, MAX_KEY_BITS, MAX_SALT_LEN, SALT_LEN};
use crate::error::HashError;

/// PRF paired with PBKDF2.
///
/// Deserializes through [`FromStr`], so config files accept the same names
/// as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum KdfAlgorithm {
    #[default]
    #[serde(rename = "pbkdf2-sha1")]
    HmacSha1,
    #[serde(rename = "pbkdf2-sha256")]
    HmacSha256,
    #[serde(rename = "pbkdf2-sha512")]
    HmacSha512,
}

impl KdfAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            KdfAlgorithm::HmacSha1 => "pbkdf2-sha1",
            KdfAlgorithm::HmacSha256 => "pbkdf2-sha256",
            KdfAlgorithm::HmacSha512 => "pbkdf2-sha512",
        }
    }
}

impl fmt::Display for KdfAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KdfAlgorithm {
    type Err = HashError;

    /// Accepts short names (`sha256`), kebab names (`pbkdf2-sha256`) and
    /// JCA names (`PBKDF2WithHmacSHA256`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace(['-', '_'], "");
        let digest = normalized
            .strip_prefix("pbkdf2withhmac")
            .or_else(|| normalized.strip_prefix("pbkdf2hmac"))
            .or_else(|| normalized.strip_prefix("pbkdf2"))
            .unwrap_or(normalized.as_str());

        match digest {
            "sha1" => Ok(KdfAlgorithm::HmacSha1),
            "sha256" => Ok(KdfAlgorithm::HmacSha256),
            "sha512" => Ok(KdfAlgorithm::HmacSha512),
            _ => Err(HashError::AlgorithmUnavailable(format!(
                "unsupported KDF algorithm '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for KdfAlgorithm {
    type Error = HashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Immutable PBKDF2 configuration shared by the hash and verify paths.
///
/// Records do not carry their parameters, so changing any of these values
/// makes previously stored records unverifiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KdfParams {
    algorithm: KdfAlgorithm,
    iterations: u32,
    key_bits: u32,
    salt_len: usize,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            algorithm: KdfAlgorithm::HmacSha1,
            iterations: ITERATIONS,
            key_bits: KEY_BITS,
            salt_len: SALT_LEN,
        }
    }
}

impl KdfParams {
    pub fn new(
        algorithm: KdfAlgorithm,
        iterations: u32,
        key_bits: u32,
        salt_len: usize,
    ) -> Result<Self, HashError> {
        let params = Self {
            algorithm,
            iterations,
            key_bits,
            salt_len,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn algorithm(&self) -> KdfAlgorithm {
        self.algorithm
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn key_bits(&self) -> u32 {
        self.key_bits
    }

    /// Derived key length in bytes.
    pub fn key_len(&self) -> usize {
        (self.key_bits / 8) as usize
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn validate(&self) -> Result<(), HashError> {
        if self.iterations < 1 {
            return Err(HashError::InvalidParameters(
                "iteration count must be >= 1".into(),
            ));
        }
        if self.key_bits == 0 {
            return Err(HashError::InvalidParameters(
                "key size must be > 0 bits".into(),
            ));
        }
        if self.key_bits > MAX_KEY_BITS {
            return Err(HashError::InvalidParameters(format!(
                "key size must be <= {MAX_KEY_BITS} bits, got {}",
                self.key_bits
            )));
        }
        if self.key_bits % 8 != 0 {
            return Err(HashError::InvalidParameters(format!(
                "key size must be a multiple of 8 bits, got {}",
                self.key_bits
            )));
        }
        if self.salt_len == 0 {
            return Err(HashError::InvalidParameters(
                "salt size must be > 0 bytes".into(),
            ));
        }
        if self.salt_len > MAX_SALT_LEN {
            return Err(HashError::InvalidParameters(format!(
                "salt size must be <= {MAX_SALT_LEN} bytes, got {}",
                self.salt_len
            )));
        }
        Ok(())
    }
}

impl fmt::Display for KdfParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "algorithm:  {}", self.algorithm)?;
        writeln!(f, "iterations: {}", self.iterations)?;
        writeln!(f, "key size:   {} bits", self.key_bits)?;
        write!(f, "salt size:  {} bytes", self.salt_len)
    }
}

/// Derive `kdf.key_len()` bytes from `password` and `salt`.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    kdf: &KdfParams,
) -> Result<Zeroizing<Vec<u8>>, HashError> {
    kdf.validate()?;

    let mut key = Zeroizing::new(vec![0u8; kdf.key_len()]);
    match kdf.algorithm {
        KdfAlgorithm::HmacSha1 => pbkdf2_hmac::<Sha1>(password, salt, kdf.iterations, &mut key),
        KdfAlgorithm::HmacSha256 => {
            pbkdf2_hmac::<Sha256>(password, salt, kdf.iterations, &mut key)
        }
        KdfAlgorithm::HmacSha512 => {
            pbkdf2_hmac::<Sha512>(password, salt, kdf.iterations, &mut key)
        }
    }

    Ok(key)
}
