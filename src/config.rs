//! Loading KDF parameters from a JSON file.
//!
//! Example:
//! ```json
//! { "algorithm": "pbkdf2-sha256", "iterations": 600000 }
//! ```
//! Omitted fields take their reference defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::crypto::{KdfAlgorithm, KdfParams};

/// On-disk shape of the config file. The algorithm stays a plain string
/// until [`KdfAlgorithm`]'s parser sees it, so an unknown name is reported
/// as [`crate::HashError::AlgorithmUnavailable`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    algorithm: Option<String>,
    iterations: Option<u32>,
    key_bits: Option<u32>,
    salt_len: Option<usize>,
}

impl ConfigFile {
    fn into_params(self) -> Result<KdfParams> {
        let default = KdfParams::default();

        let algorithm = match self.algorithm {
            Some(name) => name.parse::<KdfAlgorithm>()?,
            None => default.algorithm(),
        };

        Ok(KdfParams::new(
            algorithm,
            self.iterations.unwrap_or(default.iterations()),
            self.key_bits.unwrap_or(default.key_bits()),
            self.salt_len.unwrap_or(default.salt_len()),
        )?)
    }
}

/// Reads and validates [`KdfParams`] from the JSON file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, contains
/// unknown fields, or describes invalid parameters.
pub fn load_params(path: &Path) -> Result<KdfParams> {
    let data = fs::read(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let file: ConfigFile = serde_json::from_slice(&data)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    file.into_params()
}
