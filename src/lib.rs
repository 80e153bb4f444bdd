//! Salted PBKDF2 password hashing.
//!
//! [`PasswordHasher::hash`] produces a [`CredentialRecord`] of the form
//! `SALT_HEX:KEY_HEX`; [`PasswordHasher::verify`] re-derives the key from a
//! candidate password and the stored salt and compares the encodings.
//!
//! ```no_run
//! use pwnest::PasswordHasher;
//!
//! let hasher = PasswordHasher::default();
//! let record = hasher.hash(b"Password")?.to_string();
//!
//! assert!(hasher.verify(b"Password", &record)?);
//! assert!(!hasher.verify(b"password", &record)?);
//! # Ok::<(), pwnest::HashError>(())
//! ```

mod config;
mod crypto;
mod error;
mod hasher;
mod record;

pub use crate::config::load_params;
pub use crate::crypto::{KdfAlgorithm, KdfParams};
pub use crate::error::HashError;
pub use crate::hasher::PasswordHasher;
pub use crate::record::{CredentialRecord, DELIMITER};
