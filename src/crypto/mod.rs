//! Cryptographic building blocks for password hashing.
//!
//! Provides key derivation, salt generation, and the hex codec used by the
//! credential record format.

pub mod encoding;
pub mod kdf;
pub mod salt;

pub use encoding::{bytes_to_hex, hex_to_bytes};
pub use kdf::{KdfAlgorithm, KdfParams, derive_key};
pub use salt::generate_salt;

/// Length of the random salt (32 bytes / 256 bits).
pub const SALT_LEN: usize = 32;
/// Length of the derived key in bits.
pub const KEY_BITS: u32 = 256;
/// PBKDF2 iteration count.
pub const ITERATIONS: u32 = 10_000;
/// Largest accepted salt, in bytes.
pub const MAX_SALT_LEN: usize = 1024;
/// Largest accepted derived key, in bits.
pub const MAX_KEY_BITS: u32 = 8192;
