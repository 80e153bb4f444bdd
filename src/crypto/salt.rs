use getrandom::fill;

use crate::error::HashError;

/// Generate a fresh salt of `len` bytes from the OS random generator.
pub fn generate_salt(len: usize) -> Result<Vec<u8>, HashError> {
    let mut salt = vec![0u8; len];
    fill(&mut salt)
        .map_err(|e| HashError::AlgorithmUnavailable(format!("OS random generator: {e}")))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SALT_LEN;

    #[test]
    fn salt_has_requested_length() {
        assert_eq!(generate_salt(SALT_LEN).unwrap().len(), SALT_LEN);
        assert_eq!(generate_salt(1).unwrap().len(), 1);
    }

    #[test]
    fn salts_are_fresh() {
        let a = generate_salt(SALT_LEN).unwrap();
        let b = generate_salt(SALT_LEN).unwrap();
        assert_ne!(a, b);
    }
}
