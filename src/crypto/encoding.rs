//! Uppercase hex codec for credential records.

use hex::FromHexError;

use crate::error::HashError;

/// Encode bytes as uppercase hex, two characters per byte.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode a hex string. Both digit cases are accepted.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, HashError> {
    hex::decode(hex).map_err(|e| match e {
        FromHexError::OddLength => {
            HashError::MalformedRecord(format!("odd-length hex segment ({} chars)", hex.len()))
        }
        FromHexError::InvalidHexCharacter { c, index } => {
            HashError::MalformedRecord(format!("invalid hex character {c:?} at index {index}"))
        }
        other => HashError::MalformedRecord(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_uppercase() {
        assert_eq!(bytes_to_hex(&[0x00, 0x0f, 0xa5, 0xff]), "000FA5FF");
        assert_eq!(bytes_to_hex(&[]), "");
    }

    #[test]
    fn decodes_both_cases() {
        assert_eq!(hex_to_bytes("0fA5").unwrap(), vec![0x0f, 0xa5]);
        assert_eq!(hex_to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn roundtrip_all_byte_values() {
        let bytes: Vec<u8> = (0..=255).collect();
        let encoded = bytes_to_hex(&bytes);

        assert_eq!(encoded.len(), 2 * bytes.len());
        assert_eq!(hex_to_bytes(&encoded).unwrap(), bytes);
    }

    #[test]
    fn odd_length_is_malformed() {
        let err = hex_to_bytes("ABC").unwrap_err();
        assert!(matches!(err, HashError::MalformedRecord(_)));
    }

    #[test]
    fn invalid_character_is_malformed() {
        let err = hex_to_bytes("ZZ").unwrap_err();
        assert!(matches!(err, HashError::MalformedRecord(_)));

        let err = hex_to_bytes("AB:C").unwrap_err();
        assert!(matches!(err, HashError::MalformedRecord(_)));
    }
}
