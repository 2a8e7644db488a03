//! Hex conventions for bytes crossing the process boundary.
//!
//! Keys, signatures and addresses travel as hex strings. A leading `0x` is
//! accepted on input; output is always `0x`-prefixed lowercase hex.

use crate::TypesError;

/// The display prefix for hex-encoded values.
pub const HEX_PREFIX: &str = "0x";

/// Strip an optional `0x` prefix.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix(HEX_PREFIX).unwrap_or(s)
}

/// Decode hex with an optional `0x` prefix. Either letter case is accepted.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, TypesError> {
    hex::decode(strip_hex_prefix(s.trim())).map_err(|e| TypesError::InvalidHex(e.to_string()))
}

/// Encode bytes as `0x`-prefixed lowercase hex.
pub fn encode_hex_prefixed(bytes: &[u8]) -> String {
    format!("{}{}", HEX_PREFIX, hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_optional() {
        assert_eq!(decode_hex("0xdeadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode_hex("deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn upper_case_accepted() {
        assert_eq!(decode_hex("0xDEADBEEF").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn odd_length_rejected() {
        assert!(matches!(decode_hex("0xabc"), Err(TypesError::InvalidHex(_))));
    }

    #[test]
    fn non_hex_rejected() {
        assert!(decode_hex("zz").is_err());
    }

    #[test]
    fn output_is_prefixed_lowercase() {
        assert_eq!(encode_hex_prefixed(&[0xAB, 0x01]), "0xab01");
        assert_eq!(encode_hex_prefixed(&[]), "0x");
    }
}
