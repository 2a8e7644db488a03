use proptest::prelude::*;

use mhc_crypto::compact;
use mhc_crypto::{checksum, derive_address, validate_address};
use mhc_types::PublicPoint;

proptest! {
    /// decode(encode(n)) == n and consumes exactly the encoded length.
    #[test]
    fn compact_decode_inverts_encode(n in any::<u64>()) {
        let bytes = compact::encode(n);
        prop_assert_eq!(compact::decode(&bytes).unwrap(), (n, bytes.len()));
    }

    /// Encoded width is fixed by the bucket the value falls into.
    #[test]
    fn compact_width_follows_bucket(n in any::<u64>()) {
        let expected = if n < 250 {
            1
        } else if n < 65_536 {
            3
        } else if n < 4_294_967_296 {
            5
        } else {
            9
        };
        prop_assert_eq!(compact::encode(n).len(), expected);
    }

    /// Any truncation of a multi-byte encoding is rejected.
    #[test]
    fn compact_truncation_rejected(n in 250u64.., cut in 1usize..9) {
        let bytes = compact::encode(n);
        let cut = cut.min(bytes.len() - 1);
        prop_assert!(compact::decode(&bytes[..cut]).is_err());
    }

    /// Derived addresses always validate, and carry the double-SHA-256 checksum.
    #[test]
    fn derived_addresses_validate(
        x in prop::array::uniform32(0u8..),
        y in prop::array::uniform32(0u8..),
        net in any::<u8>(),
    ) {
        let addr = derive_address(&PublicPoint { x, y }, net);
        let bytes = addr.as_bytes();
        prop_assert_eq!(&bytes[21..], &checksum(&bytes[..21])[..]);
        prop_assert!(validate_address(&addr.to_hex()));
    }

    /// Corrupting a single body byte is always detected.
    #[test]
    fn corrupted_body_detected(
        x in prop::array::uniform32(0u8..),
        idx in 0usize..21,
        flip in 1u8..=255,
    ) {
        let addr = derive_address(&PublicPoint { x, y: x }, 0x00);
        let mut bytes = addr.as_bytes().to_vec();
        bytes[idx] ^= flip;
        prop_assert!(!validate_address(&hex::encode(&bytes)));
    }

    /// Arbitrary strings never make validation panic.
    #[test]
    fn validate_never_panics(s in "\\PC*") {
        let _ = validate_address(&s);
    }
}
