//! Hex text encoding of captured payloads.

/// Decode a captured payload.
///
/// Either case is accepted; whitespace around the text is ignored.
///
/// # Errors
/// [::hex::FromHexError] on odd length or a non-hex character.
pub fn decode_payload(text: &str) -> Result<Vec<u8>, ::hex::FromHexError> {
    ::hex::decode(text.trim())
}

/// Encode bytes as lower-case hex.
#[must_use]
pub fn encode_bytes(dat: &[u8]) -> String {
    ::hex::encode(dat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("" ; "empty")]
    #[test_case("00ff10" ; "bytes")]
    #[test_case("0a1b2c3d4e5f60718293a4b5c6d7e8f9" ; "block")]
    fn decode_encode_identity(text: &str) {
        let dat = decode_payload(text).unwrap();
        assert_eq!(encode_bytes(&dat), text);
    }

    #[test]
    fn upper_case_accepted() {
        assert_eq!(decode_payload("DEADbeef").unwrap(), [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test_case("abc" ; "odd length")]
    #[test_case("zz" ; "not hex")]
    fn invalid(text: &str) {
        assert!(decode_payload(text).is_err());
    }
}
