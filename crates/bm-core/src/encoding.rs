//! Base64 text encoding for free-text fields
//!
//! Labels, passphrases, subjects and message bodies travel base64-encoded in
//! both directions. Decoding ignores ASCII whitespace, since some daemon
//! builds wrap long payloads, and converts non-UTF-8 bytes lossily.

use base64::Engine;

use crate::error::TextDecodeError;

/// Encode text as standard base64 of its UTF-8 bytes
///
/// # Examples
/// ```
/// use bm_core::encoding::to_base64;
///
/// assert_eq!(to_base64("wallet-1"), "d2FsbGV0LTE=");
/// ```
pub fn to_base64(text: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(text.as_bytes())
}

/// Decode base64 back into text
///
/// Returns an error if the input is not valid base64.
pub fn from_base64(encoded: &str) -> Result<String, TextDecodeError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = base64::engine::general_purpose::STANDARD.decode(compact)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_base64_known_values() {
        assert_eq!(to_base64("wallet-1"), "d2FsbGV0LTE=");
        assert_eq!(to_base64("Hi"), "SGk=");
        assert_eq!(to_base64("Body"), "Qm9keQ==");
        assert_eq!(to_base64(""), "");
    }

    #[test]
    fn test_from_base64_known_values() {
        assert_eq!(from_base64("d2FsbGV0LTE=").unwrap(), "wallet-1");
        assert_eq!(from_base64("").unwrap(), "");
    }

    #[test]
    fn test_roundtrip_unicode_and_control_chars() {
        for text in ["héllo wörld", "日本語", "line1\nline2\ttab", "emoji 🚀", "\0nul"] {
            assert_eq!(from_base64(&to_base64(text)).unwrap(), text);
        }
    }

    #[test]
    fn test_encode_of_decode_is_identity_for_canonical_input() {
        let encoded = "SGVsbG8sIEJpdG1lc3NhZ2Uh";
        assert_eq!(to_base64(&from_base64(encoded).unwrap()), encoded);
    }

    #[test]
    fn test_from_base64_ignores_line_wrapping() {
        let wrapped = "SGVsbG8s\nIEJpdG1l\r\nc3NhZ2Uh\n";
        assert_eq!(from_base64(wrapped).unwrap(), "Hello, Bitmessage!");
    }

    #[test]
    fn test_from_base64_rejects_garbage() {
        assert!(from_base64("not base64!").is_err());
        assert!(from_base64("abc").is_err());
    }

    #[test]
    fn test_from_base64_invalid_utf8_is_lossy() {
        // 0xff is never valid UTF-8
        assert_eq!(from_base64("/w==").unwrap(), "\u{fffd}");
    }

    proptest! {
        #[test]
        fn decode_of_encode_is_identity(text in any::<String>()) {
            prop_assert_eq!(from_base64(&to_base64(&text)).unwrap(), text);
        }

        #[test]
        fn encode_of_decode_is_identity_for_utf8_payloads(text in any::<String>()) {
            let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
            prop_assert_eq!(to_base64(&from_base64(&encoded).unwrap()), encoded);
        }

        #[test]
        fn arbitrary_bytes_decode_lossily(bytes in any::<Vec<u8>>()) {
            let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
            prop_assert_eq!(
                from_base64(&encoded).unwrap(),
                String::from_utf8_lossy(&bytes).into_owned()
            );
        }
    }
}
