//! Escaping of multiline values into the flat `key=value` preset format.

use crate::error::PresetError;

/// Encodes a multiline value into a single line and back.
pub trait Codec {
    fn encode(&self, text: &str) -> String;
    fn decode(&self, payload: &str) -> Result<String, PresetError>;
}

/// Uppercase hex over the UTF-8 bytes of the value, the encoding every
/// OpenShade preset in the wild uses for shader code blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct HexCodec;

impl Codec for HexCodec {
    fn encode(&self, text: &str) -> String {
        hex::encode_upper(text.as_bytes())
    }

    fn decode(&self, payload: &str) -> Result<String, PresetError> {
        let bytes = hex::decode(payload.trim())?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Newline stand-in used by the preset comment, which is stored as
/// plain text rather than hex.
const COMMENT_NEWLINE: &str = "~^#";

pub fn encode_comment(comment: &str) -> String {
    comment.replace("\r\n", COMMENT_NEWLINE)
}

pub fn decode_comment(stored: &str) -> String {
    stored.replace(COMMENT_NEWLINE, "\r\n")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_encoding_is_uppercase_and_lossless() {
        let codec = HexCodec;
        let code = "float a = 1.0;\r\nfloat b = 2.0;";
        let payload = codec.encode(code);
        assert!(payload.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(payload, payload.to_ascii_uppercase());
        assert_eq!(codec.decode(&payload).unwrap(), code);
    }

    #[test]
    fn hex_decode_accepts_lowercase_payloads() {
        let codec = HexCodec;
        assert_eq!(codec.decode("68656c6c6f").unwrap(), "hello");
    }

    #[test]
    fn hex_decode_rejects_garbage() {
        assert!(HexCodec.decode("zz").is_err());
    }

    #[test]
    fn comment_newlines_survive_the_trip() {
        let comment = "line one\r\nline two";
        let stored = encode_comment(comment);
        assert!(!stored.contains('\n'));
        assert_eq!(decode_comment(&stored), comment);
    }
}
