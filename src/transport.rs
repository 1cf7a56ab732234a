//! Base64 transport decoding
//!
//! Documents may arrive as base64 text, optionally wrapped in a `data:` URI
//! (`data:application/vnd...;base64,UEsDB...`). Decoding happens before the
//! engine sees any bytes and has its own error kind.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

/// Decode a base64 document payload into raw bytes.
///
/// Surrounding whitespace and line breaks inside the payload are ignored.
pub fn decode_base64_payload(payload: &str) -> Result<Vec<u8>> {
    let payload = strip_data_uri(payload.trim())?;
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::InvalidEncoding(e.to_string()))
}

fn strip_data_uri(payload: &str) -> Result<&str> {
    if !payload.starts_with("data:") {
        return Ok(payload);
    }
    payload
        .split_once(',')
        .map(|(_, data)| data)
        .ok_or_else(|| Error::InvalidEncoding("data URI has no ',' before its payload".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_plain_payload() {
        assert_eq!(decode_base64_payload("SGVsbG8=").unwrap(), b"Hello");
        assert_eq!(decode_base64_payload("  SGVs\r\nbG8=\n").unwrap(), b"Hello");
    }

    #[test]
    fn test_data_uri_prefix() {
        let uri = "data:application/vnd.openxmlformats-officedocument.wordprocessingml.document;base64,SGVsbG8=";
        assert_eq!(decode_base64_payload(uri).unwrap(), b"Hello");
    }

    #[test]
    fn test_invalid_payloads() {
        for bad in ["SGVsbG8", "SGV$bG8=", "data:text/plain;base64"] {
            let err = decode_base64_payload(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidEncoding, "payload {bad:?}");
        }
    }
}
