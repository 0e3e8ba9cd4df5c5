//! Encode/decode round trips through complete header lines

use autocrypt_rs::header::{fold, AUTOCRYPT_HEADER};
use autocrypt_rs::{AutocryptError, AutocryptHeader, HeaderMap, KeyCodec, OpenPgpKey};
use std::fmt;

/// Pull the key of a fixture out through the regular decode path
fn fixture_key(message: &[u8]) -> OpenPgpKey {
    let header: AutocryptHeader = AutocryptHeader::from_message(message).unwrap();
    header.key.unwrap()
}

/// Decode a serialized header line by placing it in a message
fn decode_line(line: &str) -> AutocryptHeader {
    let message = format!("From: someone@example.org\r\n{}\r\n\r\nbody\r\n", line);
    AutocryptHeader::from_message(message.as_bytes()).unwrap()
}

#[test]
fn test_roundtrip_rsa_key() {
    let key = fixture_key(include_bytes!("data/rsa2048-simple.eml"));
    let header = AutocryptHeader::new("alice@testsuite.autocrypt.org", key)
        .with_prefer_encrypted(true)
        .with_uncritical("_monkey", "ignore")
        .unwrap();

    let line = header.to_header_string().unwrap();
    assert!(line.starts_with("AUTOCRYPT: to=alice@testsuite.autocrypt.org;"));

    assert_eq!(decode_line(&line), header);
}

#[test]
fn test_roundtrip_ed25519_key() {
    let key = fixture_key(include_bytes!("data/ed25519-simple.eml"));
    let header = AutocryptHeader::new("bob@testsuite.autocrypt.org", key);

    assert_eq!(decode_line(&header.to_header_string().unwrap()), header);
}

#[test]
fn test_roundtrip_header_value() {
    let key = fixture_key(include_bytes!("data/ed25519-simple.eml"));
    let header = AutocryptHeader::new("bob@testsuite.autocrypt.org", key)
        .with_uncritical("_a", "1")
        .and_then(|h| h.with_uncritical("_b", ""))
        .unwrap();

    // The raw value keeps the newlines the folding introduced
    let value = header.to_header_value().unwrap();
    assert!(value.contains("\n "));

    let decoded: AutocryptHeader = AutocryptHeader::parse(&value).unwrap();
    assert_eq!(decoded, header);
}

#[test]
fn test_serialized_key_lines() {
    let key = fixture_key(include_bytes!("data/rsa2048-simple.eml"));
    let encoded_len = (key.as_bytes().len() + 2) / 3 * 4;
    let header = AutocryptHeader::new("alice@testsuite.autocrypt.org", key);

    let line = header.to_header_string().unwrap();
    let key_lines: Vec<&str> = line.lines().skip(1).collect();

    assert_eq!(key_lines.len(), (encoded_len + 75) / 76);
    for (i, l) in key_lines.iter().enumerate() {
        assert!(l.starts_with(' '));
        if i + 1 < key_lines.len() {
            assert_eq!(l.len(), 77);
        }
    }
    assert!(key_lines.last().unwrap().ends_with(';'));
}

#[test]
fn test_header_name_prefix() {
    let header: AutocryptHeader = AutocryptHeader::default();
    let line = header.to_header_string().unwrap();
    assert!(line.starts_with(&format!("{}: ", AUTOCRYPT_HEADER)));
}

#[test]
fn test_fold_is_reversible() {
    let input = "A".repeat(200) + "==";
    let folded = fold(&input);
    let restored: String = folded.split_whitespace().collect();
    assert_eq!(restored, input);
}

#[test]
fn test_header_map_lookup() {
    let headers: HeaderMap = [("Subject", "hello")].into_iter().collect();
    let result = AutocryptHeader::<OpenPgpKey>::from_headers(&headers);
    assert!(matches!(result, Err(AutocryptError::HeaderNotFound)));

    let headers: HeaderMap = [("autocrypt", "to=a@b;_monkey=ignore;")].into_iter().collect();
    let header = AutocryptHeader::<OpenPgpKey>::from_headers(&headers).unwrap();
    assert_eq!(header.recipient, "a@b");
}

/// Codec with its own error type, to check it reaches the caller unchanged
#[derive(Debug, Clone, PartialEq)]
struct LabelKey(String);

#[derive(Debug, PartialEq)]
enum LabelError {
    NotUtf8,
    Empty,
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelError::NotUtf8 => write!(f, "label is not UTF-8"),
            LabelError::Empty => write!(f, "label is empty"),
        }
    }
}

impl std::error::Error for LabelError {}

impl KeyCodec for LabelKey {
    type Error = LabelError;

    fn decode(bytes: &[u8]) -> Result<Self, Self::Error> {
        let label = String::from_utf8(bytes.to_vec()).map_err(|_| LabelError::NotUtf8)?;
        if label.is_empty() {
            return Err(LabelError::Empty);
        }
        Ok(LabelKey(label))
    }

    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.0.as_bytes().to_vec())
    }
}

#[test]
fn test_roundtrip_custom_codec() {
    let header = AutocryptHeader::new("a@b", LabelKey("x".repeat(300)));
    let value = header.to_header_value().unwrap();

    let decoded: AutocryptHeader<LabelKey> = AutocryptHeader::parse(&value).unwrap();
    assert_eq!(decoded, header);
}

#[test]
fn test_custom_codec_error_passes_through() {
    // "/w==" is the single byte 0xFF
    let result = AutocryptHeader::<LabelKey>::parse("to=a@b;key=/w==;");
    let err = result.unwrap_err();

    assert_eq!(err.key_error::<LabelError>(), Some(&LabelError::NotUtf8));
    assert_eq!(err.to_string(), "label is not UTF-8");
}
