use base64::{engine::general_purpose, Engine as _};
use tracing::{debug, warn};

use super::splitter::{split, split_attribute};
use super::types::{
    is_ignorable, parse_prefer_encrypted, AutocryptHeader, KeyType, ATTR_KEY,
    ATTR_PREFER_ENCRYPTED, ATTR_TO, ATTR_TYPE, AUTOCRYPT_HEADER,
};
use crate::error::{AutocryptError, Result};
use crate::key::KeyCodec;
use crate::message::HeaderMap;

/// Interpret split segments into a header.
///
/// Segments are handled in order and the first failure aborts the whole
/// decode. A repeated known attribute overwrites the earlier value.
pub fn interpret<'a, K, I>(segments: I) -> Result<AutocryptHeader<K>>
where
    K: KeyCodec,
    I: IntoIterator<Item = &'a str>,
{
    let mut parsed = AutocryptHeader::<K>::default();

    for segment in segments {
        let (name, value) = split_attribute(segment)
            .ok_or_else(|| AutocryptError::MalformedSegment(segment.to_string()))?;

        match name {
            ATTR_TO => parsed.recipient = value.to_string(),
            ATTR_KEY => parsed.key = Some(decode_key(value)?),
            ATTR_TYPE => parsed.key_type = KeyType::from_token(value)?,
            ATTR_PREFER_ENCRYPTED => parsed.prefer_encrypted = parse_prefer_encrypted(value)?,
            _ if is_ignorable(name) => {
                debug!("Keeping non-critical attribute '{}'", name);
                parsed.uncritical.insert(name.to_string(), value.to_string());
            }
            _ => return Err(AutocryptError::UnknownCriticalAttribute(name.to_string())),
        }
    }

    Ok(parsed)
}

/// Decode the folded base64 key value.
fn decode_key<K: KeyCodec>(value: &str) -> Result<K> {
    // Folding puts line breaks and indentation inside the value
    let cleaned: String = value.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let bytes = general_purpose::STANDARD.decode(cleaned.as_bytes())?;
    debug!("Decoding {} bytes of key material", bytes.len());

    K::decode(&bytes).map_err(AutocryptError::key)
}

impl<K: KeyCodec> AutocryptHeader<K> {
    /// Parse a header value (the part after `Autocrypt:`).
    pub fn parse(value: &str) -> Result<Self> {
        interpret(split(value)).map_err(|e| {
            warn!("Rejected Autocrypt header: {}", e);
            e
        })
    }

    /// Find and parse the Autocrypt field of a header set.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        let value = headers
            .get(AUTOCRYPT_HEADER)
            .filter(|v| !v.is_empty())
            .ok_or(AutocryptError::HeaderNotFound)?;

        debug!("Found Autocrypt header ({} bytes)", value.len());
        Self::parse(value)
    }

    /// Find and parse the Autocrypt field of a raw message.
    pub fn from_message(message: &[u8]) -> Result<Self> {
        Self::from_headers(&HeaderMap::parse(message))
    }
}
