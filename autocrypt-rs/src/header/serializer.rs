use base64::{engine::general_purpose, Engine as _};

use super::types::{
    prefer_encrypted_token, AutocryptHeader, ATTR_KEY, ATTR_PREFER_ENCRYPTED, ATTR_TO, ATTR_TYPE,
    AUTOCRYPT_HEADER, FOLD_WIDTH,
};
use crate::error::{AutocryptError, Result};
use crate::key::KeyCodec;

/// Fold a string into lines of [`FOLD_WIDTH`] characters, each preceded by
/// a newline and one space. Purely length based; the last line may be short.
pub fn fold(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + (s.len() / FOLD_WIDTH + 1) * 2);
    let mut rest = s;

    while !rest.is_empty() {
        let mut cut = rest.len().min(FOLD_WIDTH);
        // Only ever splits inside multi-byte text, which base64 never is
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }

        out.push_str("\n ");
        out.push_str(&rest[..cut]);
        rest = &rest[cut..];
    }

    out
}

impl<K: KeyCodec> AutocryptHeader<K> {
    /// Serialize the attributes: `to`, `prefer-encrypted`, `type`, the
    /// ignorable attributes by name, then the folded `key`.
    pub fn to_header_value(&self) -> Result<String> {
        let mut out = String::new();

        push_attribute(&mut out, ATTR_TO, &self.recipient);
        push_attribute(
            &mut out,
            ATTR_PREFER_ENCRYPTED,
            prefer_encrypted_token(self.prefer_encrypted),
        );
        push_attribute(&mut out, ATTR_TYPE, self.key_type.as_token());

        for (name, value) in &self.uncritical {
            push_attribute(&mut out, name, value);
        }

        if let Some(ref key) = self.key {
            let bytes = key.encode().map_err(AutocryptError::key)?;
            let encoded = general_purpose::STANDARD.encode(bytes);
            push_attribute(&mut out, ATTR_KEY, &fold(&encoded));
        }

        Ok(out)
    }

    /// Serialize as a complete header line, `AUTOCRYPT: ` included.
    pub fn to_header_string(&self) -> Result<String> {
        Ok(format!("{}: {}", AUTOCRYPT_HEADER, self.to_header_value()?))
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push('=');
    out.push_str(value);
    out.push(';');
}
