use std::collections::BTreeMap;

use crate::error::{AutocryptError, Result};
use crate::key::{KeyCodec, OpenPgpKey};

/// Header field name
pub const AUTOCRYPT_HEADER: &str = "AUTOCRYPT";

// Attribute names
pub const ATTR_TO: &str = "to";
pub const ATTR_KEY: &str = "key";
pub const ATTR_TYPE: &str = "type";
pub const ATTR_PREFER_ENCRYPTED: &str = "prefer-encrypted";

/// Unknown attributes starting with this character may be ignored
pub const IGNORABLE_PREFIX: char = '_';

/// Width of one folded line of key material
pub const FOLD_WIDTH: usize = 76;

const TYPE_OPENPGP: &str = "p";
const TYPE_INVALID: &str = "invalid";

const PREFER_YES: &str = "yes";
const PREFER_NO: &str = "no";

/// Key format advertised by the `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum KeyType {
    #[default]
    OpenPgp,
    /// Never produced by a successful decode
    Invalid,
}

impl KeyType {
    pub fn as_token(self) -> &'static str {
        match self {
            KeyType::OpenPgp => TYPE_OPENPGP,
            KeyType::Invalid => TYPE_INVALID,
        }
    }

    /// An empty value means OpenPGP.
    pub fn from_token(token: &str) -> Result<KeyType> {
        match token {
            "" | TYPE_OPENPGP => Ok(KeyType::OpenPgp),
            _ => Err(AutocryptError::InvalidType(token.to_string())),
        }
    }
}

pub fn prefer_encrypted_token(prefer: bool) -> &'static str {
    if prefer {
        PREFER_YES
    } else {
        PREFER_NO
    }
}

/// `yes` is true; `no` or an empty value is false.
pub fn parse_prefer_encrypted(token: &str) -> Result<bool> {
    match token {
        PREFER_YES => Ok(true),
        "" | PREFER_NO => Ok(false),
        _ => Err(AutocryptError::InvalidPreferEncrypted(token.to_string())),
    }
}

/// A decoded Autocrypt header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocryptHeader<K: KeyCodec = OpenPgpKey> {
    /// Mailbox the header applies to (`to`); empty when the attribute was absent
    pub recipient: String,
    /// Public key (`key`)
    pub key: Option<K>,
    /// `prefer-encrypted`
    pub prefer_encrypted: bool,
    /// `type`
    pub key_type: KeyType,
    /// Ignorable attributes by name, prefix included
    pub uncritical: BTreeMap<String, String>,
}

impl<K: KeyCodec> Default for AutocryptHeader<K> {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            key: None,
            prefer_encrypted: false,
            key_type: KeyType::OpenPgp,
            uncritical: BTreeMap::new(),
        }
    }
}

impl<K: KeyCodec> AutocryptHeader<K> {
    pub fn new(recipient: impl Into<String>, key: K) -> Self {
        Self {
            recipient: recipient.into(),
            key: Some(key),
            ..Default::default()
        }
    }

    pub fn with_prefer_encrypted(mut self, prefer: bool) -> Self {
        self.prefer_encrypted = prefer;
        self
    }

    /// Add an ignorable attribute. Names without the `_` prefix are refused,
    /// since a reader would treat them as critical.
    pub fn with_uncritical(mut self, name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_ignorable(&name) {
            return Err(AutocryptError::UnknownCriticalAttribute(name));
        }

        self.uncritical.insert(name, value.into());
        Ok(self)
    }

    /// Whether `to` names the given mailbox. Comparison ignores ASCII case.
    pub fn is_addressed_to(&self, address: &str) -> bool {
        !self.recipient.is_empty() && self.recipient.eq_ignore_ascii_case(address.trim())
    }
}

pub(crate) fn is_ignorable(name: &str) -> bool {
    name.starts_with(IGNORABLE_PREFIX)
}
