use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::types::{prefer_encrypted_token, AutocryptHeader};
use crate::key::{KeyCodec, OpenPgpKey};

/// Printable view of a decoded header
#[derive(Debug, Clone, Serialize)]
pub struct HeaderSummary {
    pub to: String,
    pub prefer_encrypted: bool,
    #[serde(rename = "type")]
    pub key_type: String,
    pub uncritical: BTreeMap<String, String>,
    pub key: Option<KeySummary>,
}

/// Facts about the primary key
#[derive(Debug, Clone, Serialize)]
pub struct KeySummary {
    pub algorithm: String,
    /// Packet version, `v4` for most keys in the wild
    pub version: String,
    pub user_ids: Vec<String>,
    pub subkeys: usize,
    /// Length of the binary key in bytes
    pub length: usize,
}

impl From<&OpenPgpKey> for KeySummary {
    fn from(key: &OpenPgpKey) -> Self {
        Self {
            algorithm: format!("{:?}", key.algorithm()),
            version: format!("{:?}", key.version()).to_lowercase(),
            user_ids: key.user_ids(),
            subkeys: key.subkey_count(),
            length: key.as_bytes().len(),
        }
    }
}

impl<K: KeyCodec> AutocryptHeader<K> {
    /// Summarize the header, describing the key with `describe`.
    pub fn summary_with<F>(&self, describe: F) -> HeaderSummary
    where
        F: FnOnce(&K) -> KeySummary,
    {
        HeaderSummary {
            to: self.recipient.clone(),
            prefer_encrypted: self.prefer_encrypted,
            key_type: self.key_type.as_token().to_string(),
            uncritical: self.uncritical.clone(),
            key: self.key.as_ref().map(describe),
        }
    }
}

impl AutocryptHeader<OpenPgpKey> {
    pub fn summary(&self) -> HeaderSummary {
        self.summary_with(|key| KeySummary::from(key))
    }
}

impl fmt::Display for HeaderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "to:               {}", self.to)?;
        writeln!(
            f,
            "prefer-encrypted: {}",
            prefer_encrypted_token(self.prefer_encrypted)
        )?;
        writeln!(f, "type:             {}", self.key_type)?;

        for (name, value) in &self.uncritical {
            writeln!(f, "{:<18}{}", format!("{}:", name), value)?;
        }

        match self.key {
            Some(ref key) => {
                writeln!(
                    f,
                    "key:              {} {}, {} bytes, {} subkey(s)",
                    key.algorithm, key.version, key.length, key.subkeys
                )?;
                for uid in &key.user_ids {
                    writeln!(f, "  uid:            {}", uid)?;
                }
                Ok(())
            }
            None => writeln!(f, "key:              (none)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::openpgp::fixtures::ed25519_key_bytes;

    fn sample() -> AutocryptHeader {
        let key = OpenPgpKey::from_bytes(&ed25519_key_bytes()).unwrap();
        AutocryptHeader::new("bob@testsuite.autocrypt.org", key)
            .with_prefer_encrypted(true)
            .with_uncritical("_monkey", "ignore")
            .unwrap()
    }

    #[test]
    fn test_summary_fields() {
        let summary = sample().summary();

        assert_eq!(summary.to, "bob@testsuite.autocrypt.org");
        assert!(summary.prefer_encrypted);
        assert_eq!(summary.key_type, "p");

        let key = summary.key.unwrap();
        assert_eq!(key.algorithm, "EdDSALegacy");
        assert_eq!(key.version, "v4");
        assert_eq!(key.length, 408);
        assert_eq!(key.subkeys, 1);
        assert_eq!(key.user_ids, ["bob@testsuite.autocrypt.org".to_string()]);
    }

    #[test]
    fn test_summary_json() {
        let json = serde_json::to_value(sample().summary()).unwrap();

        assert_eq!(json["to"], "bob@testsuite.autocrypt.org");
        assert_eq!(json["type"], "p");
        assert_eq!(json["prefer_encrypted"], true);
        assert_eq!(json["uncritical"]["_monkey"], "ignore");
        assert_eq!(json["key"]["subkeys"], 1);
        assert_eq!(json["key"]["user_ids"][0], "bob@testsuite.autocrypt.org");
    }

    #[test]
    fn test_summary_text() {
        let text = sample().summary().to_string();

        assert!(text.contains("to:               bob@testsuite.autocrypt.org"));
        assert!(text.contains("prefer-encrypted: yes"));
        assert!(text.contains("_monkey:          ignore"));
        assert!(text.contains("key:              EdDSALegacy v4, 408 bytes, 1 subkey(s)"));
        assert!(text.contains("  uid:            bob@testsuite.autocrypt.org"));
    }

    #[test]
    fn test_summary_without_key() {
        let header: AutocryptHeader = AutocryptHeader::default();
        let summary = header.summary();
        assert!(summary.key.is_none());
        assert!(summary.to_string().contains("key:              (none)"));
    }
}
