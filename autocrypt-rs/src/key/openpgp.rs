//! OpenPGP transferable public keys, parsed with `pgp`
//!
//! A key is accepted when it parses as a signed public key and carries at
//! least one user id with a signature over it. The bytes the key arrived in
//! are kept, so encoding gives back exactly what was decoded.

use bytes::Bytes;
use pgp::composed::{Deserializable, SignedPublicKey};
use pgp::ser::Serialize;
use pgp::types::KeyDetails;
use thiserror::Error;
use tracing::debug;

pub use pgp::crypto::public_key::PublicKeyAlgorithm;

use super::KeyCodec;

/// OpenPGP key decoding errors
#[derive(Error, Debug)]
pub enum OpenPgpError {
    #[error("empty key material")]
    Empty,

    #[error("invalid OpenPGP key: {0}")]
    Pgp(#[from] pgp::errors::Error),

    #[error("key has no user id")]
    MissingIdentity,

    #[error("user id '{0}' is not signed")]
    UnsignedIdentity(String),
}

/// A signed OpenPGP public key
#[derive(Debug, Clone)]
pub struct OpenPgpKey {
    key: SignedPublicKey,
    bytes: Bytes,
}

impl OpenPgpKey {
    /// Parse a binary transferable public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OpenPgpError> {
        if bytes.is_empty() {
            return Err(OpenPgpError::Empty);
        }

        let key = SignedPublicKey::from_bytes(bytes)?;
        Self::check_identity(&key)?;

        let key = Self {
            key,
            bytes: Bytes::copy_from_slice(bytes),
        };

        debug!(
            "Read OpenPGP {:?} {:?} key with {} user id(s) and {} subkey(s)",
            key.version(),
            key.algorithm(),
            key.user_ids().len(),
            key.subkey_count()
        );

        Ok(key)
    }

    /// Wrap an already parsed key, serializing it once.
    pub fn from_signed(key: SignedPublicKey) -> Result<Self, OpenPgpError> {
        Self::check_identity(&key)?;
        let bytes = Bytes::from(key.to_bytes()?);
        Ok(Self { key, bytes })
    }

    fn check_identity(key: &SignedPublicKey) -> Result<(), OpenPgpError> {
        if key.details.users.is_empty() {
            return Err(OpenPgpError::MissingIdentity);
        }

        match key.details.users.iter().find(|user| user.signatures.is_empty()) {
            Some(user) => Err(OpenPgpError::UnsignedIdentity(user_id_string(user.id.id()))),
            None => Ok(()),
        }
    }

    pub fn version(&self) -> pgp::types::KeyVersion {
        self.key.primary_key.version()
    }

    pub fn algorithm(&self) -> PublicKeyAlgorithm {
        self.key.primary_key.algorithm()
    }

    pub fn user_ids(&self) -> Vec<String> {
        self.key
            .details
            .users
            .iter()
            .map(|user| user_id_string(user.id.id()))
            .collect()
    }

    pub fn subkey_count(&self) -> usize {
        self.key.public_subkeys.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn signed_key(&self) -> &SignedPublicKey {
        &self.key
    }
}

fn user_id_string<T: AsRef<[u8]> + ?Sized>(id: &T) -> String {
    String::from_utf8_lossy(id.as_ref()).into_owned()
}

impl PartialEq for OpenPgpKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for OpenPgpKey {}

impl KeyCodec for OpenPgpKey {
    type Error = OpenPgpError;

    fn decode(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }

    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.bytes.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use base64::{engine::general_purpose, Engine as _};

    const ED25519_MESSAGE: &str = include_str!("../../tests/data/ed25519-simple.eml");

    /// Bob's Ed25519 key from the test messages, unfolded
    pub(crate) fn ed25519_key_base64() -> String {
        let start = ED25519_MESSAGE.find("key=").unwrap() + "key=".len();
        let end = ED25519_MESSAGE[start..].find("\n\n").unwrap() + start;
        ED25519_MESSAGE[start..end]
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect()
    }

    pub(crate) fn ed25519_key_bytes() -> Vec<u8> {
        general_purpose::STANDARD
            .decode(ed25519_key_base64())
            .unwrap()
    }
}
