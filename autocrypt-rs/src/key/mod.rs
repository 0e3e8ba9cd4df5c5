//! Public key material carried by the `key` attribute
//!
//! The header codec never looks inside a key. It only needs to turn the
//! decoded attribute bytes into a key value and back, which is what
//! [`KeyCodec`] describes.

pub mod openpgp;

pub use openpgp::{OpenPgpError, OpenPgpKey, PublicKeyAlgorithm};

/// Binary encoding of a public key credential.
///
/// Implementations must be callable from several threads at once; the
/// header codec keeps no state of its own around them.
pub trait KeyCodec: Sized {
    /// Error raised by the codec. It reaches the caller unchanged inside
    /// [`AutocryptError::Key`](crate::AutocryptError::Key).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decode a key from its binary (not base64) representation.
    fn decode(bytes: &[u8]) -> Result<Self, Self::Error>;

    /// Encode the key to its binary representation.
    fn encode(&self) -> Result<Vec<u8>, Self::Error>;
}
