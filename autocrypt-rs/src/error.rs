//! Error types for autocrypt-rs

use thiserror::Error;

/// Result type alias for header operations
pub type Result<T> = std::result::Result<T, AutocryptError>;

/// Autocrypt header error types
#[derive(Error, Debug)]
pub enum AutocryptError {
    /// The message carries no Autocrypt header field
    #[error("no AUTOCRYPT header found")]
    HeaderNotFound,

    /// A non-empty attribute without a `=` separator
    #[error("Malformed attribute: '{0}'")]
    MalformedSegment(String),

    /// An unrecognized attribute that is not marked ignorable
    #[error("Unknown critical attribute: '{0}'")]
    UnknownCriticalAttribute(String),

    /// `type` value other than the OpenPGP token
    #[error("Unknown key type: '{0}'")]
    InvalidType(String),

    /// `prefer-encrypted` value other than `yes` or `no`
    #[error("Unknown prefer-encrypted value: '{0}'")]
    InvalidPreferEncrypted(String),

    /// The `key` attribute is not valid base64
    #[error("Invalid key encoding: {0}")]
    KeyEncoding(#[from] base64::DecodeError),

    /// Error reported by the key codec, passed through untouched
    #[error("{0}")]
    Key(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AutocryptError {
    /// Wrap an error raised by a [`KeyCodec`](crate::key::KeyCodec).
    pub fn key<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AutocryptError::Key(Box::new(err))
    }

    /// Borrow the key codec's error as its concrete type.
    pub fn key_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            AutocryptError::Key(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }
}
