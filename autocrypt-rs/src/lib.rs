//! autocrypt-rs: Autocrypt header codec
//!
//! Parses and produces the `Autocrypt` email header, which advertises a
//! sender's public key and encryption preference for opportunistic
//! end-to-end encryption.
//!
//! # Features
//!
//! - **Parsing**: `key=value;` attribute lists with whitespace and trailing
//!   delimiter tolerance
//! - **Forward compatibility**: unknown attributes prefixed with `_` are kept,
//!   any other unknown attribute rejects the whole header
//! - **Serialization**: canonical attribute order and 76 column key folding
//! - **Keys**: pluggable [`KeyCodec`], with a built-in OpenPGP codec on top of `pgp`
//!
//! # Example
//!
//! ```no_run
//! use autocrypt_rs::AutocryptHeader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let message = std::fs::read("message.eml")?;
//!     let header: AutocryptHeader = AutocryptHeader::from_message(&message)?;
//!
//!     println!("{} prefers encryption: {}", header.recipient, header.prefer_encrypted);
//!     println!("{}", header.to_header_string()?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration for the command line tool
//! - [`error`]: Error types and handling
//! - [`header`]: Header splitting, interpretation and serialization
//! - [`key`]: Key codec trait and the OpenPGP implementation
//! - [`message`]: Header field lookup in raw messages

pub mod config;
pub mod error;
pub mod header;
pub mod key;
pub mod message;

// Re-export commonly used types
pub use config::Config;
pub use error::{AutocryptError, Result};
pub use header::{AutocryptHeader, HeaderSummary, KeyType};
pub use key::{KeyCodec, OpenPgpKey};
pub use message::HeaderMap;
