//! Autocrypt header codec
//!
//! This module splits a header value into attributes, interprets them
//! into an [`AutocryptHeader`] and serializes a header back to text.

pub mod parser;
pub mod serializer;
pub mod splitter;
pub mod summary;
pub mod types;

pub use parser::interpret;
pub use serializer::fold;
pub use splitter::{split, Segments};
pub use summary::HeaderSummary;
pub use types::{AutocryptHeader, KeyType, AUTOCRYPT_HEADER};
