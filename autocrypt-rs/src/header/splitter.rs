//! Attribute splitter
//!
//! Cuts a header value into its `key=value` segments. Segments are trimmed
//! of whitespace and stray delimiters; empty segments (`a=b;;c=d`, trailing
//! `;`) are skipped.

const DELIMITER: char = ';';
const TRIM: &[char] = &[' ', '\t', '\r', '\n', DELIMITER];

/// Lazy iterator over the segments of a header value
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

/// Split a header value on `;`.
pub fn split(raw: &str) -> Segments<'_> {
    Segments { rest: raw }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.rest.is_empty() {
            let part = match self.rest.find(DELIMITER) {
                Some(i) => {
                    let part = &self.rest[..i];
                    self.rest = &self.rest[i + 1..];
                    part
                }
                None => std::mem::take(&mut self.rest),
            };

            let part = part.trim_matches(TRIM);
            if !part.is_empty() {
                return Some(part);
            }
        }

        None
    }
}

/// Split a segment into name and value at the first `=`.
pub fn split_attribute(segment: &str) -> Option<(&str, &str)> {
    segment.split_once('=')
}
