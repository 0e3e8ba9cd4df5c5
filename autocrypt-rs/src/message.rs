//! Message header block
//!
//! Just enough of RFC 5322 to fetch a header field from a raw message:
//! the header block ends at the first empty line, folded lines are joined,
//! names are matched without regard to case.

use std::collections::HashMap;

/// Unfolded header fields of a message, keyed by lower-cased name
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    headers: HashMap<String, String>,
}

impl HeaderMap {
    /// Read the header block of a raw message.
    pub fn parse(message: &[u8]) -> Self {
        let message_str = String::from_utf8_lossy(message);
        let headers_str = Self::header_block(&message_str);

        let mut headers = HashMap::new();
        let mut current_header: Option<(String, String)> = None;

        for line in headers_str.lines() {
            if line.starts_with(' ') || line.starts_with('\t') {
                // Continuation of previous header (folded header)
                if let Some((_, ref mut value)) = current_header {
                    value.push(' ');
                    value.push_str(line.trim());
                }
            } else if let Some(colon_pos) = line.find(':') {
                if let Some((name, value)) = current_header.take() {
                    headers.entry(name).or_insert(value);
                }

                let name = line[..colon_pos].trim().to_lowercase();
                let value = line[colon_pos + 1..].trim().to_string();
                current_header = Some((name, value));
            }
        }

        if let Some((name, value)) = current_header {
            headers.entry(name).or_insert(value);
        }

        Self { headers }
    }

    /// Headers end with double CRLF or double LF
    fn header_block(message: &str) -> &str {
        if let Some(pos) = message.find("\r\n\r\n") {
            &message[..pos]
        } else if let Some(pos) = message.find("\n\n") {
            &message[..pos]
        } else {
            message
        }
    }

    /// Value of the first field with this name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_lowercase(), value.into());
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut map = HeaderMap::default();
        for (name, value) in iter {
            map.insert(name.as_ref(), value);
        }
        map
    }
}

/// Bare address of a mailbox (`Alice <alice@example.org>` → `alice@example.org`).
pub fn extract_address(mailbox: &str) -> &str {
    if let Some(start) = mailbox.find('<') {
        if let Some(end) = mailbox[start..].find('>') {
            return mailbox[start + 1..start + end].trim();
        }
    }

    mailbox.trim()
}
