//! Message payloads

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Immutable text blob held by the buffer.
///
/// Cloning shares the underlying allocation, so previews can be taken
/// without copying payload text under the buffer lock.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessagePayload(Arc<str>);

impl MessagePayload {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// First `max_chars` characters, followed by `...` when anything was cut
    pub fn preview(&self, max_chars: usize) -> String {
        match self.0.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.0[..cut]),
            None => self.0.to_string(),
        }
    }
}

impl From<String> for MessagePayload {
    fn from(text: String) -> Self {
        Self(text.into())
    }
}

impl From<&str> for MessagePayload {
    fn from(text: &str) -> Self {
        Self(text.into())
    }
}

impl fmt::Display for MessagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for MessagePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(MessagePayload::from("hello-1").char_len(), 7);
        assert_eq!(MessagePayload::from("héllo").char_len(), 5);
    }

    #[test]
    fn test_preview_truncation() {
        let short = MessagePayload::from("short");
        assert_eq!(short.preview(50), "short");

        let exact = MessagePayload::from("x".repeat(50));
        assert_eq!(exact.preview(50), "x".repeat(50));

        let long = MessagePayload::from("y".repeat(51));
        assert_eq!(long.preview(50), format!("{}...", "y".repeat(50)));
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let payload = MessagePayload::from("ж".repeat(60));
        let preview = payload.preview(50);
        assert_eq!(preview.chars().count(), 53);
        assert!(preview.ends_with("..."));
    }
}
