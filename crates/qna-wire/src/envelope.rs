//! Typed payload exchanged on every connection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Content type tag carried in the `ctype` field of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ContentType {
    /// UTF-8 text carried verbatim.
    #[serde(rename = "str")]
    Text,
    /// Raw bytes carried as lowercase hexadecimal.
    #[serde(rename = "bin")]
    Binary,
}

impl ContentType {
    /// Returns the tag as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "str",
            Self::Binary => "bin",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A single request or response payload.
///
/// The variant fixes the content type, so a frame can never claim to be
/// binary while holding text or the other way round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// Text payload.
    Text(String),
    /// Binary payload.
    Binary(Vec<u8>),
}

impl Envelope {
    /// Builds a text envelope.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Builds a binary envelope.
    #[must_use]
    pub fn binary(content: impl Into<Vec<u8>>) -> Self {
        Self::Binary(content.into())
    }

    /// Returns the content type tag of this envelope.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        match self {
            Self::Text(_) => ContentType::Text,
            Self::Binary(_) => ContentType::Binary,
        }
    }

    /// Returns the text content, if this is a text envelope.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }

    /// Returns the binary content, if this is a binary envelope.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Text(_) => None,
            Self::Binary(bytes) => Some(bytes),
        }
    }

    /// Returns the payload size in bytes before encoding.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Binary(bytes) => bytes.len(),
        }
    }

    /// Returns `true` when the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for Envelope {
    fn from(content: String) -> Self {
        Self::Text(content)
    }
}

impl From<&str> for Envelope {
    fn from(content: &str) -> Self {
        Self::Text(content.to_owned())
    }
}

impl From<Vec<u8>> for Envelope {
    fn from(content: Vec<u8>) -> Self {
        Self::Binary(content)
    }
}

impl From<&[u8]> for Envelope {
    fn from(content: &[u8]) -> Self {
        Self::Binary(content.to_vec())
    }
}
