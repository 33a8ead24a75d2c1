//! Error types raised by the envelope codec.

use std::io;

use thiserror::Error;

/// Errors raised while turning an envelope into frame bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The wire record could not be serialised.
    #[error("failed to serialise envelope: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The compressor rejected the serialised record.
    #[error("failed to compress envelope: {0}")]
    Compress(#[source] io::Error),
}

/// Errors raised while turning frame bytes back into an envelope.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No bytes were received.
    #[error("empty frame")]
    Empty,
    /// The compressed stream was corrupt, truncated, or failed its checksum.
    #[error("failed to decompress frame: {0}")]
    Decompress(#[source] io::Error),
    /// The decompressed record exceeds the decompression ceiling.
    #[error("decompressed frame exceeds {limit} bytes")]
    TooLarge {
        /// Ceiling that was exceeded.
        limit: usize,
    },
    /// The decompressed bytes are not a valid wire record.
    #[error("malformed record: {0}")]
    MalformedRecord(#[source] serde_json::Error),
    /// Binary content was not valid hexadecimal.
    #[error("invalid binary content: {0}")]
    InvalidHex(#[from] HexError),
}

/// Errors raised while decoding hexadecimal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// The input held an odd number of digits.
    #[error("odd number of hex digits ({len})")]
    OddLength {
        /// Number of digits received.
        len: usize,
    },
    /// The input held a character outside `[0-9a-fA-F]`.
    #[error("invalid hex digit at offset {offset}")]
    InvalidDigit {
        /// Byte offset of the offending character.
        offset: usize,
    },
}
