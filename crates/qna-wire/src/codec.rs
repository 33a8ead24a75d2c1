//! Envelope codec: JSON record inside a checksummed zstd frame.

use std::borrow::Cow;
use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use crate::envelope::{ContentType, Envelope};
use crate::errors::{DecodeError, EncodeError};
use crate::hex::{from_hex, to_hex};

/// Upper bound on the decompressed size of a single frame.
pub const MAX_DECOMPRESSED_BYTES: usize = 16 * 1024 * 1024;

const COMPRESSION_LEVEL: i32 = 3;
const READ_CHUNK: usize = 8192;

#[derive(Debug, Deserialize, Serialize)]
struct WireRecord<'a> {
    ctype: ContentType,
    #[serde(borrow)]
    content: Cow<'a, str>,
}

impl<'a> From<&'a Envelope> for WireRecord<'a> {
    fn from(envelope: &'a Envelope) -> Self {
        let content = match envelope {
            Envelope::Text(text) => Cow::Borrowed(text.as_str()),
            Envelope::Binary(bytes) => Cow::Owned(to_hex(bytes)),
        };
        Self {
            ctype: envelope.content_type(),
            content,
        }
    }
}

impl WireRecord<'_> {
    fn into_envelope(self) -> Result<Envelope, DecodeError> {
        match self.ctype {
            ContentType::Text => Ok(Envelope::Text(self.content.into_owned())),
            ContentType::Binary => Ok(Envelope::Binary(from_hex(&self.content)?)),
        }
    }
}

/// Encodes an envelope into frame bytes.
///
/// # Errors
///
/// Returns [`EncodeError`] if serialisation or compression fails.
pub fn encode(envelope: &Envelope) -> Result<Vec<u8>, EncodeError> {
    let record = WireRecord::from(envelope);
    let json = serde_json::to_vec(&record).map_err(EncodeError::Serialize)?;
    compress(&json).map_err(EncodeError::Compress)
}

/// Decodes frame bytes into an envelope.
///
/// # Errors
///
/// Returns [`DecodeError`] when the input is empty, the zstd frame is corrupt
/// or truncated, the record is malformed or missing a field, or binary
/// content is not valid hexadecimal.
pub fn decode(bytes: &[u8]) -> Result<Envelope, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    let json = decompress_with_limit(bytes, MAX_DECOMPRESSED_BYTES)?;
    let record: WireRecord<'_> =
        serde_json::from_slice(&json).map_err(DecodeError::MalformedRecord)?;
    record.into_envelope()
}

fn compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = zstd::stream::write::Encoder::new(Vec::new(), COMPRESSION_LEVEL)?;
    encoder.include_checksum(true)?;
    encoder.write_all(data)?;
    encoder.finish()
}

fn decompress_with_limit(data: &[u8], limit: usize) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = zstd::stream::read::Decoder::new(data).map_err(DecodeError::Decompress)?;
    let mut out = Vec::new();
    let mut chunk = [0_u8; READ_CHUNK];
    loop {
        let read = decoder.read(&mut chunk).map_err(DecodeError::Decompress)?;
        if read == 0 {
            break;
        }
        if out.len() + read > limit {
            return Err(DecodeError::TooLarge { limit });
        }
        out.extend_from_slice(chunk.get(..read).unwrap_or_default());
    }
    Ok(out)
}
