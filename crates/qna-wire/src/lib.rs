//! Shared wire types for the qna client and daemon.
//!
//! Every connection carries exactly one request frame from the client and at
//! most one response frame from the daemon. A frame is a zstd-compressed JSON
//! record with two string fields:
//!
//! ```json
//! {"ctype":"str","content":"hello"}
//! {"ctype":"bin","content":"010203"}
//! ```
//!
//! Binary content travels as lowercase hexadecimal because JSON strings cannot
//! carry raw bytes. [`encode`] and [`decode`] convert between [`Envelope`]
//! values and frame bytes.

mod codec;
mod envelope;
mod errors;
mod hex;

pub use codec::{MAX_DECOMPRESSED_BYTES, decode, encode};
pub use envelope::{ContentType, Envelope};
pub use errors::{DecodeError, EncodeError, HexError};
pub use hex::{Hex, from_hex, to_hex};
