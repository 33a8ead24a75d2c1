//! One-shot request/response session against a qna daemon.
//!
//! Every call opens a fresh connection, writes one request frame, performs a
//! single bounded read, and closes the connection. Nothing is retried: a
//! response larger than the read ceiling arrives truncated and fails to
//! decode.

use std::io;

use qna_config::SocketEndpoint;
use qna_wire::{DecodeError, EncodeError, Envelope};
use thiserror::Error;

use crate::transport::{connect, read_frame, write_frame};

/// Errors returned by a client session.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint host could not be resolved.
    #[error("failed to resolve daemon address {endpoint}: {source}")]
    Resolve {
        /// Endpoint as configured.
        endpoint: String,
        /// Underlying resolver error.
        #[source]
        source: io::Error,
    },
    /// The TCP connection could not be established.
    #[error("failed to connect to daemon at {endpoint}: {source}")]
    Connect {
        /// Endpoint as configured.
        endpoint: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Writing the request frame failed.
    #[error("failed to send request to daemon: {0}")]
    Send(#[source] io::Error),
    /// Reading the response frame failed.
    #[error("failed to read response from daemon: {0}")]
    Receive(#[source] io::Error),
    /// The request could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[from] EncodeError),
    /// The response could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[from] DecodeError),
}

impl ClientError {
    /// Returns `true` for failures below the codec: resolve, connect, send,
    /// and receive.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Resolve { .. } | Self::Connect { .. } | Self::Send(_) | Self::Receive(_)
        )
    }
}

/// Sends `request` to `endpoint` and returns the decoded response.
///
/// At most `max_response_bytes` are read. A daemon that closes the connection
/// without replying produces [`DecodeError::Empty`].
///
/// # Errors
///
/// Returns a transport error if any socket operation fails, or a codec error
/// if the request cannot be encoded or the response cannot be decoded.
pub fn send(
    endpoint: &SocketEndpoint,
    request: &Envelope,
    max_response_bytes: usize,
) -> Result<Envelope, ClientError> {
    let frame = qna_wire::encode(request)?;
    let mut stream = connect(endpoint)?;
    write_frame(&mut stream, &frame).map_err(ClientError::Send)?;
    let response = read_frame(&mut stream, max_response_bytes).map_err(ClientError::Receive)?;
    drop(stream);
    Ok(qna_wire::decode(&response)?)
}

/// Sends a text request. See [`send`].
///
/// # Errors
///
/// As for [`send`].
pub fn send_text(
    endpoint: &SocketEndpoint,
    text: &str,
    max_response_bytes: usize,
) -> Result<Envelope, ClientError> {
    send(endpoint, &Envelope::text(text), max_response_bytes)
}

/// Sends a binary request. See [`send`].
///
/// # Errors
///
/// As for [`send`].
pub fn send_binary(
    endpoint: &SocketEndpoint,
    bytes: &[u8],
    max_response_bytes: usize,
) -> Result<Envelope, ClientError> {
    send(endpoint, &Envelope::binary(bytes), max_response_bytes)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ClientError::Send(io::Error::from(io::ErrorKind::BrokenPipe)), true)]
    #[case(ClientError::Receive(io::Error::from(io::ErrorKind::ConnectionReset)), true)]
    #[case(ClientError::Decode(DecodeError::Empty), false)]
    fn transport_errors_are_classified(#[case] error: ClientError, #[case] transport: bool) {
        assert_eq!(error.is_transport(), transport);
    }
}
