//! Error types for request dispatch failures.
//!
//! Every stage of the dispatcher returns [`DispatchError`]. The connection
//! handler turns the error into a text envelope at the last moment, so the
//! stages never deal with wire-level error strings.

use std::io;

use qna_wire::{DecodeError, EncodeError, Envelope};
use thiserror::Error;

use crate::registry::HandlerError;

/// Content sent when no handler matches the request type.
pub(crate) const NO_HANDLER_MESSAGE: &str = "No handler registered for this content type";

/// Errors surfaced while dispatching a single request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request frame could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Neither the exact tag nor the wildcard has a handler.
    #[error("No handler registered for this content type")]
    NoHandler,

    /// The handler returned an error.
    #[error("{0}")]
    Handler(#[source] HandlerError),

    /// The handler panicked.
    #[error("handler panicked: {message}")]
    HandlerPanicked {
        /// Panic payload rendered as text.
        message: String,
    },

    /// The response envelope could not be encoded.
    #[error("failed to encode response: {0}")]
    Encode(#[from] EncodeError),

    /// Reading the request or writing the response failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl DispatchError {
    /// Renders the error as the text envelope sent back to the client.
    ///
    /// A missing handler is reported with a fixed message. Every other
    /// failure is prefixed with `Error processing request: `.
    #[must_use]
    pub fn to_envelope(&self) -> Envelope {
        match self {
            Self::NoHandler => Envelope::text(NO_HANDLER_MESSAGE),
            other => Envelope::text(format!("Error processing request: {other}")),
        }
    }
}
