//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use qna_wire::HexError;
use thiserror::Error;

use crate::client::ClientError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("binary payload must be hexadecimal: {0}")]
    InvalidPayload(#[source] HexError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to write response: {0}")]
    WriteOutput(#[source] io::Error),
}
