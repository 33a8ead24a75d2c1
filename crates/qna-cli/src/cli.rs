//! CLI argument definitions for the qna client.

use clap::{Parser, Subcommand};

/// Sends one request to a qna daemon and prints the response.
#[derive(Parser, Debug)]
#[command(name = "qna", disable_help_subcommand = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) request: RequestCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum RequestCommand {
    /// Sends a text request.
    Text {
        /// Text to send.
        #[arg(value_name = "MESSAGE", allow_hyphen_values = true)]
        message: String,
    },
    /// Sends a binary request given as hexadecimal digits.
    Binary {
        /// Payload as hex, for example `0a0b0c`.
        #[arg(value_name = "HEX")]
        payload: String,
    },
}
