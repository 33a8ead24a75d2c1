//! Client side of the qna request/response protocol.
//!
//! [`send`] opens one connection to a daemon, writes one framed request,
//! reads one bounded response, and closes the connection. The `qna` binary
//! wraps it:
//!
//! ```text
//! qna [--endpoint tcp://host:port] [--max-response-bytes N] text <MESSAGE>
//! qna [--endpoint tcp://host:port] [--max-response-bytes N] binary <HEX>
//! ```
//!
//! Text responses are printed verbatim and binary responses as lowercase hex.
//! Configuration flags must precede the subcommand.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use qna_config::Config;
use qna_wire::{Envelope, Hex};

mod cli;
mod client;
mod config;
mod errors;
mod transport;

use cli::{Cli, RequestCommand};
pub use client::{ClientError, send, send_binary, send_text};
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use errors::AppError;

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

fn run_with_loader<I, W, E, L>(args: I, stdout: &mut W, stderr: &mut E, loader: &L) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);

    let result = Cli::try_parse_from(&split.command_arguments)
        .map_err(AppError::CliUsage)
        .and_then(|cli| {
            loader
                .load(&split.config_arguments)
                .map(|config| (cli, config))
        })
        .and_then(|(cli, config)| execute(cli.request, &config, stdout));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::CliUsage(error))
            if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
        {
            let _ = write!(stdout, "{error}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn execute<W: Write>(
    request: RequestCommand,
    config: &Config,
    stdout: &mut W,
) -> Result<(), AppError> {
    let envelope = match request {
        RequestCommand::Text { message } => Envelope::text(message),
        RequestCommand::Binary { payload } => {
            Envelope::binary(qna_wire::from_hex(&payload).map_err(AppError::InvalidPayload)?)
        }
    };
    let response = send(config.endpoint(), &envelope, config.max_response_bytes())?;
    write_response(stdout, &response)
}

fn write_response<W: Write>(stdout: &mut W, response: &Envelope) -> Result<(), AppError> {
    match response {
        Envelope::Text(text) => writeln!(stdout, "{text}"),
        Envelope::Binary(bytes) => writeln!(stdout, "{}", Hex(bytes)),
    }
    .and_then(|()| stdout.flush())
    .map_err(AppError::WriteOutput)
}
