//! Entry point for the `qna` client.
//!
//! Delegates to [`qna_cli::run`], which loads configuration, sends one request
//! to the configured daemon, and prints the response.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    qna_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
