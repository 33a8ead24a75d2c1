//! Process lifecycle for the `qnad` binary.

mod errors;
mod launch;
mod shutdown;

pub use errors::LaunchError;
pub use launch::{echo_registry, run_daemon, run_daemon_with};
pub use shutdown::{ShutdownError, ShutdownSignal, SystemShutdownSignal};

pub(crate) const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");
