//! Sequences daemon start-up and shutdown.

use tracing::info;

use qna_wire::Envelope;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader};
use crate::registry::{HandlerRegistry, HandlerTag, Reply};
use crate::server::{Server, ServerSettings};
use crate::telemetry;

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Registry used by the `qnad` binary: every request is echoed back unchanged.
#[must_use]
pub fn echo_registry() -> HandlerRegistry {
    HandlerRegistry::new().with(HandlerTag::Any, |request: Envelope| Ok(Reply::from(request)))
}

/// Runs the daemon with the production collaborators and the echo registry.
///
/// # Errors
///
/// Returns an error if configuration, telemetry, binding, or signal handling
/// fails.
pub fn run_daemon() -> Result<(), LaunchError> {
    run_daemon_with(&SystemConfigLoader, &SystemShutdownSignal, echo_registry())
}

/// Runs the daemon with injected collaborators.
///
/// Loads configuration, installs telemetry, starts the server, and blocks in
/// `shutdown` before stopping and joining the accept loop.
///
/// # Errors
///
/// Returns an error if any start-up stage fails or the accept loop panicked.
pub fn run_daemon_with(
    loader: &dyn ConfigLoader,
    shutdown: &dyn ShutdownSignal,
    registry: HandlerRegistry,
) -> Result<(), LaunchError> {
    let config = loader.load()?;
    let telemetry = telemetry::initialise(&config)?;
    let _entered = telemetry.span().enter();
    info!(target: PROCESS_TARGET, "starting daemon runtime");

    let handle = Server::new(registry, ServerSettings::from_config(&config)).start()?;
    let waited = shutdown.wait();
    handle.stop();
    handle.join()?;
    waited?;
    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}
