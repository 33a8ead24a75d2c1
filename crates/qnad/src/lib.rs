//! Server side of the qna request/response protocol.
//!
//! A client opens a TCP connection, sends one framed [`Envelope`], and reads
//! back at most one framed envelope before the connection closes. The daemon
//! looks up a handler by the request's content type in a [`HandlerRegistry`],
//! falling back to the [`HandlerTag::Any`] handler when no exact match exists.
//!
//! Each accepted connection is served on its own thread, so a slow or failing
//! handler never blocks other clients. Handler errors and panics are reported
//! to the client as text envelopes:
//!
//! ```text
//! Error processing request: <error>
//! ```
//!
//! [`Server`] is the embedding API; the `qnad` binary wraps it with layered
//! configuration, structured telemetry, signal handling, and an echo handler.
//!
//! [`Envelope`]: qna_wire::Envelope

mod bootstrap;
mod dispatch;
mod process;
mod registry;
mod server;
pub mod telemetry;
mod transport;

pub use bootstrap::{ConfigLoader, StaticConfigLoader, SystemConfigLoader};
pub use dispatch::DispatchError;
pub use process::{
    LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, echo_registry, run_daemon,
    run_daemon_with,
};
pub use registry::{Handler, HandlerError, HandlerRegistry, HandlerResult, HandlerTag, Reply};
pub use server::{Server, ServerHandle, ServerSettings};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::ListenerError;

#[cfg(test)]
mod tests;
