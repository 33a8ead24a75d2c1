//! End-to-end tests spanning the qna client and daemon.
//!
//! The crate starts real servers on ephemeral loopback ports and talks to
//! them through [`qna_cli::send`], so every test crosses the full wire path:
//! encode, connect, dispatch, decode.
//!
//! - [`fixtures`]: handler registries used by the scenarios
//! - [`TestServer`]: a running server that stops when dropped

use std::net::SocketAddr;

use qna_cli::ClientError;
use qna_config::{DEFAULT_MAX_RESPONSE_BYTES, SocketEndpoint};
use qna_wire::Envelope;
use qnad::{HandlerRegistry, ListenerError, Server, ServerHandle, ServerSettings};

pub mod fixtures;

/// A server bound to an ephemeral loopback port.
///
/// Dropping the value stops the accept loop and waits for it to exit.
#[derive(Debug)]
pub struct TestServer {
    handle: Option<ServerHandle>,
    address: SocketAddr,
}

impl TestServer {
    /// Starts a server for `registry` on `127.0.0.1:0`.
    ///
    /// # Errors
    ///
    /// Returns the listener error if binding or spawning fails.
    pub fn start(registry: HandlerRegistry) -> Result<Self, ListenerError> {
        let settings = ServerSettings::new(SocketEndpoint::tcp("127.0.0.1", 0));
        let handle = Server::new(registry, settings).start()?;
        let address = handle.local_addr();
        Ok(Self {
            handle: Some(handle),
            address,
        })
    }

    /// Endpoint clients should connect to.
    #[must_use]
    pub fn endpoint(&self) -> SocketEndpoint {
        SocketEndpoint::tcp(self.address.ip().to_string(), self.address.port())
    }

    /// Sends one request with the default response ceiling.
    ///
    /// # Errors
    ///
    /// Returns the client error for transport or codec failures.
    pub fn send(&self, request: &Envelope) -> Result<Envelope, ClientError> {
        qna_cli::send(&self.endpoint(), request, DEFAULT_MAX_RESPONSE_BYTES)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop();
            drop(handle.join());
        }
    }
}
