//! Public server surface: bind an endpoint and serve a handler registry.

use std::net::SocketAddr;
use std::sync::Arc;

use qna_config::{Config, DEFAULT_MAX_REQUEST_BYTES, SocketEndpoint};
use tracing::{info, warn};

use crate::dispatch::DispatchConnectionHandler;
use crate::registry::HandlerRegistry;
use crate::transport::{ListenerError, ListenerHandle, SocketListener};

const SERVER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::server");

/// Settings applied when a [`Server`] starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Endpoint to bind. Port `0` selects an ephemeral port.
    pub endpoint: SocketEndpoint,
    /// Ceiling for the single receive performed on each connection.
    pub max_request_bytes: usize,
}

impl ServerSettings {
    /// Builds settings for `endpoint` with the default request ceiling.
    #[must_use]
    pub const fn new(endpoint: SocketEndpoint) -> Self {
        Self {
            endpoint,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }

    /// Replaces the request ceiling.
    #[must_use]
    pub fn with_max_request_bytes(mut self, max_request_bytes: usize) -> Self {
        self.max_request_bytes = max_request_bytes;
        self
    }

    /// Extracts the server settings from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.endpoint().clone(),
            max_request_bytes: config.max_request_bytes(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A configured server that has not started listening yet.
///
/// ```no_run
/// use qna_config::SocketEndpoint;
/// use qnad::{HandlerRegistry, HandlerTag, Reply, Server, ServerSettings};
///
/// # fn main() -> Result<(), qnad::ListenerError> {
/// let registry = HandlerRegistry::new()
///     .with(HandlerTag::Text, |request| Ok(Reply::from(request)));
/// let settings = ServerSettings::new(SocketEndpoint::tcp("127.0.0.1", 0));
/// let handle = Server::new(registry, settings).start()?;
/// println!("listening on {}", handle.local_addr());
/// handle.stop();
/// handle.join()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Server {
    registry: Arc<HandlerRegistry>,
    settings: ServerSettings,
}

impl Server {
    /// Freezes `registry` and pairs it with `settings`.
    #[must_use]
    pub fn new(registry: HandlerRegistry, settings: ServerSettings) -> Self {
        Self {
            registry: Arc::new(registry),
            settings,
        }
    }

    /// Settings the server will start with.
    #[must_use]
    pub const fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Binds the endpoint and starts accepting connections on a background
    /// thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be resolved or bound, or if the
    /// accept thread cannot be spawned.
    pub fn start(self) -> Result<ServerHandle, ListenerError> {
        let Self { registry, settings } = self;
        if registry.is_empty() {
            warn!(
                target: SERVER_TARGET,
                "starting with no registered handlers; every request will be rejected"
            );
        }

        let listener = SocketListener::bind(&settings.endpoint)?;
        let local_addr = listener.local_addr()?;
        let handler = Arc::new(DispatchConnectionHandler::new(
            registry,
            settings.max_request_bytes,
        ));
        let listener = listener.start(handler)?;
        info!(
            target: SERVER_TARGET,
            address = %local_addr,
            max_request_bytes = settings.max_request_bytes,
            "server started"
        );
        Ok(ServerHandle {
            local_addr,
            listener,
        })
    }
}

/// Handle to a running server.
///
/// Dropping the handle requests shutdown without waiting for it.
#[derive(Debug)]
pub struct ServerHandle {
    local_addr: SocketAddr,
    listener: ListenerHandle,
}

impl ServerHandle {
    /// Address the server is bound to, with any ephemeral port resolved.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Requests shutdown. The accept loop notices within one polling interval.
    pub fn stop(&self) {
        self.listener.shutdown();
    }

    /// Returns `true` once shutdown has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.listener.is_shutdown()
    }

    /// Waits for the accept loop to exit.
    ///
    /// Connections already handed to dispatch threads are not waited for.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] if the accept loop panicked.
    pub fn join(self) -> Result<(), ListenerError> {
        self.listener.join()
    }
}
