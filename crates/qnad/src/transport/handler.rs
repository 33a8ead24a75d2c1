//! Connection handling abstraction for the daemon listener.

use std::net::{SocketAddr, TcpStream};

/// Handles accepted socket connections.
///
/// The listener calls [`ConnectionHandler::handle`] on a dedicated thread for
/// every accepted connection and never waits for it to return. The stream is
/// closed when the handler drops it.
pub(crate) trait ConnectionHandler: Send + Sync + 'static {
    /// Handles a single connection. Implementations should avoid panicking.
    fn handle(&self, stream: TcpStream, peer: SocketAddr);
}
