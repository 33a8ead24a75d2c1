//! Connection handler that dispatches one framed request per connection.
//!
//! The handler reads a single frame, decodes it, resolves a handler from the
//! registry, invokes it, and writes back at most one frame before the stream
//! is dropped.

use std::any::Any;
use std::io::{self, Read};
use std::net::{SocketAddr, TcpStream};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use qna_wire::Envelope;
use tracing::{debug, warn};

use crate::registry::{Handler, HandlerRegistry, Reply};
use crate::transport::ConnectionHandler;

use super::DISPATCH_TARGET;
use super::errors::DispatchError;
use super::response::ResponseWriter;

/// Connection handler that decodes, routes, and answers one request.
#[derive(Debug)]
pub(crate) struct DispatchConnectionHandler {
    registry: Arc<HandlerRegistry>,
    max_request_bytes: usize,
}

impl DispatchConnectionHandler {
    pub(crate) const fn new(registry: Arc<HandlerRegistry>, max_request_bytes: usize) -> Self {
        Self {
            registry,
            max_request_bytes,
        }
    }

    fn dispatch(&self, mut stream: TcpStream, peer: SocketAddr) {
        let request = match read_request(&mut stream, self.max_request_bytes) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(target: DISPATCH_TARGET, %peer, "client disconnected without request");
                return;
            }
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %peer, %error, "failed to read request");
                return;
            }
        };

        let response = match self.process(&request) {
            Ok(Some(envelope)) => envelope,
            Ok(None) => {
                debug!(target: DISPATCH_TARGET, %peer, "handler returned no reply");
                return;
            }
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %peer, %error, "request failed");
                error.to_envelope()
            }
        };

        if let Err(error) = ResponseWriter::new(&mut stream).write_envelope(&response) {
            warn!(target: DISPATCH_TARGET, %peer, %error, "failed to write response");
        }
    }

    /// Runs the decode, resolve, and invoke stages for one request frame.
    fn process(&self, frame: &[u8]) -> Result<Option<Envelope>, DispatchError> {
        let request = qna_wire::decode(frame)?;
        let content_type = request.content_type();
        let handler = self
            .registry
            .resolve(content_type)
            .ok_or(DispatchError::NoHandler)?;

        debug!(
            target: DISPATCH_TARGET,
            content_type = content_type.as_str(),
            bytes = request.len(),
            "dispatching request"
        );

        let reply = invoke(handler.as_ref(), request)?;
        Ok(reply.into_envelope())
    }
}

impl ConnectionHandler for DispatchConnectionHandler {
    fn handle(&self, stream: TcpStream, peer: SocketAddr) {
        self.dispatch(stream, peer);
    }
}

/// Calls the handler, turning both returned errors and panics into
/// [`DispatchError`].
fn invoke(handler: &dyn Handler, request: Envelope) -> Result<Reply, DispatchError> {
    match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(request))) {
        Ok(Ok(reply)) => Ok(reply),
        Ok(Err(error)) => Err(DispatchError::Handler(error)),
        Err(payload) => Err(DispatchError::HandlerPanicked {
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}

/// Performs the single bounded read for a request frame.
///
/// Returns `Ok(None)` if the client disconnects without sending data. Bytes
/// beyond `max_bytes` stay unread and the truncated frame fails to decode.
fn read_request(stream: &mut TcpStream, max_bytes: usize) -> io::Result<Option<Vec<u8>>> {
    let mut buffer = vec![0_u8; max_bytes];
    let bytes_read = read_with_retry(stream, &mut buffer)?;
    if bytes_read == 0 {
        return Ok(None);
    }
    buffer.truncate(bytes_read);
    Ok(Some(buffer))
}

/// Reads from the stream, retrying on interrupts.
fn read_with_retry(stream: &mut TcpStream, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}
