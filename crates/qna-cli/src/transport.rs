//! Socket transport helpers for the qna client.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use qna_config::SocketEndpoint;

use crate::client::ClientError;

pub(crate) const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn connect(endpoint: &SocketEndpoint) -> Result<TcpStream, ClientError> {
    let address = resolve_tcp_address(endpoint.host(), endpoint.port()).map_err(|source| {
        ClientError::Resolve {
            endpoint: endpoint.to_string(),
            source,
        }
    })?;

    TcpStream::connect_timeout(&address, CONNECTION_TIMEOUT).map_err(|source| {
        ClientError::Connect {
            endpoint: endpoint.to_string(),
            source,
        }
    })
}

fn resolve_tcp_address(host: &str, port: u16) -> io::Result<SocketAddr> {
    let mut addrs = (host, port).to_socket_addrs()?;
    addrs
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::AddrNotAvailable, "no resolved addresses"))
}

/// Writes the whole frame and flushes.
pub(crate) fn write_frame<W: Write>(writer: &mut W, frame: &[u8]) -> io::Result<()> {
    writer.write_all(frame)?;
    writer.flush()
}

/// Performs the single bounded read for a response frame.
///
/// A clean disconnect yields an empty buffer.
pub(crate) fn read_frame<R: Read>(reader: &mut R, max_bytes: usize) -> io::Result<Vec<u8>> {
    let mut buffer = vec![0_u8; max_bytes];
    let bytes_read = loop {
        match reader.read(&mut buffer) {
            Ok(n) => break n,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    };
    buffer.truncate(bytes_read);
    Ok(buffer)
}
