//! Client helpers shared by the behavioural suites.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use qna_wire::Envelope;

const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends one request frame and reads until the server closes the connection.
///
/// Returns `None` when the server closed without replying.
pub(crate) fn round_trip(addr: SocketAddr, request: &Envelope) -> Option<Envelope> {
    let frame = qna_wire::encode(request).expect("encode request");
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(READ_TIMEOUT))
        .expect("set read timeout");
    stream.write_all(&frame).expect("write request");
    stream.flush().expect("flush");

    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read response");
    (!response.is_empty()).then(|| qna_wire::decode(&response).expect("decode response"))
}
