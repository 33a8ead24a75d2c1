//! Tests for the socket listener.

use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rstest::{fixture, rstest};

use qna_config::SocketEndpoint;

use super::listener::SocketListener;
use super::{ConnectionHandler, CountingHandler, ListenerError};

#[derive(Clone)]
struct CountingFixture {
    count: Arc<AtomicUsize>,
    handler: Arc<CountingHandler>,
}

#[fixture]
fn counting_fixture() -> CountingFixture {
    let (count, handler) = CountingHandler::new();
    CountingFixture { count, handler }
}

#[fixture]
fn tcp_endpoint() -> SocketEndpoint {
    SocketEndpoint::tcp("127.0.0.1", 0)
}

fn wait_for_count(count: &AtomicUsize, expected: usize) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if count.load(Ordering::SeqCst) >= expected {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

#[rstest]
fn tcp_listener_accepts_connections(
    tcp_endpoint: SocketEndpoint,
    counting_fixture: CountingFixture,
) {
    let listener = SocketListener::bind(&tcp_endpoint).expect("bind tcp listener");
    let addr = listener
        .local_addr()
        .expect("listener should report local address");
    assert_ne!(addr.port(), 0, "ephemeral port should be resolved");
    let CountingFixture { count, handler } = counting_fixture;
    let handler: Arc<dyn ConnectionHandler> = handler;
    let handle = listener.start(handler).expect("start listener");

    TcpStream::connect(addr).expect("connect first client");
    TcpStream::connect(addr).expect("connect second client");

    assert!(wait_for_count(&count, 2), "expected two connections");
    handle.shutdown();
    handle.join().expect("join listener");
}

#[rstest]
fn tcp_listener_rejects_port_in_use() {
    let reserved = TcpListener::bind(("127.0.0.1", 0)).expect("reserve port");
    let port = reserved.local_addr().expect("reserved address").port();

    let error = SocketListener::bind(&SocketEndpoint::tcp("127.0.0.1", port))
        .expect_err("bind should fail while the port is held");
    assert!(matches!(error, ListenerError::BindTcp { .. }));
}

#[rstest]
fn tcp_listener_reports_unresolvable_hosts() {
    let endpoint = SocketEndpoint::tcp("host.invalid", 0);
    let error = SocketListener::bind(&endpoint).expect_err("resolution should fail");
    assert!(matches!(
        error,
        ListenerError::Resolve { .. } | ListenerError::ResolveEmpty { .. }
    ));
}

#[rstest]
fn shutdown_stops_the_accept_loop(tcp_endpoint: SocketEndpoint, counting_fixture: CountingFixture) {
    let listener = SocketListener::bind(&tcp_endpoint).expect("bind tcp listener");
    let handler: Arc<dyn ConnectionHandler> = counting_fixture.handler;
    let handle = listener.start(handler).expect("start listener");

    handle.shutdown();
    assert!(handle.is_shutdown());
    handle.join().expect("listener thread should exit after shutdown");
}
