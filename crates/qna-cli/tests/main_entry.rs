//! Integration tests for the `qna` binary entry point.
//!
//! Verifies the round trip against an in-process daemon and the user-facing
//! errors when the daemon is unreachable or arguments are missing.

use std::net::TcpListener;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use qna_config::SocketEndpoint;
use qna_wire::Envelope;
use qnad::{HandlerRegistry, HandlerTag, Reply, Server, ServerSettings};

fn unused_endpoint() -> String {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("tcp://127.0.0.1:{port}")
}

#[test]
fn text_requests_print_the_response() {
    let registry = HandlerRegistry::new().with(HandlerTag::Text, |request: Envelope| {
        Ok(Reply::text(request.as_text().unwrap_or_default().to_uppercase()))
    });
    let server = Server::new(
        registry,
        ServerSettings::new(SocketEndpoint::tcp("127.0.0.1", 0)),
    )
    .start()
    .expect("start server");

    let mut command = cargo_bin_cmd!("qna");
    command
        .arg("--endpoint")
        .arg(format!("tcp://{}", server.local_addr()))
        .args(["text", "hello"]);
    command.assert().success().stdout("HELLO\n");

    server.stop();
    server.join().expect("join server");
}

#[test]
fn unreachable_daemon_exits_with_failure() {
    let mut command = cargo_bin_cmd!("qna");
    command
        .arg("--endpoint")
        .arg(unused_endpoint())
        .args(["text", "hello"]);
    command
        .assert()
        .failure()
        .stderr(contains("failed to connect to daemon"));
}

#[test]
fn missing_subcommand_exits_with_failure() {
    let mut command = cargo_bin_cmd!("qna");
    command.assert().failure().stderr(contains("Usage"));
}
