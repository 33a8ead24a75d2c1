//! Many simultaneous clients against one server.

use std::sync::Barrier;
use std::thread;
use std::time::Duration;

use qna_wire::Envelope;
use rstest::rstest;

use qna_e2e::{TestServer, fixtures};

const CLIENTS: usize = 64;

fn request_for(index: usize) -> Envelope {
    if index.is_multiple_of(2) {
        Envelope::text(format!("client-{index}"))
    } else {
        Envelope::binary(index.to_string().into_bytes())
    }
}

#[rstest]
fn every_client_receives_its_own_response() {
    let server =
        TestServer::start(fixtures::delayed_echo(Duration::from_millis(50))).expect("start server");
    let barrier = Barrier::new(CLIENTS);

    let responses: Vec<(usize, Envelope)> = thread::scope(|scope| {
        let workers: Vec<_> = (0..CLIENTS)
            .map(|index| {
                let server = &server;
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    let response = server.send(&request_for(index)).expect("send");
                    (index, response)
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().expect("client thread"))
            .collect()
    });

    assert_eq!(responses.len(), CLIENTS);
    for (index, response) in responses {
        assert_eq!(response, request_for(index), "client {index} got a foreign reply");
    }
}
