//! Handler registries shared by the end-to-end tests.

use std::thread;
use std::time::Duration;

use qna_wire::Envelope;
use qnad::{HandlerRegistry, HandlerTag, Reply};

/// Text handler that upper-cases its input. No binary or wildcard handler.
#[must_use]
pub fn uppercase_text() -> HandlerRegistry {
    HandlerRegistry::new().with(HandlerTag::Text, |request: Envelope| {
        Ok(Reply::text(request.as_text().unwrap_or_default().to_uppercase()))
    })
}

/// Binary handler that returns its input reversed.
#[must_use]
pub fn reversing_binary() -> HandlerRegistry {
    HandlerRegistry::new().with(HandlerTag::Binary, |request: Envelope| {
        let mut bytes = request.as_bytes().unwrap_or_default().to_vec();
        bytes.reverse();
        Ok(Reply::binary(bytes))
    })
}

/// Wildcard handler that sleeps for `delay` and echoes the request.
#[must_use]
pub fn delayed_echo(delay: Duration) -> HandlerRegistry {
    HandlerRegistry::new().with(HandlerTag::Any, move |request: Envelope| {
        thread::sleep(delay);
        Ok(Reply::from(request))
    })
}

/// Text handler that fails for the input `fail` and echoes anything else.
#[must_use]
pub fn fails_on_request() -> HandlerRegistry {
    HandlerRegistry::new().with(HandlerTag::Text, |request: Envelope| {
        if request.as_text() == Some("fail") {
            return Err("requested failure".into());
        }
        Ok(Reply::from(request))
    })
}

/// Wildcard handler that never replies.
#[must_use]
pub fn silent() -> HandlerRegistry {
    HandlerRegistry::new().with(HandlerTag::Any, |_request: Envelope| Ok(Reply::none()))
}
