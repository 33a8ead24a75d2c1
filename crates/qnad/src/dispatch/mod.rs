//! Request dispatch for accepted connections.
//!
//! Each connection carries one request frame. The dispatcher decodes it,
//! resolves a handler by content type, invokes the handler, and writes back at
//! most one response frame:
//!
//! | Outcome                 | Response                                          |
//! |-------------------------|---------------------------------------------------|
//! | handler replied         | the handler's envelope                            |
//! | handler sent no reply   | none                                              |
//! | no handler for the type | `No handler registered for this content type`     |
//! | any other failure       | `Error processing request: <error>`               |
//!
//! Error responses are always text envelopes.

mod errors;
mod handler;
mod response;

pub use self::errors::DispatchError;
pub(crate) use self::handler::DispatchConnectionHandler;

pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
