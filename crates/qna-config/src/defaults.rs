use crate::socket::SocketEndpoint;

/// Default TCP port for the daemon.
pub const DEFAULT_TCP_PORT: u16 = 9779;

/// Default host for the daemon.
const DEFAULT_HOST: &str = "127.0.0.1";

/// Default receive ceiling for requests, in bytes.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 4096;

/// Default receive ceiling for responses, in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 4096;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Computes the default endpoint for the daemon.
#[must_use]
pub fn default_socket_endpoint() -> SocketEndpoint {
    SocketEndpoint::tcp(DEFAULT_HOST, DEFAULT_TCP_PORT)
}
