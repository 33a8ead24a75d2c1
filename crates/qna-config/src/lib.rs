//! Shared configuration for the qna client and daemon.
//!
//! Both binaries load the same [`Config`] through `ortho_config`, which layers
//! built-in defaults, `.qna.toml` files (or the file named by
//! `--config-path` / `QNA_CONFIG_PATH`), `QNA_*` environment variables, and
//! command-line flags, in increasing order of precedence.

mod defaults;
mod logging;
mod socket;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_REQUEST_BYTES, DEFAULT_MAX_RESPONSE_BYTES, DEFAULT_TCP_PORT,
    default_log_filter, default_log_filter_string, default_log_format, default_socket_endpoint,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use socket::{SocketEndpoint, SocketParseError};

/// Resolved configuration shared by `qna` and `qnad`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "QNA")]
pub struct Config {
    /// Address the daemon binds to and the client connects to.
    #[ortho_config(default = default_socket_endpoint())]
    pub endpoint: SocketEndpoint,
    /// Ceiling for the single receive the daemon performs per connection.
    #[ortho_config(default = DEFAULT_MAX_REQUEST_BYTES)]
    pub max_request_bytes: usize,
    /// Ceiling for the single receive the client performs per request.
    #[ortho_config(default = DEFAULT_MAX_RESPONSE_BYTES)]
    pub max_response_bytes: usize,
    /// `tracing` filter expression applied to daemon telemetry.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for daemon telemetry.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_socket_endpoint(),
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Endpoint shared by the daemon listener and the client.
    #[must_use]
    pub const fn endpoint(&self) -> &SocketEndpoint {
        &self.endpoint
    }

    /// Receive ceiling applied by the daemon to each request.
    #[must_use]
    pub const fn max_request_bytes(&self) -> usize {
        self.max_request_bytes
    }

    /// Receive ceiling applied by the client to each response.
    #[must_use]
    pub const fn max_response_bytes(&self) -> usize {
        self.max_response_bytes
    }

    /// Filter expression for the telemetry subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Output format for the telemetry subscriber.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
