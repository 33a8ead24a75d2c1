use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// TCP endpoint the daemon binds to and the client connects to.
///
/// Endpoints are written as `tcp://host:port` URLs or as bare `host:port`
/// pairs in every configuration layer. Port `0` asks the operating system for
/// an ephemeral port when binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct SocketEndpoint {
    host: String,
    port: u16,
}

impl SocketEndpoint {
    /// Builds a TCP endpoint.
    #[must_use]
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host name or IP literal, without IPv6 brackets.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// TCP port; `0` requests an ephemeral port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    fn parse_url(input: &str) -> Result<Self, SocketParseError> {
        let url = Url::parse(input)?;
        if url.scheme() != "tcp" {
            return Err(SocketParseError::UnsupportedScheme(url.scheme().to_owned()));
        }
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| SocketParseError::MissingHost(input.to_owned()))?;
        let port = url
            .port()
            .ok_or_else(|| SocketParseError::MissingPort(input.to_owned()))?;
        Ok(Self::tcp(strip_brackets(host), port))
    }

    fn parse_pair(input: &str) -> Result<Self, SocketParseError> {
        let (host, port) = input
            .rsplit_once(':')
            .ok_or_else(|| SocketParseError::MissingPort(input.to_owned()))?;
        let host = strip_brackets(host);
        if host.is_empty() {
            return Err(SocketParseError::MissingHost(input.to_owned()));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| SocketParseError::InvalidPort(input.to_owned()))?;
        Ok(Self::tcp(host, port))
    }
}

fn strip_brackets(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(host)
}

impl fmt::Display for SocketEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(formatter, "tcp://[{}]:{}", self.host, self.port)
        } else {
            write!(formatter, "tcp://{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for SocketEndpoint {
    type Err = SocketParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.contains("://") {
            Self::parse_url(trimmed)
        } else {
            Self::parse_pair(trimmed)
        }
    }
}

impl TryFrom<String> for SocketEndpoint {
    type Error = SocketParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SocketEndpoint> for String {
    fn from(endpoint: SocketEndpoint) -> Self {
        endpoint.to_string()
    }
}

/// Errors encountered while parsing a [`SocketEndpoint`] from text.
#[derive(Debug, Error)]
pub enum SocketParseError {
    /// Scheme was not recognised.
    #[error("unsupported socket scheme '{0}'")]
    UnsupportedScheme(String),
    /// TCP host name was missing.
    #[error("missing TCP host in '{0}'")]
    MissingHost(String),
    /// TCP port was missing from the address.
    #[error("missing TCP port in '{0}'")]
    MissingPort(String),
    /// TCP port was not a number in `0..=65535`.
    #[error("invalid TCP port in '{0}'")]
    InvalidPort(String),
    /// URL failed to parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn display_tcp_socket() {
        let endpoint = SocketEndpoint::tcp("127.0.0.1", 9779);
        assert_eq!(endpoint.to_string(), "tcp://127.0.0.1:9779");
    }

    #[test]
    fn display_brackets_ipv6_hosts() {
        let endpoint = SocketEndpoint::tcp("::1", 80);
        assert_eq!(endpoint.to_string(), "tcp://[::1]:80");
    }

    #[rstest]
    #[case("tcp://127.0.0.1:9000", "127.0.0.1", 9000)]
    #[case("tcp://localhost:0", "localhost", 0)]
    #[case("127.0.0.1:9000", "127.0.0.1", 9000)]
    #[case("[::1]:4000", "::1", 4000)]
    #[case("tcp://[::1]:4000", "::1", 4000)]
    fn parses_endpoints(#[case] input: &str, #[case] host: &str, #[case] port: u16) {
        let endpoint: SocketEndpoint = input.parse().expect("valid endpoint");
        assert_eq!(endpoint.host(), host);
        assert_eq!(endpoint.port(), port);
    }

    #[rstest]
    #[case("unix:///tmp/qna.sock")]
    #[case("tcp://127.0.0.1")]
    #[case("127.0.0.1")]
    #[case(":9000")]
    #[case("127.0.0.1:http")]
    fn rejects_invalid_endpoints(#[case] input: &str) {
        assert!(input.parse::<SocketEndpoint>().is_err(), "{input} should fail");
    }

    #[test]
    fn display_output_parses_back() {
        let endpoint = SocketEndpoint::tcp("::1", 8080);
        let parsed: SocketEndpoint = endpoint.to_string().parse().expect("reparse");
        assert_eq!(parsed, endpoint);
    }
}
