//! Structured telemetry initialisation for the daemon.
//!
//! The subscriber is a [`Registry`] with one output layer, JSON or compact,
//! behind an [`EnvFilter`]. Each call to [`initialise`] also opens a `daemon`
//! span carrying the configured endpoint and receive ceilings; the launcher
//! enters it, and the listener hands it on to the accept and connection
//! threads, so every server event is tagged with the settings it ran under.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Span, info, info_span, subscriber::SetGlobalDefaultError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use qna_config::{Config, LogFormat};

const TELEMETRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::telemetry");

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

type OutputLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Handle returned when telemetry has been initialised.
#[derive(Debug, Clone)]
pub struct TelemetryHandle {
    span: Span,
}

impl TelemetryHandle {
    /// Span describing the daemon instance this handle was created for.
    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the global tracing subscriber on the first call.
///
/// Later calls leave the global subscriber alone, whatever configuration they
/// pass, but still return a handle whose span reflects `config`.
///
/// ```rust
/// use qna_config::Config;
/// use qnad::telemetry;
///
/// # fn main() -> Result<(), qnad::TelemetryError> {
/// let config = Config::default();
/// let first = telemetry::initialise(&config)?;
/// let second = telemetry::initialise(&config)?;
/// let _entered = first.span().enter();
/// drop(second);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error when the filter expression is invalid or another
/// subscriber was installed outside this function.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD.get_or_try_init(|| install_subscriber(config))?;
    let span = daemon_span(config);
    span.in_scope(|| {
        info!(
            target: TELEMETRY_TARGET,
            format = %config.log_format(),
            filter = config.log_filter(),
            "telemetry ready"
        );
    });
    Ok(TelemetryHandle { span })
}

fn daemon_span(config: &Config) -> Span {
    info_span!(
        target: TELEMETRY_TARGET,
        "daemon",
        endpoint = %config.endpoint(),
        max_request_bytes = config.max_request_bytes(),
        max_response_bytes = config.max_response_bytes(),
    )
}

fn output_layer(format: LogFormat) -> OutputLayer {
    let layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());
    match format {
        LogFormat::Json => layer
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

fn install_subscriber(config: &Config) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    let subscriber = Registry::default()
        .with(output_layer(config.log_format()))
        .with(filter);
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rstest::rstest;
    use tracing::Subscriber;
    use tracing::span::{Attributes, Id};
    use tracing_subscriber::layer::Context;

    use super::*;

    /// Records the field names of every span opened under it.
    #[derive(Clone, Default)]
    struct SpanFields(Arc<Mutex<Vec<String>>>);

    impl<S: Subscriber> Layer<S> for SpanFields {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            let mut names = self.0.lock().expect("span fields lock");
            names.extend(
                attrs
                    .metadata()
                    .fields()
                    .iter()
                    .map(|field| field.name().to_owned()),
            );
        }
    }

    #[rstest]
    fn rejects_invalid_filters() {
        let config = Config {
            log_filter: "qnad=notalevel".to_owned(),
            ..Config::default()
        };
        let error = install_subscriber(&config).expect_err("filter should be rejected");
        assert!(matches!(error, TelemetryError::Filter(_)));
    }

    #[rstest]
    fn daemon_span_carries_server_settings() {
        let fields = SpanFields::default();
        let subscriber = Registry::default().with(fields.clone());
        tracing::subscriber::with_default(subscriber, || {
            let span = daemon_span(&Config::default());
            assert!(!span.is_disabled());
        });

        let names = fields.0.lock().expect("span fields lock");
        for expected in ["endpoint", "max_request_bytes", "max_response_bytes"] {
            assert!(
                names.iter().any(|name| name == expected),
                "missing span field {expected}: {names:?}"
            );
        }
    }

    #[rstest]
    #[case(LogFormat::Json)]
    #[case(LogFormat::Compact)]
    fn output_layer_builds_for_every_format(#[case] format: LogFormat) {
        let subscriber = Registry::default().with(output_layer(format));
        tracing::subscriber::with_default(subscriber, || {
            info!(target: TELEMETRY_TARGET, "output layer smoke event");
        });
    }
}
