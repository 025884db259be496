use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::BitopoError;

/// Configuration for the telemetry subsystem.
#[derive(Debug)]
pub struct TelemetryConfig {
    service_name: String,
    log_level: String,
    with_target: bool,
}

impl TelemetryConfig {
    /// Creates a new configuration builder with default settings.
    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::default()
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Installs a global fmt subscriber. `RUST_LOG` takes precedence over
    /// the configured level.
    pub fn init(self) -> Result<(), BitopoError> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .map_err(|e| BitopoError::Telemetry(Box::new(e)))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(self.with_target))
            .try_init()
            .map_err(|e| BitopoError::Telemetry(Box::new(e)))?;

        info!(service = %self.service_name, "Telemetry initialized");
        Ok(())
    }
}

/// Builder for `TelemetryConfig`.
#[derive(Default)]
pub struct TelemetryConfigBuilder {
    service_name: Option<String>,
    log_level: Option<String>,
    with_target: Option<bool>,
}

impl TelemetryConfigBuilder {
    /// Sets the service name (default: "bitopo-unknown").
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Sets the log level or filter directive (default: "info").
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Prints the event target on each line (default: true).
    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = Some(with_target);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> TelemetryConfig {
        TelemetryConfig {
            service_name: self
                .service_name
                .unwrap_or_else(|| "bitopo-unknown".to_string()),
            log_level: self.log_level.unwrap_or_else(|| "info".to_string()),
            with_target: self.with_target.unwrap_or(true),
        }
    }
}

/// Initializes the telemetry subsystem with default settings.
pub fn init_tracing(service_name: &str) -> Result<(), BitopoError> {
    TelemetryConfig::builder()
        .service_name(service_name)
        .build()
        .init()
}
