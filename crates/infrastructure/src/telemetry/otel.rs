//! Logging and OpenTelemetry trace export
//!
//! Console logging is always on. When enabled, spans are additionally
//! exported over OTLP/gRPC; an unreachable collector downgrades to console
//! logging unless `graceful_fallback` is off.

use std::time::Duration;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging and trace export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Export spans over OTLP
    #[serde(default)]
    pub enabled: bool,

    /// OTLP gRPC endpoint, e.g. `http://localhost:4317`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// `service.name` resource attribute
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Fraction of traces kept (0.0 - 1.0)
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,

    /// Exporter timeout in seconds
    #[serde(default = "default_export_timeout")]
    pub export_timeout_secs: u64,

    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit log lines as JSON objects instead of text
    #[serde(default)]
    pub json_logs: bool,

    /// Continue with console logging if the exporter cannot be built
    #[serde(default = "default_graceful_fallback")]
    pub graceful_fallback: bool,
}

fn default_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "walkwise".to_string()
}

const fn default_sampling_ratio() -> f64 {
    1.0
}

const fn default_export_timeout() -> u64 {
    10
}

fn default_log_filter() -> String {
    "info,tower_http=info,reqwest=warn".to_string()
}

const fn default_graceful_fallback() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
            export_timeout_secs: default_export_timeout(),
            log_filter: default_log_filter(),
            json_logs: false,
            graceful_fallback: default_graceful_fallback(),
        }
    }
}

impl TelemetryConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the sampling ratio is outside 0..=1 or export is
    /// enabled without an endpoint.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.sampling_ratio) {
            return Err("telemetry.sampling_ratio must be between 0.0 and 1.0".to_string());
        }
        if self.enabled && self.endpoint.trim().is_empty() {
            return Err("telemetry.endpoint must be set when telemetry is enabled".to_string());
        }
        Ok(())
    }

    fn sampler(&self) -> Sampler {
        if self.sampling_ratio >= 1.0 {
            Sampler::AlwaysOn
        } else if self.sampling_ratio <= 0.0 {
            Sampler::AlwaysOff
        } else {
            Sampler::TraceIdRatioBased(self.sampling_ratio)
        }
    }
}

/// Flushes and shuts down the tracer provider when dropped
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl std::fmt::Debug for TelemetryGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryGuard")
            .field("exporting", &self.is_exporting())
            .finish()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                tracing::error!(error = %e, "Failed to shut down tracer provider");
            }
        }
    }
}

/// Install the global subscriber
///
/// Keep the returned guard alive until shutdown so buffered spans are
/// flushed.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed, or if the
/// exporter cannot be built and `graceful_fallback` is off.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    if !config.enabled {
        init_console(config)?;
        info!("Telemetry initialized (console only)");
        return Ok(TelemetryGuard { provider: None });
    }

    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.endpoint)
        .with_timeout(Duration::from_secs(config.export_timeout_secs))
        .build()
    {
        Ok(exporter) => exporter,
        Err(e) if config.graceful_fallback => {
            init_console(config)?;
            warn!(
                endpoint = %config.endpoint,
                error = %e,
                "OTLP exporter unavailable, logging to console only"
            );
            return Ok(TelemetryGuard { provider: None });
        },
        Err(e) => return Err(TelemetryError::Exporter(e.to_string())),
    };

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_sampler(config.sampler())
        .with_resource(
            Resource::builder()
                .with_service_name(config.service_name.clone())
                .build(),
        )
        .build();
    let tracer = provider.tracer(config.service_name.clone());

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(config.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.json_logs).then(tracing_subscriber::fmt::layer))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(
        endpoint = %config.endpoint,
        service = %config.service_name,
        sampling = config.sampling_ratio,
        "Telemetry initialized with OTLP export"
    );

    Ok(TelemetryGuard {
        provider: Some(provider),
    })
}

fn env_filter(config: &TelemetryConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
}

fn init_console(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(config.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.json_logs).then(tracing_subscriber::fmt::layer))
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))
}

/// Telemetry initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// A global subscriber could not be installed
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// The OTLP exporter could not be built
    #[error("Failed to create OTLP exporter: {0}")]
    Exporter(String),
}
