//! Log subscriber for the usersvc binary
//!
//! One subscriber is built per process: an EnvFilter, a compact stderr
//! formatter and, with the `telemetry` feature and `--otel`, an OTLP span
//! exporter. stdout is left to command output (`dump --json`).
//!
//!   RUST_LOG                      # filter, wins over --debug
//!   OTEL_EXPORTER_OTLP_ENDPOINT   # default http://localhost:4317
//!   OTEL_SERVICE_NAME             # default usersvc

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Flags from the command line that shape logging.
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub debug: bool,
    pub otel: bool,
}

impl TracingConfig {
    /// Filter used when RUST_LOG is unset.
    fn fallback_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.fallback_directive()))
    }
}

/// Where spans are exported and under which service name.
#[cfg(feature = "telemetry")]
#[derive(Debug, Clone, PartialEq, Eq)]
struct OtlpSettings {
    endpoint: String,
    service_name: String,
}

#[cfg(feature = "telemetry")]
impl OtlpSettings {
    fn resolve(endpoint: Option<String>, service_name: Option<String>) -> Self {
        Self {
            endpoint: endpoint.unwrap_or_else(|| "http://localhost:4317".to_owned()),
            service_name: service_name.unwrap_or_else(|| "usersvc".to_owned()),
        }
    }

    fn from_env() -> Self {
        Self::resolve(
            std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok(),
            std::env::var("OTEL_SERVICE_NAME").ok(),
        )
    }
}

#[cfg(feature = "telemetry")]
type OtlpLayer = tracing_opentelemetry::OpenTelemetryLayer<
    tracing_subscriber::Registry,
    opentelemetry_sdk::trace::Tracer,
>;

/// Build the OTLP layer and install its provider globally.
#[cfg(feature = "telemetry")]
fn otlp_layer(settings: &OtlpSettings) -> Result<OtlpLayer> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.endpoint)
        .build()
        .map_err(|e| anyhow!("OTLP exporter for {}: {e}", settings.endpoint))?;

    let provider = opentelemetry_sdk::trace::TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(opentelemetry_sdk::Resource::new(vec![KeyValue::new(
            "service.name",
            settings.service_name.clone(),
        )]))
        .build();

    let tracer = provider.tracer("usersvc");
    // Global provider keeps the batch exporter alive until shutdown_otel
    let _ = opentelemetry::global::set_tracer_provider(provider);

    Ok(tracing_opentelemetry::layer().with_tracer(tracer))
}

/// Install the process-wide subscriber.
pub fn init(config: &TracingConfig) -> Result<()> {
    #[cfg(feature = "telemetry")]
    let (otlp, settings) = if config.otel {
        let settings = OtlpSettings::from_env();
        (Some(otlp_layer(&settings)?), Some(settings))
    } else {
        (None, None)
    };
    #[cfg(not(feature = "telemetry"))]
    let otlp: Option<tracing_subscriber::layer::Identity> = None;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(otlp)
        .with(fmt_layer)
        .with(config.env_filter())
        .try_init()
        .map_err(|err| anyhow!(err))?;

    #[cfg(feature = "telemetry")]
    if let Some(settings) = settings {
        tracing::info!(
            endpoint = %settings.endpoint,
            service = %settings.service_name,
            "exporting spans over OTLP"
        );
    }
    #[cfg(not(feature = "telemetry"))]
    if config.otel {
        tracing::warn!("--otel ignored: built without the telemetry feature");
    }

    Ok(())
}

/// Flush pending spans before exit.
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_lowers_fallback_filter() {
        assert_eq!(TracingConfig::default().fallback_directive(), "info");
        let debug = TracingConfig {
            debug: true,
            otel: false,
        };
        assert_eq!(debug.fallback_directive(), "debug");
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn otlp_settings_fill_defaults() {
        let settings = OtlpSettings::resolve(None, Some("users-staging".into()));
        assert_eq!(settings.endpoint, "http://localhost:4317");
        assert_eq!(settings.service_name, "users-staging");
    }
}
