//! Tracing subscriber setup with optional OTLP span export.

use std::time::Duration;

use opentelemetry::trace::TracerProvider;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{BatchSpanProcessor, Sampler, SdkTracerProvider};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{OtlpProtocol, TelemetryConfig};

/// Keeps the tracer provider alive; call [`TelemetryGuard::shutdown`] to flush
/// pending spans before exit.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    pub fn shutdown(mut self) {
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            tracing::warn!(error = %e, "tracer provider shutdown failed");
        }
    }
}

/// Install the global subscriber: `fmt` always, OpenTelemetry when enabled.
///
/// An exporter that fails to build is logged and skipped; the server still
/// starts with plain logging.
pub fn init(config: &TelemetryConfig) -> TelemetryGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    if !config.enabled {
        registry.init();
        return TelemetryGuard { provider: None };
    }

    let exporter = match build_exporter(config) {
        Ok(exporter) => exporter,
        Err(e) => {
            registry.init();
            tracing::error!(
                error = %e,
                endpoint = %config.endpoint,
                protocol = %config.protocol,
                "failed to build OTLP exporter, span export disabled"
            );
            return TelemetryGuard { provider: None };
        }
    };

    let provider = SdkTracerProvider::builder()
        .with_span_processor(BatchSpanProcessor::builder(exporter).build())
        .with_sampler(sampler(config.sample_ratio))
        .with_resource(resource(config))
        .build();
    global::set_tracer_provider(provider.clone());

    let tracer = provider.tracer("dropit");
    registry
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .init();

    info!(
        endpoint = %config.endpoint,
        protocol = %config.protocol,
        sample_ratio = config.sample_ratio,
        "OpenTelemetry span export enabled"
    );

    TelemetryGuard {
        provider: Some(provider),
    }
}

fn sampler(ratio: f64) -> Sampler {
    if ratio >= 1.0 {
        Sampler::AlwaysOn
    } else if ratio <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(ratio)
    }
}

fn resource(config: &TelemetryConfig) -> Resource {
    let mut attributes = vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ];
    attributes.extend(
        config
            .resource_attributes
            .iter()
            .map(|(k, v)| KeyValue::new(k.clone(), v.clone())),
    );
    Resource::builder().with_attributes(attributes).build()
}

fn build_exporter(
    config: &TelemetryConfig,
) -> Result<opentelemetry_otlp::SpanExporter, opentelemetry::trace::TraceError> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    match config.protocol {
        OtlpProtocol::Http => opentelemetry_otlp::SpanExporter::builder()
            .with_http()
            .with_endpoint(&config.endpoint)
            .with_timeout(timeout)
            .build(),
        OtlpProtocol::Grpc => opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&config.endpoint)
            .with_timeout(timeout)
            .build(),
    }
}
