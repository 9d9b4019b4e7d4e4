use std::collections::HashMap;

use serde::Deserialize;

/// OTLP export protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtlpProtocol {
    #[default]
    Grpc,
    Http,
}

impl std::fmt::Display for OtlpProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Grpc => "grpc",
            Self::Http => "http",
        })
    }
}

/// Tracing export settings.
///
/// ```toml
/// [telemetry]
/// enabled = true
/// endpoint = "http://localhost:4317"
/// protocol = "grpc"
/// sample_ratio = 0.25
/// ```
#[derive(Debug, Deserialize)]
pub struct TelemetryConfig {
    /// Export spans over OTLP in addition to logging them.
    #[serde(default)]
    pub enabled: bool,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub protocol: OtlpProtocol,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Fraction of traces kept, from `0.0` to `1.0`.
    #[serde(default = "default_sample_ratio")]
    pub sample_ratio: f64,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Extra resource attributes attached to every span.
    #[serde(default)]
    pub resource_attributes: HashMap<String, String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_filter: default_log_filter(),
            endpoint: default_endpoint(),
            protocol: OtlpProtocol::default(),
            service_name: default_service_name(),
            sample_ratio: default_sample_ratio(),
            timeout_seconds: default_timeout(),
            resource_attributes: HashMap::new(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_owned()
}

fn default_endpoint() -> String {
    "http://localhost:4317".to_owned()
}

fn default_service_name() -> String {
    "dropit-server".to_owned()
}

fn default_sample_ratio() -> f64 {
    1.0
}

fn default_timeout() -> u64 {
    10
}
