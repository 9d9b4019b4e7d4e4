use serde::Deserialize;

/// HTTP server bind configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Graceful shutdown timeout in seconds.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
    /// Public origin used to build share links (e.g. `https://dropit.example`).
    ///
    /// If not set, defaults to `http://localhost:{port}`.
    pub public_url: Option<String>,
    /// Largest accepted upload request body, in MiB.
    #[serde(default = "default_max_upload_mib")]
    pub max_upload_mib: usize,
}

impl ServerConfig {
    /// Upload body limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mib.saturating_mul(1024 * 1024)
    }

    /// The origin share links are built from.
    pub fn public_origin(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
            public_url: None,
            max_upload_mib: default_max_upload_mib(),
        }
    }
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_mib() -> usize {
    100
}
