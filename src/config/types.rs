// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub docs: DocsConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads (CPU cores when unset)
    #[serde(default)]
    pub workers: Option<usize>,
    /// Mount prefix stripped before requests reach the documentation handler
    pub base_path: String,
}

/// Documentation sources
#[derive(Debug, Deserialize, Clone)]
pub struct DocsConfig {
    /// Specification document served at `<base_path>/spec`
    pub spec_file: String,
    /// Serve this directory instead of the bundled UI
    #[serde(default)]
    pub assets_dir: Option<String>,
    /// With `assets_dir`: read files on every request instead of once at startup
    #[serde(default)]
    pub live_reload: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
}

/// Connection handling
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Upper bound for a whole connection, in seconds
    pub request_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
}

/// HTTP behavior
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
    /// `max-age` for UI assets, in seconds; 0 sends `no-cache`
    pub cache_max_age: u32,
}
