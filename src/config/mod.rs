// Configuration module entry point
// Layers the config file and VIEWER_* environment variables over defaults

mod state;
mod types;

use crate::error::StartupError;
use std::net::SocketAddr;

pub use state::AppState;
pub use types::{
    Config, DocsConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

/// Config file looked up when none is given (any extension `config` understands)
pub const DEFAULT_CONFIG_NAME: &str = "openapi-viewer";

impl Config {
    /// Load configuration, taking the file path from the first CLI argument
    pub fn load() -> Result<Self, StartupError> {
        let path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_CONFIG_NAME.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (extension optional)
    pub fn load_from(config_path: &str) -> Result<Self, StartupError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("VIEWER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.base_path", "/docs")?
            .set_default("docs.spec_file", "openapi.json")?
            .set_default("docs.live_reload", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.request_timeout", 30)?
            .set_default("http.enable_cors", false)?
            .set_default("http.cache_max_age", 3600)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| StartupError::Address { addr, source })
    }

    /// Mount prefix with a leading slash and no trailing slash; empty at the root
    pub fn mount_path(&self) -> String {
        let trimmed = self.server.base_path.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("/nonexistent/openapi-viewer-test").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.mount_path(), "/docs");
        assert_eq!(cfg.docs.spec_file, "openapi.json");
        assert!(cfg.docs.assets_dir.is_none());
        assert_eq!(cfg.http.cache_max_age, 3600);
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9090
base_path = "/"

[docs]
spec_file = "api/v1.json"
assets_dir = "ui-dev"
live_reload = true

[logging]
access_log_format = "json"
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.mount_path(), "");
        assert_eq!(cfg.docs.spec_file, "api/v1.json");
        assert_eq!(cfg.docs.assets_dir.as_deref(), Some("ui-dev"));
        assert!(cfg.docs.live_reload);
        assert_eq!(cfg.logging.access_log_format, "json");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_invalid_address() {
        let mut cfg = Config::load_from("/nonexistent/openapi-viewer-test").unwrap();
        cfg.server.host = "not an address".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(StartupError::Address { .. })
        ));
    }
}
