// Application state module
// Everything a connection task needs, shared read-only behind an Arc

use super::types::Config;
use crate::handler::DocsHandler;
use crate::logger::AccessLogFormat;

/// Application state
pub struct AppState {
    pub config: Config,
    pub docs: DocsHandler,

    // Derived once from config so requests do not re-parse it
    pub mount_path: String,
    pub access_log_format: AccessLogFormat,
}

impl AppState {
    pub fn new(config: Config, docs: DocsHandler) -> Self {
        let mount_path = config.mount_path();
        let access_log_format = AccessLogFormat::parse(&config.logging.access_log_format);
        Self {
            config,
            docs,
            mount_path,
            access_log_format,
        }
    }
}
