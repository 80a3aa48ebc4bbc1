// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Port the dev server always listens on
pub const DEFAULT_PORT: u16 = 3002;

/// HTML file served in place of `/` and `/index.html`
pub const ENTRY_FILE: &str = "dev-server.html";

/// Main configuration structure
///
/// `server` is fixed at startup and never read from the settings file.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(skip)]
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub launch: LaunchConfig,
}

/// Listener and filesystem settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Canonical directory all served files must live under
    pub root: PathBuf,
    pub entry_file: String,
}

impl ServerConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            port: DEFAULT_PORT,
            root,
            entry_file: ENTRY_FILE.to_string(),
        }
    }

    /// Path the root requests are rewritten to, e.g. `/dev-server.html`
    pub fn entry_path(&self) -> String {
        format!("/{}", self.entry_file)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "common".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    #[serde(default)]
    pub workers: Option<usize>,
    /// `0` disables keep-alive, any other value enables it. hyper's http1
    /// server has no idle timeout, so an idle connection is closed by the
    /// overall `max(read_timeout, write_timeout)` limit.
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

impl PerformanceConfig {
    pub const fn keep_alive_enabled(&self) -> bool {
        self.keep_alive_timeout > 0
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    /// Files tried, in order, when a directory is requested
    pub index_files: Vec<String>,
}

/// Startup behaviour
#[derive(Debug, Deserialize, Clone)]
pub struct LaunchConfig {
    pub open_browser: bool,
    /// Backend API address shown in the startup banner
    pub api_url: String,
}
