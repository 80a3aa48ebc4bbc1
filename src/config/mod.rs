// Configuration module entry point
// Builds the immutable startup configuration and the shared application state

mod state;
mod types;

use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LaunchConfig, LoggingConfig, PerformanceConfig, ServerConfig,
    DEFAULT_PORT, ENTRY_FILE,
};

/// Optional settings file looked up in the root directory
pub const SETTINGS_FILE: &str = "dev-server.toml";

impl Config {
    /// Load configuration for `root`, reading `dev-server.toml` there if present
    pub fn load(root: &Path) -> Result<Self, config::ConfigError> {
        Self::load_from(root, &root.join(SETTINGS_FILE))
    }

    /// Load configuration from an explicit settings file path
    /// The file is optional; every key has a default
    pub fn load_from(root: &Path, settings_path: &Path) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(settings_path.to_path_buf()).required(false))
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "spa-dev-server")?
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .set_default("launch.open_browser", true)?
            .set_default("launch.api_url", "http://localhost:8082")?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        cfg.server = ServerConfig::new(root.to_path_buf());
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.performance.workers == Some(0) {
            return Err(config::ConfigError::Message(
                "performance.workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Listen on every IPv4 interface
    pub const fn get_socket_addr(&self) -> SocketAddr {
        SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.server.port)
    }

    /// Address announced in the banner and opened in the browser
    pub fn local_url(&self) -> String {
        format!("http://localhost:{}/", self.server.port)
    }
}

/// Directory containing the running executable, canonicalized
pub fn resolve_root() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("executable has no parent directory: {}", exe.display()),
        )
    })?;
    dir.canonicalize()
}
