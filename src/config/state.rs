// Application state module
// Read-only state shared by the accept loop and every connection task

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Target of the root rewrite, e.g. `/dev-server.html`
    pub entry_path: String,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let entry_path = config.server.entry_path();
        Self { config, entry_path }
    }
}
