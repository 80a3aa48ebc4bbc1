// Server module entry point
// Listener setup, accept loop, connection serving and process lifecycle

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::Arc;

use crate::browser;
use crate::config::{AppState, Config};
use crate::error::StartupError;
use crate::logger;

// Re-export common entry points
pub use listener::create_listener;
pub use server_loop::serve;
pub use signal::{start_signal_handler, SignalHandler};

/// Bind, announce, open the browser and serve until interrupted
///
/// Returns `Ok(())` once an interrupt has stopped the accept loop.
///
/// # Errors
///
/// Any failure before the accept loop starts, most notably
/// [`StartupError::AddressInUse`].
pub async fn run(config: Config) -> Result<(), StartupError> {
    let addr = config.get_socket_addr();
    let listener = create_listener(addr)?;

    let signals = SignalHandler::new();
    start_signal_handler(&signals).map_err(StartupError::Signal)?;

    let url = config.local_url();
    logger::log_server_start(&url, &config.server.root, &config);

    if config.launch.open_browser {
        browser::open_browser(&url);
    }

    let state = Arc::new(AppState::new(config));
    serve(listener, state, Arc::clone(&signals.shutdown)).await;

    logger::log_shutdown();
    Ok(())
}
