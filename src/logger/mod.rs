//! Logger module
//!
//! Provides logging utilities for the dev server including:
//! - Startup banner and shutdown logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::{version_label, AccessLogEntry};

use crate::config::Config;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(url: &str, root: &Path, config: &Config) {
    write_info("======================================");
    write_info("Dev server started");
    write_info(&format!("Local:     {url}"));
    write_info(&format!("Serving:   {}", root.display()));
    write_info(&format!("Entry:     {}", config.server.entry_file));
    write_info(&format!("API:       {}", config.launch.api_url));
    if let Some(workers) = config.performance.workers {
        write_info(&format!("Workers:   {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("Press Ctrl+C to stop");
    write_info("======================================\n");
}

pub fn log_browser_opened(url: &str) {
    write_info(&format!("[Browser] Opened {url}"));
}

pub fn log_browser_fallback(url: &str, err: &std::io::Error) {
    log_warning(&format!("Could not open a browser ({err})"));
    write_info(&format!("Open {url} manually"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_shutdown_requested(signal: &str) {
    write_info(&format!("\n[Shutdown] Received {signal}, stopping server"));
}

pub fn log_shutdown() {
    write_info("Server stopped");
}

pub fn log_port_in_use(port: u16) {
    log_error(&format!("Port {port} is already in use"));
    write_error(&format!(
        "        Stop the other process listening on port {port} and try again"
    ));
}

pub fn log_startup_failed(err: &crate::error::StartupError) {
    log_error(&format!("Failed to start server: {err}"));
}
