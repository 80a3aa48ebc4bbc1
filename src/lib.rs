//! Local development server for a single-page web client
//!
//! Serves the directory holding the executable on port 3002, answers `/` with
//! `dev-server.html` and adds permissive CORS headers to every response.

pub mod browser;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
