//! Startup error taxonomy
//!
//! Every variant is fatal: the process reports it and exits with status 1.
//! Errors after the accept loop starts are per-connection and only logged.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    /// Another process already holds the listening port
    #[error("port {port} is already in use")]
    AddressInUse {
        port: u16,
        #[source]
        source: io::Error,
    },

    /// Any other failure while creating, binding or listening on the socket
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to resolve server root directory: {0}")]
    Root(#[source] io::Error),

    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to open log files: {0}")]
    Logger(#[source] io::Error),

    #[error("failed to install signal handlers: {0}")]
    Signal(#[source] io::Error),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
}

impl StartupError {
    /// Classify a socket setup error for `addr`
    pub fn from_bind(addr: SocketAddr, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::AddrInUse => Self::AddressInUse {
                port: addr.port(),
                source,
            },
            _ => Self::Bind { addr, source },
        }
    }

    pub const fn exit_code(&self) -> u8 {
        1
    }
}
