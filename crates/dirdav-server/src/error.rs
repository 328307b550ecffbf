use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or starting the server.
///
/// Request-level failures (401, 403, 500) are answered as responses and
/// never surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// No root directory was configured.
    #[error("-dir is required")]
    MissingRoot,

    /// The listen port was set to an empty value.
    #[error("-port is required")]
    MissingPort,

    /// The configured root does not exist or is not a directory.
    #[error("root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Error reading the TOML configuration file.
    #[error("config file parsing error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    /// Certificate or key could not be loaded.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The listen address could not be bound.
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// A required command line value is missing. The binary prints its usage
    /// and exits successfully for these.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::MissingRoot | Error::MissingPort)
    }
}

/// Result type for dirdav-server operations.
pub type Result<T> = std::result::Result<T, Error>;
