//! Error types for Naimo Tools
//!
//! Each component has its own error enum so the core logic can return
//! precise failure kinds. The CLI layer converts them into operator-facing
//! messages at a single boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Archive download errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// A required request field is missing or malformed
    #[error("Invalid download request: {reason}")]
    InvalidRequest { reason: String },

    /// The archive URL could not be built
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// The archive endpoint answered with a non-success status
    #[error("{status} {reason} for url: {url}")]
    HttpStatus {
        status: u16,
        reason: String,
        url: String,
    },

    /// Connection-level failure (DNS, refused, reset, broken body stream)
    #[error("Transport error while fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Writing the archive to disk failed
    #[error("File I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Whether the remote end answered with a failure status
    pub fn is_http_status(&self) -> bool {
        matches!(self, FetchError::HttpStatus { .. })
    }

    /// Whether the failure happened below HTTP (DNS, connect, reset)
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}

/// Test file server startup errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Another process already listens on the port
    #[error("Port {port} is already in use")]
    BindInUse { port: u16 },

    /// The directory to serve is missing or not a directory
    #[error("Directory not accessible: {path}")]
    RootNotAccessible { path: PathBuf },

    /// Any other bind or setup failure
    #[error("Failed to start server on {addr}: {source}")]
    Startup {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while the server was running
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Archive download error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Server error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch",
            AppError::Server(_) => "server",
            AppError::Config(_) => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Server result type alias
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Config result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message_carries_code_and_reason() {
        let err = FetchError::HttpStatus {
            status: 404,
            reason: "Not Found".to_string(),
            url: "https://github.com/a/b/archive/refs/heads/main.zip".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("404 Not Found"));
        assert!(msg.contains("refs/heads/main.zip"));
        assert!(err.is_http_status());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_bind_in_use_message() {
        let err = ServerError::BindInUse { port: 8000 };
        assert_eq!(err.to_string(), "Port 8000 is already in use");
    }

    #[test]
    fn test_app_error_categories() {
        let err: AppError = ServerError::BindInUse { port: 1 }.into();
        assert_eq!(err.category(), "server");

        let err: AppError = FetchError::InvalidRequest {
            reason: "empty owner".to_string(),
        }
        .into();
        assert_eq!(err.category(), "fetch");

        let err: AppError = ConfigError::NotFound {
            path: "missing.toml".into(),
        }
        .into();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_server_io_message_keeps_source() {
        let err = ServerError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionAborted,
            "accept loop failed",
        ));
        assert_eq!(err.to_string(), "Server I/O error: accept loop failed");
    }
}
