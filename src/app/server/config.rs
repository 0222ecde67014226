//! Test server configuration

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::server;
use crate::errors::{ServerError, ServerResult};

/// Where the test server listens and what it serves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listening port (0 picks a free port)
    pub port: u16,
    /// Directory served at `/`
    pub root_directory: PathBuf,
    /// Interface to bind
    pub bind_address: IpAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: server::DEFAULT_PORT,
            root_directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        }
    }
}

impl ServerConfig {
    /// Serve `root_directory` on `port` on all interfaces
    pub fn new(port: u16, root_directory: impl Into<PathBuf>) -> Self {
        Self {
            port,
            root_directory: root_directory.into(),
            ..Default::default()
        }
    }

    /// Restrict the listener to one interface
    pub fn with_bind_address(mut self, bind_address: IpAddr) -> Self {
        self.bind_address = bind_address;
        self
    }

    /// Address handed to the listener
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// The root must be an existing, readable directory
    pub fn validate(&self) -> ServerResult<()> {
        let not_accessible = || ServerError::RootNotAccessible {
            path: self.root_directory.clone(),
        };

        let metadata = std::fs::metadata(&self.root_directory).map_err(|_| not_accessible())?;
        if !metadata.is_dir() {
            return Err(not_accessible());
        }
        std::fs::read_dir(&self.root_directory).map_err(|_| not_accessible())?;

        Ok(())
    }

    /// Address to show the operator; unspecified binds are shown as localhost
    pub fn display_url(&self, port: u16) -> String {
        let host = if self.bind_address.is_unspecified() {
            "localhost".to_string()
        } else {
            match self.bind_address {
                IpAddr::V4(addr) => addr.to_string(),
                IpAddr::V6(addr) => format!("[{addr}]"),
            }
        };
        format!("http://{host}:{port}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert!(config.bind_address.is_unspecified());
        assert_eq!(config.socket_addr().port(), 8000);
    }

    #[test]
    fn test_validate_existing_directory() {
        let dir = tempdir().unwrap();
        assert!(ServerConfig::new(0, dir.path()).validate().is_ok());
    }

    #[test]
    fn test_validate_missing_directory() {
        let dir = tempdir().unwrap();
        let config = ServerConfig::new(0, dir.path().join("gone"));
        assert!(matches!(
            config.validate(),
            Err(ServerError::RootNotAccessible { .. })
        ));
    }

    #[test]
    fn test_validate_file_is_not_a_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("index.html");
        std::fs::write(&file, "<html></html>").unwrap();
        assert!(ServerConfig::new(0, file).validate().is_err());
    }

    #[test]
    fn test_display_url() {
        let config = ServerConfig::new(8000, ".");
        assert_eq!(config.display_url(8000), "http://localhost:8000");

        let config = config.with_bind_address(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.display_url(9001), "http://127.0.0.1:9001");
    }
}
