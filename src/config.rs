//! Configuration management for Naimo Tools
//!
//! Settings come from, in increasing precedence: built-in defaults, a TOML
//! config file, environment variables, and CLI flags (applied by the CLI
//! layer). A missing default config file is not an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::app::{ClientConfig, ServerConfig};
use crate::constants::{config as config_paths, env, github, http, server};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Archive fetcher settings
    pub fetch: FetchConfigToml,
    /// Test server settings
    pub server: ServerConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly archive fetcher configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FetchConfigToml {
    /// Archive host
    pub base_url: String,
    /// User agent header
    pub user_agent: String,
    /// Connect timeout in seconds (None = no timeout)
    pub connect_timeout_secs: Option<u64>,
}

impl Default for FetchConfigToml {
    fn default() -> Self {
        Self {
            base_url: github::ARCHIVE_BASE_URL.to_string(),
            user_agent: http::USER_AGENT.to_string(),
            connect_timeout_secs: None,
        }
    }
}

impl FetchConfigToml {
    /// Convert to the runtime client configuration
    pub fn to_runtime_config(&self) -> ConfigResult<ClientConfig> {
        let base_url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "fetch.base_url".to_string(),
            value: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(ClientConfig {
            base_url,
            user_agent: self.user_agent.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        })
    }
}

/// TOML-friendly test server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfigToml {
    /// Listening port
    pub port: u16,
    /// Directory to serve (None = current directory)
    pub root: Option<PathBuf>,
    /// Interface to bind
    pub bind_address: String,
}

impl Default for ServerConfigToml {
    fn default() -> Self {
        Self {
            port: server::DEFAULT_PORT,
            root: None,
            bind_address: server::DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl ServerConfigToml {
    /// Convert to the runtime server configuration
    pub fn to_runtime_config(&self) -> ConfigResult<ServerConfig> {
        let bind_address = self
            .bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: "server.bind_address".to_string(),
                value: self.bind_address.clone(),
                reason: "Expected an IPv4 or IPv6 address".to_string(),
            })?;

        let mut config = ServerConfig {
            port: self.port,
            bind_address,
            ..Default::default()
        };
        if let Some(root) = &self.root {
            config.root_directory = root.clone();
        }
        Ok(config)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no CLI verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the explicit file or the first default location
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Self::load_from_file(&path).await?
            }
            None => match Self::find_config_file() {
                Some(path) => Self::load_from_file(&path).await?,
                None => {
                    debug!("No config file found in standard locations");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `NAIMO_SERVER_PORT` / `NAIMO_SERVER_ROOT` from `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(env::SERVER_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: env::SERVER_PORT.to_string(),
                value: port.clone(),
                reason: "Expected a port number between 0 and 65535".to_string(),
            })?;
        }

        if let Some(root) = lookup(env::SERVER_ROOT).filter(|r| !r.is_empty()) {
            self.server.root = Some(PathBuf::from(root));
        }

        Ok(())
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(format!("./{}", config_paths::LOCAL_FILE))];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        search_paths.into_iter().find(|path| {
            let found = path.exists();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    /// Default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(config_paths::APP_DIR).join(config_paths::FILE_NAME))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }
}
