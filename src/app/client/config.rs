//! HTTP client configuration and building logic
//!
//! The archive client deliberately sets no request timeout: a stalled
//! transfer blocks until the connection fails or the process is stopped.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::constants::{github, http};
use crate::errors::{FetchError, FetchResult};

/// Configuration for the archive HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Archive host, `https://github.com` unless pointed at a mirror
    pub base_url: Url,
    /// User agent sent with the request
    pub user_agent: String,
    /// Optional connect timeout (None = wait indefinitely)
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(github::ARCHIVE_BASE_URL)
                .expect("archive base URL constant is valid"),
            user_agent: http::USER_AGENT.to_string(),
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Use a different archive host
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> FetchResult<Client> {
        let mut client_builder = Client::builder().user_agent(&self.user_agent);

        if let Some(connect_timeout) = self.connect_timeout {
            client_builder = client_builder.connect_timeout(connect_timeout);
        }

        client_builder.build().map_err(FetchError::Client)
    }
}
