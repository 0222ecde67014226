//! HTTP client for GitHub branch archives
//!
//! [`ArchiveClient`] turns a [`DownloadRequest`] into a single GET against
//! the archive endpoint and streams the ZIP body to disk.
//!
//! # Examples
//!
//! ```rust,no_run
//! use naimo_tools::app::{ArchiveClient, ClientConfig, DownloadRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArchiveClient::new(ClientConfig::default())?;
//! let request = DownloadRequest::new("vuejs", "vue", "0.12-csp", "vue-0.12-csp.zip");
//! let outcome = client.download(&request).await?;
//! println!("{} bytes", outcome.bytes_written);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod download;

pub use config::ClientConfig;
pub use download::DownloadHandler;

use reqwest::Client;
use url::Url;

use crate::app::models::{DownloadOutcome, DownloadRequest};
use crate::errors::FetchResult;

/// Client for the code-hosting archive endpoint
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    client: Client,
    base_url: Url,
}

impl ArchiveClient {
    /// Build a client from configuration
    pub fn new(config: ClientConfig) -> FetchResult<Self> {
        let client = config.build_http_client()?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// URL the request would be fetched from
    pub fn archive_url(&self, request: &DownloadRequest) -> FetchResult<Url> {
        request.archive_url(&self.base_url)
    }

    /// Download the branch archive described by `request`
    pub async fn download(&self, request: &DownloadRequest) -> FetchResult<DownloadOutcome> {
        let url = self.archive_url(request)?;
        DownloadHandler::new(&self.client)
            .download(&url, request)
            .await
    }
}
