//! Streaming archive download
//!
//! The response status is checked before the output file is touched, so a
//! failed request never creates or truncates the destination. Once the body
//! starts flowing it is copied chunk by chunk; nothing is buffered beyond a
//! single network chunk and each write is at most [`download::CHUNK_SIZE`].
//!
//! A transfer that fails mid-stream leaves the partially written file in
//! place. There is no retry, resume or checksum step.

use std::path::Path;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::app::models::{DownloadOutcome, DownloadRequest};
use crate::constants::{download, github};
use crate::errors::{FetchError, FetchResult};

/// File download operations handler
pub struct DownloadHandler<'a> {
    client: &'a Client,
}

impl<'a> DownloadHandler<'a> {
    /// Creates a new DownloadHandler borrowing the given client
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Issue exactly one GET for `url` and stream the body to the request's
    /// output path
    ///
    /// # Errors
    ///
    /// - `FetchError::Transport` if the connection fails or the body stream breaks
    /// - `FetchError::HttpStatus` if the server answers with a non-success status
    /// - `FetchError::Io` if the output file cannot be created or written
    pub async fn download(
        &self,
        url: &Url,
        request: &DownloadRequest,
    ) -> FetchResult<DownloadOutcome> {
        let response = self.send(url, request.auth_token.as_deref()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: url.to_string(),
            });
        }

        let bytes_written = self
            .stream_to_file(response, url, request.output_path())
            .await?;

        tracing::debug!(
            "Wrote {} bytes to {}",
            bytes_written,
            request.output_path().display()
        );

        Ok(DownloadOutcome {
            path: request.output_path.clone(),
            bytes_written,
        })
    }

    async fn send(&self, url: &Url, token: Option<&str>) -> FetchResult<Response> {
        let mut builder = self.client.get(url.as_str());
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("{} {}", github::TOKEN_SCHEME, token));
        }

        tracing::debug!(
            "GET {} ({})",
            url,
            if token.is_some() {
                "authenticated"
            } else {
                "anonymous"
            }
        );

        builder.send().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }

    /// Copy the body into `destination`, truncating any existing file
    async fn stream_to_file(
        &self,
        mut response: Response,
        url: &Url,
        destination: &Path,
    ) -> FetchResult<u64> {
        let io_error = |source: std::io::Error| FetchError::Io {
            path: destination.to_path_buf(),
            source,
        };

        let mut file = File::create(destination).await.map_err(io_error)?;
        let mut written: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?
        {
            for piece in chunk.chunks(download::CHUNK_SIZE) {
                file.write_all(piece).await.map_err(io_error)?;
                written += piece.len() as u64;
            }
        }

        file.flush().await.map_err(io_error)?;
        Ok(written)
    }
}
