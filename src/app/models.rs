//! Data models for archive downloads
//!
//! A [`DownloadRequest`] names one branch of one repository and where its
//! ZIP archive should be written. It is built by the caller, consumed by a
//! single download and discarded afterwards.

use std::path::{Path, PathBuf};

use url::Url;

use crate::constants::github;
use crate::errors::{FetchError, FetchResult};

/// A single branch archive download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Repository owner (user or organisation)
    pub owner: String,
    /// Repository name
    pub repository: String,
    /// Branch to archive, may contain `/`
    pub branch: String,
    /// Destination file, truncated if it exists
    pub output_path: PathBuf,
    /// Personal access token for private repositories
    pub auth_token: Option<String>,
}

impl DownloadRequest {
    /// Create an unauthenticated request
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        branch: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            branch: branch.into(),
            output_path: output_path.into(),
            auth_token: None,
        }
    }

    /// Attach a token. Empty or whitespace-only tokens mean "no token".
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Default output file name: `<repository>-<branch>.zip`, with `/` in
    /// the branch replaced by `-`
    pub fn default_output_name(repository: &str, branch: &str) -> String {
        format!(
            "{}-{}{}",
            repository,
            branch.replace('/', "-"),
            github::ARCHIVE_EXTENSION
        )
    }

    /// Check that owner, repository and branch are usable
    pub fn validate(&self) -> FetchResult<()> {
        for (field, value) in [
            ("owner", &self.owner),
            ("repository", &self.repository),
            ("branch", &self.branch),
        ] {
            if value.trim().is_empty() {
                return Err(FetchError::InvalidRequest {
                    reason: format!("{field} must not be empty"),
                });
            }
        }

        for (field, value) in [("owner", &self.owner), ("repository", &self.repository)] {
            if value.contains('/') {
                return Err(FetchError::InvalidRequest {
                    reason: format!("{field} must not contain '/': {value}"),
                });
            }
        }

        if self.branch.split('/').any(str::is_empty) {
            return Err(FetchError::InvalidRequest {
                reason: format!("branch has an empty path segment: {}", self.branch),
            });
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(FetchError::InvalidRequest {
                reason: "output path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Build `<base>/<owner>/<repository>/archive/refs/heads/<branch>.zip`
    ///
    /// Each part is appended as its own path segment so reserved characters
    /// are percent-encoded. Slashes in the branch name become separate
    /// segments, matching how GitHub addresses nested branch names.
    pub fn archive_url(&self, base: &Url) -> FetchResult<Url> {
        self.validate()?;

        let mut url = base.clone();
        let archive_name = format!("{}{}", self.branch, github::ARCHIVE_EXTENSION);
        {
            let mut segments = url.path_segments_mut().map_err(|_| FetchError::InvalidUrl {
                url: base.to_string(),
                error: "URL cannot be a base".to_string(),
            })?;
            segments
                .pop_if_empty()
                .push(&self.owner)
                .push(&self.repository)
                .extend(github::ARCHIVE_REFS_PATH);
            segments.extend(archive_name.split('/'));
        }

        Ok(url)
    }

    /// Destination file
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

/// Result of a completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Where the archive was written
    pub path: PathBuf,
    /// Number of body bytes written
    pub bytes_written: u64,
}
