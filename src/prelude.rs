//! Prelude module for Naimo Tools Library
//!
//! Re-exports the types needed for typical usage with a single
//! `use naimo_tools::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use naimo_tools::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ArchiveClient::new(ClientConfig::default())?;
//!     let request = DownloadRequest::new("vuejs", "vue", "0.12-csp", "vue-0.12-csp.zip");
//!     client.download(&request).await?;
//!
//!     let server = TestServer::bind(ServerConfig::new(8000, "./site")).await?;
//!     server.serve_until(async { let _ = tokio::signal::ctrl_c().await; }).await?;
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, FetchError, Result, ServerError};

// Archive fetcher
pub use crate::app::{ArchiveClient, ClientConfig, DownloadOutcome, DownloadRequest};

// Test file server
pub use crate::app::{ServerConfig, ShutdownSignal, TestServer};

// Configuration
pub use crate::config::AppConfig;
