//! Core application logic for Naimo Tools
//!
//! - [`client`]: GitHub branch archive fetcher
//! - [`server`]: static test file server with CORS and no-cache headers
//!
//! The two components share nothing but the error and config conventions.

pub mod client;
pub mod models;
pub mod server;

// Re-export main public API
pub use client::{ArchiveClient, ClientConfig, DownloadHandler};
pub use models::{DownloadOutcome, DownloadRequest};
pub use server::{build_router, ServerConfig, ShutdownSignal, TestServer};
