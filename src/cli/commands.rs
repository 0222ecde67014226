//! Command handlers for Naimo Tools
//!
//! These are the single boundary where component errors become operator
//! messages. The core `app` code returns typed errors and never prints.

use std::future::Future;

use tracing::{error, info};
use url::Url;

use crate::app::server::{ShutdownListener, ShutdownSignal};
use crate::app::{ArchiveClient, DownloadOutcome, DownloadRequest, ServerConfig, TestServer};
use crate::cli::{FetchArgs, ServeArgs};
use crate::config::AppConfig;
use crate::constants::{env, exit};
use crate::errors::{ConfigError, FetchError, Result, ServerError};

const BANNER_RULE: &str =
    "============================================================";

/// Handle the fetch command
///
/// Configuration problems are returned as errors. Once the download starts,
/// any failure is reported on the console and the command still succeeds.
pub async fn handle_fetch(args: FetchArgs, config: &AppConfig) -> Result<()> {
    let mut client_config = config.fetch.to_runtime_config()?;
    if let Some(base_url) = &args.base_url {
        client_config.base_url = Url::parse(base_url).map_err(|e| ConfigError::InvalidValue {
            field: "--base-url".to_string(),
            value: base_url.clone(),
            reason: e.to_string(),
        })?;
    }

    let client = ArchiveClient::new(client_config)?;
    let request = args.to_request(std::env::var(env::GITHUB_TOKEN).ok());

    fetch_archive(&client, request).await;
    Ok(())
}

/// Download one archive and report the outcome to the operator
///
/// Never fails: errors are printed and `None` is returned. A partially
/// written file from a broken transfer is left on disk.
pub async fn fetch_archive(
    client: &ArchiveClient,
    request: DownloadRequest,
) -> Option<DownloadOutcome> {
    println!("Downloading {} branch...", request.branch);

    match client.download(&request).await {
        Ok(outcome) => {
            info!(
                "Downloaded {} bytes to {}",
                outcome.bytes_written,
                outcome.path.display()
            );
            println!("Download complete, saved as: {}", outcome.path.display());
            Some(outcome)
        }
        Err(e) => {
            error!("Archive download failed: {}", e);
            println!("{}", fetch_error_message(&e));
            None
        }
    }
}

/// Operator-facing message for a failed download
pub fn fetch_error_message(error: &FetchError) -> String {
    match error {
        FetchError::HttpStatus { .. } => format!("HTTP error: {error}"),
        _ => format!("Error: {error}"),
    }
}

/// Handle the serve command, returning the process exit code
pub async fn handle_serve(args: ServeArgs, config: &AppConfig) -> i32 {
    match resolve_server_config(&args, config) {
        Ok(server_config) => run_server(server_config).await,
        Err(e) => {
            println!("\nError: {e}");
            exit::FAILURE
        }
    }
}

/// Merge CLI flags over the file/env server configuration
pub fn resolve_server_config(
    args: &ServeArgs,
    config: &AppConfig,
) -> std::result::Result<ServerConfig, ConfigError> {
    let mut server_config = config.server.to_runtime_config()?;
    if let Some(port) = args.port {
        server_config.port = port;
    }
    if let Some(root) = &args.root {
        server_config.root_directory = root.clone();
    }
    if let Some(bind) = args.bind {
        server_config.bind_address = bind;
    }
    Ok(server_config)
}

/// Run the test server until Ctrl+C or SIGTERM
///
/// The signal handlers are in place before the banner tells the operator
/// to press Ctrl+C.
pub async fn run_server(config: ServerConfig) -> i32 {
    let signals = ShutdownListener::install();
    run_server_until(config, signals.recv()).await
}

/// Run the test server until `shutdown` resolves
///
/// Returns 0 after a graceful shutdown and 1 if the server could not start
/// or failed while running.
pub async fn run_server_until<F>(config: ServerConfig, shutdown: F) -> i32
where
    F: Future<Output = ShutdownSignal> + Send + 'static,
{
    let server = match TestServer::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            println!("{}", server_error_message(&e));
            return exit::FAILURE;
        }
    };

    print_banner(&server);

    let result = server
        .serve_until(async move {
            let signal = shutdown.await;
            info!("Shutdown requested by {:?}", signal);
        })
        .await;

    match result {
        Ok(()) => {
            println!("\n\nServer stopped");
            exit::SUCCESS
        }
        Err(e) => {
            error!("Server failed: {}", e);
            println!("{}", server_error_message(&e));
            exit::FAILURE
        }
    }
}

/// Operator-facing message for a server failure
pub fn server_error_message(error: &ServerError) -> String {
    match error {
        ServerError::BindInUse { port } => format!(
            "\nError: port {port} is already in use\n\
             Try:\n   \
             1. Stop the program using the port\n   \
             2. Or choose another port with --port"
        ),
        _ => format!("\nError: {error}"),
    }
}

fn print_banner(server: &TestServer) {
    let url = server.display_url();
    println!("{BANNER_RULE}");
    println!("Naimo test server started");
    println!("Serving directory: {}", server.config().root_directory.display());
    println!("Address:");
    println!("   - Test page: {url}/test.html");
    println!("   - API test: {url}/plugins-test/api-test-plugin/index.html");
    println!("Press Ctrl+C to stop the server");
    println!("{BANNER_RULE}");
    println!();
}
