//! Naimo Tools CLI application
//!
//! `fetch` downloads a GitHub branch archive; `serve` runs the static test
//! file server until interrupted.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use naimo_tools::cli::{handle_fetch, handle_serve, Cli, Commands};
use naimo_tools::config::AppConfig;
use naimo_tools::constants::exit;
use naimo_tools::errors::Result;

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error [{}]: {}", e.category(), e);
            exit::FAILURE
        }
    };

    process::exit(code);
}

/// Main application logic, returning the process exit code
async fn run() -> Result<i32> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli, &config);

    info!("Naimo Tools v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Fetch(args) => {
            info!("Executing fetch command");
            handle_fetch(args, &config).await?;
            Ok(exit::SUCCESS)
        }
        Commands::Serve(args) => {
            info!("Executing serve command");
            Ok(handle_serve(args, &config).await)
        }
    }
}

/// Initialize logging from CLI verbosity, falling back to the config file level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let level = cli
        .log_level()
        .map(|level| level.to_string().to_lowercase())
        .unwrap_or_else(|| config.logging.level.clone());

    let filter = EnvFilter::from_default_env().add_directive(
        format!("naimo_tools={}", level)
            .parse()
            .unwrap_or_else(|_| "naimo_tools=warn".parse().expect("static directive is valid")),
    );

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
