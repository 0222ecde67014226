//! Command-line interface components
//!
//! Argument parsing and the command handlers that turn component results
//! into console output and exit codes.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, FetchArgs, GlobalArgs, ServeArgs};
pub use commands::{
    fetch_archive, fetch_error_message, handle_fetch, handle_serve, resolve_server_config,
    run_server, run_server_until, server_error_message,
};
