//! Application constants for Naimo Tools
//!
//! Constants are grouped by the component that uses them.

/// Environment variable names
pub mod env {
    /// GitHub token used when `--token` is not given
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";

    /// Overrides the test server port
    pub const SERVER_PORT: &str = "NAIMO_SERVER_PORT";

    /// Overrides the test server root directory
    pub const SERVER_ROOT: &str = "NAIMO_SERVER_ROOT";
}

/// GitHub archive endpoint
pub mod github {
    /// Base URL for branch archive downloads
    pub const ARCHIVE_BASE_URL: &str = "https://github.com";

    /// Path segments between `<owner>/<repository>` and the branch name
    pub const ARCHIVE_REFS_PATH: [&str; 3] = ["archive", "refs", "heads"];

    /// Archive file extension appended to the branch name
    pub const ARCHIVE_EXTENSION: &str = ".zip";

    /// Authorization scheme for personal access tokens
    pub const TOKEN_SCHEME: &str = "token";
}

/// HTTP client constants
pub mod http {
    /// Default user agent for archive requests
    pub const USER_AGENT: &str = concat!("Naimo-Tools/", env!("CARGO_PKG_VERSION"));
}

/// Download streaming
pub mod download {
    /// Size of each write issued to the output file
    pub const CHUNK_SIZE: usize = 8 * 1024;
}

/// Test file server defaults and response headers
pub mod server {
    /// Default listening port
    pub const DEFAULT_PORT: u16 = 8000;

    /// Default bind address (all interfaces)
    pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

    /// Added to every response
    pub const ALLOW_ORIGIN: &str = "*";

    /// Added to every response
    pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

    /// Added to every response
    pub const ALLOW_HEADERS: &str = "Content-Type";

    /// Added to every response
    pub const CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate";

    /// Timestamp format of request log lines
    pub const LOG_TIME_FORMAT: &str = "%d/%b/%Y %H:%M:%S";
}

/// Configuration file locations
pub mod config {
    /// Project-local config file name
    pub const LOCAL_FILE: &str = "naimo-tools.toml";

    /// Directory under the user config dir
    pub const APP_DIR: &str = "naimo-tools";

    /// File name inside the user config dir
    pub const FILE_NAME: &str = "config.toml";
}

/// Process exit codes
pub mod exit {
    /// Normal termination, including operator interrupt
    pub const SUCCESS: i32 = 0;

    /// Bind failure or any other startup error
    pub const FAILURE: i32 = 1;
}
