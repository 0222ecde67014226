//! Static file server for manual browser testing
//!
//! Files under the configured root are served with the standard static
//! file semantics of [`ServeDir`]: `index.html` for directories, MIME type
//! from the extension and 404 for anything missing. On top of that every
//! response carries permissive CORS headers and disables caching, and every
//! request is logged to the console.
//!
//! Configuration is an explicit [`ServerConfig`], so several servers can run
//! side by side in one process.

pub mod config;
pub mod headers;
pub mod logging;
pub mod signals;

pub use config::ServerConfig;
pub use headers::{augmented_headers, with_augmented_headers};
pub use logging::{log_request, RequestLogLine};
pub use signals::{ShutdownListener, ShutdownSignal};

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{debug, info};

use crate::errors::{ServerError, ServerResult};

/// Build the request handling stack for `config`
pub fn build_router(config: &ServerConfig) -> Router {
    let files = ServeDir::new(&config.root_directory);
    let router = Router::new()
        .fallback_service(files)
        .layer(middleware::from_fn(log_request));
    with_augmented_headers(router)
}

/// A bound, not yet running, test server
#[derive(Debug)]
pub struct TestServer {
    config: ServerConfig,
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl TestServer {
    /// Validate the root directory and bind the listener
    ///
    /// # Errors
    ///
    /// - `ServerError::RootNotAccessible` if the root is not a readable directory
    /// - `ServerError::BindInUse` if another socket already holds the port
    /// - `ServerError::Startup` for any other bind failure
    pub async fn bind(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;

        let addr = config.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| bind_error(addr, e))?;
        let local_addr = listener.local_addr()?;

        debug!(
            "Bound {} serving {}",
            local_addr,
            config.root_directory.display()
        );

        Ok(Self {
            config,
            listener,
            local_addr,
        })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Configuration this server was bound with
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// URL to show the operator
    pub fn display_url(&self) -> String {
        self.config.display_url(self.local_addr.port())
    }

    /// Request handling stack for this server's configuration
    pub fn router(&self) -> Router {
        build_router(&self.config)
    }

    /// Serve requests until `shutdown` completes
    ///
    /// In-flight requests are allowed to finish; the listening socket is
    /// released when this returns.
    pub async fn serve_until<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        info!("Serving {} on {}", self.config.root_directory.display(), self.local_addr);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server on {} stopped", self.local_addr);
        Ok(())
    }
}

fn bind_error(addr: SocketAddr, error: io::Error) -> ServerError {
    if error.kind() == io::ErrorKind::AddrInUse {
        ServerError::BindInUse { port: addr.port() }
    } else {
        ServerError::Startup {
            addr: addr.to_string(),
            source: error,
        }
    }
}
