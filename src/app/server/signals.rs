//! Signal handling for graceful shutdown
//!
//! The test server stops when the operator presses Ctrl+C or the process
//! receives SIGTERM. Either way the shutdown is graceful and not an error.

use tokio::signal;
use tracing::{info, warn};

/// Which signal ended the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// Ctrl+C / SIGINT
    Interrupt,
    /// SIGTERM
    Terminate,
}

/// Signal handlers installed ahead of time
///
/// On unix the handlers are registered when [`ShutdownListener::install`]
/// returns, so a signal that arrives before [`ShutdownListener::recv`] is
/// first polled is still delivered to it instead of killing the process.
#[derive(Debug)]
pub struct ShutdownListener {
    #[cfg(unix)]
    interrupt: Option<signal::unix::Signal>,
    #[cfg(unix)]
    terminate: Option<signal::unix::Signal>,
}

impl ShutdownListener {
    /// Register the Ctrl+C and SIGTERM handlers
    ///
    /// A handler that cannot be installed is logged and that signal is
    /// ignored; the other one can still stop the server.
    ///
    /// Must be called from within a tokio runtime.
    pub fn install() -> Self {
        #[cfg(unix)]
        let listener = {
            use signal::unix::{signal, SignalKind};

            let interrupt = signal(SignalKind::interrupt())
                .map_err(|e| warn!("Failed to install Ctrl+C handler: {}", e))
                .ok();
            let terminate = signal(SignalKind::terminate())
                .map_err(|e| warn!("Failed to install SIGTERM handler: {}", e))
                .ok();
            Self {
                interrupt,
                terminate,
            }
        };

        #[cfg(not(unix))]
        let listener = Self {};

        listener
    }

    /// Wait for the first of Ctrl+C or SIGTERM
    pub async fn recv(self) -> ShutdownSignal {
        #[cfg(unix)]
        let (interrupt, terminate) = {
            let Self {
                interrupt,
                terminate,
            } = self;
            (
                async move {
                    match interrupt {
                        Some(mut stream) => {
                            stream.recv().await;
                        }
                        None => std::future::pending::<()>().await,
                    }
                },
                async move {
                    match terminate {
                        Some(mut stream) => {
                            stream.recv().await;
                        }
                        None => std::future::pending::<()>().await,
                    }
                },
            )
        };

        #[cfg(not(unix))]
        let (interrupt, terminate) = {
            let _ = self;
            (
                async {
                    if let Err(e) = signal::ctrl_c().await {
                        warn!("Failed to install Ctrl+C handler: {}", e);
                        std::future::pending::<()>().await;
                    }
                },
                std::future::pending::<()>(),
            )
        };

        tokio::select! {
            _ = interrupt => {
                info!("Received Ctrl+C, initiating shutdown");
                ShutdownSignal::Interrupt
            },
            _ = terminate => {
                info!("Received terminate signal, initiating shutdown");
                ShutdownSignal::Terminate
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::timeout;

    // Signals are process-wide; tests that listen must not overlap
    static SIGNAL_TESTS: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn test_waits_without_signal() {
        let _guard = SIGNAL_TESTS.lock().unwrap_or_else(|e| e.into_inner());
        let result = timeout(Duration::from_millis(50), ShutdownListener::install().recv()).await;
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_before_recv_is_not_lost() {
        let _guard = SIGNAL_TESTS.lock().unwrap_or_else(|e| e.into_inner());
        let listener = ShutdownListener::install();

        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        let signal = timeout(Duration::from_secs(5), listener.recv())
            .await
            .expect("signal delivered to the installed listener");
        assert_eq!(signal, ShutdownSignal::Terminate);
    }
}
