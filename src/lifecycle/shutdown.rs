//! Signal handling for graceful shutdown

use std::io;

use tracing::{debug, warn};

/// Handles shutdown signals (SIGTERM/SIGINT, or Ctrl-C/console close on Windows)
pub struct ShutdownSignal;

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        Self
    }

    /// Wait for a shutdown signal
    ///
    /// Falls back to plain Ctrl-C if the platform signals cannot be
    /// registered, and waits forever if even that fails.
    pub async fn wait(&self) {
        match platform_signals().await {
            Ok(()) => return,
            Err(e) => warn!(error = %e, "failed to register shutdown signals, using Ctrl-C only"),
        }

        match tokio::signal::ctrl_c().await {
            Ok(()) => debug!("received Ctrl-C"),
            Err(e) => {
                warn!(error = %e, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
async fn platform_signals() -> io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => {
            debug!("received SIGTERM");
        }
        _ = sigint.recv() => {
            debug!("received SIGINT");
        }
    }
    Ok(())
}

#[cfg(windows)]
async fn platform_signals() -> io::Result<()> {
    use tokio::signal::windows::{ctrl_c, ctrl_close, ctrl_shutdown};

    let mut ctrl_c = ctrl_c()?;
    let mut close = ctrl_close()?;
    let mut shutdown = ctrl_shutdown()?;

    tokio::select! {
        _ = ctrl_c.recv() => {
            debug!("received Ctrl-C");
        }
        _ = close.recv() => {
            debug!("received console close");
        }
        _ = shutdown.recv() => {
            debug!("received system shutdown");
        }
    }
    Ok(())
}
