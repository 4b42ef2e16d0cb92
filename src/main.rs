//! alt-lang-switch: cycle the keyboard input language with a single Alt tap
//!
//! Runs in the background and provides:
//! - A global low-level keyboard hook
//! - Detection of a clean modifier tap (press and release, nothing else)
//! - A forward input-language change request to the foreground window
//! - A polled status label for the active language
//!
//! Alt used as part of a chord (Alt+Tab, Alt+F4, ...) never switches.

mod config;
mod gesture;
mod hotkey;
mod language;
mod lifecycle;
mod status;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::hotkey::KeyboardHook;
use crate::lifecycle::ShutdownSignal;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "alt-lang-switch starting"
    );

    // Load configuration
    let config = Config::load();
    info!(modifier = %config.modifier, "configuration loaded");

    let shutdown = ShutdownSignal::new();

    // Without the hook there is nothing to do, so this is fatal
    let hook = KeyboardHook::new(config.modifier);
    if let Err(e) = hook.start() {
        error!(error = %e, "failed to start keyboard hook");
        return Err(e.into());
    }

    info!("monitoring keyboard, entering main loop");

    tokio::select! {
        _ = run_status() => {
            info!("status monitor exited");
        }
        _ = shutdown.wait() => {
            info!("shutdown signal received");
        }
    }

    // The hook must be removed before the process exits
    info!("shutting down...");
    hook.stop();

    info!("alt-lang-switch stopped");

    Ok(())
}

#[cfg(windows)]
async fn run_status() {
    use crate::language::{Dispatcher, Win32WindowSystem};
    use crate::status::{StatusMonitor, POLL_INTERVAL};

    let mut monitor = StatusMonitor::new(Dispatcher::new(Win32WindowSystem), POLL_INTERVAL);
    monitor.run().await;
}

#[cfg(not(windows))]
async fn run_status() {
    std::future::pending::<()>().await
}
