//! Global keyboard hook lifecycle
//!
//! Owns the monitoring session. The hook itself lives on a dedicated
//! thread that installs it, pumps that thread's message queue, and
//! removes it again before exiting.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;
use std::thread::JoinHandle;

use tracing::{info, warn};

use super::keys::ModifierKey;

/// Errors that can occur while installing the keyboard hook
#[derive(Debug, thiserror::Error)]
#[cfg_attr(not(windows), allow(dead_code))]
pub enum HookError {
    #[error("keyboard hook is already running")]
    AlreadyRunning,

    #[error("failed to install keyboard hook (os error {code:#010x})")]
    Install { code: i32 },

    #[error("failed to spawn hook thread: {0}")]
    ThreadSpawn(String),

    #[error("hook thread exited before reporting readiness")]
    ThreadExited,

    #[error("low-level keyboard hooks are only available on Windows")]
    Unsupported,
}

/// System-wide keyboard hook that switches language on a modifier tap
pub struct KeyboardHook {
    modifier: ModifierKey,
    running: AtomicBool,
    thread_id: AtomicU32,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl KeyboardHook {
    /// Create a new, not yet installed, keyboard hook
    pub fn new(modifier: ModifierKey) -> Self {
        Self {
            modifier,
            running: AtomicBool::new(false),
            thread_id: AtomicU32::new(0),
            handle: Mutex::new(None),
        }
    }

    /// Install the hook
    ///
    /// Blocks until the hook thread reports whether installation
    /// succeeded, so a failure is returned here rather than lost on the
    /// background thread.
    pub fn start(&self) -> Result<(), HookError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(HookError::AlreadyRunning);
        }

        match install(self.modifier) {
            Ok((handle, thread_id)) => {
                self.thread_id.store(thread_id, Ordering::SeqCst);
                if let Ok(mut guard) = self.handle.lock() {
                    *guard = Some(handle);
                }
                info!(modifier = %self.modifier, "keyboard hook started");
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    /// Remove the hook and wait for its thread to exit
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }

        let thread_id = self.thread_id.swap(0, Ordering::SeqCst);
        let handle = self.handle.lock().ok().and_then(|mut guard| guard.take());

        // Joining without a delivered WM_QUIT would block forever
        if !request_quit(thread_id) {
            warn!(thread_id, "hook thread did not get the quit request, detaching it");
            return;
        }

        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("keyboard hook thread panicked");
            }
        }
        info!("keyboard hook stopped");
    }

    /// Check if the hook is currently installed
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for KeyboardHook {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(windows)]
fn install(modifier: ModifierKey) -> Result<(JoinHandle<()>, u32), HookError> {
    use std::sync::mpsc;
    use std::thread;

    let (ready_tx, ready_rx) = mpsc::channel();

    let handle = thread::Builder::new()
        .name("keyboard-hook".to_string())
        .spawn(move || {
            info!("keyboard hook thread started");
            super::win32::run_hook_thread(modifier, ready_tx);
            info!("keyboard hook thread stopped");
        })
        .map_err(|e| HookError::ThreadSpawn(e.to_string()))?;

    match ready_rx.recv() {
        Ok(Ok(thread_id)) => Ok((handle, thread_id)),
        Ok(Err(e)) => {
            let _ = handle.join();
            Err(e)
        }
        Err(_) => {
            let _ = handle.join();
            Err(HookError::ThreadExited)
        }
    }
}

#[cfg(not(windows))]
fn install(_modifier: ModifierKey) -> Result<(JoinHandle<()>, u32), HookError> {
    Err(HookError::Unsupported)
}

/// Whether the hook thread was asked to exit
#[cfg(windows)]
fn request_quit(thread_id: u32) -> bool {
    thread_id != 0 && super::win32::post_quit(thread_id)
}

#[cfg(not(windows))]
fn request_quit(_thread_id: u32) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_creation() {
        let hook = KeyboardHook::new(ModifierKey::Alt);
        assert!(!hook.is_running());
    }

    #[test]
    fn test_stop_when_not_running_is_noop() {
        let hook = KeyboardHook::new(ModifierKey::Alt);
        hook.stop();
        assert!(!hook.is_running());
    }

    #[test]
    fn test_stop_without_quit_delivery_does_not_block() {
        // Running, but no hook thread to receive WM_QUIT
        let hook = KeyboardHook::new(ModifierKey::Alt);
        hook.running.store(true, Ordering::SeqCst);
        let parked = std::thread::spawn(std::thread::park);
        *hook.handle.lock().unwrap() = Some(parked);

        hook.stop();
        assert!(!hook.is_running());
        assert!(hook.handle.lock().unwrap().is_none());
    }

    #[test]
    fn test_install_error_reports_code() {
        let err = HookError::Install { code: 0x8007_0005_u32 as i32 };
        assert_eq!(
            err.to_string(),
            "failed to install keyboard hook (os error 0x80070005)"
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_start_unsupported_off_windows() {
        let hook = KeyboardHook::new(ModifierKey::Alt);
        assert!(matches!(hook.start(), Err(HookError::Unsupported)));
        assert!(!hook.is_running());
    }
}
