//! Language-switch dispatcher
//!
//! Every outcome other than [`Outcome::Done`] is folded into a silent
//! no-op. Focus routinely disappears for a moment between windows, so
//! these failures are logged at trace level and never surfaced.

use tracing::{debug, trace};

use super::code::LanguageCode;
use super::system::{Outcome, WindowSystem};

/// Issues language-change requests to the foreground target
pub struct Dispatcher<S> {
    system: S,
}

impl<S: WindowSystem> Dispatcher<S> {
    /// Create a new dispatcher
    pub fn new(system: S) -> Self {
        Self { system }
    }

    #[cfg(test)]
    pub(crate) fn system(&self) -> &S {
        &self.system
    }

    /// Ask the foreground window to advance to the next input language
    ///
    /// Returns whether the request was posted. Does not wait for the
    /// change to be applied.
    pub fn dispatch(&self) -> bool {
        let window = match self.system.foreground_window() {
            Outcome::Done(window) => window,
            Outcome::Missing => {
                trace!("no foreground window, skipping language switch");
                return false;
            }
            Outcome::Failed(code) => {
                trace!(code, "foreground window lookup failed");
                return false;
            }
        };

        match self.system.post_language_change(window) {
            Outcome::Done(()) => {
                debug!("input language change requested");
                true
            }
            Outcome::Missing => false,
            Outcome::Failed(code) => {
                trace!(code, "failed to post language change request");
                false
            }
        }
    }

    /// Label of the input language active in the foreground window
    pub fn current_language(&self) -> LanguageCode {
        self.system
            .foreground_window()
            .done()
            .and_then(|window| self.system.window_thread(window).done())
            .and_then(|thread| self.system.input_locale(thread).done())
            .map(LanguageCode::from_locale)
            .unwrap_or(LanguageCode::Unknown)
    }
}
