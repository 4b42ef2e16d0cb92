//! Status display for the active input language
//!
//! Stands in for the tray indicator: polls the foreground window's
//! language on a fixed interval and logs the label whenever it changes.
//! The core never pushes updates here.

use std::time::Duration;

use tracing::info;

use crate::language::{Dispatcher, LanguageCode, WindowSystem};

/// How often the language label is refreshed
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Polls the current input language for display
pub struct StatusMonitor<S> {
    dispatcher: Dispatcher<S>,
    interval: Duration,
    last: Option<LanguageCode>,
}

impl<S: WindowSystem> StatusMonitor<S> {
    pub fn new(dispatcher: Dispatcher<S>, interval: Duration) -> Self {
        Self {
            dispatcher,
            interval,
            last: None,
        }
    }

    /// Last label shown, if any
    pub fn current(&self) -> Option<LanguageCode> {
        self.last
    }

    /// Query the language once; returns the new label if it changed
    pub fn refresh(&mut self) -> Option<LanguageCode> {
        let language = self.dispatcher.current_language();
        if self.last == Some(language) {
            return None;
        }
        self.last = Some(language);
        Some(language)
    }

    /// Poll until the surrounding task is dropped
    pub async fn run(&mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if let Some(language) = self.refresh() {
                info!(language = %language, "input language");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::language::Outcome;

    /// Always focused; the locale can be changed between polls
    struct FakeSystem {
        locale: Cell<usize>,
    }

    impl WindowSystem for FakeSystem {
        type Window = ();

        fn foreground_window(&self) -> Outcome<()> {
            Outcome::Done(())
        }

        fn window_thread(&self, _window: ()) -> Outcome<u32> {
            Outcome::Done(1)
        }

        fn input_locale(&self, _thread: u32) -> Outcome<usize> {
            Outcome::Done(self.locale.get())
        }

        fn post_language_change(&self, _window: ()) -> Outcome<()> {
            Outcome::Done(())
        }
    }

    #[test]
    fn test_refresh_reports_changes_only() {
        let system = FakeSystem {
            locale: Cell::new(0x0409),
        };
        let mut monitor = StatusMonitor::new(Dispatcher::new(system), Duration::from_millis(10));
        assert_eq!(monitor.current(), None);

        assert_eq!(monitor.refresh(), Some(LanguageCode::Known("EN")));
        assert_eq!(monitor.refresh(), None);

        monitor.dispatcher.system().locale.set(0x0422);
        assert_eq!(monitor.refresh(), Some(LanguageCode::Known("UK")));
        assert_eq!(monitor.current(), Some(LanguageCode::Known("UK")));
    }

    #[test]
    fn test_run_polls_until_dropped() {
        let system = FakeSystem {
            locale: Cell::new(0x0415),
        };
        let mut monitor = StatusMonitor::new(Dispatcher::new(system), Duration::from_millis(5));

        tokio_test::block_on(async {
            let _ = tokio::time::timeout(Duration::from_millis(30), monitor.run()).await;
        });
        assert_eq!(monitor.current(), Some(LanguageCode::Known("PL")));
    }
}
