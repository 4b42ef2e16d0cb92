//! Window-system seam used by the dispatcher
//!
//! Every call is best-effort. Results are reported as [`Outcome`] so
//! callers can tell "nothing there" apart from "the call failed".

/// Result of a best-effort OS call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Call succeeded
    Done(T),
    /// Nothing to act on (e.g. no window has focus)
    Missing,
    /// Call failed with an OS error code
    Failed(u32),
}

impl<T> Outcome<T> {
    /// Keep the value of a successful call, dropping the reason otherwise
    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            Outcome::Missing | Outcome::Failed(_) => None,
        }
    }
}

/// The OS facilities needed to find and notify the foreground target
pub trait WindowSystem {
    /// Opaque window handle
    type Window: Copy;

    /// Window currently receiving keyboard focus
    fn foreground_window(&self) -> Outcome<Self::Window>;

    /// Thread that owns `window`
    fn window_thread(&self, window: Self::Window) -> Outcome<u32>;

    /// Input-locale identifier bound to `thread`
    fn input_locale(&self, thread: u32) -> Outcome<usize>;

    /// Post a non-blocking "next input language" request to `window`
    fn post_language_change(&self, window: Self::Window) -> Outcome<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_keeps_value() {
        assert_eq!(Outcome::Done(7).done(), Some(7));
        assert_eq!(Outcome::<u32>::Missing.done(), None);
        assert_eq!(Outcome::<u32>::Failed(5).done(), None);
    }
}
