//! Hotkey module for global keyboard event listening
//!
//! Uses a Win32 low-level keyboard hook to observe every key event
//! system-wide and feed the modifier tap detector.

mod keys;
mod listener;
mod session;
#[cfg(windows)]
mod win32;

#[cfg(test)]
pub use keys::vk;
pub use keys::{KeyEvent, KeyTransition, ModifierKey};
pub use listener::{HookError, KeyboardHook};
