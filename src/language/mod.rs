//! Language module for input-language switching
//!
//! Resolves the foreground window, reads its input locale for display,
//! and posts forward language-change requests to it.

mod code;
mod dispatcher;
mod system;
#[cfg(windows)]
mod win32;

pub use code::LanguageCode;
pub use dispatcher::Dispatcher;
pub use system::{Outcome, WindowSystem};
#[cfg(windows)]
pub use win32::Win32WindowSystem;
