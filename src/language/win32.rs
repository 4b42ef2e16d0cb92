//! Win32 implementation of [`WindowSystem`]

use windows::Win32::Foundation::{GetLastError, HWND, LPARAM, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::GetKeyboardLayout;
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowThreadProcessId, PostMessageW, WM_INPUTLANGCHANGEREQUEST,
};

use super::system::{Outcome, WindowSystem};

/// `wParam` flag selecting the next layout in the system's ordering
const INPUTLANGCHANGE_FORWARD: usize = 0x0002;

#[derive(Debug, Clone, Copy, Default)]
pub struct Win32WindowSystem;

impl WindowSystem for Win32WindowSystem {
    type Window = HWND;

    fn foreground_window(&self) -> Outcome<HWND> {
        // SAFETY: takes no arguments; a null handle means nothing has focus.
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            Outcome::Missing
        } else {
            Outcome::Done(hwnd)
        }
    }

    fn window_thread(&self, window: HWND) -> Outcome<u32> {
        // SAFETY: the process id out-pointer is optional and not requested.
        let thread = unsafe { GetWindowThreadProcessId(window, None) };
        if thread == 0 {
            // SAFETY: reads the calling thread's last-error value only.
            Outcome::Failed(unsafe { GetLastError() }.0)
        } else {
            Outcome::Done(thread)
        }
    }

    fn input_locale(&self, thread: u32) -> Outcome<usize> {
        // SAFETY: any thread id is accepted; unknown ids yield a null layout.
        let hkl = unsafe { GetKeyboardLayout(thread) };
        if hkl.0.is_null() {
            Outcome::Missing
        } else {
            Outcome::Done(hkl.0 as usize)
        }
    }

    fn post_language_change(&self, window: HWND) -> Outcome<()> {
        // SAFETY: PostMessageW queues the message and returns immediately;
        // no pointers are passed in wParam/lParam.
        let posted = unsafe {
            PostMessageW(
                Some(window),
                WM_INPUTLANGCHANGEREQUEST,
                WPARAM(INPUTLANGCHANGE_FORWARD),
                LPARAM(0),
            )
        };
        match posted {
            Ok(()) => Outcome::Done(()),
            Err(e) => Outcome::Failed(e.code().0 as u32),
        }
    }
}
