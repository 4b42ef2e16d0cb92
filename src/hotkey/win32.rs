//! WH_KEYBOARD_LL hook thread
//!
//! Low-level keyboard hooks are called on the thread that installed them,
//! from inside that thread's message loop. The session state therefore
//! lives in a thread-local on the hook thread and needs no locking.
//! Session state is created at install and dropped after unhooking.

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::Sender;

use tracing::{error, info, warn};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PostThreadMessageW, SetWindowsHookExW,
    TranslateMessage, UnhookWindowsHookEx, HC_ACTION, KBDLLHOOKSTRUCT, MSG, WH_KEYBOARD_LL,
    WM_QUIT,
};

use super::keys::ModifierKey;
use super::listener::HookError;
use super::session::HookSession;
use crate::language::Win32WindowSystem;

thread_local! {
    static SESSION: RefCell<Option<HookSession<Win32WindowSystem>>> = const { RefCell::new(None) };
}

unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        let result = catch_unwind(AssertUnwindSafe(|| {
            // SAFETY: for HC_ACTION, lParam points to a KBDLLHOOKSTRUCT that
            // stays valid for the duration of this call.
            let data = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };
            let message = wparam.0 as u32;
            SESSION.with(|session| {
                if let Ok(mut session) = session.try_borrow_mut() {
                    if let Some(session) = session.as_mut() {
                        session.on_key(message, data.vkCode);
                    }
                }
            });
        }));

        if let Err(panic) = result {
            let message = if let Some(message) = panic.downcast_ref::<&str>() {
                (*message).to_string()
            } else if let Some(message) = panic.downcast_ref::<String>() {
                message.clone()
            } else {
                "unknown panic".to_string()
            };
            error!(error = %message, "keyboard hook panicked");
        }
    }

    // Events are only observed, never swallowed
    // SAFETY: forwards the unchanged arguments to the next hook in the chain.
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}

/// Install the hook, report readiness, then pump messages until WM_QUIT
pub(super) fn run_hook_thread(modifier: ModifierKey, ready: Sender<Result<u32, HookError>>) {
    SESSION.with(|session| *session.borrow_mut() = Some(HookSession::new(modifier, Win32WindowSystem)));

    // SAFETY: keyboard_proc has the HOOKPROC signature; a null module with
    // thread id 0 installs a global low-level hook owned by this thread.
    let hook = match unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_proc), None, 0) } {
        Ok(hook) => hook,
        Err(e) => {
            SESSION.with(|session| session.borrow_mut().take());
            let _ = ready.send(Err(HookError::Install { code: e.code().0 }));
            return;
        }
    };

    // SAFETY: takes no arguments.
    let thread_id = unsafe { GetCurrentThreadId() };
    if ready.send(Ok(thread_id)).is_ok() {
        info!(thread_id, "keyboard hook installed");
        pump_messages();
    }

    // SAFETY: `hook` came from SetWindowsHookExW on this thread and has not
    // been removed yet.
    if let Err(e) = unsafe { UnhookWindowsHookEx(hook) } {
        warn!(code = e.code().0, "failed to remove keyboard hook");
    }
    SESSION.with(|session| session.borrow_mut().take());
}

fn pump_messages() {
    let mut msg = MSG::default();
    loop {
        // SAFETY: `msg` is a valid out-pointer; no window filter is applied.
        let result = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if result.0 == 0 || result.0 == -1 {
            break;
        }
        // SAFETY: `msg` was filled in by GetMessageW above.
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// Ask the hook thread's message loop to exit; false if the post failed
pub(super) fn post_quit(thread_id: u32) -> bool {
    // SAFETY: posts a parameterless message to a thread id; an exited
    // thread only makes the call fail.
    match unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) } {
        Ok(()) => true,
        Err(e) => {
            warn!(thread_id, code = e.code().0, "failed to post quit to hook thread");
            false
        }
    }
}
