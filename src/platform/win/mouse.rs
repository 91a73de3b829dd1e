use std::sync::atomic::{AtomicIsize, Ordering};

use windows::Win32::{
    Foundation::{LPARAM, LRESULT, WPARAM},
    UI::WindowsAndMessaging::{
        CallNextHookEx, HC_ACTION, HHOOK, LLMHF_INJECTED, MSLLHOOKSTRUCT, SetWindowsHookExW,
        UnhookWindowsHookEx, WH_MOUSE_LL, WM_LBUTTONDOWN, WM_RBUTTONDOWN,
    },
};

use crate::{domain::Failure, input::InputEvent};

static HOOK_HANDLE: AtomicIsize = AtomicIsize::new(0);

fn next_hook() -> Option<HHOOK> {
    let h = HOOK_HANDLE.load(Ordering::Relaxed);
    (h != 0).then_some(HHOOK(h as *mut _))
}

extern "system" fn proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let hook = next_hook();
    if code != HC_ACTION as i32 {
        return unsafe { CallNextHookEx(hook, code, wparam, lparam) };
    }

    let msg = u32::try_from(wparam.0);
    let ms = unsafe { &*(lparam.0 as *const MSLLHOOKSTRUCT) };
    let injected = ms.flags & LLMHF_INJECTED != 0;

    if !injected && matches!(msg, Ok(WM_LBUTTONDOWN | WM_RBUTTONDOWN)) {
        // Clicks never get swallowed.
        let _ = super::with_runtime(|rt| rt.dispatch(&InputEvent::mouse_down()));
    }

    unsafe { CallNextHookEx(hook, code, wparam, lparam) }
}

fn set_hook() -> Result<HHOOK, Failure> {
    unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(proc), None, 0) }.map_err(|e| {
        tracing::error!(error = %e, "SetWindowsHookExW(WH_MOUSE_LL) failed");
        Failure::Hook
    })
}

fn unhook(raw: isize) {
    if raw != 0 {
        unsafe {
            let _ = UnhookWindowsHookEx(HHOOK(raw as *mut _));
        }
    }
}

pub fn install() -> Result<(), Failure> {
    if HOOK_HANDLE.load(Ordering::Relaxed) != 0 {
        return Ok(());
    }

    let h = set_hook()?;
    HOOK_HANDLE.store(h.0 as isize, Ordering::Relaxed);
    tracing::info!("WH_MOUSE_LL installed");
    Ok(())
}

/// Installs a fresh hook, then drops the old one, which the OS may already have removed.
pub fn reinstall() -> Result<(), Failure> {
    let h = set_hook()?;
    unhook(HOOK_HANDLE.swap(h.0 as isize, Ordering::Relaxed));
    tracing::debug!("WH_MOUSE_LL reinstalled");
    Ok(())
}

pub fn uninstall() {
    unhook(HOOK_HANDLE.swap(0, Ordering::Relaxed));
}
