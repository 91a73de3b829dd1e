use windows::{
    Win32::{
        Foundation::{HWND, LPARAM, WPARAM},
        UI::{
            Input::KeyboardAndMouse::{GetKeyboardLayout, HKL, KLF_ACTIVATE, LoadKeyboardLayoutW},
            WindowsAndMessaging::{
                GetForegroundWindow, GetWindowThreadProcessId, PostMessageW,
                WM_INPUTLANGCHANGEREQUEST,
            },
        },
    },
    core::HSTRING,
};

use crate::domain::Failure;

/// Returns the current foreground window, or `None` if it is null.
fn foreground_window() -> Option<HWND> {
    let fg = unsafe { GetForegroundWindow() };
    (!fg.0.is_null()).then_some(fg)
}

/// Layout of the foreground window thread as a KLID string (`00000409`).
///
/// Only the language word of the HKL is kept, which is what the default
/// layout identifiers name.
pub fn current() -> Option<String> {
    let fg = foreground_window()?;
    let hkl = unsafe {
        let tid = GetWindowThreadProcessId(fg, None);
        GetKeyboardLayout(tid)
    };
    let lang = (hkl.0 as usize) & 0xFFFF;
    Some(format!("{lang:08X}"))
}

/// Loads the layout named by `klid` and asks the foreground window to switch to it.
pub fn select(klid: &str) -> Result<(), Failure> {
    let fg = foreground_window().ok_or(Failure::Layout)?;
    let hkl = unsafe { LoadKeyboardLayoutW(&HSTRING::from(klid), KLF_ACTIVATE) }
        .map_err(|_| Failure::Layout)?;
    post_layout_change(fg, hkl)
}

/// Uses `WM_INPUTLANGCHANGEREQUEST`. The `hkl` is passed through `LPARAM`.
fn post_layout_change(fg: HWND, hkl: HKL) -> Result<(), Failure> {
    unsafe {
        PostMessageW(
            Some(fg),
            WM_INPUTLANGCHANGEREQUEST,
            WPARAM(0),
            LPARAM(hkl.0 as isize),
        )
    }
    .map_err(|_| Failure::Layout)
}
