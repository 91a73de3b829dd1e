use std::sync::atomic::{AtomicIsize, Ordering};

use windows::Win32::{
    Foundation::{LPARAM, LRESULT, WPARAM},
    UI::{
        Input::KeyboardAndMouse::{
            MAPVK_VSC_TO_VK_EX, MapVirtualKeyW, VK_CONTROL, VK_LCONTROL, VK_LMENU, VK_MENU,
            VK_RCONTROL, VK_RMENU, VK_SHIFT,
        },
        WindowsAndMessaging::{
            CallNextHookEx, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT, LLKHF_EXTENDED, LLKHF_INJECTED,
            SetWindowsHookExW, UnhookWindowsHookEx, WH_KEYBOARD_LL, WM_KEYDOWN, WM_KEYUP,
            WM_SYSKEYDOWN, WM_SYSKEYUP,
        },
    },
};

use crate::{
    domain::Failure,
    engine::HookDecision,
    input::{InputEvent, Modifiers},
};

static HOOK_HANDLE: AtomicIsize = AtomicIsize::new(0);

const MODVK_LSHIFT: u32 = 1 << 0;
const MODVK_RSHIFT: u32 = 1 << 1;
const MODVK_LCTRL: u32 = 1 << 2;
const MODVK_RCTRL: u32 = 1 << 3;
const MODVK_LALT: u32 = 1 << 4;
const MODVK_RALT: u32 = 1 << 5;
const MODVK_LWIN: u32 = 1 << 6;
const MODVK_RWIN: u32 = 1 << 7;

/// Per side modifier keys currently held, one bit per VK.
#[derive(Copy, Clone, Debug, Default)]
pub struct HeldModifiers(u32);

impl HeldModifiers {
    fn press(&mut self, bit: u32) {
        self.0 |= bit;
    }

    fn release(&mut self, bit: u32) {
        self.0 &= !bit;
    }

    pub fn flags(self) -> Modifiers {
        let mut mods = Modifiers::NONE;
        if self.0 & (MODVK_LSHIFT | MODVK_RSHIFT) != 0 {
            mods = mods | Modifiers::SHIFT;
        }
        if self.0 & (MODVK_LCTRL | MODVK_RCTRL) != 0 {
            mods = mods | Modifiers::CONTROL;
        }
        if self.0 & (MODVK_LALT | MODVK_RALT) != 0 {
            mods = mods | Modifiers::OPTION;
        }
        if self.0 & (MODVK_LWIN | MODVK_RWIN) != 0 {
            mods = mods | Modifiers::COMMAND;
        }
        mods
    }
}

fn mod_vk_bit_for_vk(vk: u32) -> Option<u32> {
    match vk {
        0xA0 => Some(MODVK_LSHIFT), // VK_LSHIFT
        0xA1 => Some(MODVK_RSHIFT), // VK_RSHIFT
        0xA2 => Some(MODVK_LCTRL),  // VK_LCONTROL
        0xA3 => Some(MODVK_RCTRL),  // VK_RCONTROL
        0xA4 => Some(MODVK_LALT),   // VK_LMENU
        0xA5 => Some(MODVK_RALT),   // VK_RMENU
        0x5B => Some(MODVK_LWIN),   // VK_LWIN
        0x5C => Some(MODVK_RWIN),   // VK_RWIN
        _ => None,
    }
}

fn is_keydown_msg(msg: u32) -> bool {
    msg == WM_KEYDOWN || msg == WM_SYSKEYDOWN
}

fn is_keyup_msg(msg: u32) -> bool {
    msg == WM_KEYUP || msg == WM_SYSKEYUP
}

/// Resolves the generic shift, control and alt VKs to their left or right variants.
fn normalize_vk(kb: &KBDLLHOOKSTRUCT) -> u32 {
    let vk = kb.vkCode;
    let extended = kb.flags.contains(LLKHF_EXTENDED);

    match vk {
        x if x == u32::from(VK_SHIFT.0) => {
            let mapped = unsafe { MapVirtualKeyW(kb.scanCode, MAPVK_VSC_TO_VK_EX) };
            if mapped != 0 { mapped } else { vk }
        }
        x if x == u32::from(VK_CONTROL.0) => {
            if extended {
                u32::from(VK_RCONTROL.0)
            } else {
                u32::from(VK_LCONTROL.0)
            }
        }
        x if x == u32::from(VK_MENU.0) => {
            if extended {
                u32::from(VK_RMENU.0)
            } else {
                u32::from(VK_LMENU.0)
            }
        }
        _ => vk,
    }
}

/// Turns one raw hook message into an engine event, updating `held` on the way.
///
/// Key ups of ordinary keys produce nothing.
pub fn translate(held: &mut HeldModifiers, vk: u32, msg: u32) -> Option<InputEvent> {
    let key_code = u16::try_from(vk).ok()?;
    let is_keydown = is_keydown_msg(msg);
    let is_keyup = is_keyup_msg(msg);

    if let Some(bit) = mod_vk_bit_for_vk(vk) {
        if is_keydown {
            held.press(bit);
        } else if is_keyup {
            held.release(bit);
        } else {
            return None;
        }
        return Some(InputEvent::modifier_change(key_code, held.flags()));
    }

    is_keydown.then(|| InputEvent::key_down(key_code, held.flags()))
}

/// A swallowed chord leaves a bare Alt or Win press behind, which opens a menu on release.
fn needs_mask(held: HeldModifiers) -> bool {
    held.flags()
        .intersects(Modifiers::OPTION | Modifiers::COMMAND)
}

fn next_hook() -> Option<HHOOK> {
    let h = HOOK_HANDLE.load(Ordering::Relaxed);
    (h != 0).then_some(HHOOK(h as *mut _))
}

extern "system" fn proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let hook = next_hook();
    if code != HC_ACTION as i32 {
        return unsafe { CallNextHookEx(hook, code, wparam, lparam) };
    }

    let Ok(msg) = u32::try_from(wparam.0) else {
        return unsafe { CallNextHookEx(hook, code, wparam, lparam) };
    };

    let kb = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };

    // Our own SendInput output comes back through the hook.
    if kb.flags.contains(LLKHF_INJECTED) {
        return unsafe { CallNextHookEx(hook, code, wparam, lparam) };
    }

    let vk = normalize_vk(kb);
    let (decision, held) = super::with_runtime(|rt| {
        let decision = translate(&mut rt.held, vk, msg)
            .map_or(HookDecision::Pass, |event| rt.dispatch(&event));
        (decision, rt.held)
    })
    .unwrap_or((HookDecision::Pass, HeldModifiers::default()));

    if decision.should_swallow() {
        if needs_mask(held) {
            let _ = super::input::tap_mask_key();
        }
        return LRESULT(1);
    }

    unsafe { CallNextHookEx(hook, code, wparam, lparam) }
}

fn set_hook() -> Result<HHOOK, Failure> {
    unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(proc), None, 0) }.map_err(|e| {
        tracing::error!(error = %e, "SetWindowsHookExW(WH_KEYBOARD_LL) failed");
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
    tracing::info!("WH_KEYBOARD_LL installed");
    Ok(())
}

/// Installs a fresh hook, then drops the old one, which the OS may already have removed.
pub fn reinstall() -> Result<(), Failure> {
    let h = set_hook()?;
    unhook(HOOK_HANDLE.swap(h.0 as isize, Ordering::Relaxed));
    tracing::debug!("WH_KEYBOARD_LL reinstalled");
    Ok(())
}

pub fn uninstall() {
    unhook(HOOK_HANDLE.swap(0, Ordering::Relaxed));
}
