use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBD_EVENT_FLAGS, KEYBDINPUT,
    KEYEVENTF_KEYUP, SendInput, VIRTUAL_KEY, VK_BACK, VK_CONTROL, VK_LMENU, VK_LWIN, VK_RMENU,
    VK_RWIN, VK_SHIFT,
};

use crate::{domain::Failure, input::Keystroke};

const VK_C_KEY: VIRTUAL_KEY = VIRTUAL_KEY(0x43);
const VK_V_KEY: VIRTUAL_KEY = VIRTUAL_KEY(0x56);
/// Unassigned VK. Tapping it between Alt down and Alt up keeps the menu bar closed.
const VK_MASK_KEY: VIRTUAL_KEY = VIRTUAL_KEY(0xE8);

/// Modifiers that turn Ctrl+C/Ctrl+V into a different chord.
const CHORD_BREAKING_MODIFIERS: [VIRTUAL_KEY; 4] = [VK_LMENU, VK_RMENU, VK_LWIN, VK_RWIN];

fn key_input(vk: VIRTUAL_KEY, key_up: bool) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: 0,
                dwFlags: if key_up {
                    KEYEVENTF_KEYUP
                } else {
                    KEYBD_EVENT_FLAGS(0)
                },
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn send(inputs: &[INPUT]) -> Result<(), Failure> {
    if inputs.is_empty() {
        return Ok(());
    }
    let size = i32::try_from(std::mem::size_of::<INPUT>()).map_err(|_| Failure::Input)?;
    let sent = unsafe { SendInput(inputs, size) };
    if usize::try_from(sent).is_ok_and(|n| n == inputs.len()) {
        Ok(())
    } else {
        Err(Failure::Input)
    }
}

pub fn tap_backspace(count: usize) -> Result<(), Failure> {
    let mut inputs = Vec::with_capacity(count.saturating_mul(2));
    for _ in 0..count {
        inputs.push(key_input(VK_BACK, false));
        inputs.push(key_input(VK_BACK, true));
    }
    send(&inputs)
}

pub fn tap_keystroke(keystroke: Keystroke) -> Result<(), Failure> {
    let vk = VIRTUAL_KEY(keystroke.key_code);
    let mut inputs = Vec::with_capacity(4);
    if keystroke.shift {
        inputs.push(key_input(VK_SHIFT, false));
    }
    inputs.push(key_input(vk, false));
    inputs.push(key_input(vk, true));
    if keystroke.shift {
        inputs.push(key_input(VK_SHIFT, true));
    }
    send(&inputs)
}

fn is_down(vk: VIRTUAL_KEY) -> bool {
    let state = unsafe { GetAsyncKeyState(i32::from(vk.0)) } as u16;
    (state & 0x8000) != 0
}

/// Key events for a Ctrl chord on `vk`, preceded by a mask tap and key ups for
/// every modifier in `held`, so Alt+A does not become Ctrl+Alt+C.
fn ctrl_combo_plan(vk: VIRTUAL_KEY, held: &[VIRTUAL_KEY]) -> Vec<(VIRTUAL_KEY, bool)> {
    let mut plan = Vec::with_capacity(held.len() + 6);
    if !held.is_empty() {
        plan.push((VK_MASK_KEY, false));
        plan.push((VK_MASK_KEY, true));
        plan.extend(held.iter().map(|&m| (m, true)));
    }
    plan.extend([
        (VK_CONTROL, false),
        (vk, false),
        (vk, true),
        (VK_CONTROL, true),
    ]);
    plan
}

fn send_ctrl_combo(vk: VIRTUAL_KEY) -> Result<(), Failure> {
    let held: Vec<VIRTUAL_KEY> = CHORD_BREAKING_MODIFIERS
        .into_iter()
        .filter(|&m| is_down(m))
        .collect();
    if !held.is_empty() {
        tracing::debug!(held = held.len(), "releasing modifiers before ctrl chord");
    }

    let inputs: Vec<INPUT> = ctrl_combo_plan(vk, &held)
        .into_iter()
        .map(|(vk, up)| key_input(vk, up))
        .collect();
    send(&inputs)
}

/// Taps the mask key so a bare Alt or Win release does not open a menu.
pub fn tap_mask_key() -> Result<(), Failure> {
    send(&[key_input(VK_MASK_KEY, false), key_input(VK_MASK_KEY, true)])
}

pub fn copy() -> Result<(), Failure> {
    send_ctrl_combo(VK_C_KEY)
}

pub fn paste() -> Result<(), Failure> {
    send_ctrl_combo(VK_V_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_chord_has_no_mask() {
        let plan = ctrl_combo_plan(VK_C_KEY, &[]);
        assert_eq!(
            plan,
            vec![
                (VK_CONTROL, false),
                (VK_C_KEY, false),
                (VK_C_KEY, true),
                (VK_CONTROL, true),
            ]
        );
    }

    #[test]
    fn held_alt_is_masked_and_released_before_chord() {
        let plan = ctrl_combo_plan(VK_C_KEY, &[VK_LMENU]);
        assert_eq!(
            plan[..3],
            [(VK_MASK_KEY, false), (VK_MASK_KEY, true), (VK_LMENU, true)]
        );
        assert_eq!(plan[3], (VK_CONTROL, false));
        assert_eq!(plan.len(), 7);
    }
}
