use std::time::Instant;

use crate::{
    config::Config,
    domain::Failure,
    engine::Coordinator,
    input::{InputEvent, Keymap, Keystroke, Modifiers},
    platform::{Clipboard, KeySynth, LayoutSlot, LayoutSwitcher, StatusIndicator},
};

pub const PRIMARY: &str = "us";
pub const SECONDARY: &str = "ru";

/// macOS key codes for the letters used in tests.
pub mod keys {
    pub const A: u16 = 0;
    pub const B: u16 = 11;
    pub const D: u16 = 2;
    pub const G: u16 = 5;
    pub const H: u16 = 4;
    pub const N: u16 = 45;
    pub const T: u16 = 17;
    pub const SPACE: u16 = 49;
    pub const BACKSPACE: u16 = 51;
    pub const RETURN: u16 = 36;
    pub const LEFT: u16 = 123;
    pub const RIGHT_OPTION: u16 = 61;
}

/// "ghbdtn" typed on a QWERTY layout, i.e. "привет" meant in ЙЦУКЕН.
pub fn ghbdtn() -> Vec<Keystroke> {
    [keys::G, keys::H, keys::B, keys::D, keys::T, keys::N]
        .into_iter()
        .map(|k| Keystroke::new(k, false))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Deletes(usize),
    Keystroke(Keystroke),
    Copy,
    Paste(Option<String>),
    SetClipboard(String),
    ClearClipboard,
    SelectLayout(String),
    ShowLayout(LayoutSlot),
}

/// Records every collaborator call and simulates a focused text field.
#[derive(Debug)]
pub struct FakeHost {
    pub calls: Vec<Call>,
    pub clipboard: Option<String>,
    pub change_count: u64,
    /// What the copy chord puts on the clipboard. `None` means nothing is selected.
    pub selection: Option<String>,
    pub layout: Option<String>,
    pub fail_layout: bool,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            clipboard: None,
            change_count: 0,
            selection: None,
            layout: Some(PRIMARY.to_owned()),
            fail_layout: false,
        }
    }
}

impl FakeHost {
    pub fn pasted(&self) -> Vec<Option<String>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Paste(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn selected_layouts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SelectLayout(id) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn replayed(&self) -> Vec<Keystroke> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Keystroke(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Deletes(n) => Some(*n),
                _ => None,
            })
            .collect()
    }
}

impl KeySynth for FakeHost {
    fn post_deletes(&mut self, count: usize) -> Result<(), Failure> {
        self.calls.push(Call::Deletes(count));
        Ok(())
    }

    fn post_keystroke(&mut self, keystroke: Keystroke) -> Result<(), Failure> {
        self.calls.push(Call::Keystroke(keystroke));
        Ok(())
    }

    fn post_copy(&mut self) -> Result<(), Failure> {
        self.calls.push(Call::Copy);
        if let Some(selection) = &self.selection {
            self.clipboard = Some(selection.clone());
            self.change_count += 1;
        }
        Ok(())
    }

    fn post_paste(&mut self) -> Result<(), Failure> {
        self.calls.push(Call::Paste(self.clipboard.clone()));
        Ok(())
    }
}

impl Clipboard for FakeHost {
    fn text(&mut self) -> Option<String> {
        self.clipboard.clone()
    }

    fn change_count(&mut self) -> u64 {
        self.change_count
    }

    fn set_text(&mut self, text: &str) -> Result<(), Failure> {
        self.calls.push(Call::SetClipboard(text.to_owned()));
        self.clipboard = Some(text.to_owned());
        self.change_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Failure> {
        self.calls.push(Call::ClearClipboard);
        self.clipboard = None;
        self.change_count += 1;
        Ok(())
    }
}

impl LayoutSwitcher for FakeHost {
    fn current_layout(&mut self) -> Option<String> {
        self.layout.clone()
    }

    fn select_layout(&mut self, id: &str) -> Result<(), Failure> {
        if self.fail_layout {
            return Err(Failure::Layout);
        }
        self.calls.push(Call::SelectLayout(id.to_owned()));
        self.layout = Some(id.to_owned());
        Ok(())
    }
}

impl StatusIndicator for FakeHost {
    fn show_layout(&mut self, slot: LayoutSlot) {
        self.calls.push(Call::ShowLayout(slot));
    }
}

pub fn test_config() -> Config {
    Config {
        primary_layout: PRIMARY.to_owned(),
        secondary_layout: SECONDARY.to_owned(),
        ..Config::default()
    }
}

pub fn coordinator() -> Coordinator {
    Coordinator::new(&test_config(), Keymap::macos())
}

pub fn type_keys(coordinator: &mut Coordinator, keystrokes: &[Keystroke]) {
    for k in keystrokes {
        let mods = if k.shift {
            Modifiers::SHIFT
        } else {
            Modifiers::NONE
        };
        let _ = coordinator.handle_event(&InputEvent::key_down(k.key_code, mods));
    }
}

/// Presses and releases Right Option.
pub fn tap_trigger(coordinator: &mut Coordinator) {
    let _ = coordinator.handle_event(&InputEvent::modifier_change(
        keys::RIGHT_OPTION,
        Modifiers::OPTION,
    ));
    let _ = coordinator.handle_event(&InputEvent::modifier_change(
        keys::RIGHT_OPTION,
        Modifiers::NONE,
    ));
}

/// Polls with a virtual clock, jumping to each deadline, until nothing is left.
pub fn run_until_idle(coordinator: &mut Coordinator, host: &mut FakeHost) -> Instant {
    let mut now = Instant::now();
    while let Some(due) = coordinator.poll(now, host) {
        now = due;
    }
    now
}
