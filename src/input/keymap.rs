//! Key codes the classifier reacts to, per platform.
//!
//! The codes are physical key codes as the platform hook reports them, so a
//! keymap must match the backend that produces the events.

use super::event::Modifiers;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Keymap {
    pub backspace: u16,
    /// Keys that end a word and push it into the previous-word slot.
    pub word_boundary: Vec<u16>,
    /// Navigation and editing keys that drop all buffered history.
    pub clearing: Vec<u16>,
    /// Keys that produce no text; they pass through without touching the buffers.
    pub ignored: Vec<u16>,
    /// Any of these held during a key-down drops all buffered history.
    pub clearing_modifiers: Modifiers,
    /// Modifier key that triggers conversion on press-then-release.
    pub trigger_key: u16,
    /// Flag reported while `trigger_key` is held.
    pub trigger_modifier: Modifiers,
    pub case_toggle_key: u16,
    pub case_toggle_modifier: Modifiers,
}

impl Keymap {
    /// macOS virtual key codes; trigger is Right Option, case toggle Option+A.
    #[must_use]
    pub fn macos() -> Self {
        Self {
            backspace: 51,
            word_boundary: vec![49],
            // Return, Tab, Left, Right, Down, Up, Home, End
            clearing: vec![36, 48, 123, 124, 125, 126, 115, 119],
            // F1-F12
            ignored: vec![122, 120, 99, 118, 96, 97, 98, 100, 101, 109, 103, 111],
            clearing_modifiers: Modifiers::COMMAND | Modifiers::CONTROL,
            trigger_key: 61,
            trigger_modifier: Modifiers::OPTION,
            case_toggle_key: 0,
            case_toggle_modifier: Modifiers::OPTION,
        }
    }

    /// Windows virtual keys; trigger is Right Alt, case toggle Alt+A.
    #[must_use]
    pub fn windows() -> Self {
        Self {
            backspace: 0x08,
            word_boundary: vec![0x20],
            // VK_RETURN, VK_TAB, VK_LEFT, VK_RIGHT, VK_DOWN, VK_UP, VK_HOME, VK_END,
            // VK_DELETE, VK_INSERT, VK_PRIOR, VK_NEXT
            clearing: vec![
                0x0D, 0x09, 0x25, 0x27, 0x28, 0x26, 0x24, 0x23, 0x2E, 0x2D, 0x21, 0x22,
            ],
            ignored: windows_ignored_keys(),
            clearing_modifiers: Modifiers::CONTROL | Modifiers::COMMAND,
            trigger_key: 0xA5,
            trigger_modifier: Modifiers::OPTION,
            case_toggle_key: 0x41,
            case_toggle_modifier: Modifiers::OPTION,
        }
    }

    #[must_use]
    pub fn native() -> Self {
        if cfg!(target_os = "macos") {
            Self::macos()
        } else {
            Self::windows()
        }
    }

    #[must_use]
    pub fn is_word_boundary(&self, key_code: u16) -> bool {
        self.word_boundary.contains(&key_code)
    }

    #[must_use]
    pub fn is_clearing(&self, key_code: u16) -> bool {
        self.clearing.contains(&key_code)
    }

    #[must_use]
    pub fn is_ignored(&self, key_code: u16) -> bool {
        self.ignored.contains(&key_code)
    }

    #[must_use]
    pub fn is_case_toggle(&self, key_code: u16, modifiers: Modifiers) -> bool {
        key_code == self.case_toggle_key && modifiers.contains(self.case_toggle_modifier)
    }
}

/// Lock, function, system and media keys. Windows reports these as ordinary key-downs.
fn windows_ignored_keys() -> Vec<u16> {
    // VK_PAUSE, VK_CAPITAL, VK_ESCAPE, VK_SNAPSHOT, VK_APPS, VK_NUMLOCK, VK_SCROLL
    let mut keys = vec![0x13, 0x14, 0x1B, 0x2C, 0x5D, 0x90, 0x91];
    // IME keys
    keys.extend(0x15..=0x1A);
    keys.extend(0x1C..=0x1F);
    // VK_F1..VK_F24
    keys.extend(0x70..=0x87);
    // Browser, volume, media and launch keys
    keys.extend(0xA6..=0xB7);
    // VK_PROCESSKEY, VK_PACKET and the unassigned VK used to mask Alt
    keys.extend(0xE5..=0xE8);
    keys
}

impl Default for Keymap {
    fn default() -> Self {
        Self::native()
    }
}
