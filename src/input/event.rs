use std::ops::BitOr;

/// A physical key press: what was pressed, not the character it produced.
///
/// Replaying the same keystroke under another layout yields the character that
/// layout assigns to the key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Keystroke {
    pub key_code: u16,
    pub shift: bool,
}

impl Keystroke {
    #[must_use]
    pub const fn new(key_code: u16, shift: bool) -> Self {
        Self { key_code, shift }
    }
}

/// Modifier flags active when an event was delivered.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const OPTION: Self = Self(1 << 2);
    pub const COMMAND: Self = Self(1 << 3);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EventKind {
    KeyDown,
    /// A modifier key went down or up; `modifiers` holds the state after the change.
    ModifierChange,
    /// Left or right mouse button down.
    MouseDown,
    /// The host suspended the hook (timeout or user input) and it must be re-enabled.
    HookDisabled,
}

/// One raw event as delivered by the global input hook.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InputEvent {
    pub kind: EventKind,
    pub key_code: u16,
    pub modifiers: Modifiers,
}

impl InputEvent {
    #[must_use]
    pub const fn key_down(key_code: u16, modifiers: Modifiers) -> Self {
        Self {
            kind: EventKind::KeyDown,
            key_code,
            modifiers,
        }
    }

    #[must_use]
    pub const fn modifier_change(key_code: u16, modifiers: Modifiers) -> Self {
        Self {
            kind: EventKind::ModifierChange,
            key_code,
            modifiers,
        }
    }

    #[must_use]
    pub const fn mouse_down() -> Self {
        Self {
            kind: EventKind::MouseDown,
            key_code: 0,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub const fn hook_disabled() -> Self {
        Self {
            kind: EventKind::HookDisabled,
            key_code: 0,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub const fn keystroke(&self) -> Keystroke {
        Keystroke::new(self.key_code, self.modifiers.shift())
    }
}
