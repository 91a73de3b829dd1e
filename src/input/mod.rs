pub mod event;
pub mod keymap;

pub use event::{EventKind, InputEvent, Keystroke, Modifiers};
pub use keymap::Keymap;
