//! OS collaborators the engine drives, and the backend that hosts it.
//!
//! The engine never talks to the OS directly: every external effect goes through
//! the traits below so sequences can be driven by a fake host in tests.

pub mod watchdog;
#[cfg(windows)]
mod win;

use crate::{domain::Failure, engine::Coordinator, input::Keystroke};

/// Which of the two configured layouts is meant.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LayoutSlot {
    Primary,
    Secondary,
}

/// Synthetic keyboard output.
pub trait KeySynth {
    fn post_deletes(&mut self, count: usize) -> Result<(), Failure>;
    fn post_keystroke(&mut self, keystroke: Keystroke) -> Result<(), Failure>;
    fn post_copy(&mut self) -> Result<(), Failure>;
    fn post_paste(&mut self) -> Result<(), Failure>;
}

/// System clipboard as a text pipe plus its change counter.
pub trait Clipboard {
    fn text(&mut self) -> Option<String>;
    fn change_count(&mut self) -> u64;
    fn set_text(&mut self, text: &str) -> Result<(), Failure>;
    fn clear(&mut self) -> Result<(), Failure>;
}

pub trait LayoutSwitcher {
    fn current_layout(&mut self) -> Option<String>;
    fn select_layout(&mut self, id: &str) -> Result<(), Failure>;
}

pub trait StatusIndicator {
    fn show_layout(&mut self, slot: LayoutSlot);
}

/// Everything a conversion sequence needs from the OS.
pub trait Host: KeySynth + Clipboard + LayoutSwitcher + StatusIndicator {}

impl<T> Host for T where T: KeySynth + Clipboard + LayoutSwitcher + StatusIndicator {}

/// Installs the global input hook and runs the event loop until the process exits.
///
/// Returns `Failure::Hook` when the hook cannot be installed.
#[cfg(windows)]
pub fn run(coordinator: Coordinator) -> Result<(), Failure> {
    win::run(coordinator)
}

#[cfg(not(windows))]
pub fn run(coordinator: Coordinator) -> Result<(), Failure> {
    drop(coordinator);
    tracing::error!("no global input hook backend for this platform");
    Err(Failure::Hook)
}
