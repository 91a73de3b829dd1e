use super::{clipboard, input, layout};
use crate::{
    domain::Failure,
    input::Keystroke,
    platform::{Clipboard, KeySynth, LayoutSlot, LayoutSwitcher, StatusIndicator},
};

/// The real OS behind the engine's collaborator traits.
#[derive(Debug, Default)]
pub struct WinHost {
    shown: Option<LayoutSlot>,
}

impl KeySynth for WinHost {
    fn post_deletes(&mut self, count: usize) -> Result<(), Failure> {
        input::tap_backspace(count)
    }

    fn post_keystroke(&mut self, keystroke: Keystroke) -> Result<(), Failure> {
        input::tap_keystroke(keystroke)
    }

    fn post_copy(&mut self) -> Result<(), Failure> {
        input::copy()
    }

    fn post_paste(&mut self) -> Result<(), Failure> {
        input::paste()
    }
}

impl Clipboard for WinHost {
    fn text(&mut self) -> Option<String> {
        clipboard::get_text()
    }

    fn change_count(&mut self) -> u64 {
        clipboard::sequence_number()
    }

    fn set_text(&mut self, text: &str) -> Result<(), Failure> {
        clipboard::set_text(text)
    }

    fn clear(&mut self) -> Result<(), Failure> {
        clipboard::clear()
    }
}

impl LayoutSwitcher for WinHost {
    fn current_layout(&mut self) -> Option<String> {
        layout::current()
    }

    fn select_layout(&mut self, id: &str) -> Result<(), Failure> {
        layout::select(id)
    }
}

impl StatusIndicator for WinHost {
    fn show_layout(&mut self, slot: LayoutSlot) {
        if self.shown != Some(slot) {
            tracing::info!(?slot, "active layout");
            self.shown = Some(slot);
        }
    }
}
