use super::state::InputState;
use crate::input::Keystroke;

/// Deferred work scheduled from the hook path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Job {
    Retype {
        keystrokes: Vec<Keystroke>,
        extra_deletes: usize,
    },
    ConvertSelection,
    ToggleCase,
}

/// Resolves the conversion trigger: current word, else previous word, else selection.
///
/// The chosen buffer is cleared here, before the sequence runs, so a second trigger
/// cannot pick up the same keystrokes.
pub fn resolve(state: &mut InputState) -> Job {
    if !state.word().is_empty() {
        return Job::Retype {
            keystrokes: state.take_word(),
            extra_deletes: 0,
        };
    }

    if !state.previous_word().is_empty() {
        let (keystrokes, boundary) = state.take_previous_word();
        // The boundary character sits between the word and the caret.
        return Job::Retype {
            keystrokes,
            extra_deletes: usize::from(boundary.is_some()),
        };
    }

    Job::ConvertSelection
}
