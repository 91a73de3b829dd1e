//! Synchronous classification of raw hook events.
//!
//! Runs on the hook path: no I/O, no waiting. Heavy work is returned as a `Job`
//! for the coordinator to run later.

use super::{
    dispatch::{self, Job},
    state::InputState,
};
use crate::input::{EventKind, InputEvent, Keymap};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HookDecision {
    Pass,
    Swallow,
    /// Pass the event and re-enable the hook that the host suspended.
    Reenable,
}

impl HookDecision {
    pub fn should_swallow(self) -> bool {
        matches!(self, Self::Swallow)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classified {
    pub decision: HookDecision,
    pub job: Option<Job>,
}

impl Classified {
    fn pass() -> Self {
        Self {
            decision: HookDecision::Pass,
            job: None,
        }
    }

    fn pass_with(job: Job) -> Self {
        Self {
            decision: HookDecision::Pass,
            job: Some(job),
        }
    }

    fn swallow_with(job: Job) -> Self {
        Self {
            decision: HookDecision::Swallow,
            job: Some(job),
        }
    }
}

pub fn classify(state: &mut InputState, keymap: &Keymap, event: &InputEvent) -> Classified {
    match event.kind {
        EventKind::HookDisabled => {
            tracing::warn!("input hook suspended by host, re-enabling");
            Classified {
                decision: HookDecision::Reenable,
                job: None,
            }
        }
        _ if state.is_busy() => {
            tracing::trace!(kind = ?event.kind, key = event.key_code, "busy, passing through");
            Classified::pass()
        }
        EventKind::MouseDown => {
            state.clear_all();
            Classified::pass()
        }
        EventKind::KeyDown => classify_key_down(state, keymap, event),
        EventKind::ModifierChange => classify_modifier_change(state, keymap, event),
    }
}

fn classify_key_down(state: &mut InputState, keymap: &Keymap, event: &InputEvent) -> Classified {
    // The trigger only counts as press-then-release with nothing typed in between.
    let _ = state.disarm_trigger();

    let key = event.key_code;
    let mods = event.modifiers;

    if keymap.is_case_toggle(key, mods) {
        tracing::trace!("case toggle chord");
        return Classified::swallow_with(Job::ToggleCase);
    }

    if keymap.is_ignored(key) {
        return Classified::pass();
    }

    if mods.intersects(keymap.clearing_modifiers) {
        state.clear_all();
    } else if key == keymap.backspace {
        state.backspace();
    } else if keymap.is_word_boundary(key) {
        state.end_word(event.keystroke());
    } else if keymap.is_clearing(key) {
        state.clear_all();
    } else {
        state.push(event.keystroke());
    }

    Classified::pass()
}

fn classify_modifier_change(
    state: &mut InputState,
    keymap: &Keymap,
    event: &InputEvent,
) -> Classified {
    if event.key_code != keymap.trigger_key {
        return Classified::pass();
    }

    if event.modifiers.contains(keymap.trigger_modifier) {
        state.arm_trigger();
        return Classified::pass();
    }

    if !state.disarm_trigger() {
        return Classified::pass();
    }

    let job = dispatch::resolve(state);
    tracing::trace!(?job, "conversion triggered");
    Classified::pass_with(job)
}
