//! Clipboard-free conversion: delete the word, switch layout, replay the same keys.
//!
//! Replaying the recorded physical keys under the other layout produces the
//! transliterated characters, so no character lookup happens on this path.

use super::{
    layout,
    sequence::{FailureLog, Phase, SequenceCtx, Step},
};
use crate::{config::settle, input::Keystroke, platform::Host};

#[derive(Debug)]
pub struct RetypeSequence {
    keystrokes: Vec<Keystroke>,
    extra_deletes: usize,
    phase: Phase,
    failures: FailureLog,
}

impl RetypeSequence {
    /// `None` for an empty buffer: there is nothing to retype.
    pub fn new(keystrokes: Vec<Keystroke>, extra_deletes: usize) -> Option<Self> {
        (!keystrokes.is_empty()).then(|| Self {
            keystrokes,
            extra_deletes,
            phase: Phase::Deleting,
            failures: FailureLog::default(),
        })
    }

    pub fn delete_count(&self) -> usize {
        self.keystrokes.len() + self.extra_deletes
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Expects the busy gate to be held by the caller; releases it when finishing.
    pub fn step(&mut self, ctx: &mut SequenceCtx<'_>, host: &mut dyn Host) -> Step {
        match self.phase {
            Phase::Deleting => {
                let count = self.delete_count();
                tracing::debug!(count, "retype: deleting");
                self.failures.record(host.post_deletes(count), "post_deletes");
                self.phase = Phase::Switching;
                Step::Wait(settle(ctx.timings.retype_after_delete_ms))
            }
            Phase::Switching => {
                self.failures
                    .record(layout::toggle(host, ctx.layouts), "toggle_layout");
                self.phase = Phase::Retyping;
                Step::Wait(settle(ctx.timings.retype_after_switch_ms))
            }
            Phase::Retyping => {
                tracing::debug!(count = self.keystrokes.len(), "retype: replaying keystrokes");
                for &keystroke in &self.keystrokes {
                    self.failures
                        .record(host.post_keystroke(keystroke), "post_keystroke");
                }
                self.phase = Phase::Finishing;
                Step::Wait(settle(ctx.timings.retype_after_replay_ms))
            }
            Phase::Finishing => {
                ctx.state
                    .set_converted(std::mem::take(&mut self.keystrokes));
                ctx.state.gate.release();
                layout::refresh_indicator(host, ctx.layouts);
                self.phase = Phase::Done;
                Step::Done(self.failures.outcome())
            }
            _ => Step::Done(self.failures.outcome()),
        }
    }
}
