//! Clipboard-based transforms of the current selection.
//!
//! Copy, transform, paste, then put the user's clipboard back. Used both for
//! layout conversion and for case toggling.

use flipotron_core::{Direction, toggle_case};

use super::{
    layout,
    sequence::{FailureLog, Phase, SequenceCtx, Step},
};
use crate::{
    config::settle,
    domain::{ActionOutcome, SkipReason},
    platform::{Host, LayoutSlot},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SelectionMode {
    /// Transliterate the selection and switch to the layout of the result.
    Convert,
    /// Swap the case of the selection; the layout is left alone.
    ToggleCase,
}

impl SelectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Convert => "convert_selection",
            Self::ToggleCase => "toggle_case",
        }
    }
}

fn slot_for(direction: Direction) -> LayoutSlot {
    match direction {
        Direction::Forward => LayoutSlot::Secondary,
        Direction::Backward => LayoutSlot::Primary,
    }
}

#[derive(Debug)]
pub struct SelectionSequence {
    mode: SelectionMode,
    phase: Phase,
    saved: Option<String>,
    baseline: u64,
    direction: Option<Direction>,
    failures: FailureLog,
}

impl SelectionSequence {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            phase: Phase::Clearing,
            saved: None,
            baseline: 0,
            direction: None,
            failures: FailureLog::default(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Expects the busy gate to be held by the caller. The gate is released before
    /// the clipboard restore so typing resumes as soon as the paste has settled.
    pub fn step(&mut self, ctx: &mut SequenceCtx<'_>, host: &mut dyn Host) -> Step {
        let timings = ctx.timings;
        match self.phase {
            Phase::Clearing => {
                self.saved = host.text();
                self.failures.record(host.clear(), "clear_clipboard");
                self.baseline = host.change_count();
                self.phase = Phase::Copying;
                Step::Wait(settle(timings.selection_after_clear_ms))
            }
            Phase::Copying => {
                self.failures.record(host.post_copy(), "post_copy");
                self.phase = Phase::Inspecting;
                Step::Wait(settle(timings.selection_after_copy_ms))
            }
            Phase::Inspecting => self.inspect(ctx, host),
            Phase::Pasting => {
                self.failures.record(host.post_paste(), "post_paste");
                if let Some(direction) = self.direction {
                    self.failures.record(
                        layout::select(host, ctx.layouts, slot_for(direction)),
                        "select_layout",
                    );
                }
                self.phase = Phase::Releasing;
                Step::Wait(settle(timings.selection_after_paste_ms))
            }
            Phase::Releasing => {
                if self.mode == SelectionMode::Convert {
                    ctx.state.clear_just_converted();
                }
                ctx.state.gate.release();
                layout::refresh_indicator(host, ctx.layouts);
                self.phase = Phase::Restoring;
                Step::Wait(settle(timings.clipboard_restore_ms))
            }
            Phase::Restoring => {
                self.restore_clipboard(host);
                self.phase = Phase::Done;
                Step::Done(self.failures.outcome())
            }
            _ => Step::Done(self.failures.outcome()),
        }
    }

    fn inspect(&mut self, ctx: &mut SequenceCtx<'_>, host: &mut dyn Host) -> Step {
        let changed = host.change_count() != self.baseline;
        let text = if changed {
            host.text().filter(|t| !t.is_empty())
        } else {
            None
        };

        let Some(text) = text else {
            let reason = if changed {
                SkipReason::NoSelection
            } else {
                SkipReason::ClipboardUnchanged
            };
            tracing::debug!(reason = reason.as_str(), mode = self.mode.as_str(), "no selection");

            if self.mode == SelectionMode::Convert {
                self.failures
                    .record(layout::toggle(host, ctx.layouts), "toggle_layout");
            }
            self.restore_clipboard(host);
            ctx.state.gate.release();
            self.phase = Phase::Done;
            return Step::Done(match self.failures.outcome() {
                ActionOutcome::Applied => ActionOutcome::Skipped(reason),
                failed => failed,
            });
        };

        tracing::trace!(len = text.chars().count(), "selection detected");

        let replacement = match self.mode {
            SelectionMode::Convert => {
                let conversion = ctx.mapping.convert(&text);
                self.direction = Some(conversion.direction);
                conversion.text
            }
            SelectionMode::ToggleCase => toggle_case(&text),
        };

        self.failures
            .record(host.set_text(&replacement), "set_clipboard");
        self.phase = Phase::Pasting;
        Step::Wait(settle(ctx.timings.selection_before_paste_ms))
    }

    fn restore_clipboard(&mut self, host: &mut dyn Host) {
        if let Some(saved) = self.saved.take() {
            self.failures
                .record(host.set_text(&saved), "restore_clipboard");
        }
    }
}
