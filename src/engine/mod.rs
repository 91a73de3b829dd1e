//! The conversion engine.
//!
//! `Coordinator` owns all mutable state: the keystroke buffers, the busy gate,
//! the queue of deferred jobs and the sequence in flight. The hook path calls
//! `handle_event`; the event loop calls `poll` whenever the deadline it returned
//! has passed.

pub mod classifier;
pub mod dispatch;
pub mod layout;
pub mod retype;
pub mod selection;
pub mod sequence;
pub mod state;

use std::{collections::VecDeque, time::Instant};

use flipotron_core::MappingTable;

pub use self::{
    classifier::HookDecision,
    dispatch::Job,
    layout::LayoutPair,
    sequence::Phase,
    state::InputState,
};
use self::{
    retype::RetypeSequence,
    selection::{SelectionMode, SelectionSequence},
    sequence::{ActiveSequence, SequenceCtx, Step},
};
use crate::{
    config::{Config, Timings},
    domain::{ActionOutcome, SkipReason},
    input::{InputEvent, Keymap, Keystroke},
    platform::Host,
};

#[derive(Debug)]
struct Scheduled {
    sequence: ActiveSequence,
    due: Instant,
}

#[derive(Debug)]
pub struct Coordinator {
    state: InputState,
    keymap: Keymap,
    mapping: MappingTable,
    layouts: LayoutPair,
    timings: Timings,
    queue: VecDeque<Job>,
    active: Option<Scheduled>,
    last_outcome: Option<ActionOutcome>,
}

impl Coordinator {
    pub fn new(config: &Config, keymap: Keymap) -> Self {
        Self {
            state: InputState::default(),
            keymap,
            mapping: config.mapping_table(),
            layouts: config.layouts(),
            timings: config.timings,
            queue: VecDeque::new(),
            active: None,
            last_outcome: None,
        }
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Phase of the sequence in flight, `Idle` when there is none.
    pub fn phase(&self) -> Phase {
        self.active
            .as_ref()
            .map_or(Phase::Idle, |s| s.sequence.phase())
    }

    pub fn queued_jobs(&self) -> usize {
        self.queue.len()
    }

    pub fn last_outcome(&self) -> Option<&ActionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Classifies one hook event. Never blocks; side actions are queued for `poll`.
    pub fn handle_event(&mut self, event: &InputEvent) -> HookDecision {
        let classified = classifier::classify(&mut self.state, &self.keymap, event);
        if let Some(job) = classified.job {
            self.schedule(job);
        }
        classified.decision
    }

    /// Queues a retype of `keystrokes`, deleting `extra_deletes` more characters
    /// than it replays. An empty buffer is a no-op.
    #[tracing::instrument(level = "trace", skip(self, keystrokes), fields(len = keystrokes.len()))]
    pub fn retype(&mut self, keystrokes: Vec<Keystroke>, extra_deletes: usize) {
        if keystrokes.is_empty() {
            tracing::trace!("nothing to retype");
            return;
        }
        self.schedule(Job::Retype {
            keystrokes,
            extra_deletes,
        });
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn convert_selection(&mut self) {
        self.schedule(Job::ConvertSelection);
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn toggle_selection_case(&mut self) {
        self.schedule(Job::ToggleCase);
    }

    fn schedule(&mut self, job: Job) {
        tracing::debug!(?job, "job scheduled");
        self.queue.push_back(job);
    }

    /// Runs every step that is due at `now`, starting queued jobs when no sequence
    /// is in flight.
    ///
    /// Returns the deadline of the next step, or `None` when there is nothing left
    /// to do until another job is scheduled.
    pub fn poll(&mut self, now: Instant, host: &mut dyn Host) -> Option<Instant> {
        loop {
            if let Some(scheduled) = &self.active {
                if scheduled.due > now {
                    return Some(scheduled.due);
                }
                self.step_active(now, host);
                continue;
            }

            let job = self.queue.pop_front()?;
            self.start(job, now);
        }
    }

    fn start(&mut self, job: Job, now: Instant) {
        let sequence = match job {
            Job::Retype {
                keystrokes,
                extra_deletes,
            } => match RetypeSequence::new(keystrokes, extra_deletes) {
                Some(s) => ActiveSequence::Retype(s),
                None => {
                    self.finish(ActionOutcome::Skipped(SkipReason::EmptyBuffer), "retype");
                    return;
                }
            },
            Job::ConvertSelection => {
                ActiveSequence::Selection(SelectionSequence::new(SelectionMode::Convert))
            }
            Job::ToggleCase => {
                ActiveSequence::Selection(SelectionSequence::new(SelectionMode::ToggleCase))
            }
        };

        if !self.state.gate.try_acquire() {
            self.finish(ActionOutcome::Skipped(SkipReason::Reentry), sequence.name());
            return;
        }

        tracing::debug!(sequence = sequence.name(), "sequence started");
        self.active = Some(Scheduled { sequence, due: now });
    }

    fn step_active(&mut self, now: Instant, host: &mut dyn Host) {
        let Some(scheduled) = self.active.as_mut() else {
            return;
        };

        let mut ctx = SequenceCtx {
            state: &mut self.state,
            mapping: &self.mapping,
            layouts: &self.layouts,
            timings: &self.timings,
        };

        match scheduled.sequence.step(&mut ctx, host) {
            Step::Wait(delay) => scheduled.due = now + delay,
            Step::Done(outcome) => {
                let name = scheduled.sequence.name();
                self.active = None;
                self.finish(outcome, name);
            }
        }
    }

    fn finish(&mut self, outcome: ActionOutcome, name: &'static str) {
        match &outcome {
            ActionOutcome::Applied => tracing::debug!(sequence = name, "sequence applied"),
            ActionOutcome::Skipped(reason) => {
                tracing::debug!(sequence = name, reason = reason.as_str(), "sequence skipped");
            }
            ActionOutcome::Failed(e) => {
                tracing::warn!(sequence = name, error = %e, "sequence finished with failures");
            }
        }
        self.last_outcome = Some(outcome);
    }
}
