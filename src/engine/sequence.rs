use std::time::Duration;

use flipotron_core::MappingTable;

use super::{
    layout::LayoutPair, retype::RetypeSequence, selection::SelectionSequence, state::InputState,
};
use crate::{
    config::Timings,
    domain::{ActionOutcome, Failure},
    platform::Host,
};

/// What a sequence step asks of the scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Run the next step after this settle interval.
    Wait(Duration),
    Done(ActionOutcome),
}

/// The step a sequence runs when its timer fires next.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Deleting,
    Switching,
    Retyping,
    Finishing,
    Clearing,
    Copying,
    Inspecting,
    Pasting,
    Releasing,
    Restoring,
    Done,
}

/// Shared state a step may read or mutate.
pub struct SequenceCtx<'a> {
    pub state: &'a mut InputState,
    pub mapping: &'a MappingTable,
    pub layouts: &'a LayoutPair,
    pub timings: &'a Timings,
}

#[derive(Debug)]
pub enum ActiveSequence {
    Retype(RetypeSequence),
    Selection(SelectionSequence),
}

impl ActiveSequence {
    pub fn step(&mut self, ctx: &mut SequenceCtx<'_>, host: &mut dyn Host) -> Step {
        match self {
            Self::Retype(s) => s.step(ctx, host),
            Self::Selection(s) => s.step(ctx, host),
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::Retype(s) => s.phase(),
            Self::Selection(s) => s.phase(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Retype(_) => "retype",
            Self::Selection(s) => s.mode().as_str(),
        }
    }
}

/// First collaborator failure seen by a sequence. Later steps still run.
#[derive(Debug, Default)]
pub struct FailureLog {
    first: Option<Failure>,
}

impl FailureLog {
    pub fn record<T>(&mut self, result: Result<T, Failure>, what: &'static str) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(error = %e, step = what, "collaborator call failed");
                self.first.get_or_insert(e);
                None
            }
        }
    }

    pub fn outcome(&self) -> ActionOutcome {
        match self.first {
            Some(e) => ActionOutcome::Failed(e),
            None => ActionOutcome::Applied,
        }
    }
}
