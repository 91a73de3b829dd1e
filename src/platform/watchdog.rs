//! Decides when the global input hook has to be installed again.
//!
//! Windows drops a low level hook without notice once a callback misses
//! `LowLevelHooksTimeout`, which happens whenever the hook thread is stalled.
//! The event loop reports every timer tick here; a gap between ticks longer than
//! the stall threshold means callbacks may have timed out.

use std::time::{Duration, Instant};

/// Gap between ticks after which the hook may have been dropped.
pub const STALL_AFTER: Duration = Duration::from_millis(200);
/// Idle interval after which the hook is refreshed anyway.
pub const REFRESH_EVERY: Duration = Duration::from_secs(60);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReinstallReason {
    /// The engine saw `HookDecision::Reenable`.
    Requested,
    Stalled,
    Refresh,
}

impl ReinstallReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Stalled => "stalled",
            Self::Refresh => "refresh",
        }
    }
}

#[derive(Debug)]
pub struct HookWatchdog {
    stall_after: Duration,
    refresh_every: Duration,
    last_tick: Instant,
    last_install: Instant,
    requested: bool,
}

impl HookWatchdog {
    pub fn new(now: Instant) -> Self {
        Self::with_limits(now, STALL_AFTER, REFRESH_EVERY)
    }

    pub fn with_limits(now: Instant, stall_after: Duration, refresh_every: Duration) -> Self {
        Self {
            stall_after,
            refresh_every,
            last_tick: now,
            last_install: now,
            requested: false,
        }
    }

    /// Asks for a reinstall on the next tick. Safe to call from a hook callback.
    pub fn request(&mut self) {
        self.requested = true;
    }

    /// Records a tick. `idle` is true when no sequence is running or queued;
    /// routine refreshes wait for it so no synthetic input is in flight.
    pub fn tick(&mut self, now: Instant, idle: bool) -> Option<ReinstallReason> {
        let gap = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;

        if std::mem::take(&mut self.requested) {
            return Some(ReinstallReason::Requested);
        }
        if gap > self.stall_after {
            return Some(ReinstallReason::Stalled);
        }
        if idle && now.saturating_duration_since(self.last_install) >= self.refresh_every {
            return Some(ReinstallReason::Refresh);
        }
        None
    }

    pub fn installed(&mut self, now: Instant) {
        self.last_install = now;
        self.requested = false;
    }
}
