use std::time::{Duration, Instant};

use crate::platform::watchdog::{HookWatchdog, REFRESH_EVERY, ReinstallReason, STALL_AFTER};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn regular_ticks_keep_hook() {
    let t0 = Instant::now();
    let mut dog = HookWatchdog::new(t0);

    for i in 1..=100 {
        assert_eq!(dog.tick(t0 + ms(10 * i), true), None);
    }
}

#[test]
fn reenable_request_reinstalls_on_next_tick() {
    let t0 = Instant::now();
    let mut dog = HookWatchdog::new(t0);

    dog.request();
    assert_eq!(
        dog.tick(t0 + ms(10), false),
        Some(ReinstallReason::Requested)
    );
    dog.installed(t0 + ms(10));
    assert_eq!(dog.tick(t0 + ms(20), false), None);
}

#[test]
fn stalled_thread_reinstalls_even_when_busy() {
    let t0 = Instant::now();
    let mut dog = HookWatchdog::new(t0);

    let late = t0 + STALL_AFTER + ms(1);
    assert_eq!(dog.tick(late, false), Some(ReinstallReason::Stalled));
    assert_eq!(dog.tick(late + ms(10), false), None);
}

#[test]
fn refresh_waits_for_idle() {
    let t0 = Instant::now();
    let mut dog = HookWatchdog::with_limits(t0, ms(1_000), ms(50));

    let mut now = t0;
    for _ in 0..10 {
        now += ms(10);
        assert_eq!(dog.tick(now, false), None);
    }

    now += ms(10);
    assert_eq!(dog.tick(now, true), Some(ReinstallReason::Refresh));
    dog.installed(now);
    assert_eq!(dog.tick(now + ms(10), true), None);
}

#[test]
fn default_refresh_interval_applies() {
    let t0 = Instant::now();
    let mut dog = HookWatchdog::with_limits(t0, REFRESH_EVERY * 2, REFRESH_EVERY);

    assert_eq!(
        dog.tick(t0 + REFRESH_EVERY, true),
        Some(ReinstallReason::Refresh)
    );
}
