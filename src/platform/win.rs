//! Windows backend: low level hooks in, `SendInput` and the clipboard out.
//!
//! Hooks, the timer and the engine all live on the thread that calls `run`.

mod clipboard;
mod host;
mod input;
mod keyboard;
mod layout;
mod mouse;

use std::{cell::RefCell, time::Instant};

use windows::{
    Win32::{
        Foundation::GetLastError,
        UI::WindowsAndMessaging::{
            DispatchMessageW, GetMessageW, KillTimer, MSG, SetTimer, TranslateMessage, WM_TIMER,
        },
    },
    core::{Error, HRESULT},
};

use self::{host::WinHost, keyboard::HeldModifiers};
use super::watchdog::HookWatchdog;
use crate::{
    domain::Failure,
    engine::{Coordinator, HookDecision, Phase},
    input::InputEvent,
};

/// How often the loop checks for due sequence steps.
const TICK_MS: u32 = 10;

struct Runtime {
    coordinator: Coordinator,
    host: WinHost,
    held: HeldModifiers,
    watchdog: HookWatchdog,
}

impl Runtime {
    fn dispatch(&mut self, event: &InputEvent) -> HookDecision {
        let decision = self.coordinator.handle_event(event);
        if decision == HookDecision::Reenable {
            self.watchdog.request();
        }
        decision
    }

    fn is_idle(&self) -> bool {
        self.coordinator.phase() == Phase::Idle && self.coordinator.queued_jobs() == 0
    }

    /// Checks the hooks, then runs due sequence steps. A hook that cannot be
    /// reinstalled is fatal.
    fn tick(&mut self) -> Result<(), Failure> {
        let now = Instant::now();
        if let Some(reason) = self.watchdog.tick(now, self.is_idle()) {
            tracing::info!(reason = reason.as_str(), "reinstalling input hooks");
            keyboard::reinstall()?;
            mouse::reinstall()?;
            self.watchdog.installed(now);
        }

        let _ = self.coordinator.poll(now, &mut self.host);
        Ok(())
    }
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

/// Runs `f` against the runtime. `None` when it is missing or already borrowed,
/// which happens when our own output re-enters a hook.
fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> Option<R> {
    RUNTIME.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

fn last_error() -> Error {
    Error::from_hresult(HRESULT::from_win32(unsafe { GetLastError() }.0))
}

fn uninstall_hooks() {
    mouse::uninstall();
    keyboard::uninstall();
}

pub fn run(coordinator: Coordinator) -> Result<(), Failure> {
    RUNTIME.with(|cell| {
        *cell.borrow_mut() = Some(Runtime {
            coordinator,
            host: WinHost::default(),
            held: HeldModifiers::default(),
            watchdog: HookWatchdog::new(Instant::now()),
        });
    });

    if let Err(e) = keyboard::install().and_then(|()| mouse::install()) {
        uninstall_hooks();
        return Err(e);
    }

    // The tick drives both the sequences and the hook watchdog.
    let timer = unsafe { SetTimer(None, 0, TICK_MS, None) };
    if timer == 0 {
        tracing::error!(error = %last_error(), "SetTimer failed");
        uninstall_hooks();
        return Err(Failure::Hook);
    }

    let result = message_loop();

    unsafe {
        let _ = KillTimer(None, timer);
    }
    uninstall_hooks();
    RUNTIME.with(|cell| cell.borrow_mut().take());
    result
}

fn message_loop() -> Result<(), Failure> {
    let mut msg = MSG::default();
    loop {
        let r = unsafe { GetMessageW(&raw mut msg, None, 0, 0) };
        if r.0 == -1 {
            tracing::error!(error = %last_error(), "GetMessageW failed");
            return Err(Failure::Hook);
        }
        if r.0 == 0 {
            tracing::info!("message loop exited");
            return Ok(());
        }

        if msg.message == WM_TIMER {
            if let Some(Err(e)) = with_runtime(Runtime::tick) {
                return Err(e);
            }
        }

        unsafe {
            let _ = TranslateMessage(&raw const msg);
            DispatchMessageW(&raw const msg);
        }
    }
}
