use std::time::Instant;

use super::fake_host::{
    FakeHost, coordinator, ghbdtn, keys, run_until_idle, tap_trigger, test_config, type_keys,
};
use crate::{
    engine::{Coordinator, HookDecision, Phase},
    input::{InputEvent, Keymap, Keystroke, Modifiers},
};

fn key(code: u16) -> InputEvent {
    InputEvent::key_down(code, Modifiers::NONE)
}

#[test]
fn typed_keys_accumulate_in_current_word() {
    let mut c = coordinator();
    type_keys(&mut c, &ghbdtn());

    assert_eq!(c.state().word(), ghbdtn().as_slice());
    assert!(c.state().previous_word().is_empty());
}

#[test]
fn shift_is_recorded_per_keystroke() {
    let mut c = coordinator();
    let _ = c.handle_event(&InputEvent::key_down(keys::G, Modifiers::SHIFT));
    let _ = c.handle_event(&key(keys::H));

    assert_eq!(
        c.state().word(),
        &[Keystroke::new(keys::G, true), Keystroke::new(keys::H, false)]
    );
}

#[test]
fn backspace_removes_last_keystroke() {
    let mut c = coordinator();
    type_keys(&mut c, &ghbdtn());
    let _ = c.handle_event(&key(keys::BACKSPACE));

    assert_eq!(c.state().word().len(), 5);
}

#[test]
fn backspace_never_touches_previous_word() {
    let mut c = coordinator();
    type_keys(&mut c, &ghbdtn());
    let _ = c.handle_event(&key(keys::SPACE));
    type_keys(&mut c, &ghbdtn()[..1]);

    let _ = c.handle_event(&key(keys::BACKSPACE));
    let _ = c.handle_event(&key(keys::BACKSPACE));

    assert!(c.state().word().is_empty());
    assert_eq!(c.state().previous_word(), ghbdtn().as_slice());
}

#[test]
fn backspace_on_empty_word_is_harmless() {
    let mut c = coordinator();
    let _ = c.handle_event(&key(keys::BACKSPACE));
    assert!(c.state().word().is_empty());
}

#[test]
fn space_moves_word_to_previous_slot() {
    let mut c = coordinator();
    type_keys(&mut c, &ghbdtn());
    let _ = c.handle_event(&key(keys::SPACE));

    assert!(c.state().word().is_empty());
    assert_eq!(c.state().previous_word(), ghbdtn().as_slice());
    assert_eq!(
        c.state().boundary(),
        Some(Keystroke::new(keys::SPACE, false))
    );
}

#[test]
fn repeated_space_keeps_previous_word() {
    let mut c = coordinator();
    type_keys(&mut c, &ghbdtn());
    let _ = c.handle_event(&key(keys::SPACE));
    let _ = c.handle_event(&key(keys::SPACE));

    assert_eq!(c.state().previous_word(), ghbdtn().as_slice());
}

#[test]
fn navigation_keys_clear_history() {
    for code in [keys::RETURN, keys::LEFT] {
        let mut c = coordinator();
        type_keys(&mut c, &ghbdtn());
        let _ = c.handle_event(&key(keys::SPACE));
        type_keys(&mut c, &ghbdtn()[..2]);

        let _ = c.handle_event(&key(code));

        assert!(c.state().word().is_empty(), "key {code}");
        assert!(c.state().previous_word().is_empty(), "key {code}");
        assert_eq!(c.state().boundary(), None, "key {code}");
    }
}

#[test]
fn command_or_control_chords_clear_history() {
    for mods in [Modifiers::COMMAND, Modifiers::CONTROL] {
        let mut c = coordinator();
        type_keys(&mut c, &ghbdtn());
        let _ = c.handle_event(&InputEvent::key_down(keys::A, mods));

        assert!(c.state().word().is_empty());
    }
}

#[test]
fn mouse_down_clears_history_and_passes() {
    let mut c = coordinator();
    type_keys(&mut c, &ghbdtn());

    let decision = c.handle_event(&InputEvent::mouse_down());

    assert_eq!(decision, HookDecision::Pass);
    assert!(c.state().word().is_empty());
}

#[test]
fn trigger_release_schedules_one_job_and_empties_word() {
    let mut c = coordinator();
    type_keys(&mut c, &ghbdtn());
    tap_trigger(&mut c);

    assert_eq!(c.queued_jobs(), 1);
    assert!(c.state().word().is_empty());
}

#[test]
fn trigger_with_key_in_between_does_nothing() {
    let mut c = coordinator();
    type_keys(&mut c, &ghbdtn());

    let _ = c.handle_event(&InputEvent::modifier_change(
        keys::RIGHT_OPTION,
        Modifiers::OPTION,
    ));
    let _ = c.handle_event(&InputEvent::key_down(keys::T, Modifiers::OPTION));
    let _ = c.handle_event(&InputEvent::modifier_change(
        keys::RIGHT_OPTION,
        Modifiers::NONE,
    ));

    assert_eq!(c.queued_jobs(), 0);
}

#[test]
fn other_modifier_keys_do_not_trigger() {
    let mut c = coordinator();
    type_keys(&mut c, &ghbdtn());

    // Left Option
    let _ = c.handle_event(&InputEvent::modifier_change(58, Modifiers::OPTION));
    let _ = c.handle_event(&InputEvent::modifier_change(58, Modifiers::NONE));

    assert_eq!(c.queued_jobs(), 0);
    assert_eq!(c.state().word().len(), 6);
}

#[test]
fn modifier_changes_pass_through() {
    let mut c = coordinator();
    let down = c.handle_event(&InputEvent::modifier_change(
        keys::RIGHT_OPTION,
        Modifiers::OPTION,
    ));
    let up = c.handle_event(&InputEvent::modifier_change(
        keys::RIGHT_OPTION,
        Modifiers::NONE,
    ));

    assert_eq!(down, HookDecision::Pass);
    assert_eq!(up, HookDecision::Pass);
}

#[test]
fn case_toggle_chord_is_swallowed() {
    let mut c = coordinator();
    type_keys(&mut c, &ghbdtn());

    let decision = c.handle_event(&InputEvent::key_down(keys::A, Modifiers::OPTION));

    assert_eq!(decision, HookDecision::Swallow);
    assert_eq!(c.queued_jobs(), 1);
    // The chord is not text.
    assert_eq!(c.state().word().len(), 6);
}

#[test]
fn plain_a_is_typed_not_toggled() {
    let mut c = coordinator();
    let decision = c.handle_event(&key(keys::A));

    assert_eq!(decision, HookDecision::Pass);
    assert_eq!(c.queued_jobs(), 0);
    assert_eq!(c.state().word(), &[Keystroke::new(keys::A, false)]);
}

#[test]
fn hook_disabled_requests_reenable() {
    let mut c = coordinator();
    assert_eq!(
        c.handle_event(&InputEvent::hook_disabled()),
        HookDecision::Reenable
    );
}

#[test]
fn events_pass_untouched_while_busy() {
    let mut c = coordinator();
    let mut host = FakeHost::default();
    type_keys(&mut c, &ghbdtn());
    tap_trigger(&mut c);

    // First step only: the deletes are posted and the gate stays held.
    let next = c.poll(Instant::now(), &mut host);
    assert!(next.is_some());
    assert!(c.state().is_busy());
    assert_eq!(c.phase(), Phase::Switching);

    let decision = c.handle_event(&InputEvent::key_down(keys::A, Modifiers::OPTION));
    assert_eq!(decision, HookDecision::Pass);
    assert_eq!(c.queued_jobs(), 0);

    let _ = c.handle_event(&key(keys::G));
    assert!(c.state().word().is_empty());

    let _ = c.handle_event(&InputEvent::mouse_down());
    assert!(c.state().is_busy());

    tap_trigger(&mut c);
    assert_eq!(c.queued_jobs(), 0);
    assert!(c.state().word().is_empty());
    assert!(c.state().previous_word().is_empty());
}

#[test]
fn trigger_while_busy_does_not_start_a_second_conversion() {
    let mut c = coordinator();
    let mut host = FakeHost::default();
    type_keys(&mut c, &ghbdtn());
    tap_trigger(&mut c);
    let _ = c.poll(Instant::now(), &mut host);

    tap_trigger(&mut c);
    run_until_idle(&mut c, &mut host);

    assert_eq!(host.deletes(), vec![6]);
    assert_eq!(host.replayed(), ghbdtn());
}

#[test]
fn function_keys_are_not_buffered() {
    let mut c = coordinator();
    type_keys(&mut c, &ghbdtn()[..2]);
    // F5
    let _ = c.handle_event(&key(96));

    assert_eq!(c.state().word(), &ghbdtn()[..2]);
}

mod windows_keymap {
    use super::*;

    const VK_CAPITAL: u16 = 0x14;
    const VK_ESCAPE: u16 = 0x1B;
    const VK_DELETE: u16 = 0x2E;
    const VK_F2: u16 = 0x71;
    const VK_RMENU: u16 = 0xA5;

    /// "ghbdtn" as Windows virtual keys.
    fn ghbdtn_vks() -> Vec<Keystroke> {
        [0x47, 0x48, 0x42, 0x44, 0x54, 0x4E]
            .into_iter()
            .map(|vk| Keystroke::new(vk, false))
            .collect()
    }

    fn windows_coordinator() -> Coordinator {
        Coordinator::new(&test_config(), Keymap::windows())
    }

    fn tap_right_alt(c: &mut Coordinator) {
        let _ = c.handle_event(&InputEvent::modifier_change(VK_RMENU, Modifiers::OPTION));
        let _ = c.handle_event(&InputEvent::modifier_change(VK_RMENU, Modifiers::NONE));
    }

    #[test]
    fn lock_and_escape_keys_are_not_part_of_the_word() {
        let mut c = windows_coordinator();
        let mut host = FakeHost::default();

        let _ = c.handle_event(&key(VK_CAPITAL));
        type_keys(&mut c, &ghbdtn_vks());
        let _ = c.handle_event(&key(VK_ESCAPE));
        let _ = c.handle_event(&key(VK_F2));
        assert_eq!(c.state().word(), ghbdtn_vks().as_slice());

        tap_right_alt(&mut c);
        run_until_idle(&mut c, &mut host);

        assert_eq!(host.deletes(), vec![6]);
        assert_eq!(host.replayed(), ghbdtn_vks());
    }

    #[test]
    fn delete_and_paging_keys_clear_history() {
        for vk in [VK_DELETE, 0x2D, 0x21, 0x22] {
            let mut c = windows_coordinator();
            type_keys(&mut c, &ghbdtn_vks());
            let _ = c.handle_event(&key(0x20));
            type_keys(&mut c, &ghbdtn_vks()[..2]);

            let _ = c.handle_event(&key(vk));

            assert!(c.state().word().is_empty(), "vk {vk:#x}");
            assert!(c.state().previous_word().is_empty(), "vk {vk:#x}");
        }
    }

    #[test]
    fn ignored_key_still_disarms_trigger() {
        let mut c = windows_coordinator();
        type_keys(&mut c, &ghbdtn_vks());

        let _ = c.handle_event(&InputEvent::modifier_change(VK_RMENU, Modifiers::OPTION));
        let _ = c.handle_event(&InputEvent::key_down(VK_F2, Modifiers::OPTION));
        let _ = c.handle_event(&InputEvent::modifier_change(VK_RMENU, Modifiers::NONE));

        assert_eq!(c.queued_jobs(), 0);
    }
}
