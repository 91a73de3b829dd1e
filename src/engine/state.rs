use crate::input::Keystroke;

/// Re-entrancy guard for multi-step sequences.
///
/// Exactly one sequence owns the gate at a time. It is acquired when a sequence
/// starts and released on every exit path of that sequence.
#[derive(Debug, Default)]
pub struct BusyGate {
    held: bool,
}

impl BusyGate {
    pub fn is_set(&self) -> bool {
        self.held
    }

    /// Returns `false` when the gate is already held.
    pub fn try_acquire(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        true
    }

    pub fn release(&mut self) {
        debug_assert!(self.held, "busy gate released while not held");
        self.held = false;
    }
}

/// Keystroke history used to reconstruct the word the user meant.
#[derive(Debug, Default)]
pub struct InputState {
    word: Vec<Keystroke>,
    previous_word: Vec<Keystroke>,
    boundary: Option<Keystroke>,
    just_converted: bool,
    trigger_armed: bool,
    pub(crate) gate: BusyGate,
}

impl InputState {
    pub fn word(&self) -> &[Keystroke] {
        &self.word
    }

    pub fn previous_word(&self) -> &[Keystroke] {
        &self.previous_word
    }

    pub fn boundary(&self) -> Option<Keystroke> {
        self.boundary
    }

    pub fn just_converted(&self) -> bool {
        self.just_converted
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_set()
    }

    /// Drops the current word, the previous word, its boundary and the converted marker.
    pub fn clear_all(&mut self) {
        self.word.clear();
        self.previous_word.clear();
        self.boundary = None;
        self.just_converted = false;
    }

    pub(crate) fn push(&mut self, keystroke: Keystroke) {
        if self.just_converted {
            self.clear_all();
        }
        self.word.push(keystroke);
    }

    pub(crate) fn backspace(&mut self) {
        let _ = self.word.pop();
        self.just_converted = false;
    }

    /// Moves the current word into the previous-word slot at a word boundary.
    pub(crate) fn end_word(&mut self, boundary: Keystroke) {
        if !self.word.is_empty() {
            self.previous_word = std::mem::take(&mut self.word);
            self.boundary = Some(boundary);
        }
        self.word.clear();
        self.just_converted = false;
    }

    pub(crate) fn take_word(&mut self) -> Vec<Keystroke> {
        std::mem::take(&mut self.word)
    }

    pub(crate) fn take_previous_word(&mut self) -> (Vec<Keystroke>, Option<Keystroke>) {
        (
            std::mem::take(&mut self.previous_word),
            self.boundary.take(),
        )
    }

    /// Records a finished retype: the produced keystrokes become the current word
    /// so an immediate repeat converts them back.
    pub(crate) fn set_converted(&mut self, keystrokes: Vec<Keystroke>) {
        self.word = keystrokes;
        self.previous_word.clear();
        self.boundary = None;
        self.just_converted = true;
    }

    pub(crate) fn clear_just_converted(&mut self) {
        self.just_converted = false;
    }

    pub(crate) fn arm_trigger(&mut self) {
        self.trigger_armed = true;
    }

    pub(crate) fn disarm_trigger(&mut self) -> bool {
        std::mem::replace(&mut self.trigger_armed, false)
    }
}
