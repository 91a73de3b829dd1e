use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Skipped(SkipReason),
    Failed(Failure),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing was selected; the layout was toggled instead.
    NoSelection,
    /// The clipboard change counter did not move after the copy chord.
    ClipboardUnchanged,
    /// Another sequence held the busy gate.
    Reentry,
    EmptyBuffer,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NoSelection => "no_selection",
            SkipReason::ClipboardUnchanged => "clipboard_unchanged",
            SkipReason::Reentry => "reentry",
            SkipReason::EmptyBuffer => "empty_buffer",
        }
    }
}

/// Failure reported by an OS collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    Clipboard,
    Layout,
    Input,
    Hook,
}

impl Failure {
    pub fn as_str(self) -> &'static str {
        match self {
            Failure::Clipboard => "clipboard_error",
            Failure::Layout => "layout_error",
            Failure::Input => "input_error",
            Failure::Hook => "hook_error",
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for Failure {}
