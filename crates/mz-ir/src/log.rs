//! Diagnostic log sink.
//!
//! Decode and playback report progress through this trait; the sink is
//! an optional collaborator and its absence never changes control flow.

/// Severity tag attached to each diagnostic line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
    Control,
    NoteOn,
    NoteOff,
}

impl Severity {
    /// Stable lowercase tag, e.g. for prefixing log lines.
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Control => "control",
            Severity::NoteOn => "note-on",
            Severity::NoteOff => "note-off",
        }
    }
}

/// Receiver for human-readable diagnostic messages.
pub trait LogSink {
    fn log(&mut self, severity: Severity, message: &str);
}

/// A sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&mut self, _severity: Severity, _message: &str) {}
}
