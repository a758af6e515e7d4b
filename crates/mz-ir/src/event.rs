//! Timed MIDI event types.

/// Absolute time in MIDI ticks from the start of the file.
pub type Tick = u64;

/// A decoded, timed MIDI event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiEvent {
    /// When the event fires (absolute ticks)
    pub time: Tick,
    /// Which channel (0-15) the event belongs to
    pub channel: u8,
    /// What the event does
    pub payload: EventPayload,
}

impl MidiEvent {
    /// Create a new event.
    pub fn new(time: Tick, channel: u8, payload: EventPayload) -> Self {
        Self {
            time,
            channel,
            payload,
        }
    }

    /// Whether this event starts or stops a note.
    pub fn is_note(&self) -> bool {
        matches!(
            self.payload,
            EventPayload::NoteOn { .. } | EventPayload::NoteOff { .. }
        )
    }
}

/// What a decoded event does.
///
/// `NoteOn` velocity is always nonzero: a wire-level note-on with
/// velocity 0 is reclassified as `NoteOff` during decode. Note events
/// carry the channel's program number as it stood at decode time, so
/// the scheduler never has to replay program changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventPayload {
    /// Trigger a note (velocity > 0)
    NoteOn {
        note: u8,
        velocity: u8,
        instrument: u8,
    },
    /// Release a note
    NoteOff {
        note: u8,
        velocity: u8,
        instrument: u8,
    },
    /// Select the channel's instrument program
    ProgramChange { program: u8 },
    /// Select the channel's bank (controller 0, MSB only)
    BankSelect { bank: u8 },
}
