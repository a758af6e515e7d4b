//! Synthesis backend trait.

use mz_ir::{EnvelopeProfile, Waveform};

/// A synthesis backend consuming timed note requests.
///
/// Each call is a request to act at `offset_ms` milliseconds after the
/// playback anchor, not a blocking operation; the backend owns the
/// deadline. A backend may be an oscillator synth, a soundfont player,
/// or a hardware MIDI re-encoder; the engine does not care.
pub trait SynthBackend {
    /// Handle for one sounding note.
    type VoiceId: Copy + Eq;

    /// Schedule a note to start sounding at the given offset.
    fn begin_note(
        &mut self,
        note: u8,
        velocity: u8,
        offset_ms: f64,
        waveform: Waveform,
        profile: EnvelopeProfile,
        channel: u8,
    ) -> Self::VoiceId;

    /// Schedule the release ramp of a previously started note.
    fn release_note(&mut self, voice: Self::VoiceId, offset_ms: f64);
}
