//! Tick-to-wall-clock playback scheduling.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mz_ir::{
    classify, instrument_name, note_name, EnvelopeProfile, EventPayload, LogSink, NullSink,
    Sequence, Severity, Waveform,
};

use crate::backend::SynthBackend;
use crate::transport::Transport;
use crate::voice_table::VoiceTable;

/// Timing configuration for a play pass.
///
/// The file's declared division and any tempo meta events are ignored
/// by the decoder, so timing is entirely the caller's choice; the
/// defaults match the reference player (120 BPM, 480 PPQ).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Beats per minute.
    pub tempo_bpm: u32,
    /// Ticks per quarter note.
    pub ppq: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: 120,
            ppq: 480,
        }
    }
}

impl PlaybackConfig {
    /// Milliseconds of wall-clock time per MIDI tick.
    pub fn ms_per_tick(&self) -> f64 {
        (60_000.0 / self.tempo_bpm as f64) / self.ppq as f64
    }
}

/// Why a play request was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayError {
    /// The decoded sequence has no events.
    EmptySequence,
    /// No synthesis backend could be brought up.
    BackendUnavailable,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::EmptySequence => write!(f, "no events to play"),
            PlayError::BackendUnavailable => write!(f, "no synthesis backend available"),
        }
    }
}

impl std::error::Error for PlayError {}

/// Shared handle that gates the dispatch loop.
///
/// Cloneable so another thread (or a backend callback) can cease
/// dispatch while a play pass is running.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    playing: Arc<AtomicBool>,
}

impl StopHandle {
    /// Cease further dispatch. Requests already handed to the backend
    /// are not retracted.
    pub fn stop(&self) {
        self.playing.store(false, Ordering::Relaxed);
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }
}

/// The playback scheduler.
///
/// `play` walks the sequence once in time order and hands every note
/// event to the backend as a timed request; the backend honors the
/// deadlines. The loop re-checks the stop flag before each event, so a
/// `stop` observed mid-pass prevents all not-yet-submitted events from
/// ever reaching the backend; each event is dispatched at most once,
/// and never after the stop.
#[derive(Debug)]
pub struct Player {
    config: PlaybackConfig,
    state: Transport,
    handle: StopHandle,
    total_duration_ms: f64,
}

impl Player {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            state: Transport::Idle,
            handle: StopHandle::default(),
            total_duration_ms: 0.0,
        }
    }

    pub fn config(&self) -> PlaybackConfig {
        self.config
    }

    pub fn state(&self) -> Transport {
        self.state
    }

    /// Handle for ceasing dispatch from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.handle.clone()
    }

    /// Wall-clock length of the last scheduled pass, in milliseconds.
    pub fn total_duration_ms(&self) -> f64 {
        self.total_duration_ms
    }

    /// Dispatch the whole sequence to the backend as timed requests.
    ///
    /// Returns the total duration in milliseconds. The pass itself is
    /// synchronous; sound production happens in the backend afterwards.
    pub fn play<B: SynthBackend>(
        &mut self,
        sequence: &Sequence,
        backend: &mut B,
    ) -> Result<f64, PlayError> {
        self.play_with_sink(sequence, backend, &mut NullSink)
    }

    /// As `play`, reporting per-event progress through `sink`.
    pub fn play_with_sink<B: SynthBackend>(
        &mut self,
        sequence: &Sequence,
        backend: &mut B,
        sink: &mut dyn LogSink,
    ) -> Result<f64, PlayError> {
        if sequence.is_empty() {
            sink.log(Severity::Error, "no events to play");
            return Err(PlayError::EmptySequence);
        }

        self.state = Transport::Playing;
        self.handle.playing.store(true, Ordering::Relaxed);

        let ms_per_tick = self.config.ms_per_tick();
        let mut voices: VoiceTable<B::VoiceId> = VoiceTable::new();

        for event in sequence.events() {
            if !self.handle.is_playing() {
                sink.log(Severity::Control, "dispatch ceased by stop");
                break;
            }

            let offset_ms = event.time as f64 * ms_per_tick;
            match event.payload {
                EventPayload::NoteOn {
                    note,
                    velocity,
                    instrument,
                } => {
                    let (waveform, profile) = voice_shape(instrument);
                    let id =
                        backend.begin_note(note, velocity, offset_ms, waveform, profile, event.channel);
                    voices.insert(event.channel, note, id);
                    sink.log(
                        Severity::NoteOn,
                        &format!(
                            "Note On: {} ({}) - channel {} - {}",
                            note_name(note),
                            note,
                            event.channel,
                            instrument_name(instrument)
                        ),
                    );
                }
                EventPayload::NoteOff { note, .. } => {
                    if let Some(id) = voices.remove(event.channel, note) {
                        backend.release_note(id, offset_ms);
                        sink.log(
                            Severity::NoteOff,
                            &format!(
                                "Note Off: {} ({}) - channel {}",
                                note_name(note),
                                note,
                                event.channel
                            ),
                        );
                    }
                }
                // Already folded into the note snapshots at decode time
                EventPayload::ProgramChange { .. } | EventPayload::BankSelect { .. } => {}
            }
        }

        self.total_duration_ms = sequence.last_tick() as f64 * ms_per_tick;
        Ok(self.total_duration_ms)
    }

    /// Cease dispatch; a fresh `play` restarts from tick zero.
    pub fn pause(&mut self) {
        self.handle.stop();
        self.state = Transport::Paused;
    }

    /// Cease dispatch; a fresh `play` restarts from tick zero.
    pub fn stop(&mut self) {
        self.handle.stop();
        self.state = Transport::Stopped;
    }

    /// Mark the playback horizon as passed.
    pub fn finish(&mut self) {
        self.handle.stop();
        self.state = Transport::Idle;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

/// Waveform and envelope for a program number; out-of-range programs
/// render with the defaults.
fn voice_shape(instrument: u8) -> (Waveform, EnvelopeProfile) {
    match classify(instrument) {
        Some(family) => (family.waveform(), family.profile()),
        None => (Waveform::default(), EnvelopeProfile::default()),
    }
}
