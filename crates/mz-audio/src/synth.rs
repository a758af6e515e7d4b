//! Frame-scheduled oscillator synthesis.
//!
//! Implements the engine's `SynthBackend` over a bank of phase
//! accumulator oscillators. Requests arrive with millisecond offsets
//! relative to the playback anchor; the synth converts them to frame
//! counts and the render loop turns scheduled voices on and off as its
//! frame clock passes their deadlines.

use mz_engine::SynthBackend;
use mz_ir::{note_frequency, EnvelopeProfile, GainCurve, Waveform, RELEASE_SECS};
use slotmap::SlotMap;

use crate::frame::Frame;

slotmap::new_key_type! {
    /// Stable handle for one scheduled voice.
    pub struct VoiceKey;
}

/// Headroom applied to every voice so chords stay under full scale.
const MASTER_GAIN: f32 = 0.25;

#[derive(Clone, Debug)]
struct Voice {
    frequency: f32,
    waveform: Waveform,
    curve: GainCurve,
    /// Frame at which the voice starts sounding.
    start_frame: u64,
    /// Frame at which the release ramp begins. Defaults to the
    /// envelope's duration cap; an explicit note-off can pull it in.
    release_frame: u64,
    /// Oscillator phase in [0, 1).
    phase: f32,
}

impl Voice {
    fn end_frame(&self, sample_rate: u32) -> u64 {
        self.release_frame + (RELEASE_SECS * sample_rate as f32) as u64
    }

    /// Envelope gain at an absolute frame position.
    fn gain(&self, frame: u64, sample_rate: u32) -> f32 {
        if frame < self.start_frame {
            return 0.0;
        }
        let secs = (frame - self.start_frame) as f32 / sample_rate as f32;
        if frame < self.release_frame {
            return self.curve.gain_at(secs);
        }
        let held_secs = (self.release_frame - self.start_frame) as f32 / sample_rate as f32;
        let into_release = secs - held_secs;
        let ramp = 1.0 - (into_release / RELEASE_SECS).min(1.0);
        self.curve.gain_at(held_secs) * ramp
    }

    /// Advance the oscillator one frame and return its sample.
    fn tick(&mut self, sample_rate: u32) -> f32 {
        let sample = match self.waveform {
            Waveform::Sine => (self.phase * core::f32::consts::TAU).sin(),
            Waveform::Triangle => {
                if self.phase < 0.5 {
                    4.0 * self.phase - 1.0
                } else {
                    3.0 - 4.0 * self.phase
                }
            }
            Waveform::Sawtooth => 2.0 * self.phase - 1.0,
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        };

        self.phase += self.frequency / sample_rate as f32;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        sample
    }
}

/// Oscillator bank driven by a frame clock.
///
/// `begin_note` and `release_note` only record deadlines; all sound is
/// produced by `render`, which mixes every voice whose window overlaps
/// the current frame and reaps voices whose release ramp has finished.
pub struct OscillatorSynth {
    sample_rate: u32,
    voices: SlotMap<VoiceKey, Voice>,
    frame_clock: u64,
}

impl OscillatorSynth {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            voices: SlotMap::with_key(),
            frame_clock: 0,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frames rendered since creation.
    pub fn position(&self) -> u64 {
        self.frame_clock
    }

    /// Voices still scheduled or sounding.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Whether every scheduled voice has finished its release ramp.
    pub fn is_quiet(&self) -> bool {
        self.voices.is_empty()
    }

    fn frame_at(&self, offset_ms: f64) -> u64 {
        self.frame_clock + (offset_ms.max(0.0) / 1000.0 * self.sample_rate as f64) as u64
    }

    /// Render the next block of frames, advancing the frame clock.
    pub fn render(&mut self, out: &mut [Frame]) {
        for frame_out in out.iter_mut() {
            let frame = self.frame_clock;
            let mut mixed = 0.0f32;

            for voice in self.voices.values_mut() {
                if frame < voice.start_frame {
                    continue;
                }
                let gain = voice.gain(frame, self.sample_rate);
                mixed += voice.tick(self.sample_rate) * gain * MASTER_GAIN;
            }

            *frame_out = Frame::mono(mixed).clamped();
            self.frame_clock += 1;
        }

        let rate = self.sample_rate;
        let now = self.frame_clock;
        self.voices.retain(|_, v| v.end_frame(rate) > now);
    }
}

impl SynthBackend for OscillatorSynth {
    type VoiceId = VoiceKey;

    fn begin_note(
        &mut self,
        note: u8,
        velocity: u8,
        offset_ms: f64,
        waveform: Waveform,
        profile: EnvelopeProfile,
        _channel: u8,
    ) -> VoiceKey {
        let start_frame = self.frame_at(offset_ms);
        let cap_frames = (profile.duration_secs * self.sample_rate as f32) as u64;
        self.voices.insert(Voice {
            frequency: note_frequency(note),
            waveform,
            curve: profile.curve(velocity),
            start_frame,
            release_frame: start_frame + cap_frames,
            phase: 0.0,
        })
    }

    fn release_note(&mut self, voice: VoiceKey, offset_ms: f64) {
        let release_frame = self.frame_at(offset_ms);
        if let Some(v) = self.voices.get_mut(voice) {
            // The duration cap still wins if it comes first
            v.release_frame = v.release_frame.min(release_frame.max(v.start_frame));
        }
    }
}
