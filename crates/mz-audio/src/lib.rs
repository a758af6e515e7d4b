//! Oscillator synthesis and audio output for the mezzo MIDI player.
//!
//! `OscillatorSynth` turns the engine's timed note requests into
//! frames; `CpalOutput` carries those frames to the default audio
//! device over a lock-free ring buffer.

mod frame;
mod output;
mod synth;

pub use frame::Frame;
pub use output::{AudioError, AudioOutput, CpalOutput};
pub use synth::{OscillatorSynth, VoiceKey};
