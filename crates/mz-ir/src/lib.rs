//! Core IR types for the mezzo MIDI player.
//!
//! This crate defines the intermediate representation shared by the
//! decoder and the playback engine: timed events, the per-channel
//! program/bank table, the assembled sequence, and the General MIDI
//! instrument classification used by the synthesis backend.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod channels;
mod envelope;
mod event;
mod instrument;
mod log;
mod sequence;

pub use channels::{ChannelMap, ChannelSlot, NUM_CHANNELS};
pub use envelope::{gain_at, EnvelopeProfile, GainBreakPoint, GainCurve, RELEASE_SECS};
pub use event::{EventPayload, MidiEvent, Tick};
pub use instrument::{
    classify, instrument_name, note_frequency, note_name, InstrumentFamily, Waveform,
};
pub use log::{LogSink, NullSink, Severity};
pub use sequence::Sequence;
