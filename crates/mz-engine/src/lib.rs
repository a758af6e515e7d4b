//! Playback scheduling engine for the mezzo MIDI player.
//!
//! Converts a decoded sequence's tick times into wall-clock offsets and
//! dispatches timed note requests to a synthesis backend.

mod backend;
mod player;
mod transport;
mod voice_table;

pub use backend::SynthBackend;
pub use player::{PlaybackConfig, PlayError, Player, StopHandle};
pub use transport::Transport;
pub use voice_table::VoiceTable;
