//! Standard MIDI File decoder for the mezzo MIDI player.
//!
//! Turns an SMF byte buffer into an `mz_ir::Sequence`. Decoding never
//! fails outright: truncated input ends the affected track early and
//! unrecognized bytes between chunks are skipped, so the caller always
//! gets back whatever was readable.

mod cursor;
mod decoder;

pub use cursor::{ByteCursor, OutOfBounds};
pub use decoder::{load_smf, load_smf_with_sink};
