//! Active-voice tracking keyed by (channel, note).

use mz_ir::NUM_CHANNELS;

const NOTES_PER_CHANNEL: usize = 128;

/// Table of currently sounding voices.
///
/// At most one voice is tracked per (channel, note) pair; inserting
/// over an occupied slot replaces the tracking entry and hands the old
/// handle back to the caller. The superseded sound is not silenced,
/// only forgotten.
#[derive(Clone, Debug)]
pub struct VoiceTable<H> {
    slots: Vec<Option<H>>,
}

impl<H: Copy> VoiceTable<H> {
    pub fn new() -> Self {
        Self {
            slots: vec![None; NUM_CHANNELS * NOTES_PER_CHANNEL],
        }
    }

    fn index(channel: u8, note: u8) -> usize {
        (channel as usize % NUM_CHANNELS) * NOTES_PER_CHANNEL + (note as usize % NOTES_PER_CHANNEL)
    }

    /// Track a voice, returning any handle it displaced.
    pub fn insert(&mut self, channel: u8, note: u8, handle: H) -> Option<H> {
        self.slots[Self::index(channel, note)].replace(handle)
    }

    /// Look up the tracked voice without removing it.
    pub fn get(&self, channel: u8, note: u8) -> Option<H> {
        self.slots[Self::index(channel, note)]
    }

    /// Stop tracking and return the voice for a note-off.
    pub fn remove(&mut self, channel: u8, note: u8) -> Option<H> {
        self.slots[Self::index(channel, note)].take()
    }

    /// Forget all voices (playback stop).
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Number of tracked voices.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl<H: Copy> Default for VoiceTable<H> {
    fn default() -> Self {
        Self::new()
    }
}
