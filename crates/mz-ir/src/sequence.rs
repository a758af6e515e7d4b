//! The assembled, time-ordered event sequence.

use alloc::vec::Vec;

use crate::channels::ChannelMap;
use crate::event::{MidiEvent, Tick};

/// All events from all tracks, sorted ascending by tick.
///
/// Assembled once per successful decode and immutable afterwards;
/// re-decoding replaces the whole value. Ties on the same tick keep
/// track scan order (stable sort).
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    events: Vec<MidiEvent>,
    /// Final per-channel instrument/bank assignments, for diagnostics.
    channels: ChannelMap,
}

impl Sequence {
    /// Create an empty sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge per-track event lists (in scan order) into one sorted
    /// sequence, recording the final channel table.
    pub fn assemble(tracks: Vec<Vec<MidiEvent>>, channels: ChannelMap) -> Self {
        let total = tracks.iter().map(Vec::len).sum();
        let mut events = Vec::with_capacity(total);
        for track in tracks {
            events.extend(track);
        }
        // Stable: events on the same tick keep decode order
        events.sort_by_key(|e| e.time);

        Self { events, channels }
    }

    /// The sorted events.
    pub fn events(&self) -> &[MidiEvent] {
        &self.events
    }

    /// The final channel instrument/bank table.
    pub fn channels(&self) -> &ChannelMap {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Tick of the last event, or 0 for an empty sequence.
    pub fn last_tick(&self) -> Tick {
        self.events.last().map(|e| e.time).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventPayload;
    use alloc::vec;

    fn note_on(time: Tick, channel: u8, note: u8) -> MidiEvent {
        MidiEvent::new(
            time,
            channel,
            EventPayload::NoteOn {
                note,
                velocity: 100,
                instrument: 0,
            },
        )
    }

    #[test]
    fn assemble_sorts_across_tracks() {
        let track_a = vec![note_on(0, 0, 60), note_on(960, 0, 64)];
        let track_b = vec![note_on(480, 1, 62)];

        let seq = Sequence::assemble(vec![track_a, track_b], ChannelMap::new());

        let times: Vec<Tick> = seq.events().iter().map(|e| e.time).collect();
        assert_eq!(times, vec![0, 480, 960]);
    }

    #[test]
    fn ties_keep_scan_order() {
        // Two tracks with events on the same tick: track order wins
        let track_a = vec![note_on(100, 0, 60)];
        let track_b = vec![note_on(100, 1, 62)];

        let seq = Sequence::assemble(vec![track_a, track_b], ChannelMap::new());

        assert_eq!(seq.events()[0].channel, 0);
        assert_eq!(seq.events()[1].channel, 1);
    }

    #[test]
    fn last_tick_of_empty_is_zero() {
        assert_eq!(Sequence::empty().last_tick(), 0);
        assert!(Sequence::empty().is_empty());
    }

    #[test]
    fn last_tick_is_max_time() {
        let seq = Sequence::assemble(
            vec![vec![note_on(0, 0, 60), note_on(480, 0, 60)]],
            ChannelMap::new(),
        );
        assert_eq!(seq.last_tick(), 480);
    }
}
