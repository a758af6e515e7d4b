//! Per-channel program and bank state.

/// Number of MIDI channels.
pub const NUM_CHANNELS: usize = 16;

/// One channel's current program and bank selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelSlot {
    /// General MIDI program number (0 = Acoustic Grand Piano)
    pub instrument: u8,
    /// Bank Select MSB value
    pub bank: u8,
}

/// The 16-channel program/bank table.
///
/// Mutated only while decoding; after decode it is a read-only record
/// of each channel's final instrument assignment, kept alongside the
/// sequence for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelMap {
    slots: [ChannelSlot; NUM_CHANNELS],
}

impl ChannelMap {
    /// Create a table with all channels at program 0, bank 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The channel's current program number. Channels out of range
    /// read as the default slot.
    pub fn instrument(&self, channel: u8) -> u8 {
        self.slot(channel).instrument
    }

    /// The channel's current bank value.
    pub fn bank(&self, channel: u8) -> u8 {
        self.slot(channel).bank
    }

    /// Record a Program Change on a channel.
    pub fn set_instrument(&mut self, channel: u8, program: u8) {
        if let Some(slot) = self.slots.get_mut(channel as usize) {
            slot.instrument = program;
        }
    }

    /// Record a Bank Select (controller 0) on a channel.
    pub fn set_bank(&mut self, channel: u8, bank: u8) {
        if let Some(slot) = self.slots.get_mut(channel as usize) {
            slot.bank = bank;
        }
    }

    fn slot(&self, channel: u8) -> ChannelSlot {
        self.slots
            .get(channel as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Iterate over (channel, slot) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u8, ChannelSlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (i as u8, *slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_piano_bank_zero() {
        let map = ChannelMap::new();
        for ch in 0..NUM_CHANNELS as u8 {
            assert_eq!(map.instrument(ch), 0);
            assert_eq!(map.bank(ch), 0);
        }
    }

    #[test]
    fn program_change_touches_only_its_channel() {
        let mut map = ChannelMap::new();
        map.set_instrument(2, 40);

        assert_eq!(map.instrument(2), 40);
        for ch in (0..NUM_CHANNELS as u8).filter(|&c| c != 2) {
            assert_eq!(map.instrument(ch), 0);
        }
    }

    #[test]
    fn bank_select_is_independent_of_program() {
        let mut map = ChannelMap::new();
        map.set_bank(5, 1);
        assert_eq!(map.bank(5), 1);
        assert_eq!(map.instrument(5), 0);
    }

    #[test]
    fn out_of_range_channel_is_ignored() {
        let mut map = ChannelMap::new();
        map.set_instrument(16, 99);
        assert_eq!(map.instrument(16), 0);
    }
}
