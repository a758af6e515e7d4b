//! Transport state machine.

/// Playback lifecycle state.
///
/// `Paused` and `Stopped` both cease dispatch; neither supports
/// resuming mid-stream, so the only way forward from either is a fresh
/// `play` from tick zero. The distinction is kept for callers that
/// display it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transport {
    /// Nothing scheduled or playback horizon passed.
    #[default]
    Idle,
    /// A play pass has dispatched (or is dispatching) events.
    Playing,
    /// Dispatch ceased by `pause`.
    Paused,
    /// Dispatch ceased by `stop`.
    Stopped,
}

impl Transport {
    /// Whether a play pass is in effect.
    pub fn is_playing(self) -> bool {
        self == Transport::Playing
    }

    /// Whether a new `play` call is acceptable from this state.
    pub fn can_play(self) -> bool {
        !self.is_playing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(Transport::default(), Transport::Idle);
        assert!(Transport::Idle.can_play());
    }

    #[test]
    fn playing_blocks_replay() {
        assert!(!Transport::Playing.can_play());
        assert!(Transport::Paused.can_play());
        assert!(Transport::Stopped.can_play());
    }
}
