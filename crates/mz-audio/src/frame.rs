//! Audio frame type.

/// A stereo audio frame (f32 samples in [-1, 1]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    pub left: f32,
    pub right: f32,
}

impl Frame {
    /// Create a silent frame.
    pub const fn silence() -> Self {
        Self {
            left: 0.0,
            right: 0.0,
        }
    }

    /// Create a mono frame (same value for both channels).
    pub const fn mono(value: f32) -> Self {
        Self {
            left: value,
            right: value,
        }
    }

    /// Mix another frame into this one.
    pub fn mix(&mut self, other: Frame) {
        self.left += other.left;
        self.right += other.right;
    }

    /// Clamp both channels into [-1, 1].
    pub fn clamped(self) -> Self {
        Self {
            left: self.left.clamp(-1.0, 1.0),
            right: self.right.clamp(-1.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_sums_channels() {
        let mut a = Frame::mono(0.25);
        a.mix(Frame::mono(0.5));
        assert_eq!(a, Frame::mono(0.75));
    }

    #[test]
    fn clamp_bounds_overdriven_output() {
        let f = Frame { left: 1.7, right: -2.0 }.clamped();
        assert_eq!(f.left, 1.0);
        assert_eq!(f.right, -1.0);
    }
}
