//! Amplitude envelopes for synthesized notes.
//!
//! An `EnvelopeProfile` is the per-family attack/decay/sustain shape;
//! applying a note velocity turns it into a `GainCurve` of breakpoints
//! that the backend samples while the note sounds.

use arrayvec::ArrayVec;

/// Maximum breakpoints per gain curve. Attack/decay/sustain plus the
/// duration hold fits in four.
pub const MAX_BREAKPOINTS: usize = 4;

/// Seconds a released note takes to ramp to silence.
pub const RELEASE_SECS: f32 = 0.5;

/// Per-family amplitude envelope shape.
///
/// `peak_scale` multiplies the normalized velocity (velocity / 127) to
/// give the attack peak; a zero attack means the curve starts at the
/// peak (flat organ-style sustain).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeProfile {
    pub attack_secs: f32,
    pub decay_secs: f32,
    pub peak_scale: f32,
    pub sustain_level: f32,
    /// Cap on how long the note sounds without an explicit note-off.
    pub duration_secs: f32,
}

impl Default for EnvelopeProfile {
    fn default() -> Self {
        Self {
            attack_secs: 0.01,
            decay_secs: 0.1,
            peak_scale: 0.5,
            sustain_level: 0.3,
            duration_secs: 1.0,
        }
    }
}

/// A breakpoint in a gain curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainBreakPoint {
    /// Seconds from note start.
    pub at_secs: f32,
    /// Gain value at this point.
    pub gain: f32,
}

/// Piecewise-linear gain over time, sampled by the backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GainCurve {
    pub points: ArrayVec<GainBreakPoint, MAX_BREAKPOINTS>,
}

impl EnvelopeProfile {
    /// Build the gain curve for a note with the given velocity (0-127).
    pub fn curve(&self, velocity: u8) -> GainCurve {
        let peak = (velocity.min(127) as f32 / 127.0) * self.peak_scale;
        let mut points = ArrayVec::new();

        if self.attack_secs <= 0.0 {
            // Flat sustain from the start (organ family)
            points.push(GainBreakPoint { at_secs: 0.0, gain: peak });
        } else {
            points.push(GainBreakPoint { at_secs: 0.0, gain: 0.0 });
            points.push(GainBreakPoint {
                at_secs: self.attack_secs,
                gain: peak,
            });
            points.push(GainBreakPoint {
                at_secs: self.attack_secs + self.decay_secs,
                gain: self.sustain_level,
            });
        }

        GainCurve { points }
    }
}

impl GainCurve {
    /// Gain at `t` seconds from note start. Holds the last breakpoint's
    /// value past the end of the curve.
    pub fn gain_at(&self, t: f32) -> f32 {
        gain_at(&self.points, t)
    }
}

/// Sample a piecewise-linear breakpoint list at time `t`.
pub fn gain_at(points: &[GainBreakPoint], t: f32) -> f32 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    if t <= first.at_secs {
        return first.gain;
    }

    let mut prev = first;
    for point in points {
        if point.at_secs > t {
            let span = point.at_secs - prev.at_secs;
            if span <= 0.0 {
                return point.gain;
            }
            let frac = (t - prev.at_secs) / span;
            return prev.gain + (point.gain - prev.gain) * frac;
        }
        prev = point;
    }

    prev.gain
}
