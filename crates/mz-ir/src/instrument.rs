//! General MIDI instrument classification.
//!
//! Maps a program number (0-127) to an instrument family, and a family
//! to the waveform and envelope profile the synthesis backend renders
//! with. The mapping is a fixed lookup, never stateful.

use alloc::borrow::Cow;
use alloc::format;

use crate::envelope::EnvelopeProfile;

/// The sixteen General MIDI instrument families, eight programs each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstrumentFamily {
    Piano,
    ChromaticPercussion,
    Organ,
    Guitar,
    Bass,
    Strings,
    Ensemble,
    Brass,
    Reed,
    Pipe,
    SynthLead,
    SynthPad,
    SynthEffects,
    Ethnic,
    Percussive,
    SoundEffects,
}

/// Oscillator waveform category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

/// Classify a program number into its family.
///
/// Returns `None` for values above 127, which callers treat as "use the
/// default waveform and profile."
pub fn classify(program: u8) -> Option<InstrumentFamily> {
    use InstrumentFamily::*;
    let family = match program >> 3 {
        0 => Piano,
        1 => ChromaticPercussion,
        2 => Organ,
        3 => Guitar,
        4 => Bass,
        5 => Strings,
        6 => Ensemble,
        7 => Brass,
        8 => Reed,
        9 => Pipe,
        10 => SynthLead,
        11 => SynthPad,
        12 => SynthEffects,
        13 => Ethnic,
        14 => Percussive,
        15 => SoundEffects,
        _ => return None,
    };
    Some(family)
}

impl InstrumentFamily {
    /// The waveform category the family is rendered with.
    pub fn waveform(self) -> Waveform {
        use InstrumentFamily::*;
        match self {
            ChromaticPercussion => Waveform::Triangle,
            Organ | Guitar | SynthLead | SynthEffects => Waveform::Sawtooth,
            Percussive => Waveform::Square,
            Piano | Bass | Strings | Ensemble | Brass | Reed | Pipe | SynthPad | Ethnic
            | SoundEffects => Waveform::Sine,
        }
    }

    /// The amplitude envelope profile the family is rendered with.
    pub fn profile(self) -> EnvelopeProfile {
        use InstrumentFamily::*;
        match self {
            Piano => EnvelopeProfile {
                attack_secs: 0.01,
                decay_secs: 0.1,
                peak_scale: 0.8,
                sustain_level: 0.3,
                duration_secs: 1.0,
            },
            Organ => EnvelopeProfile {
                attack_secs: 0.0,
                decay_secs: 0.0,
                peak_scale: 0.6,
                sustain_level: 0.6,
                duration_secs: 2.0,
            },
            Guitar => EnvelopeProfile {
                attack_secs: 0.05,
                decay_secs: 0.15,
                peak_scale: 0.7,
                sustain_level: 0.3,
                duration_secs: 0.8,
            },
            Strings => EnvelopeProfile {
                duration_secs: 1.5,
                ..EnvelopeProfile::default()
            },
            Brass => EnvelopeProfile {
                duration_secs: 1.2,
                ..EnvelopeProfile::default()
            },
            _ => EnvelopeProfile::default(),
        }
    }
}

/// Frequency in Hz for a MIDI note number (A4 = note 69 = 440 Hz).
pub fn note_frequency(note: u8) -> f32 {
    440.0 * libm::powf(2.0, (note as f32 - 69.0) / 12.0)
}

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Human-readable note name, e.g. `note_name(60) == "C4"`.
pub fn note_name(note: u8) -> Cow<'static, str> {
    let octave = (note / 12) as i16 - 1;
    Cow::Owned(format!("{}{}", NOTE_NAMES[(note % 12) as usize], octave))
}

/// Human-readable General MIDI program name.
///
/// Programs above 127 fall back to a numbered placeholder.
pub fn instrument_name(program: u8) -> Cow<'static, str> {
    match GM_NAMES.get(program as usize) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("Instrument {}", program)),
    }
}

const GM_NAMES: [&str; 128] = [
    "Acoustic Grand Piano",
    "Bright Acoustic Piano",
    "Electric Grand Piano",
    "Honky-tonk Piano",
    "Electric Piano 1",
    "Electric Piano 2",
    "Harpsichord",
    "Clavi",
    "Celesta",
    "Glockenspiel",
    "Music Box",
    "Vibraphone",
    "Marimba",
    "Xylophone",
    "Tubular Bells",
    "Dulcimer",
    "Drawbar Organ",
    "Percussive Organ",
    "Rock Organ",
    "Church Organ",
    "Reed Organ",
    "Accordion",
    "Harmonica",
    "Tango Accordion",
    "Acoustic Guitar (nylon)",
    "Acoustic Guitar (steel)",
    "Electric Guitar (jazz)",
    "Electric Guitar (clean)",
    "Electric Guitar (muted)",
    "Overdriven Guitar",
    "Distortion Guitar",
    "Guitar harmonics",
    "Acoustic Bass",
    "Electric Bass (finger)",
    "Electric Bass (pick)",
    "Fretless Bass",
    "Slap Bass 1",
    "Slap Bass 2",
    "Synth Bass 1",
    "Synth Bass 2",
    "Violin",
    "Viola",
    "Cello",
    "Contrabass",
    "Tremolo Strings",
    "Pizzicato Strings",
    "Orchestral Harp",
    "Timpani",
    "String Ensemble 1",
    "String Ensemble 2",
    "SynthStrings 1",
    "SynthStrings 2",
    "Choir Aahs",
    "Voice Oohs",
    "Synth Voice",
    "Orchestra Hit",
    "Trumpet",
    "Trombone",
    "Tuba",
    "Muted Trumpet",
    "French Horn",
    "Brass Section",
    "SynthBrass 1",
    "SynthBrass 2",
    "Soprano Sax",
    "Alto Sax",
    "Tenor Sax",
    "Baritone Sax",
    "Oboe",
    "English Horn",
    "Bassoon",
    "Clarinet",
    "Piccolo",
    "Flute",
    "Recorder",
    "Pan Flute",
    "Blown Bottle",
    "Shakuhachi",
    "Whistle",
    "Ocarina",
    "Lead 1 (square)",
    "Lead 2 (sawtooth)",
    "Lead 3 (calliope)",
    "Lead 4 (chiff)",
    "Lead 5 (charang)",
    "Lead 6 (voice)",
    "Lead 7 (fifths)",
    "Lead 8 (bass + lead)",
    "Pad 1 (new age)",
    "Pad 2 (warm)",
    "Pad 3 (polysynth)",
    "Pad 4 (choir)",
    "Pad 5 (bowed)",
    "Pad 6 (metallic)",
    "Pad 7 (halo)",
    "Pad 8 (sweep)",
    "FX 1 (rain)",
    "FX 2 (soundtrack)",
    "FX 3 (crystal)",
    "FX 4 (atmosphere)",
    "FX 5 (brightness)",
    "FX 6 (goblins)",
    "FX 7 (echoes)",
    "FX 8 (sci-fi)",
    "Sitar",
    "Banjo",
    "Shamisen",
    "Koto",
    "Kalimba",
    "Bag pipe",
    "Fiddle",
    "Shanai",
    "Tinkle Bell",
    "Agogo",
    "Steel Drums",
    "Woodblock",
    "Taiko Drum",
    "Melodic Tom",
    "Synth Drum",
    "Reverse Cymbal",
    "Guitar Fret Noise",
    "Breath Noise",
    "Seashore",
    "Bird Tweet",
    "Telephone Ring",
    "Helicopter",
    "Applause",
    "Gunshot",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_gm_program_has_exactly_one_family() {
        for program in 0u8..=127 {
            let family = classify(program).expect("GM program must classify");
            // The family's range covers the program
            assert_eq!(classify(program & !0x07), Some(family));
        }
    }

    #[test]
    fn programs_above_gm_range_do_not_classify() {
        assert_eq!(classify(128), None);
        assert_eq!(classify(255), None);
    }

    #[test]
    fn family_boundaries() {
        assert_eq!(classify(0), Some(InstrumentFamily::Piano));
        assert_eq!(classify(7), Some(InstrumentFamily::Piano));
        assert_eq!(classify(8), Some(InstrumentFamily::ChromaticPercussion));
        assert_eq!(classify(16), Some(InstrumentFamily::Organ));
        assert_eq!(classify(24), Some(InstrumentFamily::Guitar));
        assert_eq!(classify(40), Some(InstrumentFamily::Strings));
        assert_eq!(classify(112), Some(InstrumentFamily::Percussive));
        assert_eq!(classify(127), Some(InstrumentFamily::SoundEffects));
    }

    #[test]
    fn waveform_table_matches_families() {
        assert_eq!(InstrumentFamily::Piano.waveform(), Waveform::Sine);
        assert_eq!(
            InstrumentFamily::ChromaticPercussion.waveform(),
            Waveform::Triangle
        );
        assert_eq!(InstrumentFamily::Organ.waveform(), Waveform::Sawtooth);
        assert_eq!(InstrumentFamily::Guitar.waveform(), Waveform::Sawtooth);
        assert_eq!(InstrumentFamily::SynthLead.waveform(), Waveform::Sawtooth);
        assert_eq!(InstrumentFamily::Percussive.waveform(), Waveform::Square);
        assert_eq!(InstrumentFamily::SynthPad.waveform(), Waveform::Sine);
    }

    #[test]
    fn duration_caps_per_family() {
        assert_eq!(InstrumentFamily::Piano.profile().duration_secs, 1.0);
        assert_eq!(InstrumentFamily::Organ.profile().duration_secs, 2.0);
        assert_eq!(InstrumentFamily::Guitar.profile().duration_secs, 0.8);
        assert_eq!(InstrumentFamily::Strings.profile().duration_secs, 1.5);
        assert_eq!(InstrumentFamily::Brass.profile().duration_secs, 1.2);
        assert_eq!(InstrumentFamily::Reed.profile().duration_secs, 1.0);
    }

    #[test]
    fn a4_is_440hz() {
        assert!((note_frequency(69) - 440.0).abs() < 0.001);
    }

    #[test]
    fn octave_doubles_frequency() {
        let a4 = note_frequency(69);
        let a5 = note_frequency(81);
        assert!((a5 - a4 * 2.0).abs() < 0.01);
    }

    #[test]
    fn middle_c_name() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(61), "C#4");
        assert_eq!(note_name(0), "C-1");
    }

    #[test]
    fn instrument_names() {
        assert_eq!(instrument_name(0), "Acoustic Grand Piano");
        assert_eq!(instrument_name(40), "Violin");
        assert_eq!(instrument_name(127), "Gunshot");
        assert_eq!(instrument_name(200), "Instrument 200");
    }
}
