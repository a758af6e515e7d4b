//! Integration tests for the SMF decoder against synthetic fixtures.

use mz_ir::{EventPayload, LogSink, Severity};
use mz_smf::{load_smf, load_smf_with_sink};

fn header(num_tracks: u16) -> Vec<u8> {
    let mut bytes = vec![0x4D, 0x54, 0x68, 0x64];
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&1u16.to_be_bytes()); // format 1
    bytes.extend_from_slice(&num_tracks.to_be_bytes());
    bytes.extend_from_slice(&480u16.to_be_bytes());
    bytes
}

fn track(data: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0x4D, 0x54, 0x72, 0x6B];
    bytes.extend_from_slice(&(data.len() as u32).to_be_bytes());
    bytes.extend_from_slice(data);
    bytes
}

/// A two-track fixture: melody on channel 0 (program 24), bass on
/// channel 1 (program 32), overlapping in time.
fn two_track_fixture() -> Vec<u8> {
    let mut bytes = header(2);
    bytes.extend_from_slice(&track(&[
        0x00, 0xC0, 24, // program change: guitar
        0x00, 0x90, 60, 100, // C4 on
        0x83, 0x60, 0x80, 60, 0, // C4 off at tick 480
        0x00, 0x90, 64, 90, // E4 on
        0x83, 0x60, 0x80, 64, 0, // E4 off at tick 960
    ]));
    bytes.extend_from_slice(&track(&[
        0x00, 0xC1, 32, // program change: bass
        0x60, 0x91, 36, 110, // C2 on at tick 96
        0x87, 0x40, 0x81, 36, 0, // C2 off at tick 1056
    ]));
    bytes
}

#[test]
fn two_track_fixture_is_time_sorted() {
    let seq = load_smf(&two_track_fixture());

    let times: Vec<u64> = seq.events().iter().map(|e| e.time).collect();
    let mut sorted = times.clone();
    sorted.sort();
    assert_eq!(times, sorted, "sequence must be non-decreasing in time");
}

#[test]
fn two_track_fixture_structure() {
    let seq = load_smf(&two_track_fixture());

    // 2 program changes + 4 note-ons/offs on ch0 + 2 on ch1
    assert_eq!(seq.len(), 8);

    let note_ons = seq
        .events()
        .iter()
        .filter(|e| matches!(e.payload, EventPayload::NoteOn { .. }))
        .count();
    let note_offs = seq
        .events()
        .iter()
        .filter(|e| matches!(e.payload, EventPayload::NoteOff { .. }))
        .count();
    assert_eq!(note_ons, 3);
    assert_eq!(note_offs, 3);

    assert_eq!(seq.last_tick(), 1056);
}

#[test]
fn two_track_fixture_instrument_snapshots() {
    let seq = load_smf(&two_track_fixture());

    for event in seq.events() {
        match event.payload {
            EventPayload::NoteOn { instrument, .. }
            | EventPayload::NoteOff { instrument, .. } => {
                let expected = match event.channel {
                    0 => 24,
                    1 => 32,
                    ch => panic!("unexpected channel {}", ch),
                };
                assert_eq!(instrument, expected);
            }
            _ => {}
        }
    }

    assert_eq!(seq.channels().instrument(0), 24);
    assert_eq!(seq.channels().instrument(1), 32);
    assert_eq!(seq.channels().instrument(2), 0);
}

#[test]
fn same_tick_events_keep_scan_order() {
    // Both tracks fire at tick 0; track order must survive the sort
    let mut bytes = header(2);
    bytes.extend_from_slice(&track(&[0x00, 0x90, 60, 100]));
    bytes.extend_from_slice(&track(&[0x00, 0x91, 62, 100]));

    let seq = load_smf(&bytes);
    assert_eq!(seq.events()[0].channel, 0);
    assert_eq!(seq.events()[1].channel, 1);
}

#[test]
fn truncation_mid_file_keeps_readable_prefix() {
    let full = two_track_fixture();
    let seq_full = load_smf(&full);

    // Cut the stream in the middle of the second track
    let cut = &full[..full.len() - 5];
    let seq_cut = load_smf(cut);

    assert!(seq_cut.len() < seq_full.len());
    assert!(!seq_cut.is_empty());
    // Everything decoded from the prefix also appears in the full decode
    for event in seq_cut.events() {
        assert!(seq_full.events().contains(event));
    }
}

#[test]
fn decode_reports_through_sink() {
    struct Capture(Vec<(Severity, String)>);
    impl LogSink for Capture {
        fn log(&mut self, severity: Severity, message: &str) {
            self.0.push((severity, message.to_string()));
        }
    }

    let mut sink = Capture(Vec::new());
    let seq = load_smf_with_sink(&two_track_fixture(), &mut sink);

    assert!(!seq.is_empty());
    assert!(sink
        .0
        .iter()
        .any(|(sev, msg)| *sev == Severity::Success && msg.contains("8 events")));
    // Program changes are reported with their GM names
    assert!(sink
        .0
        .iter()
        .any(|(sev, msg)| *sev == Severity::Control && msg.contains("Acoustic Bass")));
}

#[test]
fn garbage_only_input_is_empty_and_quiet() {
    let seq = load_smf(&[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x42]);
    assert!(seq.is_empty());
}
