//! SMF chunk scanning and event decoding.
//!
//! The scanner tolerates junk between chunks by skipping unrecognized
//! bytes one at a time, and the per-track decoder is a small state
//! machine over (current time, running status). Any read past the end
//! of the buffer ends the affected track and keeps the events already
//! decoded.

use mz_ir::{
    instrument_name, ChannelMap, EventPayload, LogSink, MidiEvent, NullSink, Sequence, Severity,
    Tick,
};

use crate::cursor::{ByteCursor, OutOfBounds};

const MTHD: u32 = 0x4D54_6864;
const MTRK: u32 = 0x4D54_726B;

/// Fixed MThd region: signature + length + format/tracks/division.
/// The division field is not interpreted; timing is configuration.
const HEADER_LEN: usize = 14;

/// Decode an SMF byte buffer into a sorted sequence.
pub fn load_smf(data: &[u8]) -> Sequence {
    load_smf_with_sink(data, &mut NullSink)
}

/// Decode an SMF byte buffer, reporting progress through `sink`.
pub fn load_smf_with_sink(data: &[u8], sink: &mut dyn LogSink) -> Sequence {
    let mut cursor = ByteCursor::new(data);
    let mut channels = ChannelMap::new();
    let mut tracks = Vec::new();

    if cursor.peek_u32_be() == Ok(MTHD) {
        if cursor.skip(HEADER_LEN).is_err() {
            sink.log(Severity::Error, "file ends inside the MThd header");
            return Sequence::empty();
        }
    }

    while cursor.remaining() >= 4 {
        if cursor.peek_u32_be() == Ok(MTRK) {
            tracks.push(decode_track(&mut cursor, &mut channels, sink));
        } else {
            // Not a track start: resync by skipping one byte
            let _ = cursor.skip(1);
        }
    }

    let sequence = Sequence::assemble(tracks, channels);
    sink.log(
        Severity::Success,
        &format!("decoded {} events", sequence.len()),
    );
    sequence
}

/// Decode one `MTrk` chunk. The cursor sits on the signature.
fn decode_track(
    cursor: &mut ByteCursor<'_>,
    channels: &mut ChannelMap,
    sink: &mut dyn LogSink,
) -> Vec<MidiEvent> {
    let mut events = Vec::new();

    let Ok(_signature) = cursor.read_u32_be() else {
        return events;
    };
    let Ok(length) = cursor.read_u32_be() else {
        return events;
    };
    let track_end = cursor.position().saturating_add(length as usize);

    let mut current_time: Tick = 0;
    let mut last_status: u8 = 0;

    while cursor.position() < track_end {
        match decode_event(cursor, channels, &mut current_time, &mut last_status, sink) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            // Truncated input: keep what was already decoded
            Err(OutOfBounds) => break,
        }
    }

    events
}

/// Decode a single delta-time + message pair.
fn decode_event(
    cursor: &mut ByteCursor<'_>,
    channels: &mut ChannelMap,
    current_time: &mut Tick,
    last_status: &mut u8,
    sink: &mut dyn LogSink,
) -> Result<Option<MidiEvent>, OutOfBounds> {
    let delta = cursor.read_vlq()?;
    *current_time += delta as Tick;
    let time = *current_time;

    let first = cursor.peek_u8()?;
    let status = if first & 0x80 != 0 {
        cursor.skip(1)?;
        *last_status = first;
        first
    } else {
        // Running status: the byte stays put as the first data byte
        *last_status
    };

    if (0x80..0xF0).contains(&status) {
        let channel = status & 0x0F;
        return decode_channel_message(cursor, channels, time, status & 0xF0, channel, sink);
    }

    if status == 0xFF {
        // Meta event: type byte + VLQ length + payload, all skipped
        let _meta_type = cursor.read_u8()?;
        let length = cursor.read_vlq()?;
        cursor.skip(length as usize)?;
        return Ok(None);
    }

    // System messages (0xF0-0xFE) carry nothing we decode; a data byte
    // with no prior status is discarded so the scan makes progress.
    if first & 0x80 == 0 {
        cursor.skip(1)?;
    }
    Ok(None)
}

fn decode_channel_message(
    cursor: &mut ByteCursor<'_>,
    channels: &mut ChannelMap,
    time: Tick,
    command: u8,
    channel: u8,
    sink: &mut dyn LogSink,
) -> Result<Option<MidiEvent>, OutOfBounds> {
    let event = match command {
        0x90 => {
            let note = cursor.read_u8()?;
            let velocity = cursor.read_u8()?;
            let instrument = channels.instrument(channel);
            // A note-on with velocity 0 is a note-off on the wire
            let payload = if velocity > 0 {
                EventPayload::NoteOn {
                    note,
                    velocity,
                    instrument,
                }
            } else {
                EventPayload::NoteOff {
                    note,
                    velocity: 0,
                    instrument,
                }
            };
            Some(MidiEvent::new(time, channel, payload))
        }
        0x80 => {
            let note = cursor.read_u8()?;
            let velocity = cursor.read_u8()?;
            Some(MidiEvent::new(
                time,
                channel,
                EventPayload::NoteOff {
                    note,
                    velocity,
                    instrument: channels.instrument(channel),
                },
            ))
        }
        0xB0 => {
            let controller = cursor.read_u8()?;
            let value = cursor.read_u8()?;
            // Only Bank Select MSB is meaningful here
            if controller == 0 {
                channels.set_bank(channel, value);
                Some(MidiEvent::new(
                    time,
                    channel,
                    EventPayload::BankSelect { bank: value },
                ))
            } else {
                None
            }
        }
        0xC0 => {
            let program = cursor.read_u8()?;
            channels.set_instrument(channel, program);
            sink.log(
                Severity::Control,
                &format!(
                    "channel {}: program {} ({})",
                    channel,
                    program,
                    instrument_name(program)
                ),
            );
            Some(MidiEvent::new(
                time,
                channel,
                EventPayload::ProgramChange { program },
            ))
        }
        // Polyphonic aftertouch and pitch bend: two data bytes, no event
        0xA0 | 0xE0 => {
            cursor.skip(2)?;
            None
        }
        // Channel pressure: one data byte, no event
        0xD0 => {
            cursor.skip(1)?;
            None
        }
        _ => None,
    };

    Ok(event)
}
