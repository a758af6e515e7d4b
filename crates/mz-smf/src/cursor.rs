//! Bounds-checked big-endian byte cursor.

use core::fmt;

/// A read would pass the end of the buffer.
///
/// Never fatal: decode loops treat it as "input is truncated here,
/// keep what was already decoded."
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfBounds;

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "read past end of buffer")
    }
}

impl std::error::Error for OutOfBounds {}

/// Longest accepted VLQ encoding. Four 7-bit groups cover every
/// standard delta time; anything longer is treated as complete there.
const MAX_VLQ_BYTES: usize = 4;

/// Sequential reader over an immutable byte buffer.
#[derive(Clone, Copy, Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Read one byte and advance.
    pub fn read_u8(&mut self) -> Result<u8, OutOfBounds> {
        let byte = *self.data.get(self.pos).ok_or(OutOfBounds)?;
        self.pos += 1;
        Ok(byte)
    }

    /// Look at the next byte without advancing.
    pub fn peek_u8(&self) -> Result<u8, OutOfBounds> {
        self.data.get(self.pos).copied().ok_or(OutOfBounds)
    }

    /// Read a big-endian u32 and advance. Fails if fewer than 4 bytes
    /// remain.
    pub fn read_u32_be(&mut self) -> Result<u32, OutOfBounds> {
        let value = self.peek_u32_be()?;
        self.pos += 4;
        Ok(value)
    }

    /// Read a big-endian u32 without advancing.
    pub fn peek_u32_be(&self) -> Result<u32, OutOfBounds> {
        let end = self.pos.checked_add(4).ok_or(OutOfBounds)?;
        let bytes = self.data.get(self.pos..end).ok_or(OutOfBounds)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Advance past `n` bytes. Fails (without moving) if fewer remain.
    pub fn skip(&mut self, n: usize) -> Result<(), OutOfBounds> {
        if n > self.remaining() {
            return Err(OutOfBounds);
        }
        self.pos += n;
        Ok(())
    }

    /// Decode a variable-length quantity: 7 bits per byte, high bit set
    /// on every byte but the last.
    pub fn read_vlq(&mut self) -> Result<u32, OutOfBounds> {
        let mut value: u32 = 0;
        for _ in 0..MAX_VLQ_BYTES {
            let byte = self.read_u8()?;
            value = (value << 7) | (byte & 0x7F) as u32;
            if byte & 0x80 == 0 {
                break;
            }
        }
        Ok(value)
    }
}
