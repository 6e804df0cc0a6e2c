//! Bit payloads and the bounds-checked bit cursor
//!
//! Every AIS message arrives as a string of six-bit "armored"
//! ASCII characters. Once the transport layer has reassembled
//! those characters, they are expanded into a [`BitPayload`].
//! All field extraction then goes through a [`BitCursor`], which
//! owns the only bit arithmetic in this crate and refuses to read
//! past the end of the payload.

use thiserror::Error;

use crate::message::MessageDecodeErr;

/// Bits carried by one armored payload character
pub const SIXBIT_WIDTH: usize = 6;

// Six-bit character table used by AIS text fields
const SIXBIT_TEXT: &[u8; 64] =
    b"@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_ !\"#$%&'()*+,-./0123456789:;<=>?";

/// Requested more bits than the payload has left
///
/// Reported by every [`BitCursor`] read which would cross the
/// end of the payload. The cursor does not advance when this
/// error is returned.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[error("requested {requested} bits but only {remaining} remain")]
pub struct BitsExhausted {
    /// Bits requested by the failing read
    pub requested: usize,

    /// Bits which remained when the read was attempted
    pub remaining: usize,
}

/// A sequence of message bits with its trailing pad
///
/// The payload owns its bits, packed most-significant-bit first.
/// The final `pad` bits exist only to fill out the last armored
/// character. They are never visible to a [`BitCursor`].
///
/// ```
/// use aisarea::BitPayload;
///
/// let payload = BitPayload::from_armored("w7", 2).unwrap();
/// assert_eq!(payload.total_bits(), 12);
/// assert_eq!(payload.len(), 10);
///
/// let mut cursor = payload.cursor();
/// assert_eq!(cursor.take_uint(6).unwrap(), 63);
/// assert_eq!(cursor.remaining_bits(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitPayload {
    bytes: Vec<u8>,
    total_bits: usize,
    pad: u8,
}

impl BitPayload {
    /// Expand six-bit armored characters into a payload
    ///
    /// Each character of `armored` contributes six bits. The
    /// `pad` count, supplied by the transport layer, marks how
    /// many bits at the end of the last character are filler.
    ///
    /// Returns an error if `armored` contains a character outside
    /// the armoring alphabet or if `pad` is not a valid pad count
    /// for the expanded bits.
    pub fn from_armored<S>(armored: S, pad: u8) -> Result<Self, MessageDecodeErr>
    where
        S: AsRef<str>,
    {
        let armored = armored.as_ref();
        let mut out = Self {
            bytes: Vec::with_capacity((armored.len() * SIXBIT_WIDTH + 7) / 8),
            total_bits: 0,
            pad: 0,
        };

        for c in armored.chars() {
            let val = unarmor(c).ok_or(MessageDecodeErr::InvalidArmor(c))?;
            out.push_bits(val as u32, SIXBIT_WIDTH);
        }

        out.with_pad(pad)
    }

    /// Wrap an already-expanded bit buffer
    ///
    /// `bytes` holds `total_bits` bits, most significant bit
    /// first. Any bits in `bytes` past `total_bits` are ignored.
    pub fn from_bytes<B>(bytes: B, total_bits: usize, pad: u8) -> Result<Self, MessageDecodeErr>
    where
        B: Into<Vec<u8>>,
    {
        let bytes = bytes.into();
        if total_bits > bytes.len() * 8 {
            return Err(MessageDecodeErr::TooShort {
                bits: bytes.len() * 8,
                required: total_bits,
            });
        }

        Self {
            bytes,
            total_bits,
            pad: 0,
        }
        .with_pad(pad)
    }

    /// Number of meaningful bits
    ///
    /// The bit count after the pad has been removed.
    pub fn len(&self) -> usize {
        self.total_bits - self.pad as usize
    }

    /// True if there are no meaningful bits
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bits, including the pad
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Declared pad count
    pub fn pad(&self) -> u8 {
        self.pad
    }

    /// New cursor positioned at the first bit
    pub fn cursor(&self) -> BitCursor<'_> {
        BitCursor::new(self)
    }

    // validate and set the pad count
    fn with_pad(mut self, pad: u8) -> Result<Self, MessageDecodeErr> {
        if pad as usize >= SIXBIT_WIDTH || pad as usize > self.total_bits {
            return Err(MessageDecodeErr::InvalidPad(pad));
        }

        self.pad = pad;
        Ok(self)
    }

    // append the low `width` bits of `val`, MSB first; widths
    // past 32 are zero-extended
    fn push_bits(&mut self, val: u32, width: usize) {
        for shift in (0..width).rev() {
            if self.total_bits % 8 == 0 {
                self.bytes.push(0);
            }
            if shift < 32 && (val >> shift) & 1 == 1 {
                let last = self.bytes.len() - 1;
                self.bytes[last] |= 0x80 >> (self.total_bits % 8);
            }
            self.total_bits += 1;
        }
    }

    #[inline]
    fn bit(&self, index: usize) -> u32 {
        ((self.bytes[index / 8] >> (7 - index % 8)) & 1) as u32
    }
}

/// Reads fixed-width fields from a [`BitPayload`]
///
/// The cursor starts at bit zero and advances by the width of
/// each successful read. Reads which would cross the pad boundary
/// fail with [`BitsExhausted`] and leave the cursor where it was.
/// Decoders never need to check
/// [`remaining_bits()`](BitCursor::remaining_bits) before a read.
#[derive(Clone, Debug)]
pub struct BitCursor<'p> {
    payload: &'p BitPayload,
    position: usize,
}

impl<'p> BitCursor<'p> {
    /// Cursor at the start of `payload`
    pub fn new(payload: &'p BitPayload) -> Self {
        Self {
            payload,
            position: 0,
        }
    }

    /// Bits consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bits left before the pad boundary
    pub fn remaining_bits(&self) -> usize {
        self.payload.len() - self.position
    }

    /// Unsigned integer, most significant bit first
    ///
    /// Reads the next `width` bits. `width` may not exceed 32.
    pub fn take_uint(&mut self, width: usize) -> Result<u32, BitsExhausted> {
        assert!(width <= 32, "{}", Self::PANIC_WIDTH);

        let start = self.claim(width)?;
        Ok((start..start + width).fold(0u32, |acc, idx| (acc << 1) | self.payload.bit(idx)))
    }

    /// Two's-complement signed integer
    ///
    /// Reads the next `width` bits and sign-extends them.
    /// `width` may not exceed 32.
    pub fn take_int(&mut self, width: usize) -> Result<i32, BitsExhausted> {
        let raw = self.take_uint(width)?;
        if width == 0 {
            return Ok(0);
        }

        let shift = 32 - width as u32;
        Ok(((raw << shift) as i32) >> shift)
    }

    /// Single-bit flag
    pub fn take_bool(&mut self) -> Result<bool, BitsExhausted> {
        Ok(self.take_uint(1)? == 1)
    }

    /// Six-bit text
    ///
    /// Reads `n_chars` six-bit characters and maps them through
    /// the AIS character table. Trailing `@` fill characters are
    /// removed; spaces are kept.
    pub fn take_text(&mut self, n_chars: usize) -> Result<String, BitsExhausted> {
        let start = self.claim(n_chars * SIXBIT_WIDTH)?;

        let mut text: String = (0..n_chars)
            .map(|i| {
                let offset = start + i * SIXBIT_WIDTH;
                let code = (offset..offset + SIXBIT_WIDTH)
                    .fold(0usize, |acc, idx| (acc << 1) | self.payload.bit(idx) as usize);
                SIXBIT_TEXT[code] as char
            })
            .collect();

        let trimmed = text.trim_end_matches('@').len();
        text.truncate(trimmed);
        Ok(text)
    }

    /// Discard the next `width` bits
    pub fn skip(&mut self, width: usize) -> Result<(), BitsExhausted> {
        self.claim(width).map(|_| ())
    }

    // Reserve `width` bits, returning the starting bit index
    fn claim(&mut self, width: usize) -> Result<usize, BitsExhausted> {
        let remaining = self.remaining_bits();
        if width > remaining {
            return Err(BitsExhausted {
                requested: width,
                remaining,
            });
        }

        let start = self.position;
        self.position += width;
        Ok(start)
    }

    const PANIC_WIDTH: &'static str = "integer fields are at most 32 bits wide";
}

/// Value of one armored payload character
///
/// The armoring alphabet is `0`–`W` followed by `` ` ``–`w`.
/// Returns `None` for anything else.
pub fn unarmor(c: char) -> Option<u8> {
    match c {
        '0'..='W' => Some(c as u8 - b'0'),
        '`'..='w' => Some(c as u8 - b'0' - 8),
        _ => None,
    }
}

/// Builds payloads for tests
#[cfg(test)]
#[derive(Clone, Debug)]
pub(crate) struct BitWriter {
    payload: Option<BitPayload>,
}

#[cfg(test)]
impl BitWriter {
    pub fn new() -> Self {
        Self {
            payload: Some(BitPayload {
                bytes: Vec::new(),
                total_bits: 0,
                pad: 0,
            }),
        }
    }

    pub fn uint(&mut self, val: u32, width: usize) -> &mut Self {
        self.payload.as_mut().unwrap().push_bits(val, width);
        self
    }

    pub fn int(&mut self, val: i32, width: usize) -> &mut Self {
        self.uint(val as u32, width)
    }

    pub fn text(&mut self, text: &str, n_chars: usize) -> &mut Self {
        let mut chars = text.chars();
        for _ in 0..n_chars {
            let code = chars
                .next()
                .map(|c| SIXBIT_TEXT.iter().position(|&t| t as char == c).unwrap())
                .unwrap_or(0);
            self.uint(code as u32, SIXBIT_WIDTH);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.payload.as_ref().unwrap().total_bits
    }

    /// Finish, padding out to a whole armored character
    pub fn finish(&mut self) -> BitPayload {
        let pad = (SIXBIT_WIDTH - self.len() % SIXBIT_WIDTH) % SIXBIT_WIDTH;
        self.uint(0, pad);
        self.payload.take().unwrap().with_pad(pad as u8).unwrap()
    }
}
