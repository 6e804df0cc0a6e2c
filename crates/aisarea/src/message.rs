//! Message dispatch and decoding errors

use std::fmt;

use log::debug;
use thiserror::Error;

use crate::bits::{BitPayload, BitsExhausted};
use crate::header::{
    check_length, ApplicationId, BinaryHeader, MessageHeader, BINARY_BROADCAST_ID,
};
use crate::notice::AreaNotice;
use crate::subarea::ShapeKind;

/// A decoded AIS message
///
/// Only the Area Notice (8:1:22) is decoded in full. All other
/// messages are reported by their header, so that callers may
/// count or log them.
///
/// ```
/// use aisarea::{BitPayload, Message};
///
/// let payload = BitPayload::from_armored(
///     "803Ovrh0EPM0WB0h2l0MwJUi=6B4G9000aip8<2Bt2Hq2Qhp",
///     0,
/// ).unwrap();
///
/// match Message::decode(&payload).expect("decode failed") {
///     Message::AreaNotice(notice) => assert_eq!(notice.mmsi(), 3669739),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    /// IMO Area Notice, 8:1:22
    AreaNotice(AreaNotice),

    /// Binary broadcast for some other application
    BinaryBroadcast(BinaryHeader),

    /// Any other message type
    Other(MessageHeader),
}

/// Error decoding a message
///
/// Any error means that *no* message was decoded. Decoding stops
/// at the first problem; the partially-decoded message is
/// discarded.
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageDecodeErr {
    /// The pad count is six or more, or exceeds the payload
    #[error("invalid AIS payload: pad count {0} is not valid")]
    InvalidPad(u8),

    /// The payload contains a character outside the armoring alphabet
    #[error("invalid AIS payload: character {0:?} is not six-bit armored")]
    InvalidArmor(char),

    /// The payload is shorter than the minimum for its message
    #[error("invalid AIS message: {bits} bits is shorter than the required {required}")]
    TooShort {
        /// Bits in the payload, excluding pad
        bits: usize,

        /// Minimum required
        required: usize,
    },

    /// The payload is longer than any AIS message can be
    #[error("invalid AIS message: {bits} bits is longer than any message")]
    TooLong {
        /// Bits in the payload, excluding pad
        bits: usize,
    },

    /// A field extends past the end of the payload
    #[error("invalid AIS message: {0}")]
    BitsExhausted(#[from] BitsExhausted),

    /// The decoder was given the wrong message type
    #[error("invalid AIS message: unexpected message type {0}")]
    WrongMessageType(u8),

    /// The decoder was given the wrong application
    #[error("invalid AIS message: unexpected application {dac}:{fi}")]
    WrongApplication {
        /// Designated Area Code
        dac: u16,

        /// Function Identifier
        fi: u8,
    },

    /// A sub-area has a shape tag which is not defined
    #[error("invalid Area Notice: unknown sub-area shape {0}")]
    UnknownShape(u8),

    /// A sub-area shape tag was read, but its body is incomplete
    #[error("invalid Area Notice: {shape} sub-area is truncated")]
    TruncatedSubArea {
        /// Shape whose body could not be read
        shape: ShapeKind,

        /// The failing read
        source: BitsExhausted,
    },
}

impl Message {
    /// Decode a message from its bits
    ///
    /// Reads the common header and dispatches on the message
    /// type and, for binary broadcasts, the application. Area
    /// Notices are decoded in full; any error in them is an
    /// error for the whole message.
    pub fn decode(payload: &BitPayload) -> Result<Self, MessageDecodeErr> {
        let out = Self::dispatch(payload);
        if let Err(err) = &out {
            match MessageHeader::decode(payload) {
                Ok(hdr) => debug!("message decode failure from {:09}: {}", hdr.mmsi(), err),
                Err(_) => debug!("message decode failure ({} bits): {}", payload.len(), err),
            }
        }
        out
    }

    fn dispatch(payload: &BitPayload) -> Result<Self, MessageDecodeErr> {
        check_length(payload, MessageHeader::BITS)?;

        let mut cursor = payload.cursor();
        let header = MessageHeader::take(&mut cursor)?;
        if header.message_id() != BINARY_BROADCAST_ID {
            return Ok(Self::Other(header));
        }

        check_length(payload, BinaryHeader::BITS)?;
        let binary = BinaryHeader::take_after(header, &mut cursor)?;
        if binary.application() == ApplicationId::AREA_NOTICE {
            Ok(Self::AreaNotice(AreaNotice::take(binary, &mut cursor)?))
        } else {
            Ok(Self::BinaryBroadcast(binary))
        }
    }

    /// Message type
    pub fn message_id(&self) -> u8 {
        match self {
            Self::AreaNotice(n) => n.message_id(),
            Self::BinaryBroadcast(b) => b.message_id(),
            Self::Other(h) => h.message_id(),
        }
    }

    /// Sending station MMSI
    pub fn mmsi(&self) -> u32 {
        match self {
            Self::AreaNotice(n) => n.mmsi(),
            Self::BinaryBroadcast(b) => b.mmsi(),
            Self::Other(h) => h.mmsi(),
        }
    }

    /// The Area Notice, if this is one
    pub fn area_notice(&self) -> Option<&AreaNotice> {
        match self {
            Self::AreaNotice(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaNotice(n) => n.fmt(f),
            Self::BinaryBroadcast(b) => b.fmt(f),
            Self::Other(h) => h.fmt(f),
        }
    }
}

impl TryFrom<&BitPayload> for Message {
    type Error = MessageDecodeErr;

    #[inline]
    fn try_from(payload: &BitPayload) -> Result<Self, Self::Error> {
        Self::decode(payload)
    }
}
