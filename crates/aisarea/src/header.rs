//! Fields common to every AIS message

use std::fmt;

use crate::bits::{BitCursor, BitPayload};
use crate::message::MessageDecodeErr;

/// Message type of a binary broadcast message
pub const BINARY_BROADCAST_ID: u8 = 8;

/// Largest payload the radio link can carry (five slots)
pub const MAX_MESSAGE_BITS: usize = 1008;

/// Identity and repeat count of an AIS message
///
/// The first 38 bits of every AIS message, regardless of its
/// type, identify the message type, how many times it has been
/// repeated, and the station which sent it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageHeader {
    message_id: u8,
    repeat_indicator: u8,
    mmsi: u32,
}

impl MessageHeader {
    /// Bits occupied by the common header
    pub const BITS: usize = 38;

    /// Decode the common header from the start of `payload`
    ///
    /// The payload must be at least [`BITS`](Self::BITS) long
    /// and no longer than [`MAX_MESSAGE_BITS`].
    pub fn decode(payload: &BitPayload) -> Result<Self, MessageDecodeErr> {
        check_length(payload, Self::BITS)?;
        Self::take(&mut payload.cursor())
    }

    // read from a cursor at bit zero
    pub(crate) fn take(cursor: &mut BitCursor<'_>) -> Result<Self, MessageDecodeErr> {
        Ok(Self {
            message_id: cursor.take_uint(6)? as u8,
            repeat_indicator: cursor.take_uint(2)? as u8,
            mmsi: cursor.take_uint(30)?,
        })
    }

    /// Message type, 1–27
    pub fn message_id(&self) -> u8 {
        self.message_id
    }

    /// Times the message has been repeated, 0–3
    ///
    /// A value of 3 means "do not repeat any more."
    pub fn repeat_indicator(&self) -> u8 {
        self.repeat_indicator
    }

    /// Maritime Mobile Service Identity of the sender
    pub fn mmsi(&self) -> u32 {
        self.mmsi
    }
}

impl fmt::Display for MessageHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type {} from {:09} (repeat {})",
            self.message_id, self.mmsi, self.repeat_indicator
        )
    }
}

/// Two-level application selector of a binary message
///
/// The Designated Area Code (DAC) names the authority which
/// defined the message layout. The Function Identifier (FI)
/// selects one layout within that authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApplicationId {
    /// Designated Area Code
    pub dac: u16,

    /// Function Identifier
    pub fi: u8,
}

impl ApplicationId {
    /// IMO Area Notice (broadcast)
    pub const AREA_NOTICE: ApplicationId = ApplicationId { dac: 1, fi: 22 };
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.dac, self.fi)
    }
}

/// Header of a binary broadcast message (type 8)
///
/// Adds the spare bits and [`ApplicationId`] which follow the
/// common [`MessageHeader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BinaryHeader {
    header: MessageHeader,
    spare: u8,
    application: ApplicationId,
}

impl BinaryHeader {
    /// Bits occupied by the binary broadcast header
    pub const BITS: usize = 56;

    /// Decode a binary broadcast header from `payload`
    ///
    /// The message type is not checked; see
    /// [`Message::decode()`](crate::Message::decode) for dispatch.
    pub fn decode(payload: &BitPayload) -> Result<Self, MessageDecodeErr> {
        check_length(payload, Self::BITS)?;
        Self::take(&mut payload.cursor())
    }

    pub(crate) fn take(cursor: &mut BitCursor<'_>) -> Result<Self, MessageDecodeErr> {
        let header = MessageHeader::take(cursor)?;
        Self::take_after(header, cursor)
    }

    // continue from a cursor positioned just past `header`
    pub(crate) fn take_after(
        header: MessageHeader,
        cursor: &mut BitCursor<'_>,
    ) -> Result<Self, MessageDecodeErr> {
        let spare = cursor.take_uint(2)? as u8;
        let dac = cursor.take_uint(10)? as u16;
        let fi = cursor.take_uint(6)? as u8;
        Ok(Self {
            header,
            spare,
            application: ApplicationId { dac, fi },
        })
    }

    /// Common header fields
    pub fn header(&self) -> &MessageHeader {
        &self.header
    }

    /// Message type
    pub fn message_id(&self) -> u8 {
        self.header.message_id
    }

    /// Repeat indicator
    pub fn repeat_indicator(&self) -> u8 {
        self.header.repeat_indicator
    }

    /// Sending station MMSI
    pub fn mmsi(&self) -> u32 {
        self.header.mmsi
    }

    /// Spare bits between the MMSI and the DAC; normally zero
    pub fn spare(&self) -> u8 {
        self.spare
    }

    /// Application selector
    pub fn application(&self) -> ApplicationId {
        self.application
    }

    /// Designated Area Code
    pub fn dac(&self) -> u16 {
        self.application.dac
    }

    /// Function Identifier
    pub fn fi(&self) -> u8 {
        self.application.fi
    }
}

impl fmt::Display for BinaryHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} application {}", self.header, self.application)
    }
}

// Reject payloads which cannot hold `required` bits or
// which exceed the link's maximum message size
pub(crate) fn check_length(payload: &BitPayload, required: usize) -> Result<(), MessageDecodeErr> {
    let bits = payload.len();
    if bits < required {
        Err(MessageDecodeErr::TooShort { bits, required })
    } else if bits > MAX_MESSAGE_BITS {
        Err(MessageDecodeErr::TooLong { bits })
    } else {
        Ok(())
    }
}
