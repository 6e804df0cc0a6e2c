//! # aisarea: AIS Area Notice decoding
//!
//! This crate decodes the IMO Area Notice (broadcast) from the bits of an
//! [AIS](https://en.wikipedia.org/wiki/Automatic_identification_system)
//! binary broadcast message. Area Notices are sent by shore stations
//! to warn mariners of hazards, like whales, within a geographic
//! area for a period of time.
//!
//! ## Disclaimer
//!
//! This crate has not been certified for navigation or for any other
//! purpose. The author **strongly discourages** its use in any
//! safety-critical applications.
//!
//! ## Example
//!
//! AIS receivers report messages as NMEA 0183 sentences. Each
//! sentence carries a *payload* of six-bit characters, plus a count
//! of pad bits which must be discarded from its end.
//!
//! ```
//! use aisarea::{Message, Sentence, ShapeKind, SubArea};
//!
//! let sentence = Sentence::parse(
//!     "!AIVDM,1,1,0,B,803Ovrh0EPM0WB0h2l0MwJUi=6B4G9000aip8<2Bt2Hq2Qhp,0*01"
//! ).expect("not an AIS sentence");
//! let payload = sentence.to_payload().expect("bad payload");
//!
//! let notice = match Message::decode(&payload).expect("bad message") {
//!     Message::AreaNotice(notice) => notice,
//!     other => panic!("not an area notice: {}", other),
//! };
//!
//! assert_eq!(notice.mmsi(), 3669739);
//! assert_eq!(notice.duration_minutes(), 1440);
//! assert_eq!(notice.sub_areas()[0].kind(), ShapeKind::Circle);
//! if let SubArea::Circle(circle) = &notice.sub_areas()[0] {
//!     assert_eq!(circle.radius_m, 14810);
//! }
//! assert_eq!(notice.text(), "NOAA RW SGHTNG");
//! ```
//!
//! Longer messages span several sentences. Feed every sentence
//! to an [`Assembler`], which returns each message payload once
//! all of its fragments have arrived.
//!
//! If you already know that a payload is an Area Notice, you may
//! decode it directly with [`AreaNotice::decode()`]. Decoding is
//! all-or-nothing: any malformed field makes the whole notice
//! an error, and a [`MessageDecodeErr`] reports why.
//!
//! ## Background
//!
//! An Area Notice is an AIS message type 8 (binary broadcast) with
//! Designated Area Code 1 and Function Identifier 22. After the
//! headers, the notice carries a link ID, a notice type, a start
//! time, and a duration. The rest of the message is a list of up to
//! nine sub-areas. Each sub-area is a circle, rectangle, sector,
//! polyline, polygon, or a fragment of free text. The notice area is
//! the union of its sub-areas.
//!
//! ## Crate features
//!
//! * `chrono`: Use chrono to calculate notice
//!   [start](AreaNotice::start_datetime) and
//!   [expiry](AreaNotice::expiry_datetime) times as true UTC
//!   timestamps. If enabled, `chrono` becomes part of this crate's
//!   public API.

mod assembler;
mod bits;
mod header;
mod message;
mod notice;
mod noticecodes;
mod sentence;
mod subarea;

pub use assembler::{Assembler, AssemblyErr, MAX_PENDING};
pub use bits::{unarmor, BitCursor, BitPayload, BitsExhausted, SIXBIT_WIDTH};
pub use header::{
    ApplicationId, BinaryHeader, MessageHeader, BINARY_BROADCAST_ID, MAX_MESSAGE_BITS,
};
pub use message::{Message, MessageDecodeErr};
pub use notice::{
    AreaNotice, InvalidDateErr, DURATION_INDEFINITE, MAX_SUB_AREAS, NOTICE_CANCELLATION,
};
pub use noticecodes::{notice_description, NoticeCategory};
pub use sentence::{Sentence, SentenceErr, SentenceKind};
pub use subarea::{
    Circle, Leg, Path, Position, Rectangle, Sector, ShapeKind, SubArea, Text, MAX_LEGS,
    SHAPE_TAG_BITS, SUB_AREA_BITS, TEXT_CHARS,
};
