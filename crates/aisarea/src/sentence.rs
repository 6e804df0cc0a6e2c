//! NMEA `VDM`/`VDO` sentences
//!
//! AIS receivers report each radio message as one or more
//! NMEA 0183 sentences, like
//!
//! ```txt
//! !AIVDM,1,1,0,B,803Ovrh0EPM0WB0h2l0MwJUi=6B4G9000aip8<2Bt2Hq2Qhp,0*01
//! ```
//!
//! The fields are the fragment count, fragment number,
//! sequential message id, radio channel, armored payload, and
//! pad count. Anything after the checksum, such as receiver
//! metadata, is ignored.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::bits::BitPayload;
use crate::message::MessageDecodeErr;

/// Error parsing a sentence
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SentenceErr {
    /// Not an AIS `VDM` or `VDO` sentence
    #[error("invalid NMEA sentence: not an AIS VDM/VDO sentence")]
    Malformed,

    /// Fragment number is zero or larger than the fragment count
    #[error("invalid NMEA sentence: fragment {number} of {count}")]
    BadFragment {
        /// Fragment number
        number: u8,

        /// Fragment count
        count: u8,
    },
}

/// Who the sentence describes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SentenceKind {
    /// `VDM`: a message received from another station
    Vdm,

    /// `VDO`: a message transmitted by our own station
    Vdo,
}

/// One AIS sentence, possibly a fragment of a longer message
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sentence {
    talker: String,
    kind: SentenceKind,
    fragment_count: u8,
    fragment_number: u8,
    sequence_id: Option<u8>,
    channel: Option<char>,
    payload: String,
    pad: u8,
    checksum: u8,
    computed_checksum: u8,
}

impl Sentence {
    /// Parse a sentence
    ///
    /// Leading and trailing whitespace is ignored. The checksum is
    /// parsed but not verified; see
    /// [`checksum_ok()`](Sentence::checksum_ok).
    ///
    /// ```
    /// use aisarea::Sentence;
    ///
    /// let snt = Sentence::parse(
    ///     "!AIVDM,1,1,0,B,803Ovrh0EPM0WB0h2l0MwJUi=6B4G9000aip8<2Bt2Hq2Qhp,0*01,d-084"
    /// ).unwrap();
    /// assert_eq!(snt.talker(), "AI");
    /// assert_eq!(snt.channel(), Some('B'));
    /// assert_eq!(snt.pad(), 0);
    /// assert!(snt.is_complete());
    /// ```
    pub fn parse<S>(line: S) -> Result<Self, SentenceErr>
    where
        S: AsRef<str>,
    {
        lazy_static! {
            static ref RE: Regex = Regex::new(
                r"^[!$](?P<talker>[A-Z]{2})(?P<kind>VD[MO]),(?P<count>[1-9]),(?P<number>[0-9]),(?P<seq>[0-9]?),(?P<channel>[A-Z0-9]?),(?P<payload>[0-W`-w]*),(?P<pad>[0-9])\*(?P<checksum>[0-9A-Fa-f]{2})"
            )
            .expect("bad NMEA regexp");
        }

        let line = line.as_ref().trim();
        let caps = RE.captures(line).ok_or(SentenceErr::Malformed)?;

        // all captures are required except where optional
        let field = |name: &str| caps.name(name).map(|m| m.as_str()).unwrap_or("");
        let digit = |name: &str| field(name).parse::<u8>().map_err(|_| SentenceErr::Malformed);

        let fragment_count = digit("count")?;
        let fragment_number = digit("number")?;
        if fragment_number == 0 || fragment_number > fragment_count {
            return Err(SentenceErr::BadFragment {
                number: fragment_number,
                count: fragment_count,
            });
        }

        let checksum =
            u8::from_str_radix(field("checksum"), 16).map_err(|_| SentenceErr::Malformed)?;
        let star = line.find('*').ok_or(SentenceErr::Malformed)?;

        Ok(Self {
            talker: field("talker").to_owned(),
            kind: if field("kind") == "VDO" {
                SentenceKind::Vdo
            } else {
                SentenceKind::Vdm
            },
            fragment_count,
            fragment_number,
            sequence_id: field("seq").parse().ok(),
            channel: field("channel").chars().next(),
            payload: field("payload").to_owned(),
            pad: digit("pad")?,
            checksum,
            computed_checksum: nmea_checksum(&line[1..star]),
        })
    }

    /// Two-character talker ID, like `AI`
    pub fn talker(&self) -> &str {
        &self.talker
    }

    /// Sentence kind
    pub fn kind(&self) -> SentenceKind {
        self.kind
    }

    /// Fragments in the whole message
    pub fn fragment_count(&self) -> u8 {
        self.fragment_count
    }

    /// This fragment's number, starting at 1
    pub fn fragment_number(&self) -> u8 {
        self.fragment_number
    }

    /// Sequential message ID which ties fragments together
    pub fn sequence_id(&self) -> Option<u8> {
        self.sequence_id
    }

    /// Radio channel, usually `A` or `B`
    pub fn channel(&self) -> Option<char> {
        self.channel
    }

    /// Armored payload characters
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Pad count
    pub fn pad(&self) -> u8 {
        self.pad
    }

    /// True if this sentence is an entire message
    pub fn is_complete(&self) -> bool {
        self.fragment_count == 1
    }

    /// True if the transmitted checksum matches the sentence
    pub fn checksum_ok(&self) -> bool {
        self.checksum == self.computed_checksum
    }

    /// Expand a single-fragment sentence into its bits
    ///
    /// Fragments of a longer message must go through an
    /// [`Assembler`](crate::Assembler) instead.
    pub fn to_payload(&self) -> Result<BitPayload, MessageDecodeErr> {
        BitPayload::from_armored(&self.payload, self.pad)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = format!(
            "{}{},{},{},{},{},{},{}",
            self.talker,
            match self.kind {
                SentenceKind::Vdm => "VDM",
                SentenceKind::Vdo => "VDO",
            },
            self.fragment_count,
            self.fragment_number,
            self.sequence_id.map(|s| s.to_string()).unwrap_or_default(),
            self.channel.map(|c| c.to_string()).unwrap_or_default(),
            self.payload,
            self.pad
        );
        write!(f, "!{}*{:02X}", body, self.checksum)
    }
}

/// XOR checksum of the characters between `!` and `*`
fn nmea_checksum(body: &str) -> u8 {
    body.bytes().fold(0u8, |acc, b| acc ^ b)
}
