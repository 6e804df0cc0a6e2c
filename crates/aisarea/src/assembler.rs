//! Joins multi-sentence messages
//!
//! Messages longer than one sentence are split into fragments.
//! Fragments of one message share a fragment count, a sequential
//! message id, and a radio channel, and are sent in order. The
//! [`Assembler`] follows these rules:
//!
//! 1. A single-fragment sentence is passed through immediately.
//!
//! 2. Fragment 1 starts a new partial message. If a partial
//!    message with the same id and channel is already pending, it
//!    is dropped: its remaining fragments were lost.
//!
//! 3. Every later fragment must be the next one expected by a
//!    pending partial message. If it is not, the partial message
//!    is dropped and an error is returned.
//!
//! 4. Only a few partial messages are kept. When a new one
//!    arrives and there is no room, the oldest is dropped.

use arrayvec::ArrayVec;
use log::{debug, info, warn};
use thiserror::Error;

use crate::bits::BitPayload;
use crate::message::MessageDecodeErr;
use crate::sentence::Sentence;

/// Partial messages kept at once
pub const MAX_PENDING: usize = 8;

/// Error joining fragments
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssemblyErr {
    /// A fragment arrived without the fragments before it
    #[error("fragment {number} of {count} arrived out of order")]
    OutOfOrder {
        /// Fragment number received
        number: u8,

        /// Fragment count
        count: u8,
    },

    /// The joined payload is not valid
    #[error(transparent)]
    Payload(#[from] MessageDecodeErr),
}

// fragments are matched on sequence id and channel
type Key = (Option<u8>, Option<char>);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Partial {
    key: Key,
    count: u8,
    next: u8,
    armored: String,
}

/// Reassembles fragmented messages
///
/// ```
/// use aisarea::{Assembler, Sentence};
///
/// let mut asm = Assembler::new();
/// let first = Sentence::parse("!AIVDM,2,1,3,B,55P5TL01VIaAL@7WKO@mBplU@<PDhh000000001S;AJ::4A80?4i@E53,0*3E").unwrap();
/// let second = Sentence::parse("!AIVDM,2,2,3,B,1@0000000000000,2*55").unwrap();
///
/// assert_eq!(None, asm.push(&first).unwrap());
/// let payload = asm.push(&second).unwrap().expect("message incomplete");
/// assert_eq!(payload.len(), 424);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Assembler {
    pending: ArrayVec<Partial, MAX_PENDING>,
}

impl Assembler {
    /// New assembler with nothing pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sentence
    ///
    /// Returns the message payload once its final fragment has
    /// been received, or `None` if more fragments are needed.
    pub fn push(&mut self, sentence: &Sentence) -> Result<Option<BitPayload>, AssemblyErr> {
        if sentence.is_complete() {
            return Ok(Some(sentence.to_payload()?));
        }

        let key = (sentence.sequence_id(), sentence.channel());
        let count = sentence.fragment_count();
        let number = sentence.fragment_number();
        let found = self.pending.iter().position(|p| p.key == key);

        if number == 1 {
            if let Some(idx) = found {
                let old = self.pending.remove(idx);
                warn!(
                    "assembler: dropped incomplete message {:?} after {} of {} fragments",
                    old.key,
                    old.next - 1,
                    old.count
                );
            }
            if self.pending.is_full() {
                let old = self.pending.remove(0);
                info!("assembler: evicted stale partial message {:?}", old.key);
            }

            debug!("assembler: started message {:?} ({} fragments)", key, count);
            self.pending.push(Partial {
                key,
                count,
                next: 2,
                armored: sentence.payload().to_owned(),
            });
            return Ok(None);
        }

        let idx = found.ok_or(AssemblyErr::OutOfOrder { number, count })?;
        if self.pending[idx].next != number || self.pending[idx].count != count {
            let old = self.pending.remove(idx);
            warn!(
                "assembler: dropped message {:?}: expected fragment {} of {}, got {} of {}",
                old.key, old.next, old.count, number, count
            );
            return Err(AssemblyErr::OutOfOrder { number, count });
        }

        let partial = &mut self.pending[idx];
        partial.armored.push_str(sentence.payload());
        partial.next += 1;
        if number < count {
            return Ok(None);
        }

        // the pad of the final fragment applies to the whole
        let done = self.pending.remove(idx);
        Ok(Some(BitPayload::from_armored(&done.armored, sentence.pad())?))
    }

    /// Number of partial messages awaiting more fragments
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drop all partial messages
    pub fn reset(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(count: u8, number: u8, seq: u8, payload: &str, pad: u8) -> Sentence {
        Sentence::parse(format!(
            "!AIVDM,{},{},{},A,{},{}*00",
            count, number, seq, payload, pad
        ))
        .expect("bad sentence")
    }

    #[test]
    fn test_single_fragment() {
        let mut asm = Assembler::new();
        let out = asm
            .push(&sentence(1, 1, 0, "803Ovrh0EPM0", 0))
            .expect("bad push")
            .expect("no payload");
        assert_eq!(out.len(), 72);
        assert_eq!(asm.pending(), 0);

        assert_eq!(
            asm.push(&sentence(1, 1, 0, "803Ovrh0EPM0", 6)),
            Err(AssemblyErr::Payload(MessageDecodeErr::InvalidPad(6)))
        );
    }

    #[test]
    fn test_three_fragments() {
        let mut asm = Assembler::new();
        assert_eq!(asm.push(&sentence(3, 1, 4, "803Ovr", 0)), Ok(None));
        assert_eq!(asm.push(&sentence(3, 2, 4, "h0EPM0", 0)), Ok(None));
        assert_eq!(asm.pending(), 1);

        let out = asm
            .push(&sentence(3, 3, 4, "w7", 2))
            .expect("bad push")
            .expect("no payload");
        assert_eq!(out.len(), 82);
        assert_eq!(out, BitPayload::from_armored("803Ovrh0EPM0w7", 2).unwrap());
        assert_eq!(asm.pending(), 0);
    }

    #[test]
    fn test_interleaved() {
        let mut asm = Assembler::new();
        assert_eq!(asm.push(&sentence(2, 1, 1, "803Ovr", 0)), Ok(None));
        assert_eq!(asm.push(&sentence(2, 1, 2, "h0EPM0", 0)), Ok(None));
        assert_eq!(asm.pending(), 2);

        let two = asm.push(&sentence(2, 2, 2, "00", 0)).unwrap().unwrap();
        let one = asm.push(&sentence(2, 2, 1, "00", 0)).unwrap().unwrap();
        assert_eq!(one, BitPayload::from_armored("803Ovr00", 0).unwrap());
        assert_eq!(two, BitPayload::from_armored("h0EPM000", 0).unwrap());
    }

    #[test]
    fn test_out_of_order() {
        let mut asm = Assembler::new();
        assert_eq!(
            asm.push(&sentence(2, 2, 1, "00", 0)),
            Err(AssemblyErr::OutOfOrder {
                number: 2,
                count: 2
            })
        );

        // a skipped fragment drops the message
        assert_eq!(asm.push(&sentence(3, 1, 1, "803Ovr", 0)), Ok(None));
        assert_eq!(
            asm.push(&sentence(3, 3, 1, "00", 0)),
            Err(AssemblyErr::OutOfOrder {
                number: 3,
                count: 3
            })
        );
        assert_eq!(asm.pending(), 0);

        // a restarted message replaces the old one
        assert_eq!(asm.push(&sentence(2, 1, 1, "803Ovr", 0)), Ok(None));
        assert_eq!(asm.push(&sentence(2, 1, 1, "h0EPM0", 0)), Ok(None));
        assert_eq!(asm.pending(), 1);
        let out = asm.push(&sentence(2, 2, 1, "", 0)).unwrap().unwrap();
        assert_eq!(out, BitPayload::from_armored("h0EPM0", 0).unwrap());
    }

    #[test]
    fn test_eviction() {
        let mut asm = Assembler::new();
        for seq in 0..=MAX_PENDING as u8 {
            assert_eq!(asm.push(&sentence(2, 1, seq, "803Ovr", 0)), Ok(None));
        }
        assert_eq!(asm.pending(), MAX_PENDING);

        // sequence 0 was the oldest
        assert!(asm.push(&sentence(2, 2, 0, "00", 0)).is_err());
        assert!(asm.push(&sentence(2, 2, 1, "00", 0)).unwrap().is_some());

        asm.reset();
        assert_eq!(asm.pending(), 0);
    }
}
