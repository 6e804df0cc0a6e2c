//! IMO Area Notice (broadcast), 8:1:22

use std::fmt;

use arrayvec::ArrayVec;
#[cfg(feature = "chrono")]
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use log::{debug, trace};
use thiserror::Error;

use crate::bits::{BitCursor, BitPayload, SIXBIT_WIDTH};
use crate::header::{
    check_length, ApplicationId, BinaryHeader, MessageHeader, BINARY_BROADCAST_ID,
};
use crate::message::MessageDecodeErr;
use crate::noticecodes::{notice_description, NoticeCategory};
use crate::subarea::SubArea;

/// Maximum sub-areas in one notice
pub const MAX_SUB_AREAS: usize = 9;

/// Duration which means "until cancelled"
pub const DURATION_INDEFINITE: u32 = (1 << 18) - 1;

/// Notice type which cancels an earlier notice
pub const NOTICE_CANCELLATION: u8 = 127;

// link id through duration
const BODY_BITS: usize = 55;

/// An invalid notice start time
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
#[error("notice start time is not a valid date for its receive time")]
pub struct InvalidDateErr {}

/// An Area Notice
///
/// Area Notices warn mariners of a hazard or condition within a
/// geographic area for a period of time. The area is the union
/// of up to nine [sub-areas](SubArea).
///
/// All fields are reported exactly as transmitted. No range
/// checks are made on the timestamp fields, which may hold
/// "not available" values like month zero.
///
/// ```
/// use aisarea::{AreaNotice, BitPayload, ShapeKind};
///
/// let payload = BitPayload::from_armored(
///     "803Ovrh0EPM0WB0h2l0MwJUi=6B4G9000aip8<2Bt2Hq2Qhp",
///     0,
/// ).unwrap();
/// let notice = AreaNotice::decode(&payload).expect("decode failed");
///
/// assert_eq!(notice.mmsi(), 3669739);
/// assert_eq!(notice.link_id(), 29);
/// assert_eq!(
///     notice.notice_description(),
///     Some("Caution Area: Marine mammals in area - reduce speed")
/// );
/// assert_eq!((notice.month(), notice.day()), (3, 20));
/// assert_eq!((notice.hour(), notice.minute()), (16, 6));
/// assert_eq!(notice.duration_minutes(), 1440);
///
/// let kinds: Vec<ShapeKind> = notice.sub_areas().iter().map(|a| a.kind()).collect();
/// assert_eq!(kinds, vec![ShapeKind::Circle, ShapeKind::Text]);
/// assert_eq!(notice.text(), "NOAA RW SGHTNG");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AreaNotice {
    header: BinaryHeader,
    link_id: u16,
    notice_type: u8,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    duration_minutes: u32,
    sub_areas: ArrayVec<SubArea, MAX_SUB_AREAS>,
}

impl AreaNotice {
    /// Fewest bits which can hold a notice: header and body
    /// fields, with no sub-areas
    pub const MIN_BITS: usize = BinaryHeader::BITS + BODY_BITS;

    /// Decode an Area Notice
    ///
    /// The `payload` must contain a type 8 binary broadcast for
    /// application 1:22. Returns an error if the payload is not
    /// such a message or if any part of it is malformed.
    ///
    /// Sub-area records follow the body fields until the payload
    /// is exhausted or [`MAX_SUB_AREAS`] have been read. A
    /// remainder shorter than one armored character is fill and
    /// is ignored. Anything longer must be a complete sub-area
    /// record.
    pub fn decode(payload: &BitPayload) -> Result<Self, MessageDecodeErr> {
        let out = Self::decode_payload(payload);
        if let Err(err) = &out {
            match MessageHeader::decode(payload) {
                Ok(hdr) => debug!("area notice decode failure from {:09}: {}", hdr.mmsi(), err),
                Err(_) => debug!("area notice decode failure ({} bits): {}", payload.len(), err),
            }
        }
        out
    }

    fn decode_payload(payload: &BitPayload) -> Result<Self, MessageDecodeErr> {
        check_length(payload, BinaryHeader::BITS)?;

        let mut cursor = payload.cursor();
        let header = BinaryHeader::take(&mut cursor)?;
        if header.message_id() != BINARY_BROADCAST_ID {
            return Err(MessageDecodeErr::WrongMessageType(header.message_id()));
        }
        if header.application() != ApplicationId::AREA_NOTICE {
            return Err(MessageDecodeErr::WrongApplication {
                dac: header.dac(),
                fi: header.fi(),
            });
        }

        Self::take(header, &mut cursor)
    }

    // Decode everything after the binary header
    pub(crate) fn take(
        header: BinaryHeader,
        cursor: &mut BitCursor<'_>,
    ) -> Result<Self, MessageDecodeErr> {
        let remaining = cursor.remaining_bits();
        if remaining < BODY_BITS {
            return Err(MessageDecodeErr::TooShort {
                bits: cursor.position() + remaining,
                required: Self::MIN_BITS,
            });
        }

        let link_id = cursor.take_uint(10)? as u16;
        let notice_type = cursor.take_uint(7)? as u8;
        let month = cursor.take_uint(4)? as u8;
        let day = cursor.take_uint(5)? as u8;
        let hour = cursor.take_uint(5)? as u8;
        let minute = cursor.take_uint(6)? as u8;
        let duration_minutes = cursor.take_uint(18)?;

        // paths continue from the last point shape
        let mut sub_areas = ArrayVec::new();
        let mut origin = None;
        while cursor.remaining_bits() >= SIXBIT_WIDTH && !sub_areas.is_full() {
            let area = SubArea::take(cursor, origin)?;
            trace!(
                "area notice from {}: sub-area {}: {}",
                header.mmsi(),
                sub_areas.len(),
                area
            );

            if let Some(pos) = area.position() {
                origin = Some(*pos);
            }
            sub_areas.push(area);
        }

        if cursor.remaining_bits() >= SIXBIT_WIDTH {
            debug!(
                "area notice from {:09}: ignoring {} bits after the last sub-area",
                header.mmsi(),
                cursor.remaining_bits()
            );
        }

        Ok(Self {
            header,
            link_id,
            notice_type,
            month,
            day,
            hour,
            minute,
            duration_minutes,
            sub_areas,
        })
    }

    /// Binary broadcast header
    pub fn header(&self) -> &BinaryHeader {
        &self.header
    }

    /// Message type; always 8
    pub fn message_id(&self) -> u8 {
        self.header.message_id()
    }

    /// Repeat indicator
    pub fn repeat_indicator(&self) -> u8 {
        self.header.repeat_indicator()
    }

    /// Sending station MMSI
    pub fn mmsi(&self) -> u32 {
        self.header.mmsi()
    }

    /// Designated Area Code; always 1
    pub fn dac(&self) -> u16 {
        self.header.dac()
    }

    /// Function Identifier; always 22
    pub fn fi(&self) -> u8 {
        self.header.fi()
    }

    /// Header spare bits; normally zero
    pub fn spare(&self) -> u8 {
        self.header.spare()
    }

    /// Message linkage ID
    ///
    /// Ties this notice to other messages from the same station,
    /// such as a later [cancellation](Self::is_cancellation).
    pub fn link_id(&self) -> u16 {
        self.link_id
    }

    /// Notice type code, 0–127
    pub fn notice_type(&self) -> u8 {
        self.notice_type
    }

    /// Notice category, derived from the type code
    pub fn notice_category(&self) -> NoticeCategory {
        NoticeCategory::from_code(self.notice_type)
    }

    /// Notice type description
    ///
    /// Returns `None` if the notice type is reserved.
    pub fn notice_description(&self) -> Option<&'static str> {
        notice_description(self.notice_type)
    }

    /// True if this notice cancels the notice with the same link ID
    pub fn is_cancellation(&self) -> bool {
        self.notice_type == NOTICE_CANCELLATION
    }

    /// Start month (UTC), 1–12, or 0 if not available
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Start day of month (UTC), 1–31, or 0 if not available
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Start hour (UTC), 0–23, or 24 if not available
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Start minute (UTC), 0–59, or 60 if not available
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes the notice remains in force
    ///
    /// Zero cancels the notice.
    /// [`DURATION_INDEFINITE`] means the notice stays in force
    /// until cancelled.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// True if the notice has no fixed end
    pub fn is_indefinite(&self) -> bool {
        self.duration_minutes == DURATION_INDEFINITE
    }

    /// Sub-areas, in broadcast order
    pub fn sub_areas(&self) -> &[SubArea] {
        &self.sub_areas
    }

    /// All text sub-areas, joined
    ///
    /// Consecutive text records continue one another, so they
    /// are joined as-is. Trailing spaces of the joined text are
    /// removed. Returns an empty string if the notice has no text.
    pub fn text(&self) -> String {
        let mut out: String = self
            .sub_areas
            .iter()
            .filter_map(|area| match area {
                SubArea::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        out.truncate(out.trim_end_matches(' ').len());
        out
    }

    /// Notice start (UTC)
    ///
    /// Area Notices omit the year. The year is chosen so that
    /// the start time falls within about six months of the
    /// `received` time. The `received` time does not need to be
    /// precise.
    ///
    /// Returns an error if the start fields are not available or
    /// do not form a valid date.
    ///
    /// Requires `chrono`.
    #[cfg(feature = "chrono")]
    pub fn start_datetime(
        &self,
        received: &DateTime<Utc>,
    ) -> Result<DateTime<Utc>, InvalidDateErr> {
        calculate_start_time(
            (self.month, self.day, self.hour, self.minute),
            (received.year(), received.month()),
        )
    }

    /// Notice duration
    ///
    /// Returns `None` if the notice is
    /// [indefinite](Self::is_indefinite).
    ///
    /// Requires `chrono`.
    #[cfg(feature = "chrono")]
    pub fn duration(&self) -> Option<Duration> {
        if self.is_indefinite() {
            None
        } else {
            Some(Duration::minutes(self.duration_minutes as i64))
        }
    }

    /// Notice end (UTC)
    ///
    /// Returns `Ok(None)` for indefinite notices.
    ///
    /// Requires `chrono`.
    #[cfg(feature = "chrono")]
    pub fn expiry_datetime(
        &self,
        received: &DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, InvalidDateErr> {
        let start = self.start_datetime(received)?;
        Ok(self.duration().map(|dur| start + dur))
    }

    /// Is the notice expired?
    ///
    /// Given the current time, determine if this notice has
    /// expired. It is assumed that `now` is within a few months
    /// of the notice start. Indefinite notices, and notices
    /// without a valid start time, never expire.
    ///
    /// Requires `chrono`.
    #[cfg(feature = "chrono")]
    pub fn is_expired_at(&self, now: &DateTime<Utc>) -> bool {
        match self.expiry_datetime(now) {
            Ok(Some(expiry)) => expiry < *now,
            Ok(None) | Err(_) => false,
        }
    }
}

impl fmt::Display for AreaNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} from {:09} link {}: ",
            self.dac(),
            self.fi(),
            self.mmsi(),
            self.link_id
        )?;
        match self.notice_description() {
            Some(desc) => write!(f, "{}", desc)?,
            None => write!(f, "notice type {} (reserved)", self.notice_type)?,
        }
        write!(
            f,
            "; starts {:02}-{:02} {:02}:{:02} UTC",
            self.month, self.day, self.hour, self.minute
        )?;
        if self.is_indefinite() {
            write!(f, " until cancelled")?;
        } else {
            write!(f, " for {} min", self.duration_minutes)?;
        }
        for area in &self.sub_areas {
            write!(f, "; {}", area)?;
        }
        Ok(())
    }
}

// Calculate the notice start time
//
// Builds a UTC datetime from the notice (month, day, hour, minute)
// fields and the (year, month) the notice was received.
#[cfg(feature = "chrono")]
fn calculate_start_time(
    notice: (u8, u8, u8, u8),
    received: (i32, u32),
) -> Result<DateTime<Utc>, InvalidDateErr> {
    let (month, day, hour, minute) = notice;
    let (rx_year, rx_month) = received;

    let monthdiff = rx_month as i32 - month as i32;
    let year = if monthdiff > 6 {
        // notice starts early next year
        rx_year.saturating_add(1)
    } else if monthdiff < -6 {
        // notice started late last year
        rx_year.saturating_sub(1)
    } else {
        rx_year
    };

    Utc.with_ymd_and_hms(
        year,
        month as u32,
        day as u32,
        hour as u32,
        minute as u32,
        0,
    )
    .single()
    .ok_or(InvalidDateErr {})
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    use crate::bits::{BitWriter, BitsExhausted};
    use crate::subarea::{ShapeKind, SUB_AREA_BITS, TEXT_CHARS};

    const WHALE_NOTICE: &str = "803Ovrh0EPM0WB0h2l0MwJUi=6B4G9000aip8<2Bt2Hq2Qhp";
    const MISSING_AREAS: &str = "803Ovrh0EPG0WB5p2l0L40";

    // header and body of a notice
    fn notice_writer(notice_type: u32) -> BitWriter {
        let mut writer = BitWriter::new();
        writer
            .uint(8, 6)
            .uint(0, 2)
            .uint(366123456, 30)
            .uint(0, 2)
            .uint(1, 10)
            .uint(22, 6)
            .uint(7, 10)
            .uint(notice_type, 7)
            .uint(12, 4)
            .uint(31, 5)
            .uint(23, 5)
            .uint(59, 6)
            .uint(60, 18);
        writer
    }

    fn circle(writer: &mut BitWriter, lon: f64, lat: f64) {
        writer
            .uint(0, 3)
            .uint(0, 2)
            .int((lon * 60000.0).round() as i32, 25)
            .int((lat * 60000.0).round() as i32, 24)
            .uint(2, 3)
            .uint(100, 12)
            .uint(0, 18);
    }

    fn text(writer: &mut BitWriter, text: &str) {
        writer.uint(5, 3).text(text, TEXT_CHARS);
    }

    #[test]
    fn test_whale_notice() {
        let payload = BitPayload::from_armored(WHALE_NOTICE, 0).unwrap();
        let notice = AreaNotice::decode(&payload).expect("bad notice");

        assert_eq!(notice.message_id(), 8);
        assert_eq!(notice.repeat_indicator(), 0);
        assert_eq!(notice.mmsi(), 3669739);
        assert_eq!(notice.dac(), 1);
        assert_eq!(notice.fi(), 22);
        assert_eq!(notice.spare(), 0);
        assert_eq!(notice.link_id(), 29);
        assert_eq!(notice.notice_type(), 1);
        assert_eq!(notice.notice_category(), NoticeCategory::Caution);
        assert_eq!(notice.month(), 3);
        assert_eq!(notice.day(), 20);
        assert_eq!(notice.hour(), 16);
        assert_eq!(notice.minute(), 6);
        assert_eq!(notice.duration_minutes(), 1440);
        assert!(!notice.is_indefinite());
        assert!(!notice.is_cancellation());

        assert_eq!(notice.sub_areas().len(), 2);
        assert_eq!(notice.sub_areas()[0].kind(), ShapeKind::Circle);
        assert_eq!(notice.sub_areas()[1].kind(), ShapeKind::Text);

        match &notice.sub_areas()[0] {
            SubArea::Circle(c) => {
                assert_approx_eq!(c.center.longitude, -70.22429656982422, 1e-5);
                assert_approx_eq!(c.center.latitude, 42.105865478515625, 1e-5);
                assert_eq!(c.center.precision, 4);
                assert_eq!(c.radius_m, 14810);
                assert_eq!(c.spare, 0);
            }
            other => panic!("expected circle, got {:?}", other),
        }

        match &notice.sub_areas()[1] {
            SubArea::Text(t) => assert_eq!(t.text, "NOAA RW SGHTNG"),
            other => panic!("expected text, got {:?}", other),
        }

        assert_eq!(
            &format!("{}", notice),
            "1:22 from 003669739 link 29: \
             Caution Area: Marine mammals in area - reduce speed; \
             starts 03-20 16:06 UTC for 1440 min; \
             circle(-70.2243, 42.1059, radius 14810 m); \
             text(\"NOAA RW SGHTNG\")"
        );
    }

    #[test]
    fn test_decode_is_pure() {
        let payload = BitPayload::from_armored(WHALE_NOTICE, 0).unwrap();
        let first = AreaNotice::decode(&payload).expect("bad notice");
        let second = AreaNotice::decode(&payload).expect("bad notice");
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_decode() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AreaNotice>();
        assert_send_sync::<BitPayload>();
        assert_send_sync::<MessageDecodeErr>();

        let payload = BitPayload::from_armored(WHALE_NOTICE, 0).unwrap();
        let expect = AreaNotice::decode(&payload).expect("bad notice");

        let results: Vec<AreaNotice> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| AreaNotice::decode(&payload.clone())))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().expect("bad notice"))
                .collect()
        });

        for notice in results {
            assert_eq!(notice, expect);
        }
    }

    #[test]
    fn test_missing_sub_areas() {
        // body present, but the remainder is a stub of a sub-area
        let payload = BitPayload::from_armored(MISSING_AREAS, 4).unwrap();
        assert_eq!(payload.len(), 128);
        let err = AreaNotice::decode(&payload).expect_err("should not decode");
        assert!(matches!(
            err,
            MessageDecodeErr::TruncatedSubArea { .. } | MessageDecodeErr::UnknownShape(_)
        ));

        // a wrong pad does not rescue it…
        for pad in 0..6 {
            let payload = BitPayload::from_armored(MISSING_AREAS, pad).unwrap();
            AreaNotice::decode(&payload).expect_err("should not decode");
        }

        // …and an impossible pad is refused outright
        assert_eq!(
            BitPayload::from_armored(MISSING_AREAS, 6),
            Err(MessageDecodeErr::InvalidPad(6))
        );
    }

    #[test]
    fn test_fill_after_body() {
        // up to five fill bits after the body are ignored
        for fill in 0..SIXBIT_WIDTH {
            let mut writer = notice_writer(0);
            writer.uint(0, fill);
            let payload = writer.finish();
            assert_eq!(payload.len(), AreaNotice::MIN_BITS + fill);

            let notice = AreaNotice::decode(&payload).expect("bad notice");
            assert!(notice.sub_areas().is_empty());
            assert_eq!(notice.text(), "");
            assert_eq!(notice.link_id(), 7);
            assert_eq!(notice.month(), 12);
            assert_eq!(notice.day(), 31);
            assert_eq!(notice.hour(), 23);
            assert_eq!(notice.minute(), 59);
            assert_eq!(notice.duration_minutes(), 60);
        }

        // six is a partial sub-area
        let mut writer = notice_writer(0);
        writer.uint(0, SIXBIT_WIDTH);
        let payload = writer.finish();
        assert_eq!(
            AreaNotice::decode(&payload),
            Err(MessageDecodeErr::TruncatedSubArea {
                shape: ShapeKind::Circle,
                source: BitsExhausted {
                    requested: 84,
                    remaining: 3
                }
            })
        );
    }

    #[test]
    fn test_truncated_after_header() {
        let mut writer = BitWriter::new();
        writer
            .uint(8, 6)
            .uint(0, 2)
            .uint(366123456, 30)
            .uint(0, 2)
            .uint(1, 10)
            .uint(22, 6)
            .uint(7, 10);
        let payload = writer.finish();
        assert_eq!(
            AreaNotice::decode(&payload),
            Err(MessageDecodeErr::TooShort {
                bits: 66,
                required: 111
            })
        );

        let payload = BitPayload::from_armored("803Ovrh0EPM0", 0).unwrap();
        assert_eq!(
            AreaNotice::decode(&payload),
            Err(MessageDecodeErr::TooShort {
                bits: 72,
                required: 111
            })
        );

        let payload = BitPayload::from_armored("803O", 0).unwrap();
        assert_eq!(
            AreaNotice::decode(&payload),
            Err(MessageDecodeErr::TooShort {
                bits: 24,
                required: 56
            })
        );
    }

    #[test]
    fn test_wrong_message() {
        let mut writer = BitWriter::new();
        writer
            .uint(6, 6)
            .uint(0, 2)
            .uint(366123456, 30)
            .uint(0, 2)
            .uint(1, 10)
            .uint(22, 6)
            .uint(0, 60);
        let payload = writer.finish();
        assert_eq!(
            AreaNotice::decode(&payload),
            Err(MessageDecodeErr::WrongMessageType(6))
        );

        let mut writer = BitWriter::new();
        writer
            .uint(8, 6)
            .uint(0, 2)
            .uint(366123456, 30)
            .uint(0, 2)
            .uint(366, 10)
            .uint(22, 6)
            .uint(0, 60);
        let payload = writer.finish();
        assert_eq!(
            AreaNotice::decode(&payload),
            Err(MessageDecodeErr::WrongApplication { dac: 366, fi: 22 })
        );
    }

    #[test]
    fn test_unknown_shape() {
        let mut writer = notice_writer(0);
        circle(&mut writer, -70.0, 42.0);
        writer.uint(7, 3).uint(0, 84);
        let payload = writer.finish();
        assert_eq!(
            AreaNotice::decode(&payload),
            Err(MessageDecodeErr::UnknownShape(7))
        );
    }

    #[test]
    fn test_sub_area_limit() {
        let mut writer = notice_writer(0);
        for _ in 0..MAX_SUB_AREAS {
            text(&mut writer, "ABCDEFGHIJKLMN");
        }
        let notice = AreaNotice::decode(&writer.clone().finish()).expect("bad notice");
        assert_eq!(notice.sub_areas().len(), MAX_SUB_AREAS);
        assert_eq!(notice.text().len(), MAX_SUB_AREAS * TEXT_CHARS);

        // a tenth record is left unread
        text(&mut writer, "OPQRSTUVWXYZ");
        let payload = writer.finish();
        assert_eq!(payload.len(), AreaNotice::MIN_BITS + 10 * SUB_AREA_BITS);
        let notice = AreaNotice::decode(&payload).expect("bad notice");
        assert_eq!(notice.sub_areas().len(), MAX_SUB_AREAS);
        assert_eq!(notice.text(), "ABCDEFGHIJKLMN".repeat(MAX_SUB_AREAS));

        // even when it would not decode
        let mut writer = notice_writer(0);
        for _ in 0..MAX_SUB_AREAS {
            text(&mut writer, "ABCDEFGHIJKLMN");
        }
        writer.uint(7, 3).uint(0, 40);
        let notice = AreaNotice::decode(&writer.finish()).expect("bad notice");
        assert_eq!(notice.sub_areas().len(), MAX_SUB_AREAS);
    }

    #[test]
    fn test_text_keeps_word_breaks() {
        let mut writer = notice_writer(35);
        text(&mut writer, "DREDGING ZONE ");
        text(&mut writer, "NO ENTRY");
        let notice = AreaNotice::decode(&writer.finish()).expect("bad notice");

        match &notice.sub_areas()[0] {
            SubArea::Text(t) => assert_eq!(t.text, "DREDGING ZONE "),
            other => panic!("expected text, got {:?}", other),
        }
        assert_eq!(notice.text(), "DREDGING ZONE NO ENTRY");

        // trailing spaces of the whole text are dropped
        let mut writer = notice_writer(35);
        text(&mut writer, "NO ENTRY      ");
        let notice = AreaNotice::decode(&writer.finish()).expect("bad notice");
        assert_eq!(notice.text(), "NO ENTRY");
    }

    #[test]
    fn test_path_origin_and_text() {
        let mut writer = notice_writer(NOTICE_CANCELLATION as u32);
        writer.uint(3, 3).uint(0, 84);
        circle(&mut writer, 12.5, -8.25);
        writer.uint(3, 3).uint(0, 2).uint(180, 10).uint(50, 10).uint(0, 62);
        text(&mut writer, "SWIM AREA ");
        text(&mut writer, "CLOSED");
        let payload = writer.finish();

        let notice = AreaNotice::decode(&payload).expect("bad notice");
        assert!(notice.is_cancellation());
        assert_eq!(notice.notice_category(), NoticeCategory::Cancellation);
        assert_eq!(notice.sub_areas().len(), 5);

        // the first path has nothing before it
        match &notice.sub_areas()[0] {
            SubArea::Polyline(p) => {
                assert_eq!(p.origin, None);
                assert!(p.legs.is_empty());
            }
            other => panic!("expected polyline, got {:?}", other),
        }

        // the second path starts at the circle
        match &notice.sub_areas()[2] {
            SubArea::Polyline(p) => {
                let origin = p.origin.expect("no origin");
                assert_approx_eq!(origin.longitude, 12.5, 1e-9);
                assert_approx_eq!(origin.latitude, -8.25, 1e-9);
                assert_eq!(p.precision(), Some(2));
                assert_eq!(p.legs.len(), 1);
                assert_approx_eq!(p.legs[0].angle_deg, 90.0f32);
                assert_eq!(p.legs[0].distance_m, 50);
            }
            other => panic!("expected polyline, got {:?}", other),
        }

        // records are joined without losing the space between them
        assert_eq!(notice.text(), "SWIM AREA CLOSED");
    }

    #[test]
    fn test_reserved_notice_display() {
        let payload = notice_writer(22).finish();
        let notice = AreaNotice::decode(&payload).expect("bad notice");
        assert_eq!(notice.notice_description(), None);

        let disp = format!("{}", notice);
        assert!(disp.contains("notice type 22 (reserved)"), "{}", disp);
        assert!(disp.contains("starts 12-31 23:59 UTC for 60 min"), "{}", disp);
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn test_calculate_start_time() {
        let d = calculate_start_time((3, 20, 16, 6), (2012, 3)).unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2012, 3, 20, 16, 6, 0).unwrap());

        // january notice heard in december
        let d = calculate_start_time((1, 2, 0, 0), (2021, 12)).unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2022, 1, 2, 0, 0, 0).unwrap());

        // december notice heard in january
        let d = calculate_start_time((12, 31, 23, 59), (2021, 1)).unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 0).unwrap());

        // six months either way stays in the same year
        let d = calculate_start_time((1, 1, 0, 0), (2021, 7)).unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());

        // "not available" values
        calculate_start_time((0, 20, 16, 6), (2021, 3)).expect_err("should not succeed");
        calculate_start_time((3, 0, 16, 6), (2021, 3)).expect_err("should not succeed");
        calculate_start_time((3, 20, 24, 6), (2021, 3)).expect_err("should not succeed");
        calculate_start_time((3, 20, 16, 60), (2021, 3)).expect_err("should not succeed");

        // not a leap year
        calculate_start_time((2, 29, 0, 0), (2021, 2)).expect_err("should not succeed");
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn test_notice_times() {
        let payload = BitPayload::from_armored(WHALE_NOTICE, 0).unwrap();
        let notice = AreaNotice::decode(&payload).expect("bad notice");

        let rx = Utc.with_ymd_and_hms(2012, 3, 21, 9, 10, 42).unwrap();
        assert_eq!(
            notice.start_datetime(&rx).unwrap(),
            Utc.with_ymd_and_hms(2012, 3, 20, 16, 6, 0).unwrap()
        );
        assert_eq!(notice.duration(), Some(Duration::minutes(1440)));
        assert_eq!(
            notice.expiry_datetime(&rx).unwrap(),
            Some(Utc.with_ymd_and_hms(2012, 3, 21, 16, 6, 0).unwrap())
        );
        assert!(!notice.is_expired_at(&rx));
        assert!(!notice.is_expired_at(&Utc.with_ymd_and_hms(2012, 3, 21, 16, 6, 0).unwrap()));
        assert!(notice.is_expired_at(&Utc.with_ymd_and_hms(2012, 3, 21, 16, 6, 1).unwrap()));

        // indefinite notices never expire
        let mut writer = notice_writer(0);
        writer.uint(0, 2);
        let mut payload = writer.finish();
        let mut notice = AreaNotice::decode(&payload).expect("bad notice");
        assert_eq!(notice.duration_minutes(), 60);
        notice.duration_minutes = DURATION_INDEFINITE;
        assert!(notice.is_indefinite());
        assert_eq!(notice.duration(), None);
        assert_eq!(notice.expiry_datetime(&rx), Ok(None));
        assert!(!notice.is_expired_at(&Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap()));
        assert!(format!("{}", notice).contains("until cancelled"));

        payload = BitPayload::from_armored(WHALE_NOTICE, 0).unwrap();
        notice = AreaNotice::decode(&payload).expect("bad notice");
        notice.month = 0;
        assert_eq!(notice.start_datetime(&rx), Err(InvalidDateErr {}));
        assert!(!notice.is_expired_at(&rx));
    }
}
