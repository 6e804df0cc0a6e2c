//! Geographic sub-areas of an Area Notice
//!
//! An Area Notice describes its area as a list of fixed-size
//! sub-area records. Each record starts with a three-bit shape
//! tag, followed by an 84-bit body whose layout depends on the
//! tag:
//!
//! | Tag | Shape     | Body                                              |
//! |-----|-----------|---------------------------------------------------|
//! | 0   | Circle    | scale, position, radius, spare                    |
//! | 1   | Rectangle | scale, position, E dim, N dim, orientation, spare |
//! | 2   | Sector    | scale, position, radius, left and right bounds    |
//! | 3   | Polyline  | scale, four (angle, distance) legs, spare         |
//! | 4   | Polygon   | scale, four (angle, distance) legs, spare         |
//! | 5   | Text      | fourteen six-bit characters                       |
//!
//! Tags 6 and 7 are not defined.

use std::fmt;

use arrayvec::ArrayVec;
use strum::EnumMessage;

use crate::bits::{BitCursor, BitsExhausted};
use crate::message::MessageDecodeErr;

/// Bits in one sub-area record, including its shape tag
pub const SUB_AREA_BITS: usize = 87;

/// Bits in a shape tag
pub const SHAPE_TAG_BITS: usize = 3;

/// Characters in one text sub-area
pub const TEXT_CHARS: usize = 14;

/// Maximum legs in one polyline or polygon record
pub const MAX_LEGS: usize = 4;

// body width, after the tag
const SHAPE_BODY_BITS: usize = SUB_AREA_BITS - SHAPE_TAG_BITS;

// distance multipliers, indexed by the two-bit scale factor
const SCALE_MULTIPLIERS: [u32; 4] = [1, 10, 100, 1000];

// raw coordinates are in 1/10000 minute
const COORDINATE_SCALE: f64 = 60000.0;

/// Kind of sub-area shape
///
/// The discriminant is the shape tag transmitted on the wire.
///
/// ```
/// use aisarea::ShapeKind;
///
/// assert_eq!(Some(ShapeKind::Text), ShapeKind::from_tag(5));
/// assert_eq!(None, ShapeKind::from_tag(6));
/// assert_eq!("polygon", ShapeKind::Polygon.as_str());
/// assert_eq!("Polygon", &format!("{}", ShapeKind::Polygon));
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumIter,
    strum_macros::FromRepr,
)]
#[repr(u8)]
pub enum ShapeKind {
    /// Circle, or a point if the radius is zero
    #[strum(serialize = "circle", detailed_message = "Circle")]
    Circle = 0,

    /// Rectangle with orientation
    #[strum(serialize = "rectangle", detailed_message = "Rectangle")]
    Rectangle = 1,

    /// Sector of a circle
    #[strum(serialize = "sector", detailed_message = "Sector")]
    Sector = 2,

    /// Open line through up to four more vertices
    #[strum(serialize = "polyline", detailed_message = "Polyline")]
    Polyline = 3,

    /// Closed polygon through up to four more vertices
    #[strum(serialize = "polygon", detailed_message = "Polygon")]
    Polygon = 4,

    /// Free text
    #[strum(serialize = "text", detailed_message = "Text")]
    Text = 5,
}

impl ShapeKind {
    /// Convert a three-bit shape tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::from_repr(tag)
    }

    /// Shape tag, as transmitted
    pub fn tag(&self) -> u8 {
        *self as u8
    }

    /// Short lowercase name, like "`circle`"
    pub fn as_str(&self) -> &'static str {
        self.get_serializations()[0]
    }

    /// Human-readable name, like "`Circle`"
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }
}

impl AsRef<str> for ShapeKind {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// A position with its precision
///
/// Longitude and latitude are decoded from signed integers in
/// units of 1/10000 minute. The `precision` field reports how
/// many decimal places of the coordinates the sender considers
/// meaningful; it does not rescale them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    /// Longitude, degrees east. 181 means "not available."
    pub longitude: f64,

    /// Latitude, degrees north. 91 means "not available."
    pub latitude: f64,

    /// Meaningful decimal places, 0–4
    pub precision: u8,
}

impl Position {
    /// True if both coordinates are within range
    ///
    /// The "not available" values of 181° longitude and 91°
    /// latitude, like any other out-of-range value, are reported
    /// as unavailable.
    pub fn is_available(&self) -> bool {
        self.longitude.abs() <= 180.0 && self.latitude.abs() <= 90.0
    }

    fn take(cursor: &mut BitCursor<'_>) -> Result<Self, BitsExhausted> {
        Ok(Self {
            longitude: cursor.take_int(25)? as f64 / COORDINATE_SCALE,
            latitude: cursor.take_int(24)? as f64 / COORDINATE_SCALE,
            precision: cursor.take_uint(3)? as u8,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = self.precision as usize;
        write!(
            f,
            "{:.*}, {:.*}",
            places, self.longitude, places, self.latitude
        )
    }
}

/// A circle, or a point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// Raw two-bit distance scale factor
    pub scale_factor: u8,

    /// Center of the circle
    pub center: Position,

    /// Radius in meters, already scaled. Zero for a point.
    pub radius_m: u32,

    /// Spare bits; normally zero
    pub spare: u32,
}

impl Circle {
    fn take(cursor: &mut BitCursor<'_>) -> Result<Self, BitsExhausted> {
        let scale_factor = cursor.take_uint(2)? as u8;
        let center = Position::take(cursor)?;
        let radius_m = cursor.take_uint(12)? * multiplier(scale_factor);
        let spare = cursor.take_uint(18)?;
        Ok(Self {
            scale_factor,
            center,
            radius_m,
            spare,
        })
    }
}

/// An oriented rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    /// Raw two-bit distance scale factor
    pub scale_factor: u8,

    /// Reference position of the rectangle
    pub center: Position,

    /// East-west dimension in meters, already scaled
    pub e_dim_m: u32,

    /// North-south dimension in meters, already scaled
    pub n_dim_m: u32,

    /// Orientation, degrees clockwise from true north
    pub orient_deg: u16,

    /// Spare bits; normally zero
    pub spare: u8,
}

impl Rectangle {
    fn take(cursor: &mut BitCursor<'_>) -> Result<Self, BitsExhausted> {
        let scale_factor = cursor.take_uint(2)? as u8;
        let center = Position::take(cursor)?;
        let e_dim_m = cursor.take_uint(8)? * multiplier(scale_factor);
        let n_dim_m = cursor.take_uint(8)? * multiplier(scale_factor);
        let orient_deg = cursor.take_uint(9)? as u16;
        let spare = cursor.take_uint(5)? as u8;
        Ok(Self {
            scale_factor,
            center,
            e_dim_m,
            n_dim_m,
            orient_deg,
            spare,
        })
    }
}

/// A sector of a circle
///
/// The sector spans clockwise from the left bound to the
/// right bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sector {
    /// Raw two-bit distance scale factor
    pub scale_factor: u8,

    /// Center of the circle
    pub center: Position,

    /// Radius in meters, already scaled
    pub radius_m: u32,

    /// Left boundary, degrees true
    pub left_bound_deg: u16,

    /// Right boundary, degrees true
    pub right_bound_deg: u16,
}

impl Sector {
    fn take(cursor: &mut BitCursor<'_>) -> Result<Self, BitsExhausted> {
        let scale_factor = cursor.take_uint(2)? as u8;
        let center = Position::take(cursor)?;
        let radius_m = cursor.take_uint(12)? * multiplier(scale_factor);
        let left_bound_deg = cursor.take_uint(9)? as u16;
        let right_bound_deg = cursor.take_uint(9)? as u16;
        Ok(Self {
            scale_factor,
            center,
            radius_m,
            left_bound_deg,
            right_bound_deg,
        })
    }
}

/// One leg of a polyline or polygon
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leg {
    /// Bearing to the next vertex, degrees true, in half-degree steps
    pub angle_deg: f32,

    /// Distance to the next vertex in meters, already scaled
    pub distance_m: u32,
}

/// Vertices of a polyline or polygon
///
/// Path records carry no coordinates. Their first vertex is the
/// position of the most recent circle, rectangle, or sector in
/// the same notice, if any; each [`Leg`] then gives the bearing
/// and distance to the next vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Raw two-bit distance scale factor
    pub scale_factor: u8,

    /// First vertex, from the preceding point shape
    pub origin: Option<Position>,

    /// Legs to each following vertex
    ///
    /// The list ends at the first leg with zero distance.
    pub legs: ArrayVec<Leg, MAX_LEGS>,

    /// Spare bits; normally zero
    pub spare: u8,
}

impl Path {
    /// Precision of the first vertex, if it is known
    pub fn precision(&self) -> Option<u8> {
        self.origin.map(|pos| pos.precision)
    }

    fn take(cursor: &mut BitCursor<'_>, origin: Option<Position>) -> Result<Self, BitsExhausted> {
        let scale_factor = cursor.take_uint(2)? as u8;

        // every leg is on the wire, even after the list ends
        let mut legs = ArrayVec::new();
        let mut ended = false;
        for _ in 0..MAX_LEGS {
            let angle = cursor.take_uint(10)?;
            let distance = cursor.take_uint(10)?;
            ended |= distance == 0;
            if !ended {
                legs.push(Leg {
                    angle_deg: angle as f32 * 0.5,
                    distance_m: distance * multiplier(scale_factor),
                });
            }
        }

        let spare = cursor.take_uint(2)? as u8;
        Ok(Self {
            scale_factor,
            origin,
            legs,
            spare,
        })
    }
}

/// Free text
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Text {
    /// Up to fourteen characters, with trailing fill removed
    pub text: String,
}

impl Text {
    fn take(cursor: &mut BitCursor<'_>) -> Result<Self, BitsExhausted> {
        Ok(Self {
            text: cursor.take_text(TEXT_CHARS)?,
        })
    }
}

/// One sub-area of an Area Notice
///
/// Match on the variant to access shape-specific fields.
///
/// ```
/// # use aisarea::{AreaNotice, BitPayload};
/// use aisarea::SubArea;
/// # let payload = BitPayload::from_armored(
/// #     "803Ovrh0EPM0WB0h2l0MwJUi=6B4G9000aip8<2Bt2Hq2Qhp", 0).unwrap();
/// # let notice = AreaNotice::decode(&payload).unwrap();
///
/// for area in notice.sub_areas() {
///     match area {
///         SubArea::Circle(circle) => assert_eq!(14810, circle.radius_m),
///         SubArea::Text(text) => assert_eq!("NOAA RW SGHTNG", text.text),
///         _ => unreachable!(),
///     }
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SubArea {
    /// A circle or point
    Circle(Circle),

    /// A rectangle
    Rectangle(Rectangle),

    /// A sector
    Sector(Sector),

    /// An open line
    Polyline(Path),

    /// A closed polygon
    Polygon(Path),

    /// Free text
    Text(Text),
}

impl SubArea {
    /// Shape of this sub-area
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle(_) => ShapeKind::Circle,
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Sector(_) => ShapeKind::Sector,
            Self::Polyline(_) => ShapeKind::Polyline,
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::Text(_) => ShapeKind::Text,
        }
    }

    /// Coordinate precision
    ///
    /// Text sub-areas have no precision. Paths report the
    /// precision of their origin, if they have one.
    pub fn precision(&self) -> Option<u8> {
        match self {
            Self::Circle(c) => Some(c.center.precision),
            Self::Rectangle(r) => Some(r.center.precision),
            Self::Sector(s) => Some(s.center.precision),
            Self::Polyline(p) | Self::Polygon(p) => p.precision(),
            Self::Text(_) => None,
        }
    }

    /// Transmitted position, for shapes which have one
    ///
    /// Paths and text carry no position of their own and
    /// return `None`.
    pub fn position(&self) -> Option<&Position> {
        match self {
            Self::Circle(c) => Some(&c.center),
            Self::Rectangle(r) => Some(&r.center),
            Self::Sector(s) => Some(&s.center),
            Self::Polyline(_) | Self::Polygon(_) | Self::Text(_) => None,
        }
    }

    /// Decode one sub-area record
    ///
    /// Reads the shape tag and then exactly the body width of
    /// that shape. `origin` is the position of the most recent
    /// point shape, used as the first vertex of paths.
    pub(crate) fn take(
        cursor: &mut BitCursor<'_>,
        origin: Option<Position>,
    ) -> Result<Self, MessageDecodeErr> {
        let tag = cursor.take_uint(SHAPE_TAG_BITS)? as u8;
        let kind = ShapeKind::from_tag(tag).ok_or(MessageDecodeErr::UnknownShape(tag))?;

        Self::take_body(kind, cursor, origin)
            .map_err(|source| MessageDecodeErr::TruncatedSubArea {
                shape: kind,
                source,
            })
    }

    fn take_body(
        kind: ShapeKind,
        cursor: &mut BitCursor<'_>,
        origin: Option<Position>,
    ) -> Result<Self, BitsExhausted> {
        // all bodies are the same width; check once up front so
        // that no shape is ever partly decoded
        let remaining = cursor.remaining_bits();
        if remaining < SHAPE_BODY_BITS {
            return Err(BitsExhausted {
                requested: SHAPE_BODY_BITS,
                remaining,
            });
        }

        let start = cursor.position();
        let out = match kind {
            ShapeKind::Circle => Self::Circle(Circle::take(cursor)?),
            ShapeKind::Rectangle => Self::Rectangle(Rectangle::take(cursor)?),
            ShapeKind::Sector => Self::Sector(Sector::take(cursor)?),
            ShapeKind::Polyline => Self::Polyline(Path::take(cursor, origin)?),
            ShapeKind::Polygon => Self::Polygon(Path::take(cursor, origin)?),
            ShapeKind::Text => Self::Text(Text::take(cursor)?),
        };
        debug_assert_eq!(cursor.position() - start, SHAPE_BODY_BITS);

        Ok(out)
    }
}

impl fmt::Display for SubArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle(c) => write!(f, "circle({}, radius {} m)", c.center, c.radius_m),
            Self::Rectangle(r) => write!(
                f,
                "rectangle({}, {} m E × {} m N, {}°)",
                r.center, r.e_dim_m, r.n_dim_m, r.orient_deg
            ),
            Self::Sector(s) => write!(
                f,
                "sector({}, radius {} m, {}°–{}°)",
                s.center, s.radius_m, s.left_bound_deg, s.right_bound_deg
            ),
            Self::Polyline(p) | Self::Polygon(p) => {
                write!(f, "{}(", self.kind().as_str())?;
                match &p.origin {
                    Some(origin) => write!(f, "{}", origin)?,
                    None => write!(f, "?")?,
                }
                for leg in &p.legs {
                    write!(f, "; {}° {} m", leg.angle_deg, leg.distance_m)?;
                }
                write!(f, ")")
            }
            Self::Text(t) => write!(f, "text(\"{}\")", t.text),
        }
    }
}

#[inline]
fn multiplier(scale_factor: u8) -> u32 {
    SCALE_MULTIPLIERS[scale_factor as usize & 0x3]
}
