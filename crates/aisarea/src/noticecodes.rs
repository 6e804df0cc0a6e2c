//! Area Notice type codes
//!
//! The seven-bit notice type of an [`AreaNotice`](crate::AreaNotice)
//! is grouped into blocks by purpose:
//!
//! | Codes   | Category                  |
//! |---------|---------------------------|
//! | 0–22    | Caution Area              |
//! | 23–31   | Environmental Caution Area|
//! | 32–39   | Restricted Area           |
//! | 40–55   | Anchorage Area            |
//! | 56–63   | Security Alert            |
//! | 64–79   | Distress Area             |
//! | 80–87   | Instruction               |
//! | 88–95   | Information               |
//! | 96–111  | Chart Feature             |
//! | 112–119 | Report from Ship          |
//! | 120–125 | Route                     |
//! | 126     | Other                     |
//! | 127     | Cancellation              |
//!
//! Not every code within a block is assigned. Unassigned codes
//! are reserved for future use and have no description.

use std::fmt;

use phf::phf_map;
use strum::EnumMessage;

/// Broad purpose of an Area Notice
///
/// ```
/// use aisarea::NoticeCategory;
///
/// assert_eq!(NoticeCategory::Caution, NoticeCategory::from_code(1));
/// assert_eq!(NoticeCategory::Cancellation, NoticeCategory::from_code(127));
/// assert_eq!("Distress Area", NoticeCategory::from_code(74).as_display_str());
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumIter,
)]
pub enum NoticeCategory {
    /// Hazards to be aware of
    #[strum(detailed_message = "Caution Area")]
    Caution,

    /// Weather and sea state hazards
    #[strum(detailed_message = "Environmental Caution Area")]
    Environmental,

    /// Areas with restricted entry or activity
    #[strum(detailed_message = "Restricted Area")]
    Restricted,

    /// Anchorage status
    #[strum(detailed_message = "Anchorage Area")]
    Anchorage,

    /// Maritime security levels
    #[strum(detailed_message = "Security Alert")]
    Security,

    /// Vessels in distress, search and rescue
    #[strum(detailed_message = "Distress Area")]
    Distress,

    /// Instructions to mariners
    #[strum(detailed_message = "Instruction")]
    Instruction,

    /// General information
    #[strum(detailed_message = "Information")]
    Information,

    /// Obstructions and changes to charted features
    #[strum(detailed_message = "Chart Feature")]
    ChartFeature,

    /// Reports made by ships
    #[strum(detailed_message = "Report from Ship")]
    ShipReport,

    /// Recommended routes
    #[strum(detailed_message = "Route")]
    Route,

    /// Defined in the associated text
    #[strum(detailed_message = "Other")]
    Other,

    /// Cancels the notice with the same link ID
    #[strum(detailed_message = "Cancellation")]
    Cancellation,
}

impl NoticeCategory {
    /// Category of a seven-bit notice type code
    ///
    /// Only the low seven bits of `code` are considered.
    pub fn from_code(code: u8) -> Self {
        match code & 0x7f {
            0..=22 => Self::Caution,
            23..=31 => Self::Environmental,
            32..=39 => Self::Restricted,
            40..=55 => Self::Anchorage,
            56..=63 => Self::Security,
            64..=79 => Self::Distress,
            80..=87 => Self::Instruction,
            88..=95 => Self::Information,
            96..=111 => Self::ChartFeature,
            112..=119 => Self::ShipReport,
            120..=125 => Self::Route,
            126 => Self::Other,
            _ => Self::Cancellation,
        }
    }

    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }
}

impl fmt::Display for NoticeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// Describe a notice type code
///
/// Returns the full description of an assigned notice type,
/// like "`Caution Area: Marine mammals in area - reduce speed`,"
/// or `None` if `code` is reserved.
///
/// ```
/// use aisarea::notice_description;
///
/// assert_eq!(
///     Some("Caution Area: Marine mammals in area - reduce speed"),
///     notice_description(1)
/// );
/// assert_eq!(None, notice_description(22));
/// ```
pub fn notice_description(code: u8) -> Option<&'static str> {
    NOTICE_DESCRIPTIONS.get(&code).copied()
}

/// Descriptions of every assigned notice type
static NOTICE_DESCRIPTIONS: phf::Map<u8, &'static str> = phf_map! {
    0u8 => "Caution Area: Marine mammals habitat",
    1u8 => "Caution Area: Marine mammals in area - reduce speed",
    2u8 => "Caution Area: Marine mammals in area - stay clear",
    3u8 => "Caution Area: Marine mammals in area - report sightings",
    4u8 => "Caution Area: Protected habitat - reduce speed",
    5u8 => "Caution Area: Protected habitat - stay clear",
    6u8 => "Caution Area: Protected habitat - no fishing or anchoring",
    7u8 => "Caution Area: Derelicts (drifting objects)",
    8u8 => "Caution Area: Traffic congestion",
    9u8 => "Caution Area: Marine event",
    10u8 => "Caution Area: Divers down",
    11u8 => "Caution Area: Swim area",
    12u8 => "Caution Area: Dredge operations",
    13u8 => "Caution Area: Survey operations",
    14u8 => "Caution Area: Underwater operation",
    15u8 => "Caution Area: Seaplane operations",
    16u8 => "Caution Area: Fishery - nets in water",
    17u8 => "Caution Area: Cluster of fishing vessels",
    18u8 => "Caution Area: Fairway closed",
    19u8 => "Caution Area: Harbour closed",
    20u8 => "Caution Area: Risk (define in associated text)",
    21u8 => "Caution Area: Underwater vehicle operation",

    23u8 => "Environmental Caution Area: Storm front (line squall)",
    24u8 => "Environmental Caution Area: Hazardous sea ice",
    25u8 => "Environmental Caution Area: Storm warning (storm cell or line of storms)",
    26u8 => "Environmental Caution Area: High wind",
    27u8 => "Environmental Caution Area: High waves",
    28u8 => "Environmental Caution Area: Restricted visibility (fog, rain, etc.)",
    29u8 => "Environmental Caution Area: Strong currents",
    30u8 => "Environmental Caution Area: Heavy icing",

    32u8 => "Restricted Area: Fishing prohibited",
    33u8 => "Restricted Area: No anchoring",
    34u8 => "Restricted Area: Entry approval required prior to transit",
    35u8 => "Restricted Area: Entry prohibited",
    36u8 => "Restricted Area: Active military OPAREA",
    37u8 => "Restricted Area: Firing - danger area",
    38u8 => "Restricted Area: Drifting mines",

    40u8 => "Anchorage Area: Anchorage open",
    41u8 => "Anchorage Area: Anchorage closed",
    42u8 => "Anchorage Area: Anchoring prohibited",
    43u8 => "Anchorage Area: Deep draft anchorage",
    44u8 => "Anchorage Area: Shallow draft anchorage",
    45u8 => "Anchorage Area: Vessel transfer operations",

    56u8 => "Security Alert - Level 1",
    57u8 => "Security Alert - Level 2",
    58u8 => "Security Alert - Level 3",

    64u8 => "Distress Area: Vessel disabled and adrift",
    65u8 => "Distress Area: Vessel sinking",
    66u8 => "Distress Area: Vessel abandoning ship",
    67u8 => "Distress Area: Vessel requests medical assistance",
    68u8 => "Distress Area: Vessel flooding",
    69u8 => "Distress Area: Vessel fire/explosion",
    70u8 => "Distress Area: Vessel grounding",
    71u8 => "Distress Area: Vessel collision",
    72u8 => "Distress Area: Vessel listing/capsizing",
    73u8 => "Distress Area: Vessel under assault",
    74u8 => "Distress Area: Person overboard",
    75u8 => "Distress Area: SAR area",
    76u8 => "Distress Area: Pollution response area",

    80u8 => "Instruction: Contact VTS at this point/juncture",
    81u8 => "Instruction: Contact Port Administration at this point/juncture",
    82u8 => "Instruction: Do not proceed beyond this point/juncture",
    83u8 => "Instruction: Await instructions prior to proceeding beyond this point/juncture",
    84u8 => "Instruction: Proceed to this location - await instructions",
    85u8 => "Instruction: Clearance granted - proceed to berth",

    88u8 => "Information: Pilot boarding position",
    89u8 => "Information: Icebreaker waiting area",
    90u8 => "Information: Places of refuge",
    91u8 => "Information: Position of icebreakers",
    92u8 => "Information: Location of response units",
    93u8 => "Information: VTS active target",
    94u8 => "Information: Rogue or suspicious vessel",
    95u8 => "Information: Vessel requesting non-distress assistance",

    96u8 => "Chart Feature: Sunken vessel",
    97u8 => "Chart Feature: Submerged object",
    98u8 => "Chart Feature: Semi-submerged object",
    99u8 => "Chart Feature: Shoal area",
    100u8 => "Chart Feature: Shoal area due north",
    101u8 => "Chart Feature: Shoal area due east",
    102u8 => "Chart Feature: Shoal area due south",
    103u8 => "Chart Feature: Shoal area due west",
    104u8 => "Chart Feature: Channel obstruction",
    105u8 => "Chart Feature: Reduced vertical clearance",
    106u8 => "Chart Feature: Bridge closed",
    107u8 => "Chart Feature: Bridge partially open",
    108u8 => "Chart Feature: Bridge fully open",

    112u8 => "Report from Ship: Icing info",
    114u8 => "Report from Ship: Miscellaneous information (define in associated text)",

    120u8 => "Route: Recommended route",
    121u8 => "Route: Alternative route",
    122u8 => "Route: Recommended route through ice",

    126u8 => "Other (define in associated text)",
    127u8 => "Cancellation: cancel area as identified by link ID",
};
