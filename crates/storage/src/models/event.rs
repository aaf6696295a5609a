use serde::{Deserialize, Serialize};

/// Official WCA events. The export's rank tables also reference retired events
/// (magic, master magic, 3x3 with feet); those decode to `None` since no new
/// record can ever be set for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Event {
    #[serde(rename = "333")]
    ThreeByThree = 1,
    #[serde(rename = "222")]
    TwoByTwo = 2,
    #[serde(rename = "444")]
    FourByFour = 3,
    #[serde(rename = "555")]
    FiveByFive = 4,
    #[serde(rename = "666")]
    SixBySix = 5,
    #[serde(rename = "777")]
    SevenBySeven = 6,
    #[serde(rename = "333bf")]
    ThreeBlindfolded = 7,
    #[serde(rename = "333fm")]
    ThreeFewestMoves = 8,
    #[serde(rename = "333oh")]
    ThreeOneHanded = 9,
    #[serde(rename = "clock")]
    Clock = 10,
    #[serde(rename = "minx")]
    Megaminx = 11,
    #[serde(rename = "pyram")]
    Pyraminx = 12,
    #[serde(rename = "skewb")]
    Skewb = 13,
    #[serde(rename = "sq1")]
    SquareOne = 14,
    #[serde(rename = "444bf")]
    FourBlindfolded = 15,
    #[serde(rename = "555bf")]
    FiveBlindfolded = 16,
    #[serde(rename = "333mbf")]
    MultiBlind = 17,
}

impl Event {
    /// All events in their stable numeric order. Snapshot buckets and diff
    /// output follow this order.
    pub const ALL: [Event; 17] = [
        Event::ThreeByThree,
        Event::TwoByTwo,
        Event::FourByFour,
        Event::FiveByFive,
        Event::SixBySix,
        Event::SevenBySeven,
        Event::ThreeBlindfolded,
        Event::ThreeFewestMoves,
        Event::ThreeOneHanded,
        Event::Clock,
        Event::Megaminx,
        Event::Pyraminx,
        Event::Skewb,
        Event::SquareOne,
        Event::FourBlindfolded,
        Event::FiveBlindfolded,
        Event::MultiBlind,
    ];

    /// Machine key used as the `eventId` column value and as the snapshot key.
    pub fn key(self) -> &'static str {
        match self {
            Self::ThreeByThree => "333",
            Self::TwoByTwo => "222",
            Self::FourByFour => "444",
            Self::FiveByFive => "555",
            Self::SixBySix => "666",
            Self::SevenBySeven => "777",
            Self::ThreeBlindfolded => "333bf",
            Self::ThreeFewestMoves => "333fm",
            Self::ThreeOneHanded => "333oh",
            Self::Clock => "clock",
            Self::Megaminx => "minx",
            Self::Pyraminx => "pyram",
            Self::Skewb => "skewb",
            Self::SquareOne => "sq1",
            Self::FourBlindfolded => "444bf",
            Self::FiveBlindfolded => "555bf",
            Self::MultiBlind => "333mbf",
        }
    }

    /// Decodes a machine key. Unknown keys (retired events) are not an error.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::ThreeByThree => "3x3",
            Self::TwoByTwo => "2x2",
            Self::FourByFour => "4x4",
            Self::FiveByFive => "5x5",
            Self::SixBySix => "6x6",
            Self::SevenBySeven => "7x7",
            Self::ThreeBlindfolded => "3x3 Blindfolded",
            Self::ThreeFewestMoves => "3x3 FMC",
            Self::ThreeOneHanded => "3x3 OH",
            Self::Clock => "Clock",
            Self::Megaminx => "Megaminx",
            Self::Pyraminx => "Pyraminx",
            Self::Skewb => "Skewb",
            Self::SquareOne => "Square 1",
            Self::FourBlindfolded => "4x4 Blindfolded",
            Self::FiveBlindfolded => "5x5 Blindfolded",
            Self::MultiBlind => "3x3 Multiblind",
        }
    }
}
