//! Plate slot module.
//!
//! Provides the `PlateSlot` type, the fixed catalog of the twelve
//! equipment positions a glamour plate can override. Slots have a stable
//! ordinal identity (0..=11) which also defines resolution order.

use crate::error::PlateError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// One of the twelve equipment positions on a glamour plate.
///
/// The ordinal (`as u32`) is stable and is the order in which slots are
/// resolved and applied.
///
/// # Examples
///
/// ```rust
/// use glamplate::PlateSlot;
///
/// let head = PlateSlot::Head;
/// assert_eq!(head.ordinal(), 2);
/// assert_eq!(head.name(), "Head");
///
/// // Persisted by variant name, ordinals are accepted too
/// let parsed: PlateSlot = "RightRing".parse().unwrap();
/// let by_ordinal: PlateSlot = "10".parse().unwrap();
/// assert_eq!(parsed, by_ordinal);
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PlateSlot {
    MainHand = 0,
    OffHand = 1,
    Head = 2,
    Body = 3,
    Hands = 4,
    Legs = 5,
    Feet = 6,
    Ears = 7,
    Neck = 8,
    Wrists = 9,
    RightRing = 10,
    LeftRing = 11,
}

impl PlateSlot {
    /// Number of slots on a plate.
    pub const COUNT: usize = 12;

    /// Every slot, in ordinal order.
    pub const ALL: [PlateSlot; PlateSlot::COUNT] = [
        PlateSlot::MainHand,
        PlateSlot::OffHand,
        PlateSlot::Head,
        PlateSlot::Body,
        PlateSlot::Hands,
        PlateSlot::Legs,
        PlateSlot::Feet,
        PlateSlot::Ears,
        PlateSlot::Neck,
        PlateSlot::Wrists,
        PlateSlot::RightRing,
        PlateSlot::LeftRing,
    ];

    /// The stable ordinal of this slot.
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// Look up a slot by ordinal. Returns `None` outside `0..=11`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use glamplate::PlateSlot;
    ///
    /// assert_eq!(PlateSlot::from_ordinal(0), Some(PlateSlot::MainHand));
    /// assert_eq!(PlateSlot::from_ordinal(12), None);
    /// ```
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Human-readable name, as shown to players.
    pub fn name(self) -> &'static str {
        match self {
            PlateSlot::MainHand => "Main Hand",
            PlateSlot::OffHand => "Off Hand",
            PlateSlot::Head => "Head",
            PlateSlot::Body => "Body",
            PlateSlot::Hands => "Hands",
            PlateSlot::Legs => "Legs",
            PlateSlot::Feet => "Feet",
            PlateSlot::Ears => "Ears",
            PlateSlot::Neck => "Neck",
            PlateSlot::Wrists => "Wrists",
            PlateSlot::RightRing => "Right Ring",
            PlateSlot::LeftRing => "Left Ring",
        }
    }

    /// Identifier used in persisted data (the variant name).
    pub fn key(self) -> &'static str {
        match self {
            PlateSlot::MainHand => "MainHand",
            PlateSlot::OffHand => "OffHand",
            PlateSlot::Head => "Head",
            PlateSlot::Body => "Body",
            PlateSlot::Hands => "Hands",
            PlateSlot::Legs => "Legs",
            PlateSlot::Feet => "Feet",
            PlateSlot::Ears => "Ears",
            PlateSlot::Neck => "Neck",
            PlateSlot::Wrists => "Wrists",
            PlateSlot::RightRing => "RightRing",
            PlateSlot::LeftRing => "LeftRing",
        }
    }
}

impl TryFrom<u32> for PlateSlot {
    type Error = PlateError;

    fn try_from(ordinal: u32) -> Result<Self, Self::Error> {
        Self::from_ordinal(ordinal).ok_or_else(|| PlateError::UnknownSlot(ordinal.to_string()))
    }
}

impl FromStr for PlateSlot {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(slot) = Self::ALL.iter().find(|slot| slot.key() == s) {
            return Ok(*slot);
        }

        match s.parse::<u32>() {
            Ok(ordinal) => Self::try_from(ordinal),
            Err(_) => Err(PlateError::UnknownSlot(s.to_string())),
        }
    }
}

impl Serialize for PlateSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for PlateSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for PlateSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
