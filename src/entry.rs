//! Cosmetic entry module.
//!
//! `CosmeticEntry` is the value type for one slot of a plate: an item and
//! two stain channels. `LiveSlotState` and `PlateSnapshot` describe what
//! the live plate editor currently holds, which is the baseline for
//! skipping slots that are already correct.

use crate::slot::PlateSlot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item identifier. `0` is the "no item" sentinel.
pub type ItemId = u32;

/// Stain (dye) identifier. `0` means no dye.
pub type StainId = u8;

/// A desired cosmetic for one slot.
///
/// An all-zero entry stored in a plate is an explicit "empty this slot"
/// marker, which is different from the slot being absent from the plate.
///
/// # Examples
///
/// ```rust
/// use glamplate::CosmeticEntry;
///
/// let coat = CosmeticEntry::new(100).with_stains(3, 5);
/// assert_eq!(coat.stains(), (3, 5));
/// assert!(!coat.is_empty());
/// assert!(CosmeticEntry::empty().is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CosmeticEntry {
    pub item_id: ItemId,
    #[serde(default)]
    pub stain1: StainId,
    #[serde(default)]
    pub stain2: StainId,
}

impl CosmeticEntry {
    /// An undyed entry for `item_id`.
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            stain1: 0,
            stain2: 0,
        }
    }

    /// The explicit-empty marker.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace both stain channels.
    pub fn with_stains(mut self, stain1: StainId, stain2: StainId) -> Self {
        self.stain1 = stain1;
        self.stain2 = stain2;
        self
    }

    /// Whether this entry names no item.
    pub fn is_empty(&self) -> bool {
        self.item_id == 0
    }

    /// Whether any stain channel is set.
    pub fn is_dyed(&self) -> bool {
        self.stain1 != 0 || self.stain2 != 0
    }

    /// Both stain channels as a pair.
    pub fn stains(&self) -> (StainId, StainId) {
        (self.stain1, self.stain2)
    }
}

/// The state of one slot in the live plate editor.
///
/// The editor keeps committed stains and a preview override per channel.
/// A nonzero preview stain supersedes the committed one when comparing
/// against a saved entry, and only then.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveSlotState {
    pub item_id: ItemId,
    pub stain1: StainId,
    pub stain2: StainId,
    pub preview_stain1: StainId,
    pub preview_stain2: StainId,
}

impl LiveSlotState {
    /// The entry this slot shows, preview stains taking precedence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use glamplate::{CosmeticEntry, LiveSlotState};
    ///
    /// let live = LiveSlotState {
    ///     item_id: 100,
    ///     stain1: 1,
    ///     stain2: 2,
    ///     preview_stain1: 9,
    ///     preview_stain2: 0,
    /// };
    /// assert_eq!(live.effective(), CosmeticEntry::new(100).with_stains(9, 2));
    /// ```
    pub fn effective(&self) -> CosmeticEntry {
        let stain1 = if self.preview_stain1 != 0 {
            self.preview_stain1
        } else {
            self.stain1
        };
        let stain2 = if self.preview_stain2 != 0 {
            self.preview_stain2
        } else {
            self.stain2
        };

        CosmeticEntry {
            item_id: self.item_id,
            stain1,
            stain2,
        }
    }
}

/// What the live plate currently holds, per slot.
///
/// Recomputed on demand for each load and never cached. Slots with no item
/// are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlateSnapshot {
    entries: BTreeMap<PlateSlot, CosmeticEntry>,
}

impl PlateSnapshot {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from live editor state, normalizing preview stains.
    pub fn from_live<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = (PlateSlot, LiveSlotState)>,
    {
        let entries = slots
            .into_iter()
            .filter(|(_, live)| live.item_id != 0)
            .map(|(slot, live)| (slot, live.effective()))
            .collect();
        Self { entries }
    }

    /// Record what `slot` shows.
    pub fn insert(&mut self, slot: PlateSlot, entry: CosmeticEntry) {
        self.entries.insert(slot, entry);
    }

    /// What `slot` shows, if anything.
    pub fn get(&self, slot: PlateSlot) -> Option<&CosmeticEntry> {
        self.entries.get(&slot)
    }

    /// Whether `slot` already holds exactly `desired` (item and both stains).
    pub fn matches(&self, slot: PlateSlot, desired: &CosmeticEntry) -> bool {
        self.entries.get(&slot) == Some(desired)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PlateSlot, CosmeticEntry)> for PlateSnapshot {
    fn from_iter<T: IntoIterator<Item = (PlateSlot, CosmeticEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
