//! Saved plate module.
//!
//! A `SavedPlate` is the persisted form of a glamour plate: a name, a
//! partial mapping of slots to cosmetic entries, a sorted tag set, and
//! whether unspecified slots should be filled from the default set.

use crate::entry::{CosmeticEntry, StainId};
use crate::slot::PlateSlot;
use crate::tables::GameTables;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A saved glamour plate.
///
/// Slots missing from `entries` are left as they are when the plate is
/// applied (or filled from the default set when `fill_with_default_set`
/// is on). A slot mapped to [`CosmeticEntry::empty`] is cleared.
///
/// # Examples
///
/// ```rust
/// use glamplate::{CosmeticEntry, PlateSlot, SavedPlate};
///
/// let mut plate = SavedPlate::new("Summer");
/// plate.set_entry(PlateSlot::Body, CosmeticEntry::new(100).with_stains(3, 5));
/// plate.clear_slot(PlateSlot::Head);
/// plate.add_tag(" beach ");
///
/// assert_eq!(plate.entry(PlateSlot::Head), Some(&CosmeticEntry::empty()));
/// assert_eq!(plate.entry(PlateSlot::Feet), None);
/// assert!(plate.has_tag("beach"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPlate")]
pub struct SavedPlate {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Items")]
    entries: BTreeMap<PlateSlot, CosmeticEntry>,

    #[serde(rename = "Tags")]
    tags: BTreeSet<String>,

    #[serde(rename = "FillWithNewEmperor")]
    pub fill_with_default_set: bool,
}

impl SavedPlate {
    /// An empty plate with no tags and default fill off.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
            tags: BTreeSet::new(),
            fill_with_default_set: false,
        }
    }

    /// Build a plate from slot entries.
    pub fn with_entries<I>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (PlateSlot, CosmeticEntry)>,
    {
        let mut plate = Self::new(name);
        plate.entries.extend(entries);
        plate
    }

    /// The stored entry for `slot`, without default fill.
    pub fn entry(&self, slot: PlateSlot) -> Option<&CosmeticEntry> {
        self.entries.get(&slot)
    }

    /// All specified slots, in ordinal order.
    pub fn entries(&self) -> impl Iterator<Item = (PlateSlot, &CosmeticEntry)> {
        self.entries.iter().map(|(slot, entry)| (*slot, entry))
    }

    /// Store `entry` for `slot`, replacing any previous one.
    pub fn set_entry(&mut self, slot: PlateSlot, entry: CosmeticEntry) {
        self.entries.insert(slot, entry);
    }

    /// Mark `slot` as explicitly empty.
    pub fn clear_slot(&mut self, slot: PlateSlot) {
        self.entries.insert(slot, CosmeticEntry::empty());
    }

    /// Remove `slot` from the plate so it is left untouched on apply.
    pub fn unset_slot(&mut self, slot: PlateSlot) -> Option<CosmeticEntry> {
        self.entries.remove(&slot)
    }

    /// Change the plate's name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The entry resolution works from for `slot`.
    ///
    /// The plate's own entry wins. Otherwise, with `fill_with_default_set`
    /// on, the default-set item for the slot (undyed). Otherwise `None`.
    pub fn effective_entry(&self, slot: PlateSlot, tables: &GameTables) -> Option<CosmeticEntry> {
        if let Some(entry) = self.entries.get(&slot) {
            return Some(*entry);
        }

        if !self.fill_with_default_set {
            return None;
        }

        tables.default_item(slot).map(CosmeticEntry::new)
    }

    /// Permanently write the default set into every unspecified slot.
    ///
    /// Returns how many slots were filled.
    pub fn fill_empty_slots(&mut self, tables: &GameTables) -> usize {
        let mut filled = 0;
        for slot in PlateSlot::ALL {
            if self.entries.contains_key(&slot) {
                continue;
            }
            if let Some(item_id) = tables.default_item(slot) {
                self.entries.insert(slot, CosmeticEntry::new(item_id));
                filled += 1;
            }
        }
        filled
    }

    /// Add a tag. Whitespace is trimmed; blank or duplicate tags are ignored.
    ///
    /// Returns whether the tag set changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        self.tags.insert(tag.to_string())
    }

    /// Remove a tag. Returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Whether the plate carries `tag` exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// How many times each stain is used across both channels of every slot.
    ///
    /// Useful for telling the player which dyes to buy before applying.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use glamplate::{CosmeticEntry, PlateSlot, SavedPlate};
    ///
    /// let plate = SavedPlate::with_entries("Dyed", [
    ///     (PlateSlot::Body, CosmeticEntry::new(1).with_stains(3, 3)),
    ///     (PlateSlot::Legs, CosmeticEntry::new(2).with_stains(0, 4)),
    /// ]);
    ///
    /// let summary = plate.dye_summary();
    /// assert_eq!(summary.get(&3), Some(&2));
    /// assert_eq!(summary.get(&4), Some(&1));
    /// assert_eq!(summary.get(&0), None);
    /// ```
    pub fn dye_summary(&self) -> BTreeMap<StainId, usize> {
        let mut summary = BTreeMap::new();
        for entry in self.entries.values() {
            for stain in [entry.stain1, entry.stain2] {
                if stain != 0 {
                    *summary.entry(stain).or_insert(0) += 1;
                }
            }
        }
        summary
    }

    /// Whether every whitespace-separated term of `query` appears in the
    /// name or in one of the tags, ignoring case. An empty query matches.
    pub fn matches_query(&self, query: &str) -> bool {
        let name = self.name.to_lowercase();
        let tags: Vec<String> = self.tags.iter().map(|tag| tag.to_lowercase()).collect();

        query.split_whitespace().all(|term| {
            let term = term.to_lowercase();
            name.contains(&term) || tags.iter().any(|tag| tag.contains(&term))
        })
    }
}

/// An in-progress edit of a saved plate.
///
/// The working copy belongs to the edit alone. `commit` writes it back;
/// `cancel`, or simply dropping the edit, throws it away.
#[derive(Debug, Clone)]
pub struct PlateEdit {
    draft: SavedPlate,
}

impl PlateEdit {
    /// Start editing a copy of `plate`.
    pub fn begin(plate: &SavedPlate) -> Self {
        Self {
            draft: plate.clone(),
        }
    }

    /// The plate as edited so far.
    pub fn draft(&self) -> &SavedPlate {
        &self.draft
    }

    /// Mutable access to the draft.
    pub fn draft_mut(&mut self) -> &mut SavedPlate {
        &mut self.draft
    }

    /// Replace `target` with the edited copy.
    pub fn commit(self, target: &mut SavedPlate) {
        *target = self.draft;
    }

    /// Discard the draft.
    pub fn cancel(self) {}
}

/// On-disk shape of a plate before sanitation.
///
/// Slot keys that are not part of the catalog, type annotations and
/// entries that do not parse are dropped here, so resolution only ever
/// sees valid slots.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawPlate {
    #[serde(default)]
    name: String,
    #[serde(default)]
    items: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    fill_with_new_emperor: bool,
}

impl From<RawPlate> for SavedPlate {
    fn from(raw: RawPlate) -> Self {
        let mut plate = SavedPlate::new(raw.name);
        plate.fill_with_default_set = raw.fill_with_new_emperor;

        for (key, value) in raw.items {
            if key == "$type" {
                continue;
            }

            let slot = match key.parse::<PlateSlot>() {
                Ok(slot) => slot,
                Err(e) => {
                    tracing::warn!("Dropping entry from plate {:?}: {}", plate.name, e);
                    continue;
                }
            };

            match serde_json::from_value::<CosmeticEntry>(value) {
                Ok(entry) => plate.set_entry(slot, entry),
                Err(e) => {
                    tracing::warn!("Dropping {} from plate {:?}: {}", slot, plate.name, e);
                }
            }
        }

        for tag in &raw.tags {
            plate.add_tag(tag);
        }

        plate
    }
}
