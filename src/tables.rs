//! Static game data tables.
//!
//! Read-only lookup data loaded once for the lifetime of the process:
//! which cabinet row an item is stored under, which dye items produce a
//! stain, what the default fill set puts in each slot, and optional
//! display names. The engine never interprets where this data came from.

use crate::entry::{ItemId, StainId};
use crate::error::PlateError;
use crate::slot::PlateSlot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static lookup tables used during resolution.
///
/// # Examples
///
/// ```rust
/// use glamplate::{GameTables, PlateSlot};
///
/// let tables = GameTables::new()
///     .with_cabinet_row(200, 7)
///     .with_stain_supply(9, [5729, 0])
///     .with_default_item(PlateSlot::Head, 10032);
///
/// assert_eq!(tables.cabinet_row(200), Some(7));
/// assert_eq!(tables.stain_candidates(9).collect::<Vec<_>>(), vec![5729]);
/// assert_eq!(tables.default_item(PlateSlot::Head), Some(10032));
/// assert_eq!(tables.default_item(PlateSlot::MainHand), None);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTables {
    /// Item id → cabinet row id. Items without a row cannot live in the armoire.
    cabinet_rows: BTreeMap<ItemId, u32>,

    /// Stain id → the (up to two) dye items that apply it, in preference order.
    stain_supplies: BTreeMap<StainId, [ItemId; 2]>,

    /// Slot → item used to fill slots a plate leaves unspecified.
    default_set: BTreeMap<PlateSlot, ItemId>,

    item_names: BTreeMap<ItemId, String>,
    stain_names: BTreeMap<StainId, String>,
}

impl GameTables {
    /// Empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tables from JSON.
    pub fn from_json(json: &str) -> Result<Self, PlateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Map an item to its armoire cabinet row.
    pub fn with_cabinet_row(mut self, item_id: ItemId, row: u32) -> Self {
        self.cabinet_rows.insert(item_id, row);
        self
    }

    /// Set the dye items that can apply `stain`, in preference order.
    pub fn with_stain_supply(mut self, stain: StainId, items: [ItemId; 2]) -> Self {
        self.stain_supplies.insert(stain, items);
        self
    }

    /// Set the default-set item for `slot`.
    pub fn with_default_item(mut self, slot: PlateSlot, item_id: ItemId) -> Self {
        self.default_set.insert(slot, item_id);
        self
    }

    /// Name an item for display.
    pub fn with_item_name(mut self, item_id: ItemId, name: impl Into<String>) -> Self {
        self.item_names.insert(item_id, name.into());
        self
    }

    /// Name a stain for display.
    pub fn with_stain_name(mut self, stain: StainId, name: impl Into<String>) -> Self {
        self.stain_names.insert(stain, name.into());
        self
    }

    /// The cabinet row `item_id` is stored under, if it can be stored at all.
    pub fn cabinet_row(&self, item_id: ItemId) -> Option<u32> {
        self.cabinet_rows.get(&item_id).copied()
    }

    /// Dye items that can supply `stain`, in preference order, zero ids removed.
    pub fn stain_candidates(&self, stain: StainId) -> impl Iterator<Item = ItemId> + '_ {
        self.stain_supplies
            .get(&stain)
            .into_iter()
            .flat_map(|items| items.iter().copied())
            .filter(|item_id| *item_id != 0)
    }

    /// Default fill item for `slot`, if the set covers it.
    pub fn default_item(&self, slot: PlateSlot) -> Option<ItemId> {
        self.default_set
            .get(&slot)
            .copied()
            .filter(|item_id| *item_id != 0)
    }

    /// Display name of an item.
    pub fn item_name(&self, item_id: ItemId) -> Option<&str> {
        self.item_names.get(&item_id).map(String::as_str)
    }

    /// Display name of a stain.
    pub fn stain_name(&self, stain: StainId) -> Option<&str> {
        self.stain_names.get(&stain).map(String::as_str)
    }
}
