//! Plate sharing.
//!
//! Plates are shared between players as a small JSON document (copied to
//! the clipboard) or exported as a human-readable text listing.

use crate::entry::{CosmeticEntry, StainId};
use crate::error::PlateError;
use crate::plate::SavedPlate;
use crate::slot::PlateSlot;
use crate::tables::GameTables;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

/// The shareable form of a plate. Tags stay private to the sharer.
///
/// # Examples
///
/// ```rust
/// use glamplate::share::SharedPlate;
/// use glamplate::{CosmeticEntry, PlateSlot, SavedPlate};
///
/// let plate = SavedPlate::with_entries("Summer", [(PlateSlot::Head, CosmeticEntry::new(5))]);
/// let json = SharedPlate::from(&plate).to_json().unwrap();
///
/// let imported = SharedPlate::from_json(&json).unwrap().into_plate();
/// assert_eq!(imported.name, "Summer");
/// assert_eq!(imported.entry(PlateSlot::Head), Some(&CosmeticEntry::new(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SharedPlate {
    pub name: String,
    pub items: BTreeMap<PlateSlot, CosmeticEntry>,
    #[serde(default)]
    pub fill_with_new_emperor: bool,
}

impl SharedPlate {
    /// Serialize to the compact JSON shared between players.
    pub fn to_json(&self) -> Result<String, PlateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse shared JSON. Unknown slots are dropped rather than rejected.
    pub fn from_json(json: &str) -> Result<Self, PlateError> {
        let plate: SavedPlate = serde_json::from_str(json.trim())?;
        Ok(Self::from(&plate))
    }

    /// A saved plate with the shared entries and no tags.
    pub fn into_plate(self) -> SavedPlate {
        let mut plate = SavedPlate::with_entries(self.name, self.items);
        plate.fill_with_default_set = self.fill_with_new_emperor;
        plate
    }
}

impl From<&SavedPlate> for SharedPlate {
    fn from(plate: &SavedPlate) -> Self {
        Self {
            name: plate.name.clone(),
            items: plate.entries().map(|(slot, entry)| (slot, *entry)).collect(),
            fill_with_new_emperor: plate.fill_with_default_set,
        }
    }
}

/// Render `plate` as text, one line per non-empty slot.
///
/// ```text
/// Summer
/// ---
/// Body: Linen Coat (Snow White, Soot Black)
/// Legs: Linen Trousers (-, Soot Black)
/// ```
pub fn export_text(plate: &SavedPlate, tables: &GameTables) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plate.name);
    let _ = writeln!(out, "---");

    for (slot, entry) in plate.entries() {
        if entry.is_empty() {
            continue;
        }

        let item = tables.item_name(entry.item_id).unwrap_or("Unknown Item");
        let _ = write!(out, "{}: {}", slot, item);

        if entry.is_dyed() {
            let first = stain_label(entry.stain1, tables);
            match entry.stain2 {
                0 => {
                    let _ = write!(out, " ({})", first);
                }
                second => {
                    let _ = write!(out, " ({}, {})", first, stain_label(second, tables));
                }
            }
        }
        out.push('\n');
    }

    out
}

fn stain_label(stain: StainId, tables: &GameTables) -> &str {
    if stain == 0 {
        return "-";
    }
    tables.stain_name(stain).unwrap_or("Unknown Stain")
}
