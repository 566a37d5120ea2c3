//! Try-on sequencing.
//!
//! Trying a plate on previews it on the character without touching the
//! plate editor or owned items, so it needs no source resolution: just the
//! effective entries in slot order, normalized to base item ids.

use crate::config::EngineSettings;
use crate::entry::CosmeticEntry;
use crate::plate::SavedPlate;
use crate::slot::PlateSlot;
use crate::tables::GameTables;

/// Entries to preview for `plate`, in slot order.
///
/// Absent and explicitly empty slots use the default set when the plate
/// asks for it and are left out otherwise. High-quality offsets are
/// removed from item ids.
///
/// # Examples
///
/// ```rust
/// use glamplate::tryon::try_on_sequence;
/// use glamplate::{CosmeticEntry, EngineSettings, GameTables, PlateSlot, SavedPlate};
///
/// let tables = GameTables::new().with_default_item(PlateSlot::Feet, 900);
/// let mut plate = SavedPlate::with_entries("p", [
///     (PlateSlot::Head, CosmeticEntry::new(1_000_042).with_stains(2, 0)),
/// ]);
/// plate.fill_with_default_set = true;
///
/// let items = try_on_sequence(&plate, &tables, &EngineSettings::default());
/// assert_eq!(items, vec![CosmeticEntry::new(42).with_stains(2, 0), CosmeticEntry::new(900)]);
/// ```
pub fn try_on_sequence(
    plate: &SavedPlate,
    tables: &GameTables,
    settings: &EngineSettings,
) -> Vec<CosmeticEntry> {
    PlateSlot::ALL
        .iter()
        .filter_map(|slot| match plate.entry(*slot) {
            Some(entry) if !entry.is_empty() => Some(*entry),
            _ if plate.fill_with_default_set => tables.default_item(*slot).map(CosmeticEntry::new),
            _ => None,
        })
        .map(|entry| CosmeticEntry {
            item_id: settings.normal_quality(entry.item_id),
            ..entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slots_skipped_without_fill() {
        let plate = SavedPlate::with_entries(
            "p",
            [
                (PlateSlot::Head, CosmeticEntry::empty()),
                (PlateSlot::Body, CosmeticEntry::new(3)),
            ],
        );
        let tables = GameTables::new().with_default_item(PlateSlot::Head, 900);

        let items = try_on_sequence(&plate, &tables, &EngineSettings::default());
        assert_eq!(items, vec![CosmeticEntry::new(3)]);
    }

    #[test]
    fn test_explicit_empty_filled_when_requested() {
        let mut plate = SavedPlate::with_entries("p", [(PlateSlot::Head, CosmeticEntry::empty())]);
        plate.fill_with_default_set = true;
        let tables = GameTables::new().with_default_item(PlateSlot::Head, 900);

        let items = try_on_sequence(&plate, &tables, &EngineSettings::default());
        assert_eq!(items, vec![CosmeticEntry::new(900)]);
    }
}
