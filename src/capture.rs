//! Capturing plates from worn equipment.
//!
//! Builds a saved plate from what a character is wearing (an examined
//! player, or the try-on preview). Equipment is indexed in the game's
//! thirteen-slot layout, which has a belt position the plate lacks and a
//! trailing soul crystal.

use crate::config::EngineSettings;
use crate::entry::{CosmeticEntry, ItemId, StainId};
use crate::plate::SavedPlate;
use crate::slot::PlateSlot;

/// Equipment index of the retired belt position.
const BELT_INDEX: u32 = 5;

/// Equipment index of the soul crystal.
const SOUL_CRYSTAL_INDEX: u32 = 13;

/// One piece of worn equipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquippedItem {
    pub equipment_index: u32,
    pub item_id: ItemId,
    /// The glamour projected onto the item, 0 if none.
    pub glamour_id: ItemId,
    pub stain1: StainId,
    pub stain2: StainId,
    pub preview_stain1: StainId,
    pub preview_stain2: StainId,
}

impl EquippedItem {
    /// The item shown on the character: the glamour if there is one.
    pub fn shown_item(&self) -> ItemId {
        if self.glamour_id != 0 {
            self.glamour_id
        } else {
            self.item_id
        }
    }
}

/// Map an equipment index to its plate slot.
///
/// # Examples
///
/// ```rust
/// use glamplate::capture::plate_slot_for_equipment;
/// use glamplate::PlateSlot;
///
/// assert_eq!(plate_slot_for_equipment(4), Some(PlateSlot::Hands));
/// assert_eq!(plate_slot_for_equipment(5), None); // belt
/// assert_eq!(plate_slot_for_equipment(6), Some(PlateSlot::Legs));
/// assert_eq!(plate_slot_for_equipment(12), Some(PlateSlot::LeftRing));
/// ```
pub fn plate_slot_for_equipment(index: u32) -> Option<PlateSlot> {
    match index {
        BELT_INDEX | SOUL_CRYSTAL_INDEX => None,
        i if i < BELT_INDEX => PlateSlot::from_ordinal(i),
        i => PlateSlot::from_ordinal(i - 1),
    }
}

/// Build a plate from worn equipment.
///
/// A blank `name` becomes "Copied glamour". Preview stains take
/// precedence over committed ones and high-quality offsets are removed.
pub fn capture_plate<I>(name: &str, equipped: I, settings: &EngineSettings) -> SavedPlate
where
    I: IntoIterator<Item = EquippedItem>,
{
    let name = if name.trim().is_empty() {
        "Copied glamour"
    } else {
        name
    };

    let mut plate = SavedPlate::new(name);
    for item in equipped {
        let Some(slot) = plate_slot_for_equipment(item.equipment_index) else {
            continue;
        };

        let item_id = item.shown_item();
        if item_id == 0 {
            continue;
        }

        let stain1 = if item.preview_stain1 != 0 {
            item.preview_stain1
        } else {
            item.stain1
        };
        let stain2 = if item.preview_stain2 != 0 {
            item.preview_stain2
        } else {
            item.stain2
        };

        plate.set_entry(
            slot,
            CosmeticEntry::new(settings.normal_quality(item_id)).with_stains(stain1, stain2),
        );
    }

    plate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_prefers_glamour_and_preview() {
        let equipped = [
            EquippedItem {
                equipment_index: 3,
                item_id: 10,
                glamour_id: 1_000_020,
                stain1: 1,
                stain2: 2,
                preview_stain1: 7,
                preview_stain2: 0,
            },
            EquippedItem {
                equipment_index: 5,
                item_id: 30,
                ..Default::default()
            },
            EquippedItem {
                equipment_index: 13,
                item_id: 40,
                ..Default::default()
            },
            EquippedItem {
                equipment_index: 7,
                ..Default::default()
            },
        ];

        let plate = capture_plate("", equipped, &EngineSettings::default());
        assert_eq!(plate.name, "Copied glamour");
        assert_eq!(plate.entries().count(), 1);
        assert_eq!(
            plate.entry(PlateSlot::Body),
            Some(&CosmeticEntry::new(20).with_stains(7, 2))
        );
    }

    #[test]
    fn test_every_plate_slot_reachable() {
        let slots: Vec<_> = (0..14).filter_map(plate_slot_for_equipment).collect();
        assert_eq!(slots, PlateSlot::ALL.to_vec());
    }
}
