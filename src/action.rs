//! Write actions emitted by the resolver.
//!
//! A resolution pass turns a saved plate into an ordered list of
//! `SlotAction`s. Order is part of the contract: a slot's `ApplyStains`
//! directly follows its `SetItem`, and `RestoreSelection` is always last.

use crate::entry::{ItemId, StainId};
use crate::slot::PlateSlot;
use serde::{Deserialize, Serialize};

/// Which cosmetic storage an item is applied from.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum MirageSource {
    GlamourDresser = 1,
    Armoire = 2,
}

/// A concrete, actionable source for one slot.
///
/// `slot_or_cabinet_id` is the dresser slot index for
/// [`MirageSource::GlamourDresser`] and the cabinet id for
/// [`MirageSource::Armoire`]. The stains are those of the source record,
/// which may differ from what the plate asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub source: MirageSource,
    pub slot_or_cabinet_id: u32,
    pub item_id: ItemId,
    pub stain1: StainId,
    pub stain2: StainId,
}

impl SourceDescriptor {
    /// The source record's stains as a pair.
    pub fn stains(&self) -> (StainId, StainId) {
        (self.stain1, self.stain2)
    }
}

/// One write against the live plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotAction {
    /// Remove whatever the slot holds.
    Clear(PlateSlot),

    /// Put an item into the slot from a dresser or armoire source.
    SetItem {
        slot: PlateSlot,
        source: SourceDescriptor,
    },

    /// Dye the slot's item with the desired stains, spending inventory dyes.
    ApplyStains {
        slot: PlateSlot,
        stain1: StainId,
        stain2: StainId,
    },

    /// Put the editor's selected slot back where it was before the pass.
    RestoreSelection(u32),
}

impl SlotAction {
    /// The slot this action writes, if any.
    pub fn slot(&self) -> Option<PlateSlot> {
        match self {
            SlotAction::Clear(slot) => Some(*slot),
            SlotAction::SetItem { slot, .. } => Some(*slot),
            SlotAction::ApplyStains { slot, .. } => Some(*slot),
            SlotAction::RestoreSelection(_) => None,
        }
    }

    /// Whether this action changes a slot.
    pub fn is_write(&self) -> bool {
        self.slot().is_some()
    }
}

impl std::fmt::Display for SlotAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotAction::Clear(slot) => write!(f, "Clear {}", slot),
            SlotAction::SetItem { slot, source } => write!(
                f,
                "Set {} from {:?} #{}: item {} ({}, {})",
                slot,
                source.source,
                source.slot_or_cabinet_id,
                source.item_id,
                source.stain1,
                source.stain2
            ),
            SlotAction::ApplyStains {
                slot,
                stain1,
                stain2,
            } => write!(f, "Stain {}: {}, {}", slot, stain1, stain2),
            SlotAction::RestoreSelection(index) => write!(f, "Restore selection {}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_slot() {
        assert_eq!(SlotAction::Clear(PlateSlot::Head).slot(), Some(PlateSlot::Head));
        assert_eq!(SlotAction::RestoreSelection(3).slot(), None);
        assert!(!SlotAction::RestoreSelection(3).is_write());
    }

    #[test]
    fn test_display() {
        let action = SlotAction::SetItem {
            slot: PlateSlot::Body,
            source: SourceDescriptor {
                source: MirageSource::Armoire,
                slot_or_cabinet_id: 7,
                item_id: 200,
                stain1: 0,
                stain2: 0,
            },
        };
        assert_eq!(action.to_string(), "Set Body from Armoire #7: item 200 (0, 0)");
    }
}
