//! Live plate surface.
//!
//! The host's glamour plate editor, as seen by the applier. All mutations
//! are fire-and-forget: the host gives no status back, and a write that
//! silently does nothing is indistinguishable from one that worked.

use crate::action::{MirageSource, SourceDescriptor};
use crate::entry::{CosmeticEntry, ItemId, LiveSlotState, PlateSnapshot, StainId};
use crate::slot::PlateSlot;
use crate::stain::StainSupply;
use std::collections::BTreeMap;

/// One stain channel of an `apply_stains` write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StainApplication {
    pub stain: StainId,
    pub supply: StainSupply,
}

impl StainApplication {
    /// The dye item handed to the host for this channel.
    pub fn supply_item_id(&self) -> ItemId {
        self.supply.item_id()
    }
}

/// The host's live plate editor.
pub trait LivePlateSurface {
    /// Whether the editor is open. Nothing may be written while it is not.
    fn is_available(&self) -> bool;

    fn selected_slot_index(&self) -> u32;

    fn set_selected_slot_index(&mut self, index: u32);

    /// What every slot currently shows.
    fn current_snapshot(&self) -> PlateSnapshot;

    fn clear_slot(&mut self, slot: PlateSlot);

    /// Put an item into the currently selected slot.
    fn set_item(&mut self, source: &SourceDescriptor);

    fn apply_stains(&mut self, slot: PlateSlot, stain1: StainApplication, stain2: StainApplication);

    /// Flag the plate as having unsaved changes.
    fn mark_changed(&mut self) {}
}

/// An in-memory plate editor.
///
/// Behaves like the host editor closely enough for tools and tests:
/// `set_item` writes to the selected slot, stains land as committed
/// values, and every call is recorded in `log`.
///
/// # Examples
///
/// ```rust
/// use glamplate::surface::{LivePlateSurface, MemorySurface};
/// use glamplate::{CosmeticEntry, PlateSlot};
///
/// let mut surface = MemorySurface::new();
/// surface.set_slot(PlateSlot::Head, CosmeticEntry::new(42));
///
/// let snapshot = surface.current_snapshot();
/// assert!(snapshot.matches(PlateSlot::Head, &CosmeticEntry::new(42)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub open: bool,
    pub selected: u32,
    pub slots: BTreeMap<PlateSlot, LiveSlotState>,
    pub changed: bool,
    pub log: Vec<SurfaceCall>,
}

/// A recorded `MemorySurface` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCall {
    Select(u32),
    Clear(PlateSlot),
    SetItem(SourceDescriptor),
    ApplyStains(PlateSlot, StainApplication, StainApplication),
}

impl MemorySurface {
    /// An open, empty editor.
    pub fn new() -> Self {
        Self {
            open: true,
            ..Self::default()
        }
    }

    /// Put `entry` into `slot` as committed values, bypassing the log.
    pub fn set_slot(&mut self, slot: PlateSlot, entry: CosmeticEntry) {
        self.slots.insert(
            slot,
            LiveSlotState {
                item_id: entry.item_id,
                stain1: entry.stain1,
                stain2: entry.stain2,
                ..LiveSlotState::default()
            },
        );
    }

    /// What `slot` shows, preview stains included. `None` when empty.
    pub fn slot(&self, slot: PlateSlot) -> Option<CosmeticEntry> {
        self.slots
            .get(&slot)
            .filter(|live| live.item_id != 0)
            .map(LiveSlotState::effective)
    }

    fn selected_slot(&self) -> Option<PlateSlot> {
        PlateSlot::from_ordinal(self.selected)
    }
}

impl LivePlateSurface for MemorySurface {
    fn is_available(&self) -> bool {
        self.open
    }

    fn selected_slot_index(&self) -> u32 {
        self.selected
    }

    fn set_selected_slot_index(&mut self, index: u32) {
        self.selected = index;
        self.log.push(SurfaceCall::Select(index));
    }

    fn current_snapshot(&self) -> PlateSnapshot {
        PlateSnapshot::from_live(self.slots.iter().map(|(slot, live)| (*slot, *live)))
    }

    fn clear_slot(&mut self, slot: PlateSlot) {
        self.slots.remove(&slot);
        self.log.push(SurfaceCall::Clear(slot));
    }

    fn set_item(&mut self, source: &SourceDescriptor) {
        if let Some(slot) = self.selected_slot() {
            self.slots.insert(
                slot,
                LiveSlotState {
                    item_id: source.item_id,
                    stain1: source.stain1,
                    stain2: source.stain2,
                    ..LiveSlotState::default()
                },
            );
        }
        self.log.push(SurfaceCall::SetItem(*source));
    }

    fn apply_stains(&mut self, slot: PlateSlot, stain1: StainApplication, stain2: StainApplication) {
        if let Some(live) = self.slots.get_mut(&slot) {
            live.stain1 = stain1.stain;
            live.stain2 = stain2.stain;
        }
        self.log.push(SurfaceCall::ApplyStains(slot, stain1, stain2));
    }

    fn mark_changed(&mut self) {
        self.changed = true;
    }
}

impl MemorySurface {
    /// Source of the most recent `set_item`.
    pub fn last_source(&self) -> Option<MirageSource> {
        self.log.iter().rev().find_map(|call| match call {
            SurfaceCall::SetItem(source) => Some(source.source),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_item_targets_selected_slot() {
        let mut surface = MemorySurface::new();
        surface.set_selected_slot_index(PlateSlot::Feet.ordinal());
        surface.set_item(&SourceDescriptor {
            source: MirageSource::GlamourDresser,
            slot_or_cabinet_id: 3,
            item_id: 77,
            stain1: 1,
            stain2: 0,
        });

        assert_eq!(surface.slot(PlateSlot::Feet), Some(CosmeticEntry::new(77).with_stains(1, 0)));
        assert_eq!(surface.last_source(), Some(MirageSource::GlamourDresser));
    }

    #[test]
    fn test_out_of_range_selection_kept() {
        let mut surface = MemorySurface::new();
        surface.set_selected_slot_index(40);
        assert_eq!(surface.selected_slot_index(), 40);

        // no slot is selected, so nothing is written
        surface.set_item(&SourceDescriptor {
            source: MirageSource::Armoire,
            slot_or_cabinet_id: 7,
            item_id: 200,
            stain1: 0,
            stain2: 0,
        });
        assert!(surface.current_snapshot().is_empty());
    }

    #[test]
    fn test_clear_removes_from_snapshot() {
        let mut surface = MemorySurface::new();
        surface.set_slot(PlateSlot::Neck, CosmeticEntry::new(5));
        surface.clear_slot(PlateSlot::Neck);
        assert!(surface.current_snapshot().is_empty());
    }
}
