//! Plate resolver module.
//!
//! Provides the `PlateResolver` type, which decides what to write for each
//! of the twelve slots of a saved plate given the current dresser
//! contents, the armoire and what the live plate already shows.

use crate::action::{MirageSource, SlotAction, SourceDescriptor};
use crate::armoire::ArmoireLookup;
use crate::config::EngineSettings;
use crate::dresser::DresserCachedItem;
use crate::entry::{CosmeticEntry, PlateSnapshot};
use crate::plate::SavedPlate;
use crate::resolution::PlateResolution;
use crate::slot::PlateSlot;
use crate::tables::GameTables;

/// Resolves saved plates into ordered write actions.
///
/// For every slot, in ordinal order, the resolver:
/// 1. Picks the effective entry (plate entry, else default fill, else skip)
/// 2. Skips the slot if the live plate already shows exactly that entry
/// 3. Clears the slot if the entry is explicitly empty
/// 4. Finds a source: dresser first (preferring matching stains), then armoire
/// 5. Adds a stain correction when the source's stains differ
///
/// and finishes by restoring the editor's original selection.
///
/// Resolution never fails. Slots whose item cannot be found anywhere are
/// left alone and reported in [`PlateResolution::skipped`].
///
/// # Examples
///
/// ```rust
/// use glamplate::*;
/// use glamplate::armoire::EmptyArmoire;
/// use glamplate::dresser::DresserCachedItem;
///
/// let dresser = vec![DresserCachedItem::new(4, 100).with_stains(3, 5)];
/// let tables = GameTables::new();
/// let settings = EngineSettings::default();
/// let resolver = PlateResolver::new(&dresser, &EmptyArmoire, &tables, &settings);
///
/// let plate = SavedPlate::with_entries("Coat", [
///     (PlateSlot::Body, CosmeticEntry::new(100).with_stains(3, 5)),
/// ]);
/// let resolution = resolver.resolve(&plate, &PlateSnapshot::new(), 2);
///
/// assert_eq!(resolution.actions.len(), 2);
/// assert!(matches!(resolution.actions[0], SlotAction::SetItem { slot: PlateSlot::Body, .. }));
/// assert_eq!(resolution.actions[1], SlotAction::RestoreSelection(2));
/// ```
pub struct PlateResolver<'a, A: ArmoireLookup + ?Sized> {
    dresser: &'a [DresserCachedItem],
    armoire: &'a A,
    tables: &'a GameTables,
    settings: &'a EngineSettings,
}

impl<'a, A: ArmoireLookup + ?Sized> PlateResolver<'a, A> {
    /// Create a resolver over a dresser snapshot and armoire.
    ///
    /// `dresser` is usually [`DresserCache::contents`](crate::dresser::DresserCache::contents);
    /// `settings` supplies the variant modulus used to match dresser items.
    pub fn new(
        dresser: &'a [DresserCachedItem],
        armoire: &'a A,
        tables: &'a GameTables,
        settings: &'a EngineSettings,
    ) -> Self {
        Self {
            dresser,
            armoire,
            tables,
            settings,
        }
    }

    /// Resolve `plate` against the live state.
    ///
    /// # Arguments
    ///
    /// * `plate` - The saved plate to apply
    /// * `current` - What the live plate shows right now
    /// * `selected_index` - The editor's selected slot before any write
    pub fn resolve(
        &self,
        plate: &SavedPlate,
        current: &PlateSnapshot,
        selected_index: u32,
    ) -> PlateResolution {
        let mut resolution = PlateResolution::new(plate.name.clone());

        for slot in PlateSlot::ALL {
            let Some(desired) = plate.effective_entry(slot, self.tables) else {
                continue;
            };

            if current.matches(slot, &desired) {
                tracing::debug!("Skipping {}: expected item state is already in plate", slot);
                continue;
            }

            if desired.is_empty() {
                tracing::debug!("Clearing {}: slot is explicitly empty", slot);
                resolution.push(SlotAction::Clear(slot));
                continue;
            }

            tracing::debug!(
                "Searching for {} {} ({}, {})",
                slot,
                desired.item_id,
                desired.stain1,
                desired.stain2
            );

            let Some(source) = self.find_source(&desired) else {
                tracing::debug!("Item {} could not be found, skipping {}", desired.item_id, slot);
                resolution.skip(slot);
                continue;
            };

            resolution.push(SlotAction::SetItem { slot, source });

            if source.stains() != desired.stains() {
                tracing::debug!(
                    "Applying stains to {}: {}, {}",
                    slot,
                    desired.stain1,
                    desired.stain2
                );
                resolution.push(SlotAction::ApplyStains {
                    slot,
                    stain1: desired.stain1,
                    stain2: desired.stain2,
                });
            }
        }

        resolution.push(SlotAction::RestoreSelection(selected_index));
        resolution
    }

    /// Find where `desired` can be applied from.
    fn find_source(&self, desired: &CosmeticEntry) -> Option<SourceDescriptor> {
        let modulus = self.settings.item_modifier_mod;
        let mut matching = self
            .dresser
            .iter()
            .filter(|item| item.base_item_id(modulus) == desired.item_id)
            .peekable();

        let Some(first) = matching.peek().copied() else {
            let cabinet_id = self.armoire.cabinet_slot_for(desired.item_id)?;
            tracing::debug!(
                "Item {} found in armoire with cabinet id {}",
                desired.item_id,
                cabinet_id
            );
            return Some(SourceDescriptor {
                source: MirageSource::Armoire,
                slot_or_cabinet_id: cabinet_id,
                item_id: desired.item_id,
                stain1: 0,
                stain2: 0,
            });
        };

        let stained = matching
            .find(|item| item.stain1 == desired.stain1 && item.stain2 == desired.stain2);
        let matched_stains = stained.is_some();
        let mirage = stained.unwrap_or(first);

        tracing::debug!(
            "Item {} found in dresser at slot {} with stains {}, {} ({})",
            desired.item_id,
            mirage.slot,
            mirage.stain1,
            mirage.stain2,
            if matched_stains { "matched" } else { "mismatched" }
        );

        Some(SourceDescriptor {
            source: MirageSource::GlamourDresser,
            slot_or_cabinet_id: mirage.slot,
            item_id: mirage.item_id,
            stain1: mirage.stain1,
            stain2: mirage.stain2,
        })
    }
}
