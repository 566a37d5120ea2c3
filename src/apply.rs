//! Write application module.
//!
//! Executes a `PlateResolution` against the live plate surface, and
//! provides `PlateLoader`, the one-call entry point that snapshots the
//! editor, resolves a plate and applies it.

use crate::action::SlotAction;
use crate::armoire::ArmoireLookup;
use crate::config::EngineSettings;
use crate::dresser::DresserCache;
use crate::error::PlateError;
use crate::inventory::InventorySource;
use crate::plate::SavedPlate;
use crate::resolution::PlateResolution;
use crate::resolver::PlateResolver;
use crate::slot::PlateSlot;
use crate::stain::{StainClaims, StainResolver};
use crate::surface::{LivePlateSurface, StainApplication};
use crate::tables::GameTables;

/// What an application pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Slot writes issued (clears, item sets, stain applications).
    pub writes: usize,
    /// Stain channels served from a located inventory dye stack.
    pub located_dyes: usize,
    /// Stain channels that fell back to a placeholder dye item.
    pub placeholder_dyes: usize,
}

/// Executes resolved actions against a live plate.
///
/// Every `apply` call owns a fresh [`StainClaims`], shared by all
/// `ApplyStains` actions of that call and dropped when it returns.
pub struct PlateApplier<'a, I: InventorySource + ?Sized> {
    stains: StainResolver<'a, I>,
}

impl<'a, I: InventorySource + ?Sized> PlateApplier<'a, I> {
    /// An applier drawing dyes from `inventory`.
    pub fn new(inventory: &'a I, tables: &'a GameTables) -> Self {
        Self {
            stains: StainResolver::new(inventory, tables),
        }
    }

    /// Run `resolution`'s actions in order. Writes are not retried.
    pub fn apply<S: LivePlateSurface + ?Sized>(
        &self,
        surface: &mut S,
        resolution: &PlateResolution,
    ) -> ApplyReport {
        let mut claims = StainClaims::new();
        let mut report = ApplyReport::default();

        for action in &resolution.actions {
            match *action {
                SlotAction::Clear(slot) => {
                    surface.set_selected_slot_index(slot.ordinal());
                    surface.clear_slot(slot);
                    report.writes += 1;
                }
                SlotAction::SetItem { slot, source } => {
                    surface.set_selected_slot_index(slot.ordinal());
                    surface.set_item(&source);
                    report.writes += 1;
                }
                SlotAction::ApplyStains {
                    slot,
                    stain1,
                    stain2,
                } => {
                    let first = StainApplication {
                        stain: stain1,
                        supply: self.stains.select_stain_source(stain1, &mut claims),
                    };
                    let second = StainApplication {
                        stain: stain2,
                        supply: self.stains.select_stain_source(stain2, &mut claims),
                    };

                    for channel in [&first, &second] {
                        if channel.stain == 0 {
                            continue;
                        }
                        if channel.supply.found() {
                            report.located_dyes += 1;
                        } else {
                            report.placeholder_dyes += 1;
                        }
                    }

                    tracing::debug!(
                        "Staining {}: {} via {}, {} via {}",
                        slot,
                        stain1,
                        first.supply_item_id(),
                        stain2,
                        second.supply_item_id()
                    );
                    surface.apply_stains(slot, first, second);
                    report.writes += 1;
                }
                SlotAction::RestoreSelection(index) => {
                    surface.set_selected_slot_index(index);
                    surface.mark_changed();
                }
            }
        }

        report
    }
}

/// The result of loading one plate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub resolution: PlateResolution,
    pub applied: ApplyReport,
}

impl LoadReport {
    /// Slots left unchanged because their item was not found.
    pub fn skipped_count(&self) -> usize {
        self.resolution.skipped_count()
    }
}

/// Reasons a load may come out less complete than the plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadWarning {
    /// The armoire has not been read, so armoire items look missing.
    ArmoireNotLoaded,
    /// The dresser is empty or has not been opened.
    DresserEmpty,
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::ArmoireNotLoaded => {
                write!(f, "The armoire is not loaded; open it once to use armoire items")
            }
            LoadWarning::DresserEmpty => {
                write!(f, "The glamour dresser is empty or has not been opened")
            }
        }
    }
}

/// Everything needed to load plates onto the live editor.
///
/// # Examples
///
/// ```rust
/// use glamplate::*;
/// use glamplate::armoire::EmptyArmoire;
/// use glamplate::dresser::{DresserCache, DresserCachedItem};
/// use glamplate::inventory::Inventory;
/// use glamplate::surface::MemorySurface;
///
/// let mut dresser = DresserCache::new();
/// dresser.refresh_with(1, || vec![DresserCachedItem::new(0, 100)]);
/// let inventory = Inventory::default();
/// let tables = GameTables::new();
/// let settings = EngineSettings::default();
/// let loader = PlateLoader::new(&dresser, &EmptyArmoire, &inventory, &tables, &settings);
///
/// let plate = SavedPlate::with_entries("Coat", [(PlateSlot::Body, CosmeticEntry::new(100))]);
/// let mut surface = MemorySurface::new();
/// let report = loader.load_plate(&plate, &mut surface).unwrap();
///
/// assert_eq!(report.applied.writes, 1);
/// assert_eq!(surface.slot(PlateSlot::Body), Some(CosmeticEntry::new(100)));
/// ```
pub struct PlateLoader<'a, A: ArmoireLookup + ?Sized, I: InventorySource + ?Sized> {
    dresser: &'a DresserCache,
    armoire: &'a A,
    inventory: &'a I,
    tables: &'a GameTables,
    settings: &'a EngineSettings,
}

impl<'a, A: ArmoireLookup + ?Sized, I: InventorySource + ?Sized> PlateLoader<'a, A, I> {
    /// Bundle the game state a load reads from.
    pub fn new(
        dresser: &'a DresserCache,
        armoire: &'a A,
        inventory: &'a I,
        tables: &'a GameTables,
        settings: &'a EngineSettings,
    ) -> Self {
        Self {
            dresser,
            armoire,
            inventory,
            tables,
            settings,
        }
    }

    /// Conditions that would make loads unreliable right now.
    pub fn warnings(&self) -> Vec<LoadWarning> {
        let mut warnings = Vec::new();
        if !self.armoire.is_loaded() {
            warnings.push(LoadWarning::ArmoireNotLoaded);
        }
        if self.dresser.is_empty() {
            warnings.push(LoadWarning::DresserEmpty);
        }
        warnings
    }

    /// Slots of `plate` whose item is in neither the dresser nor the
    /// armoire, in slot order.
    ///
    /// Nothing is reported while the dresser is empty, since ownership is
    /// unknown until it has been read.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use glamplate::*;
    /// use glamplate::armoire::EmptyArmoire;
    /// use glamplate::dresser::{DresserCache, DresserCachedItem};
    /// use glamplate::inventory::Inventory;
    ///
    /// let mut dresser = DresserCache::new();
    /// dresser.refresh_with(1, || vec![DresserCachedItem::new(0, 1_000_100)]);
    /// let (inventory, tables, settings) = (Inventory::default(), GameTables::new(), EngineSettings::default());
    /// let loader = PlateLoader::new(&dresser, &EmptyArmoire, &inventory, &tables, &settings);
    ///
    /// let plate = SavedPlate::with_entries("p", [
    ///     (PlateSlot::Head, CosmeticEntry::new(100)),
    ///     (PlateSlot::Body, CosmeticEntry::new(300)),
    /// ]);
    /// assert_eq!(loader.unowned_slots(&plate), vec![PlateSlot::Body]);
    /// ```
    pub fn unowned_slots(&self, plate: &SavedPlate) -> Vec<PlateSlot> {
        if self.dresser.is_empty() {
            return Vec::new();
        }

        plate
            .entries()
            .filter(|(_, entry)| !entry.is_empty())
            .filter(|(_, entry)| {
                !self.dresser.owns(entry.item_id, self.settings)
                    && !self.armoire.is_available(entry.item_id)
            })
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Resolve `plate` without writing anything.
    pub fn preview<S: LivePlateSurface + ?Sized>(
        &self,
        plate: &SavedPlate,
        surface: &S,
    ) -> Result<PlateResolution, PlateError> {
        if !surface.is_available() {
            return Err(PlateError::SurfaceUnavailable);
        }

        let contents = self.dresser.contents();
        let resolver = PlateResolver::new(&contents, self.armoire, self.tables, self.settings);
        Ok(resolver.resolve(
            plate,
            &surface.current_snapshot(),
            surface.selected_slot_index(),
        ))
    }

    /// Resolve `plate` and write it to `surface`.
    ///
    /// Fails only when the editor is not open, in which case nothing is
    /// written. Missing items and dyes are skipped or substituted.
    pub fn load_plate<S: LivePlateSurface + ?Sized>(
        &self,
        plate: &SavedPlate,
        surface: &mut S,
    ) -> Result<LoadReport, PlateError> {
        tracing::debug!("Begin load_plate({:?})", plate.name);
        for warning in self.warnings() {
            tracing::warn!("{}", warning);
        }

        let resolution = self.preview(plate, surface)?;
        let applied = PlateApplier::new(self.inventory, self.tables).apply(surface, &resolution);

        if !resolution.skipped.is_empty() {
            tracing::info!(
                "Plate {:?}: {} slot(s) not owned, left unchanged: {:?}",
                plate.name,
                resolution.skipped_count(),
                resolution.skipped
            );
        }
        tracing::debug!("End load_plate({:?})", plate.name);

        Ok(LoadReport {
            resolution,
            applied,
        })
    }
}
