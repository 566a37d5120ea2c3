//! # glamplate - Glamour Plate Resolution Engine
//!
//! Loads saved cosmetic plates onto a game's live glamour plate editor:
//! - **Source resolution** (which owned copy of an item to use: glamour
//!   dresser first, armoire as fallback)
//! - **Dye substitution** (which inventory stack supplies each stain, never
//!   claiming the same unit twice in one load)
//! - **Minimal writes** (slots that already show the desired entry are left
//!   alone, and the player's selected slot is restored)
//!
//! ## Core Concepts
//!
//! ### Load Pipeline
//!
//! ```text
//! [SavedPlate] + [PlateSnapshot] → [PlateResolver] → [PlateResolution] → [PlateApplier]
//! ```
//!
//! 1. **Snapshot** the editor (`LivePlateSurface::current_snapshot`)
//! 2. **Resolve** every slot into a list of `SlotAction`s (pure, no I/O)
//! 3. **Apply** the actions in order, picking dye stacks as stains are
//!    written
//!
//! Everything the engine reads from the game goes through a trait
//! (`DresserSource`, `ArmoireSource`, `InventorySource`,
//! `LivePlateSurface`), with in-memory implementations for tools and tests.
//!
//! ## Example
//!
//! ```rust
//! use glamplate::*;
//! use glamplate::armoire::{ArmoireOracle, CabinetSet};
//! use glamplate::dresser::{DresserCache, DresserCachedItem};
//! use glamplate::inventory::Inventory;
//! use glamplate::surface::MemorySurface;
//!
//! let mut dresser = DresserCache::new();
//! dresser.refresh_with(1, || {
//!     vec![
//!         DresserCachedItem::new(0, 100),
//!         DresserCachedItem::new(1, 100).with_stains(3, 5),
//!     ]
//! });
//!
//! let tables = GameTables::new().with_cabinet_row(200, 7);
//! let cabinet = CabinetSet::new([7]);
//! let armoire = ArmoireOracle::new(&cabinet, &tables);
//! let inventory = Inventory::default();
//! let settings = EngineSettings::default();
//!
//! let plate = SavedPlate::with_entries("Casual", [
//!     (PlateSlot::Body, CosmeticEntry::new(100).with_stains(3, 5)),
//!     (PlateSlot::Legs, CosmeticEntry::new(200)),
//! ]);
//!
//! let mut surface = MemorySurface::new();
//! let loader = PlateLoader::new(&dresser, &armoire, &inventory, &tables, &settings);
//! let report = loader.load_plate(&plate, &mut surface).unwrap();
//!
//! assert_eq!(report.skipped_count(), 0);
//! assert_eq!(surface.slot(PlateSlot::Body), Some(CosmeticEntry::new(100).with_stains(3, 5)));
//! assert_eq!(surface.slot(PlateSlot::Legs), Some(CosmeticEntry::new(200)));
//!
//! // Loading again changes nothing
//! let again = loader.load_plate(&plate, &mut surface).unwrap();
//! assert_eq!(again.applied.writes, 0);
//! ```
//!
//! ## Modules
//!
//! - [`slot`] - The twelve plate slots
//! - [`entry`] - Cosmetic entries and live editor snapshots
//! - [`plate`] - Saved plates, tags and editing
//! - [`tables`] - Static game data lookups
//! - [`dresser`] - Glamour dresser cache
//! - [`armoire`] - Armoire membership
//! - [`inventory`] - Inventory containers
//! - [`stain`] - Dye stack selection
//! - [`action`] - Slot actions and item sources
//! - [`resolution`] - Resolution results
//! - [`resolver`] - Plate resolution engine
//! - [`surface`] - The live plate editor
//! - [`apply`] - Writing resolutions to the editor
//! - [`config`] - Persisted configuration and migration
//! - [`share`] - Shared JSON and text export
//! - [`tryon`] - Try-on sequencing
//! - [`capture`] - Plates from worn equipment
//! - [`import`] - Import hand-off from worker threads
//! - [`error`] - Error types

pub mod action;
pub mod apply;
pub mod armoire;
pub mod capture;
pub mod config;
pub mod dresser;
pub mod entry;
pub mod error;
pub mod import;
pub mod inventory;
pub mod plate;
pub mod resolution;
pub mod resolver;
pub mod share;
pub mod slot;
pub mod stain;
pub mod surface;
pub mod tables;
pub mod tryon;

// Re-export main types for convenience
pub use action::{MirageSource, SlotAction, SourceDescriptor};
pub use apply::{ApplyReport, LoadReport, LoadWarning, PlateApplier, PlateLoader};
pub use config::{Configuration, EngineSettings};
pub use entry::{CosmeticEntry, ItemId, LiveSlotState, PlateSnapshot, StainId};
pub use error::PlateError;
pub use plate::{PlateEdit, SavedPlate};
pub use resolution::PlateResolution;
pub use resolver::PlateResolver;
pub use slot::PlateSlot;
pub use stain::{StainClaims, StainSupply};
pub use tables::GameTables;
