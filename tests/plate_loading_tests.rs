use glamplate::armoire::{ArmoireOracle, CabinetSet};
use glamplate::dresser::{DresserCache, DresserCachedItem, StaticDresser};
use glamplate::inventory::{Container, Inventory, InventoryStack};
use glamplate::surface::{LivePlateSurface, MemorySurface, SurfaceCall};
use glamplate::*;

/// Shared game state for the loading tests.
struct Fixture {
    dresser: DresserCache,
    cabinet: CabinetSet,
    inventory: Inventory,
    tables: GameTables,
    settings: EngineSettings,
}

impl Fixture {
    fn new() -> Self {
        let settings = EngineSettings::default();
        let mut dresser = DresserCache::from_settings(&settings);
        dresser.refresh(&StaticDresser::new(
            1,
            vec![
                DresserCachedItem::new(0, 100),
                DresserCachedItem::new(1, 100).with_stains(3, 5),
                // variant of item 150
                DresserCachedItem::new(2, 500_150),
            ],
        ));

        let tables = GameTables::new()
            .with_cabinet_row(200, 7)
            .with_stain_supply(3, [5730, 0])
            .with_stain_supply(5, [5731, 0]);

        let mut bag = Container::empty(0, 35);
        bag.set(10, InventoryStack::new(5730, 1));

        Self {
            dresser,
            cabinet: CabinetSet::new([7]),
            inventory: Inventory::new(vec![bag]),
            tables,
            settings,
        }
    }

    fn load(&self, plate: &SavedPlate, surface: &mut MemorySurface) -> LoadReport {
        let armoire = ArmoireOracle::new(&self.cabinet, &self.tables);
        let loader = PlateLoader::new(
            &self.dresser,
            &armoire,
            &self.inventory,
            &self.tables,
            &self.settings,
        );
        loader.load_plate(plate, surface).unwrap()
    }

    fn preview(&self, plate: &SavedPlate, surface: &MemorySurface) -> PlateResolution {
        let armoire = ArmoireOracle::new(&self.cabinet, &self.tables);
        let loader = PlateLoader::new(
            &self.dresser,
            &armoire,
            &self.inventory,
            &self.tables,
            &self.settings,
        );
        loader.preview(plate, surface).unwrap()
    }
}

fn dresser_source(slot: u32, item_id: ItemId, stains: (StainId, StainId)) -> SourceDescriptor {
    SourceDescriptor {
        source: MirageSource::GlamourDresser,
        slot_or_cabinet_id: slot,
        item_id,
        stain1: stains.0,
        stain2: stains.1,
    }
}

/// A plate that is already on the editor produces no writes.
#[test]
fn test_idempotent_load() {
    let fixture = Fixture::new();
    let plate = SavedPlate::with_entries(
        "Current",
        [
            (PlateSlot::Body, CosmeticEntry::new(100).with_stains(3, 5)),
            (PlateSlot::Legs, CosmeticEntry::new(200)),
        ],
    );

    let mut surface = MemorySurface::new();
    surface.set_slot(PlateSlot::Body, CosmeticEntry::new(100).with_stains(3, 5));
    surface.set_slot(PlateSlot::Legs, CosmeticEntry::new(200));
    surface.selected = 4;

    let resolution = fixture.preview(&plate, &surface);
    assert_eq!(resolution.actions, vec![SlotAction::RestoreSelection(4)]);

    let report = fixture.load(&plate, &mut surface);
    assert_eq!(report.applied.writes, 0);
}

/// Among several dresser copies the one with matching stains wins.
#[test]
fn test_stain_tie_break() {
    let fixture = Fixture::new();
    let plate = SavedPlate::with_entries(
        "Dyed",
        [(PlateSlot::Body, CosmeticEntry::new(100).with_stains(3, 5))],
    );

    let resolution = fixture.preview(&plate, &MemorySurface::new());
    assert_eq!(
        resolution.actions,
        vec![
            SlotAction::SetItem {
                slot: PlateSlot::Body,
                source: dresser_source(1, 100, (3, 5)),
            },
            SlotAction::RestoreSelection(0),
        ]
    );
}

/// Without a stain match the first copy is used and restained.
#[test]
fn test_stain_fallback() {
    let fixture = Fixture::new();
    let plate = SavedPlate::with_entries(
        "Restain",
        [(PlateSlot::Body, CosmeticEntry::new(100).with_stains(5, 3))],
    );

    let resolution = fixture.preview(&plate, &MemorySurface::new());
    assert_eq!(
        resolution.actions,
        vec![
            SlotAction::SetItem {
                slot: PlateSlot::Body,
                source: dresser_source(0, 100, (0, 0)),
            },
            SlotAction::ApplyStains {
                slot: PlateSlot::Body,
                stain1: 5,
                stain2: 3,
            },
            SlotAction::RestoreSelection(0),
        ]
    );
}

/// Items missing from the dresser come from the armoire, undyed.
#[test]
fn test_armoire_fallback() {
    let fixture = Fixture::new();
    let plate = SavedPlate::with_entries("Armoire", [(PlateSlot::Legs, CosmeticEntry::new(200))]);

    let mut surface = MemorySurface::new();
    let report = fixture.load(&plate, &mut surface);

    assert_eq!(
        report.resolution.actions[0],
        SlotAction::SetItem {
            slot: PlateSlot::Legs,
            source: SourceDescriptor {
                source: MirageSource::Armoire,
                slot_or_cabinet_id: 7,
                item_id: 200,
                stain1: 0,
                stain2: 0,
            },
        }
    );
    assert_eq!(surface.last_source(), Some(MirageSource::Armoire));
    assert_eq!(surface.slot(PlateSlot::Legs), Some(CosmeticEntry::new(200)));
}

/// Dresser variants match by base item id and are written as stored.
#[test]
fn test_variant_item_matches_base_id() {
    let fixture = Fixture::new();
    let plate = SavedPlate::with_entries("Variant", [(PlateSlot::Hands, CosmeticEntry::new(150))]);

    let resolution = fixture.preview(&plate, &MemorySurface::new());
    assert_eq!(
        resolution.actions[0],
        SlotAction::SetItem {
            slot: PlateSlot::Hands,
            source: dresser_source(2, 500_150, (0, 0)),
        }
    );
}

/// An item that is nowhere to be found skips only its own slot.
#[test]
fn test_unresolvable_slot_skipped() {
    let fixture = Fixture::new();
    let plate = SavedPlate::with_entries(
        "Partial",
        [
            (PlateSlot::Head, CosmeticEntry::new(999)),
            (PlateSlot::Body, CosmeticEntry::new(100).with_stains(3, 5)),
        ],
    );

    let mut surface = MemorySurface::new();
    surface.set_slot(PlateSlot::Head, CosmeticEntry::new(42));
    let report = fixture.load(&plate, &mut surface);

    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.resolution.skipped, vec![PlateSlot::Head]);
    assert_eq!(surface.slot(PlateSlot::Head), Some(CosmeticEntry::new(42)));
    assert_eq!(
        surface.slot(PlateSlot::Body),
        Some(CosmeticEntry::new(100).with_stains(3, 5))
    );
}

/// One dye unit serves the first slot that needs it; the next gets a
/// placeholder.
#[test]
fn test_dye_claim_exhaustion() {
    let fixture = Fixture::new();
    let plate = SavedPlate::with_entries(
        "Two dyes",
        [
            (PlateSlot::Hands, CosmeticEntry::new(150).with_stains(3, 0)),
            (PlateSlot::Body, CosmeticEntry::new(100).with_stains(3, 0)),
        ],
    );

    let mut surface = MemorySurface::new();
    let report = fixture.load(&plate, &mut surface);

    assert_eq!(report.applied.located_dyes, 1);
    assert_eq!(report.applied.placeholder_dyes, 1);

    let supplies: Vec<_> = surface
        .log
        .iter()
        .filter_map(|call| match call {
            SurfaceCall::ApplyStains(slot, first, _) => Some((*slot, first.supply)),
            _ => None,
        })
        .collect();
    assert_eq!(
        supplies,
        vec![
            (
                PlateSlot::Body,
                StainSupply::Located {
                    item_id: 5730,
                    container: 0,
                    slot: 10,
                }
            ),
            (PlateSlot::Hands, StainSupply::Placeholder { item_id: 5730 }),
        ]
    );
}

/// The editor's selection is back where it started after a load.
#[test]
fn test_selection_restored() {
    let fixture = Fixture::new();
    let mut plate = SavedPlate::with_entries(
        "Mixed",
        [
            (PlateSlot::MainHand, CosmeticEntry::new(999)),
            (PlateSlot::Body, CosmeticEntry::new(100)),
            (PlateSlot::Legs, CosmeticEntry::new(200).with_stains(5, 0)),
        ],
    );
    plate.clear_slot(PlateSlot::Feet);

    let mut surface = MemorySurface::new();
    surface.set_slot(PlateSlot::Feet, CosmeticEntry::new(12));
    surface.selected = 6;

    let report = fixture.load(&plate, &mut surface);

    assert_eq!(
        report.resolution.actions.last(),
        Some(&SlotAction::RestoreSelection(6))
    );
    assert_eq!(surface.log.last(), Some(&SurfaceCall::Select(6)));
    assert_eq!(surface.selected_slot_index(), 6);
    assert_eq!(surface.slot(PlateSlot::Feet), None);
    assert!(surface.changed);
}

/// A selection outside the slot range still comes back as it was.
#[test]
fn test_out_of_range_selection_restored() {
    let fixture = Fixture::new();
    let plate = SavedPlate::with_entries("Coat", [(PlateSlot::Body, CosmeticEntry::new(100))]);

    let mut surface = MemorySurface::new();
    surface.selected = 40;
    fixture.load(&plate, &mut surface);

    assert_eq!(surface.selected_slot_index(), 40);
    assert_eq!(surface.slot(PlateSlot::Body), Some(CosmeticEntry::new(100)));
}

/// The configured padding limit decides which dresser slots are real.
#[test]
fn test_dresser_slot_limit_setting() {
    let settings: EngineSettings = serde_json::from_str(r#"{ "DresserSlotLimit": 500 }"#).unwrap();
    assert_eq!(settings.item_modifier_mod, 500_000);

    let mut dresser = DresserCache::from_settings(&settings);
    dresser.refresh(&StaticDresser::new(1, vec![DresserCachedItem::new(600, 100)]));
    assert!(dresser.is_empty());

    let armoire = glamplate::armoire::EmptyArmoire;
    let inventory = Inventory::default();
    let tables = GameTables::new();
    let loader = PlateLoader::new(&dresser, &armoire, &inventory, &tables, &settings);

    let plate = SavedPlate::with_entries("Coat", [(PlateSlot::Body, CosmeticEntry::new(100))]);
    let mut surface = MemorySurface::new();
    let report = loader.load_plate(&plate, &mut surface).unwrap();

    assert_eq!(report.applied.writes, 0);
    assert_eq!(report.resolution.skipped, vec![PlateSlot::Body]);
    assert_eq!(loader.warnings(), vec![LoadWarning::DresserEmpty]);
}

/// Default fill covers unspecified slots only.
#[test]
fn test_default_fill() {
    let mut fixture = Fixture::new();
    fixture.tables = fixture
        .tables
        .with_default_item(PlateSlot::Body, 100)
        .with_default_item(PlateSlot::Legs, 200);

    let mut plate = SavedPlate::with_entries("Filled", [(PlateSlot::Legs, CosmeticEntry::new(150))]);
    plate.fill_with_default_set = true;

    let mut surface = MemorySurface::new();
    fixture.load(&plate, &mut surface);

    assert_eq!(surface.slot(PlateSlot::Body), Some(CosmeticEntry::new(100)));
    assert_eq!(surface.slot(PlateSlot::Legs), Some(CosmeticEntry::new(500_150)));
}

/// Nothing is written while the editor is closed.
#[test]
fn test_closed_editor() {
    let fixture = Fixture::new();
    let armoire = ArmoireOracle::new(&fixture.cabinet, &fixture.tables);
    let loader = PlateLoader::new(
        &fixture.dresser,
        &armoire,
        &fixture.inventory,
        &fixture.tables,
        &fixture.settings,
    );

    let plate = SavedPlate::with_entries("Closed", [(PlateSlot::Body, CosmeticEntry::new(100))]);
    let mut surface = MemorySurface::default();

    assert!(matches!(
        loader.load_plate(&plate, &mut surface),
        Err(PlateError::SurfaceUnavailable)
    ));
    assert!(surface.log.is_empty());
}

/// The dresser cache only rebuilds on a new token and hides padding.
#[test]
fn test_dresser_gate() {
    let mut cache = DresserCache::new();
    let mut source = StaticDresser::new(
        3,
        vec![
            DresserCachedItem::new(0, 100),
            DresserCachedItem::new(1, 0),
            DresserCachedItem::new(800, 101),
            DresserCachedItem::new(799, 102),
        ],
    );

    assert!(cache.refresh(&source));
    let before = cache.contents();
    assert_eq!(before.len(), 2);
    assert!(before.iter().all(|item| item.item_id != 0 && item.slot < 800));

    source.items.push(DresserCachedItem::new(5, 103));
    assert!(!cache.refresh(&source));
    assert_eq!(cache.len(), 2);

    source.token = Some(4);
    assert!(cache.refresh(&source));
    assert_eq!(cache.len(), 3);
    // handles taken earlier keep the old list
    assert_eq!(before.len(), 2);
}
