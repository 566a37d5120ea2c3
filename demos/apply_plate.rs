//! Apply-plate example: Loading a saved plate onto an in-memory editor
//!
//! This example demonstrates:
//! - Refreshing the dresser cache
//! - Dresser, armoire and default-set sources
//! - Dye selection from the inventory, with a placeholder fallback
//! - Skipped slots and selection restore

use glamplate::armoire::{ArmoireOracle, CabinetSet};
use glamplate::dresser::{DresserCache, DresserCachedItem, StaticDresser};
use glamplate::inventory::{Container, Inventory, InventoryStack};
use glamplate::share::export_text;
use glamplate::surface::{MemorySurface, SurfaceCall};
use glamplate::*;

fn main() -> Result<(), PlateError> {
    println!("=== Apply Plate Demo ===\n");

    // Static game data
    let tables = GameTables::new()
        .with_cabinet_row(3010, 41)
        .with_stain_supply(1, [5729, 0])
        .with_stain_supply(36, [5730, 30116])
        .with_default_item(PlateSlot::Feet, 9901)
        .with_item_name(2010, "Linen Coat")
        .with_item_name(3010, "Cotton Trousers")
        .with_item_name(4010, "Crystal Circlet")
        .with_stain_name(1, "Snow White")
        .with_stain_name(36, "Soot Black");

    let settings = EngineSettings::default();

    // Dresser: two copies of the coat, one already dyed
    let mut dresser = DresserCache::from_settings(&settings);
    dresser.refresh(&StaticDresser::new(
        1,
        vec![
            DresserCachedItem::new(0, 2010).with_name("Linen Coat"),
            DresserCachedItem::new(1, 2010)
                .with_stains(1, 0)
                .with_name("Linen Coat"),
        ],
    ));
    println!("Dresser holds {} items", dresser.len());

    // Armoire holds the trousers
    let cabinet = CabinetSet::new([41]);
    let armoire = ArmoireOracle::new(&cabinet, &tables);

    // One black dye in the first bag
    let mut bag = Container::empty(0, 35);
    bag.set(3, InventoryStack::new(30116, 1));
    let inventory = Inventory::new(vec![bag]);

    let mut plate = SavedPlate::with_entries(
        "Evening",
        [
            (PlateSlot::Head, CosmeticEntry::new(4010)),
            (PlateSlot::Body, CosmeticEntry::new(2010).with_stains(1, 0)),
            (PlateSlot::Legs, CosmeticEntry::new(3010).with_stains(36, 36)),
        ],
    );
    plate.fill_with_default_set = true;
    print!("\n{}", export_text(&plate, &tables));

    let mut surface = MemorySurface::new();
    surface.selected = 8;

    let loader = PlateLoader::new(&dresser, &armoire, &inventory, &tables, &settings);
    for warning in loader.warnings() {
        println!("Warning: {}", warning);
    }
    println!("Not owned: {:?}", loader.unowned_slots(&plate));
    let report = loader.load_plate(&plate, &mut surface)?;

    println!("\nActions:");
    for action in &report.resolution.actions {
        println!("  {}", action);
    }

    println!("\nStain writes:");
    for call in &surface.log {
        if let SurfaceCall::ApplyStains(slot, first, second) = call {
            println!("  {}: {:?} / {:?}", slot, first.supply, second.supply);
        }
    }

    println!(
        "\n{} writes, {} dye(s) from inventory, {} placeholder(s)",
        report.applied.writes, report.applied.located_dyes, report.applied.placeholder_dyes
    );
    println!("Skipped: {:?}", report.resolution.skipped);
    println!("Selected slot restored to {}", surface.selected);

    // A second load has nothing left to do
    let again = loader.load_plate(&plate, &mut surface)?;
    println!("Reload writes: {}", again.applied.writes);

    Ok(())
}
