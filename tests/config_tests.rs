use glamplate::share::{export_text, SharedPlate};
use glamplate::*;
use std::fs;
use tempfile::TempDir;

const VERSION_1: &str = r#"{
    "Version": 1,
    "ShowEditorMenu": false,
    "Plates": [
        {
            "Name": "Old plate",
            "Items": {
                "$type": "System.Collections.Generic.Dictionary",
                "Head": { "ItemId": 5, "StainId": 3 },
                "Body": { "ItemId": 6, "StainId": 0 },
                "Belt": { "ItemId": 7, "StainId": 1 }
            },
            "Tags": ["old"]
        }
    ]
}"#;

/// A version 1 file is backed up, migrated, sanitized and rewritten.
#[test]
fn test_migrate_version_1() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("glamplate.json");
    fs::write(&path, VERSION_1).unwrap();

    let config = Configuration::load_and_migrate(&path).unwrap();

    assert_eq!(config.version, 2);
    assert!(!config.show_editor_menu);
    assert_eq!(config.plates.len(), 1);

    let plate = &config.plates[0];
    assert_eq!(plate.entry(PlateSlot::Head), Some(&CosmeticEntry::new(5).with_stains(3, 0)));
    assert_eq!(plate.entry(PlateSlot::Body), Some(&CosmeticEntry::new(6)));
    assert_eq!(plate.entries().count(), 2);
    assert!(plate.has_tag("old"));

    let backup = dir.path().join("glamplate.json.bak");
    assert_eq!(fs::read_to_string(backup).unwrap(), VERSION_1);

    let rewritten: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(rewritten["Version"], 2);
    assert_eq!(rewritten["Plates"][0]["Items"]["Head"]["Stain1"], 3);
}

/// Loading a current file neither backs it up nor rewrites it.
#[test]
fn test_current_version_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("glamplate.json");

    let mut config = Configuration::default();
    let mut plate = SavedPlate::with_entries(
        "Saved",
        [(PlateSlot::Feet, CosmeticEntry::new(8).with_stains(1, 2))],
    );
    plate.add_tag("keep");
    config.add_plate(plate);
    config.save(&path).unwrap();

    let loaded = Configuration::load_and_migrate(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(!dir.path().join("glamplate.json.bak").exists());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Configuration::load_and_migrate(dir.path().join("absent.json")).unwrap();
    assert_eq!(config, Configuration::default());
}

#[test]
fn test_newer_version_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("glamplate.json");
    fs::write(&path, r#"{ "Version": 9 }"#).unwrap();

    assert!(matches!(
        Configuration::load_and_migrate(&path),
        Err(PlateError::UnsupportedVersion {
            found: 9,
            supported: 2
        })
    ));
}

/// Edits only land on the plate when committed.
#[test]
fn test_edit_commit_and_cancel() {
    let mut config = Configuration::default();
    let index = config.add_plate(SavedPlate::new("Draft"));

    let mut edit = config.edit_plate(index).unwrap();
    edit.draft_mut().set_entry(PlateSlot::Neck, CosmeticEntry::new(30));
    edit.cancel();
    assert_eq!(config.plates[index].entry(PlateSlot::Neck), None);

    let mut edit = config.edit_plate(index).unwrap();
    edit.draft_mut().set_entry(PlateSlot::Neck, CosmeticEntry::new(30));
    edit.draft_mut().rename("Final");
    config.commit_edit(index, edit).unwrap();

    assert_eq!(config.plates[index].name, "Final");
    assert_eq!(
        config.plates[index].entry(PlateSlot::Neck),
        Some(&CosmeticEntry::new(30))
    );
}

/// Sharing carries entries and the fill flag, not tags.
#[test]
fn test_share_between_libraries() {
    let tables = GameTables::new()
        .with_item_name(30, "Silver Choker")
        .with_stain_name(2, "Soot Black");

    let mut plate = SavedPlate::with_entries(
        "Evening",
        [(PlateSlot::Neck, CosmeticEntry::new(30).with_stains(2, 0))],
    );
    plate.add_tag("mine");

    let json = SharedPlate::from(&plate).to_json().unwrap();

    let mut other = Configuration::default();
    other.add_plate(SharedPlate::from_json(&json).unwrap().into_plate());

    let received = &other.plates[0];
    assert_eq!(received.name, "Evening");
    assert_eq!(received.tags().count(), 0);
    assert_eq!(
        export_text(received, &tables),
        "Evening\n---\nNeck: Silver Choker (Soot Black)\n"
    );
}
