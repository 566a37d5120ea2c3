//! Configuration module.
//!
//! Holds the persisted plugin configuration: the plate library, a few UI
//! toggles and the engine settings. The file is versioned JSON; older
//! versions are migrated in place after a backup copy is written.

use crate::error::PlateError;
use crate::plate::{PlateEdit, SavedPlate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Current configuration file version.
pub const CURRENT_VERSION: i64 = 2;

/// Tunables for resolution that come from game data conventions rather
/// than from the plate.
///
/// # Examples
///
/// ```rust
/// use glamplate::EngineSettings;
///
/// let settings = EngineSettings::default();
/// assert_eq!(settings.item_modifier_mod, 500_000);
/// assert_eq!(settings.dresser_slot_limit, 800);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EngineSettings {
    /// Dresser item ids are compared modulo this value, removing the
    /// quality/variant offset.
    pub item_modifier_mod: u32,

    /// Offset added to high-quality item ids.
    pub hq_item_offset: u32,

    /// Dresser slot indices at or above this are padding.
    pub dresser_slot_limit: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            item_modifier_mod: 500_000,
            hq_item_offset: 1_000_000,
            dresser_slot_limit: crate::dresser::DEFAULT_DRESSER_SLOT_LIMIT,
        }
    }
}

impl EngineSettings {
    /// Strip the high-quality offset from `item_id`.
    pub fn normal_quality(&self, item_id: u32) -> u32 {
        if self.hq_item_offset == 0 {
            item_id
        } else {
            item_id % self.hq_item_offset
        }
    }
}

/// The persisted configuration.
///
/// # Examples
///
/// ```rust
/// use glamplate::{Configuration, SavedPlate};
///
/// let mut config = Configuration::default();
/// config.add_plate(SavedPlate::new("First"));
/// config.add_plate(SavedPlate::new("Second"));
/// config.move_plate(1, 0).unwrap();
///
/// assert_eq!(config.plates[0].name, "Second");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Configuration {
    pub version: i64,
    pub plates: Vec<SavedPlate>,
    pub show_editor_menu: bool,
    pub show_examine_menu: bool,
    pub show_try_on_menu: bool,
    pub item_filter_show_obtained_only: bool,
    pub engine: EngineSettings,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            plates: Vec::new(),
            show_editor_menu: true,
            show_examine_menu: true,
            show_try_on_menu: true,
            item_filter_show_obtained_only: false,
            engine: EngineSettings::default(),
        }
    }
}

impl Configuration {
    /// Load the configuration at `path`, migrating older versions.
    ///
    /// A missing file yields the defaults. An older file is backed up to
    /// `<name>.bak`, migrated one version at a time and written back.
    pub fn load_and_migrate(path: impl AsRef<Path>) -> Result<Self, PlateError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let mut cfg: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
        let version = cfg.get("Version").and_then(Value::as_i64).unwrap_or(0);

        if version > CURRENT_VERSION {
            return Err(PlateError::UnsupportedVersion {
                found: version,
                supported: CURRENT_VERSION,
            });
        }

        if version < CURRENT_VERSION {
            let backup = create_backup(path)?;
            tracing::info!(
                "Migrating configuration from version {} to {} (backup at {})",
                version,
                CURRENT_VERSION,
                backup.display()
            );

            migrate(&mut cfg, version);
            fs::write(path, serde_json::to_string_pretty(&cfg)?)?;
        }

        Ok(serde_json::from_value(cfg)?)
    }

    /// Write the configuration to `path` as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PlateError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Append a plate, returning its index.
    pub fn add_plate(&mut self, plate: SavedPlate) -> usize {
        self.plates.push(plate);
        self.plates.len() - 1
    }

    /// Remove and return the plate at `index`.
    pub fn remove_plate(&mut self, index: usize) -> Result<SavedPlate, PlateError> {
        if index >= self.plates.len() {
            return Err(PlateError::PlateIndex(index));
        }
        Ok(self.plates.remove(index))
    }

    /// Move the plate at `from` so it ends up at `to`.
    pub fn move_plate(&mut self, from: usize, to: usize) -> Result<(), PlateError> {
        if from >= self.plates.len() {
            return Err(PlateError::PlateIndex(from));
        }
        if to >= self.plates.len() {
            return Err(PlateError::PlateIndex(to));
        }

        let plate = self.plates.remove(from);
        self.plates.insert(to, plate);
        Ok(())
    }

    /// Begin editing the plate at `index`.
    pub fn edit_plate(&self, index: usize) -> Result<PlateEdit, PlateError> {
        self.plates
            .get(index)
            .map(PlateEdit::begin)
            .ok_or(PlateError::PlateIndex(index))
    }

    /// Write an edit back to the plate at `index`.
    pub fn commit_edit(&mut self, index: usize, edit: PlateEdit) -> Result<(), PlateError> {
        let target = self
            .plates
            .get_mut(index)
            .ok_or(PlateError::PlateIndex(index))?;
        edit.commit(target);
        Ok(())
    }

    /// Plates matching `query` by name or tag, with their indices.
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = (usize, &'a SavedPlate)> {
        self.plates
            .iter()
            .enumerate()
            .filter(move |(_, plate)| plate.matches_query(query))
    }
}

fn create_backup(path: &Path) -> Result<PathBuf, PlateError> {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".bak");

    let backup = path.with_file_name(name);
    fs::copy(path, &backup)?;
    Ok(backup)
}

/// Run every migration after `from` up to the current version.
fn migrate(cfg: &mut Value, from: i64) {
    for version in (from + 1)..=CURRENT_VERSION {
        if version == 2 {
            migrate_1_2(cfg);
        }
        if let Some(obj) = cfg.as_object_mut() {
            obj.insert("Version".to_string(), Value::from(version));
        }
    }
}

/// Version 2 renamed `StainId` to `Stain1` and added `Stain2`.
fn migrate_1_2(cfg: &mut Value) {
    let Some(plates) = cfg.get_mut("Plates").and_then(Value::as_array_mut) else {
        return;
    };

    for plate in plates {
        let Some(items) = plate.get_mut("Items").and_then(Value::as_object_mut) else {
            continue;
        };

        for (key, item) in items.iter_mut() {
            if key == "$type" {
                continue;
            }

            let Some(item) = item.as_object_mut() else {
                continue;
            };
            if item.contains_key("Stain1") {
                continue;
            }
            let Some(stain) = item.remove("StainId") else {
                continue;
            };

            item.insert("Stain1".to_string(), stain);
            item.insert("Stain2".to_string(), Value::from(0));
        }
    }
}
