//! Import hand-off.
//!
//! Imports from outside sources (a gear-planner link, another player's
//! character) are fetched on worker threads. Workers build a complete
//! `ImportedPlate` and send it over a channel; the tick thread drains the
//! channel into the configuration, so no partially built plate is ever
//! visible.

use crate::config::Configuration;
use crate::entry::CosmeticEntry;
use crate::error::PlateError;
use crate::plate::SavedPlate;
use crate::slot::PlateSlot;
use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// A plate assembled by an importer.
///
/// # Examples
///
/// ```rust
/// use glamplate::import::ImportedPlate;
/// use glamplate::{CosmeticEntry, PlateSlot};
///
/// let mut imported = ImportedPlate::new("Gear set");
/// imported.push(PlateSlot::LeftRing, CosmeticEntry::new(10));
/// imported.push(PlateSlot::LeftRing, CosmeticEntry::new(11));
///
/// let plate = imported.into_plate("import").unwrap();
/// assert_eq!(plate.entry(PlateSlot::RightRing), Some(&CosmeticEntry::new(11)));
/// assert!(plate.has_tag("import"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedPlate {
    pub name: String,
    pub entries: BTreeMap<PlateSlot, CosmeticEntry>,
}

impl ImportedPlate {
    /// An import with no items yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Record an item. Sources list both rings as left rings, so a second
    /// left ring is moved to the right hand.
    pub fn push(&mut self, slot: PlateSlot, entry: CosmeticEntry) {
        let slot = if slot == PlateSlot::LeftRing && self.entries.contains_key(&PlateSlot::LeftRing)
        {
            PlateSlot::RightRing
        } else {
            slot
        };
        self.entries.insert(slot, entry);
    }

    /// Turn the import into a saved plate tagged with `tag`.
    ///
    /// Fails with [`PlateError::EmptyImport`] when no non-empty item was
    /// recorded.
    pub fn into_plate(self, tag: &str) -> Result<SavedPlate, PlateError> {
        if self.entries.values().all(CosmeticEntry::is_empty) {
            return Err(PlateError::EmptyImport);
        }

        let mut plate = SavedPlate::with_entries(self.name, self.entries);
        plate.add_tag(tag);
        Ok(plate)
    }
}

/// Sending half handed to import workers.
pub type ImportSender = Sender<Result<ImportedPlate, PlateError>>;

/// Completed imports waiting for the tick thread.
///
/// # Examples
///
/// ```rust
/// use glamplate::import::{ImportQueue, ImportedPlate};
/// use glamplate::{Configuration, CosmeticEntry, PlateSlot};
///
/// let queue = ImportQueue::new();
/// let sender = queue.sender();
/// std::thread::spawn(move || {
///     let mut plate = ImportedPlate::new("Fetched");
///     plate.push(PlateSlot::Head, CosmeticEntry::new(3));
///     sender.send(Ok(plate)).unwrap();
/// })
/// .join()
/// .unwrap();
///
/// let mut config = Configuration::default();
/// assert_eq!(queue.drain_into(&mut config, "web").unwrap(), 1);
/// assert_eq!(config.plates[0].name, "Fetched");
/// ```
pub struct ImportQueue {
    tx: Option<ImportSender>,
    rx: Receiver<Result<ImportedPlate, PlateError>>,
}

impl ImportQueue {
    /// An open queue with no pending imports.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx: Some(tx), rx }
    }

    /// A new sender for a worker.
    ///
    /// After [`close`](Self::close) the returned sender is already
    /// disconnected and anything sent on it is dropped.
    pub fn sender(&self) -> ImportSender {
        match &self.tx {
            Some(tx) => tx.clone(),
            None => mpsc::channel().0,
        }
    }

    /// Stop handing out senders. Once every worker has dropped its sender
    /// and the queue is drained, `drain_into` reports disconnection.
    pub fn close(&mut self) {
        self.tx = None;
    }

    /// Move every finished import into `config`, tagged with `tag`.
    ///
    /// Returns how many plates were added. Failed and empty imports are
    /// logged and dropped. Fails with [`PlateError::ImportDisconnected`]
    /// only when nothing at all arrived and no sender is left.
    pub fn drain_into(&self, config: &mut Configuration, tag: &str) -> Result<usize, PlateError> {
        let mut received = 0;
        let mut added = 0;

        loop {
            let result = match self.rx.try_recv() {
                Ok(result) => {
                    received += 1;
                    result
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) if received == 0 => {
                    return Err(PlateError::ImportDisconnected)
                }
                Err(TryRecvError::Disconnected) => break,
            };

            match result.and_then(|imported| imported.into_plate(tag)) {
                Ok(plate) => {
                    tracing::info!("Imported plate {:?}", plate.name);
                    config.add_plate(plate);
                    added += 1;
                }
                Err(err) => tracing::warn!("Import failed: {}", err),
            }
        }

        Ok(added)
    }
}

impl Default for ImportQueue {
    fn default() -> Self {
        Self::new()
    }
}
