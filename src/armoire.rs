//! Armoire membership oracle.
//!
//! The armoire is addressed by cabinet row rather than item id: an item is
//! first mapped to its cabinet row through the static tables, and the host
//! then answers whether that row is currently stored. Items without a
//! cabinet row can never come from the armoire.

use crate::entry::ItemId;
use crate::tables::GameTables;
use std::collections::BTreeSet;

/// Host-side view of the armoire.
pub trait ArmoireSource {
    /// Whether the armoire contents have been loaded at all this session.
    fn is_loaded(&self) -> bool {
        true
    }

    /// Whether `cabinet_id` is currently stored.
    fn contains(&self, cabinet_id: u32) -> bool;
}

/// Armoire queries the resolver depends on.
pub trait ArmoireLookup {
    /// Whether the armoire has been read this session. Until it has,
    /// stored items look missing.
    fn is_loaded(&self) -> bool {
        true
    }

    /// Whether `item_id` can be applied from the armoire.
    fn is_available(&self, item_id: ItemId) -> bool {
        self.cabinet_slot_for(item_id).is_some()
    }

    /// The cabinet id to apply `item_id` from, if it is stored.
    fn cabinet_slot_for(&self, item_id: ItemId) -> Option<u32>;
}

/// A set of stored cabinet ids.
///
/// # Examples
///
/// ```rust
/// use glamplate::armoire::{ArmoireSource, CabinetSet};
///
/// let cabinet = CabinetSet::new([7, 12]);
/// assert!(cabinet.contains(7));
/// assert!(!cabinet.contains(8));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CabinetSet {
    stored: BTreeSet<u32>,
}

impl CabinetSet {
    /// A cabinet holding `cabinet_ids`.
    pub fn new<I: IntoIterator<Item = u32>>(cabinet_ids: I) -> Self {
        Self {
            stored: cabinet_ids.into_iter().collect(),
        }
    }

    /// Store one more cabinet id.
    pub fn insert(&mut self, cabinet_id: u32) {
        self.stored.insert(cabinet_id);
    }
}

impl ArmoireSource for CabinetSet {
    fn contains(&self, cabinet_id: u32) -> bool {
        self.stored.contains(&cabinet_id)
    }
}

/// Answers armoire membership by item id.
pub struct ArmoireOracle<'a, S: ArmoireSource + ?Sized> {
    source: &'a S,
    tables: &'a GameTables,
}

impl<'a, S: ArmoireSource + ?Sized> ArmoireOracle<'a, S> {
    /// Look items up through `tables` and check rows against `source`.
    pub fn new(source: &'a S, tables: &'a GameTables) -> Self {
        Self { source, tables }
    }
}

impl<S: ArmoireSource + ?Sized> ArmoireLookup for ArmoireOracle<'_, S> {
    fn is_loaded(&self) -> bool {
        self.source.is_loaded()
    }

    fn cabinet_slot_for(&self, item_id: ItemId) -> Option<u32> {
        let row = self.tables.cabinet_row(item_id)?;
        self.source.contains(row).then_some(row)
    }
}

/// An armoire that holds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyArmoire;

impl ArmoireLookup for EmptyArmoire {
    fn cabinet_slot_for(&self, _item_id: ItemId) -> Option<u32> {
        None
    }
}
