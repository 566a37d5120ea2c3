//! General inventory model.
//!
//! Dye items live in the player's general inventory. The stain resolver
//! scans it read-only: containers in the order the source lists them,
//! stacks in index order.

use crate::entry::ItemId;

/// One inventory slot. An empty slot has `item_id == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryStack {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl InventoryStack {
    /// A stack of `quantity` units of `item_id`.
    pub fn new(item_id: ItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}

/// An inventory container (one bag page).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub id: u32,
    pub slots: Vec<InventoryStack>,
}

impl Container {
    /// A container with the given stacks in index order.
    pub fn new(id: u32, slots: Vec<InventoryStack>) -> Self {
        Self { id, slots }
    }

    /// A container of `size` empty slots.
    pub fn empty(id: u32, size: usize) -> Self {
        Self {
            id,
            slots: vec![InventoryStack::default(); size],
        }
    }

    /// Put `stack` at `index`, growing the container if needed.
    pub fn set(&mut self, index: usize, stack: InventoryStack) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, InventoryStack::default());
        }
        self.slots[index] = stack;
    }
}

/// Host-side view of the general inventory, in scan order.
pub trait InventorySource {
    fn containers(&self) -> &[Container];
}

/// An in-memory inventory.
///
/// # Examples
///
/// ```rust
/// use glamplate::inventory::{Container, Inventory, InventorySource, InventoryStack};
///
/// let mut bag = Container::empty(0, 35);
/// bag.set(4, InventoryStack::new(5729, 2));
///
/// let inventory = Inventory::new(vec![bag]);
/// assert_eq!(inventory.containers()[0].slots[4].quantity, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    containers: Vec<Container>,
}

impl Inventory {
    /// An inventory scanning `containers` in the given order.
    pub fn new(containers: Vec<Container>) -> Self {
        Self { containers }
    }

    /// Append a container to the end of the scan order.
    pub fn push(&mut self, container: Container) {
        self.containers.push(container);
    }
}

impl InventorySource for Inventory {
    fn containers(&self) -> &[Container] {
        &self.containers
    }
}
