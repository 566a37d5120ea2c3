//! Stain substitution resolver.
//!
//! When a slot's source item does not already carry the desired stains,
//! dye items from general inventory are spent to apply them. The resolver
//! picks a concrete dye stack for a stain and records the claim, so two
//! slots in the same pass never spend the same stack past its quantity.

use crate::entry::{ItemId, StainId};
use crate::inventory::InventorySource;
use crate::tables::GameTables;
use std::collections::HashMap;

/// Per-pass record of how many items of each inventory stack are spoken for.
///
/// Keyed by `(container id, slot index)`. Create one per application pass
/// and drop it afterwards.
#[derive(Debug, Clone, Default)]
pub struct StainClaims {
    claimed: HashMap<(u32, u32), u32>,
}

impl StainClaims {
    /// An empty claim set for a new pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Units already claimed from the stack at (`container`, `slot`).
    pub fn claimed(&self, container: u32, slot: u32) -> u32 {
        self.claimed.get(&(container, slot)).copied().unwrap_or(0)
    }

    fn claim(&mut self, container: u32, slot: u32) {
        *self.claimed.entry((container, slot)).or_insert(0) += 1;
    }

    /// Total items claimed across all stacks.
    pub fn total(&self) -> u32 {
        self.claimed.values().sum()
    }
}

/// Where a stain's dye comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StainSupply {
    /// The channel has no stain; nothing to spend.
    NotNeeded,

    /// A dye stack was found and one item of it claimed.
    Located {
        item_id: ItemId,
        container: u32,
        slot: u32,
    },

    /// No stack could be found. `item_id` is the stain's first candidate
    /// dye (0 if the stain is unknown), passed along anyway; the host may
    /// accept or silently ignore it.
    Placeholder { item_id: ItemId },
}

impl StainSupply {
    /// The supply item id to hand to the host (0 when not needed).
    pub fn item_id(&self) -> ItemId {
        match self {
            StainSupply::NotNeeded => 0,
            StainSupply::Located { item_id, .. } => *item_id,
            StainSupply::Placeholder { item_id } => *item_id,
        }
    }

    /// Whether a physical dye stack was located.
    pub fn found(&self) -> bool {
        matches!(self, StainSupply::Located { .. })
    }

    /// `(container, slot)` of the claimed stack.
    pub fn location(&self) -> Option<(u32, u32)> {
        match self {
            StainSupply::Located {
                container, slot, ..
            } => Some((*container, *slot)),
            _ => None,
        }
    }
}

/// Selects inventory dye stacks for stains.
///
/// # Examples
///
/// ```rust
/// use glamplate::inventory::{Container, Inventory, InventoryStack};
/// use glamplate::stain::{StainClaims, StainResolver};
/// use glamplate::GameTables;
///
/// let tables = GameTables::new().with_stain_supply(9, [5729, 0]);
/// let inventory = Inventory::new(vec![Container::new(0, vec![InventoryStack::new(5729, 1)])]);
/// let resolver = StainResolver::new(&inventory, &tables);
///
/// let mut claims = StainClaims::new();
/// assert!(resolver.select_stain_source(9, &mut claims).found());
/// // the only dye is spoken for now
/// let second = resolver.select_stain_source(9, &mut claims);
/// assert!(!second.found());
/// assert_eq!(second.item_id(), 5729);
/// ```
pub struct StainResolver<'a, I: InventorySource + ?Sized> {
    inventory: &'a I,
    tables: &'a GameTables,
}

impl<'a, I: InventorySource + ?Sized> StainResolver<'a, I> {
    /// A resolver searching `inventory` for dyes listed in `tables`.
    pub fn new(inventory: &'a I, tables: &'a GameTables) -> Self {
        Self { inventory, tables }
    }

    /// Pick a dye stack for `stain`, claiming one item of it.
    ///
    /// Candidates are tried in table order; for each, containers in scan
    /// order and stacks in index order. The first stack with unclaimed
    /// quantity wins.
    pub fn select_stain_source(&self, stain: StainId, claims: &mut StainClaims) -> StainSupply {
        if stain == 0 {
            return StainSupply::NotNeeded;
        }

        let mut placeholder = None;
        for candidate in self.tables.stain_candidates(stain) {
            if placeholder.is_none() {
                placeholder = Some(candidate);
            }

            for container in self.inventory.containers() {
                for (index, stack) in container.slots.iter().enumerate() {
                    if stack.item_id != candidate {
                        continue;
                    }

                    let slot = index as u32;
                    if claims.claimed(container.id, slot) >= stack.quantity {
                        continue;
                    }

                    claims.claim(container.id, slot);
                    return StainSupply::Located {
                        item_id: candidate,
                        container: container.id,
                        slot,
                    };
                }
            }
        }

        let item_id = placeholder.unwrap_or(0);
        tracing::warn!(
            "No dye for stain {} in inventory, falling back to item {}",
            stain,
            item_id
        );
        StainSupply::Placeholder { item_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Container, Inventory, InventoryStack};

    fn tables() -> GameTables {
        GameTables::new()
            .with_stain_supply(1, [100, 101])
            .with_stain_supply(2, [200, 0])
    }

    #[test]
    fn test_zero_stain_not_needed() {
        let tables = tables();
        let inventory = Inventory::default();
        let resolver = StainResolver::new(&inventory, &tables);
        let mut claims = StainClaims::new();

        assert_eq!(resolver.select_stain_source(0, &mut claims), StainSupply::NotNeeded);
        assert_eq!(claims.total(), 0);
    }

    #[test]
    fn test_first_candidate_preferred_over_scan_order() {
        let tables = tables();
        let inventory = Inventory::new(vec![
            Container::new(0, vec![InventoryStack::new(101, 5)]),
            Container::new(1, vec![InventoryStack::default(), InventoryStack::new(100, 1)]),
        ]);
        let resolver = StainResolver::new(&inventory, &tables);
        let mut claims = StainClaims::new();

        assert_eq!(
            resolver.select_stain_source(1, &mut claims),
            StainSupply::Located {
                item_id: 100,
                container: 1,
                slot: 1
            }
        );
        // the preferred stack is exhausted, fall through to the second candidate
        assert_eq!(
            resolver.select_stain_source(1, &mut claims),
            StainSupply::Located {
                item_id: 101,
                container: 0,
                slot: 0
            }
        );
        assert_eq!(claims.total(), 2);
    }

    #[test]
    fn test_quantity_limits_claims() {
        let tables = tables();
        let inventory = Inventory::new(vec![Container::new(
            3,
            vec![InventoryStack::new(200, 2), InventoryStack::new(200, 1)],
        )]);
        let resolver = StainResolver::new(&inventory, &tables);
        let mut claims = StainClaims::new();

        let picks: Vec<_> = (0..4)
            .map(|_| resolver.select_stain_source(2, &mut claims).location())
            .collect();
        assert_eq!(picks, vec![Some((3, 0)), Some((3, 0)), Some((3, 1)), None]);
        assert_eq!(claims.claimed(3, 0), 2);
        assert_eq!(claims.claimed(3, 1), 1);
    }

    #[test]
    fn test_placeholder_uses_first_candidate() {
        let tables = tables();
        let inventory = Inventory::default();
        let resolver = StainResolver::new(&inventory, &tables);
        let mut claims = StainClaims::new();

        let supply = resolver.select_stain_source(1, &mut claims);
        assert_eq!(supply, StainSupply::Placeholder { item_id: 100 });
        assert!(!supply.found());
        assert_eq!(claims.total(), 0);
    }

    #[test]
    fn test_unknown_stain_placeholder_is_zero() {
        let tables = tables();
        let inventory = Inventory::default();
        let resolver = StainResolver::new(&inventory, &tables);
        let mut claims = StainClaims::new();

        assert_eq!(
            resolver.select_stain_source(77, &mut claims),
            StainSupply::Placeholder { item_id: 0 }
        );
    }
}
