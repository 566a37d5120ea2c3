//! Resolution results module.
//!
//! Contains the `PlateResolution` type: the ordered write actions for one
//! pass over a plate, plus the slots that could not be resolved.

use crate::action::SlotAction;
use crate::slot::PlateSlot;
use serde::{Deserialize, Serialize};

/// The outcome of resolving one plate.
///
/// Unresolvable slots never abort a pass; they are collected in
/// `skipped` so the caller can warn the player.
///
/// # Examples
///
/// ```rust
/// use glamplate::{PlateResolution, PlateSlot, SlotAction};
///
/// let mut resolution = PlateResolution::new("Summer");
/// resolution.push(SlotAction::Clear(PlateSlot::Head));
/// resolution.skip(PlateSlot::Body);
/// resolution.push(SlotAction::RestoreSelection(0));
///
/// assert_eq!(resolution.write_count(), 1);
/// assert_eq!(resolution.skipped_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateResolution {
    /// Name of the plate this was resolved from.
    pub plate_name: String,

    /// Writes in execution order.
    pub actions: Vec<SlotAction>,

    /// Slots whose item is in neither the dresser nor the armoire.
    pub skipped: Vec<PlateSlot>,
}

impl PlateResolution {
    /// An empty resolution for the named plate.
    pub fn new(plate_name: impl Into<String>) -> Self {
        Self {
            plate_name: plate_name.into(),
            actions: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Append an action in execution order.
    pub fn push(&mut self, action: SlotAction) {
        self.actions.push(action);
    }

    /// Record a slot that could not be resolved.
    pub fn skip(&mut self, slot: PlateSlot) {
        self.skipped.push(slot);
    }

    /// Number of unresolved slots.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Number of actions that write a slot (everything but the selection restore).
    pub fn write_count(&self) -> usize {
        self.actions.iter().filter(|action| action.is_write()).count()
    }

    /// Actions touching `slot`, in order.
    pub fn actions_for(&self, slot: PlateSlot) -> impl Iterator<Item = &SlotAction> {
        self.actions
            .iter()
            .filter(move |action| action.slot() == Some(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_resolution() {
        let resolution = PlateResolution::new("p");
        assert!(resolution.actions.is_empty());
        assert_eq!(resolution.skipped_count(), 0);
        assert_eq!(resolution.write_count(), 0);
    }

    #[test]
    fn test_actions_for_slot() {
        let mut resolution = PlateResolution::new("p");
        resolution.push(SlotAction::Clear(PlateSlot::Head));
        resolution.push(SlotAction::ApplyStains {
            slot: PlateSlot::Body,
            stain1: 1,
            stain2: 2,
        });
        resolution.push(SlotAction::RestoreSelection(4));

        assert_eq!(resolution.actions_for(PlateSlot::Body).count(), 1);
        assert_eq!(resolution.actions_for(PlateSlot::Feet).count(), 0);
    }
}
