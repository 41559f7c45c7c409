//! Equipment bindings
//!
//! Equipped stacks stay in the grid. The map only records which grid
//! position each equipment slot is bound to, so a slot's `equipped` flag and
//! the equipment view of a kind are both derived from one binding and can't
//! drift apart.

use crate::item::EquipmentSlot;
use crate::slot::GridPos;
use std::collections::BTreeMap;

/// Mapping from equipment slot to the grid position holding the equipped stack
#[derive(Debug, Clone, Default)]
pub struct EquipmentMap {
    bindings: BTreeMap<EquipmentSlot, GridPos>,
}

impl EquipmentMap {
    /// Create an empty equipment map
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a slot to a grid position.
    /// Returns the previously bound position if any.
    pub fn bind(&mut self, slot: EquipmentSlot, pos: GridPos) -> Option<GridPos> {
        self.bindings.insert(slot, pos)
    }

    /// Remove the binding for a slot
    pub fn unbind(&mut self, slot: EquipmentSlot) -> Option<GridPos> {
        self.bindings.remove(&slot)
    }

    /// Grid position bound to a slot
    pub fn position_of(&self, slot: EquipmentSlot) -> Option<GridPos> {
        self.bindings.get(&slot).copied()
    }

    /// Equipment slot bound to a grid position, if the stack there is equipped
    pub fn bound_at(&self, pos: GridPos) -> Option<EquipmentSlot> {
        self.bindings
            .iter()
            .find(|(_, p)| **p == pos)
            .map(|(slot, _)| *slot)
    }

    pub fn is_bound(&self, pos: GridPos) -> bool {
        self.bound_at(pos).is_some()
    }

    /// Make bindings follow two grid slots whose contents were exchanged
    pub fn swap_positions(&mut self, a: GridPos, b: GridPos) {
        for pos in self.bindings.values_mut() {
            if *pos == a {
                *pos = b;
            } else if *pos == b {
                *pos = a;
            }
        }
    }

    /// All bindings, ordered by equipment slot
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, GridPos)> + '_ {
        self.bindings.iter().map(|(slot, pos)| (*slot, *pos))
    }

    /// Get count of equipped stacks
    pub fn equipped_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}
