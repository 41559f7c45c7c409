//! Serializable read-only views of inventory state

use crate::item::{EquipmentSlot, ItemId};
use crate::slot::{GridPos, SlotView};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One slot as seen by presentation layers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    pub item: Option<ItemId>,
    pub count: u32,
    pub equipped: bool,
}

impl From<&SlotView> for SlotSnapshot {
    fn from(view: &SlotView) -> Self {
        Self {
            item: view.item_id().cloned(),
            count: view.count,
            equipped: view.equipped,
        }
    }
}

/// Full grid and equipment state at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major grid contents
    pub slots: Vec<SlotSnapshot>,
    /// Occupied equipment slots only
    pub equipment: BTreeMap<EquipmentSlot, SlotSnapshot>,
}

impl InventorySnapshot {
    /// Slot at a grid position
    pub fn slot(&self, pos: GridPos) -> Option<&SlotSnapshot> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        self.slots.get(pos.y * self.width + pos.x)
    }

    /// Total units of an item across the grid
    pub fn count_item(&self, id: &ItemId) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.item.as_ref() == Some(id))
            .map(|s| s.count)
            .sum()
    }
}
