//! Inventory engine
//!
//! Owns the slot grid and the equipment bindings. Every mutation goes
//! through a method here and is reported to subscribers before the method
//! returns.

use crate::config::InventoryConfig;
use crate::equipment::EquipmentMap;
use crate::error::{InventoryError, Result};
use crate::events::{EventDispatcher, InventoryEvent, SubscriberId};
use crate::item::{EquipmentSlot, ItemDefinition, ItemId, ItemRef, UseBehavior};
use crate::slot::{Grid, GridPos, SlotView};
use crate::snapshot::{InventorySnapshot, SlotSnapshot};
use crossbeam_channel::Receiver;
use std::cmp::Ordering;

/// Ordering used by [`Inventory::sort`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Item type, then name
    Type,
    /// Name only
    Name,
}

impl SortKey {
    fn compare(&self, a: &ItemDefinition, b: &ItemDefinition) -> Ordering {
        match self {
            Self::Type => a
                .item_type
                .cmp(&b.item_type)
                .then_with(|| a.name.cmp(&b.name)),
            Self::Name => a.name.cmp(&b.name),
        }
    }
}

/// Grid inventory with equipment slots
#[derive(Debug)]
pub struct Inventory {
    grid: Grid,
    equipment: EquipmentMap,
    events: EventDispatcher,
}

impl Inventory {
    /// Create an empty `width x height` inventory
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::from_config(&InventoryConfig::new(width, height))
    }

    /// Create an empty inventory from a config
    pub fn from_config(config: &InventoryConfig) -> Result<Self> {
        config.validate()?;
        log::debug!("Created {}x{} inventory", config.width, config.height);
        Ok(Self::with_grid(Grid::new(config.width, config.height)))
    }

    fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            equipment: EquipmentMap::new(),
            events: EventDispatcher::new(),
        }
    }

    /// Register a callback for inventory events
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: Fn(&InventoryEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(callback)
    }

    /// Receive inventory events over a channel
    pub fn subscribe_channel(&mut self) -> Receiver<InventoryEvent> {
        self.events.subscribe_channel()
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Get inventory capacity
    pub fn capacity(&self) -> usize {
        self.grid.capacity()
    }

    /// Get number of used slots
    pub fn used_slots(&self) -> usize {
        self.grid.used_slots()
    }

    /// Get number of free slots
    pub fn free_slots(&self) -> usize {
        self.capacity() - self.used_slots()
    }

    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    pub fn is_empty(&self) -> bool {
        self.used_slots() == 0
    }

    /// View of a grid slot. `None` when out of bounds.
    pub fn slot(&self, pos: GridPos) -> Option<SlotView> {
        let slot = self.grid.get(pos)?;
        Some(SlotView {
            item: slot.item().cloned(),
            count: slot.count(),
            equipped: self.equipment.is_bound(pos),
        })
    }

    /// View of the stack equipped in an equipment slot
    pub fn equipped(&self, slot: EquipmentSlot) -> Option<SlotView> {
        self.equipment_position(slot).and_then(|pos| self.slot(pos))
    }

    /// Grid position mirroring the stack equipped in `slot`
    pub fn equipment_position(&self, slot: EquipmentSlot) -> Option<GridPos> {
        self.equipment.position_of(slot)
    }

    /// Equipment slot the stack at `pos` is equipped to
    pub fn equipment_slot_at(&self, pos: GridPos) -> Option<EquipmentSlot> {
        self.equipment.bound_at(pos)
    }

    /// All occupied equipment slots with their stacks
    pub fn equipment(&self) -> impl Iterator<Item = (EquipmentSlot, SlotView)> + '_ {
        self.equipment
            .iter()
            .filter_map(move |(slot, pos)| self.slot(pos).map(|view| (slot, view)))
    }

    /// Count total quantity of an item in the grid.
    ///
    /// Equipped stacks are counted once: they live in the grid.
    pub fn count_item(&self, id: &ItemId) -> u32 {
        self.grid
            .iter()
            .filter(|(_, s)| s.holds(id))
            .map(|(_, s)| s.count())
            .sum()
    }

    /// Find the first slot (row-major) holding an item
    pub fn find_item(&self, id: &ItemId) -> Option<GridPos> {
        self.grid
            .iter()
            .find(|(_, s)| s.holds(id))
            .map(|(pos, _)| pos)
    }

    /// Capture the whole grid and equipment state
    pub fn snapshot(&self) -> InventorySnapshot {
        let slots = self
            .grid
            .positions()
            .filter_map(|pos| self.slot(pos))
            .map(|view| SlotSnapshot::from(&view))
            .collect();

        let equipment = self
            .equipment()
            .map(|(slot, view)| (slot, SlotSnapshot::from(&view)))
            .collect();

        InventorySnapshot {
            width: self.width(),
            height: self.height(),
            slots,
            equipment,
        }
    }

    /// Check if `quantity` units of `item` would fit without placing them
    pub fn can_add(&self, item: &ItemRef, quantity: u32) -> bool {
        if item.max_stack == 0 {
            return false;
        }

        let max_stack = item.max_stack;
        let mut remaining = quantity;

        if item.is_stackable() {
            for (_, slot) in self.grid.iter() {
                if slot.holds(&item.id) {
                    remaining = remaining.saturating_sub(slot.space());
                }
            }
        }

        if remaining == 0 {
            return true;
        }

        let stacks_needed = remaining.div_ceil(max_stack) as usize;
        self.free_slots() >= stacks_needed
    }

    /// Place `quantity` units of `item` into the grid.
    ///
    /// Existing stacks of the item are topped up first, then empty slots are
    /// filled, both in row-major order. Returns `Ok(false)` when not all
    /// units fit; units already placed stay placed.
    pub fn try_add_item(&mut self, item: &ItemRef, quantity: u32) -> Result<bool> {
        if quantity == 0 {
            return Err(InventoryError::InvalidArgument(format!(
                "cannot add zero units of '{}'",
                item.id
            )));
        }
        if item.max_stack == 0 {
            return Err(InventoryError::InvalidArgument(format!(
                "item '{}' has a max stack of zero",
                item.id
            )));
        }

        let mut remaining = quantity;
        if item.is_stackable() {
            remaining = self.fill_existing_stacks(item, remaining);
        }
        if remaining > 0 {
            remaining = self.fill_empty_slots(item, remaining);
        }

        let placed = quantity - remaining;
        if placed > 0 {
            self.events.emit(InventoryEvent::Changed);
        }

        if remaining > 0 {
            log::warn!(
                "Inventory full: placed {} of {} '{}', {} left over",
                placed,
                quantity,
                item.id,
                remaining
            );
            return Ok(false);
        }

        log::debug!("Added {} x '{}'", quantity, item.id);
        Ok(true)
    }

    fn fill_existing_stacks(&mut self, item: &ItemRef, mut remaining: u32) -> u32 {
        for (_, slot) in self.grid.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.holds(&item.id) {
                let amount = remaining.min(slot.space());
                if amount > 0 {
                    slot.set_count(slot.count() + amount);
                    remaining -= amount;
                }
            }
        }
        remaining
    }

    fn fill_empty_slots(&mut self, item: &ItemRef, mut remaining: u32) -> u32 {
        for (_, slot) in self.grid.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_empty() {
                let amount = remaining.min(item.max_stack);
                slot.assign(item.clone(), amount);
                remaining -= amount;
            }
        }
        remaining
    }

    /// Move or merge the stack at `from` onto `to`.
    ///
    /// Same stackable item on both sides merges, keeping any overflow at
    /// `from`. Anything else swaps the two slots, equip bindings included.
    /// Returns false (and does nothing) for out-of-range positions, `from ==
    /// to`, or an empty source.
    pub fn move_item(&mut self, from: GridPos, to: GridPos) -> bool {
        if !self.grid.contains(from) || !self.grid.contains(to) {
            log::trace!("Ignoring move {} -> {}: out of bounds", from, to);
            return false;
        }
        if from == to || self.grid.get(from).map_or(true, |s| s.is_empty()) {
            return false;
        }

        if !self.try_merge(from, to) {
            self.swap_slots(from, to);
        }

        self.events.emit(InventoryEvent::Changed);
        self.events.emit(InventoryEvent::ItemMoved { from, to });
        true
    }

    fn try_merge(&mut self, from: GridPos, to: GridPos) -> bool {
        // Equipped stacks move whole so their binding can follow them
        if self.equipment.is_bound(from) || self.equipment.is_bound(to) {
            return false;
        }

        let (to_count, from_count) = {
            let (Some(source), Some(target)) = (self.grid.get(from), self.grid.get(to)) else {
                return false;
            };
            let (Some(source_item), Some(target_item)) = (source.item(), target.item()) else {
                return false;
            };
            if !source_item.same_item(target_item) || !source_item.is_stackable() {
                return false;
            }

            let total = u64::from(source.count()) + u64::from(target.count());
            let max = u64::from(target_item.max_stack);
            let merged = total.min(max);
            (merged as u32, (total - merged) as u32)
        };

        if let Some(target) = self.grid.get_mut(to) {
            target.set_count(to_count);
        }
        if let Some(source) = self.grid.get_mut(from) {
            source.set_count(from_count);
        }
        true
    }

    fn swap_slots(&mut self, a: GridPos, b: GridPos) {
        if self.grid.swap(a, b) {
            self.equipment.swap_positions(a, b);
        }
    }

    /// Use the item at `pos`.
    ///
    /// `ItemUsed` fires for every non-empty slot; what happens next depends
    /// on the item's [`UseBehavior`]. Fails only when unequipping finds no
    /// free slot.
    pub fn use_item(&mut self, pos: GridPos) -> Result<()> {
        let Some(item) = self.item_at(pos) else {
            log::trace!("Ignoring use at {}: no item", pos);
            return Ok(());
        };

        self.events.emit(InventoryEvent::ItemUsed(item.clone()));

        match item.use_behavior() {
            UseBehavior::Consume => {
                self.consume_one(pos);
                Ok(())
            }
            UseBehavior::ToggleEquip => self.toggle_equipment(pos),
            UseBehavior::Observe => Ok(()),
        }
    }

    fn item_at(&self, pos: GridPos) -> Option<ItemRef> {
        self.grid.get(pos).and_then(|s| s.item()).cloned()
    }

    fn consume_one(&mut self, pos: GridPos) {
        if let Some(slot) = self.grid.get_mut(pos) {
            slot.set_count(slot.count().saturating_sub(1));
            if slot.is_empty() {
                self.release_binding(pos);
            }
        }
        self.events.emit(InventoryEvent::Changed);
    }

    fn release_binding(&mut self, pos: GridPos) {
        if let Some(kind) = self.equipment.bound_at(pos) {
            self.equipment.unbind(kind);
        }
    }

    fn toggle_equipment(&mut self, pos: GridPos) -> Result<()> {
        if self.equipment.is_bound(pos) {
            self.unequip(pos)
        } else {
            self.equip(pos);
            Ok(())
        }
    }

    /// Equip the stack at `pos`.
    ///
    /// When its equipment slot is already taken, the two grid slots trade
    /// places: the newly equipped stack moves into the grid slot the old one
    /// occupied, and the old stack comes back unequipped where the new one
    /// was.
    fn equip(&mut self, pos: GridPos) {
        let Some(item) = self.item_at(pos) else {
            return;
        };
        let Some(kind) = item.equip_slot else {
            return;
        };

        match self.equipment.position_of(kind) {
            Some(current) if current != pos => {
                self.grid.swap(pos, current);
                log::debug!("Equipped '{}' to {:?}, replacing stack at {}", item.id, kind, current);
            }
            _ => {
                self.equipment.bind(kind, pos);
                log::debug!("Equipped '{}' to {:?}", item.id, kind);
            }
        }

        self.events.emit(InventoryEvent::ItemEquipped(item));
        self.events.emit(InventoryEvent::Changed);
    }

    /// Unequip the stack at `pos`, moving it to the first empty grid slot.
    /// With no empty slot the stack stays equipped.
    fn unequip(&mut self, pos: GridPos) -> Result<()> {
        let Some(kind) = self.equipment.bound_at(pos) else {
            return Ok(());
        };
        let Some(item) = self.item_at(pos) else {
            return Ok(());
        };

        let Some(target) = self.grid.first_empty() else {
            log::warn!("Cannot unequip '{}' from {:?}: inventory full", item.id, kind);
            return Err(InventoryError::CapacityExceeded(item.id.clone()));
        };

        self.grid.swap(pos, target);
        self.equipment.unbind(kind);
        log::debug!("Unequipped '{}' from {:?} to {}", item.id, kind, target);

        self.events.emit(InventoryEvent::ItemUnequipped(item));
        self.events.emit(InventoryEvent::Changed);
        Ok(())
    }

    /// Remove `amount` units from the stack at `pos`.
    ///
    /// Equipped stacks can't be partially consumed: removing from one
    /// unequips it instead.
    pub fn remove_item(&mut self, pos: GridPos, amount: u32) -> Result<()> {
        if amount == 0 {
            return Err(InventoryError::InvalidArgument(
                "cannot remove zero units".to_string(),
            ));
        }
        if self.item_at(pos).is_none() {
            log::trace!("Ignoring remove at {}: no item", pos);
            return Ok(());
        }

        if self.equipment.is_bound(pos) {
            return self.unequip(pos);
        }

        if let Some(slot) = self.grid.get_mut(pos) {
            slot.set_count(slot.count().saturating_sub(amount));
        }
        self.events.emit(InventoryEvent::Changed);
        Ok(())
    }

    /// Sort by item type, then name
    pub fn sort_by_type(&mut self) {
        self.sort(SortKey::Type);
    }

    /// Sort by name
    pub fn sort_by_name(&mut self) {
        self.sort(SortKey::Name);
    }

    /// Stable reorder of all stacks into row-major order from (0, 0).
    ///
    /// Stacks are never merged or split. Equipped stacks stay equipped and
    /// `ItemEquipped` is re-sent for each of them as a refresh.
    pub fn sort(&mut self, key: SortKey) {
        let mut entries: Vec<(ItemRef, u32, Option<EquipmentSlot>)> = self
            .grid
            .iter()
            .filter_map(|(pos, slot)| {
                slot.item()
                    .map(|item| (item.clone(), slot.count(), self.equipment.bound_at(pos)))
            })
            .collect();

        entries.sort_by(|a, b| key.compare(&a.0, &b.0));

        self.grid.clear_all();
        self.equipment.clear();

        let positions: Vec<GridPos> = self.grid.positions().collect();
        let mut refreshed = Vec::new();
        for (pos, (item, count, kind)) in positions.into_iter().zip(entries) {
            if let Some(slot) = self.grid.get_mut(pos) {
                slot.assign(item.clone(), count);
            }
            if let Some(kind) = kind {
                self.equipment.bind(kind, pos);
                refreshed.push(item);
            }
        }

        log::debug!("Sorted inventory by {:?}", key);

        for item in refreshed {
            self.events.emit(InventoryEvent::ItemEquipped(item));
        }
        self.events.emit(InventoryEvent::Changed);
    }

    /// Empty every grid and equipment slot
    pub fn clear(&mut self) {
        self.grid.clear_all();
        self.equipment.clear();
        self.events.emit(InventoryEvent::Changed);
    }

    /// Ask subscribers to re-read everything without changing anything
    pub fn refresh(&mut self) {
        self.events.emit(InventoryEvent::Changed);
    }
}

impl Default for Inventory {
    fn default() -> Self {
        let config = InventoryConfig::default();
        Self::with_grid(Grid::new(config.width, config.height))
    }
}
