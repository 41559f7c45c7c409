//! Slots, grid positions and the fixed-size slot grid

use crate::item::{ItemId, ItemRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A storage cell holding zero or one item stack
#[derive(Debug, Clone, Default)]
pub struct Slot {
    item: Option<ItemRef>,
    count: u32,
}

impl Slot {
    /// Referenced catalog entry, if any
    pub fn item(&self) -> Option<&ItemRef> {
        self.item.as_ref()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// Check if this slot holds the given catalog entry
    pub fn holds(&self, id: &ItemId) -> bool {
        self.item.as_ref().map(|i| &i.id == id).unwrap_or(false)
    }

    /// Free room left in this stack (0 for empty slots)
    pub fn space(&self) -> u32 {
        self.item
            .as_ref()
            .map(|i| i.max_stack.saturating_sub(self.count))
            .unwrap_or(0)
    }

    /// Replace the contents. A zero count leaves the slot empty.
    pub fn assign(&mut self, item: ItemRef, count: u32) {
        if count == 0 {
            self.clear();
        } else {
            self.item = Some(item);
            self.count = count;
        }
    }

    /// Set the count of an occupied slot, clearing it when it reaches zero
    pub fn set_count(&mut self, count: u32) {
        if count == 0 {
            self.clear();
        } else if self.item.is_some() {
            self.count = count;
        }
    }

    pub fn clear(&mut self) {
        self.item = None;
        self.count = 0;
    }
}

/// Read-only view of a slot handed to callers
#[derive(Debug, Clone, Default)]
pub struct SlotView {
    pub item: Option<ItemRef>,
    pub count: u32,
    /// True while the stack is bound to an equipment slot
    pub equipped: bool,
}

impl SlotView {
    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    pub fn item_id(&self) -> Option<&ItemId> {
        self.item.as_ref().map(|i| &i.id)
    }
}

/// Fixed `width x height` grid of slots, stored row-major
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    slots: Vec<Slot>,
}

impl Grid {
    /// Create an empty grid. Callers validate the dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            slots: vec![Slot::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        self.contains(pos).then(|| pos.y * self.width + pos.x)
    }

    pub fn get(&self, pos: GridPos) -> Option<&Slot> {
        self.index(pos).map(|i| &self.slots[i])
    }

    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut Slot> {
        self.index(pos).map(move |i| &mut self.slots[i])
    }

    /// All positions in row-major order: `y` outer, `x` inner
    pub fn positions(&self) -> impl Iterator<Item = GridPos> {
        let width = self.width;
        (0..self.slots.len()).map(move |i| GridPos::new(i % width, i / width))
    }

    /// Slots paired with their positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Slot)> {
        let width = self.width;
        self.slots
            .iter()
            .enumerate()
            .map(move |(i, slot)| (GridPos::new(i % width, i / width), slot))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (GridPos, &mut Slot)> {
        let width = self.width;
        self.slots
            .iter_mut()
            .enumerate()
            .map(move |(i, slot)| (GridPos::new(i % width, i / width), slot))
    }

    /// First empty slot in row-major order
    pub fn first_empty(&self) -> Option<GridPos> {
        self.iter().find(|(_, s)| s.is_empty()).map(|(pos, _)| pos)
    }

    /// Exchange the full contents of two slots
    pub fn swap(&mut self, a: GridPos, b: GridPos) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(a), Some(b)) => {
                self.slots.swap(a, b);
                true
            }
            _ => false,
        }
    }

    pub fn clear_all(&mut self) {
        self.slots.iter_mut().for_each(Slot::clear);
    }

    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemDefinition;

    #[test]
    fn test_slot_assign_and_clear() {
        let gem = ItemDefinition::new("gem", "Gem").with_max_stack(10).into_ref();
        let mut slot = Slot::default();
        assert!(slot.is_empty());

        slot.assign(gem.clone(), 4);
        assert!(slot.holds(&gem.id));
        assert_eq!(slot.count(), 4);
        assert_eq!(slot.space(), 6);

        slot.set_count(0);
        assert!(slot.is_empty());
        assert_eq!(slot.count(), 0);
    }

    #[test]
    fn test_grid_row_major_positions() {
        let grid = Grid::new(3, 2);
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(positions[0], GridPos::new(0, 0));
        assert_eq!(positions[2], GridPos::new(2, 0));
        assert_eq!(positions[3], GridPos::new(0, 1));
        assert_eq!(positions.len(), 6);
    }

    #[test]
    fn test_grid_bounds() {
        let mut grid = Grid::new(2, 2);
        assert!(grid.get(GridPos::new(1, 1)).is_some());
        assert!(grid.get(GridPos::new(2, 0)).is_none());
        assert!(grid.get_mut(GridPos::new(0, 2)).is_none());
        assert!(!grid.swap(GridPos::new(0, 0), GridPos::new(5, 5)));
    }

    #[test]
    fn test_first_empty_and_swap() {
        let gem = ItemDefinition::new("gem", "Gem").into_ref();
        let mut grid = Grid::new(2, 2);
        grid.get_mut(GridPos::new(0, 0)).unwrap().assign(gem, 1);

        assert_eq!(grid.first_empty(), Some(GridPos::new(1, 0)));
        assert!(grid.swap(GridPos::new(0, 0), GridPos::new(1, 1)));
        assert!(grid.get(GridPos::new(0, 0)).unwrap().is_empty());
        assert_eq!(grid.get(GridPos::new(1, 1)).unwrap().count(), 1);
        assert_eq!(grid.used_slots(), 1);
    }
}
