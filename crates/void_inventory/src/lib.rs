//! Void Inventory - Grid Inventory and Equipment
//!
//! This crate provides a fixed-size grid of stackable item slots with a set
//! of equipment slots keyed by body location.
//!
//! # Features
//!
//! - Row-major stack filling on add, with per-item max stack sizes
//! - Move with merge or swap
//! - Use behaviors resolved from catalog data (consume, equip toggle, observe)
//! - Equip/unequip where equipped stacks stay mirrored in the grid
//! - Stable sort by type or name
//! - Synchronous change notifications via callbacks or channels
//!
//! # Example
//!
//! ```ignore
//! use void_inventory::prelude::*;
//!
//! let mut catalog = ItemCatalog::new();
//! let potion = catalog.register(
//!     ItemDefinition::new("health_potion", "Health Potion")
//!         .with_type(ItemType::Potion)
//!         .with_max_stack(5),
//! )?;
//!
//! let mut inventory = Inventory::new(5, 4)?;
//! let events = inventory.subscribe_channel();
//! inventory.try_add_item(&potion, 7)?;
//! inventory.use_item(GridPos::new(0, 0))?;
//! ```

pub mod catalog;
pub mod config;
pub mod equipment;
pub mod error;
pub mod events;
pub mod inventory;
pub mod item;
pub mod shared;
pub mod slot;
pub mod snapshot;

pub mod prelude {
    pub use crate::catalog::ItemCatalog;
    pub use crate::config::InventoryConfig;
    pub use crate::error::{InventoryError, Result};
    pub use crate::events::{InventoryEvent, SubscriberId};
    pub use crate::inventory::{Inventory, SortKey};
    pub use crate::item::{
        EquipmentSlot, ItemDefinition, ItemId, ItemRarity, ItemRef, ItemType, UseBehavior,
    };
    pub use crate::shared::SharedInventory;
    pub use crate::slot::{GridPos, SlotView};
    pub use crate::snapshot::{InventorySnapshot, SlotSnapshot};
}

pub use prelude::*;
