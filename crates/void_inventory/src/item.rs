//! Item catalog entries and their capabilities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identity of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new item ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Item type. Declaration order is the sort order used by type sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// Swords, bows, staves
    Weapon,
    /// Consumed one at a time on use
    Potion,
    /// Quest items
    QuestItem,
    /// Crafting and trade materials
    Resource,
    /// Armor pieces
    Armor,
    /// Rings, amulets
    Accessory,
    /// Custom type
    Custom(u32),
}

impl Default for ItemType {
    fn default() -> Self {
        Self::Resource
    }
}

/// Body or gear location an item can be equipped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Head,
    Chest,
    Hands,
    Legs,
    Feet,
    Weapon,
    Shield,
    Accessory,
}

impl EquipmentSlot {
    /// Every equipment slot, in declaration order
    pub const ALL: [EquipmentSlot; 8] = [
        Self::Head,
        Self::Chest,
        Self::Hands,
        Self::Legs,
        Self::Feet,
        Self::Weapon,
        Self::Shield,
        Self::Accessory,
    ];
}

/// Item rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Default for ItemRarity {
    fn default() -> Self {
        Self::Common
    }
}

/// What using an item does to inventory state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UseBehavior {
    /// One unit is consumed per use
    Consume,
    /// Use equips the stack, or unequips it if already equipped
    ToggleEquip,
    /// No state change; only the use notification fires
    Observe,
}

/// Immutable catalog entry describing an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier
    pub id: ItemId,
    /// Display name, also the name sort key
    pub name: String,
    /// Description
    pub description: String,
    /// Item type
    pub item_type: ItemType,
    /// Rarity
    pub rarity: ItemRarity,
    /// Maximum stack size (1 = not stackable)
    pub max_stack: u32,
    /// Equipment slot this item goes into, if any
    pub equip_slot: Option<EquipmentSlot>,
    /// Explicit use behavior; derived from the item type when absent
    pub use_behavior: Option<UseBehavior>,
}

impl ItemDefinition {
    /// Create a new item definition
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            item_type: ItemType::default(),
            rarity: ItemRarity::default(),
            max_stack: 1,
            equip_slot: None,
            use_behavior: None,
        }
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set item type
    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    /// Set rarity
    pub fn with_rarity(mut self, rarity: ItemRarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set max stack size
    pub fn with_max_stack(mut self, max: u32) -> Self {
        self.max_stack = max.max(1);
        self
    }

    /// Make equippable into the given slot
    pub fn with_equip_slot(mut self, slot: EquipmentSlot) -> Self {
        self.equip_slot = Some(slot);
        self
    }

    /// Override the use behavior derived from the item type
    pub fn with_use_behavior(mut self, behavior: UseBehavior) -> Self {
        self.use_behavior = Some(behavior);
        self
    }

    /// Freeze into a shareable catalog reference
    pub fn into_ref(self) -> ItemRef {
        Arc::new(self)
    }

    /// Check if stackable
    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    /// Check if the item can be equipped
    pub fn is_equippable(&self) -> bool {
        self.equip_slot.is_some()
    }

    /// Resolve what a use does.
    ///
    /// Potions consume, equip-capable weapons, armor and accessories toggle
    /// equipment, and everything else is observe-only. An explicit
    /// `use_behavior` wins, except that `ToggleEquip` on an item without an
    /// equipment slot degrades to `Observe`.
    pub fn use_behavior(&self) -> UseBehavior {
        let behavior = self.use_behavior.unwrap_or(match self.item_type {
            ItemType::Potion => UseBehavior::Consume,
            ItemType::Weapon | ItemType::Armor | ItemType::Accessory => UseBehavior::ToggleEquip,
            _ => UseBehavior::Observe,
        });

        match behavior {
            UseBehavior::ToggleEquip if !self.is_equippable() => UseBehavior::Observe,
            other => other,
        }
    }

    /// Check if two definitions name the same catalog entry
    pub fn same_item(&self, other: &ItemDefinition) -> bool {
        self.id == other.id
    }
}

impl Default for ItemDefinition {
    fn default() -> Self {
        Self::new("unknown", "Unknown Item")
    }
}

/// Shared reference to a catalog entry. Slots hold these, never the data.
pub type ItemRef = Arc<ItemDefinition>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_definition() {
        let item = ItemDefinition::new("health_potion", "Health Potion")
            .with_type(ItemType::Potion)
            .with_rarity(ItemRarity::Common)
            .with_max_stack(10);

        assert_eq!(item.id.as_str(), "health_potion");
        assert!(item.is_stackable());
        assert!(!item.is_equippable());
        assert_eq!(item.use_behavior(), UseBehavior::Consume);
    }

    #[test]
    fn test_max_stack_clamped() {
        let item = ItemDefinition::new("pebble", "Pebble").with_max_stack(0);
        assert_eq!(item.max_stack, 1);
        assert!(!item.is_stackable());
    }

    #[test]
    fn test_use_behavior_resolution() {
        let sword = ItemDefinition::new("sword", "Sword")
            .with_type(ItemType::Weapon)
            .with_equip_slot(EquipmentSlot::Weapon);
        assert_eq!(sword.use_behavior(), UseBehavior::ToggleEquip);

        // Weapon without a slot can't be equipped
        let club = ItemDefinition::new("club", "Club").with_type(ItemType::Weapon);
        assert_eq!(club.use_behavior(), UseBehavior::Observe);

        let ore = ItemDefinition::new("ore", "Iron Ore").with_type(ItemType::Resource);
        assert_eq!(ore.use_behavior(), UseBehavior::Observe);

        let scroll = ItemDefinition::new("scroll", "Scroll")
            .with_type(ItemType::Custom(7))
            .with_use_behavior(UseBehavior::Consume);
        assert_eq!(scroll.use_behavior(), UseBehavior::Consume);
    }

    #[test]
    fn test_item_type_order() {
        let mut types = vec![
            ItemType::Accessory,
            ItemType::Custom(1),
            ItemType::Potion,
            ItemType::Weapon,
            ItemType::Armor,
            ItemType::QuestItem,
            ItemType::Resource,
        ];
        types.sort();
        assert_eq!(
            types,
            vec![
                ItemType::Weapon,
                ItemType::Potion,
                ItemType::QuestItem,
                ItemType::Resource,
                ItemType::Armor,
                ItemType::Accessory,
                ItemType::Custom(1),
            ]
        );
    }
}
