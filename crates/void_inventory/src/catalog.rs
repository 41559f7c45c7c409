//! In-memory item catalog

use crate::error::{InventoryError, Result};
use crate::item::{ItemDefinition, ItemId, ItemRef};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of item definitions, keyed by ID
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<ItemId, ItemRef>,
}

impl ItemCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition and get back the shared reference slots will hold
    pub fn register(&mut self, def: ItemDefinition) -> Result<ItemRef> {
        if self.items.contains_key(&def.id) {
            return Err(InventoryError::InvalidArgument(format!(
                "item '{}' is already registered",
                def.id
            )));
        }
        if def.max_stack == 0 {
            return Err(InventoryError::InvalidArgument(format!(
                "item '{}' has a max stack of zero",
                def.id
            )));
        }

        let item = Arc::new(def);
        log::debug!("Registered item '{}' ({})", item.id, item.name);
        self.items.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    /// Look up an item by ID
    pub fn get(&self, id: &ItemId) -> Option<ItemRef> {
        self.items.get(id).cloned()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all registered items (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &ItemRef> {
        self.items.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemType;

    #[test]
    fn test_register_and_get() {
        let mut catalog = ItemCatalog::new();
        let potion = catalog
            .register(ItemDefinition::new("potion", "Potion").with_type(ItemType::Potion))
            .unwrap();

        let found = catalog.get(&ItemId::from("potion")).unwrap();
        assert!(Arc::ptr_eq(&potion, &found));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(&ItemId::from("missing")).is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = ItemCatalog::new();
        catalog.register(ItemDefinition::new("gem", "Gem")).unwrap();

        let err = catalog.register(ItemDefinition::new("gem", "Other Gem")).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidArgument(_)));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_zero_max_stack_rejected() {
        let mut catalog = ItemCatalog::new();
        let mut def = ItemDefinition::new("dust", "Dust");
        def.max_stack = 0;

        assert!(catalog.register(def).is_err());
        assert!(catalog.is_empty());
    }
}
