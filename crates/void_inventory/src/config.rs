//! Inventory configuration

use crate::error::{InventoryError, Result};
use serde::{Deserialize, Serialize};

/// Construction parameters for an [`Inventory`](crate::inventory::Inventory)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Number of grid columns
    pub width: usize,
    /// Number of grid rows
    pub height: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { width: 5, height: 4 }
    }
}

impl InventoryConfig {
    /// Create a config with explicit dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Parse a config from JSON. Missing fields fall back to the defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the grid has at least one slot and its size fits in `usize`
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(InventoryError::Configuration(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(InventoryError::Configuration(format!(
                "grid of {}x{} slots is too large",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Total number of grid slots
    pub fn capacity(&self) -> usize {
        self.width * self.height
    }
}
