//! Inventory error types

use crate::item::ItemId;
use thiserror::Error;

/// Errors reported by inventory operations.
///
/// Out-of-range grid positions are not errors: every operation treats them
/// as a silent no-op.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Grid dimensions or other construction parameters are unusable
    #[error("Invalid inventory configuration: {0}")]
    Configuration(String),

    /// Caller misuse (zero quantity, duplicate catalog id, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No free grid slot was available for the item
    #[error("No free slot available for '{0}'")]
    CapacityExceeded(ItemId),

    /// Configuration text could not be parsed
    #[error("Could not parse inventory config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, InventoryError>;
