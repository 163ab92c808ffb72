//! Checked-out consumable entity model and DTOs.

use serde::{Deserialize, Serialize};

use stockroom_core::types::{DbId, Timestamp};

/// A binding allocation of some of a pool's quantity to a device.
///
/// At most one record exists per (device, pool) pair; re-checking-out
/// updates the existing record's quantity instead of creating a
/// duplicate.
#[derive(Debug, Clone, Serialize)]
pub struct CheckedOutConsumable {
    pub id: DbId,
    pub consumable_pool: DbId,
    pub device: DbId,
    /// Units currently drawn from the pool, always >= 1.
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CheckedOutConsumable {
    /// Flat export projection. Field order and count are part of the
    /// contract other tooling depends on.
    pub fn to_row(&self) -> (DbId, DbId, i32) {
        (self.consumable_pool, self.device, self.quantity)
    }
}

/// Display string rendered by external UI: `"{device} | {pool}"`,
/// substituting `"No Device"` / `"No Pool"` for unset references.
pub fn checkout_display(device_name: Option<&str>, pool_name: Option<&str>) -> String {
    format!(
        "{} | {}",
        device_name.unwrap_or("No Device"),
        pool_name.unwrap_or("No Pool")
    )
}

/// DTO for creating a checkout record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckedOutConsumable {
    pub consumable_pool: DbId,
    pub device: DbId,
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_substitutes_fallbacks() {
        assert_eq!(checkout_display(None, None), "No Device | No Pool");
        assert_eq!(
            checkout_display(Some("Device 1-1"), None),
            "Device 1-1 | No Pool"
        );
        assert_eq!(
            checkout_display(None, Some("Generic 1 Pool 1")),
            "No Device | Generic 1 Pool 1"
        );
        assert_eq!(
            checkout_display(Some("Device 1-2"), Some("Cable 1 Pool 1")),
            "Device 1-2 | Cable 1 Pool 1"
        );
    }
}
