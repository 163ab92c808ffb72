//! Consumable entity model and DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use stockroom_core::types::{DbId, Timestamp};

/// A concrete catalog item (manufacturer + product id) belonging to
/// exactly one consumable type.
#[derive(Debug, Clone, Serialize)]
pub struct Consumable {
    pub id: DbId,
    /// Unique across all consumables.
    pub name: String,
    /// Set once at creation; any later change is rejected.
    pub consumable_type: DbId,
    pub manufacturer: Option<DbId>,
    pub product_id: String,
    /// Free-form attribute data; only meaningful when the type has a
    /// schema, and validated against it on every write.
    pub data: Option<Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Consumable {
    /// Flat export projection. Field order and count are part of the
    /// contract other tooling depends on.
    pub fn to_row(&self) -> (String, DbId, Option<DbId>, String, Option<Value>) {
        (
            self.name.clone(),
            self.consumable_type,
            self.manufacturer,
            self.product_id.clone(),
            self.data.clone(),
        )
    }
}

impl std::fmt::Display for Consumable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// DTO for creating a consumable.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConsumable {
    pub name: String,
    pub consumable_type: DbId,
    pub manufacturer: Option<DbId>,
    pub product_id: String,
    pub data: Option<Value>,
}

/// DTO for updating a consumable.
///
/// `consumable_type` is present so a caller can attempt the change,
/// but any value differing from the stored one fails with
/// `ImmutableField`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateConsumable {
    pub name: Option<String>,
    pub consumable_type: Option<DbId>,
    pub manufacturer: Option<DbId>,
    pub product_id: Option<String>,
    pub data: Option<Value>,
}
