//! Consumable type entity model and DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use stockroom_core::types::{DbId, Timestamp};

/// A named category of stock-keeping item, optionally carrying an
/// attribute schema that constrains its consumables' data documents.
#[derive(Debug, Clone, Serialize)]
pub struct ConsumableType {
    pub id: DbId,
    /// Unique across all types.
    pub name: String,
    /// Raw schema document; validated at write time against the
    /// closed construct set in `stockroom_core::schema`.
    pub schema: Option<Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ConsumableType {
    /// Flat export projection. Field order and count are part of the
    /// contract other tooling depends on.
    pub fn to_row(&self) -> (String, Option<Value>) {
        (self.name.clone(), self.schema.clone())
    }
}

impl std::fmt::Display for ConsumableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// DTO for creating a consumable type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConsumableType {
    pub name: String,
    pub schema: Option<Value>,
}

/// DTO for updating a consumable type.
///
/// Changing the schema does not retroactively re-validate existing
/// consumables of the type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateConsumableType {
    pub name: Option<String>,
    pub schema: Option<Value>,
}
