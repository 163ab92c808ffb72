//! Consumable pool entity model and DTOs.

use serde::{Deserialize, Serialize};

use stockroom_core::types::{DbId, Timestamp};

use crate::models::directory::Location;

/// A declared quantity of one consumable stocked at one location.
///
/// Used and available quantities are never stored; they are derived
/// from the pool's checkout records on every read.
#[derive(Debug, Clone, Serialize)]
pub struct ConsumablePool {
    pub id: DbId,
    /// Unique within the same (consumable, location) pair.
    pub name: String,
    /// Set once at creation; any later change is rejected.
    pub consumable: DbId,
    pub location: DbId,
    /// Total stocked units, always >= 1.
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ConsumablePool {
    /// Display string rendered by external UI: `"{name} ({location})"`.
    pub fn display_name(&self, location: &Location) -> String {
        format!("{} ({})", self.name, location.name)
    }

    /// Flat export projection. Field order and count are part of the
    /// contract other tooling depends on.
    pub fn to_row(&self) -> (String, DbId, DbId, i32) {
        (self.name.clone(), self.consumable, self.location, self.quantity)
    }
}

/// DTO for creating a consumable pool.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConsumablePool {
    pub name: String,
    pub consumable: DbId,
    pub location: DbId,
    pub quantity: i32,
}

/// DTO for updating a consumable pool.
///
/// `consumable` is present so a caller can attempt the change, but
/// any value differing from the stored one fails with
/// `ImmutableField`. Quantity is never checked against the pool's
/// used quantity here; that invariant is enforced transitively
/// through checkout validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateConsumablePool {
    pub name: Option<String>,
    pub consumable: Option<DbId>,
    pub location: Option<DbId>,
    pub quantity: Option<i32>,
}
