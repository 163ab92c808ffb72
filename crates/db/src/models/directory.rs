//! Location, device, and manufacturer directory entities.
//!
//! Reference data supplied by the external directory service; the
//! tracker only ever reads it (and test fixtures populate it).

use serde::Serialize;

use stockroom_core::types::DbId;

/// A physical location pools and devices belong to.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
}

/// A piece of equipment that draws consumables from pools at its
/// location.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    pub id: DbId,
    pub name: String,
    pub location: DbId,
}

/// A hardware manufacturer referenced by catalog items.
#[derive(Debug, Clone, Serialize)]
pub struct Manufacturer {
    pub id: DbId,
    pub name: String,
}
