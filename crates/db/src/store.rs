//! In-memory object store.
//!
//! Stands in for the external persistence collaborator: assigns
//! opaque identifiers, stamps created/last-modified timestamps, and
//! holds one table per entity behind an async `RwLock`. Constraint
//! enforcement (uniqueness, protect-on-delete) lives in the
//! repository layer, which is the only code that touches the tables.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use stockroom_core::types::{DbId, Timestamp};

use crate::models::checkout::CheckedOutConsumable;
use crate::models::consumable::Consumable;
use crate::models::consumable_type::ConsumableType;
use crate::models::directory::{Device, Location, Manufacturer};
use crate::models::pool::ConsumablePool;

/// One table per entity, keyed by id.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub consumable_types: HashMap<DbId, ConsumableType>,
    pub consumables: HashMap<DbId, Consumable>,
    pub pools: HashMap<DbId, ConsumablePool>,
    pub checkouts: HashMap<DbId, CheckedOutConsumable>,
    pub locations: HashMap<DbId, Location>,
    pub devices: HashMap<DbId, Device>,
    pub manufacturers: HashMap<DbId, Manufacturer>,
}

/// The object store handle shared by repositories and services.
#[derive(Debug)]
pub struct Store {
    next_id: AtomicI64,
    pub(crate) tables: RwLock<Tables>,
}

impl Store {
    pub fn new() -> Self {
        Store {
            next_id: AtomicI64::new(1),
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Allocate the next opaque identifier.
    pub(crate) fn allocate_id(&self) -> DbId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Timestamp source for created/last-modified stamps.
    pub(crate) fn now() -> Timestamp {
        chrono::Utc::now()
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}
