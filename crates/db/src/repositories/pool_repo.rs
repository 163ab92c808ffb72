//! Repository for consumable pools.

use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;

use crate::models::pool::{ConsumablePool, CreateConsumablePool, UpdateConsumablePool};
use crate::store::Store;

/// Provides CRUD operations for consumable pools.
pub struct PoolRepo;

impl PoolRepo {
    /// Insert a new pool.
    ///
    /// Enforces: the referenced consumable and location exist, and
    /// (consumable, location, name) is unique.
    pub async fn insert(
        store: &Store,
        create: CreateConsumablePool,
    ) -> Result<ConsumablePool, CoreError> {
        let mut tables = store.tables.write().await;
        if !tables.consumables.contains_key(&create.consumable) {
            return Err(CoreError::NotFound {
                entity: "Consumable",
                id: create.consumable,
            });
        }
        if !tables.locations.contains_key(&create.location) {
            return Err(CoreError::NotFound {
                entity: "Location",
                id: create.location,
            });
        }
        if tables.pools.values().any(|row| {
            row.consumable == create.consumable
                && row.location == create.location
                && row.name == create.name
        }) {
            return Err(CoreError::DuplicateKey(format!(
                "pool {} already exists for this consumable and location",
                create.name
            )));
        }
        let now = Store::now();
        let row = ConsumablePool {
            id: store.allocate_id(),
            name: create.name,
            consumable: create.consumable,
            location: create.location,
            quantity: create.quantity,
            created_at: now,
            updated_at: now,
        };
        tables.pools.insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get(store: &Store, id: DbId) -> Result<ConsumablePool, CoreError> {
        store
            .tables
            .read()
            .await
            .pools
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "ConsumablePool",
                id,
            })
    }

    /// List pools at a location, sorted by name.
    pub async fn list_at_location(store: &Store, location: DbId) -> Vec<ConsumablePool> {
        let tables = store.tables.read().await;
        let mut rows: Vec<ConsumablePool> = tables
            .pools
            .values()
            .filter(|row| row.location == location)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    /// Apply an update.
    ///
    /// `consumable` is a set-once relation: an update naming a
    /// different consumable than the stored one fails with
    /// `ImmutableField` (pre-write comparison against the stored
    /// row).
    pub async fn update(
        store: &Store,
        id: DbId,
        update: UpdateConsumablePool,
    ) -> Result<ConsumablePool, CoreError> {
        let mut tables = store.tables.write().await;
        let current = tables
            .pools
            .get(&id)
            .ok_or(CoreError::NotFound {
                entity: "ConsumablePool",
                id,
            })?
            .clone();

        if let Some(consumable) = update.consumable {
            if consumable != current.consumable {
                return Err(CoreError::ImmutableField {
                    field: "consumable",
                });
            }
        }

        let name = update.name.unwrap_or(current.name);
        let location = update.location.unwrap_or(current.location);
        let quantity = update.quantity.unwrap_or(current.quantity);

        if !tables.locations.contains_key(&location) {
            return Err(CoreError::NotFound {
                entity: "Location",
                id: location,
            });
        }
        if tables.pools.values().any(|row| {
            row.id != id
                && row.consumable == current.consumable
                && row.location == location
                && row.name == name
        }) {
            return Err(CoreError::DuplicateKey(format!(
                "pool {name} already exists for this consumable and location"
            )));
        }

        let row = tables.pools.get_mut(&id).ok_or(CoreError::NotFound {
            entity: "ConsumablePool",
            id,
        })?;
        row.name = name;
        row.location = location;
        row.quantity = quantity;
        row.updated_at = Store::now();
        Ok(row.clone())
    }

    /// Delete a pool. Blocked while any checkout record references it.
    pub async fn delete(store: &Store, id: DbId) -> Result<(), CoreError> {
        let mut tables = store.tables.write().await;
        let row = tables.pools.get(&id).ok_or(CoreError::NotFound {
            entity: "ConsumablePool",
            id,
        })?;
        let dependents = tables
            .checkouts
            .values()
            .filter(|checkout| checkout.consumable_pool == id)
            .count();
        if dependents > 0 {
            return Err(CoreError::ReferentialBlock {
                entity: "ConsumablePool",
                name: row.name.clone(),
                count: dependents,
                dependents: "checked-out consumables",
            });
        }
        tables.pools.remove(&id);
        Ok(())
    }
}
