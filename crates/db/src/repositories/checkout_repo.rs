//! Repository for checked-out consumables.
//!
//! These are plain record operations; the guarded write path that
//! enforces location and capacity rules (and serializes writes per
//! pool) is `stockroom-service`'s checkout ledger.

use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;

use crate::models::checkout::{CheckedOutConsumable, CreateCheckedOutConsumable};
use crate::store::Store;

/// Provides CRUD operations for checkout records.
pub struct CheckoutRepo;

impl CheckoutRepo {
    /// Insert a new checkout record.
    ///
    /// Enforces: the referenced pool and device exist, and at most
    /// one record exists per (device, pool) pair.
    pub async fn insert(
        store: &Store,
        create: CreateCheckedOutConsumable,
    ) -> Result<CheckedOutConsumable, CoreError> {
        let mut tables = store.tables.write().await;
        if !tables.pools.contains_key(&create.consumable_pool) {
            return Err(CoreError::NotFound {
                entity: "ConsumablePool",
                id: create.consumable_pool,
            });
        }
        if !tables.devices.contains_key(&create.device) {
            return Err(CoreError::NotFound {
                entity: "Device",
                id: create.device,
            });
        }
        if tables.checkouts.values().any(|row| {
            row.device == create.device && row.consumable_pool == create.consumable_pool
        }) {
            return Err(CoreError::DuplicateKey(
                "device already has a checkout for this pool".to_string(),
            ));
        }
        let now = Store::now();
        let row = CheckedOutConsumable {
            id: store.allocate_id(),
            consumable_pool: create.consumable_pool,
            device: create.device,
            quantity: create.quantity,
            created_at: now,
            updated_at: now,
        };
        tables.checkouts.insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get(store: &Store, id: DbId) -> Result<CheckedOutConsumable, CoreError> {
        store
            .tables
            .read()
            .await
            .checkouts
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "CheckedOutConsumable",
                id,
            })
    }

    /// The active record for a (device, pool) pair, if any.
    pub async fn find_for_device_and_pool(
        store: &Store,
        device: DbId,
        pool: DbId,
    ) -> Option<CheckedOutConsumable> {
        store
            .tables
            .read()
            .await
            .checkouts
            .values()
            .find(|row| row.device == device && row.consumable_pool == pool)
            .cloned()
    }

    /// All active records against a pool, sorted by device.
    pub async fn list_for_pool(store: &Store, pool: DbId) -> Vec<CheckedOutConsumable> {
        let tables = store.tables.read().await;
        let mut rows: Vec<CheckedOutConsumable> = tables
            .checkouts
            .values()
            .filter(|row| row.consumable_pool == pool)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.device);
        rows
    }

    /// Sum of quantities of all active records against a pool.
    ///
    /// Recomputed fresh from the underlying set on every call. Widened
    /// to i64: each record's quantity fits an i32, but the sum over a
    /// pool's records need not.
    pub async fn used_quantity(store: &Store, pool: DbId) -> i64 {
        Self::used_quantity_excluding(store, pool, None).await
    }

    /// Sum of quantities against a pool, excluding one record (the
    /// record being updated, during checkout re-validation).
    pub async fn used_quantity_excluding(
        store: &Store,
        pool: DbId,
        exclude: Option<DbId>,
    ) -> i64 {
        store
            .tables
            .read()
            .await
            .checkouts
            .values()
            .filter(|row| row.consumable_pool == pool && Some(row.id) != exclude)
            .map(|row| i64::from(row.quantity))
            .sum()
    }

    /// Set the quantity on an existing record.
    pub async fn update_quantity(
        store: &Store,
        id: DbId,
        quantity: i32,
    ) -> Result<CheckedOutConsumable, CoreError> {
        let mut tables = store.tables.write().await;
        let row = tables.checkouts.get_mut(&id).ok_or(CoreError::NotFound {
            entity: "CheckedOutConsumable",
            id,
        })?;
        row.quantity = quantity;
        row.updated_at = Store::now();
        Ok(row.clone())
    }

    /// Re-point an existing record at a different pool.
    ///
    /// Enforces the (device, pool) uniqueness constraint against the
    /// destination pool; the ledger re-runs location and capacity
    /// validation before calling this.
    pub async fn update_pool(
        store: &Store,
        id: DbId,
        pool: DbId,
    ) -> Result<CheckedOutConsumable, CoreError> {
        let mut tables = store.tables.write().await;
        if !tables.pools.contains_key(&pool) {
            return Err(CoreError::NotFound {
                entity: "ConsumablePool",
                id: pool,
            });
        }
        let device = tables
            .checkouts
            .get(&id)
            .ok_or(CoreError::NotFound {
                entity: "CheckedOutConsumable",
                id,
            })?
            .device;
        if tables
            .checkouts
            .values()
            .any(|row| row.id != id && row.device == device && row.consumable_pool == pool)
        {
            return Err(CoreError::DuplicateKey(
                "device already has a checkout for this pool".to_string(),
            ));
        }
        let row = tables.checkouts.get_mut(&id).ok_or(CoreError::NotFound {
            entity: "CheckedOutConsumable",
            id,
        })?;
        row.consumable_pool = pool;
        row.updated_at = Store::now();
        Ok(row.clone())
    }

    /// Delete a record, immediately releasing its quantity.
    pub async fn delete(store: &Store, id: DbId) -> Result<(), CoreError> {
        let mut tables = store.tables.write().await;
        tables
            .checkouts
            .remove(&id)
            .map(|_| ())
            .ok_or(CoreError::NotFound {
                entity: "CheckedOutConsumable",
                id,
            })
    }
}
