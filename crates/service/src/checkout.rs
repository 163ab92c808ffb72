//! The checkout ledger: the guarded write path for capacity-affecting
//! writes.
//!
//! The capacity check is read-then-write and would race under
//! concurrent checkouts against the same pool, so every
//! capacity-affecting write (create, update, check-in, pool change)
//! runs inside a per-pool critical section. Locks are keyed by pool
//! id; a pool-change takes both pool locks in ascending id order so
//! two concurrent moves cannot deadlock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::models::checkout::{CheckedOutConsumable, CreateCheckedOutConsumable};
use stockroom_db::models::directory::Device;
use stockroom_db::models::pool::ConsumablePool;
use stockroom_db::repositories::{CheckoutRepo, DirectoryRepo, PoolRepo};
use stockroom_db::Store;

/// Serialized write path for checkout records.
pub struct CheckoutLedger {
    store: Arc<Store>,
    locks: Mutex<HashMap<DbId, Arc<Mutex<()>>>>,
}

impl CheckoutLedger {
    pub fn new(store: Arc<Store>) -> Self {
        CheckoutLedger {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Check out `quantity` units of a pool to a device.
    ///
    /// If the device already holds a checkout against the pool this
    /// is an update of that record's quantity, not a new record.
    pub async fn checkout(
        &self,
        pool: DbId,
        device: DbId,
        quantity: i32,
    ) -> Result<CheckedOutConsumable, CoreError> {
        let _guard = self.lock_pool(pool).await;

        let pool_row = PoolRepo::get(&self.store, pool).await?;
        let device_row = DirectoryRepo::get_device(&self.store, device).await?;
        let existing = CheckoutRepo::find_for_device_and_pool(&self.store, device, pool).await;

        if let Err(err) = self
            .validate_write(&pool_row, &device_row, quantity, existing.as_ref().map(|r| r.id))
            .await
        {
            tracing::warn!(pool = pool, device = device, %err, "rejected checkout");
            return Err(err);
        }

        let record = match existing {
            Some(record) => {
                CheckoutRepo::update_quantity(&self.store, record.id, quantity).await?
            }
            None => {
                CheckoutRepo::insert(
                    &self.store,
                    CreateCheckedOutConsumable {
                        consumable_pool: pool,
                        device,
                        quantity,
                    },
                )
                .await?
            }
        };
        tracing::info!(
            id = record.id,
            pool = pool,
            device = device,
            quantity = quantity,
            "checked out consumables"
        );
        Ok(record)
    }

    /// Check a record back in, immediately releasing its quantity.
    pub async fn checkin(&self, record: DbId) -> Result<(), CoreError> {
        loop {
            let row = CheckoutRepo::get(&self.store, record).await?;
            let _guard = self.lock_pool(row.consumable_pool).await;
            // The record may have moved to another pool while we
            // waited on the lock; if so, lock that pool instead.
            let current = CheckoutRepo::get(&self.store, record).await?;
            if current.consumable_pool != row.consumable_pool {
                continue;
            }
            CheckoutRepo::delete(&self.store, record).await?;
            tracing::info!(
                id = record,
                pool = row.consumable_pool,
                quantity = row.quantity,
                "checked in consumables"
            );
            return Ok(());
        }
    }

    /// Re-point a checkout record at a different pool.
    ///
    /// The destination is validated exactly like a fresh checkout
    /// (location match and capacity), with both pools' write paths
    /// held closed for the duration of the move.
    pub async fn change_pool(
        &self,
        record: DbId,
        new_pool: DbId,
    ) -> Result<CheckedOutConsumable, CoreError> {
        loop {
            let row = CheckoutRepo::get(&self.store, record).await?;
            if row.consumable_pool == new_pool {
                return Ok(row);
            }

            let _guards = self.lock_pool_pair(row.consumable_pool, new_pool).await;

            // The record may have moved while we waited on the locks;
            // if so, start over against its current pool.
            let current = CheckoutRepo::get(&self.store, record).await?;
            if current.consumable_pool != row.consumable_pool {
                continue;
            }

            let pool_row = PoolRepo::get(&self.store, new_pool).await?;
            let device_row = DirectoryRepo::get_device(&self.store, current.device).await?;

            self.validate_write(&pool_row, &device_row, current.quantity, None)
                .await?;

            let moved = CheckoutRepo::update_pool(&self.store, record, new_pool).await?;
            tracing::info!(
                id = record,
                from_pool = current.consumable_pool,
                to_pool = new_pool,
                "moved checkout to a different pool"
            );
            return Ok(moved);
        }
    }

    // -- validation ---------------------------------------------------------

    /// The shared validation sequence for capacity-affecting writes:
    /// location match, positive quantity, then capacity against the
    /// other active checkouts. Must be called with the pool's lock
    /// held.
    async fn validate_write(
        &self,
        pool: &ConsumablePool,
        device: &Device,
        quantity: i32,
        exclude: Option<DbId>,
    ) -> Result<(), CoreError> {
        if device.location != pool.location {
            let pool_location = DirectoryRepo::get_location(&self.store, pool.location).await?;
            let device_location =
                DirectoryRepo::get_location(&self.store, device.location).await?;
            return Err(CoreError::LocationMismatch {
                pool: pool.name.clone(),
                pool_location: pool_location.name,
                device: device.name.clone(),
                device_location: device_location.name,
            });
        }

        if quantity < 1 {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        // i64 throughout: the declared quantity may be i32::MAX, so
        // summing request and usage in i32 can overflow on valid
        // input.
        let others_used =
            CheckoutRepo::used_quantity_excluding(&self.store, pool.id, exclude).await;
        if others_used + i64::from(quantity) > i64::from(pool.quantity) {
            return Err(CoreError::CapacityExceeded {
                requested: i64::from(quantity),
                available: i64::from(pool.quantity) - others_used,
            });
        }
        Ok(())
    }

    // -- pool locks ---------------------------------------------------------

    async fn pool_lock(&self, pool: DbId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(pool).or_default().clone()
    }

    async fn lock_pool(&self, pool: DbId) -> OwnedMutexGuard<()> {
        self.pool_lock(pool).await.lock_owned().await
    }

    /// Lock two pools in ascending id order.
    async fn lock_pool_pair(
        &self,
        first: DbId,
        second: DbId,
    ) -> (OwnedMutexGuard<()>, OwnedMutexGuard<()>) {
        let (low, high) = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        let low_guard = self.lock_pool(low).await;
        let high_guard = self.lock_pool(high).await;
        (low_guard, high_guard)
    }
}
