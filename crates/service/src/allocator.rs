//! Pool allocation: declared capacity and its derived quantities.

use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::models::pool::{ConsumablePool, CreateConsumablePool, UpdateConsumablePool};
use stockroom_db::repositories::{CheckoutRepo, PoolRepo};
use stockroom_db::Store;

/// Write and capacity-accounting operations for consumable pools.
pub struct Allocator;

impl Allocator {
    /// Create a pool with a positive declared quantity.
    pub async fn create_pool(
        store: &Store,
        create: CreateConsumablePool,
    ) -> Result<ConsumablePool, CoreError> {
        if create.quantity < 1 {
            return Err(CoreError::InvalidQuantity(create.quantity));
        }
        let created = PoolRepo::insert(store, create).await?;
        tracing::info!(
            id = created.id,
            name = %created.name,
            quantity = created.quantity,
            "created consumable pool"
        );
        Ok(created)
    }

    /// Update a pool.
    ///
    /// The consumable relation is set-once and fails with
    /// `ImmutableField`. The declared quantity is never checked
    /// against the used quantity here; that invariant is enforced
    /// transitively through checkout validation.
    pub async fn update_pool(
        store: &Store,
        id: DbId,
        update: UpdateConsumablePool,
    ) -> Result<ConsumablePool, CoreError> {
        if let Some(quantity) = update.quantity {
            if quantity < 1 {
                return Err(CoreError::InvalidQuantity(quantity));
            }
        }
        PoolRepo::update(store, id, update).await
    }

    /// Delete a pool (blocked while checkout records exist).
    pub async fn delete_pool(store: &Store, id: DbId) -> Result<(), CoreError> {
        PoolRepo::delete(store, id).await
    }

    /// Sum of quantities of all active checkouts against the pool,
    /// recomputed fresh on every call.
    pub async fn used_quantity(store: &Store, pool: DbId) -> Result<i64, CoreError> {
        PoolRepo::get(store, pool).await?;
        Ok(CheckoutRepo::used_quantity(store, pool).await)
    }

    /// Declared quantity minus used quantity.
    ///
    /// Never negative in a consistent system; a negative value means
    /// a prior invariant violation and is surfaced as an
    /// internal-consistency fault.
    pub async fn available_quantity(store: &Store, pool: DbId) -> Result<i64, CoreError> {
        let row = PoolRepo::get(store, pool).await?;
        let used = CheckoutRepo::used_quantity(store, pool).await;
        let available = i64::from(row.quantity) - used;
        if available < 0 {
            tracing::error!(
                pool = pool,
                quantity = row.quantity,
                used = used,
                "pool is over-allocated"
            );
            return Err(CoreError::Consistency(format!(
                "pool {} has {} units checked out against a declared quantity of {}",
                row.name, used, row.quantity
            )));
        }
        Ok(available)
    }
}
