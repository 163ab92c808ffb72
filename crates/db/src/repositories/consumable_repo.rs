//! Repository for consumables.

use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;

use crate::models::consumable::{Consumable, CreateConsumable, UpdateConsumable};
use crate::store::Store;

/// Provides CRUD operations for consumables.
pub struct ConsumableRepo;

impl ConsumableRepo {
    /// Insert a new consumable.
    ///
    /// Enforces: the referenced type and manufacturer exist, the name
    /// is unique, and the (manufacturer, type, product_id) triple is
    /// unique.
    pub async fn insert(
        store: &Store,
        create: CreateConsumable,
    ) -> Result<Consumable, CoreError> {
        let mut tables = store.tables.write().await;
        if !tables
            .consumable_types
            .contains_key(&create.consumable_type)
        {
            return Err(CoreError::NotFound {
                entity: "ConsumableType",
                id: create.consumable_type,
            });
        }
        if let Some(manufacturer) = create.manufacturer {
            if !tables.manufacturers.contains_key(&manufacturer) {
                return Err(CoreError::NotFound {
                    entity: "Manufacturer",
                    id: manufacturer,
                });
            }
        }
        if tables
            .consumables
            .values()
            .any(|row| row.name == create.name)
        {
            return Err(CoreError::DuplicateKey(format!(
                "consumable {} already exists",
                create.name
            )));
        }
        if tables.consumables.values().any(|row| {
            row.manufacturer == create.manufacturer
                && row.consumable_type == create.consumable_type
                && row.product_id == create.product_id
        }) {
            return Err(CoreError::DuplicateKey(format!(
                "a consumable with product id {} already exists for this \
                 manufacturer and consumable type",
                create.product_id
            )));
        }
        let now = Store::now();
        let row = Consumable {
            id: store.allocate_id(),
            name: create.name,
            consumable_type: create.consumable_type,
            manufacturer: create.manufacturer,
            product_id: create.product_id,
            data: create.data,
            created_at: now,
            updated_at: now,
        };
        tables.consumables.insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get(store: &Store, id: DbId) -> Result<Consumable, CoreError> {
        store
            .tables
            .read()
            .await
            .consumables
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Consumable",
                id,
            })
    }

    /// List all consumables, sorted by (type, name).
    pub async fn list(store: &Store) -> Vec<Consumable> {
        let tables = store.tables.read().await;
        let mut rows: Vec<Consumable> = tables.consumables.values().cloned().collect();
        rows.sort_by(|a, b| {
            (a.consumable_type, &a.name).cmp(&(b.consumable_type, &b.name))
        });
        rows
    }

    /// Apply an update.
    ///
    /// `consumable_type` is a set-once relation: an update naming a
    /// different type than the stored one fails with
    /// `ImmutableField`. This is a pre-write comparison against the
    /// stored row, not a type-level guarantee, because the field is
    /// legitimately settable once at creation.
    pub async fn update(
        store: &Store,
        id: DbId,
        update: UpdateConsumable,
    ) -> Result<Consumable, CoreError> {
        let mut tables = store.tables.write().await;
        let current = tables
            .consumables
            .get(&id)
            .ok_or(CoreError::NotFound {
                entity: "Consumable",
                id,
            })?
            .clone();

        if let Some(consumable_type) = update.consumable_type {
            if consumable_type != current.consumable_type {
                return Err(CoreError::ImmutableField {
                    field: "consumable_type",
                });
            }
        }
        if let Some(manufacturer) = update.manufacturer {
            if !tables.manufacturers.contains_key(&manufacturer) {
                return Err(CoreError::NotFound {
                    entity: "Manufacturer",
                    id: manufacturer,
                });
            }
        }

        let name = update.name.unwrap_or(current.name);
        let manufacturer = update.manufacturer.or(current.manufacturer);
        let product_id = update.product_id.unwrap_or(current.product_id);
        let data = update.data.or(current.data);

        if tables
            .consumables
            .values()
            .any(|row| row.id != id && row.name == name)
        {
            return Err(CoreError::DuplicateKey(format!(
                "consumable {name} already exists"
            )));
        }
        if tables.consumables.values().any(|row| {
            row.id != id
                && row.manufacturer == manufacturer
                && row.consumable_type == current.consumable_type
                && row.product_id == product_id
        }) {
            return Err(CoreError::DuplicateKey(format!(
                "a consumable with product id {product_id} already exists for \
                 this manufacturer and consumable type"
            )));
        }

        let row = tables.consumables.get_mut(&id).ok_or(CoreError::NotFound {
            entity: "Consumable",
            id,
        })?;
        row.name = name;
        row.manufacturer = manufacturer;
        row.product_id = product_id;
        row.data = data;
        row.updated_at = Store::now();
        Ok(row.clone())
    }

    /// Delete a consumable. Blocked while any pool references it.
    pub async fn delete(store: &Store, id: DbId) -> Result<(), CoreError> {
        let mut tables = store.tables.write().await;
        let row = tables.consumables.get(&id).ok_or(CoreError::NotFound {
            entity: "Consumable",
            id,
        })?;
        let dependents = tables
            .pools
            .values()
            .filter(|pool| pool.consumable == id)
            .count();
        if dependents > 0 {
            return Err(CoreError::ReferentialBlock {
                entity: "Consumable",
                name: row.name.clone(),
                count: dependents,
                dependents: "pools",
            });
        }
        tables.consumables.remove(&id);
        Ok(())
    }
}
