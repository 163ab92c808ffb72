//! Repository for consumable types.

use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;

use crate::models::consumable_type::{ConsumableType, CreateConsumableType, UpdateConsumableType};
use crate::store::Store;

/// Provides CRUD operations for consumable types.
pub struct ConsumableTypeRepo;

impl ConsumableTypeRepo {
    /// Insert a new consumable type. The name is unique across all
    /// types.
    pub async fn insert(
        store: &Store,
        create: CreateConsumableType,
    ) -> Result<ConsumableType, CoreError> {
        let mut tables = store.tables.write().await;
        if tables
            .consumable_types
            .values()
            .any(|existing| existing.name == create.name)
        {
            return Err(CoreError::DuplicateKey(format!(
                "consumable type {} already exists",
                create.name
            )));
        }
        let now = Store::now();
        let row = ConsumableType {
            id: store.allocate_id(),
            name: create.name,
            schema: create.schema,
            created_at: now,
            updated_at: now,
        };
        tables.consumable_types.insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get(store: &Store, id: DbId) -> Result<ConsumableType, CoreError> {
        store
            .tables
            .read()
            .await
            .consumable_types
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "ConsumableType",
                id,
            })
    }

    pub async fn get_by_name(store: &Store, name: &str) -> Option<ConsumableType> {
        store
            .tables
            .read()
            .await
            .consumable_types
            .values()
            .find(|row| row.name == name)
            .cloned()
    }

    /// List all consumable types, sorted by name.
    pub async fn list(store: &Store) -> Vec<ConsumableType> {
        let tables = store.tables.read().await;
        let mut rows: Vec<ConsumableType> = tables.consumable_types.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    /// Apply an update. Renames re-check name uniqueness.
    pub async fn update(
        store: &Store,
        id: DbId,
        update: UpdateConsumableType,
    ) -> Result<ConsumableType, CoreError> {
        let mut tables = store.tables.write().await;
        if let Some(name) = &update.name {
            if tables
                .consumable_types
                .values()
                .any(|row| row.id != id && &row.name == name)
            {
                return Err(CoreError::DuplicateKey(format!(
                    "consumable type {name} already exists"
                )));
            }
        }
        let row = tables
            .consumable_types
            .get_mut(&id)
            .ok_or(CoreError::NotFound {
                entity: "ConsumableType",
                id,
            })?;
        if let Some(name) = update.name {
            row.name = name;
        }
        if let Some(schema) = update.schema {
            row.schema = Some(schema);
        }
        row.updated_at = Store::now();
        Ok(row.clone())
    }

    /// Delete a type. Blocked while any consumable references it.
    pub async fn delete(store: &Store, id: DbId) -> Result<(), CoreError> {
        let mut tables = store.tables.write().await;
        let row = tables
            .consumable_types
            .get(&id)
            .ok_or(CoreError::NotFound {
                entity: "ConsumableType",
                id,
            })?;
        let dependents = tables
            .consumables
            .values()
            .filter(|consumable| consumable.consumable_type == id)
            .count();
        if dependents > 0 {
            return Err(CoreError::ReferentialBlock {
                entity: "ConsumableType",
                name: row.name.clone(),
                count: dependents,
                dependents: "consumables",
            });
        }
        tables.consumable_types.remove(&id);
        Ok(())
    }
}
