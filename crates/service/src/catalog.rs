//! Consumable catalog: types and catalog items.
//!
//! Every write re-validates the attribute data against the type's
//! schema; the schema itself is checked for well-formedness when the
//! type is written, never at consumable-creation time.

use serde_json::Value;

use stockroom_core::display::{self, DisplayAttribute};
use stockroom_core::error::CoreError;
use stockroom_core::schema::{self, AttributeSchema, Violation};
use stockroom_core::types::DbId;
use stockroom_db::models::consumable::{Consumable, CreateConsumable, UpdateConsumable};
use stockroom_db::models::consumable_type::{
    ConsumableType, CreateConsumableType, UpdateConsumableType,
};
use stockroom_db::repositories::{ConsumableRepo, ConsumableTypeRepo};
use stockroom_db::Store;

/// Write and presentation operations for the consumable catalog.
pub struct Catalog;

impl Catalog {
    // -- consumable types ----------------------------------------------------

    /// Create a consumable type, rejecting a malformed schema.
    pub async fn create_type(
        store: &Store,
        create: CreateConsumableType,
    ) -> Result<ConsumableType, CoreError> {
        if let Some(schema) = &create.schema {
            AttributeSchema::parse(schema)?;
        }
        let created = ConsumableTypeRepo::insert(store, create).await?;
        tracing::info!(id = created.id, name = %created.name, "created consumable type");
        Ok(created)
    }

    /// Update a consumable type.
    ///
    /// A replacement schema is checked for well-formedness; existing
    /// consumables of the type are not re-validated against it.
    pub async fn update_type(
        store: &Store,
        id: DbId,
        update: UpdateConsumableType,
    ) -> Result<ConsumableType, CoreError> {
        if let Some(schema) = &update.schema {
            AttributeSchema::parse(schema)?;
        }
        ConsumableTypeRepo::update(store, id, update).await
    }

    /// Delete a consumable type (blocked while consumables reference
    /// it).
    pub async fn delete_type(store: &Store, id: DbId) -> Result<(), CoreError> {
        ConsumableTypeRepo::delete(store, id).await
    }

    // -- consumables ---------------------------------------------------------

    /// Create a consumable, validating its data against the type's
    /// schema.
    pub async fn create_consumable(
        store: &Store,
        create: CreateConsumable,
    ) -> Result<Consumable, CoreError> {
        let ctype = ConsumableTypeRepo::get(store, create.consumable_type).await?;
        validate_data(&ctype, create.data.as_ref())?;
        let created = ConsumableRepo::insert(store, create).await?;
        tracing::info!(
            id = created.id,
            name = %created.name,
            consumable_type = %ctype.name,
            "created consumable"
        );
        Ok(created)
    }

    /// Update a consumable, re-validating the effective data.
    ///
    /// The type relation is set-once: naming a different
    /// `consumable_type` fails with `ImmutableField`.
    pub async fn update_consumable(
        store: &Store,
        id: DbId,
        update: UpdateConsumable,
    ) -> Result<Consumable, CoreError> {
        let current = ConsumableRepo::get(store, id).await?;
        let ctype = ConsumableTypeRepo::get(store, current.consumable_type).await?;
        let effective_data = update.data.as_ref().or(current.data.as_ref());
        validate_data(&ctype, effective_data)?;
        ConsumableRepo::update(store, id, update).await
    }

    /// Delete a consumable (blocked while pools reference it).
    pub async fn delete_consumable(store: &Store, id: DbId) -> Result<(), CoreError> {
        ConsumableRepo::delete(store, id).await
    }

    /// The ordered (label, value) projection of a consumable's
    /// attribute data; empty when its type has no schema.
    pub async fn describe(
        store: &Store,
        consumable: &Consumable,
    ) -> Result<Vec<DisplayAttribute>, CoreError> {
        let ctype = ConsumableTypeRepo::get(store, consumable.consumable_type).await?;
        let Some(raw) = &ctype.schema else {
            return Ok(Vec::new());
        };
        let parsed = AttributeSchema::parse(raw)?;
        let data = consumable.data.clone().unwrap_or_else(|| Value::Object(Default::default()));
        Ok(display::project(&parsed, &data))
    }
}

/// Validate attribute data against a type's schema.
///
/// With a schema, the data document (or an empty one, when absent)
/// must validate; without a schema, non-empty data is rejected.
fn validate_data(ctype: &ConsumableType, data: Option<&Value>) -> Result<(), CoreError> {
    match &ctype.schema {
        Some(raw) => {
            let parsed = AttributeSchema::parse(raw)?;
            let empty = Value::Object(Default::default());
            let document = data.unwrap_or(&empty);
            schema::validate(&parsed, document).map_err(CoreError::DataInvalid)
        }
        None => match data {
            None => Ok(()),
            Some(value) if value.is_null() => Ok(()),
            Some(value) if value.as_object().is_some_and(|map| map.is_empty()) => Ok(()),
            Some(_) => Err(CoreError::DataInvalid(vec![Violation {
                path: String::new(),
                message: format!(
                    "'{}' has no schema, data is not permitted",
                    ctype.name
                ),
            }])),
        },
    }
}
