//! Default-data seeding.
//!
//! On first deployment the catalog is pre-populated with three
//! consumable types: `Generic` (no schema), `Cable`, and
//! `Transceiver`. Runs after storage is provisioned and is
//! idempotent: types that already exist are left untouched.

use serde_json::{json, Value};

use stockroom_core::colors::COLOR_CHOICES;
use stockroom_core::error::CoreError;

use crate::models::consumable_type::{ConsumableType, CreateConsumableType};
use crate::repositories::ConsumableTypeRepo;
use crate::store::Store;

/// Schema for the default `Cable` type.
pub fn cable_schema() -> Value {
    let color_values: Vec<&str> = COLOR_CHOICES.iter().map(|(value, _)| *value).collect();
    let color_titles: Vec<&str> = COLOR_CHOICES.iter().map(|(_, name)| *name).collect();

    json!({
        "type": "object",
        "title": "Cable",
        "properties": {
            "cable_type": {
                "title": "Cable Type",
                "type": "string",
                "propertyOrder": 10,
                "enum": [
                    "CAT5", "CAT5e", "CAT6", "CAT6a", "CAT7", "CAT8",
                    "MMF OM3", "MMF OM4", "SMF OS2", "DAC", "AOC",
                ],
            },
            "connector": {
                "title": "Connector",
                "type": "string",
                "propertyOrder": 20,
                "enum": ["8P8C", "LC", "SC", "MPO", "DAC/AOC"],
            },
            "length": {
                "title": "Length",
                "type": "integer",
                "propertyOrder": 30,
            },
            "length_unit": {
                "title": "Unit",
                "type": "string",
                "propertyOrder": 40,
                "enum": ["m", "cm", "ft", "in"],
                "options": {
                    "enum_titles": ["Meters", "Centimeters", "Feet", "Inches"],
                },
            },
            "color": {
                "title": "Color",
                "type": "string",
                "propertyOrder": 50,
                "enum": color_values,
                "options": {"enum_titles": color_titles},
            },
        },
    })
}

/// Schema for the default `Transceiver` type.
pub fn transceiver_schema() -> Value {
    json!({
        "type": "object",
        "title": "Transceiver",
        "properties": {
            "form_factor": {
                "title": "Form Factor",
                "type": "string",
                "propertyOrder": 10,
                "enum": [
                    "SFP (1GE)", "SFP+ (10GE)", "SFP28 (25GE)",
                    "QSFP+ (40GE)", "QSFP28 (100GE)", "QSFP56 (200GE)",
                    "QSFP-DD (400GE)", "OSFP (400GE)",
                ],
            },
            "reach": {
                "title": "Reach",
                "type": "string",
                "propertyOrder": 20,
                "enum": ["SR", "LR", "ER", "ZR", "DAC", "AOC"],
            },
        },
    })
}

/// Install the default consumable types, get-or-create by name.
pub async fn install_default_types(store: &Store) -> Result<Vec<ConsumableType>, CoreError> {
    let defaults = [
        ("Generic", None),
        ("Cable", Some(cable_schema())),
        ("Transceiver", Some(transceiver_schema())),
    ];

    let mut installed = Vec::with_capacity(defaults.len());
    for (name, schema) in defaults {
        if let Some(existing) = ConsumableTypeRepo::get_by_name(store, name).await {
            installed.push(existing);
            continue;
        }
        let created = ConsumableTypeRepo::insert(
            store,
            CreateConsumableType {
                name: name.to_string(),
                schema,
            },
        )
        .await?;
        tracing::info!(id = created.id, name = %created.name, "installed default consumable type");
        installed.push(created);
    }
    Ok(installed)
}
