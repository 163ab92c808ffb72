//! Domain error taxonomy.
//!
//! Every validation-time failure in the tracker maps to exactly one of
//! these variants and is surfaced synchronously to the caller. The
//! `LocationMismatch` and `CapacityExceeded` wordings are scraped by
//! operator tooling and must not change.

use crate::schema::Violation;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The consumable type's own schema document is malformed.
    #[error("Schema is not a valid schema document: {0}")]
    SchemaInvalid(String),

    /// Attribute data failed validation against the type's schema.
    #[error("Data validation against schema failed: {}", join_violations(.0))]
    DataInvalid(Vec<Violation>),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// An attempt to change a set-once relation after first save.
    #[error("{field} cannot be changed after creation")]
    ImmutableField { field: &'static str },

    #[error("Quantity must be a positive integer, got {0}")]
    InvalidQuantity(i32),

    #[error(
        "Cannot check out consumables from Pool {pool} in location {pool_location} \
         to Device {device} in location {device_location}"
    )]
    LocationMismatch {
        pool: String,
        pool_location: String,
        device: String,
        device_location: String,
    },

    #[error(
        "Consumable pool does not have enough available capacity, \
         requesting {requested}, only {available} available."
    )]
    CapacityExceeded { requested: i64, available: i64 },

    /// A delete was attempted while dependent records still exist.
    #[error("Cannot delete {entity} {name}: referenced by {count} {dependents}")]
    ReferentialBlock {
        entity: &'static str,
        name: String,
        count: usize,
        dependents: &'static str,
    },

    /// An internal-consistency fault, e.g. a negative available
    /// quantity observed outside an in-flight write. A defect to log
    /// and alert on, never a user error.
    #[error("Internal consistency fault: {0}")]
    Consistency(String),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_invalid_message_lists_violations() {
        let err = CoreError::DataInvalid(vec![Violation {
            path: "color".into(),
            message: "'color' is a required property".into(),
        }]);
        assert_eq!(
            err.to_string(),
            "Data validation against schema failed: 'color' is a required property"
        );
    }

    #[test]
    fn capacity_exceeded_message_is_verbatim() {
        let err = CoreError::CapacityExceeded {
            requested: 8,
            available: 7,
        };
        assert_eq!(
            err.to_string(),
            "Consumable pool does not have enough available capacity, \
             requesting 8, only 7 available."
        );
    }
}
