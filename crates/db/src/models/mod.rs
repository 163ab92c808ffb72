//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct matching the stored record
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - The flat export-row projection other tooling depends on

pub mod checkout;
pub mod consumable;
pub mod consumable_type;
pub mod directory;
pub mod pool;
