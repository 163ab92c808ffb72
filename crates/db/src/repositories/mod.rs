//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD
//! methods that accept `&Store` as the first argument. Uniqueness
//! constraints, protect-on-delete semantics, and the set-once
//! relation checks are enforced here; schema, quantity, location, and
//! capacity rules belong to the service layer.

pub mod checkout_repo;
pub mod consumable_repo;
pub mod consumable_type_repo;
pub mod directory_repo;
pub mod pool_repo;

pub use checkout_repo::CheckoutRepo;
pub use consumable_repo::ConsumableRepo;
pub use consumable_type_repo::ConsumableTypeRepo;
pub use directory_repo::DirectoryRepo;
pub use pool_repo::PoolRepo;
