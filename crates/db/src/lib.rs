//! Object-store boundary for the stockroom tracker.
//!
//! Provides the in-memory [`store::Store`], the entity models and
//! DTOs, the repository layer that enforces uniqueness and
//! protect-on-delete constraints, and the default-data seeding hook.
//! Capacity and location rules live one layer up, in
//! `stockroom-service`.

pub mod models;
pub mod repositories;
pub mod seed;
pub mod store;

pub use store::Store;
