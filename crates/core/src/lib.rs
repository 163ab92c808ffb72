//! Pure domain logic for the stockroom consumables tracker.
//!
//! Everything in this crate is side-effect free: attribute schema
//! parsing and validation, attribute projection for display, the
//! shared color table, and the domain error taxonomy. Storage and the
//! guarded write paths live in `stockroom-db` and `stockroom-service`.

pub mod colors;
pub mod display;
pub mod error;
pub mod schema;
pub mod types;
