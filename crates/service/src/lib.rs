//! Guarded write paths for the stockroom tracker.
//!
//! Three services sit between callers and the repository layer:
//!
//! - [`catalog::Catalog`] — consumable types and consumables, with
//!   schema validation on every write.
//! - [`allocator::Allocator`] — pools and their derived used/available
//!   quantities.
//! - [`checkout::CheckoutLedger`] — checkout records, with location
//!   and capacity validation serialized per pool.

pub mod allocator;
pub mod catalog;
pub mod checkout;
