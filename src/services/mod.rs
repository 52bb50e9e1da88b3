//! Business logic.
//!
//! The reporting core (`correlation`, `stock`, `analysis`, `batch_id`) is
//! pure: synchronous functions over snapshots, no state retained between
//! calls. The remaining modules are store-backed service structs consumed by
//! the HTTP handlers.

pub mod analysis;
pub mod batch_id;
pub mod correlation;
pub mod inventory;
pub mod master_data;
pub mod production;
pub mod reports;
pub mod stock;
