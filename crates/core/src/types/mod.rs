//! Store document types for Mersiv.
//!
//! These types mirror the documents in the `stores` collection.

pub mod model;
pub mod store;

pub use model::{Position, StoreModel};
pub use store::Store;
