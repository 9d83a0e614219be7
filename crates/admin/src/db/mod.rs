//! Database access for the `stores` collection.
//!
//! # Database: `mersiv` (`MongoDB`)
//!
//! ## Collections
//!
//! - `stores` - One document per virtual storefront (see [`mersiv_core::Store`])
//!
//! No schema or unique index is enforced by the database; `name` is the
//! correlation key by convention only.
//!
//! # Implementations
//!
//! - [`MongoStoreRepository`] - The real collection, via the `mongodb` driver
//! - [`InMemoryStoreRepository`] - Same semantics over a `Vec`, for tests

pub mod memory;
pub mod mongo;

use mersiv_core::{LinkUpdate, Store, StoreModel};
use thiserror::Error;

pub use memory::InMemoryStoreRepository;
pub use mongo::{MongoStoreRepository, StoreDatabase};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Error reported by the `MongoDB` driver or server.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A value could not be converted to BSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),
}

/// Media links of one store as found in the collection.
///
/// Read without decoding the rest of the document, so a store whose other
/// fields are malformed still shows up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreLinks {
    /// Store name.
    pub name: String,
    /// Background video URL, if set.
    pub video_url: Option<String>,
    /// Navigation target, if set.
    pub clickable_link: Option<String>,
}

/// Result of a field update matched by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Documents whose `name` matched.
    pub matched: u64,
    /// Documents whose contents actually changed.
    pub modified: u64,
}

/// Result of replacing the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Documents removed before inserting.
    pub deleted: u64,
    /// Documents inserted.
    pub inserted: u64,
    /// Whether delete and insert committed as one transaction.
    pub atomic: bool,
}

/// Operations the maintenance modes need from the `stores` collection.
///
/// Each call runs to completion before the caller issues the next one.
pub trait StoreRepository: Send + Sync {
    /// Fetch every store document.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Store>, RepositoryError>> + Send;

    /// Fetch `name`, `videoUrl` and `clickableLink` of every store.
    ///
    /// Fields that are missing or not strings come back as absent; no other
    /// part of the document is decoded.
    fn find_links(&self) -> impl Future<Output = Result<Vec<StoreLinks>, RepositoryError>> + Send;

    /// Set `videoUrl` and `clickableLink` on the first store named
    /// `update.name`. Never creates a document.
    fn set_media_links(
        &self,
        update: &LinkUpdate,
    ) -> impl Future<Output = Result<UpdateOutcome, RepositoryError>> + Send;

    /// Replace the `models` field of every store named `name`, leaving the
    /// rest of the document untouched. Never creates a document.
    fn set_models(
        &self,
        name: &str,
        models: &[StoreModel],
    ) -> impl Future<Output = Result<UpdateOutcome, RepositoryError>> + Send;

    /// Delete every document, then insert `stores` in order.
    fn replace_all(
        &self,
        stores: &[Store],
    ) -> impl Future<Output = Result<ReplaceOutcome, RepositoryError>> + Send;
}
