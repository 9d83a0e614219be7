//! Inspect mode: list every store's media links.

use std::fmt;

use tracing::{info, instrument};

pub use crate::db::StoreLinks;
use crate::db::{RepositoryError, StoreRepository};

/// Printed in place of a link that is absent or empty.
pub const NOT_SET: &str = "NOT SET";

/// Result of an inspect run, in collection order.
#[derive(Debug, Clone, Default)]
pub struct InspectReport {
    /// One entry per document.
    pub stores: Vec<StoreLinks>,
}

/// Read every store's links. Never writes.
///
/// Only the link fields are decoded, so documents with malformed models or
/// images are still listed.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
#[instrument(skip_all)]
pub async fn inspect<R: StoreRepository>(repo: &R) -> Result<InspectReport, RepositoryError> {
    let stores = repo.find_links().await?;
    info!(count = stores.len(), "Inspected stores");

    Ok(InspectReport { stores })
}

fn or_not_set(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_SET)
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📹 Video URLs in database:")?;

        for store in &self.stores {
            writeln!(f)?;
            writeln!(f, "Store: {}", store.name)?;
            writeln!(f, "Video URL: {}", or_not_set(store.video_url.as_deref()))?;
            writeln!(f, "Link: {}", or_not_set(store.clickable_link.as_deref()))?;
            write!(f, "---")?;
        }

        Ok(())
    }
}
