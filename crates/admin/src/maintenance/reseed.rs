//! Full reseed: clear the collection and insert the data-set stores.

use std::fmt;

use tracing::{info, instrument};

use mersiv_core::Store;

use super::inspect::NOT_SET;
use crate::db::{RepositoryError, StoreRepository};

/// Characters of each URL shown in the reseed printout.
const PREVIEW_CHARS: usize = 80;

/// Result of a reseed run.
#[derive(Debug, Clone)]
pub struct ReseedReport {
    /// Documents removed.
    pub deleted: u64,
    /// Documents inserted.
    pub inserted: u64,
    /// Whether the clear and insert committed together.
    pub atomic: bool,
    /// The inserted stores, in insertion order.
    pub stores: Vec<Store>,
}

/// Replace the collection contents with `stores`.
///
/// Running it twice leaves the same collection.
///
/// # Errors
///
/// Returns an error if the clear or the insert fails. On a server without
/// transaction support a failed insert leaves the collection empty.
#[instrument(skip_all, fields(stores = stores.len()))]
pub async fn reseed<R: StoreRepository>(
    repo: &R,
    stores: &[Store],
) -> Result<ReseedReport, RepositoryError> {
    let outcome = repo.replace_all(stores).await?;
    info!(
        deleted = outcome.deleted,
        inserted = outcome.inserted,
        atomic = outcome.atomic,
        "Reseeded stores"
    );

    Ok(ReseedReport {
        deleted: outcome.deleted,
        inserted: outcome.inserted,
        atomic: outcome.atomic,
        stores: stores.to_vec(),
    })
}

/// First [`PREVIEW_CHARS`] characters followed by an ellipsis.
fn preview(value: &str) -> String {
    let mut out: String = value.chars().take(PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

fn join_sizes(sizes: &[f64]) -> String {
    sizes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for ReseedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🗑️  Cleared {} existing stores", self.deleted)?;
        writeln!(f, "✨ Inserted {} stores", self.inserted)?;
        writeln!(f)?;
        write!(f, "📦 Stores created:")?;

        for (index, store) in self.stores.iter().enumerate() {
            writeln!(f)?;
            writeln!(f)?;
            writeln!(f, "{}. {}", index + 1, store.name)?;
            writeln!(f, "   Background: {}", preview(&store.image_url))?;
            match store.video_url.as_deref() {
                Some(url) => writeln!(f, "   Video: {}", preview(url))?,
                None => writeln!(f, "   Video: {NOT_SET}")?,
            }
            write!(
                f,
                "   Models: {} (sizes: {})",
                store.models.len(),
                join_sizes(&store.model_sizes())
            )?;
        }

        write!(f, "\n\n✅ Database seeded successfully!")
    }
}
