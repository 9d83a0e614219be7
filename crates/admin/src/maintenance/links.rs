//! Targeted field update: set media links on named stores.

use std::fmt;

use tracing::{info, instrument, warn};

use mersiv_core::LinkUpdate;

use super::{ModeError, Report};
use crate::db::StoreRepository;

/// What happened to one named store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkUpdateStatus {
    /// The store existed and its links changed.
    Updated,
    /// The store existed and already had these links.
    Unchanged,
    /// No store has this name; nothing was written.
    NotFound,
}

/// Outcome for one entry of the update list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkUpdateEntry {
    /// Store name from the data set.
    pub name: String,
    /// What happened.
    pub status: LinkUpdateStatus,
}

/// Result of a targeted update run, in data-set order.
#[derive(Debug, Clone, Default)]
pub struct LinkUpdateReport {
    /// One entry per requested update that was attempted.
    pub entries: Vec<LinkUpdateEntry>,
    /// Whether every requested update was attempted.
    pub complete: bool,
}

impl LinkUpdateReport {
    /// Number of entries whose store was found.
    #[must_use]
    pub fn matched(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status != LinkUpdateStatus::NotFound)
            .count()
    }
}

/// Apply each update to the store with the same name.
///
/// Unmatched names are reported, not created. The first failing write stops
/// the run; earlier writes stay applied.
///
/// # Errors
///
/// Returns the first repository error encountered, with the entries written
/// before it as a partial report.
#[instrument(skip_all, fields(updates = updates.len()))]
pub async fn update_links<R: StoreRepository>(
    repo: &R,
    updates: &[LinkUpdate],
) -> Result<LinkUpdateReport, ModeError> {
    let mut report = LinkUpdateReport::default();

    for update in updates {
        let outcome = match repo.set_media_links(update).await {
            Ok(outcome) => outcome,
            Err(e) if report.entries.is_empty() => return Err(e.into()),
            Err(e) => return Err(ModeError::interrupted(Report::UpdateLinks(report), e)),
        };

        let status = if outcome.matched == 0 {
            warn!(store = %update.name, "No store with this name; nothing updated");
            LinkUpdateStatus::NotFound
        } else if outcome.modified == 0 {
            info!(store = %update.name, "Links already up to date");
            LinkUpdateStatus::Unchanged
        } else {
            info!(store = %update.name, "Updated links");
            LinkUpdateStatus::Updated
        };

        report.entries.push(LinkUpdateEntry {
            name: update.name.clone(),
            status,
        });
    }

    report.complete = true;
    Ok(report)
}

impl fmt::Display for LinkUpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            match entry.status {
                LinkUpdateStatus::Updated => writeln!(f, "✅ Updated {}", entry.name)?,
                LinkUpdateStatus::Unchanged => {
                    writeln!(f, "✅ {} already up to date", entry.name)?;
                }
                LinkUpdateStatus::NotFound => {
                    writeln!(f, "⚠️  No store named \"{}\" - nothing updated", entry.name)?;
                }
            }
        }

        if !self.complete {
            return Ok(());
        }

        let matched = self.matched();
        if matched == self.entries.len() {
            write!(f, "\n✨ All stores updated with new media links!")
        } else {
            write!(
                f,
                "\n✨ Updated {matched} of {} stores",
                self.entries.len()
            )
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mersiv_core::Store;

    use super::*;
    use crate::db::InMemoryStoreRepository;
    use crate::maintenance::testing::{FailingRepository, builtin_dataset};

    #[tokio::test]
    async fn test_sets_configured_literals() {
        let dataset = builtin_dataset();
        let repo = InMemoryStoreRepository::new(dataset.stores.clone());

        let report = update_links(&repo, &dataset.media_links).await.unwrap();
        assert_eq!(report.matched(), 3);

        let stores = repo.snapshot();
        let showroom = stores
            .iter()
            .find(|s| s.name == "Electronics Showroom")
            .unwrap();
        let expected = dataset
            .media_links
            .iter()
            .find(|l| l.name == "Electronics Showroom")
            .unwrap();
        assert_eq!(showroom.video_url.as_deref(), Some(expected.video_url.as_str()));
        assert_eq!(
            showroom.clickable_link.as_deref(),
            Some("http://localhost:3001")
        );
    }

    #[tokio::test]
    async fn test_other_stores_untouched() {
        let dataset = builtin_dataset();
        let mut other = Store::named("Bookshop");
        other.video_url = Some("https://example.com/books.mp4".to_owned());
        let repo = InMemoryStoreRepository::new(vec![Store::named("Electronics Showroom"), other.clone()]);

        update_links(&repo, &dataset.media_links).await.unwrap();

        let stores = repo.snapshot();
        assert_eq!(stores.len(), 2);
        assert_eq!(stores.iter().find(|s| s.name == "Bookshop"), Some(&other));
    }

    #[tokio::test]
    async fn test_idempotent() {
        let dataset = builtin_dataset();
        let repo = InMemoryStoreRepository::new(dataset.stores.clone());

        update_links(&repo, &dataset.media_links).await.unwrap();
        let after_first = repo.snapshot();
        let second = update_links(&repo, &dataset.media_links).await.unwrap();

        assert_eq!(repo.snapshot(), after_first);
        assert!(
            second
                .entries
                .iter()
                .all(|e| e.status == LinkUpdateStatus::Unchanged)
        );
    }

    #[tokio::test]
    async fn test_unmatched_name_is_not_upserted() {
        let dataset = builtin_dataset();
        let repo = InMemoryStoreRepository::new(vec![Store::named("Furniture Store")]);

        let report = update_links(&repo, &dataset.media_links).await.unwrap();

        assert_eq!(repo.snapshot().len(), 1);
        assert_eq!(report.matched(), 1);
        let output = report.to_string();
        assert!(output.contains("✅ Updated Furniture Store"));
        assert!(output.contains("⚠️  No store named \"Electronics Showroom\" - nothing updated"));
        assert!(output.ends_with("✨ Updated 1 of 3 stores"));
    }

    #[tokio::test]
    async fn test_write_failure_stops_run() {
        let dataset = builtin_dataset();
        let repo = FailingRepository::default();

        let err = update_links(&repo, &dataset.media_links).await.unwrap_err();

        assert!(err.partial.is_none());
        assert_eq!(repo.write_attempts(), 1);
    }

    #[tokio::test]
    async fn test_later_write_failure_reports_earlier_updates() {
        let dataset = builtin_dataset();
        let repo = FailingRepository::with_stores(dataset.stores.clone()).allowing_writes(2);

        let err = update_links(&repo, &dataset.media_links).await.unwrap_err();

        let Some(partial) = err.partial else {
            panic!("expected a partial report");
        };
        let Report::UpdateLinks(report) = *partial else {
            panic!("expected link update report");
        };
        assert_eq!(report.entries.len(), 2);
        assert!(!report.complete);
        assert_eq!(
            report.to_string(),
            "✅ Updated Electronics Showroom\n✅ Updated Furniture Store\n"
        );
        assert_eq!(repo.write_attempts(), 3);
    }
}
