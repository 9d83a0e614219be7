//! The four maintenance modes over the `stores` collection.
//!
//! Every run follows `connecting → operating → closed`. [`run`] opens the
//! connection, hands the repository to [`execute`], and closes the
//! connection whether or not the operation succeeded.
//!
//! | Mode                      | Reads | Writes                               |
//! |---------------------------|-------|--------------------------------------|
//! | [`Mode::Inspect`]         | all   | nothing                              |
//! | [`Mode::UpdateLinks`]     | -     | `videoUrl`, `clickableLink` by name  |
//! | [`Mode::Reseed`]          | -     | whole collection                     |
//! | [`Mode::UpdateModels`]    | all   | `models` by name                     |

pub mod inspect;
pub mod links;
pub mod models;
pub mod reseed;

use std::fmt;

use thiserror::Error;
use tracing::info;

use mersiv_core::Dataset;

use crate::config::DatabaseConfig;
use crate::db::{RepositoryError, StoreDatabase, StoreRepository};
use crate::error::MaintenanceError;

pub use inspect::{InspectReport, NOT_SET, StoreLinks, inspect};
pub use links::{LinkUpdateEntry, LinkUpdateReport, LinkUpdateStatus, update_links};
pub use models::{ModelUpdate, ModelUpdateReport, update_models};
pub use reseed::{ReseedReport, reseed};

/// Which maintenance operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print every store's media links.
    Inspect,
    /// Set media links on the stores named in the data set.
    UpdateLinks,
    /// Clear the collection and insert the data-set stores.
    Reseed,
    /// Replace `models` on stores that have a model set.
    UpdateModels,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inspect => write!(f, "inspect"),
            Self::UpdateLinks => write!(f, "update-links"),
            Self::Reseed => write!(f, "reseed"),
            Self::UpdateModels => write!(f, "update-models"),
        }
    }
}

/// Outcome of one mode, printable as the console report.
#[derive(Debug, Clone)]
pub enum Report {
    Inspect(InspectReport),
    UpdateLinks(LinkUpdateReport),
    Reseed(ReseedReport),
    UpdateModels(ModelUpdateReport),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inspect(report) => fmt::Display::fmt(report, f),
            Self::UpdateLinks(report) => fmt::Display::fmt(report, f),
            Self::Reseed(report) => fmt::Display::fmt(report, f),
            Self::UpdateModels(report) => fmt::Display::fmt(report, f),
        }
    }
}

/// A mode stopped by a repository error.
///
/// Modes that write one store at a time attach the report of the writes
/// that already went through.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ModeError {
    /// Work finished before the failure.
    pub partial: Option<Box<Report>>,
    /// The failing repository call.
    #[source]
    pub source: RepositoryError,
}

impl ModeError {
    pub(crate) fn interrupted(partial: Report, source: RepositoryError) -> Self {
        Self {
            partial: Some(Box::new(partial)),
            source,
        }
    }
}

impl From<RepositoryError> for ModeError {
    fn from(source: RepositoryError) -> Self {
        Self {
            partial: None,
            source,
        }
    }
}

/// Run `mode` against an already-open repository.
///
/// # Errors
///
/// Returns the first repository error; remaining steps are not attempted.
pub async fn execute<R: StoreRepository>(
    repo: &R,
    mode: Mode,
    dataset: &Dataset,
) -> Result<Report, ModeError> {
    Ok(match mode {
        Mode::Inspect => Report::Inspect(inspect(repo).await?),
        Mode::UpdateLinks => Report::UpdateLinks(update_links(repo, &dataset.media_links).await?),
        Mode::Reseed => Report::Reseed(reseed(repo, &dataset.stores).await?),
        Mode::UpdateModels => Report::UpdateModels(update_models(repo, dataset).await?),
    })
}

/// Connect, run `mode`, and disconnect.
///
/// The connection is closed on success and on failure alike.
///
/// # Errors
///
/// Returns an error if the connection cannot be established or the
/// operation fails. A failure after some writes went through comes back as
/// [`MaintenanceError::Interrupted`] carrying the partial report.
pub async fn run(
    config: &DatabaseConfig,
    mode: Mode,
    dataset: &Dataset,
) -> Result<Report, MaintenanceError> {
    info!(%mode, "Connecting to MongoDB...");
    let database = StoreDatabase::connect(config).await?;

    let result = execute(database.stores(), mode, dataset).await;

    database.close().await;
    result.map_err(MaintenanceError::from)
}
