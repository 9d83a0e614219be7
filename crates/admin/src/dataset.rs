//! Loading the data set that drives the maintenance modes.
//!
//! The built-in data set is compiled into the binary from
//! `crates/admin/data/stores.yaml`. A file given through `MERSIV_DATASET`
//! (or `--dataset`) replaces it entirely.

use std::fmt;
use std::path::Path;

use tracing::{error, info, instrument};

use mersiv_core::Dataset;

use crate::error::MaintenanceError;

const BUILTIN_DATASET: &str = include_str!("../data/stores.yaml");

/// Load and validate the data set.
///
/// Validation runs before any database connection is opened. Every problem
/// is logged; the returned error only carries the count.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid YAML, or fails
/// validation.
#[instrument]
pub async fn load(path: Option<&Path>) -> Result<Dataset, MaintenanceError> {
    let dataset = match path {
        Some(path) => {
            let content = tokio::fs::read_to_string(path).await.map_err(|source| {
                MaintenanceError::DatasetIo {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            Dataset::from_yaml(&content)?
        }
        None => builtin()?,
    };

    let errors = dataset.validate();
    if !errors.is_empty() {
        error!("Data set validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(MaintenanceError::InvalidDataset(errors.len()));
    }

    info!(
        stores = dataset.stores.len(),
        media_links = dataset.media_links.len(),
        model_sets = dataset.model_sets.len(),
        "Data set loaded"
    );
    Ok(dataset)
}

/// The data set compiled into the binary.
///
/// # Errors
///
/// Returns the parse error if the embedded YAML is malformed.
pub fn builtin() -> Result<Dataset, MaintenanceError> {
    Ok(Dataset::from_yaml(BUILTIN_DATASET)?)
}

/// Human-readable overview of a data set, printed by `mersiv-cli dataset`.
#[derive(Debug)]
pub struct DatasetSummary<'a> {
    /// Where the data set came from.
    pub source: Option<&'a Path>,
    /// The data set itself.
    pub dataset: &'a Dataset,
}

impl fmt::Display for DatasetSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Some(path) => writeln!(f, "📋 Data set: {}", path.display())?,
            None => writeln!(f, "📋 Data set: built-in")?,
        }

        let seeded: Vec<&str> = self.dataset.stores.iter().map(|s| s.name.as_str()).collect();
        writeln!(f, "   Stores to seed: {} ({})", seeded.len(), seeded.join(", "))?;

        let linked: Vec<&str> = self
            .dataset
            .media_links
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        writeln!(f, "   Link updates: {} ({})", linked.len(), linked.join(", "))?;

        let model_sets: Vec<&str> = self.dataset.model_sets.keys().map(String::as_str).collect();
        writeln!(f, "   Model sets: {} ({})", model_sets.len(), model_sets.join(", "))?;

        write!(f, "\n✅ Data set is valid")
    }
}
