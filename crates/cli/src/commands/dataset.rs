//! Data-set inspection command.
//!
//! Validates the configured data set and prints a summary without
//! contacting the database.
//!
//! ```bash
//! mersiv-cli dataset
//! mersiv-cli --dataset ./staging-stores.yaml dataset
//! ```

use std::path::PathBuf;

use mersiv_admin::MaintenanceError;
use mersiv_admin::dataset::{self, DatasetSummary};

use super::{load_config, print_report};

/// Validate the data set and print its summary.
///
/// # Errors
///
/// Returns an error if the data set cannot be read, parsed or validated.
pub async fn check(dataset_path: Option<PathBuf>) -> Result<(), MaintenanceError> {
    let config = load_config(dataset_path)?;
    let source = config.dataset_path.as_deref();
    let dataset = dataset::load(source).await?;

    print_report(&DatasetSummary {
        source,
        dataset: &dataset,
    });
    Ok(())
}
