//! Maintenance mode commands.
//!
//! # Usage
//!
//! ```bash
//! # Print every store's video URL and link
//! mersiv-cli inspect
//!
//! # Set video URL and link on the stores named in the data set
//! mersiv-cli update-links
//!
//! # Clear the collection and insert the data-set stores
//! mersiv-cli reseed
//!
//! # Replace models on stores that have a model set
//! mersiv-cli update-models
//! ```
//!
//! # Environment Variables
//!
//! - `MONGODB_URI` - `MongoDB` connection string (default: `mongodb://localhost:27017`)
//! - `MERSIV_DATABASE` - Database name (default: `mersiv`)
//! - `MERSIV_COLLECTION` - Collection name (default: `stores`)
//! - `MERSIV_DATASET` - YAML data set replacing the built-in one

use std::path::PathBuf;

use mersiv_admin::{MaintenanceError, Mode, dataset};

use super::{load_config, print_report};

/// Run one maintenance mode and print its report.
///
/// The data set is loaded and validated before the database is contacted.
/// If a write fails after others went through, the lines for the finished
/// writes are still printed before the error is returned.
///
/// # Errors
///
/// Returns an error if configuration or the data set is invalid, or if any
/// database operation fails.
pub async fn run(mode: Mode, dataset_path: Option<PathBuf>) -> Result<(), MaintenanceError> {
    let config = load_config(dataset_path)?;
    let dataset = dataset::load(config.dataset_path.as_deref()).await?;

    let report = mersiv_admin::run(&config.database, mode, &dataset)
        .await
        .inspect_err(|e| {
            if let MaintenanceError::Interrupted { partial, .. } = e {
                print_report(partial);
            }
        })?;
    print_report(&report);

    tracing::info!(%mode, "Done");
    Ok(())
}
