//! Subcommand implementations.

pub mod dataset;
pub mod maintenance;

use std::fmt::Display;
use std::path::PathBuf;

use mersiv_admin::{MaintenanceConfig, MaintenanceError};

/// Load configuration, letting `--dataset` win over `MERSIV_DATASET`.
fn load_config(dataset: Option<PathBuf>) -> Result<MaintenanceConfig, MaintenanceError> {
    let mut config = MaintenanceConfig::from_env()?;
    if dataset.is_some() {
        config.dataset_path = dataset;
    }
    Ok(config)
}

/// Write a report to standard output.
fn print_report(report: &impl Display) {
    #[allow(clippy::print_stdout)]
    {
        println!("{report}");
    }
}
