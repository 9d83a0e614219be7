//! Top-level error type for a maintenance run.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::maintenance::{ModeError, Report};

/// Any failure that ends a maintenance run.
///
/// All variants are reported the same way: logged with the error detail,
/// after which the process exits with a failure code.
#[derive(Debug, Error)]
pub enum MaintenanceError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data-set file could not be read.
    #[error("failed to read data set {}: {source}", path.display())]
    DatasetIo {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Data-set YAML could not be parsed.
    #[error("failed to parse data set: {0}")]
    DatasetParse(#[from] serde_yaml::Error),

    /// Data set parsed but failed validation.
    #[error("{0} data set validation errors found")]
    InvalidDataset(usize),

    /// Connection, query or write failure.
    #[error("database operation failed: {0}")]
    Repository(#[from] RepositoryError),

    /// A write failed after earlier writes of the same run went through.
    #[error("database operation failed: {source}")]
    Interrupted {
        /// Report of the writes that went through.
        partial: Box<Report>,
        /// The failing repository call.
        source: RepositoryError,
    },
}

impl From<ModeError> for MaintenanceError {
    fn from(err: ModeError) -> Self {
        match err.partial {
            Some(partial) => Self::Interrupted {
                partial,
                source: err.source,
            },
            None => Self::Repository(err.source),
        }
    }
}
