//! Conditional bulk update: replace `models` on stores with a defined set.

use std::fmt;

use tracing::{info, instrument, warn};

use mersiv_core::{Dataset, StoreModel};

use super::{ModeError, Report};
use crate::db::StoreRepository;

/// Outcome for one document found in the collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelUpdate {
    /// The store's `models` were replaced with this list.
    Replaced {
        /// Store name.
        name: String,
        /// The list written.
        models: Vec<StoreModel>,
    },
    /// No replacement is defined for this name.
    Skipped {
        /// Store name.
        name: String,
    },
}

/// Result of a bulk model update, in collection order.
#[derive(Debug, Clone, Default)]
pub struct ModelUpdateReport {
    /// Number of documents found in the collection.
    pub found: usize,
    /// One entry per document handled.
    pub outcomes: Vec<ModelUpdate>,
    /// Whether every document found was handled.
    pub complete: bool,
}

/// Replace the `models` field of every store that has a model set.
///
/// Only the `models` field is written; the rest of each document is kept.
/// Stores without a model set are skipped and reported. The first failing
/// write stops the run; earlier writes stay applied.
///
/// # Errors
///
/// Returns an error if the collection cannot be read or a write fails. A
/// write failure carries the report of the documents handled before it.
#[instrument(skip_all, fields(model_sets = dataset.model_sets.len()))]
pub async fn update_models<R: StoreRepository>(
    repo: &R,
    dataset: &Dataset,
) -> Result<ModelUpdateReport, ModeError> {
    let stores = repo.find_all().await?;
    info!(count = stores.len(), "Found stores");

    let mut report = ModelUpdateReport {
        found: stores.len(),
        ..ModelUpdateReport::default()
    };

    for store in stores {
        if let Some(models) = dataset.model_set(&store.name) {
            if let Err(e) = repo.set_models(&store.name, models).await {
                return Err(ModeError::interrupted(Report::UpdateModels(report), e));
            }
            info!(store = %store.name, models = models.len(), "Updated models");
            report.outcomes.push(ModelUpdate::Replaced {
                name: store.name,
                models: models.to_vec(),
            });
        } else {
            warn!(store = %store.name, "No model set defined; skipping");
            report.outcomes.push(ModelUpdate::Skipped { name: store.name });
        }
    }

    report.complete = true;
    Ok(report)
}

impl fmt::Display for ModelUpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "📦 Found {} stores", self.found)?;

        for outcome in &self.outcomes {
            writeln!(f)?;
            writeln!(f)?;
            match outcome {
                ModelUpdate::Replaced { name, models } => {
                    write!(f, "✅ Updated models for \"{name}\":")?;
                    for model in models {
                        write!(f, "\n   - {} at {}", model.url, model.position)?;
                    }
                }
                ModelUpdate::Skipped { name } => {
                    write!(f, "⚠️  No model set defined for \"{name}\" - skipping")?;
                }
            }
        }

        if self.complete {
            write!(f, "\n\n✅ All models updated successfully!")?;
        }
        Ok(())
    }
}
