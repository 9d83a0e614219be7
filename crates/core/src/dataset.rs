//! Data sets that drive the maintenance modes.
//!
//! A data set bundles the literal inputs of each mode:
//!
//! - `stores` - complete documents written by a reseed, in order
//! - `media_links` - `(name → videoUrl, clickableLink)` pairs for targeted updates
//! - `model_sets` - replacement `models` arrays keyed by store name
//!
//! ## YAML Format
//!
//! ```yaml
//! stores:
//!   - name: Electronics Showroom
//!     imageUrl: https://images.example.com/showroom.jpg
//!     domain: localhost
//!     models:
//!       - { id: helmet_1, url: /models/Helmet.glb, position: { x: -4, y: 0.5, z: -2 }, size: 2.0 }
//!
//! media_links:
//!   - name: Electronics Showroom
//!     videoUrl: https://www.youtube.com/embed/jZzuq_AlX58
//!     clickableLink: http://localhost:3001
//!
//! model_sets:
//!   Electronics Showroom:
//!     - { id: boombox-1, url: /models/BoomBox.glb, position: { x: -2, y: 0, z: 0 }, size: 1 }
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Store, StoreModel};

const STORES: &str = "stores";
const MEDIA_LINKS: &str = "media_links";
const MODEL_SETS: &str = "model_sets";

/// A problem found while validating a [`Dataset`].
///
/// `section` names the top-level key the problem was found under.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    /// A store name is empty.
    #[error("{section}: store name at index {index} is empty")]
    EmptyStoreName {
        /// Data-set section.
        section: &'static str,
        /// Position of the entry within the section.
        index: usize,
    },

    /// The same store name appears twice in one section.
    #[error("{section}: duplicate store name \"{name}\"")]
    DuplicateStoreName {
        /// Data-set section.
        section: &'static str,
        /// Repeated name.
        name: String,
    },

    /// A model has an empty id.
    #[error("{section}: model at index {index} of \"{store}\" has an empty id")]
    EmptyModelId {
        /// Data-set section.
        section: &'static str,
        /// Owning store.
        store: String,
        /// Position of the model within the list.
        index: usize,
    },

    /// Two models in one list share an id.
    #[error("{section}: duplicate model id \"{id}\" in \"{store}\"")]
    DuplicateModelId {
        /// Data-set section.
        section: &'static str,
        /// Owning store.
        store: String,
        /// Repeated id.
        id: String,
    },

    /// A model coordinate is NaN or infinite.
    #[error("{section}: model \"{id}\" in \"{store}\" has a non-finite position")]
    NonFinitePosition {
        /// Data-set section.
        section: &'static str,
        /// Owning store.
        store: String,
        /// Model id.
        id: String,
    },

    /// A model size is not a positive finite number.
    #[error("{section}: model \"{id}\" in \"{store}\" has size {size}, expected a positive number")]
    InvalidSize {
        /// Data-set section.
        section: &'static str,
        /// Owning store.
        store: String,
        /// Model id.
        id: String,
        /// Offending value.
        size: f64,
    },
}

/// Replacement media links for one store, matched by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkUpdate {
    /// Name of the store to patch.
    pub name: String,
    /// New background video URL.
    pub video_url: String,
    /// New navigation target.
    pub clickable_link: String,
}

/// The literal inputs of every maintenance mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Documents written by a reseed, in insertion order.
    #[serde(default)]
    pub stores: Vec<Store>,
    /// Targeted link updates, applied in order.
    #[serde(default)]
    pub media_links: Vec<LinkUpdate>,
    /// Replacement model lists keyed by store name.
    #[serde(default)]
    pub model_sets: BTreeMap<String, Vec<StoreModel>>,
}

impl Dataset {
    /// Parse a data set from YAML.
    ///
    /// # Errors
    ///
    /// Returns the `serde_yaml` error if the document is malformed or does not
    /// match the data-set layout.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Replacement models for `name`, if the data set defines any.
    #[must_use]
    pub fn model_set(&self, name: &str) -> Option<&[StoreModel]> {
        self.model_sets.get(name).map(Vec::as_slice)
    }

    /// Check the data set and return every problem found.
    ///
    /// URL shape and coordinate ranges are not checked. An empty result means
    /// the data set is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<DatasetError> {
        let mut errors = Vec::new();

        let mut seen = HashSet::new();
        for (index, store) in self.stores.iter().enumerate() {
            check_name(STORES, index, &store.name, &mut seen, &mut errors);
            check_models(STORES, &store.name, &store.models, &mut errors);
        }

        let mut seen = HashSet::new();
        for (index, update) in self.media_links.iter().enumerate() {
            check_name(MEDIA_LINKS, index, &update.name, &mut seen, &mut errors);
        }

        for (index, (name, models)) in self.model_sets.iter().enumerate() {
            if name.trim().is_empty() {
                errors.push(DatasetError::EmptyStoreName {
                    section: MODEL_SETS,
                    index,
                });
            }
            check_models(MODEL_SETS, name, models, &mut errors);
        }

        errors
    }
}

fn check_name<'a>(
    section: &'static str,
    index: usize,
    name: &'a str,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<DatasetError>,
) {
    if name.trim().is_empty() {
        errors.push(DatasetError::EmptyStoreName { section, index });
    } else if !seen.insert(name) {
        errors.push(DatasetError::DuplicateStoreName {
            section,
            name: name.to_owned(),
        });
    }
}

fn check_models(
    section: &'static str,
    store: &str,
    models: &[StoreModel],
    errors: &mut Vec<DatasetError>,
) {
    let mut ids = HashSet::new();

    for (index, model) in models.iter().enumerate() {
        if model.id.trim().is_empty() {
            errors.push(DatasetError::EmptyModelId {
                section,
                store: store.to_owned(),
                index,
            });
        } else if !ids.insert(model.id.as_str()) {
            errors.push(DatasetError::DuplicateModelId {
                section,
                store: store.to_owned(),
                id: model.id.clone(),
            });
        }

        if !model.position.is_finite() {
            errors.push(DatasetError::NonFinitePosition {
                section,
                store: store.to_owned(),
                id: model.id.clone(),
            });
        }

        if !(model.size.is_finite() && model.size > 0.0) {
            errors.push(DatasetError::InvalidSize {
                section,
                store: store.to_owned(),
                id: model.id.clone(),
                size: model.size,
            });
        }
    }
}
