//! Store document type.

use serde::{Deserialize, Serialize};

use super::StoreModel;

/// A virtual storefront as stored in the `stores` collection.
///
/// `name` is the correlation key used by every maintenance mode; the database
/// does not enforce its uniqueness. Fields the tools never write (`_id`,
/// timestamps added by other services) are ignored when reading.
///
/// ## Examples
///
/// ```
/// use mersiv_core::Store;
///
/// let store: Store = serde_yaml::from_str(
///     "name: Furniture Store\nimageUrl: https://example.com/bg.jpg\n",
/// )
/// .unwrap();
///
/// assert_eq!(store.name, "Furniture Store");
/// assert!(store.video_url.is_none());
/// assert!(store.models.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Display name and lookup key.
    #[serde(default)]
    pub name: String,
    /// Background image URL.
    #[serde(default)]
    pub image_url: String,
    /// Hostname this store is associated with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Background video: a direct media file or an embeddable video URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Navigation target when the store is clicked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickable_link: Option<String>,
    /// Embedded 3D models, in insertion order.
    #[serde(default)]
    pub models: Vec<StoreModel>,
}

impl Store {
    /// Create a store with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Scale factors of the embedded models, in order.
    #[must_use]
    pub fn model_sizes(&self) -> Vec<f64> {
        self.models.iter().map(|m| m.size).collect()
    }
}
