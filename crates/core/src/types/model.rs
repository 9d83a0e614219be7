//! 3D model records embedded in a store document.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Placement of a model in the store scene.
///
/// Each axis defaults to `0` when absent from the stored document. No range
/// checks are applied; coordinates may be any signed real number.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset.
    #[serde(default)]
    pub x: f64,
    /// Vertical offset.
    #[serde(default)]
    pub y: f64,
    /// Depth offset.
    #[serde(default)]
    pub z: f64,
}

impl Position {
    /// Create a position from its three coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns `true` if every coordinate is a finite number.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One 3D asset placed in a store.
///
/// A model has no identity outside the store that embeds it; `id` only needs
/// to be unique within the parent's model list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreModel {
    /// Identifier, unique within the parent store's model list.
    pub id: String,
    /// Path or URL of the binary glTF (`.glb`) asset.
    pub url: String,
    /// Placement in the scene.
    #[serde(default)]
    pub position: Position,
    /// Uniform scale factor.
    #[serde(default = "default_size")]
    pub size: f64,
}

impl StoreModel {
    /// Create a model record.
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>, position: Position, size: f64) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            position,
            size,
        }
    }
}

const fn default_size() -> f64 {
    1.0
}
