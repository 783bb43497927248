//! Named filter chains loaded from YAML.
//!
//! A preset is a list of [`Filter`]s applied in order with one shared
//! [`FilterParams`]. Missing parameter fields take their defaults.
//!
//! ```yaml
//! name: edges
//! filters: [gaussian_blur, sobel, threshold]
//! params:
//!   threshold:
//!     cutoff: 64
//! ```

use std::path::Path;

use gallery_core::PixelBuffer;
use gallery_ops::{Filter, FilterParams, OpsError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or running a preset.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The preset file could not be read.
    #[error("failed to read preset: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not a valid preset.
    #[error("invalid preset document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A filter in the chain failed.
    #[error(transparent)]
    Ops(#[from] OpsError),
}

/// A named chain of filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Display name.
    pub name: String,
    /// Filters in application order.
    pub filters: Vec<Filter>,
    /// Parameters shared by every filter in the chain.
    #[serde(default)]
    pub params: FilterParams,
}

impl Preset {
    /// Parses a YAML document.
    pub fn from_yaml(doc: &str) -> Result<Self, PresetError> {
        Ok(serde_yaml::from_str(doc)?)
    }

    /// Reads and parses a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let doc = std::fs::read_to_string(path)?;
        Self::from_yaml(&doc)
    }

    /// Serializes back to YAML.
    pub fn to_yaml(&self) -> Result<String, PresetError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Runs every filter in order. The input is left untouched.
    pub fn run(&self, src: &PixelBuffer) -> Result<PixelBuffer, PresetError> {
        debug!(preset = %self.name, steps = self.filters.len(), "run preset");
        let mut img = src.clone();
        for filter in &self.filters {
            img = filter.apply(&img, &self.params)?;
        }
        Ok(img)
    }
}

/// Presets shipped with the crate, as `(file name, YAML)` pairs.
pub const BUILTIN: [(&str, &str); 3] = [
    ("comic.yaml", include_str!("../presets/comic.yaml")),
    ("edges.yaml", include_str!("../presets/edges.yaml")),
    ("corners.yaml", include_str!("../presets/corners.yaml")),
];

/// Parses a shipped preset by name.
pub fn builtin(name: &str) -> Option<Result<Preset, PresetError>> {
    BUILTIN
        .iter()
        .find(|(file, _)| file.trim_end_matches(".yaml") == name)
        .map(|(_, doc)| Preset::from_yaml(doc))
}
