//! Interactive visualization settings with TOML preset support.
//!
//! Everything the host UI exposes as a slider lives here: bond thickness,
//! bond cutoff distance, and per-element sphere radius overrides. Options
//! serialize to/from TOML so a host can keep presets on disk.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// Top-level options container. Sub-structs use `#[serde(default)]` so a
/// partial TOML file (e.g. only overriding `bond_cutoff`) works correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Bond and sphere geometry settings.
    pub geometry: GeometryOptions,
}

/// Geometry settings for bond cylinders and atom spheres.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeometryOptions {
    /// Bond cylinder thickness (diameter).
    pub bond_thickness: f64,
    /// Maximum separation at which eligible atoms are considered bonded.
    pub bond_cutoff: f64,
    /// Per-element sphere radius overrides; elements not listed use the
    /// materials-table radius.
    pub radius_overrides: HashMap<String, f64>,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            bond_thickness: 0.2,
            bond_cutoff: 3.0,
            radius_overrides: HashMap::new(),
        }
    }
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Io`] on read failure or
    /// [`VizError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, VizError> {
        let contents = std::fs::read_to_string(path).map_err(VizError::Io)?;
        toml::from_str(&contents)
            .map_err(|e| VizError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`VizError::OptionsParse`] on serialization failure or
    /// [`VizError::Io`] on write failure.
    pub fn save(&self, path: &Path) -> Result<(), VizError> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| VizError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VizError::Io)?;
        }
        std::fs::write(path, contents).map_err(VizError::Io)
    }
}
