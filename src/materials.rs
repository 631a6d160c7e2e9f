//! Materials configuration: per-element sphere radii and bonding rules.
//!
//! The schema matches the JSON resource the visualizer is configured with:
//!
//! ```json
//! {
//!   "atom_info": { "H": { "radius": 0.37 } },
//!   "bond_info": { "H": ["H", "C"] }
//! }
//! ```
//!
//! `bond_info` is a per-element whitelist of partners; it need not be stored
//! symmetrically (see [`crate::bonds::BondRules`]).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::bonds::BondRules;
use crate::error::VizError;

/// Display properties for one element.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AtomMaterial {
    /// Sphere radius for atoms of this element.
    pub radius: f64,
}

/// The full materials table keyed by element symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct Materials {
    /// Per-element display properties.
    #[serde(rename = "atom_info")]
    atoms: HashMap<String, AtomMaterial>,
    /// Per-element bonding whitelists.
    #[serde(rename = "bond_info")]
    bonds: HashMap<String, Vec<String>>,
}

impl Materials {
    /// Parse a materials table from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::RulesParse`] when the JSON does not match the
    /// schema.
    pub fn from_json(contents: &str) -> Result<Self, VizError> {
        serde_json::from_str(contents)
            .map_err(|e| VizError::RulesParse(e.to_string()))
    }

    /// Read and parse a materials file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Io`] on read failure, otherwise as
    /// [`Self::from_json`].
    pub fn load(path: &Path) -> Result<Self, VizError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Sphere radius for an element, if the table has an entry.
    #[must_use]
    pub fn radius(&self, element: &str) -> Option<f64> {
        self.atoms.get(element).map(|a| a.radius)
    }

    /// Whether the table carries both display and bonding entries for an
    /// element. Structures containing elements without entries cannot be
    /// visualized.
    #[must_use]
    pub fn has_entry(&self, element: &str) -> bool {
        self.atoms.contains_key(element) && self.bonds.contains_key(element)
    }

    /// Build the bonding-rules table for bond detection.
    #[must_use]
    pub fn bond_rules(&self) -> BondRules {
        BondRules::from_lists(&self.bonds)
    }
}
