//! Geometric bond inference.
//!
//! An exhaustive pairwise scan over all unordered atom pairs: a pair is
//! bonded when the two elements are bonding-eligible under the rules table
//! and their Euclidean separation is strictly below the cutoff distance.
//! The outer loop is parallelized with rayon; rows are collected in index
//! order so the output is identical to a sequential scan.

use std::collections::{HashMap, HashSet};

use glam::DVec3;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::error::VizError;
use crate::structure::Atom;

/// Per-element bonding whitelists.
///
/// Eligibility is symmetric in effect: `(a, b)` is eligible when `b` is in
/// `a`'s list or `a` is in `b`'s list, so the table need not be stored
/// symmetrically.
#[derive(Debug, Clone, Default)]
pub struct BondRules {
    allowed: HashMap<String, HashSet<String>>,
}

impl BondRules {
    /// Build rules from per-element partner lists.
    #[must_use]
    pub fn from_lists(lists: &HashMap<String, Vec<String>>) -> Self {
        let allowed = lists
            .iter()
            .map(|(element, partners)| {
                (element.clone(), partners.iter().cloned().collect())
            })
            .collect();
        Self { allowed }
    }

    /// Whether the table carries an entry for `element`.
    #[must_use]
    pub fn contains(&self, element: &str) -> bool {
        self.allowed.contains_key(element)
    }

    /// Whether atoms of elements `a` and `b` may bond.
    #[must_use]
    pub fn eligible(&self, a: &str, b: &str) -> bool {
        let listed = |x: &str, y: &str| {
            self.allowed.get(x).is_some_and(|set| set.contains(y))
        };
        listed(a, b) || listed(b, a)
    }
}

/// A detected bond between two atoms, `atom_a < atom_b`.
///
/// Bonds are derived data with no identity across recomputation: changing
/// the cutoff rebuilds the whole set.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    /// Index of the first atom (always the smaller index).
    pub atom_a: usize,
    /// Index of the second atom.
    pub atom_b: usize,
    /// Position of the first atom.
    pub pos_a: DVec3,
    /// Position of the second atom.
    pub pos_b: DVec3,
}

/// Detect all bonds among `atoms` under `rules` and `cutoff`.
///
/// Every element present must have a rules entry before any scanning
/// happens; defaulting a missing entry to "no bonds" would silently corrupt
/// the output. A non-positive cutoff yields an empty set. Pairs exactly at
/// the cutoff are not bonded (strict inequality). Output is ordered by
/// ascending first index, then second, and is identical across repeated
/// calls with the same inputs.
///
/// # Errors
///
/// Returns [`VizError::UnknownElement`] when an atom's element has no rules
/// entry.
pub fn detect(
    atoms: &[Atom],
    rules: &BondRules,
    cutoff: f64,
) -> Result<Vec<Bond>, VizError> {
    for atom in atoms {
        if !rules.contains(&atom.element) {
            return Err(VizError::UnknownElement(atom.element.clone()));
        }
    }
    if cutoff <= 0.0 {
        return Ok(Vec::new());
    }

    // Each outer index owns its row of pairs; collecting the rows in index
    // order keeps the result identical to the sequential scan.
    let rows: Vec<Vec<Bond>> = (0..atoms.len())
        .into_par_iter()
        .map(|i| scan_row(atoms, rules, cutoff, i))
        .collect();

    Ok(rows.into_iter().flatten().collect())
}

/// All bonds whose smaller atom index is `i`, ordered by the second index.
fn scan_row(
    atoms: &[Atom],
    rules: &BondRules,
    cutoff: f64,
    i: usize,
) -> Vec<Bond> {
    let a = &atoms[i];
    let mut row = Vec::new();
    for (j, b) in atoms.iter().enumerate().skip(i + 1) {
        // Eligibility is the cheap check; only then pay for the distance.
        if !rules.eligible(&a.element, &b.element) {
            continue;
        }
        if a.position.distance(b.position) < cutoff {
            row.push(Bond {
                atom_a: i,
                atom_b: j,
                pos_a: a.position,
                pos_b: b.position,
            });
        }
    }
    row
}
