//! Atomic structure records and XYZ-style parsing.
//!
//! The accepted format is the classic XYZ layout: an integer atom count on
//! the first line, one header/comment line (content ignored), then one
//! `element x y z` record per atom. Coordinates pass through unchanged; no
//! unit or coordinate-system validation is performed.

use std::path::Path;

use glam::DVec3;

use crate::error::VizError;

/// A single atom record: element symbol plus Cartesian position.
///
/// Atoms are immutable once parsed and identified by their index in the
/// parsed sequence (file order).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Element symbol as written in the file, e.g. `"H"` or `"Fe"`.
    pub element: String,
    /// Position in the file's coordinate system.
    pub position: DVec3,
}

/// A parsed structure: the atom sequence in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Structure {
    /// Atoms in file order.
    pub atoms: Vec<Atom>,
}

impl Structure {
    /// Parse structure text.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::MalformedInput`] when the count line is missing
    /// or non-integer, the header line is absent, fewer data lines exist
    /// than declared, or a coordinate/element field is missing or
    /// non-numeric. Lines beyond the declared count are ignored.
    pub fn parse(contents: &str) -> Result<Self, VizError> {
        let mut lines = contents.lines();

        let count_line = lines
            .next()
            .ok_or_else(|| malformed("empty structure file"))?;
        let count: usize = count_line.trim().parse().map_err(|_| {
            malformed(format!("invalid atom count line {count_line:?}"))
        })?;

        // The header line carries no data but must be present; a file that
        // ends here is indistinguishable from a truncated one.
        let _header = lines
            .next()
            .ok_or_else(|| malformed("missing header line"))?;

        // The declared count is untrusted input; cap the pre-allocation and
        // let the loop below report any shortfall as a count mismatch.
        let mut atoms = Vec::with_capacity(count.min(1024));
        for index in 0..count {
            let line = lines.next().ok_or_else(|| {
                malformed(format!(
                    "declared {count} atoms but only {index} data lines found"
                ))
            })?;
            atoms.push(parse_atom_line(line, index)?);
        }

        Ok(Self { atoms })
    }

    /// Read and parse a structure file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Io`] on read failure, otherwise as
    /// [`Self::parse`].
    pub fn load(path: &Path) -> Result<Self, VizError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Distinct element symbols in first-appearance order.
    #[must_use]
    pub fn distinct_elements(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for atom in &self.atoms {
            if !seen.iter().any(|e| e == &atom.element) {
                seen.push(atom.element.clone());
            }
        }
        seen
    }
}

fn parse_atom_line(line: &str, index: usize) -> Result<Atom, VizError> {
    let mut fields = line.split_whitespace();

    let element = fields.next().ok_or_else(|| {
        malformed(format!("atom {index}: missing element symbol"))
    })?;

    let mut coord = |axis: char| -> Result<f64, VizError> {
        let field = fields.next().ok_or_else(|| {
            malformed(format!("atom {index}: missing {axis} coordinate"))
        })?;
        field.parse::<f64>().map_err(|_| {
            malformed(format!(
                "atom {index}: non-numeric {axis} coordinate {field:?}"
            ))
        })
    };

    let x = coord('x')?;
    let y = coord('y')?;
    let z = coord('z')?;

    Ok(Atom {
        element: element.to_owned(),
        position: DVec3::new(x, y, z),
    })
}

fn malformed(msg: impl Into<String>) -> VizError {
    VizError::MalformedInput(msg.into())
}
