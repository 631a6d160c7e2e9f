//! Crate-level error types.

use std::fmt;

use glam::DVec3;

/// Errors produced by the atomviz crate.
#[derive(Debug)]
pub enum VizError {
    /// Structure text could not be parsed (count mismatch, missing line,
    /// non-numeric field).
    MalformedInput(String),
    /// Element symbol outside the closed color/bonding vocabulary, or
    /// missing from the materials table.
    UnknownElement(String),
    /// Bond endpoints coincide; the cylinder orientation is undefined.
    DegenerateBond(DVec3),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Materials JSON parsing failure.
    RulesParse(String),
    /// Options TOML parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for VizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput(msg) => {
                write!(f, "malformed structure input: {msg}")
            }
            Self::UnknownElement(symbol) => {
                write!(f, "unknown element symbol: {symbol}")
            }
            Self::DegenerateBond(p) => {
                write!(f, "degenerate bond: coincident endpoints at {p}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::RulesParse(msg) => {
                write!(f, "materials parse error: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for VizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VizError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
