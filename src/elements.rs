//! Canonical periodic-table ordering of element symbols.
//!
//! Color generation enumerates element symbols in a fixed order so the same
//! symbol always lands on the same procedural color. The order used is
//! standard atomic-number order; anything outside this list is not a valid
//! element symbol for this crate.

/// The 118 element symbols in atomic-number order.
pub const ELEMENTS: [&str; 118] = [
    "H", "He", //
    "Li", "Be", "B", "C", "N", "O", "F", "Ne", //
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", //
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr", //
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", //
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy",
    "Ho", "Er", "Tm", "Yb", "Lu", //
    "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi",
    "Po", "At", "Rn", //
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf",
    "Es", "Fm", "Md", "No", "Lr", //
    "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc",
    "Lv", "Ts", "Og",
];

/// Atomic number (1-based) for a symbol, or `None` if the symbol is not a
/// known element.
#[must_use]
pub fn atomic_number(symbol: &str) -> Option<u32> {
    ELEMENTS
        .iter()
        .position(|&s| s == symbol)
        .map(|i| i as u32 + 1)
}

/// Whether `symbol` is one of the 118 canonical element symbols.
#[must_use]
pub fn is_known(symbol: &str) -> bool {
    atomic_number(symbol).is_some()
}
