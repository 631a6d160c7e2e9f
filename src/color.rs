//! Deterministic per-element color assignment.
//!
//! Common elements use a fixed CPK-style reference palette; every other
//! element gets a procedurally generated color spread evenly over the hue
//! circle, enumerated in canonical atomic-number order so a symbol's color
//! never depends on which other symbols were requested.

use std::collections::HashMap;

use crate::elements::ELEMENTS;
use crate::error::VizError;

/// RGBA color, channels in `[0, 1]`.
pub type Rgba = [f32; 4];

/// Element symbol → color mapping for one loaded structure.
pub type ColorTable = HashMap<String, Rgba>;

/// CPK reference color for common elements.
///
/// Hand-picked ball-and-stick convention values, kept exactly as in the
/// palette this crate inherits (including Ru's zero alpha) for visual
/// continuity.
#[must_use]
pub fn cpk_color(symbol: &str) -> Option<Rgba> {
    let color = match symbol {
        "H" => [1.0, 1.0, 1.0, 1.0],    // White
        "C" => [0.5, 0.5, 0.5, 1.0],    // Grey
        "N" => [0.0, 0.0, 1.0, 1.0],    // Blue
        "O" => [1.0, 0.0, 0.0, 1.0],    // Red
        "F" => [0.0, 1.0, 0.0, 1.0],    // Green
        "Cl" => [0.0, 1.0, 0.0, 1.0],   // Green
        "Br" => [0.6, 0.2, 0.1, 1.0],   // Brown
        "I" => [0.4, 0.0, 0.7, 1.0],    // Dark purple
        "He" => [0.85, 1.0, 1.0, 1.0],  // Light cyan
        "Ne" => [0.7, 0.9, 0.9, 1.0],   // Light blue
        "Ar" => [0.5, 0.8, 0.9, 1.0],   // Light blue
        "P" => [1.0, 0.5, 0.0, 1.0],    // Orange
        "S" => [1.0, 0.8, 0.0, 1.0],    // Yellow
        "Li" => [0.7, 0.0, 0.0, 1.0],   // Burgundy red
        "Na" => [0.7, 0.0, 0.0, 1.0],   // Burgundy red
        "K" => [0.7, 0.0, 0.0, 1.0],    // Burgundy red
        "Mg" => [0.0, 0.6, 0.0, 1.0],   // Forest green
        "Ca" => [0.0, 0.6, 0.0, 1.0],   // Forest green
        "Fe" => [0.6, 0.5, 0.0, 1.0],   // Dark yellow
        "Si" => [0.7, 0.7, 0.7, 1.0],   // Light grey
        "Al" => [0.6, 0.8, 0.8, 1.0],   // Light blue
        "Ni" => [0.5, 0.5, 0.0, 1.0],   // Bronze
        "Cu" => [0.7, 0.1, 0.1, 1.0],   // Copper red
        "Zn" => [0.4, 0.4, 0.7, 1.0],   // Light purple
        "Ag" => [0.8, 0.8, 0.8, 1.0],   // Silver
        "Au" => [1.0, 0.8, 0.0, 1.0],   // Gold
        "Ru" => [1.0, 0.0, 0.0, 0.0],   // Red
        _ => return None,
    };
    Some(color)
}

/// Assign a color to every requested element symbol.
///
/// Symbols in the CPK reference table get the reference color. Every other
/// canonical element gets an HSV-generated color: the i-th non-CPK element
/// (in atomic-number order, out of `m` total) gets hue `i/m` with small
/// saturation/value jitter, alpha 1.0. Pure and deterministic: the same
/// symbol always maps to the same color.
///
/// # Errors
///
/// Returns [`VizError::UnknownElement`] for a symbol outside the canonical
/// 118-element vocabulary.
pub fn assign_colors(symbols: &[String]) -> Result<ColorTable, VizError> {
    // Enumerate the procedurally colored elements once; a symbol's slot in
    // this list fixes its hue regardless of the requested set.
    let generated: Vec<&str> = ELEMENTS
        .iter()
        .copied()
        .filter(|s| cpk_color(s).is_none())
        .collect();
    let m = generated.len();

    let mut table = ColorTable::with_capacity(symbols.len());
    for symbol in symbols {
        let color = if let Some(reference) = cpk_color(symbol) {
            reference
        } else if let Some(i) = generated.iter().position(|&s| s == symbol) {
            generated_color(i, m)
        } else {
            return Err(VizError::UnknownElement(symbol.clone()));
        };
        let _ = table.insert(symbol.clone(), color);
    }
    Ok(table)
}

/// Procedural color for the i-th non-CPK canonical element out of `m`.
fn generated_color(i: usize, m: usize) -> Rgba {
    let hue = i as f32 / m as f32;
    let saturation = 0.75 + (i % 3) as f32 * 0.08;
    let value = 0.80 + (i % 4) as f32 * 0.05;
    let [r, g, b] = hsv_to_rgb(hue, saturation, value);
    [r, g, b, 1.0]
}

/// Standard HSV → RGB sector conversion. `h` in `[0, 1)`, `s`/`v` in
/// `[0, 1]`.
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as i32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}
