// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Float comparison: geometry code compares against exact 0.0/1.0 sentinels
#![allow(clippy::float_cmp)]
// Palette/index math casts are intentional and range-checked
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

//! Structure-to-geometry pipeline for ball-and-stick atomic visualization.
//!
//! Atomviz turns a plain-text atomic structure file into the geometry a 3D
//! host application needs for a ball-and-stick rendering: spheres for atoms,
//! oriented cylinders for bonds, and a deterministic per-element color
//! table. The host itself (scene graph, materials, widgets) stays behind the
//! narrow [`host::SceneHost`] trait.
//!
//! # Key entry points
//!
//! - [`structure::Structure`] - parsed atom records
//! - [`bonds::detect`] - geometric bond inference from a rules table
//! - [`geometry::cylinder_between`] - oriented cylinder pose between points
//! - [`color::assign_colors`] - deterministic element color assignment
//! - [`engine::Visualizer`] - the orchestration layer driving a `SceneHost`
//!
//! # Architecture
//!
//! The core modules (`structure`, `bonds`, `geometry`, `color`) are pure
//! functions over value types: no host handles, no shared state, identical
//! output for identical input. All session state (loaded structure, color
//! table, handle indices, interactive settings) is owned by
//! [`engine::Visualizer`], which recomputes derived data wholesale when a
//! setting changes.

pub mod bonds;
pub mod color;
pub mod elements;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod host;
pub mod materials;
pub mod options;
pub mod structure;
