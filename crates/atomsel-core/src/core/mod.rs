//! # Core Module
//!
//! The foundation layer: the data model a selection is evaluated against and
//! the stateless helpers the evaluator relies on.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, structures, atom groups,
//!   coordinates, unit cells and bonds
//! - **Utilities** ([`utils`]) - Residue/atom-name tables and distance routines
//!
//! Nothing in this module knows about the selection language itself; it only
//! exposes "all atoms", "coordinates for these atoms", "unit-cell dimensions"
//! and "pairwise distances".

pub mod models;
pub mod utils;
