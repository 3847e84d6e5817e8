//! # Core Models Module
//!
//! The in-memory representation of a molecular structure that selections are
//! evaluated against.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom records (name, type, residue, segment, mass, charge)
//! - [`structure`] - The full atom list with coordinates, unit cell and bonds
//! - [`group`] - Ordered atom sub-groups and the [`group::AtomCollection`] capability
//! - [`coordinates`] - Position table addressed by atom number
//! - [`cell`] - Periodic unit-cell dimensions
//! - [`topology`] - Bonds between atoms
//! - [`ids`] - Process-unique identities for structures and selections
//!
//! ## Usage
//!
//! ```ignore
//! use atomsel::core::models::{atom::Atom, structure::Structure};
//! use nalgebra::Point3;
//!
//! let mut structure = Structure::new();
//! let ca = structure.add_atom(Atom::new("CA", "ALA", 1, "A"), Point3::new(0.0, 0.0, 0.0));
//! let cb = structure.add_atom(Atom::new("CB", "ALA", 1, "A"), Point3::new(1.5, 0.0, 0.0));
//! structure.add_bond(ca, cb);
//! ```

pub mod atom;
pub mod cell;
pub mod coordinates;
pub mod group;
pub mod ids;
pub mod structure;
pub mod topology;

#[cfg(test)]
pub(crate) mod test_utils;
