//! Helper tables and numerical routines shared by the selection evaluator.
//!
//! - [`identifiers`] - Static residue-name and atom-name tables (protein, backbone)
//! - [`distances`] - Pairwise distances, minimum-image wrapping and cutoff queries

pub mod distances;
pub mod identifiers;
