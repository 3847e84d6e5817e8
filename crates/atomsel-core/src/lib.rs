//! # atomsel Core Library
//!
//! An atom-selection language for molecular structures: short queries such as
//! `protein and name CA` or `byres around 5 resname LIG` are parsed into
//! expression trees and evaluated into ordered groups of atoms.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Atom records, structures, coordinate tables,
//!   unit cells and bonds, plus the distance routines and residue tables the
//!   evaluator relies on.
//!
//! - **[`selection`]: The Logic Core.** Tokenizer, precedence-climbing parser,
//!   the expression tree, the set-based evaluator, result caching and settings.
//!
//! - **[`workflows`]: The Public API.** One-call selection and the long-lived
//!   [`workflows::select::Selector`] that compiles and caches selections.

pub mod core;
pub mod selection;
pub mod workflows;
