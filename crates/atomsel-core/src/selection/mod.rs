//! # Selection Module
//!
//! The atom-selection language: text such as `protein and name CA` or
//! `around 5 resname LIG` is parsed into an [`Expr`] tree and evaluated against
//! an [`AtomCollection`](crate::core::models::group::AtomCollection), yielding
//! an [`AtomGroup`](crate::core::models::group::AtomGroup) in ascending atom
//! number order.
//!
//! ## Key Components
//!
//! - [`token`] - Whitespace tokenizer and the keyword table
//! - [`parser`] - Precedence-climbing parser producing [`Selection`]s
//! - [`expr`] - The expression tree, its text form and operator overloads
//! - [`eval`] - [`Selection`] and the set-based evaluator
//! - [`cache`] - Results keyed by selection and group identity
//! - [`config`] - Parser and evaluator settings, loadable from TOML
//! - [`error`] - Parse and usage errors
//!
//! ## Grammar
//!
//! | Form | Meaning |
//! |------|---------|
//! | `all` | every atom of the group |
//! | `not E`, `E and E`, `E or E`, `( E )` | set complement, intersection, union |
//! | `name V`, `type V`, `resname V`, `segid V` | attribute match; `V*` matches by prefix |
//! | `resid N`, `resid N:M`, `resid N-M` | residue number or inclusive range |
//! | `bynum N`, `bynum N:M` | 1-based positions within the group |
//! | `atom SEGID RESID NAME` | one atom by exact identity |
//! | `prop [abs] FIELD OP VALUE` | compare `x`, `y`, `z`, `mass` or `charge` |
//! | `around CUTOFF E` | atoms within `CUTOFF` of `E`, excluding `E` |
//! | `point CUTOFF X Y Z` | atoms within `CUTOFF` of a position |
//! | `byres E` | whole residues of `E` |
//! | `bonded E` | bond partners of `E` |
//! | `protein`, `backbone` | built-in residue and atom-name tables |
//!
//! ## Usage
//!
//! ```ignore
//! use atomsel::selection::Selection;
//!
//! let selection = Selection::parse("protein and name CA")?;
//! let alpha_carbons = selection.apply(&structure)?;
//! let nearby = Selection::parse("around 5 name CA")?.apply(&alpha_carbons)?;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod eval;
pub mod expr;
pub mod parser;
pub mod token;

pub use cache::SelectionCache;
pub use config::{ConfigError, SelectionConfig, SelectionConfigBuilder};
pub use error::{ParseError, SelectionError, UsageError};
pub use eval::Selection;
pub use expr::Expr;
pub use parser::SelectionParser;
