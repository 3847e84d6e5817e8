//! # Workflows Module
//!
//! High-level entry points that tie the selection language to molecular
//! structures.
//!
//! ## Overview
//!
//! - [`select::select`] - Parse and apply a selection in a single call.
//! - [`select::Selector`] - A configured parser with a result cache, for code
//!   that runs the same selections repeatedly (e.g. once per trajectory frame).

pub mod select;
