//! GEDCOM domain: parsing, record types, and normalization
//!
//! This module contains the ingestion pipeline for GEDCOM source files.
//! It is split into submodules for better organization:
//! - `node`: generic hierarchical node tree, the tag-agnostic parser output
//! - `parser`: line-level parser reconstructing the tree from level numbers
//! - `dates`: GEDCOM date string parsing
//! - `records`: flat typed records (`Individual`, `Family`) and the `Dataset`
//! - `normalize`: walks the node tree and extracts the typed records

mod dates;
mod node;
mod normalize;
mod parser;
mod records;

// Re-export all public types
pub use dates::{parse_event_date, parse_loose_date};
pub use node::GedcomNode;
pub use normalize::normalize;
pub use parser::parse;
pub use records::{Dataset, Family, Individual, decorate_xref, strip_xref};
