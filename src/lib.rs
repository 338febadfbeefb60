//! Validation of NEXUS phylogenetic data files.
//!
//! The library is a pure function from document text to a list of located
//! diagnostics: bracket and quote balance, and the declared NTAX and NCHAR
//! counts against what the MATRIX block holds.

pub mod language;
pub mod parsing;
pub mod regex;
pub mod validation;
