//! Cross-checking a NEXUS document and reporting located diagnostics

mod diagnostic;
mod index;
mod problem;
mod validator;

// Re-export all public symbols
pub use diagnostic::*;
pub use index::*;
pub use problem::*;
pub use validator::*;
