// Types representing the contents of a NEXUS document

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
