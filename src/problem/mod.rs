// Presentation of diagnostics on the command line

mod format;
mod messages;

// Re-export all public symbols
pub use format::*;
