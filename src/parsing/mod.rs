//! Scanning and parsing of NEXUS documents

use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::language::{LoadingError, Matrix, Metadata};

pub mod parser;
mod scanner;

pub use scanner::{balance, strip, Balance, Scanner, Token};

/// Read a file and return an owned String. A filename of "-" reads from
/// standard input instead.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    if filename.to_str() == Some("-") {
        let mut content = String::new();
        return match std::io::stdin().read_to_string(&mut content) {
            Ok(_) => Ok(content),
            Err(error) => {
                debug!(?error);
                Err(LoadingError {
                    problem: "Failed reading standard input".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                })
            }
        };
    }

    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse the header declarations and the MATRIX block of a document.
pub fn parse(content: &str) -> (Metadata, Matrix) {
    let mut input = parser::Parser::new();
    input.initialize(content);

    let metadata = input.read_metadata();
    let matrix = input.read_matrix();

    debug!(
        "Found {} tax{}",
        matrix.taxa_count(),
        if matrix.taxa_count() == 1 { "on" } else { "a" }
    );

    (metadata, matrix)
}
