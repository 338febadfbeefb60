use regex::Regex;
use tracing::{debug, trace};

use crate::language::*;

fn ntax_pattern() -> &'static Regex {
    crate::compile!(r"(?i)NTAX\s*=\s*(\d+)")
}

fn nchar_pattern() -> &'static Regex {
    crate::compile!(r"(?i)NCHAR\s*=\s*(\d+)")
}

fn matrix_pattern() -> &'static Regex {
    crate::compile!(r"(?is)MATRIX(.*?);")
}

// A taxon name, either a quoted label (with '' standing for a literal
// quote) or a run of non-whitespace, then the rest of the row.
fn row_pattern() -> &'static Regex {
    crate::compile!(r"^\s*('(?:[^']|'')*'|\S+)\s+(.+)$")
}

/// Reads the header counts and the MATRIX block out of a NEXUS document.
///
/// Nothing here fails: a missing declaration is simply absent from the
/// Metadata, a missing MATRIX block gives an empty Matrix, and rows that do
/// not look like `name sequence` are skipped. Documents being edited are
/// incomplete most of the time, and inconsistencies show up later as count
/// or length mismatches instead.
#[derive(Debug)]
pub struct Parser<'i> {
    original: &'i str,
}

impl<'i> Parser<'i> {
    pub fn new() -> Parser<'i> {
        Parser { original: "" }
    }

    pub fn initialize(&mut self, content: &'i str) {
        self.original = content;
    }

    /// Find the first NTAX and NCHAR declarations.
    pub fn read_metadata(&self) -> Metadata {
        Metadata {
            taxa: self.read_declaration(ntax_pattern()),
            characters: self.read_declaration(nchar_pattern()),
        }
    }

    fn read_declaration(&self, pattern: &Regex) -> Option<Declaration> {
        let captures = pattern.captures(self.original)?;
        let whole = captures.get(0)?;
        let digits = captures.get(1)?;

        match digits
            .as_str()
            .parse::<usize>()
        {
            Ok(value) => Some(Declaration {
                value,
                span: Span::new(whole.start(), whole.len()),
            }),
            Err(error) => {
                debug!("Ignoring declaration {:?}: {}", whole.as_str(), error);
                None
            }
        }
    }

    /// Locate the body of the first MATRIX block, returning its offset in
    /// the document along with the text between the keyword and the
    /// terminating semicolon.
    pub fn find_matrix(&self) -> Option<(usize, &'i str)> {
        let captures = matrix_pattern().captures(self.original)?;
        let body = captures.get(1)?;
        Some((body.start(), body.as_str()))
    }

    /// Build the Matrix from the rows of the MATRIX block.
    pub fn read_matrix(&self) -> Matrix {
        let mut matrix = Matrix::new();

        let (start, body) = match self.find_matrix() {
            Some(found) => found,
            None => {
                debug!("No MATRIX block found");
                return matrix;
            }
        };

        let mut offset = start;
        for line in body.split('\n') {
            let lead = line.len()
                - line
                    .trim_start()
                    .len();
            let text = line.trim();

            if !is_skippable(text) {
                match read_row(text) {
                    Some((name, raw)) => {
                        let span = Span::new(offset + lead, text.len());
                        trace!("Row for {:?} at {}", name, span.offset);
                        matrix.insert(name, Sequence::from_raw(raw), span);
                    }
                    None => {
                        trace!("Skipping non-row line {:?}", text);
                    }
                }
            }

            offset += line.len() + 1;
        }

        matrix
    }
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Parser::new()
    }
}

fn is_skippable(text: &str) -> bool {
    text.is_empty() || text.starts_with('[') || text == ";"
}

/// Split a row into its taxon name and the raw, still commented, sequence
/// text that follows it.
pub fn read_row(text: &str) -> Option<(String, &str)> {
    let captures = row_pattern().captures(text)?;
    let name = captures.get(1)?;
    let raw = captures.get(2)?;
    Some((decode_label(name.as_str()), raw.as_str()))
}

/// Remove the surrounding quotes from a quoted label and collapse escaped
/// quotes. Unquoted names are returned as-is.
pub fn decode_label(name: &str) -> String {
    match name
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
    {
        Some(inner) if name.len() >= 2 => inner.replace("''", "'"),
        _ => name.to_string(),
    }
}
