use serde::Serialize;
use std::fmt;

use super::index::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Stable identifier for each kind of problem, suitable for editors and
/// machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Code {
    UnexpectedClosingBracket,
    UnclosedComment,
    UnclosedQuote,
    TaxaCountMismatch,
    CharacterCountMismatch,
    SequenceLengthMismatch,
}

impl Code {
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::UnexpectedClosingBracket => "unexpected-closing-bracket",
            Code::UnclosedComment => "unclosed-comment",
            Code::UnclosedQuote => "unclosed-quote",
            Code::TaxaCountMismatch => "taxa-count-mismatch",
            Code::CharacterCountMismatch => "character-count-mismatch",
            Code::SequenceLengthMismatch => "sequence-length-mismatch",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// A located problem, ready to hand to whatever is presenting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: Severity,
    pub code: Code,
    pub message: String,
}

/// A region to draw attention to that is not itself a diagnostic: the text
/// swallowed by a comment that never closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub range: Range,
    pub message: String,
}

/// Counts gathered during a validation pass. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Statistics {
    pub declared_taxa: Option<usize>,
    pub declared_characters: Option<usize>,
    pub taxa: usize,
    pub max_sequence_length: usize,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn declared(value: Option<usize>) -> String {
            match value {
                Some(value) => value.to_string(),
                None => "-".to_string(),
            }
        }

        write!(
            f,
            "NTAX {} (found {}), NCHAR {} (longest {})",
            declared(self.declared_taxa),
            self.taxa,
            declared(self.declared_characters),
            self.max_sequence_length
        )
    }
}

/// Everything produced by one validation pass. Each pass yields a complete
/// replacement for the previous one; nothing is carried over.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Report {
    pub diagnostics: Vec<Diagnostic>,
    pub highlights: Vec<Highlight>,
    pub statistics: Statistics,
}

impl Report {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    }
}
