use crate::language::Span;

use super::diagnostic::{Code, Severity};

/// An inconsistency found in a document, recorded against byte offsets.
/// These are located into line/column Diagnostics as the last step of
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    UnexpectedClosingBracket(usize),
    UnclosedComment(usize),
    UnclosedQuote(usize, usize),
    TaxaMismatch(Span, usize, usize),
    CharacterMismatch(Span, usize, usize),
    SequenceLength(Span, String, usize, usize),
}

impl Problem {
    pub fn offset(&self) -> usize {
        match self {
            Problem::UnexpectedClosingBracket(offset) => *offset,
            Problem::UnclosedComment(offset) => *offset,
            Problem::UnclosedQuote(offset, _) => *offset,
            Problem::TaxaMismatch(span, _, _) => span.offset,
            Problem::CharacterMismatch(span, _, _) => span.offset,
            Problem::SequenceLength(span, _, _, _) => span.offset,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Problem::UnexpectedClosingBracket(_) => 1,
            Problem::UnclosedComment(_) => 1,
            Problem::UnclosedQuote(_, width) => *width,
            Problem::TaxaMismatch(span, _, _) => span.width,
            Problem::CharacterMismatch(span, _, _) => span.width,
            Problem::SequenceLength(span, _, _, _) => span.width,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Problem::UnclosedQuote(_, _) => Severity::Warning,
            Problem::SequenceLength(_, _, _, _) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn code(&self) -> Code {
        match self {
            Problem::UnexpectedClosingBracket(_) => Code::UnexpectedClosingBracket,
            Problem::UnclosedComment(_) => Code::UnclosedComment,
            Problem::UnclosedQuote(_, _) => Code::UnclosedQuote,
            Problem::TaxaMismatch(_, _, _) => Code::TaxaCountMismatch,
            Problem::CharacterMismatch(_, _, _) => Code::CharacterCountMismatch,
            Problem::SequenceLength(_, _, _, _) => Code::SequenceLengthMismatch,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Problem::UnexpectedClosingBracket(_) => {
                "Unexpected closing bracket ']' with no matching '['".to_string()
            }
            Problem::UnclosedComment(_) => "Unclosed comment: '[' is never closed".to_string(),
            Problem::UnclosedQuote(_, _) => {
                "Unclosed quote at end of document; this may hide other structural errors"
                    .to_string()
            }
            Problem::TaxaMismatch(_, declared, actual) => format!(
                "Taxa count mismatch: NTAX declared {}, matrix has {}",
                declared, actual
            ),
            Problem::CharacterMismatch(_, declared, actual) => format!(
                "Character count mismatch: NCHAR declared {}, longest sequence has {}",
                declared, actual
            ),
            Problem::SequenceLength(_, name, declared, actual) => format!(
                "Sequence length mismatch for taxon '{}': expected {} characters, found {}",
                name, declared, actual
            ),
        }
    }
}
