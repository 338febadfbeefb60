use tracing::{debug, info};

use crate::language::{Matrix, Metadata};
use crate::parsing::{self, Balance};

use super::diagnostic::*;
use super::index::{Columns, LineIndex, SourceIndex};
use super::problem::Problem;

/// Validate a document, locating every problem through the supplied index.
///
/// The checks are independent of one another: bracket and quote balance
/// over the whole text, then the declared NTAX and NCHAR against what the
/// MATRIX block actually contains. Declarations that are missing simply
/// skip their check.
pub fn validate(content: &str, index: &impl LineIndex) -> Report {
    let balance = parsing::balance(content);
    let (metadata, matrix) = parsing::parse(content);

    let mut problems = structural_problems(content, &balance);
    problems.extend(count_problems(&metadata, &matrix));

    debug!("{} problem{}", problems.len(), if problems.len() == 1 { "" } else { "s" });

    let diagnostics = problems
        .iter()
        .map(|problem| locate(problem, index))
        .collect();

    let highlights = balance
        .outermost_unclosed()
        .map(|offset| Highlight {
            range: Range {
                start: index.offset_to_position(offset),
                end: index.offset_to_position(content.len()),
            },
            message: "Commented out until end of document".to_string(),
        })
        .into_iter()
        .collect();

    let statistics = Statistics {
        declared_taxa: metadata
            .taxa
            .map(|declaration| declaration.value),
        declared_characters: metadata
            .characters
            .map(|declaration| declaration.value),
        taxa: matrix.taxa_count(),
        max_sequence_length: matrix.max_sequence_length(),
    };

    info!("{}", statistics);

    Report {
        diagnostics,
        highlights,
        statistics,
    }
}

/// Validate a document with columns counted in characters, which is what
/// a person reading the file expects.
pub fn check(content: &str) -> Report {
    let index = SourceIndex::new(content, Columns::Characters);
    validate(content, &index)
}

/// Problems with bracket and quote balance. Unexpected closing brackets
/// come first in document order, then unclosed comments outermost first,
/// then an unterminated quote.
pub fn structural_problems(content: &str, balance: &Balance) -> Vec<Problem> {
    let mut problems = Vec::new();

    for &offset in &balance.unexpected {
        problems.push(Problem::UnexpectedClosingBracket(offset));
    }

    for &offset in &balance.unclosed {
        problems.push(Problem::UnclosedComment(offset));
    }

    if balance.unclosed_quote {
        if let Some((offset, c)) = content
            .char_indices()
            .next_back()
        {
            problems.push(Problem::UnclosedQuote(offset, c.len_utf8()));
        }
    }

    problems
}

/// Problems comparing the declared header counts against the matrix.
pub fn count_problems(metadata: &Metadata, matrix: &Matrix) -> Vec<Problem> {
    let mut problems = Vec::new();

    if let Some(declared) = metadata.taxa {
        let actual = matrix.taxa_count();
        if declared.value != actual {
            problems.push(Problem::TaxaMismatch(declared.span, declared.value, actual));
        }
    }

    if let Some(declared) = metadata.characters {
        let actual = matrix.max_sequence_length();
        if declared.value != actual {
            problems.push(Problem::CharacterMismatch(
                declared.span,
                declared.value,
                actual,
            ));
        }

        for taxon in matrix.taxa() {
            let length = taxon.len();
            if length != declared.value {
                problems.push(Problem::SequenceLength(
                    taxon.span(),
                    taxon
                        .name
                        .clone(),
                    declared.value,
                    length,
                ));
            }
        }
    }

    problems
}

/// Turn an offset-based Problem into a Diagnostic with line/column range.
/// Sequence length warnings cover the whole line of the offending row.
pub fn locate(problem: &Problem, index: &impl LineIndex) -> Diagnostic {
    let range = match problem {
        Problem::SequenceLength(span, _, _, _) => {
            let line = index
                .offset_to_position(span.offset)
                .line;
            let (start, end) = index.line_range(line);
            Range {
                start: index.offset_to_position(start),
                end: index.offset_to_position(end),
            }
        }
        _ => {
            let offset = problem.offset();
            Range {
                start: index.offset_to_position(offset),
                end: index.offset_to_position(offset + problem.width()),
            }
        }
    };

    Diagnostic {
        range,
        severity: problem.severity(),
        code: problem.code(),
        message: problem.message(),
    }
}
