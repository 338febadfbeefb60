use nexus_check::parsing;
use nexus_check::validation::{self, Code, Columns, Position, Range, Severity, SourceIndex};

fn trim(s: &str) -> &str {
    s.strip_prefix('\n')
        .unwrap_or(s)
}

fn codes(content: &str) -> Vec<Code> {
    validation::check(content)
        .diagnostics
        .iter()
        .map(|diagnostic| diagnostic.code)
        .collect()
}

#[test]
fn flat_comments_are_balanced() {
    let content = "[a] x [b] 'quoted ]' [c]";
    assert!(codes(content).is_empty());
}

#[test]
fn nested_comments_are_balanced() {
    assert!(codes("[[[ ]]]").is_empty());
}

#[test]
fn one_extra_open_bracket() {
    let report = validation::check("  [[[ ]]");

    assert_eq!(
        report
            .diagnostics
            .len(),
        1
    );
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.code, Code::UnclosedComment);
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(
        diagnostic.range,
        Range {
            start: Position { line: 0, column: 2 },
            end: Position { line: 0, column: 3 },
        }
    );
}

#[test]
fn lone_closing_bracket() {
    let report = validation::check("ab\ncd ] [x]");

    assert_eq!(
        report
            .diagnostics
            .len(),
        1
    );
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.code, Code::UnexpectedClosingBracket);
    assert_eq!(
        diagnostic
            .range
            .start,
        Position { line: 1, column: 3 }
    );
}

#[test]
fn unclosed_quote_warns_at_end() {
    let report = validation::check("TAXLABELS 'Homo sapiens;\nEND;");

    assert_eq!(
        report
            .diagnostics
            .len(),
        1
    );
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.code, Code::UnclosedQuote);
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(
        diagnostic.range,
        Range {
            start: Position { line: 1, column: 3 },
            end: Position { line: 1, column: 4 },
        }
    );
    assert!(!report.has_errors());
}

#[test]
fn escaped_quotes_preserved() {
    assert_eq!(parsing::strip("'it''s'"), "it's");
    assert!(codes("'it''s [fine]'").is_empty());
}

#[test]
fn consistent_document() {
    let content = trim(
        r#"
#NEXUS
BEGIN DATA;
    DIMENSIONS NTAX=3 NCHAR=4;
    MATRIX
        A ACGT
        B AC-T
        C AC[ uncertain ]GT
    ;
END;
"#,
    );

    let report = validation::check(content);
    assert!(report
        .diagnostics
        .is_empty());
    assert!(report
        .highlights
        .is_empty());
}

#[test]
fn too_few_taxa() {
    let content = trim(
        r#"
#NEXUS
BEGIN DATA;
    DIMENSIONS NTAX=3;
    MATRIX
        A ACGT
        B ACGT
    ;
END;
"#,
    );

    let report = validation::check(content);
    assert_eq!(
        report
            .diagnostics
            .len(),
        1
    );

    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.code, Code::TaxaCountMismatch);
    assert!(diagnostic
        .message
        .contains('3'));
    assert!(diagnostic
        .message
        .contains('2'));

    // the range covers "NTAX=3"
    assert_eq!(
        diagnostic.range,
        Range {
            start: Position { line: 2, column: 15 },
            end: Position { line: 2, column: 21 },
        }
    );
}

#[test]
fn short_sequence() {
    let content = trim(
        r#"
#NEXUS
BEGIN DATA;
    DIMENSIONS NCHAR=5;
    MATRIX
        A AC [ two more ] GT
    ;
END;
"#,
    );

    let report = validation::check(content);
    assert_eq!(
        report
            .diagnostics
            .iter()
            .map(|diagnostic| (diagnostic.code, diagnostic.severity))
            .collect::<Vec<_>>(),
        vec![
            (Code::CharacterCountMismatch, Severity::Error),
            (Code::SequenceLengthMismatch, Severity::Warning),
        ]
    );

    let warning = &report.diagnostics[1];
    assert!(warning
        .message
        .contains("'A'"));
    assert!(warning
        .message
        .contains('4'));
    assert!(warning
        .message
        .contains('5'));

    // the whole row line
    assert_eq!(
        warning.range,
        Range {
            start: Position { line: 4, column: 0 },
            end: Position { line: 4, column: 28 },
        }
    );
}

#[test]
fn short_sequence_that_is_not_longest() {
    let content = "NCHAR=4\nMATRIX\nA ACGT\nB ACG\n;";

    let report = validation::check(content);
    assert_eq!(
        codes(content),
        vec![Code::SequenceLengthMismatch]
    );
    assert_eq!(
        report.diagnostics[0]
            .range
            .start,
        Position { line: 3, column: 0 }
    );
}

#[test]
fn interleaved_rows() {
    let content = trim(
        r#"
#NEXUS
BEGIN DATA;
    DIMENSIONS NTAX=2 NCHAR=8;
    MATRIX
        A ACGT
        B CCCC

        A TTTT
        B GGGG
    ;
END;
"#,
    );

    let (_, matrix) = parsing::parse(content);
    assert_eq!(matrix.taxa_count(), 2);
    assert_eq!(
        matrix
            .get("A")
            .unwrap()
            .sequence
            .as_str(),
        "ACGTTTTT"
    );
    assert_eq!(
        matrix
            .get("B")
            .unwrap()
            .sequence
            .as_str(),
        "CCCCGGGG"
    );

    assert!(codes(content).is_empty());
}

#[test]
fn interleaved_warning_at_latest_row() {
    let content = "NCHAR=8\nMATRIX\nA ACGT\nB CCCC\nA TTT\nB GGGG\n;";

    let report = validation::check(content);
    assert_eq!(
        report
            .diagnostics
            .len(),
        1
    );
    assert_eq!(
        report.diagnostics[0]
            .range
            .start
            .line,
        4
    );
}

#[test]
fn declarations_absent() {
    let content = "MATRIX\nA ACGT\nB AC\n;";
    assert!(codes(content).is_empty());

    let report = validation::check(content);
    assert_eq!(report.statistics.declared_taxa, None);
    assert_eq!(report.statistics.declared_characters, None);
    assert_eq!(report.statistics.taxa, 2);
    assert_eq!(report.statistics.max_sequence_length, 4);
}

#[test]
fn no_matrix_block() {
    let content = "#NEXUS\nBEGIN DATA;\n  DIMENSIONS NTAX=2 NCHAR=3;\nEND;\n";

    assert_eq!(
        codes(content),
        vec![Code::TaxaCountMismatch, Code::CharacterCountMismatch]
    );
}

#[test]
fn structural_and_count_problems_together() {
    let content = "NTAX=1 ]\nMATRIX\nA AC\nB AC\n;\n[";

    assert_eq!(
        codes(content),
        vec![
            Code::UnexpectedClosingBracket,
            Code::UnclosedComment,
            Code::TaxaCountMismatch,
        ]
    );
}

#[test]
fn validation_is_idempotent() {
    let content = "NTAX=3 NCHAR=5\nMATRIX\nA AC[x]GT\n'B C' ACG\n;\n]";

    let first = validation::check(content);
    let second = validation::check(content);
    assert_eq!(first, second);
}

#[test]
fn utf16_index_for_editors() {
    let content = "[é𝄞] ]";
    let index = SourceIndex::new(content, Columns::Utf16);

    let report = validation::validate(content, &index);
    assert_eq!(
        report.diagnostics[0]
            .range
            .start,
        Position { line: 0, column: 6 }
    );
}

#[test]
fn strip_round_trip() {
    assert_eq!(parsing::strip("AC[ comment ]GT  TT"), "ACGTTT");
}

#[test]
fn json_output() {
    let report = validation::check("]");
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["diagnostics"][0]["code"], "unexpected-closing-bracket");
    assert_eq!(json["diagnostics"][0]["severity"], "error");
    assert_eq!(json["diagnostics"][0]["range"]["start"]["column"], 0);
    assert_eq!(json["statistics"]["taxa"], 0);
}
