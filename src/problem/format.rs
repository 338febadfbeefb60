use super::messages::explanation;
use owo_colors::OwoColorize;
use std::path::Path;
use nexus_check::language::LoadingError;
use nexus_check::validation::{Columns, Diagnostic, Severity, SourceIndex};

fn label(severity: Severity) -> String {
    match severity {
        Severity::Error => "error"
            .bright_red()
            .to_string(),
        Severity::Warning => "warning"
            .bright_yellow()
            .to_string(),
    }
}

/// Format a diagnostic with full details including source code context
pub fn full_diagnostic<'i>(diagnostic: &Diagnostic, filename: &'i Path, source: &'i str) -> String {
    let index = SourceIndex::new(source, Columns::Characters);

    let start = diagnostic
        .range
        .start;
    let code = index.line(start.line);
    let line = start.line + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    // underline to the end of the range if it stays on this line
    let end = diagnostic
        .range
        .end;
    let span = if end.line == start.line && end.column > start.column {
        end.column - start.column
    } else {
        1
    };
    let carets = "^".repeat(span);
    let indent = " ".repeat(start.column);

    format!(
        r#"
{}: {}:{}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {}{}

{}
        "#,
        label(diagnostic.severity),
        filename.to_string_lossy(),
        line,
        start.column + 1,
        diagnostic
            .message
            .bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        indent,
        carets.bright_red(),
        explanation(diagnostic.code)
    )
    .trim_ascii()
    .to_string()
}

/// Format a diagnostic with concise single-line output
pub fn concise_diagnostic<'i>(diagnostic: &Diagnostic, filename: &'i Path) -> String {
    let start = diagnostic
        .range
        .start;

    format!(
        "{}: {}:{}:{} {}",
        label(diagnostic.severity),
        filename.to_string_lossy(),
        start.line + 1,
        start.column + 1,
        diagnostic
            .message
            .bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .to_string()
            .bold()
    )
}

#[cfg(test)]
mod check {
    use super::*;
    use nexus_check::validation;

    #[test]
    fn concise_location_is_one_origin() {
        let source = "#NEXUS\nBEGIN DATA; DIMENSIONS NTAX=3;\nMATRIX\nA AC\nB AC\n;\nEND;\n";
        let report = validation::check(source);
        assert_eq!(
            report
                .diagnostics
                .len(),
            1
        );

        let result = concise_diagnostic(&report.diagnostics[0], Path::new("test.nex"));
        assert!(result.contains("test.nex:2:24"));
        assert!(result.contains("NTAX declared 3, matrix has 2"));
    }

    #[test]
    fn full_includes_source_line() {
        let source = "[ unclosed\n";
        let report = validation::check(source);

        let result = full_diagnostic(&report.diagnostics[0], Path::new("test.nex"), source);
        assert!(result.contains("test.nex:1:1"));
        assert!(result.contains("[ unclosed"));
        assert!(result.contains("square brackets"));
    }
}
