use nexus_check::validation::Code;

/// A longer explanation of each kind of diagnostic, shown beneath the source
/// excerpt in the full output format.
pub fn explanation(code: Code) -> &'static str {
    let text = match code {
        Code::UnexpectedClosingBracket => {
            r#"
Comments in NEXUS files are enclosed in square brackets and may be nested.
This ']' does not close any open comment. Either remove it or add the '['
that was meant to start the comment.
            "#
        }
        Code::UnclosedComment => {
            r#"
Comments in NEXUS files are enclosed in square brackets, [like this], and
may be nested. This '[' is never matched by a closing ']', so everything
from here to the end of the file is treated as comment, including any
MATRIX data that follows.
            "#
        }
        Code::UnclosedQuote => {
            r#"
Labels containing spaces or punctuation are enclosed in single quotes, with
a doubled quote '' standing for a literal one. A quote was opened but the
file ended before it was closed. Brackets inside quotes are not comments,
so an unclosed quote can hide other bracket errors.
            "#
        }
        Code::TaxaCountMismatch => {
            r#"
The NTAX value in the DIMENSIONS command must equal the number of distinct
taxa in the MATRIX block. In an interleaved matrix each taxon is counted
once no matter how many row groups it appears in.
            "#
        }
        Code::CharacterCountMismatch => {
            r#"
The NCHAR value in the DIMENSIONS command must equal the length of the
sequences in the MATRIX block. Comments and whitespace within the sequence
data do not count towards its length.
            "#
        }
        Code::SequenceLengthMismatch => {
            r#"
Every taxon in the MATRIX block should have exactly NCHAR characters once
comments and whitespace are removed. For an interleaved matrix this is the
total over all the row groups.
            "#
        }
    };

    text.trim_ascii()
}
