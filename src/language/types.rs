//! Types representing the data extracted from a NEXUS document

use std::collections::HashMap;
use std::fmt;

/// A region of the source text, as a byte offset and a width in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub offset: usize,
    pub width: usize,
}

impl Span {
    pub fn new(offset: usize, width: usize) -> Span {
        Span { offset, width }
    }

    pub fn end(&self) -> usize {
        self.offset + self.width
    }
}

/// The cleaned character data for a taxon. Never holds comment text, quote
/// delimiters, or whitespace; those are removed by the scanner before any
/// character arrives here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence(String);

impl Sequence {
    pub fn new() -> Sequence {
        Sequence(String::new())
    }

    /// Build a Sequence from raw row text, stripping comments, structural
    /// quotes, and whitespace.
    pub fn from_raw(raw: &str) -> Sequence {
        Sequence(crate::parsing::strip(raw))
    }

    pub fn push(&mut self, c: char) {
        if !c.is_whitespace() {
            self.0
                .push(c);
        }
    }

    pub fn append(&mut self, other: &Sequence) {
        self.0
            .push_str(&other.0);
    }

    /// Number of characters, counted afresh every time.
    pub fn len(&self) -> usize {
        self.0
            .chars()
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.0
            .is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named row (or rows, for interleaved data) of the MATRIX block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxon {
    pub name: String,
    pub sequence: Sequence,
    /// Spans of every row that contributed to this taxon, in document order.
    pub rows: Vec<Span>,
}

impl Taxon {
    pub fn new(name: String, sequence: Sequence, row: Span) -> Taxon {
        Taxon {
            name,
            sequence,
            rows: vec![row],
        }
    }

    /// Continue this taxon with the data from a later row group.
    pub fn extend(&mut self, sequence: &Sequence, row: Span) {
        self.sequence
            .append(sequence);
        self.rows
            .push(row);
    }

    /// The row most recently matched for this taxon. This is where a length
    /// mismatch gets reported.
    pub fn span(&self) -> Span {
        self.rows
            .last()
            .copied()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sequence
            .len()
    }
}

/// The taxa found in a MATRIX block, in the order they were first seen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Matrix {
    taxa: Vec<Taxon>,
    names: HashMap<String, usize>,
}

impl Matrix {
    pub fn new() -> Matrix {
        Matrix::default()
    }

    /// Add a row. A name seen before has its sequence extended in place,
    /// which is how interleaved matrices come back together.
    pub fn insert(&mut self, name: String, sequence: Sequence, row: Span) {
        match self
            .names
            .get(&name)
        {
            Some(&index) => {
                self.taxa[index].extend(&sequence, row);
            }
            None => {
                self.names
                    .insert(name.clone(), self.taxa.len());
                self.taxa
                    .push(Taxon::new(name, sequence, row));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Taxon> {
        self.names
            .get(name)
            .map(|&index| &self.taxa[index])
    }

    pub fn taxa(&self) -> impl Iterator<Item = &Taxon> {
        self.taxa
            .iter()
    }

    pub fn taxa_count(&self) -> usize {
        self.taxa
            .len()
    }

    pub fn max_sequence_length(&self) -> usize {
        self.taxa
            .iter()
            .map(Taxon::len)
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.taxa
            .is_empty()
    }
}

/// A count declared in the header, such as `NTAX=4`, along with where the
/// declaration text sits in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    pub value: usize,
    pub span: Span,
}

/// The header counts honoured during validation. Either may be absent, in
/// which case the corresponding cross-check is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metadata {
    pub taxa: Option<Declaration>,
    pub characters: Option<Declaration>,
}
