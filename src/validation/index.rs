//! Translation between byte offsets and line/column positions.

use serde::Serialize;

/// A zero-origin line and column. What a column counts depends on the
/// index that produced it; see [Columns].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Maps offsets into the validated text to presentable coordinates. Every
/// range in a diagnostic is obtained through this trait; hosts with their
/// own notion of lines can supply their own implementation.
pub trait LineIndex {
    /// Convert a byte offset into a line and column.
    fn offset_to_position(&self, offset: usize) -> Position;

    /// The byte offsets where the given line starts and ends, not including
    /// the line terminator.
    fn line_range(&self, line: usize) -> (usize, usize);
}

/// The unit in which [SourceIndex] measures columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Columns {
    Bytes,
    #[default]
    Characters,
    /// As required by the Language Server Protocol.
    Utf16,
}

/// A [LineIndex] over an in-memory string, built with one pass to find the
/// start of every line.
#[derive(Debug, Clone)]
pub struct SourceIndex<'i> {
    content: &'i str,
    starts: Vec<usize>,
    columns: Columns,
}

impl<'i> SourceIndex<'i> {
    pub fn new(content: &'i str, columns: Columns) -> SourceIndex<'i> {
        let mut starts = vec![0];
        starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );

        SourceIndex {
            content,
            starts,
            columns,
        }
    }

    pub fn line_count(&self) -> usize {
        self.starts
            .len()
    }

    /// The text of a line, without its terminator.
    pub fn line(&self, line: usize) -> &'i str {
        let (start, end) = self.line_range(line);
        &self.content[start..end]
    }

    // Pull an offset back inside the content and onto a character boundary.
    fn clamp(&self, offset: usize) -> usize {
        let mut offset = offset.min(
            self.content
                .len(),
        );
        while !self
            .content
            .is_char_boundary(offset)
        {
            offset -= 1;
        }
        offset
    }
}

impl LineIndex for SourceIndex<'_> {
    fn offset_to_position(&self, offset: usize) -> Position {
        let offset = self.clamp(offset);
        let line = self
            .starts
            .partition_point(|&start| start <= offset)
            - 1;
        let before = &self.content[self.starts[line]..offset];

        let column = match self.columns {
            Columns::Bytes => before.len(),
            Columns::Characters => before
                .chars()
                .count(),
            Columns::Utf16 => before
                .chars()
                .map(char::len_utf16)
                .sum(),
        };

        Position { line, column }
    }

    fn line_range(&self, line: usize) -> (usize, usize) {
        let line = line.min(self.line_count() - 1);
        let start = self.starts[line];
        let end = match self
            .starts
            .get(line + 1)
        {
            Some(next) => next - 1,
            None => self
                .content
                .len(),
        };

        let text = &self.content[start..end];
        let end = start
            + text
                .strip_suffix('\r')
                .unwrap_or(text)
                .len();

        (start, end)
    }
}
