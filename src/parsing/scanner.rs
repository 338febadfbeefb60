//! Character scanner tracking NEXUS comment depth and quoted labels.
//!
//! NEXUS comments are delimited by square brackets and may nest, while
//! single-quoted labels may contain brackets that are just data. Both the
//! whole-document balance check and the per-row stripping of comments out of
//! sequence data are driven by the same state machine here, so they can never
//! disagree about what is a comment.

use std::iter::Peekable;
use std::str::CharIndices;

/// What the scanner decided about one character (or, for an escaped quote,
/// a pair of characters) of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Content outside any comment. This includes the text of quoted labels
    /// and the single `'` an escaped `''` pair stands for.
    Data(char),
    /// Content inside a comment.
    Comment(char),
    /// A quote opening or closing a quoted label.
    Quote,
    /// A `[` opening a comment, possibly nested.
    Open,
    /// A `]` closing the innermost open comment.
    Close,
    /// A `]` with no comment open.
    Stray,
}

/// Iterator over `(offset, Token)` pairs. Offsets are byte offsets into the
/// scanned text.
#[derive(Debug, Clone)]
pub struct Scanner<'i> {
    chars: Peekable<CharIndices<'i>>,
    depth: usize,
    quoted: bool,
}

impl<'i> Scanner<'i> {
    pub fn new(content: &'i str) -> Scanner<'i> {
        Scanner {
            chars: content
                .char_indices()
                .peekable(),
            depth: 0,
            quoted: false,
        }
    }

    /// Current comment nesting depth; zero means outside any comment.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the scanner is currently inside a quoted label.
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }
}

impl<'i> Iterator for Scanner<'i> {
    type Item = (usize, Token);

    fn next(&mut self) -> Option<Self::Item> {
        let (offset, c) = self
            .chars
            .next()?;

        let token = match c {
            '\'' if self.quoted => {
                if let Some(&(_, '\'')) = self
                    .chars
                    .peek()
                {
                    self.chars
                        .next();
                    if self.depth > 0 {
                        Token::Comment('\'')
                    } else {
                        Token::Data('\'')
                    }
                } else {
                    self.quoted = false;
                    Token::Quote
                }
            }
            '\'' => {
                self.quoted = true;
                Token::Quote
            }
            '[' if !self.quoted => {
                self.depth += 1;
                Token::Open
            }
            ']' if !self.quoted => {
                if self.depth > 0 {
                    self.depth -= 1;
                    Token::Close
                } else {
                    Token::Stray
                }
            }
            c if self.depth > 0 => Token::Comment(c),
            c => Token::Data(c),
        };

        Some((offset, token))
    }
}

/// The outcome of scanning a whole document for structural balance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Balance {
    /// Offsets of every `]` that had no comment to close.
    pub unexpected: Vec<usize>,
    /// Offsets of every `[` still open at the end, outermost first.
    pub unclosed: Vec<usize>,
    /// Whether the document ended inside a quoted label.
    pub unclosed_quote: bool,
}

impl Balance {
    pub fn is_balanced(&self) -> bool {
        self.unexpected
            .is_empty()
            && self
                .unclosed
                .is_empty()
            && !self.unclosed_quote
    }

    /// Offset of the outermost comment left open, if any.
    pub fn outermost_unclosed(&self) -> Option<usize> {
        self.unclosed
            .first()
            .copied()
    }
}

/// Scan the entire document, recording unmatched brackets and whether a
/// quoted label was left open.
pub fn balance(content: &str) -> Balance {
    let mut scanner = Scanner::new(content);
    let mut unexpected = Vec::new();
    let mut stack = Vec::new();

    for (offset, token) in scanner.by_ref() {
        match token {
            Token::Open => stack.push(offset),
            Token::Close => {
                stack.pop();
            }
            Token::Stray => unexpected.push(offset),
            _ => {}
        }
    }

    Balance {
        unexpected,
        unclosed: stack,
        unclosed_quote: scanner.is_quoted(),
    }
}

/// Remove comments, quote delimiters, and all whitespace from raw sequence
/// text.
pub fn strip(raw: &str) -> String {
    Scanner::new(raw)
        .filter_map(|(_, token)| match token {
            Token::Data(c) if !c.is_whitespace() => Some(c),
            _ => None,
        })
        .collect()
}
