use std::ops::Range;

/// Source location of a span's first character.
///
/// `line` is 1-based, `column` is 0-based and counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Span kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Block comment (`/* ... */`). The only kind rendered as prose.
    BlockComment,
    /// Line comment (`// ...`) or hashbang (`#!...`).
    LineComment,
    /// Any other lexical token.
    Token,
}

/// A comment or token with its byte range and start position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    /// Half-open byte range into the source text.
    pub range: Range<usize>,
    pub start: Position,
    /// Comment body without delimiters, or the token's source text.
    pub value: String,
}

impl Span {
    #[must_use]
    pub const fn is_block_comment(&self) -> bool {
        matches!(self.kind, SpanKind::BlockComment)
    }

    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self.kind, SpanKind::BlockComment | SpanKind::LineComment)
    }
}
