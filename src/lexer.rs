use std::fmt;

use crate::token::{Position, Span, SpanKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// String literal missing its closing quote.
    UnterminatedString,
    /// Template literal missing its closing backtick.
    UnterminatedTemplate,
    /// Block comment missing its closing `*/`.
    UnterminatedBlockComment,
    /// Regular expression literal missing its closing slash.
    UnterminatedRegex,
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
            Self::UnterminatedTemplate => {
                write!(f, "unterminated template literal")
            }
            Self::UnterminatedBlockComment => {
                write!(f, "unterminated block comment")
            }
            Self::UnterminatedRegex => {
                write!(f, "unterminated regular expression")
            }
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {ch}")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", position.line, position.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

/// Comments and tokens of one source text, each in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexed {
    pub comments: Vec<Span>,
    pub tokens: Vec<Span>,
}

/// Tokenize a JavaScript source string into comments and tokens.
///
/// Whitespace produces no span. A leading byte order mark is
/// skipped and a leading `#!` line is reported as a line comment.
///
/// # Errors
///
/// Returns `LexError` on unterminated literals or comments and on
/// characters that cannot start a token.
pub fn tokenize(input: &str) -> Result<Lexed, LexError> {
    let lexed = Lexer::new(input).tokenize()?;
    tracing::debug!(
        comments = lexed.comments.len(),
        tokens = lexed.tokens.len(),
        "tokenized source"
    );
    Ok(lexed)
}

/// Punctuators ordered longest first so the first match wins.
const PUNCTUATORS: &[&str] = &[
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==", "!=",
    "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
    "<<", ">>", "**", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-", "*", "/", "%",
    "&", "|", "^", "!", "~", "?", ":", "=", ".", "@", "#",
];

/// Keywords after which a `/` starts a regular expression.
const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
];

/// Keywords whose parenthesized head is followed by a statement, so
/// a `/` after the closing `)` starts a regular expression.
const CONTROL_KEYWORDS: &[&str] = &["if", "while", "for", "with"];

struct Lexer<'a> {
    source: &'a str,
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
    regex_allowed: bool,
    /// One entry per open `(`: whether it heads a control statement.
    parens: Vec<bool>,
    lexed: Lexed,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        let bytes = source.as_bytes();
        let start = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };
        Self {
            source,
            input: bytes,
            pos: start,
            line: 1,
            col: 0,
            regex_allowed: true,
            parens: Vec::new(),
            lexed: Lexed::default(),
        }
    }

    fn tokenize(mut self) -> Result<Lexed, LexError> {
        if self.input[self.pos..].starts_with(b"#!") {
            self.read_line_comment(2);
        }

        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C => {
                    self.advance();
                }
                b'/' if self.peek_at(1) == Some(b'/') => {
                    self.read_line_comment(2);
                }
                b'/' if self.peek_at(1) == Some(b'*') => {
                    self.read_block_comment()?;
                }
                b'/' if self.regex_allowed => {
                    self.read_regex()?;
                }
                b'"' | b'\'' => {
                    let (start, position) = self.mark();
                    self.scan_string(ch)?;
                    self.push_token(start, position);
                    self.regex_allowed = false;
                }
                b'`' => {
                    let (start, position) = self.mark();
                    self.scan_template()?;
                    self.push_token(start, position);
                    self.regex_allowed = false;
                }
                b'0'..=b'9' => {
                    self.read_number();
                }
                b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.read_number();
                }
                _ if is_ident_start(ch) => {
                    self.read_identifier();
                }
                _ if ch >= 0x80 => {
                    if self.current_char().is_some_and(is_unicode_whitespace) {
                        self.advance_char();
                    } else {
                        self.read_identifier();
                    }
                }
                _ => {
                    self.read_punctuator()?;
                }
            }
        }

        Ok(self.lexed)
    }

    const fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.col,
        }
    }

    const fn mark(&self) -> (usize, Position) {
        (self.pos, self.position())
    }

    const fn error(kind: LexErrorKind, position: Position) -> LexError {
        LexError { kind, position }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn current_char(&self) -> Option<char> {
        self.source.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn advance(&mut self) {
        if let Some(&byte) = self.input.get(self.pos) {
            if byte == b'\n' {
                self.line += 1;
                self.col = 0;
            } else if byte & 0xC0 != 0x80 {
                // continuation bytes belong to the previous character
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn advance_char(&mut self) {
        let width = self.current_char().map_or(1, char::len_utf8);
        self.advance_by(width);
    }

    fn push_token(&mut self, start: usize, position: Position) {
        let value = self.source[start..self.pos].to_string();
        self.lexed.tokens.push(Span {
            kind: SpanKind::Token,
            range: start..self.pos,
            start: position,
            value,
        });
    }

    /// Reads a comment running to the end of the line. `prefix` is
    /// the length of the opening delimiter (`//` or `#!`).
    fn read_line_comment(&mut self, prefix: usize) {
        let (start, position) = self.mark();
        self.advance_by(prefix);
        let content_start = self.pos;

        while let Some(ch) = self.peek() {
            if ch == b'\n' || ch == b'\r' {
                break;
            }
            self.advance();
        }

        self.lexed.comments.push(Span {
            kind: SpanKind::LineComment,
            range: start..self.pos,
            start: position,
            value: self.source[content_start..self.pos].to_string(),
        });
    }

    fn read_block_comment(&mut self) -> Result<(), LexError> {
        let (start, position) = self.mark();
        self.advance_by(2);
        let content_start = self.pos;

        loop {
            match self.peek() {
                None => {
                    return Err(Self::error(
                        LexErrorKind::UnterminatedBlockComment,
                        position,
                    ));
                }
                Some(b'*') if self.peek_at(1) == Some(b'/') => break,
                Some(_) => self.advance(),
            }
        }

        let value = self.source[content_start..self.pos].to_string();
        self.advance_by(2);

        self.lexed.comments.push(Span {
            kind: SpanKind::BlockComment,
            range: start..self.pos,
            start: position,
            value,
        });
        Ok(())
    }

    fn scan_string(&mut self, quote: u8) -> Result<(), LexError> {
        let position = self.position();
        self.advance(); // skip opening quote

        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(Self::error(LexErrorKind::UnterminatedString, position));
                }
                Some(b'\\') => {
                    self.advance();
                    if self.peek() == Some(b'\r') && self.peek_at(1) == Some(b'\n') {
                        self.advance();
                    }
                    self.advance();
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// Scans a template literal, including any `${ ... }`
    /// substitutions, as a single unit.
    fn scan_template(&mut self) -> Result<(), LexError> {
        let position = self.position();
        self.advance(); // skip opening backtick

        loop {
            match self.peek() {
                None => {
                    return Err(Self::error(LexErrorKind::UnterminatedTemplate, position));
                }
                Some(b'\\') => {
                    self.advance_by(2);
                }
                Some(b'`') => {
                    self.advance();
                    return Ok(());
                }
                Some(b'$') if self.peek_at(1) == Some(b'{') => {
                    self.advance_by(2);
                    self.scan_substitution(position)?;
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn scan_substitution(&mut self, template_start: Position) -> Result<(), LexError> {
        let mut depth = 1usize;

        while let Some(ch) = self.peek() {
            match ch {
                b'{' => {
                    depth += 1;
                    self.advance();
                }
                b'}' => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        return Ok(());
                    }
                }
                b'"' | b'\'' => self.scan_string(ch)?,
                b'`' => self.scan_template()?,
                b'/' if self.peek_at(1) == Some(b'/') => {
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.advance();
                    }
                }
                b'/' if self.peek_at(1) == Some(b'*') => {
                    let position = self.position();
                    self.advance_by(2);
                    loop {
                        match self.peek() {
                            None => {
                                return Err(Self::error(
                                    LexErrorKind::UnterminatedBlockComment,
                                    position,
                                ));
                            }
                            Some(b'*') if self.peek_at(1) == Some(b'/') => {
                                self.advance_by(2);
                                break;
                            }
                            Some(_) => self.advance(),
                        }
                    }
                }
                _ => self.advance(),
            }
        }

        Err(Self::error(
            LexErrorKind::UnterminatedTemplate,
            template_start,
        ))
    }

    fn read_regex(&mut self) -> Result<(), LexError> {
        let (start, position) = self.mark();
        self.advance(); // skip opening slash
        let mut in_class = false;

        loop {
            match self.peek() {
                None | Some(b'\n' | b'\r') => {
                    return Err(Self::error(LexErrorKind::UnterminatedRegex, position));
                }
                Some(b'\\') => {
                    self.advance();
                    if matches!(self.peek(), None | Some(b'\n' | b'\r')) {
                        return Err(Self::error(LexErrorKind::UnterminatedRegex, position));
                    }
                    self.advance();
                }
                Some(b'[') => {
                    in_class = true;
                    self.advance();
                }
                Some(b']') => {
                    in_class = false;
                    self.advance();
                }
                Some(b'/') if !in_class => {
                    self.advance();
                    break;
                }
                Some(_) => self.advance(),
            }
        }

        // flags
        while self.peek().is_some_and(is_ident_part) {
            self.advance();
        }

        self.push_token(start, position);
        self.regex_allowed = false;
        Ok(())
    }

    fn read_number(&mut self) {
        let (start, position) = self.mark();

        if self.peek() == Some(b'0')
            && matches!(
                self.peek_at(1),
                Some(b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
            )
        {
            self.advance_by(2);
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_hexdigit() || c == b'_')
            {
                self.advance();
            }
        } else {
            self.skip_digits();
            if self.peek() == Some(b'.') {
                self.advance();
                self.skip_digits();
            }
            if matches!(self.peek(), Some(b'e' | b'E')) {
                self.advance();
                if matches!(self.peek(), Some(b'+' | b'-')) {
                    self.advance();
                }
                self.skip_digits();
            }
        }

        if self.peek() == Some(b'n') {
            self.advance();
        }

        self.push_token(start, position);
        self.regex_allowed = false;
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == b'_') {
            self.advance();
        }
    }

    fn read_identifier(&mut self) {
        let (start, position) = self.mark();

        while let Some(ch) = self.peek() {
            if ch == b'\\' {
                // unicode escape: \uXXXX or \u{X...}
                self.advance();
                if self.peek() == Some(b'u') {
                    self.advance();
                }
                if self.peek() == Some(b'{') {
                    while self.peek().is_some_and(|c| c != b'}') {
                        self.advance();
                    }
                    self.advance();
                }
            } else if ch >= 0x80 {
                if self.current_char().is_some_and(is_unicode_whitespace) {
                    break;
                }
                self.advance_char();
            } else if is_ident_part(ch) {
                self.advance();
            } else {
                break;
            }
        }

        let word = &self.source[start..self.pos];
        self.regex_allowed = REGEX_PREFIX_KEYWORDS.contains(&word);
        self.push_token(start, position);
    }

    fn read_punctuator(&mut self) -> Result<(), LexError> {
        let (start, position) = self.mark();
        let rest = &self.input[self.pos..];

        let Some(punct) = PUNCTUATORS.iter().copied().find(|p| {
            rest.starts_with(p.as_bytes())
                // `a?.5:b` is a conditional, not optional chaining
                && !(*p == "?." && rest.get(2).is_some_and(u8::is_ascii_digit))
        }) else {
            let ch = self.current_char().unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(Self::error(
                LexErrorKind::UnexpectedCharacter(ch),
                position,
            ));
        };

        self.advance_by(punct.len());
        self.regex_allowed = match punct {
            "(" => {
                let after_control = self
                    .lexed
                    .tokens
                    .last()
                    .is_some_and(|t| CONTROL_KEYWORDS.contains(&t.value.as_str()));
                self.parens.push(after_control);
                true
            }
            ")" => self.parens.pop().unwrap_or(false),
            "]" | "}" | "++" | "--" => false,
            _ => true,
        };
        self.push_token(start, position);
        Ok(())
    }
}

const fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch == b'$' || ch == b'\\'
}

const fn is_ident_part(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'$'
}

fn is_unicode_whitespace(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}
