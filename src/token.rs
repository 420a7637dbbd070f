//! Token model shared by both lexers
//!
//! A [`Token`] is a classified, positioned slice of source text. Both
//! languages use the same shape; the C lexer only produces the first six
//! [`TokenKind`] variants, the Python lexer everything except
//! [`TokenKind::Dedent`].

use std::fmt;

/// Classification of a token.
///
/// The `Display` form is the variant name, which is also what diagnostics
/// print in their "Expected <kind>" slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Operator,
    Separator,
    String,
    Comment,
    /// Python only: leading indentation width of a line, carried as text
    Indent,
    /// Python only: declared for completeness, never produced by the lexer
    Dedent,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::Number => "Number",
            TokenKind::Operator => "Operator",
            TokenKind::Separator => "Separator",
            TokenKind::String => "String",
            TokenKind::Comment => "Comment",
            TokenKind::Indent => "Indent",
            TokenKind::Dedent => "Dedent",
        }
    }

    /// Whether the token carries no grammar meaning for the Python parser.
    pub fn is_layout(self) -> bool {
        match self {
            TokenKind::Comment | TokenKind::Indent | TokenKind::Dedent => true,
            TokenKind::Keyword
            | TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::Operator
            | TokenKind::Separator
            | TokenKind::String => false,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A positioned lexical unit. `line` and `column` are 1-based and count chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// True when the token has the given kind and exact text.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.is(TokenKind::Keyword, text)
    }

    pub fn is_separator(&self, text: &str) -> bool {
        self.is(TokenKind::Separator, text)
    }

    pub fn is_operator(&self, text: &str) -> bool {
        self.is(TokenKind::Operator, text)
    }

    /// Position as a `(line, column)` pair, ordered the way tokens are emitted.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (line {}, col {})",
            self.kind, self.text, self.line, self.column
        )
    }
}
