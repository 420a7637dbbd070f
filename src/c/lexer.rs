//! Lexer for the C subset
//!
//! A single pass over the source with an accumulation buffer: operators,
//! separators, whitespace, comments and string quotes delimit words, and
//! each finished word is classified as a keyword, number or identifier.
//! Words that fit none of those are dropped without a diagnostic.
//!
//! Preprocessor lines (`#include <stdio.h>`) are skipped like comments.

use crate::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

static KEYWORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "int", "float", "double", "long", "char", "bool", "string", "if", "else", "for", "while",
        "true", "false", "return", "void",
    ]
    .into_iter()
    .collect()
});

static OPERATOR_CHARS: Lazy<FxHashSet<char>> = Lazy::new(|| {
    ['+', '-', '*', '/', '=', '%', '&', '|', '<', '>', '!', '^']
        .into_iter()
        .collect()
});

/// Two-character operators recognised greedily after an operator character.
static COMPOUND_OPERATORS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "++", "--", "==", "!=", "<=", ">=", "&&", "||", "+=", "-=", "*=", "/=", "%=", "&=", "|=",
        "^=", "->",
    ]
    .into_iter()
    .collect()
});

static SEPARATOR_CHARS: Lazy<FxHashSet<char>> = Lazy::new(|| {
    ['{', '}', ',', '[', ']', '(', ')', ':', ';']
        .into_iter()
        .collect()
});

/// Tokenize C source text. Never fails; unclassifiable words are dropped.
pub fn tokenize(source: &str) -> Vec<Token> {
    let tokens = Lexer::new(source).run();
    debug!(target: "synscope::c::lexer", count = tokens.len(), "tokenized C source");
    tokens
}

/// Tokenize raw bytes. Input that is not UTF-8 text yields no tokens.
pub fn tokenize_bytes(bytes: &[u8]) -> Vec<Token> {
    match std::str::from_utf8(bytes) {
        Ok(source) => tokenize(source),
        Err(err) => {
            warn!(target: "synscope::c::lexer", %err, "input is not UTF-8 text");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InString,
    InLineComment,
    InBlockComment,
}

struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    /// Index of the first character of the current line
    line_start: usize,
    state: State,
    buffer: String,
    /// Where the buffered word (or open string) started
    buffer_start: (usize, usize),
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            line_start: 0,
            state: State::Normal,
            buffer: String::new(),
            buffer_start: (1, 1),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(ch) = self.peek() {
            match self.state {
                State::InLineComment => {
                    if ch == '\n' {
                        self.state = State::Normal;
                    }
                    self.advance();
                }
                State::InBlockComment => {
                    if ch == '*' && self.peek_ahead(1) == Some('/') {
                        self.advance();
                        self.state = State::Normal;
                    }
                    self.advance();
                }
                State::InString => {
                    if ch == '"' {
                        let text = std::mem::take(&mut self.buffer);
                        let (line, column) = self.buffer_start;
                        self.tokens.push(Token::new(TokenKind::String, text, line, column));
                        self.state = State::Normal;
                    } else if ch != '\n' {
                        // Newlines advance the line but are not part of the text
                        self.buffer.push(ch);
                    }
                    self.advance();
                }
                State::Normal => self.scan_normal(ch),
            }
        }

        match self.state {
            State::InString => {
                trace!(
                    target: "synscope::c::lexer",
                    line = self.buffer_start.0,
                    column = self.buffer_start.1,
                    "dropped unterminated string"
                );
            }
            _ => self.flush(),
        }

        self.tokens
    }

    fn scan_normal(&mut self, ch: char) {
        let next = self.peek_ahead(1);

        if ch == '/' && next == Some('/') {
            self.flush();
            self.state = State::InLineComment;
            self.advance();
            self.advance();
        } else if ch == '/' && next == Some('*') {
            self.flush();
            self.state = State::InBlockComment;
            self.advance();
            self.advance();
        } else if ch == '#' && self.at_line_start() {
            self.flush();
            self.state = State::InLineComment;
            self.advance();
        } else if ch == '"' {
            self.flush();
            self.buffer_start = (self.line, self.column);
            self.state = State::InString;
            self.advance();
        } else if ch.is_whitespace() {
            self.flush();
            self.advance();
        } else if OPERATOR_CHARS.contains(&ch) {
            self.flush();
            self.operator(ch, next);
        } else if SEPARATOR_CHARS.contains(&ch) {
            self.flush();
            self.emit(TokenKind::Separator, ch.to_string());
            self.advance();
        } else if ch == '.' {
            self.dot(next);
        } else {
            self.push_buffer(ch);
        }
    }

    fn operator(&mut self, ch: char, next: Option<char>) {
        if let Some(next) = next {
            let pair: String = [ch, next].iter().collect();
            if COMPOUND_OPERATORS.contains(pair.as_str()) {
                self.emit(TokenKind::Operator, pair);
                self.advance();
                self.advance();
                return;
            }
        }
        self.emit(TokenKind::Operator, ch.to_string());
        self.advance();
    }

    /// `.` belongs to a number (`3.14`, `.5`) or is member access (`p.x`).
    fn dot(&mut self, next: Option<char>) {
        let numeric_buffer = !self.buffer.is_empty()
            && self.buffer.chars().all(|c| c.is_ascii_digit() || c == '.');
        let starts_number = self.buffer.is_empty() && next.is_some_and(|c| c.is_ascii_digit());

        if numeric_buffer || starts_number {
            self.push_buffer('.');
        } else {
            self.flush();
            self.emit(TokenKind::Separator, ".");
            self.advance();
        }
    }

    fn push_buffer(&mut self, ch: char) {
        if self.buffer.is_empty() {
            self.buffer_start = (self.line, self.column);
        }
        self.buffer.push(ch);
        self.advance();
    }

    /// Classify and emit the buffered word, if any.
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let word = std::mem::take(&mut self.buffer);
        let (line, column) = self.buffer_start;

        let kind = if KEYWORDS.contains(word.as_str()) {
            TokenKind::Keyword
        } else if is_number(&word) {
            TokenKind::Number
        } else if is_identifier(&word) {
            TokenKind::Identifier
        } else {
            trace!(target: "synscope::c::lexer", %word, line, column, "dropped unclassifiable word");
            return;
        };

        self.tokens.push(Token::new(kind, word, line, column));
    }

    /// Emit a token that starts at the current position.
    fn emit(&mut self, kind: TokenKind, text: impl Into<String>) {
        self.tokens.push(Token::new(kind, text, self.line, self.column));
    }

    fn at_line_start(&self) -> bool {
        self.input[self.line_start..self.position]
            .iter()
            .all(|c| c.is_whitespace())
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) {
        let Some(ch) = self.peek() else {
            return;
        };
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
            self.line_start = self.position;
        } else {
            self.column += 1;
        }
    }
}

/// Digits with at most one `.`, and at least one digit.
fn is_number(word: &str) -> bool {
    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in word.chars() {
        match c {
            '.' if seen_dot => return false,
            '.' => seen_dot = true,
            c if c.is_ascii_digit() => seen_digit = true,
            _ => return false,
        }
    }
    seen_digit
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
