//! Lexer for the Python subset
//!
//! Scans one physical line at a time. Each line may open with an `Indent`
//! token carrying its indentation width (space = 1, tab = 4); no `Dedent`
//! tokens are produced. Strings, including triple-quoted ones, must close on
//! the line they open on, otherwise they are dropped.

use crate::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

static KEYWORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else",
        "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "not",
        "or", "pass", "raise", "return", "try", "while", "with", "yield", "True", "False", "None",
        "async", "await", "nonlocal",
    ]
    .into_iter()
    .collect()
});

static OPERATORS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "+", "-", "*", "/", "//", "%", "**", "=", "+=", "-=", "*=", "/=", "//=", "%=", "**=", "==",
        "!=", "<", ">", "<=", ">=", "&", "|", "^", "~", "<<", ">>", "&=", "|=", "^=", "<<=", ">>=",
    ]
    .into_iter()
    .collect()
});

static SEPARATOR_CHARS: Lazy<FxHashSet<char>> = Lazy::new(|| {
    ['(', ')', '[', ']', '{', '}', ',', ':', ';', '@']
        .into_iter()
        .collect()
});

static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?[jJ]?$")
        .expect("number pattern is valid")
});

/// A number whose exponent sign and digits have not been read yet (`1e`).
static NUMBER_BEFORE_EXPONENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)[eE]$").expect("exponent pattern is valid")
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Tokenize Python source text. Never fails; unclassifiable words are dropped.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (index, line) in source.split('\n').enumerate() {
        LineScanner::new(line, index + 1, &mut tokens).run();
    }
    debug!(target: "synscope::python::lexer", count = tokens.len(), "tokenized Python source");
    tokens
}

/// Tokenize raw bytes. Input that is not UTF-8 text yields no tokens.
pub fn tokenize_bytes(bytes: &[u8]) -> Vec<Token> {
    match std::str::from_utf8(bytes) {
        Ok(source) => tokenize(source),
        Err(err) => {
            warn!(target: "synscope::python::lexer", %err, "input is not UTF-8 text");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InString(char),
    InTripleString(char),
}

struct LineScanner<'a> {
    chars: Vec<char>,
    line: usize,
    /// Index into `chars`; the column is always `position + 1`
    position: usize,
    state: State,
    buffer: String,
    buffer_start: usize,
    tokens: &'a mut Vec<Token>,
}

impl<'a> LineScanner<'a> {
    fn new(line: &str, number: usize, tokens: &'a mut Vec<Token>) -> Self {
        Self {
            chars: line.chars().collect(),
            line: number,
            position: 0,
            state: State::Normal,
            buffer: String::new(),
            buffer_start: 1,
            tokens,
        }
    }

    fn run(mut self) {
        self.indentation();

        while let Some(ch) = self.peek() {
            match self.state {
                State::Normal => {
                    if ch == '#' {
                        self.comment();
                        break;
                    }
                    self.scan_normal(ch);
                }
                State::InString(quote) => {
                    let escaped = self.position > 0 && self.chars[self.position - 1] == '\\';
                    self.buffer.push(ch);
                    self.position += 1;
                    if ch == quote && !escaped {
                        self.close_string();
                    }
                }
                State::InTripleString(quote) => {
                    if self.at_triple(quote) {
                        self.buffer.extend([quote; 3]);
                        self.position += 3;
                        self.close_string();
                    } else {
                        self.buffer.push(ch);
                        self.position += 1;
                    }
                }
            }
        }

        match self.state {
            State::Normal => self.flush(),
            State::InString(_) | State::InTripleString(_) => {
                trace!(
                    target: "synscope::python::lexer",
                    line = self.line,
                    column = self.buffer_start,
                    "dropped string left open at end of line"
                );
            }
        }
    }

    /// Measure leading blanks and emit an `Indent` for non-blank, non-comment lines.
    fn indentation(&mut self) {
        let mut level = 0;
        while let Some(ch) = self.peek() {
            match ch {
                ' ' => level += 1,
                '\t' => level += 4,
                _ => break,
            }
            self.position += 1;
        }

        if level > 0 && self.peek().is_some_and(|c| c != '#') {
            self.tokens.push(Token::new(TokenKind::Indent, level.to_string(), self.line, 1));
        }
    }

    fn scan_normal(&mut self, ch: char) {
        let next = self.peek_ahead(1);

        if ch == '"' || ch == '\'' {
            self.flush();
            self.buffer_start = self.column();
            if self.at_triple(ch) {
                self.buffer.extend([ch; 3]);
                self.state = State::InTripleString(ch);
                self.position += 3;
            } else {
                self.buffer.push(ch);
                self.state = State::InString(ch);
                self.position += 1;
            }
        } else if ch.is_whitespace() {
            self.flush();
            self.position += 1;
        } else if ch == '-' && next == Some('>') {
            self.flush();
            self.emit(TokenKind::Separator, "->");
            self.position += 2;
        } else if ch == '.' {
            self.dot(next);
        } else if (ch == '+' || ch == '-') && self.continues_exponent(next) {
            self.push_buffer(ch);
        } else if let Some(operator) = self.longest_operator() {
            self.flush();
            let width = operator.chars().count();
            self.emit(TokenKind::Operator, operator);
            self.position += width;
        } else if SEPARATOR_CHARS.contains(&ch) {
            self.flush();
            self.emit(TokenKind::Separator, ch.to_string());
            self.position += 1;
        } else {
            self.push_buffer(ch);
        }
    }

    fn comment(&mut self) {
        self.flush();
        let text: String = self.chars[self.position..].iter().collect();
        self.emit(TokenKind::Comment, text);
        self.position = self.chars.len();
    }

    /// `.` belongs to a number (`3.14`, `.5`), forms an ellipsis, or is a separator.
    fn dot(&mut self, next: Option<char>) {
        let digit_buffer = !self.buffer.is_empty() && self.buffer.chars().all(|c| c.is_ascii_digit());
        let starts_number = self.buffer.is_empty() && next.is_some_and(|c| c.is_ascii_digit());

        if digit_buffer || starts_number {
            self.push_buffer('.');
        } else if next == Some('.') && self.peek_ahead(2) == Some('.') {
            self.flush();
            self.emit(TokenKind::Separator, "...");
            self.position += 3;
        } else {
            self.flush();
            self.emit(TokenKind::Separator, ".");
            self.position += 1;
        }
    }

    fn continues_exponent(&self, next: Option<char>) -> bool {
        next.is_some_and(|c| c.is_ascii_digit()) && NUMBER_BEFORE_EXPONENT.is_match(&self.buffer)
    }

    /// Longest operator (three, two, then one character) starting here.
    fn longest_operator(&self) -> Option<String> {
        (1..=3).rev().find_map(|width| {
            let end = self.position + width;
            if end > self.chars.len() {
                return None;
            }
            let candidate: String = self.chars[self.position..end].iter().collect();
            OPERATORS.contains(candidate.as_str()).then_some(candidate)
        })
    }

    fn at_triple(&self, quote: char) -> bool {
        self.peek() == Some(quote)
            && self.peek_ahead(1) == Some(quote)
            && self.peek_ahead(2) == Some(quote)
    }

    fn close_string(&mut self) {
        let text = std::mem::take(&mut self.buffer);
        self.tokens
            .push(Token::new(TokenKind::String, text, self.line, self.buffer_start));
        self.state = State::Normal;
    }

    fn push_buffer(&mut self, ch: char) {
        if self.buffer.is_empty() {
            self.buffer_start = self.column();
        }
        self.buffer.push(ch);
        self.position += 1;
    }

    /// Classify and emit the buffered word, if any.
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let word = std::mem::take(&mut self.buffer);
        let column = self.buffer_start;

        let kind = if KEYWORDS.contains(word.as_str()) {
            TokenKind::Keyword
        } else if NUMBER.is_match(&word) {
            TokenKind::Number
        } else if IDENTIFIER.is_match(&word) {
            TokenKind::Identifier
        } else {
            trace!(
                target: "synscope::python::lexer",
                %word,
                line = self.line,
                column,
                "dropped unclassifiable word"
            );
            return;
        };

        self.tokens.push(Token::new(kind, word, self.line, column));
    }

    fn emit(&mut self, kind: TokenKind, text: impl Into<String>) {
        self.tokens
            .push(Token::new(kind, text, self.line, self.column()));
    }

    fn column(&self) -> usize {
        self.position + 1
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.chars.get(self.position + n).copied()
    }
}
