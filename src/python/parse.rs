//! Python parser coordinator
//!
//! This module provides the [`Parser`] struct, the [`PythonSyntaxError`]
//! type and the cursor helpers shared by the grammar modules.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, helper methods, and the [`parse`] entry point
//! - `declarations`: `def`, `class`, `import`, `from ... import`
//! - `statements`: blocks, compound statements, assignments
//! - `expressions`: expressions with one method per precedence level
//!
//! Comments and indentation tokens are filtered out before parsing. A block
//! runs until the next block keyword, so indentation is never checked.
//!
//! # Error Recovery
//!
//! A failed `expect` records a diagnostic and parsing simply carries on from
//! the same position. Grammar methods return `Result<(), InternalFault>`;
//! only an [`InternalFault`] unwinds, up to the top-level statement loop,
//! which records it and skips to the next likely statement start.

use crate::diagnostics::{AnalysisResult, Diagnostics, Expected, InternalFault};
use crate::token::{Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Maximum expression nesting before a statement is abandoned.
pub(crate) const MAX_NESTING: usize = 128;

/// A Python syntax problem; its `Display` output is the diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PythonSyntaxError {
    #[error("Python Syntax Error at line {line}: Expected {expected}, got '{found}'")]
    Mismatch {
        line: usize,
        expected: Expected,
        found: String,
    },

    #[error("Python Syntax Error at EOF: Expected {expected}")]
    UnexpectedEof { expected: Expected },

    #[error("Unexpected token: {text} at line {line}")]
    UnexpectedToken { text: String, line: usize },

    #[error("Try statement must have except or finally clause")]
    MissingHandler,

    #[error("Expected assignment operator at line {}", line_or_eof(.line))]
    MissingAssignmentOperator { line: Option<usize> },

    #[error("Python Syntax Error at EOF: Expected expression after '{operator}'")]
    MissingRightHandSide { operator: String },
}

fn line_or_eof(line: &Option<usize>) -> String {
    match line {
        Some(line) => line.to_string(),
        None => "EOF".to_string(),
    }
}

pub(crate) type ParseResult = Result<(), InternalFault>;

/// Check a Python token stream against the grammar.
///
/// Never panics; every problem ends up as a diagnostic string.
pub fn parse(tokens: &[Token]) -> AnalysisResult {
    let mut parser = Parser::new(tokens);
    parser.parse_program();
    let result = parser.diagnostics.into_result();
    debug!(
        target: "synscope::python::parser",
        tokens = tokens.len(),
        diagnostics = result.diagnostics.len(),
        "parsed Python token stream"
    );
    result
}

/// Recursive descent parser for the Python subset
pub(crate) struct Parser<'t> {
    pub(crate) tokens: Vec<&'t Token>,
    pub(crate) position: usize,
    pub(crate) depth: usize,
    pub(crate) diagnostics: Diagnostics,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens: tokens.iter().filter(|t| !t.kind.is_layout()).collect(),
            position: 0,
            depth: 0,
            diagnostics: Diagnostics::new(),
        }
    }

    fn parse_program(&mut self) {
        while !self.is_at_end() {
            if let Err(fault) = self.parse_statement() {
                self.diagnostics.record(fault);
                self.recover_to_next_statement();
            }
        }
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position).copied()
    }

    pub(crate) fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn match_separator(&mut self, text: &str) -> bool {
        self.match_token(|t| t.is_separator(text))
    }

    pub(crate) fn match_keyword(&mut self, text: &str) -> bool {
        self.match_token(|t| t.is_keyword(text))
    }

    /// Consume the next token if it is one of the given operators.
    pub(crate) fn match_operator(&mut self, operators: &[&str]) -> bool {
        self.match_token(|t| {
            t.kind == TokenKind::Operator && operators.contains(&t.text.as_str())
        })
    }

    fn match_token(&mut self, predicate: impl FnOnce(&Token) -> bool) -> bool {
        if self.peek().is_some_and(predicate) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind`, or record a diagnostic and stay put.
    pub(crate) fn expect_kind(&mut self, kind: TokenKind) -> bool {
        if self.check_kind(kind) {
            self.advance();
            return true;
        }
        self.report_expected(Expected::Kind(kind));
        false
    }

    /// Consume the exact token, or record a diagnostic and stay put.
    pub(crate) fn expect_token(&mut self, kind: TokenKind, text: &'static str) -> bool {
        if self.match_token(|t| t.is(kind, text)) {
            return true;
        }
        self.report_expected(Expected::Token(kind, text));
        false
    }

    pub(crate) fn expect_separator(&mut self, text: &'static str) -> bool {
        self.expect_token(TokenKind::Separator, text)
    }

    pub(crate) fn report_expected(&mut self, expected: Expected) {
        let error = match self.peek() {
            Some(token) => PythonSyntaxError::Mismatch {
                line: token.line,
                expected,
                found: token.text.clone(),
            },
            None => PythonSyntaxError::UnexpectedEof { expected },
        };
        self.diagnostics.record(error);
    }

    /// Run `rule` one nesting level deeper, failing hard past [`MAX_NESTING`].
    pub(crate) fn nested(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult) -> ParseResult {
        if self.depth >= MAX_NESTING {
            let line = self.peek().map(|t| t.line);
            return Err(InternalFault::nesting_too_deep(MAX_NESTING, line));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
}
