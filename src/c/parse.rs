//! C parser coordinator
//!
//! This module provides the [`Parser`] struct, the [`SyntaxError`] type and
//! the cursor helpers shared by the grammar modules.
//!
//! # Parser Architecture
//!
//! The parser is a recursive-descent recognizer: it checks the token stream
//! against the grammar and records diagnostics, but builds no tree.
//! - This module: Parser struct, helper methods, and the [`parse`] entry point
//! - `declarations`: functions, parameters, variable declarations
//! - `statements`: blocks and statements
//! - `expressions`: expressions with one method per precedence level
//!
//! # Error Recovery
//!
//! Grammar methods return [`ParseResult`]. A failed `expect` travels up with
//! `?` to the nearest recovery boundary (primary, expression, statement or
//! function), which records it once and skips to a synchronization token.
//! [`SyntaxError::Internal`] passes through every boundary and ends the run.

use crate::diagnostics::{AnalysisResult, Diagnostics, Expected, InternalFault};
use crate::token::{Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Maximum statement plus expression nesting before the parse is abandoned.
pub(crate) const MAX_NESTING: usize = 128;

const TYPE_KEYWORDS: [&str; 7] = ["int", "float", "double", "long", "char", "bool", "void"];

pub(crate) fn is_type_keyword(token: &Token) -> bool {
    token.kind == TokenKind::Keyword && TYPE_KEYWORDS.contains(&token.text.as_str())
}

/// A syntax failure; its `Display` output is the diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Syntax Error at line {line}, column {column}: Expected {expected}, got '{found}'")]
    Mismatch {
        line: usize,
        column: usize,
        expected: Expected,
        found: String,
    },

    #[error("Syntax Error at EOF: Expected {expected}")]
    UnexpectedEof { expected: Expected },

    #[error(transparent)]
    Internal(#[from] InternalFault),
}

pub(crate) type ParseResult<T = ()> = Result<T, SyntaxError>;

/// Check a C token stream against the grammar.
///
/// Never panics; every problem ends up as a diagnostic string.
pub fn parse(tokens: &[Token]) -> AnalysisResult {
    let mut parser = Parser::new(tokens);
    parser.parse_program();
    let result = parser.diagnostics.into_result();
    debug!(
        target: "synscope::c::parser",
        tokens = tokens.len(),
        diagnostics = result.diagnostics.len(),
        "parsed C token stream"
    );
    result
}

/// Recursive descent parser for the C subset
pub(crate) struct Parser<'t> {
    pub(crate) tokens: &'t [Token],
    pub(crate) position: usize,
    pub(crate) depth: usize,
    pub(crate) diagnostics: Diagnostics,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Parse every top-level function, recovering between them.
    fn parse_program(&mut self) {
        while !self.is_at_end() {
            match self.parse_function() {
                Ok(()) => {}
                Err(SyntaxError::Internal(fault)) => {
                    self.diagnostics.record(fault);
                    return;
                }
                Err(err) => {
                    self.diagnostics.record(err);
                    self.recover_to_next_function();
                }
            }
        }
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&'t Token> {
        self.tokens.get(self.position + n)
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

    pub(crate) fn check_separator(&self, text: &str) -> bool {
        self.peek().is_some_and(|t| t.is_separator(text))
    }

    pub(crate) fn match_separator(&mut self, text: &str) -> bool {
        if self.check_separator(text) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn match_keyword(&mut self, text: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_keyword(text)) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the next token if it is one of the given operators.
    pub(crate) fn match_operator(&mut self, operators: &[&str]) -> bool {
        let matched = self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Operator && operators.contains(&t.text.as_str()));
        if matched {
            self.advance();
        }
        matched
    }

    pub(crate) fn expect_kind(&mut self, kind: TokenKind) -> ParseResult {
        if self.check_kind(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(Expected::Kind(kind)))
        }
    }

    pub(crate) fn expect_separator(&mut self, text: &'static str) -> ParseResult {
        if self.match_separator(text) {
            Ok(())
        } else {
            Err(self.error_here(Expected::Token(TokenKind::Separator, text)))
        }
    }

    /// Build the error for finding the current token (or end of input)
    /// where `expected` should be.
    pub(crate) fn error_here(&self, expected: Expected) -> SyntaxError {
        match self.peek() {
            Some(token) => SyntaxError::Mismatch {
                line: token.line,
                column: token.column,
                expected,
                found: token.text.clone(),
            },
            None => SyntaxError::UnexpectedEof { expected },
        }
    }

    /// Run `rule` one nesting level deeper, failing hard past [`MAX_NESTING`].
    pub(crate) fn nested(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult) -> ParseResult {
        if self.depth >= MAX_NESTING {
            let line = self.peek().map(|t| t.line);
            return Err(InternalFault::nesting_too_deep(MAX_NESTING, line).into());
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::c::tokenize;
    use expect_test::{expect, Expect};

    fn check(source: &str, expect: Expect) {
        let result = parse(&tokenize(source));
        expect.assert_debug_eq(&result.diagnostics);
    }

    fn assert_valid(source: &str) {
        let result = parse(&tokenize(source));
        assert!(result.success, "unexpected diagnostics: {:?}", result.diagnostics);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(&[]), AnalysisResult::ok());
    }

    #[test]
    fn test_minimal_function() {
        assert_valid("int main() {\n  return 0;\n}");
    }

    #[test]
    fn test_parameters_and_control_flow() {
        assert_valid(
            r#"
            int add(int a, int b) {
                return a + b;
            }

            void loop(int n) {
                for (int i = 0; i < n; i++) {
                    printf("%d", i);
                }
                while (n > 0) n -= 1;
                if (n == 0) { n = 1; } else n++;
                ;
                { int nested = 2; }
            }
            "#,
        );
    }

    #[test]
    fn test_for_with_empty_clauses() {
        assert_valid("int main() { for (;;) { } for (i = 0; ; ) ; return 0; }");
    }

    #[test]
    fn test_expression_precedence_chain() {
        assert_valid(
            "int f() { x = !a || b && c == d != e < f >= g + h - i * j / k % -l; return (x); }",
        );
    }

    #[test]
    fn test_postfix_forms() {
        assert_valid("int f() { x = a[i + 1]; y = p.x + q->y; z = g(1, h(2))[0]; ++i; i--; return 0; }");
    }

    #[test]
    fn test_assignment_target_must_be_identifier() {
        check(
            "int f() { a[0] = 2; }",
            expect![[r#"
                [
                    "Syntax Error at line 1, column 16: Expected Separator ';', got '='",
                ]
            "#]],
        );
    }

    #[test]
    fn test_boolean_literals() {
        assert_valid("bool ok() { bool done = true; return false; }");
    }

    #[test]
    fn test_missing_close_paren_in_signature() {
        check(
            "int main( { return 0; } ",
            expect![[r#"
                [
                    "Syntax Error at line 1, column 11: Expected Separator ')', got '{'",
                ]
            "#]],
        );
    }

    #[test]
    fn test_missing_semicolon_recovers_at_statement() {
        check(
            "int main() {\n  int x = 1\n  return x;\n}",
            expect![[r#"
                [
                    "Syntax Error at line 3, column 3: Expected Separator ';', got 'return'",
                ]
            "#]],
        );
    }

    #[test]
    fn test_bad_primary_recovers_inside_expression() {
        check(
            "int main() {\n  foo(1, else);\n  return 0;\n}",
            expect![[r#"
                [
                    "Syntax Error at line 2, column 10: Expected expression, got 'else'",
                ]
            "#]],
        );
    }

    #[test]
    fn test_top_level_garbage_skips_to_next_function() {
        check(
            "x = 1;\nint main() { return 0; }",
            expect![[r#"
                [
                    "Syntax Error at line 1, column 1: Expected Keyword, got 'x'",
                ]
            "#]],
        );
    }

    #[test]
    fn test_unclosed_function_body() {
        check(
            "int main() {\n  return 0;\n",
            expect![[r#"
                [
                    "Syntax Error at EOF: Expected Separator '}'",
                ]
            "#]],
        );
    }

    #[test]
    fn test_truncated_signature() {
        check(
            "int",
            expect![[r#"
                [
                    "Syntax Error at EOF: Expected Identifier",
                ]
            "#]],
        );
    }

    #[test]
    fn test_runaway_nesting_is_an_internal_fault() {
        let source = format!("int main() {{ x = {}1; }}", "(".repeat(500));
        let result = parse(&tokenize(&source));
        assert!(!result.success);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].starts_with("Unexpected error: "));
    }

    #[test]
    fn test_parse_does_not_consume_tokens() {
        let tokens = tokenize("int main() { return 0 }");
        let snapshot = tokens.clone();
        let first = parse(&tokens);
        let second = parse(&tokens);
        assert_eq!(first, second);
        assert_eq!(tokens, snapshot);
    }
}
