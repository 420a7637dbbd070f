//! Expression parsing
//!
//! One method per precedence level, loosest first: assignment, `||`, `&&`,
//! equality, relational, additive, multiplicative, unary, postfix, primary.

use super::parse::{ParseResult, Parser, SyntaxError};
use crate::diagnostics::Expected;
use crate::token::TokenKind;

pub(crate) const ASSIGNMENT_OPERATORS: &[&str] =
    &["=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^="];

impl<'t> Parser<'t> {
    /// Parse an expression, recording and skipping it if it is malformed.
    ///
    /// An empty expression directly before `;`, `)` or `}` is accepted.
    pub(crate) fn parse_expression(&mut self) -> ParseResult {
        let empty = self
            .peek()
            .is_some_and(|t| t.is_separator(";") || t.is_separator(")") || t.is_separator("}"));
        if empty {
            return Ok(());
        }

        match self.nested(Self::parse_assignment) {
            Err(err @ SyntaxError::Internal(_)) => Err(err),
            Err(err) => {
                self.diagnostics.record(err);
                self.skip_expression();
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    /// `IDENT assignOp expression`, otherwise rewind and parse `||`.
    pub(crate) fn parse_assignment(&mut self) -> ParseResult {
        if self.check_kind(TokenKind::Identifier) {
            let start = self.position;
            self.advance();
            if self.match_operator(ASSIGNMENT_OPERATORS) {
                return self.parse_expression();
            }
            self.position = start;
        }
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> ParseResult {
        self.parse_logical_and()?;
        while self.match_operator(&["||"]) {
            self.parse_logical_and()?;
        }
        Ok(())
    }

    fn parse_logical_and(&mut self) -> ParseResult {
        self.parse_equality()?;
        while self.match_operator(&["&&"]) {
            self.parse_equality()?;
        }
        Ok(())
    }

    fn parse_equality(&mut self) -> ParseResult {
        self.parse_relational()?;
        while self.match_operator(&["==", "!="]) {
            self.parse_relational()?;
        }
        Ok(())
    }

    fn parse_relational(&mut self) -> ParseResult {
        self.parse_additive()?;
        while self.match_operator(&["<", ">", "<=", ">="]) {
            self.parse_additive()?;
        }
        Ok(())
    }

    fn parse_additive(&mut self) -> ParseResult {
        self.parse_multiplicative()?;
        while self.match_operator(&["+", "-"]) {
            self.parse_multiplicative()?;
        }
        Ok(())
    }

    fn parse_multiplicative(&mut self) -> ParseResult {
        self.parse_unary()?;
        while self.match_operator(&["*", "/", "%"]) {
            self.parse_unary()?;
        }
        Ok(())
    }

    fn parse_unary(&mut self) -> ParseResult {
        if self.match_operator(&["!", "-", "+", "++", "--"]) {
            return self.nested(Self::parse_unary);
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> ParseResult {
        self.parse_primary()?;

        loop {
            if self.match_operator(&["++", "--"]) {
                continue;
            }
            if self.match_separator("[") {
                self.parse_expression()?;
                self.expect_separator("]")?;
            } else if self.match_separator("(") {
                self.parse_call_arguments()?;
            } else if self.match_separator(".") || self.match_operator(&["->"]) {
                self.expect_kind(TokenKind::Identifier)?;
            } else {
                return Ok(());
            }
        }
    }

    /// Parse `[expression {, expression}] )` after an already consumed `(`.
    pub(crate) fn parse_call_arguments(&mut self) -> ParseResult {
        if !self.check_separator(")") {
            loop {
                self.parse_expression()?;
                if !self.match_separator(",") {
                    break;
                }
            }
        }
        self.expect_separator(")")
    }

    /// Parse a primary, recording and skipping it if it is malformed.
    fn parse_primary(&mut self) -> ParseResult {
        match self.primary() {
            Err(err @ SyntaxError::Internal(_)) => Err(err),
            Err(err) => {
                self.diagnostics.record(err);
                self.skip_expression();
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    fn primary(&mut self) -> ParseResult {
        let Some(token) = self.peek() else {
            return Err(self.error_here(Expected::Rule("expression")));
        };

        match token.kind {
            TokenKind::Number | TokenKind::String | TokenKind::Identifier => {
                self.advance();
                Ok(())
            }
            TokenKind::Keyword if token.text == "true" || token.text == "false" => {
                self.advance();
                Ok(())
            }
            TokenKind::Separator if token.text == "(" => {
                self.advance();
                self.parse_expression()?;
                self.expect_separator(")")
            }
            TokenKind::Keyword
            | TokenKind::Separator
            | TokenKind::Operator
            | TokenKind::Comment
            | TokenKind::Indent
            | TokenKind::Dedent => Err(self.error_here(Expected::Rule("expression"))),
        }
    }

    /// Skip to the next `;` or `}`, or to a `)`/`]` that closes nothing
    /// opened during the skip. The stopping token is not consumed.
    pub(crate) fn skip_expression(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::Separator {
                match token.text.as_str() {
                    "(" | "[" => depth += 1,
                    ";" | "}" => break,
                    ")" | "]" if depth == 0 => break,
                    ")" | "]" => depth -= 1,
                    _ => {}
                }
            }
            self.advance();
        }
    }
}
