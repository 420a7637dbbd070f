//! Statement parsing

use super::expressions::ASSIGNMENT_OPERATORS;
use super::parse::{is_type_keyword, ParseResult, Parser, SyntaxError};
use crate::diagnostics::Expected;
use crate::token::TokenKind;
use tracing::debug;

impl<'t> Parser<'t> {
    /// Parse `{ statement* }`.
    pub(crate) fn parse_block(&mut self) -> ParseResult {
        self.expect_separator("{")?;
        self.parse_block_body()
    }

    /// Parse statements up to and including the closing `}` of a block whose
    /// `{` was already consumed.
    pub(crate) fn parse_block_body(&mut self) -> ParseResult {
        loop {
            if self.is_at_end() {
                return Err(SyntaxError::UnexpectedEof {
                    expected: Expected::Token(TokenKind::Separator, "}"),
                });
            }
            if self.match_separator("}") {
                return Ok(());
            }
            self.parse_statement()?;
        }
    }

    /// Parse one statement, recording and skipping it if it is malformed.
    pub(crate) fn parse_statement(&mut self) -> ParseResult {
        match self.nested(Self::statement) {
            Err(err @ SyntaxError::Internal(_)) => Err(err),
            Err(err) => {
                self.diagnostics.record(err);
                self.synchronize_statement();
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    fn statement(&mut self) -> ParseResult {
        let Some(token) = self.peek() else {
            return Err(self.error_here(Expected::Rule("statement")));
        };

        match token.kind {
            TokenKind::Keyword => match token.text.as_str() {
                "if" => self.parse_if(),
                "for" => self.parse_for(),
                "while" => self.parse_while(),
                "return" => self.parse_return(),
                _ if is_type_keyword(token) => self.parse_declaration(),
                _ => self.parse_expression_statement(),
            },
            TokenKind::Separator => match token.text.as_str() {
                ";" => {
                    self.advance();
                    Ok(())
                }
                "{" => {
                    self.advance();
                    self.parse_block_body()
                }
                _ => self.parse_expression_statement(),
            },
            TokenKind::Identifier => self.parse_identifier_statement(),
            TokenKind::Number
            | TokenKind::Operator
            | TokenKind::String
            | TokenKind::Comment
            | TokenKind::Indent
            | TokenKind::Dedent => self.parse_expression_statement(),
        }
    }

    /// Body of `if`/`for`/`while`: a braced block or a single statement.
    fn parse_body(&mut self) -> ParseResult {
        if self.match_separator("{") {
            self.parse_block_body()
        } else {
            self.parse_statement()
        }
    }

    fn parse_if(&mut self) -> ParseResult {
        self.advance(); // consume 'if'
        self.expect_separator("(")?;
        self.parse_expression()?;
        self.expect_separator(")")?;
        self.parse_body()?;

        if self.match_keyword("else") {
            self.parse_body()?;
        }
        Ok(())
    }

    fn parse_for(&mut self) -> ParseResult {
        self.advance(); // consume 'for'
        self.expect_separator("(")?;

        // Init
        if !self.match_separator(";") {
            if self.peek().is_some_and(is_type_keyword) {
                self.parse_declarator()?;
            } else {
                self.parse_assignment()?;
            }
            self.expect_separator(";")?;
        }

        // Condition
        if !self.match_separator(";") {
            self.parse_expression()?;
            self.expect_separator(";")?;
        }

        // Increment
        if !self.match_separator(")") {
            self.parse_expression()?;
            self.expect_separator(")")?;
        }

        self.parse_body()
    }

    fn parse_while(&mut self) -> ParseResult {
        self.advance(); // consume 'while'
        self.expect_separator("(")?;
        self.parse_expression()?;
        self.expect_separator(")")?;
        self.parse_body()
    }

    fn parse_return(&mut self) -> ParseResult {
        self.advance(); // consume 'return'
        if self.match_separator(";") {
            return Ok(());
        }
        self.parse_expression()?;
        self.expect_separator(";")
    }

    /// Statements opening with an identifier: a call, an assignment or a
    /// postfix increment. Anything else rewinds and parses as an expression.
    fn parse_identifier_statement(&mut self) -> ParseResult {
        let start = self.position;
        self.advance();

        if self.match_separator("(") {
            self.parse_call_arguments()?;
            return self.expect_separator(";");
        }
        if self.match_operator(ASSIGNMENT_OPERATORS) {
            self.parse_expression()?;
            return self.expect_separator(";");
        }
        if self.match_operator(&["++", "--"]) {
            return self.expect_separator(";");
        }

        self.position = start;
        self.parse_expression_statement()
    }

    fn parse_expression_statement(&mut self) -> ParseResult {
        self.parse_expression()?;
        self.expect_separator(";")
    }

    /// Skip through the next `;`, or up to (not past) a `}`.
    fn synchronize_statement(&mut self) {
        let start = self.position;
        while let Some(token) = self.peek() {
            if token.is_separator("}") {
                break;
            }
            self.advance();
            if token.is_separator(";") {
                break;
            }
        }
        debug!(
            target: "synscope::c::parser",
            skipped = self.position - start,
            "resynchronized at statement boundary"
        );
    }
}
