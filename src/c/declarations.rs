//! Function and variable declaration parsing

use super::parse::{is_type_keyword, ParseResult, Parser};
use crate::diagnostics::Expected;
use crate::token::TokenKind;
use tracing::debug;

impl<'t> Parser<'t> {
    /// Parse `returnType IDENT ( params ) block`.
    pub(crate) fn parse_function(&mut self) -> ParseResult {
        self.expect_type()?;
        self.expect_kind(TokenKind::Identifier)?;
        self.expect_separator("(")?;

        // The parameter list is only entered when it opens with a type.
        if self.peek().is_some_and(is_type_keyword) {
            self.parse_parameter()?;
            while self.match_separator(",") {
                self.parse_parameter()?;
            }
        }

        self.expect_separator(")")?;
        self.parse_block()
    }

    fn parse_parameter(&mut self) -> ParseResult {
        self.expect_type()?;
        self.expect_kind(TokenKind::Identifier)
    }

    fn expect_type(&mut self) -> ParseResult {
        if self.peek().is_some_and(is_type_keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(Expected::Kind(TokenKind::Keyword)))
        }
    }

    /// Parse `typeKeyword IDENT [= expression] ;` inside a block.
    pub(crate) fn parse_declaration(&mut self) -> ParseResult {
        self.parse_declarator()?;
        self.expect_separator(";")
    }

    /// Parse `typeKeyword IDENT [= expression]`, shared with `for` initializers.
    pub(crate) fn parse_declarator(&mut self) -> ParseResult {
        self.expect_type()?;
        self.expect_kind(TokenKind::Identifier)?;
        if self.match_operator(&["="]) {
            self.parse_expression()?;
        }
        Ok(())
    }

    fn starts_function(&self) -> bool {
        self.peek().is_some_and(is_type_keyword)
            && self
                .peek_ahead(1)
                .is_some_and(|t| t.kind == TokenKind::Identifier)
            && self.peek_ahead(2).is_some_and(|t| t.is_separator("("))
    }

    /// Skip past a broken function: stop once a closing brace brings the
    /// brace depth back to zero, or at the signature of the next function.
    pub(crate) fn recover_to_next_function(&mut self) {
        let start = self.position;
        let mut depth: isize = 0;

        while let Some(token) = self.peek() {
            if token.is_separator("{") {
                depth += 1;
            } else if token.is_separator("}") {
                depth -= 1;
                self.advance();
                if depth <= 0 {
                    break;
                }
                continue;
            } else if depth <= 0 && self.starts_function() {
                break;
            }
            self.advance();
        }

        debug!(
            target: "synscope::c::parser",
            skipped = self.position - start,
            "resynchronized at function boundary"
        );
    }
}
