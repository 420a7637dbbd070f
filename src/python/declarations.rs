//! Definitions and imports

use super::parse::{ParseResult, Parser};
use crate::token::TokenKind;

impl<'t> Parser<'t> {
    /// Parse `def name(params) [-> annotation]: block`.
    pub(crate) fn parse_function_def(&mut self) -> ParseResult {
        self.advance(); // consume 'def'
        self.expect_kind(TokenKind::Identifier);
        self.expect_separator("(");

        if !self.match_separator(")") {
            loop {
                self.parse_parameter()?;
                if !self.match_separator(",") {
                    break;
                }
            }
            self.expect_separator(")");
        }

        if self.match_separator("->") {
            self.parse_expression()?;
        }

        self.parse_suite()
    }

    /// `name [: annotation] [= default]`
    fn parse_parameter(&mut self) -> ParseResult {
        self.expect_kind(TokenKind::Identifier);
        if self.match_separator(":") {
            self.parse_expression()?;
        }
        if self.match_operator(&["="]) {
            self.parse_expression()?;
        }
        Ok(())
    }

    /// Parse `class name [(bases)]: block`.
    pub(crate) fn parse_class_def(&mut self) -> ParseResult {
        self.advance(); // consume 'class'
        self.expect_kind(TokenKind::Identifier);

        if self.match_separator("(") && !self.match_separator(")") {
            loop {
                self.parse_expression()?;
                if !self.match_separator(",") {
                    break;
                }
            }
            self.expect_separator(")");
        }

        self.parse_suite()
    }

    /// Parse `import a.b [as c] {, ...}`.
    pub(crate) fn parse_import(&mut self) -> ParseResult {
        self.advance(); // consume 'import'
        loop {
            self.parse_dotted_name();
            self.parse_alias();
            if !self.match_separator(",") {
                break;
            }
        }
        Ok(())
    }

    /// Parse `from a.b import (* | name [as alias] {, ...})`.
    pub(crate) fn parse_from_import(&mut self) -> ParseResult {
        self.advance(); // consume 'from'
        self.parse_dotted_name();
        self.expect_token(TokenKind::Keyword, "import");

        if self.match_operator(&["*"]) {
            return Ok(());
        }

        loop {
            self.expect_kind(TokenKind::Identifier);
            self.parse_alias();
            if !self.match_separator(",") {
                break;
            }
        }
        Ok(())
    }

    fn parse_dotted_name(&mut self) {
        self.expect_kind(TokenKind::Identifier);
        while self.match_separator(".") {
            self.expect_kind(TokenKind::Identifier);
        }
    }

    fn parse_alias(&mut self) {
        if self.match_keyword("as") {
            self.expect_kind(TokenKind::Identifier);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::python::{parse, tokenize};

    fn diagnostics(source: &str) -> Vec<String> {
        parse(&tokenize(source)).diagnostics
    }

    #[test]
    fn test_empty_parameter_and_base_lists() {
        assert!(diagnostics("class A():\n    pass\ndef f():\n    pass\n").is_empty());
    }

    #[test]
    fn test_missing_function_name() {
        assert_eq!(
            diagnostics("def (x):\n    pass\n"),
            vec!["Python Syntax Error at line 1: Expected Identifier, got '('".to_string()]
        );
    }

    #[test]
    fn test_from_without_import_keyword() {
        assert_eq!(
            diagnostics("from os path\n"),
            vec!["Python Syntax Error at line 1: Expected Keyword 'import', got 'path'".to_string()]
        );
    }

    #[test]
    fn test_import_alias_needs_name() {
        assert_eq!(
            diagnostics("import numpy as\n"),
            vec!["Python Syntax Error at EOF: Expected Identifier".to_string()]
        );
    }
}
