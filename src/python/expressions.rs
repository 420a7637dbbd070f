//! Expression parsing
//!
//! Loosest to tightest: `or`, `and`, `not`, comparison, additive,
//! multiplicative, unary, power, atom.

use super::parse::{ParseResult, Parser, PythonSyntaxError};
use crate::diagnostics::Expected;
use crate::token::TokenKind;

const COMPARISON_OPERATORS: [&str; 6] = ["<", ">", "<=", ">=", "==", "!="];

impl<'t> Parser<'t> {
    pub(crate) fn parse_expression(&mut self) -> ParseResult {
        self.nested(Self::parse_or)
    }

    fn parse_or(&mut self) -> ParseResult {
        self.parse_and()?;
        while self.match_keyword("or") {
            self.parse_and()?;
        }
        Ok(())
    }

    fn parse_and(&mut self) -> ParseResult {
        self.parse_not()?;
        while self.match_keyword("and") {
            self.parse_not()?;
        }
        Ok(())
    }

    fn parse_not(&mut self) -> ParseResult {
        if self.match_keyword("not") {
            return self.nested(Self::parse_not);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> ParseResult {
        self.parse_arithmetic()?;
        while self.match_operator(&COMPARISON_OPERATORS)
            || self.match_keyword("in")
            || self.match_keyword("is")
        {
            self.parse_arithmetic()?;
        }
        Ok(())
    }

    fn parse_arithmetic(&mut self) -> ParseResult {
        self.parse_term()?;
        while self.match_operator(&["+", "-"]) {
            self.parse_term()?;
        }
        Ok(())
    }

    fn parse_term(&mut self) -> ParseResult {
        self.parse_factor()?;
        while self.match_operator(&["*", "/", "//", "%"]) {
            self.parse_factor()?;
        }
        Ok(())
    }

    fn parse_factor(&mut self) -> ParseResult {
        if self.match_operator(&["+", "-", "~"]) {
            return self.nested(Self::parse_factor);
        }
        self.parse_power()
    }

    /// `atom [** factor]`; the right operand may itself be a power.
    fn parse_power(&mut self) -> ParseResult {
        self.parse_atom()?;
        if self.match_operator(&["**"]) {
            return self.nested(Self::parse_factor);
        }
        Ok(())
    }

    fn parse_atom(&mut self) -> ParseResult {
        let Some(token) = self.peek() else {
            self.report_expected(Expected::Rule("expression"));
            return Ok(());
        };

        match (token.kind, token.text.as_str()) {
            (TokenKind::Number | TokenKind::String, _)
            | (TokenKind::Keyword, "True" | "False" | "None") => {
                self.advance();
                Ok(())
            }
            (TokenKind::Identifier, _) => {
                self.advance();
                self.parse_trailers()
            }
            (TokenKind::Separator, "(") => {
                self.advance();
                self.parse_expression()?;
                self.expect_separator(")");
                Ok(())
            }
            (TokenKind::Separator, "[") => {
                self.advance();
                if !self.match_separator("]") {
                    self.parse_expression_list()?;
                    self.expect_separator("]");
                }
                Ok(())
            }
            (TokenKind::Separator, "{") => {
                self.advance();
                if !self.match_separator("}") {
                    loop {
                        self.parse_expression()?;
                        self.expect_separator(":");
                        self.parse_expression()?;
                        if !self.match_separator(",") {
                            break;
                        }
                    }
                    self.expect_separator("}");
                }
                Ok(())
            }
            _ => {
                self.diagnostics.record(PythonSyntaxError::UnexpectedToken {
                    text: token.text.clone(),
                    line: token.line,
                });
                self.advance();
                Ok(())
            }
        }
    }

    /// Calls, subscripts and attribute access after a name.
    fn parse_trailers(&mut self) -> ParseResult {
        loop {
            if self.match_separator("(") {
                if !self.match_separator(")") {
                    self.parse_expression_list()?;
                    self.expect_separator(")");
                }
            } else if self.match_separator("[") {
                self.parse_expression()?;
                self.expect_separator("]");
            } else if self.match_separator(".") {
                self.expect_kind(TokenKind::Identifier);
            } else {
                return Ok(());
            }
        }
    }

    /// `expression {, expression}`
    fn parse_expression_list(&mut self) -> ParseResult {
        loop {
            self.parse_expression()?;
            if !self.match_separator(",") {
                return Ok(());
            }
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
    fn test_operator_precedence_levels() {
        assert!(diagnostics("ok = not a or b and c < d + e * -f ** 2 // g is None\n").is_empty());
        assert!(diagnostics("found = key in table and key != 'x'\n").is_empty());
    }

    #[test]
    fn test_right_nested_power() {
        assert!(diagnostics("x = 2 ** -3 ** 2\n").is_empty());
    }

    #[test]
    fn test_trailer_chain() {
        assert!(diagnostics("self.items[0].name.upper()\nconfig.get('a', 1)[2]\n").is_empty());
    }

    #[test]
    fn test_empty_parentheses_are_not_a_tuple() {
        assert_eq!(
            diagnostics("x = ()\n"),
            vec![
                "Unexpected token: ) at line 1".to_string(),
                "Python Syntax Error at EOF: Expected Separator ')'".to_string(),
            ]
        );
    }

    #[test]
    fn test_dict_entry_needs_colon() {
        assert_eq!(
            diagnostics("d = {'a' 1}\n"),
            vec!["Python Syntax Error at line 1: Expected Separator ':', got '1'".to_string()]
        );
    }

    #[test]
    fn test_keyword_in_expression_position() {
        assert_eq!(
            diagnostics("x = lambda\n"),
            vec!["Unexpected token: lambda at line 1".to_string()]
        );
    }
}
