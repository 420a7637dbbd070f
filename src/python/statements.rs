//! Statement parsing

use super::parse::{ParseResult, Parser, PythonSyntaxError};
use crate::token::{Token, TokenKind};
use tracing::debug;

/// Keywords that end the current block.
const BLOCK_KEYWORDS: [&str; 10] = [
    "def", "class", "if", "elif", "else", "for", "while", "try", "except", "finally",
];

/// Keywords that top-level recovery treats as the start of a statement.
const STATEMENT_KEYWORDS: [&str; 12] = [
    "def", "class", "if", "for", "while", "try", "import", "from", "return", "pass", "break",
    "continue",
];

pub(crate) const ASSIGNMENT_OPERATORS: [&str; 8] = ["=", "+=", "-=", "*=", "/=", "//=", "%=", "**="];

/// What a statement opening with an identifier turns out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatementShape {
    /// `name {.name} <assignment operator> ...`
    Assignment,
    /// `name {.name} ( ...`
    Call,
    /// Anything else, parsed as an expression
    Expression,
}

/// Classify the statement at the start of `tokens` by looking past a dotted
/// name for a call parenthesis or an assignment operator.
pub(crate) fn classify_statement(tokens: &[&Token]) -> StatementShape {
    let mut rest = match tokens.split_first() {
        Some((first, rest)) if first.kind == TokenKind::Identifier => rest,
        _ => return StatementShape::Expression,
    };

    while let Some((token, after)) = rest.split_first() {
        if token.is_separator(".") {
            rest = match after.split_first() {
                Some((name, after_name)) if name.kind == TokenKind::Identifier => after_name,
                _ => after,
            };
        } else if token.is_separator("(") {
            return StatementShape::Call;
        } else if token.kind == TokenKind::Operator
            && ASSIGNMENT_OPERATORS.contains(&token.text.as_str())
        {
            return StatementShape::Assignment;
        } else {
            break;
        }
    }
    StatementShape::Expression
}

impl<'t> Parser<'t> {
    pub(crate) fn parse_statement(&mut self) -> ParseResult {
        let Some(token) = self.peek() else {
            return Ok(());
        };

        match token.kind {
            TokenKind::Keyword => match token.text.as_str() {
                "def" => self.parse_function_def(),
                "class" => self.parse_class_def(),
                "if" => self.parse_if(),
                "for" => self.parse_for(),
                "while" => self.parse_while(),
                "try" => self.parse_try(),
                "import" => self.parse_import(),
                "from" => self.parse_from_import(),
                "return" => self.parse_return(),
                "pass" | "break" | "continue" => {
                    self.advance();
                    Ok(())
                }
                _ => self.parse_expression(),
            },
            TokenKind::Identifier => self.parse_assignment_or_expression(),
            TokenKind::Number
            | TokenKind::Operator
            | TokenKind::Separator
            | TokenKind::String
            | TokenKind::Comment
            | TokenKind::Indent
            | TokenKind::Dedent => self.parse_expression(),
        }
    }

    /// Parse statements until a block keyword or the end of input.
    pub(crate) fn parse_block(&mut self) -> ParseResult {
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::Keyword && BLOCK_KEYWORDS.contains(&token.text.as_str()) {
                break;
            }
            self.parse_statement()?;
        }
        Ok(())
    }

    /// Parse `: block`.
    pub(crate) fn parse_suite(&mut self) -> ParseResult {
        self.expect_separator(":");
        self.parse_block()
    }

    fn parse_if(&mut self) -> ParseResult {
        self.advance(); // consume 'if'
        self.parse_expression()?;
        self.parse_suite()?;

        while self.match_keyword("elif") {
            self.parse_expression()?;
            self.parse_suite()?;
        }
        if self.match_keyword("else") {
            self.parse_suite()?;
        }
        Ok(())
    }

    fn parse_for(&mut self) -> ParseResult {
        self.advance(); // consume 'for'
        self.expect_kind(TokenKind::Identifier);
        self.expect_token(TokenKind::Keyword, "in");
        self.parse_expression()?;
        self.parse_suite()?;

        if self.match_keyword("else") {
            self.parse_suite()?;
        }
        Ok(())
    }

    fn parse_while(&mut self) -> ParseResult {
        self.advance(); // consume 'while'
        self.parse_expression()?;
        self.parse_suite()?;

        if self.match_keyword("else") {
            self.parse_suite()?;
        }
        Ok(())
    }

    fn parse_try(&mut self) -> ParseResult {
        self.advance(); // consume 'try'
        self.parse_suite()?;

        let mut has_except = false;
        while self.match_keyword("except") {
            has_except = true;
            if self.check_kind(TokenKind::Identifier) {
                self.parse_expression()?;
                if self.match_keyword("as") {
                    self.expect_kind(TokenKind::Identifier);
                }
            }
            self.parse_suite()?;
        }

        if self.match_keyword("finally") {
            self.parse_suite()?;
        }

        // Only an empty `finally:` clause leaves `finally` two tokens back.
        let after_finally = self
            .position
            .checked_sub(2)
            .and_then(|index| self.tokens.get(index))
            .is_some_and(|t| t.text == "finally");
        if !has_except && !after_finally {
            self.diagnostics.record(PythonSyntaxError::MissingHandler);
        }
        Ok(())
    }

    fn parse_return(&mut self) -> ParseResult {
        self.advance(); // consume 'return'
        let has_value = self
            .peek()
            .is_some_and(|t| t.kind != TokenKind::Keyword && !t.is_separator(":"));
        if has_value {
            self.parse_expression()?;
        }
        Ok(())
    }

    fn parse_assignment_or_expression(&mut self) -> ParseResult {
        match classify_statement(&self.tokens[self.position..]) {
            StatementShape::Assignment => self.parse_assignment(),
            StatementShape::Call | StatementShape::Expression => self.parse_expression(),
        }
    }

    /// Parse `name {.name} op expression`.
    fn parse_assignment(&mut self) -> ParseResult {
        self.expect_kind(TokenKind::Identifier);
        while self.match_separator(".") {
            self.expect_kind(TokenKind::Identifier);
        }

        let Some(operator) = self.peek() else {
            self.diagnostics
                .record(PythonSyntaxError::MissingAssignmentOperator { line: None });
            return Ok(());
        };
        if !self.match_operator(&ASSIGNMENT_OPERATORS) {
            self.diagnostics.record(PythonSyntaxError::MissingAssignmentOperator {
                line: Some(operator.line),
            });
            return Ok(());
        }

        if self.is_at_end() {
            self.diagnostics.record(PythonSyntaxError::MissingRightHandSide {
                operator: operator.text.clone(),
            });
            return Ok(());
        }
        self.parse_expression()
    }

    /// Skip to the next statement keyword or identifier.
    pub(crate) fn recover_to_next_statement(&mut self) {
        let start = self.position;
        while let Some(token) = self.peek() {
            let starts_statement = match token.kind {
                TokenKind::Keyword => STATEMENT_KEYWORDS.contains(&token.text.as_str()),
                TokenKind::Identifier => true,
                _ => false,
            };
            if starts_statement {
                break;
            }
            self.advance();
        }
        debug!(
            target: "synscope::python::parser",
            skipped = self.position - start,
            "resynchronized at statement boundary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::tokenize;

    fn shape(source: &str) -> StatementShape {
        let tokens = tokenize(source);
        let refs: Vec<&Token> = tokens.iter().collect();
        classify_statement(&refs)
    }

    #[test]
    fn test_classify_statement() {
        assert_eq!(shape("x = 1"), StatementShape::Assignment);
        assert_eq!(shape("self.count += 1"), StatementShape::Assignment);
        assert_eq!(shape("total //= 2"), StatementShape::Assignment);
        assert_eq!(shape("print(x)"), StatementShape::Call);
        assert_eq!(shape("os.path.join(a, b)"), StatementShape::Call);
        assert_eq!(shape("x == 1"), StatementShape::Expression);
        assert_eq!(shape("items[0] = 1"), StatementShape::Expression);
        assert_eq!(shape("x"), StatementShape::Expression);
        assert_eq!(shape("42"), StatementShape::Expression);
    }

    #[test]
    fn test_classify_stops_at_first_non_name() {
        // Lookahead does not look past the call parenthesis
        assert_eq!(shape("f(x) = 1"), StatementShape::Call);
    }
}
