//! Diagnostic collection shared by both parsers
//!
//! Parsers report failures as typed errors (`c::SyntaxError`,
//! `python::PythonSyntaxError`) whose `Display` output is the diagnostic
//! text. [`Diagnostics`] keeps the rendered strings in detection order and
//! turns them into an [`AnalysisResult`] once the run is over.

use crate::token::TokenKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// What a parser was looking for when it hit something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Any token of the kind, e.g. `Identifier`
    Kind(TokenKind),
    /// A token of the kind with exact text, e.g. `Separator ')'`
    Token(TokenKind, &'static str),
    /// A grammar-level description, e.g. `expression`
    Rule(&'static str),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{}", kind),
            Expected::Token(kind, text) => write!(f, "{} '{}'", kind, text),
            Expected::Rule(rule) => f.write_str(rule),
        }
    }
}

/// A failure that no recovery boundary handles, such as runaway nesting.
///
/// It becomes a single `Unexpected error: ...` diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unexpected error: {0}")]
pub struct InternalFault(pub String);

impl InternalFault {
    pub fn nesting_too_deep(limit: usize, line: Option<usize>) -> Self {
        match line {
            Some(line) => InternalFault(format!(
                "nesting exceeds {} levels at line {}",
                limit, line
            )),
            None => InternalFault(format!("nesting exceeds {} levels at end of input", limit)),
        }
    }
}

/// Ordered, append-only list of diagnostic messages for one analysis run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, diagnostic: impl fmt::Display) {
        let message = diagnostic.to_string();
        debug!(target: "synscope::diagnostics", %message, "recorded diagnostic");
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult::from_diagnostics(self.messages)
    }
}

/// Outcome of parsing one token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub success: bool,
    pub diagnostics: Vec<String>,
}

impl AnalysisResult {
    pub fn from_diagnostics(diagnostics: Vec<String>) -> Self {
        Self {
            success: diagnostics.is_empty(),
            diagnostics,
        }
    }

    pub fn ok() -> Self {
        Self::from_diagnostics(Vec::new())
    }
}

static DIAGNOSTIC_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:Python )?Syntax Error at line (\d+)|at line (\d+)$")
        .expect("diagnostic line pattern is valid")
});

/// Extract the source line a diagnostic points at, if it names one.
pub fn line_of(diagnostic: &str) -> Option<usize> {
    let captures = DIAGNOSTIC_LINE.captures(diagnostic)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .and_then(|m| m.as_str().parse().ok())
}
