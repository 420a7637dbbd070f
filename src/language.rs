//! Language selection and the tokenize-then-parse pipeline

use crate::diagnostics::AnalysisResult;
use crate::token::Token;
use crate::{c, python};
use clap::ValueEnum;
use std::fmt;
use std::path::Path;
use tracing::debug;

const C_SAMPLE: &str = "int main() {\n  return 0;\n}";

const PYTHON_SAMPLE: &str = "def main():\n    print(\"Hello, World!\")\n    return 0\n\nif __name__ == \"__main__\":\n    main()";

/// Source language understood by the analyzer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Language {
    #[default]
    C,
    Python,
}

impl Language {
    /// Infer the language from a file extension (`.c`/`.h`, `.py`/`.pyw`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "c" | "h" => Some(Language::C),
            "py" | "pyw" => Some(Language::Python),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Python => "Python",
        }
    }

    pub fn tokenize(self, source: &str) -> Vec<Token> {
        match self {
            Language::C => c::tokenize(source),
            Language::Python => python::tokenize(source),
        }
    }

    pub fn parse(self, tokens: &[Token]) -> AnalysisResult {
        match self {
            Language::C => c::parse(tokens),
            Language::Python => python::parse(tokens),
        }
    }

    /// Tokenize and parse `source` in one go.
    pub fn analyze(self, source: &str) -> Analysis {
        let tokens = self.tokenize(source);
        let result = self.parse(&tokens);
        debug!(
            target: "synscope::language",
            language = self.name(),
            tokens = tokens.len(),
            success = result.success,
            "analyzed source"
        );
        Analysis {
            language: self,
            tokens,
            result,
        }
    }

    /// The program the editor starts with for this language.
    pub fn sample(self) -> &'static str {
        match self {
            Language::C => C_SAMPLE,
            Language::Python => PYTHON_SAMPLE,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Language::C => Language::Python,
            Language::Python => Language::C,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tokens and parse outcome for one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub language: Language,
    pub tokens: Vec<Token>,
    pub result: AnalysisResult,
}

impl Analysis {
    pub fn is_clean(&self) -> bool {
        self.result.success
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.result.diagnostics
    }
}
