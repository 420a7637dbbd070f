//! # Introduction
//!
//! synscope is a lexical and syntax analyzer for two teaching-sized
//! languages: a C subset and a Python subset. Each language has its own
//! lexer and recursive-descent recognizer. Parsing never stops at the first
//! problem; it records a diagnostic and resynchronizes, so one run reports
//! as many mistakes as it can find. A terminal editor shows tokens and
//! diagnostics live while typing.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AnalysisResult { success, diagnostics }
//! ```
//!
//! 1. [`token`]: the [`token::Token`] model shared by both languages.
//! 2. [`c`] and [`python`]: `tokenize` and `parse` for each language.
//! 3. [`diagnostics`]: the diagnostic collector and [`diagnostics::AnalysisResult`].
//! 4. [`language`]: [`language::Language`] dispatch and sample programs.
//! 5. [`ui`]: ratatui-based editor; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use synscope::language::Language;
//!
//! let analysis = Language::C.analyze("int main( { return 0; } ");
//! assert!(!analysis.result.success);
//! assert_eq!(
//!     analysis.result.diagnostics[0],
//!     "Syntax Error at line 1, column 11: Expected Separator ')', got '{'"
//! );
//! ```

pub mod c;
pub mod diagnostics;
pub mod language;
pub mod python;
pub mod token;
pub mod ui;
