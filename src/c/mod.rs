//! C-variant front end
//!
//! [`tokenize`] turns source text into [`Token`](crate::token::Token)s and
//! [`parse`] checks them against a small C grammar: functions with typed
//! parameters, declarations, `if`/`for`/`while`/`return`, and expressions
//! with the usual precedence. Malformed input never aborts the run; each
//! problem becomes one diagnostic and parsing resumes at the next statement
//! or function.

mod declarations;
mod expressions;
pub mod lexer;
mod parse;
mod statements;

pub use lexer::{tokenize, tokenize_bytes};
pub use parse::{parse, SyntaxError};
