//! Python-variant front end
//!
//! [`tokenize`] works line by line and records indentation as `Indent`
//! tokens; [`parse`] ignores layout tokens and treats any block keyword as
//! the end of the current block. Failed expectations are recorded and the
//! parser keeps going from where it stands, so one mistake can produce
//! several diagnostics.

mod declarations;
mod expressions;
pub mod lexer;
mod parse;
mod statements;

pub use lexer::{tokenize, tokenize_bytes};
pub use parse::{parse, PythonSyntaxError};
