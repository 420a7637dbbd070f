//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, re-analysis on edit
//! - **[`editor`]**: the line-based text buffer being edited
//! - **[`panes`]**: stateless render functions for each visible pane (editor, tokens,
//!   diagnostics, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the source text and
//! a [`Language`] and call [`App::run`] to start the event loop.
//!
//! [`Language`]: crate::language::Language
//! [`App::run`]: app::App::run

pub mod app;
pub mod editor;
pub mod panes;
pub mod theme;

pub use app::App;
