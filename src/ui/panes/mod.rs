//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: editor with token-based highlighting and diagnostic markers
//! - [`tokens`]: the token stream, one token per row
//! - [`diagnostics`]: parser diagnostics, or "No syntax errors"
//! - [`status`]: status bar with keybindings and analysis state
//!
//! Each pane module exports a `render_*` function that draws into a given
//! area and clamps the scroll offset it is handed.

pub mod diagnostics;
pub mod source;
pub mod status;
pub mod tokens;

pub use diagnostics::render_diagnostics_pane;
pub use source::{render_editor_pane, EditorRenderData};
pub use status::{render_status_bar, StatusRenderData};
pub use tokens::render_tokens_pane;
