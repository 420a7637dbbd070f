//! Main TUI application state and logic

use crate::diagnostics::line_of;
use crate::language::{Analysis, Language};
use crate::ui::editor::TextBuffer;
use crate::ui::panes::{self, EditorRenderData, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Editor,
    Tokens,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (editor -> tokens -> diagnostics)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Editor => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Editor,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Editor => FocusedPane::Diagnostics,
            FocusedPane::Tokens => FocusedPane::Editor,
            FocusedPane::Diagnostics => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The text being analyzed
    pub editor: TextBuffer,

    pub language: Language,

    /// Result of the last analysis of `editor`
    pub analysis: Analysis,

    /// Where Ctrl-S writes; `None` for the scratch buffer
    pub path: Option<PathBuf>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub editor_scroll: usize,
    pub tokens_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app over `source`, analyzed as `language`.
    pub fn new(source: &str, language: Language, path: Option<PathBuf>) -> Self {
        App {
            editor: TextBuffer::from_text(source),
            language,
            analysis: language.analyze(source),
            path,
            focused_pane: FocusedPane::Editor,
            editor_scroll: 0,
            tokens_scroll: 0,
            diagnostics_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Editor (left) | Tokens over Diagnostics (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let error_lines = self.error_lines();
        let title = match self.file_name() {
            Some(name) => format!("{} [{}]", name, self.language),
            None => format!("Source [{}]", self.language),
        };

        panes::render_editor_pane(
            frame,
            columns[0],
            &EditorRenderData {
                buffer: &self.editor,
                language: self.language,
                tokens: &self.analysis.tokens,
                error_lines: &error_lines,
                title: &title,
            },
            self.focused_pane == FocusedPane::Editor,
            &mut self.editor_scroll,
        );

        panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.analysis.tokens,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        panes::render_diagnostics_pane(
            frame,
            right_rows[1],
            self.analysis.diagnostics(),
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                language: self.language,
                file_name: self.file_name(),
                token_count: self.analysis.tokens.len(),
                diagnostic_count: self.analysis.diagnostics().len(),
                cursor: self.editor.cursor(),
                message: &self.status_message,
            },
        );
    }

    /// Source lines named by the current diagnostics.
    pub fn error_lines(&self) -> FxHashSet<usize> {
        self.analysis
            .diagnostics()
            .iter()
            .filter_map(|d| line_of(d))
            .collect()
    }

    fn file_name(&self) -> Option<&str> {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('s') if ctrl => self.save(),
            KeyCode::Tab => self.focused_pane = self.focused_pane.next(),
            KeyCode::BackTab => self.focused_pane = self.focused_pane.prev(),
            KeyCode::F(2) => self.switch_language(),
            _ => match self.focused_pane {
                FocusedPane::Editor => self.handle_editor_key(key, ctrl),
                FocusedPane::Tokens => scroll(&mut self.tokens_scroll, key.code),
                FocusedPane::Diagnostics => scroll(&mut self.diagnostics_scroll, key.code),
            },
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent, ctrl: bool) {
        let edited = match key.code {
            KeyCode::Char(c) if !ctrl => {
                self.editor.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.editor.insert_newline();
                true
            }
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Delete => self.editor.delete(),
            KeyCode::Left => {
                self.editor.move_left();
                false
            }
            KeyCode::Right => {
                self.editor.move_right();
                false
            }
            KeyCode::Up => {
                self.editor.move_up();
                false
            }
            KeyCode::Down => {
                self.editor.move_down();
                false
            }
            KeyCode::Home => {
                self.editor.move_home();
                false
            }
            KeyCode::End => {
                self.editor.move_end();
                false
            }
            _ => false,
        };

        if edited {
            self.reanalyze();
        }
    }

    /// Re-run the analysis on the current buffer.
    pub fn reanalyze(&mut self) {
        self.analysis = self.language.analyze(&self.editor.text());
        debug!(
            target: "synscope::ui",
            diagnostics = self.analysis.diagnostics().len(),
            "re-analyzed buffer"
        );
    }

    /// Switch to the other language, loading its sample if the buffer still
    /// holds the untouched sample of the current one.
    fn switch_language(&mut self) {
        let untouched = self.editor.text() == self.language.sample();
        self.language = self.language.other();
        if untouched {
            self.editor = TextBuffer::from_text(self.language.sample());
            self.editor_scroll = 0;
        }
        self.tokens_scroll = 0;
        self.diagnostics_scroll = 0;
        self.reanalyze();
        self.status_message = format!("Language: {}", self.language);
        info!(target: "synscope::ui", language = self.language.name(), "switched language");
    }

    fn save(&mut self) {
        let Some(path) = &self.path else {
            self.status_message = "No file to save to".to_string();
            return;
        };

        match fs::write(path, self.editor.text()) {
            Ok(()) => {
                self.status_message = format!("Saved {}", path.display());
                info!(target: "synscope::ui", path = %path.display(), "saved buffer");
            }
            Err(err) => {
                self.status_message = format!("Save failed: {}", err);
                warn!(target: "synscope::ui", path = %path.display(), %err, "save failed");
            }
        }
    }
}

fn scroll(offset: &mut usize, code: KeyCode) {
    match code {
        KeyCode::Up => *offset = offset.saturating_sub(1),
        KeyCode::Down => *offset = offset.saturating_add(1),
        KeyCode::PageUp => *offset = offset.saturating_sub(10),
        KeyCode::PageDown => *offset = offset.saturating_add(10),
        KeyCode::Home => *offset = 0,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => press(app, KeyCode::Enter),
                c => press(app, KeyCode::Char(c)),
            }
        }
    }

    #[test]
    fn test_sample_starts_clean() {
        let app = App::new(Language::C.sample(), Language::C, None);
        assert!(app.analysis.is_clean());
        assert!(app.error_lines().is_empty());
    }

    #[test]
    fn test_typing_reanalyzes() {
        let mut app = App::new("", Language::Python, None);
        type_text(&mut app, "x =");
        assert_eq!(
            app.analysis.diagnostics(),
            ["Python Syntax Error at EOF: Expected expression after '='"]
        );

        type_text(&mut app, " 1");
        assert!(app.analysis.is_clean());
        assert_eq!(app.analysis.tokens.len(), 3);
    }

    #[test]
    fn test_error_lines_follow_diagnostics() {
        let app = App::new("int main() {\n  int x = 1\n  return x;\n}", Language::C, None);
        assert_eq!(app.error_lines(), FxHashSet::from_iter([3]));
    }

    #[test]
    fn test_switch_language_swaps_untouched_sample() {
        let mut app = App::new(Language::C.sample(), Language::C, None);
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.language, Language::Python);
        assert_eq!(app.editor.text(), Language::Python.sample());
        assert!(app.analysis.is_clean());
    }

    #[test]
    fn test_switch_language_keeps_edited_text() {
        let mut app = App::new(Language::C.sample(), Language::C, None);
        press(&mut app, KeyCode::End);
        type_text(&mut app, " ");
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.language, Language::Python);
        assert_eq!(app.editor.text(), "int main() { \n  return 0;\n}");
        assert!(!app.analysis.is_clean());
    }

    #[test]
    fn test_focus_cycles_and_routes_keys() {
        let mut app = App::new("x", Language::Python, None);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);

        // Typing outside the editor does not edit
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.editor.text(), "x");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.tokens_scroll, 1);

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Editor);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new("", Language::C, None);
        app.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut app = App::new("", Language::C, None);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_save_without_path() {
        let mut app = App::new("", Language::C, None);
        app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(app.status_message, "No file to save to");
        assert_eq!(app.editor.text(), "");
    }

    #[test]
    fn test_save_writes_buffer() {
        let path = std::env::temp_dir().join(format!("synscope-save-{}.py", std::process::id()));
        let mut app = App::new("pass", Language::Python, Some(path.clone()));
        type_text(&mut app, "x = 1\n");
        app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        let written = fs::read_to_string(&path).expect("saved file is readable");
        let _ = fs::remove_file(&path);
        assert_eq!(written, "x = 1\npass");
    }
}
