//! Editor pane rendering with token-based highlighting
//!
//! Colors come from the lexer's own tokens rather than a separate
//! highlighter, so what the pane shows is exactly what the parser sees.
//! Characters the lexer dropped stay unstyled. Lines named by a diagnostic
//! get a marker in the gutter and a tinted background.

use crate::language::Language;
use crate::token::{Token, TokenKind};
use crate::ui::editor::TextBuffer;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::{FxHashMap, FxHashSet};

const GUTTER_WIDTH: u16 = 6;

/// Everything the editor pane needs for one frame
pub struct EditorRenderData<'a> {
    pub buffer: &'a TextBuffer,
    pub language: Language,
    pub tokens: &'a [Token],
    pub error_lines: &'a FxHashSet<usize>,
    pub title: &'a str,
}

/// Number of chars a token covers on its source line.
fn source_width(language: Language, token: &Token) -> usize {
    let width = token.text.chars().count();
    match (language, token.kind) {
        // C string tokens exclude their quotes
        (Language::C, TokenKind::String) => width + 2,
        // Indent text is the width, not the characters
        (_, TokenKind::Indent | TokenKind::Dedent) => 0,
        _ => width,
    }
}

/// Build the styled spans for one line from the tokens that start on it.
fn highlight_line<'a>(text: &'a str, language: Language, tokens: &[&Token]) -> Vec<Span<'a>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut styles = vec![Style::default().fg(DEFAULT_THEME.fg); chars.len()];

    for token in tokens {
        let start = token.column.saturating_sub(1);
        let end = (start + source_width(language, token)).min(chars.len());
        let style = DEFAULT_THEME.token_style(token.kind);
        for slot in styles.iter_mut().take(end).skip(start) {
            *slot = style;
        }
    }

    // Merge runs of equal style into spans over the line text
    let mut spans = Vec::new();
    let mut run_start = 0;
    for index in 1..=chars.len() {
        if index == chars.len() || styles[index] != styles[run_start] {
            let from = chars[run_start].0;
            let to = chars.get(index).map_or(text.len(), |(offset, _)| *offset);
            spans.push(Span::styled(&text[from..to], styles[run_start]));
            run_start = index;
        }
    }
    spans
}

/// Render the editor pane and place the terminal cursor when focused.
pub fn render_editor_pane(
    frame: &mut Frame,
    area: Rect,
    data: &EditorRenderData<'_>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" {} ", data.title))
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1
    let (cursor_row, cursor_column) = data.buffer.cursor();

    // Keep the cursor row on screen
    if cursor_row < *scroll_offset {
        *scroll_offset = cursor_row;
    } else if cursor_row >= *scroll_offset + visible_height {
        *scroll_offset = cursor_row + 1 - visible_height;
    }

    let mut tokens_by_line: FxHashMap<usize, Vec<&Token>> = FxHashMap::default();
    for token in data.tokens {
        tokens_by_line.entry(token.line).or_default().push(token);
    }

    let visible_lines: Vec<Line> = data
        .buffer
        .lines()
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, text)| {
            let line_num = idx + 1;
            let has_error = data.error_lines.contains(&line_num);
            let is_current = is_focused && idx == cursor_row;

            let (marker, num_style) = if has_error {
                (
                    "!",
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                )
            } else if is_current {
                (
                    " ",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let line_tokens = tokens_by_line.get(&line_num).map_or(&[][..], Vec::as_slice);
            let mut content = highlight_line(text, data.language, line_tokens);

            let background = if has_error {
                Some(DEFAULT_THEME.error_line_bg)
            } else if is_current {
                Some(DEFAULT_THEME.current_line_bg)
            } else {
                None
            };
            if let Some(bg) = background {
                for span in &mut content {
                    span.style = span.style.bg(bg);
                }
            }

            let mut spans = vec![Span::styled(format!("{}{:4} ", marker, line_num), num_style)];
            spans.extend(content);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);

    if is_focused {
        let x = area.x + 1 + GUTTER_WIDTH + cursor_column as u16;
        let y = area.y + 1 + (cursor_row - *scroll_offset) as u16;
        let max_x = area.right().saturating_sub(2);
        frame.set_cursor_position((x.min(max_x), y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(spans: &[Span<'a>]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_spans_follow_token_boundaries() {
        let text = "int x = 10;";
        let tokens = crate::c::tokenize(text);
        let refs: Vec<&Token> = tokens.iter().collect();
        let spans = highlight_line(text, Language::C, &refs);

        assert_eq!(texts(&spans), ["int", " ", "x", " ", "=", " ", "10", ";"]);
        assert_eq!(spans[0].style, DEFAULT_THEME.token_style(TokenKind::Keyword));
        assert_eq!(spans[6].style, DEFAULT_THEME.token_style(TokenKind::Number));
    }

    #[test]
    fn test_c_string_covers_quotes() {
        let text = r#"s("hi");"#;
        let tokens = crate::c::tokenize(text);
        let refs: Vec<&Token> = tokens.iter().collect();
        let spans = highlight_line(text, Language::C, &refs);

        assert!(texts(&spans).contains(&"\"hi\"".to_string()));
    }

    #[test]
    fn test_dropped_characters_stay_plain() {
        let text = "x = $y";
        let tokens = crate::python::tokenize(text);
        let refs: Vec<&Token> = tokens.iter().collect();
        let spans = highlight_line(text, Language::Python, &refs);

        let last = spans.last().map(|s| s.content.to_string());
        assert_eq!(last.as_deref(), Some(" $y"));
    }

    #[test]
    fn test_empty_line_has_no_spans() {
        assert!(highlight_line("", Language::C, &[]).is_empty());
    }
}
