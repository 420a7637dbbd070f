//! Diagnostics pane rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Render the diagnostics pane; long messages wrap.
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    diagnostics: &[String],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = if diagnostics.is_empty() {
        " Diagnostics ".to_string()
    } else {
        format!(" Diagnostics ({}) ", diagnostics.len())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused))
        .padding(Padding::new(1, 0, 0, 0));

    if diagnostics.is_empty() {
        let paragraph = Paragraph::new("No syntax errors").block(block).style(
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(paragraph, area);
        return;
    }

    *scroll_offset = (*scroll_offset).min(diagnostics.len() - 1);

    let lines: Vec<Line> = diagnostics
        .iter()
        .skip(*scroll_offset)
        .map(|message| {
            Line::from(vec![
                Span::styled("✗ ", Style::default().fg(DEFAULT_THEME.error)),
                Span::styled(message.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
