//! Status bar rendering with keybindings and analysis state

use crate::language::Language;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Values shown in the status bar
pub struct StatusRenderData<'a> {
    pub language: Language,
    pub file_name: Option<&'a str>,
    pub token_count: usize,
    pub diagnostic_count: usize,
    pub cursor: (usize, usize),
    pub message: &'a str,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData<'_>) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar_bg = DEFAULT_THEME.current_line_bg;
    let clean = data.diagnostic_count == 0;

    // Left side: language, file, counts and message
    let left_spans = vec![
        Span::styled(
            format!(" {} ", data.language),
            Style::default()
                .bg(if clean {
                    DEFAULT_THEME.success
                } else {
                    DEFAULT_THEME.error
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " {} {}:{} ",
                data.file_name.unwrap_or("[scratch]"),
                data.cursor.0 + 1,
                data.cursor.1 + 1
            ),
            Style::default().bg(bar_bg).fg(DEFAULT_THEME.fg),
        ),
        Span::styled("│", Style::default().bg(bar_bg).fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!(
                " {} tokens, {} errors ",
                data.token_count, data.diagnostic_count
            ),
            Style::default().bg(bar_bg).fg(if clean {
                DEFAULT_THEME.fg
            } else {
                DEFAULT_THEME.error
            }),
        ),
        Span::styled("│", Style::default().bg(bar_bg).fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!(" {} ", data.message),
            Style::default().bg(bar_bg).fg(DEFAULT_THEME.secondary),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(bar_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default().bg(bar_bg).fg(DEFAULT_THEME.fg);
    let sep_style = Style::default().bg(bar_bg).fg(DEFAULT_THEME.comment);

    let right_spans = vec![
        Span::styled(" Tab ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" F2 ", key_style),
        Span::styled(format!(" {} ", data.language.other()), desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ^S ", key_style),
        Span::styled(" save ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" Esc ", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(bar_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
