//! Token list pane rendering

use crate::token::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// One list row: `Kind: text (line L, col C)` with the kind colored.
fn token_item(token: &Token) -> ListItem<'_> {
    ListItem::new(Line::from(vec![
        Span::styled(token.kind.name(), DEFAULT_THEME.token_style(token.kind)),
        Span::styled(": ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(token.text.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
        Span::styled(
            format!(" (line {}, col {})", token.line, token.column),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ]))
}

/// Render the token list pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Clamp scroll offset only if content exceeds visible area
    if tokens.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(tokens.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = tokens
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(token_item)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
