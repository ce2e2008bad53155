use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::theme::{ERROR, FORM_ACTIVE, MUTED};

pub const CREDIT_AUTHOR: &str = "Simeon Georgiev";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if app.input_active {
        spans.push(hint("tab", "switch field"));
        spans.push(hint("enter", "search"));
        spans.push(hint("esc", "cancel"));
    } else {
        spans.push(hint("←↑↓→", "navigate"));
        spans.push(hint("enter", "open"));
        spans.push(hint("/", "search"));
        spans.push(hint("r", "refresh"));
        spans.push(hint("q", "quit"));
    }

    spans.push(Span::styled("  Created with ", Style::default().fg(MUTED)));
    spans.push(Span::styled("♥", Style::default().fg(ERROR)));
    spans.push(Span::styled(
        format!(" by {CREDIT_AUTHOR}"),
        Style::default().fg(MUTED),
    ));

    if let Some((msg, _)) = &app.flash_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(msg, Style::default().fg(FORM_ACTIVE)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(format!(" {key}:{desc} "), Style::default().fg(MUTED))
}
