use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::results::{view, Card, ResultsView, PLACEHOLDER};
use crate::ui::theme::{state_color, ACCENT, ERROR, LINK, MUTED};

pub const CARD_WIDTH: u16 = 56;
pub const CARD_HEIGHT: u16 = 6;

/// Cards per row for a grid `width` columns wide (borders included).
pub fn columns_for(width: u16) -> usize {
    usize::from((width.saturating_sub(2) / CARD_WIDTH).max(1))
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.pending.is_some() {
        format!(" Issues · {} (loading...) ", app.target)
    } else {
        format!(" Issues · {} ", app.target)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    match view(&app.outcome) {
        ResultsView::Placeholder => {
            f.render_widget(Paragraph::new(PLACEHOLDER), inner);
        }
        ResultsView::Failure(line) => {
            let paragraph = Paragraph::new(line)
                .style(Style::default().fg(ERROR))
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, inner);
        }
        ResultsView::Cards(cards) => {
            let cols = columns_for(area.width);
            let selected_key = app.outcome.issues().get(app.selected_card).map(|i| i.id);
            for (idx, rect) in card_rects(inner, cards.len(), cols, app.selected_card) {
                let card = &cards[idx];
                render_card(f, rect, card, Some(card.key) == selected_key);
            }
        }
    }
}

/// Visible card slots as `(card index, rect)`, scrolled so the row holding
/// `selected` is on screen.
pub fn card_rects(inner: Rect, count: usize, cols: usize, selected: usize) -> Vec<(usize, Rect)> {
    let cols = cols.max(1);
    let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
    let first_row = (selected / cols).saturating_sub(visible_rows - 1);
    let card_width = inner.width / cols as u16;

    let mut slots = Vec::new();
    for idx in first_row * cols..count {
        let row = idx / cols - first_row;
        if row >= visible_rows {
            break;
        }
        let col = idx % cols;
        let rect = Rect {
            x: inner.x + col as u16 * card_width,
            y: inner.y + row as u16 * CARD_HEIGHT,
            width: card_width,
            height: CARD_HEIGHT,
        }
        .intersection(inner);
        if !rect.is_empty() {
            slots.push((idx, rect));
        }
    }
    slots
}

fn render_card(f: &mut Frame, area: Rect, card: &Card, selected: bool) {
    let max_heading = area.width.saturating_sub(4) as usize;
    let heading: String = card.heading.chars().take(max_heading).collect();

    let border_style = if selected {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };

    let lines = vec![
        Line::from(Span::styled(
            card.state.clone(),
            Style::default().fg(state_color(&card.state)),
        )),
        Line::raw(card.byline.clone()),
        Line::from(Span::styled(
            card.avatar_url.clone(),
            Style::default().fg(MUTED),
        )),
        Line::from(Span::styled(
            card.link.clone(),
            Style::default()
                .fg(LINK)
                .add_modifier(Modifier::UNDERLINED),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {heading} ")),
    );
    f.render_widget(paragraph, area);
}
