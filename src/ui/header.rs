use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::{ACCENT, MUTED};

pub const TITLE: &str = "Github Search";
pub const DESCRIPTION: &str = "Github Open Issues Search Engine";

pub fn render(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(
            TITLE,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Line::styled(DESCRIPTION, Style::default().fg(MUTED)),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
