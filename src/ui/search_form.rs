use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::model::form::{Field, SearchForm};
use crate::ui::theme::{ACCENT, FORM_ACTIVE, MUTED};

const SEPARATOR: &str = " / ";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let active = app.input_active;

    let spans = vec![
        Span::raw(" "),
        field_span(form, Field::Username, active),
        Span::styled(SEPARATOR, Style::default().fg(MUTED)),
        field_span(form, Field::Repository, active),
        Span::styled(" .git", Style::default().fg(ACCENT)),
    ];

    let (border, title) = if active {
        (FORM_ACTIVE, " Search — enter to submit, tab to switch ".to_string())
    } else {
        (MUTED, format!(" GET {} ", app.endpoint()))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    if active {
        let x = area.x + 1 + cursor_offset(form);
        let y = area.y + 1;
        f.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), y));
    }
}

fn field_span(form: &SearchForm, field: Field, active: bool) -> Span<'static> {
    let value = form.value(field);
    let mut style = if value.is_empty() {
        Style::default().fg(MUTED)
    } else {
        Style::default()
    };
    if active && form.focus == field {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(display_text(form, field).to_string(), style)
}

fn display_text(form: &SearchForm, field: Field) -> &str {
    let value = form.value(field);
    if value.is_empty() {
        field.placeholder()
    } else {
        value
    }
}

/// Column of the cursor inside the form, relative to the inner area.
fn cursor_offset(form: &SearchForm) -> u16 {
    let offset = match form.focus {
        Field::Username => 1 + form.username.chars().count(),
        Field::Repository => {
            1 + display_text(form, Field::Username).chars().count()
                + SEPARATOR.len()
                + form.repository.chars().count()
        }
    };
    u16::try_from(offset).unwrap_or(u16::MAX)
}
