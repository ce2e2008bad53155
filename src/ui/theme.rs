use ratatui::style::Color;

pub const ACCENT: Color = Color::Cyan;
pub const FORM_ACTIVE: Color = Color::Yellow;
pub const MUTED: Color = Color::DarkGray;
pub const LINK: Color = Color::Blue;
pub const ERROR: Color = Color::Red;

pub fn state_color(state: &str) -> Color {
    match state {
        "open" => Color::Green,
        "closed" => Color::Magenta,
        _ => Color::Gray,
    }
}
