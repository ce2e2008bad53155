pub mod card_grid;
pub mod footer;
pub mod header;
pub mod search_form;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Length(3), // search form
            Constraint::Min(6),    // card grid
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    header::render(f, vertical[0]);
    search_form::render(f, vertical[1], app);
    card_grid::render(f, vertical[2], app);
    footer::render(f, vertical[3], app);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    use super::*;
    use crate::gateway::tests::{make_issue, MockSource};
    use crate::gateway::{FetchError, FetchResult};
    use crate::log::ActivityLog;
    use crate::model::issue::SearchTarget;

    fn app_with(initial: FetchResult) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let app = App::new(
            Arc::new(MockSource::new()),
            ActivityLog::new(dir.path().join("activity.jsonl")),
            tx,
            SearchTarget::default(),
            initial,
        );
        (app, dir)
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buf = terminal.backend().buffer();
        let mut screen = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                screen.push_str(buf[(x, y)].symbol());
            }
            screen.push('\n');
        }
        screen
    }

    #[test]
    fn empty_results_show_placeholder_and_no_cards() {
        let (app, _dir) = app_with(Ok(vec![]));
        let screen = draw(&app, 100, 30);
        assert!(screen.contains("No results."));
        assert!(!screen.contains("opened this issue"));
    }

    #[test]
    fn renders_one_card_per_issue() {
        let issues = vec![
            make_issue(1, 11, "Alpha"),
            make_issue(2, 12, "Beta"),
            make_issue(3, 13, "Gamma"),
        ];
        let (app, _dir) = app_with(Ok(issues));
        let screen = draw(&app, 120, 40);

        assert_eq!(screen.matches("opened this issue").count(), 3);
        assert!(screen.contains("Alpha #11"));
        assert!(screen.contains("Gamma #13"));
        assert!(screen.contains("https://github.com/octocat/hello-world/issues/12"));
        assert!(!screen.contains("No results."));
    }

    #[test]
    fn header_and_form_are_always_visible() {
        let (app, _dir) = app_with(Ok(vec![]));
        let screen = draw(&app, 100, 30);
        assert!(screen.contains("Github Search"));
        assert!(screen.contains("Github Open Issues Search Engine"));
        assert!(screen.contains("username / repository .git"));
        assert!(screen.contains("octocat/hello-world"));
    }

    #[test]
    fn footer_carries_credit() {
        let (app, _dir) = app_with(Ok(vec![]));
        let screen = draw(&app, 120, 30);
        assert!(screen.contains("Created with ♥ by Simeon Georgiev"));
    }

    #[test]
    fn failure_line_replaces_grid() {
        let (app, _dir) = app_with(Err(FetchError::Status {
            status: 401,
            message: "Bad credentials".into(),
        }));
        let screen = draw(&app, 100, 30);
        assert!(screen.contains("Failed to load octocat/hello-world: HTTP 401: Bad credentials"));
        assert!(!screen.contains("No results."));
    }

    #[tokio::test]
    async fn pending_search_is_marked_loading() {
        let (mut app, _dir) = app_with(Ok(vec![]));
        app.request(SearchTarget::new("facebook", "react"));
        let screen = draw(&app, 100, 30);
        assert!(screen.contains("facebook/react (loading...)"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (app, _dir) = app_with(Ok(vec![make_issue(1, 1, "A")]));
        draw(&app, 10, 5);
    }
}
