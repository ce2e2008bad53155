use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::event::KeyAction;
use crate::gateway::{FetchResult, IssueSource};
use crate::log::{new_event, ActivityLog};
use crate::model::form::SearchForm;
use crate::model::issue::SearchTarget;
use crate::results::Outcome;
use crate::util::browser;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    Tick,
    Resize(u16),
    IssuesLoaded {
        seq: u64,
        target: SearchTarget,
        result: FetchResult,
    },
    Quit,
}

pub struct App {
    pub target: SearchTarget,
    pub outcome: Outcome,
    pub form: SearchForm,
    pub input_active: bool,
    pub selected_card: usize,
    /// Sequence number of the in-flight request, if any.
    pub pending: Option<u64>,
    pub grid_columns: usize,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub action_tx: mpsc::UnboundedSender<Action>,
    source: Arc<dyn IssueSource>,
    activity: ActivityLog,
    latest_seq: u64,
}

impl App {
    /// Seed the app with the result of the startup fetch for `target`.
    pub fn new(
        source: Arc<dyn IssueSource>,
        activity: ActivityLog,
        action_tx: mpsc::UnboundedSender<Action>,
        target: SearchTarget,
        initial: FetchResult,
    ) -> Self {
        let mut app = Self {
            target: target.clone(),
            outcome: Outcome::Loaded(Vec::new()),
            form: SearchForm::default(),
            input_active: false,
            selected_card: 0,
            pending: None,
            grid_columns: 1,
            flash_message: None,
            should_quit: false,
            action_tx,
            source,
            activity,
            latest_seq: 0,
        };
        app.apply_result(0, target, initial);
        app
    }

    /// URL the current search target resolves to.
    pub fn endpoint(&self) -> String {
        self.source.endpoint(&self.target)
    }

    pub fn update(&mut self, action: Action) {
        if let Some((_, t)) = &self.flash_message {
            if t.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => self.handle_key(key),
            Action::Tick => {}
            Action::Resize(width) => {
                self.grid_columns = crate::ui::card_grid::columns_for(width);
            }
            Action::IssuesLoaded {
                seq,
                target,
                result,
            } => self.apply_result(seq, target, result),
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    fn handle_key(&mut self, key: KeyAction) {
        if self.input_active {
            self.handle_form_key(key);
            return;
        }

        let count = self.outcome.issues().len();
        match key {
            KeyAction::Char('q') => self.should_quit = true,
            KeyAction::Char('/') | KeyAction::Char(':') => self.input_active = true,
            KeyAction::Char('r') => {
                self.request(self.target.clone());
            }
            KeyAction::Left => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyAction::Right => {
                if self.selected_card + 1 < count {
                    self.selected_card += 1;
                }
            }
            KeyAction::Up => {
                self.selected_card = self.selected_card.saturating_sub(self.grid_columns.max(1));
            }
            KeyAction::Down => {
                let next = self.selected_card + self.grid_columns.max(1);
                if next < count {
                    self.selected_card = next;
                }
            }
            KeyAction::Enter => self.open_selected(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Char(c) => self.form.insert(c),
            KeyAction::Backspace => self.form.backspace(),
            KeyAction::Tab | KeyAction::Left | KeyAction::Right => self.form.toggle_focus(),
            KeyAction::Enter => {
                self.input_active = false;
                self.submit_search();
            }
            KeyAction::Escape => self.input_active = false,
            KeyAction::Up | KeyAction::Down => {}
        }
    }

    /// Retarget to whatever the form holds and fetch it.
    pub fn submit_search(&mut self) -> u64 {
        let target = self.form.target();
        self.request(target)
    }

    /// Issue a fetch for `target` on a background task. The result comes back
    /// as `Action::IssuesLoaded` tagged with the returned sequence number.
    pub fn request(&mut self, target: SearchTarget) -> u64 {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.target = target.clone();
        self.pending = Some(seq);
        self.record("requested", &target, seq, None, None);

        let source = self.source.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_issues(&target).await;
            let _ = tx.send(Action::IssuesLoaded {
                seq,
                target,
                result,
            });
        });

        seq
    }

    /// Replace the results wholesale, unless a newer request has been issued
    /// since this one started.
    fn apply_result(&mut self, seq: u64, target: SearchTarget, result: FetchResult) {
        if seq != self.latest_seq {
            self.record("stale", &target, seq, None, Some("superseded by a newer search"));
            return;
        }

        self.pending = None;
        match &result {
            Ok(issues) => {
                self.record("loaded", &target, seq, Some(issues.len()), None);
            }
            Err(e) => {
                let reason = e.to_string();
                self.record("failed", &target, seq, None, Some(&reason));
                self.flash(format!("Fetch error: {reason}"));
            }
        }
        self.outcome = Outcome::from_fetch(&target, result);
        self.selected_card = 0;
    }

    fn open_selected(&mut self) {
        let Some(issue) = self.outcome.issues().get(self.selected_card) else {
            return;
        };
        let url = issue.html_url.clone();
        match browser::open_url(&url) {
            Ok(()) => self.flash(format!("Opened {url}")),
            Err(e) => self.flash(format!("Could not open {url}: {e}")),
        }
    }

    fn flash(&mut self, message: String) {
        self.flash_message = Some((message, Instant::now()));
    }

    fn record(
        &self,
        event: &str,
        target: &SearchTarget,
        seq: u64,
        count: Option<usize>,
        message: Option<&str>,
    ) {
        let _ = self
            .activity
            .append(&new_event(event, target, seq, count, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::tests::{make_issue, MockSource};
    use crate::gateway::FetchError;
    use crate::results::{view, ResultsView};

    struct Harness {
        app: App,
        rx: mpsc::UnboundedReceiver<Action>,
        _dir: tempfile::TempDir,
    }

    fn harness(source: MockSource) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("activity.jsonl");
        harness_with_log(source, dir, log_path)
    }

    fn harness_with_log(
        source: MockSource,
        dir: tempfile::TempDir,
        log_path: std::path::PathBuf,
    ) -> Harness {
        let (tx, rx) = mpsc::unbounded_channel();
        let initial = Ok(vec![make_issue(1, 1, "Hello")]);
        let app = App::new(
            Arc::new(source),
            ActivityLog::new(log_path),
            tx,
            SearchTarget::default(),
            initial,
        );
        Harness { app, rx, _dir: dir }
    }

    impl Harness {
        fn type_form(&mut self, username: &str, repository: &str) {
            self.app.update(Action::Key(KeyAction::Char('/')));
            for c in username.chars() {
                self.app.update(Action::Key(KeyAction::Char(c)));
            }
            self.app.update(Action::Key(KeyAction::Tab));
            for c in repository.chars() {
                self.app.update(Action::Key(KeyAction::Char(c)));
            }
        }

        async fn submit(&mut self) {
            self.app.update(Action::Key(KeyAction::Enter));
            let action = self.rx.recv().await.unwrap();
            self.app.update(action);
        }

        fn keys(&self) -> Vec<u64> {
            match view(&self.app.outcome) {
                ResultsView::Cards(cards) => cards.iter().map(|c| c.key).collect(),
                _ => Vec::new(),
            }
        }
    }

    fn react_issues() -> Vec<crate::model::issue::IssueRecord> {
        vec![make_issue(100, 5, "Hooks"), make_issue(101, 6, "Suspense")]
    }

    #[tokio::test]
    async fn initial_load_targets_default_repository() {
        let h = harness(MockSource::new());
        assert_eq!(
            h.app.endpoint(),
            "https://api.github.com/repos/octocat/hello-world/issues"
        );
        assert_eq!(h.keys(), vec![1]);
        assert!(h.app.pending.is_none());
    }

    #[tokio::test]
    async fn submit_retargets_and_replaces_results() {
        let mut h = harness(MockSource::new().with("facebook/react", react_issues()));
        h.type_form("facebook", "react");

        h.app.update(Action::Key(KeyAction::Enter));
        assert_eq!(
            h.app.endpoint(),
            "https://api.github.com/repos/facebook/react/issues"
        );
        assert!(h.app.pending.is_some());
        assert!(!h.app.input_active);

        let action = h.rx.recv().await.unwrap();
        h.app.update(action);
        assert_eq!(h.keys(), vec![100, 101]);
        assert!(h.app.pending.is_none());
    }

    #[tokio::test]
    async fn empty_form_builds_double_slash_url() {
        let mut h = harness(MockSource::new());
        h.app.update(Action::Key(KeyAction::Char('/')));
        h.app.update(Action::Key(KeyAction::Enter));
        assert_eq!(h.app.endpoint(), "https://api.github.com/repos//issues");
    }

    #[tokio::test]
    async fn empty_result_shows_placeholder() {
        let mut h = harness(MockSource::new());
        h.type_form("octocat", "empty");
        h.submit().await;
        assert_eq!(view(&h.app.outcome), ResultsView::Placeholder);
    }

    #[tokio::test]
    async fn repeated_submission_is_idempotent() {
        let mut h = harness(MockSource::new().with("facebook/react", react_issues()));
        h.type_form("facebook", "react");
        h.submit().await;
        let first = view(&h.app.outcome);

        h.app.update(Action::Key(KeyAction::Char('/')));
        h.submit().await;
        assert_eq!(view(&h.app.outcome), first);
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let mut h = harness(MockSource::new());
        let older = h.app.request(SearchTarget::new("a", "old"));
        let newer = h.app.request(SearchTarget::new("b", "new"));
        assert!(newer > older);

        // Newer resolves first, then the older one arrives late.
        h.app.update(Action::IssuesLoaded {
            seq: newer,
            target: SearchTarget::new("b", "new"),
            result: Ok(vec![make_issue(2, 2, "new")]),
        });
        h.app.update(Action::IssuesLoaded {
            seq: older,
            target: SearchTarget::new("a", "old"),
            result: Ok(vec![make_issue(1, 1, "old")]),
        });

        assert_eq!(h.keys(), vec![2]);
        assert_eq!(h.app.target, SearchTarget::new("b", "new"));
        let events = h.app.activity.read_events(None);
        assert!(events.iter().any(|e| e.event == "stale" && e.seq == older));
    }

    #[tokio::test]
    async fn pending_stays_until_latest_arrives() {
        let mut h = harness(MockSource::new());
        let older = h.app.request(SearchTarget::new("a", "old"));
        let newer = h.app.request(SearchTarget::new("b", "new"));

        h.app.update(Action::IssuesLoaded {
            seq: older,
            target: SearchTarget::new("a", "old"),
            result: Ok(vec![]),
        });
        assert_eq!(h.app.pending, Some(newer));
    }

    #[tokio::test]
    async fn failure_is_shown_instead_of_results() {
        let mut h = harness(MockSource::new().failing("Not Found"));
        h.type_form("nobody", "nothing");
        h.submit().await;

        assert_eq!(
            view(&h.app.outcome),
            ResultsView::Failure("Failed to load nobody/nothing: HTTP 404: Not Found".into())
        );
        let (flash, _) = h.app.flash_message.as_ref().unwrap();
        assert!(flash.contains("Not Found"));
    }

    #[tokio::test]
    async fn malformed_initial_load_is_a_failure() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(
            Arc::new(MockSource::new()),
            ActivityLog::new(dir.path().join("a.jsonl")),
            tx,
            SearchTarget::default(),
            Err(FetchError::Malformed("expected a list of issues, got object".into())),
        );
        assert!(matches!(view(&app.outcome), ResultsView::Failure(_)));
    }

    #[tokio::test]
    async fn refresh_refetches_current_target() {
        let source = MockSource::new();
        let requested = source.requested.clone();
        let mut h = harness(source);

        h.app.update(Action::Key(KeyAction::Char('r')));
        let action = h.rx.recv().await.unwrap();
        h.app.update(action);

        assert_eq!(requested.lock().unwrap().as_slice(), &[SearchTarget::default()]);
    }

    #[tokio::test]
    async fn activity_log_records_lifecycle() {
        let mut h = harness(MockSource::new().with("facebook/react", react_issues()));
        h.type_form("facebook", "react");
        h.submit().await;

        let events: Vec<String> = h
            .app
            .activity
            .read_events(None)
            .into_iter()
            .map(|e| e.event)
            .collect();
        assert_eq!(events, vec!["loaded", "requested", "loaded"]);
    }

    #[tokio::test]
    async fn unwritable_activity_log_does_not_block_search() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the log's parent directory should be.
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let log_path = blocker.join("activity.jsonl");

        let mut h = harness_with_log(
            MockSource::new().with("facebook/react", react_issues()),
            dir,
            log_path,
        );
        assert!(h.app.activity.read_events(None).is_empty());

        h.type_form("facebook", "react");
        h.submit().await;

        assert_eq!(h.keys(), vec![100, 101]);
        assert!(h.app.pending.is_none());
        assert!(h.app.flash_message.is_none());
    }

    #[tokio::test]
    async fn grid_navigation_stays_in_bounds() {
        let mut h = harness(MockSource::new().with(
            "o/r",
            (0..5).map(|i| make_issue(i, i, "x")).collect(),
        ));
        h.type_form("o", "r");
        h.submit().await;
        h.app.grid_columns = 2;

        h.app.update(Action::Key(KeyAction::Down));
        assert_eq!(h.app.selected_card, 2);
        h.app.update(Action::Key(KeyAction::Down));
        assert_eq!(h.app.selected_card, 4);
        h.app.update(Action::Key(KeyAction::Down));
        assert_eq!(h.app.selected_card, 4);
        h.app.update(Action::Key(KeyAction::Right));
        assert_eq!(h.app.selected_card, 4);
        h.app.update(Action::Key(KeyAction::Up));
        assert_eq!(h.app.selected_card, 2);
        h.app.update(Action::Key(KeyAction::Left));
        assert_eq!(h.app.selected_card, 1);
    }

    #[tokio::test]
    async fn q_types_into_form_but_quits_outside_it() {
        let mut h = harness(MockSource::new());
        h.app.update(Action::Key(KeyAction::Char('/')));
        h.app.update(Action::Key(KeyAction::Char('q')));
        assert!(!h.app.should_quit);
        assert_eq!(h.app.form.username, "q");

        h.app.update(Action::Key(KeyAction::Escape));
        h.app.update(Action::Key(KeyAction::Char('q')));
        assert!(h.app.should_quit);
    }
}
