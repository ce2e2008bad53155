use crate::gateway::FetchError;
use crate::model::issue::{IssueRecord, SearchTarget};

pub const PLACEHOLDER: &str = "No results.";

/// What the last applied fetch produced.
#[derive(Debug, Clone)]
pub enum Outcome {
    Loaded(Vec<IssueRecord>),
    Failed { target: SearchTarget, reason: String },
}

impl Outcome {
    pub fn from_fetch(target: &SearchTarget, result: Result<Vec<IssueRecord>, FetchError>) -> Self {
        match result {
            Ok(issues) => Outcome::Loaded(issues),
            Err(e) => Outcome::Failed {
                target: target.clone(),
                reason: e.to_string(),
            },
        }
    }

    pub fn issues(&self) -> &[IssueRecord] {
        match self {
            Outcome::Loaded(issues) => issues,
            Outcome::Failed { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub key: u64,
    pub heading: String,
    pub state: String,
    pub avatar_url: String,
    pub byline: String,
    pub link: String,
}

impl Card {
    fn from_issue(issue: &IssueRecord) -> Self {
        let author = issue.author();
        Self {
            key: issue.id,
            heading: format!("{} #{}", issue.title, issue.number),
            state: issue.state.clone(),
            avatar_url: author.avatar_url,
            byline: format!(
                "{} opened this issue · {} comments",
                author.login, issue.comments
            ),
            link: issue.html_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Placeholder,
    Cards(Vec<Card>),
    Failure(String),
}

/// One card per record in upstream order, the placeholder for an empty list,
/// or a single failure line.
pub fn view(outcome: &Outcome) -> ResultsView {
    match outcome {
        Outcome::Loaded(issues) if issues.is_empty() => ResultsView::Placeholder,
        Outcome::Loaded(issues) => ResultsView::Cards(issues.iter().map(Card::from_issue).collect()),
        Outcome::Failed { target, reason } => {
            ResultsView::Failure(format!("Failed to load {target}: {reason}"))
        }
    }
}

/// Plain-text rendering used by `git-issues list`.
pub fn plain_text(view: &ResultsView) -> String {
    match view {
        ResultsView::Placeholder => format!("{PLACEHOLDER}\n"),
        ResultsView::Failure(line) => format!("{line}\n"),
        ResultsView::Cards(cards) => {
            let mut out = String::new();
            for card in cards {
                out.push_str(&format!("{} [{}]\n", card.heading, card.state));
                out.push_str(&format!("  {}\n", card.byline));
                out.push_str(&format!("  {}\n\n", card.link));
            }
            out
        }
    }
}
