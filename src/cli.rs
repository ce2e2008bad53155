use anyhow::{bail, Result};

use crate::config;
use crate::gateway::{self, IssueSource};
use crate::log::{ActivityLog, SearchEvent};
use crate::model::issue::SearchTarget;
use crate::results::{self, Outcome, ResultsView};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Launch the TUI; `None` means the configured default repository.
    Tui(Option<SearchTarget>),
    List(SearchTarget),
    /// Print the most recent entries of the search activity log.
    History,
    Help,
}

/// Parse everything after the program name.
///
/// Supported forms:
///   git-issues
///   git-issues facebook/react
///   git-issues list facebook/react
///   git-issues history
///   git-issues help
pub fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [] => Ok(Command::Tui(None)),
        [flag, ..] if matches!(flag.as_str(), "help" | "-h" | "--help") => Ok(Command::Help),
        [cmd] if cmd == "history" => Ok(Command::History),
        [cmd] if cmd == "list" => {
            bail!("Usage: git-issues list <owner>/<repository>")
        }
        [cmd, target] if cmd == "list" => Ok(Command::List(SearchTarget::parse(target)?)),
        [target] => Ok(Command::Tui(Some(SearchTarget::parse(target)?))),
        _ => bail!("Unexpected arguments: {}\n\nRun `git-issues help` for usage.", args.join(" ")),
    }
}

/// Fetch once and print the cards for `target` to stdout.
pub async fn handle_list(target: SearchTarget) -> Result<()> {
    let config = config::load_config()?;
    let gateway = gateway::create_gateway(&config);
    let text = list_with(&gateway, &target).await?;
    print!("{text}");
    Ok(())
}

/// Render `target`'s issues as plain text. A failed fetch is an error so the
/// process exits non-zero; the failure line goes to stderr with it.
async fn list_with(source: &dyn IssueSource, target: &SearchTarget) -> Result<String> {
    let result = source.fetch_issues(target).await;
    let view = results::view(&Outcome::from_fetch(target, result));

    if let ResultsView::Failure(line) = &view {
        bail!("{line} ({})", source.endpoint(target));
    }
    Ok(results::plain_text(&view))
}

const HISTORY_LIMIT: usize = 20;

pub fn handle_history() {
    let events = ActivityLog::default().read_events(Some(HISTORY_LIMIT));
    if events.is_empty() {
        println!("No searches recorded yet.");
        return;
    }
    for line in events.iter().map(history_line) {
        println!("{line}");
    }
}

fn history_line(event: &SearchEvent) -> String {
    let mut line = format!(
        "{}  #{:<4} {:<9} {}/{}",
        event.timestamp, event.seq, event.event, event.owner, event.repository
    );
    if let Some(count) = event.count {
        line.push_str(&format!("  ({count} issues)"));
    }
    if let Some(message) = &event.message {
        line.push_str(&format!("  {message}"));
    }
    line
}

pub fn print_help() {
    println!("git-issues — browse a GitHub repository's issues in the terminal\n");
    println!("USAGE:");
    println!("  git-issues                       Launch the TUI on the default repository");
    println!("  git-issues <owner>/<repo>        Launch the TUI on <owner>/<repo>");
    println!("  git-issues list <owner>/<repo>   Print the issues and exit");
    println!("  git-issues history               Show recent searches");
    println!();
    println!("CONFIG:");
    println!("  ~/.git-issues/config.toml   [github] token, api_base, default_owner, default_repository");
    println!("  GITHUB_TOKEN                overrides the configured token");
}
