use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

use crate::config::data_dir;
use crate::model::issue::SearchTarget;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEvent {
    pub timestamp: String,
    pub event: String,
    pub owner: String,
    pub repository: String,
    pub seq: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Append-only JSON Lines record of every search the UI issues.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(data_dir().join("search-activity.jsonl"))
    }
}

impl ActivityLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(&self, event: &SearchEvent) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(event)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Most recent events, oldest first. Unreadable lines are skipped.
    pub fn read_events(&self, limit: Option<usize>) -> Vec<SearchEvent> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        let mut events: Vec<SearchEvent> = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        if let Some(limit) = limit {
            let len = events.len();
            if len > limit {
                events = events.split_off(len - limit);
            }
        }

        events
    }
}

pub fn new_event(
    event_type: &str,
    target: &SearchTarget,
    seq: u64,
    count: Option<usize>,
    message: Option<&str>,
) -> SearchEvent {
    SearchEvent {
        timestamp: chrono::Utc::now().to_rfc3339(),
        event: event_type.to_string(),
        owner: target.owner.clone(),
        repository: target.repository.clone(),
        seq,
        count,
        message: message.map(String::from),
    }
}
