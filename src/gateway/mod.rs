pub mod github;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::AppConfig;
use crate::model::issue::{IssueRecord, SearchTarget};

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Malformed(String),
}

pub type FetchResult = Result<Vec<IssueRecord>, FetchError>;

/// Turns a search target into the list of issues for that repository.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// URL the next fetch for `target` will hit.
    fn endpoint(&self, target: &SearchTarget) -> String;
    async fn fetch_issues(&self, target: &SearchTarget) -> FetchResult;
}


pub fn create_gateway(config: &AppConfig) -> github::GitHubGateway {
    github::GitHubGateway::new(config.github.api_base.clone(), config.github.token.clone())
}
