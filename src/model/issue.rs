use std::fmt;

use anyhow::{bail, Result};
use serde::Deserialize;

pub const DEFAULT_OWNER: &str = "octocat";
pub const DEFAULT_REPOSITORY: &str = "hello-world";

/// One entry of the GitHub issues listing. Fields the UI doesn't use are
/// dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueRecord {
    pub id: u64,
    pub title: String,
    pub number: u64,
    pub state: String,
    pub html_url: String,
    #[serde(default)]
    pub comments: u64,
    /// Null when the author's account has been deleted.
    pub user: Option<IssueUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueUser {
    pub login: String,
    pub avatar_url: String,
}

impl IssueUser {
    /// GitHub's stand-in for deleted accounts.
    pub fn ghost() -> Self {
        Self {
            login: "ghost".into(),
            avatar_url: "https://avatars.githubusercontent.com/u/10137?v=4".into(),
        }
    }
}

impl IssueRecord {
    pub fn author(&self) -> IssueUser {
        self.user.clone().unwrap_or_else(IssueUser::ghost)
    }
}

/// The (owner, repository) pair driving the next fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTarget {
    pub owner: String,
    pub repository: String,
}

impl Default for SearchTarget {
    fn default() -> Self {
        Self::new(DEFAULT_OWNER, DEFAULT_REPOSITORY)
    }
}

impl SearchTarget {
    pub fn new(owner: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
        }
    }

    /// Parse the `owner/repo` form used on the command line.
    pub fn parse(input: &str) -> Result<Self> {
        let Some((owner, repository)) = input.trim().split_once('/') else {
            bail!("Expected <owner>/<repository>, got '{input}'");
        };
        if repository.contains('/') {
            bail!("Expected <owner>/<repository>, got '{input}'");
        }
        Ok(Self::new(owner, repository))
    }

    /// Issues endpoint for this target. Empty segments are kept as-is, so an
    /// empty form yields `{api_base}/repos//issues`.
    pub fn endpoint(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            api_base.trim_end_matches('/'),
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repository)
        )
    }
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repository)
    }
}
