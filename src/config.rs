use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::model::issue::{SearchTarget, DEFAULT_OWNER, DEFAULT_REPOSITORY};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Deserialize)]
pub struct GitHubConfig {
    pub token: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_owner")]
    pub default_owner: String,
    #[serde(default = "default_repository")]
    pub default_repository: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: default_api_base(),
            default_owner: default_owner(),
            default_repository: default_repository(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.into()
}

fn default_owner() -> String {
    DEFAULT_OWNER.into()
}

fn default_repository() -> String {
    DEFAULT_REPOSITORY.into()
}

impl AppConfig {
    pub fn default_target(&self) -> SearchTarget {
        SearchTarget::new(
            self.github.default_owner.clone(),
            self.github.default_repository.clone(),
        )
    }

    /// Environment credential wins over the file. Blank values count as unset.
    fn apply_env_token(&mut self, env_token: Option<String>) {
        if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
            self.github.token = Some(token);
        }
        if self.github.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.github.token = None;
        }
    }
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".git-issues")
}

fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    let mut config = load_config_from(&config_path())?;
    config.apply_env_token(std::env::var(TOKEN_ENV).ok());
    Ok(config)
}

fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}
