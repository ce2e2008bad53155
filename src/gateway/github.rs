use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;

use super::{FetchError, FetchResult, IssueSource};
use crate::model::issue::{IssueRecord, SearchTarget};

const USER_AGENT_VALUE: &str = concat!("git-issues/", env!("CARGO_PKG_VERSION"));
const ACCEPT_VALUE: &str = "application/vnd.github+json";

pub struct GitHubGateway {
    api_base: String,
    auth_header: Option<String>,
    client: reqwest::Client,
}

impl GitHubGateway {
    pub fn new(api_base: String, token: Option<String>) -> Self {
        Self {
            api_base,
            auth_header: token.as_deref().map(authorization_value),
            client: reqwest::Client::new(),
        }
    }
}

/// A bare token is sent as a bearer credential; anything that already names
/// a scheme (`token abc`, `Bearer abc`) goes out untouched.
pub fn authorization_value(token: &str) -> String {
    let token = token.trim();
    if token.contains(char::is_whitespace) {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}

/// GitHub's error envelope, e.g. `{"message": "Not Found", ...}`.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Decode a successful response body. Only a JSON array of records counts as
/// a result; an object or anything else is reported rather than rendered.
pub fn decode_issues(body: &str) -> FetchResult {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::Malformed(format!("invalid JSON: {e}")))?;

    match value {
        Value::Array(_) => serde_json::from_value::<Vec<IssueRecord>>(value)
            .map_err(|e| FetchError::Malformed(format!("unexpected issue shape: {e}"))),
        Value::Object(ref obj) => {
            let detail = obj
                .get("message")
                .and_then(|m| m.as_str())
                .map(|m| format!("expected a list of issues, got object: {m}"))
                .unwrap_or_else(|| "expected a list of issues, got object".to_string());
            Err(FetchError::Malformed(detail))
        }
        other => Err(FetchError::Malformed(format!(
            "expected a list of issues, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn status_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_string()
        })
}

#[async_trait]
impl IssueSource for GitHubGateway {
    fn endpoint(&self, target: &SearchTarget) -> String {
        target.endpoint(&self.api_base)
    }

    async fn fetch_issues(&self, target: &SearchTarget) -> FetchResult {
        let mut request = self
            .client
            .get(self.endpoint(target))
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, ACCEPT_VALUE);
        if let Some(auth) = &self.auth_header {
            request = request.header(AUTHORIZATION, auth);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Request(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: status_message(&body, status),
            });
        }

        decode_issues(&body)
    }
}
