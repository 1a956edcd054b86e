//! HTTP client for the task analysis service.

use reqwest::header::{ACCEPT, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, Result};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/tasks";

/// Strategy labels the analysis service currently recognizes. The client forwards
/// whatever it is given; this list only feeds help text and the dashboard selector.
pub const KNOWN_STRATEGIES: [&str; 3] = ["default", "fastest", "deadline"];
pub const DEFAULT_STRATEGY: &str = "default";

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    tasks: &'a [Value],
    strategy: &'a str,
}

#[derive(Debug, Serialize)]
struct SuggestRequest<'a> {
    tasks: &'a [Value],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base)
    }

    pub fn with_http(http: reqwest::Client, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { http, base }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}/", self.base, name)
    }

    /// POST `{tasks, strategy}` to `analyze/` and return the scored `tasks` list.
    pub async fn analyze(&self, tasks: &[Value], strategy: &str) -> Result<Vec<Value>> {
        let body = self
            .post_json(&self.endpoint("analyze"), &AnalyzeRequest { tasks, strategy })
            .await?;
        take_list(body, "tasks")
    }

    /// POST `{tasks}` to `suggest/` and return the `suggestions` list.
    pub async fn suggest(&self, tasks: &[Value]) -> Result<Vec<Value>> {
        let body = self
            .post_json(&self.endpoint("suggest"), &SuggestRequest { tasks })
            .await?;
        take_list(body, "suggestions")
    }

    /// GET `health/`.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint("health");
        debug!(%url, "GET");
        let resp = self
            .http
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(ApiError::Network)?;
        let bytes = read_success_body(resp).await?;
        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value> {
        debug!(%url, "POST");
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::Network)?;
        let bytes = read_success_body(resp).await?;
        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }
}

/// Turn a non-2xx response into `ApiError::Status` carrying the raw body text.
async fn read_success_body(resp: reqwest::Response) -> Result<Vec<u8>> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.map_err(ApiError::Network)?;
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = resp.bytes().await.map_err(ApiError::Network)?;
    Ok(bytes.to_vec())
}

/// Pull an array field out of a response object. Missing, null or otherwise
/// falsy fields read as an empty list; a `null` body has no fields to read.
fn take_list(body: Value, field: &'static str) -> Result<Vec<Value>> {
    let value = match body {
        Value::Null => return Err(ApiError::NullBody),
        Value::Object(mut map) => map.remove(field),
        _ => None,
    };
    match value {
        Some(Value::Array(items)) => Ok(items),
        Some(v) if triage_core::card::is_truthy(&v) => Err(ApiError::UnexpectedShape { field }),
        _ => Ok(Vec::new()),
    }
}
