//! HTTP client for the upstream COVID statistics API.

use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::error::CorrError;

/// Which upstream collection endpoint to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Vaccines,
    Cases,
}

impl Dataset {
    pub fn path(self) -> &'static str {
        match self {
            Dataset::Vaccines => "/vaccines",
            Dataset::Cases => "/cases",
        }
    }
}

/// Geographic unit a correlation request aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Country,
    Continent,
}

impl ScopeKind {
    /// Query-string key the upstream API filters on.
    pub fn query_key(self) -> &'static str {
        match self {
            ScopeKind::Country => "country",
            ScopeKind::Continent => "continent",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_key())
    }
}

pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl StatsClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("covcorr")
            .build()
            .expect("build http client");
        Self {
            http,
            base_url,
            timeout,
        }
    }

    /// Fetch one dataset filtered to a scope, returning the raw per-country rows.
    ///
    /// Exactly one attempt is made: transient upstream trouble surfaces as
    /// [`CorrError::Upstream`] and the caller decides what that means.
    pub async fn fetch_rows(
        &self,
        dataset: Dataset,
        scope: ScopeKind,
        value: &str,
    ) -> Result<Vec<Value>, CorrError> {
        let url = format!("{}{}", self.base_url, dataset.path());
        tracing::debug!(%url, scope = %scope, value, "fetching upstream dataset");

        let resp = self
            .http
            .get(&url)
            .query(&[(scope.query_key(), value)])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CorrError::Upstream(format!(
                "{} returned HTTP {status}",
                dataset.path()
            )));
        }

        let body: Value = resp.json().await?;
        match body {
            Value::Array(rows) => Ok(rows),
            other => Err(CorrError::MalformedResponse(format!(
                "{} returned {} where an array was expected",
                dataset.path(),
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
