//! Upstream Client — the single point of entry for all portfolio platform
//! API calls in this service.
//!
//! ARCHITECTURAL RULE: No other module may call the platform API directly.
//! All upstream interactions MUST go through this module.
//!
//! Authentication is an explicit [`Session`] passed to every call — never an
//! ambient token read — so token lifecycle stays visible and testable. On a
//! 401 with a refresh token present, the client refreshes once and retries
//! once; any other failure is returned as-is, with no automatic retry and no
//! backoff.

pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod export;
pub mod portfolios;
pub mod types;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::portfolio::{Portfolio, PortfolioComponent};
use crate::upstream::types::{ComponentPatch, ComponentPayload, PortfolioCreate, PortfolioUpdate};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Timed out: {0}")]
    Timeout(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// Bearer token pair for one caller. Cloning shares the same tokens, so a
/// refresh performed inside the client is visible to the owner.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<Mutex<Tokens>>,
}

impl Session {
    /// A session with no tokens — public, unauthenticated reads.
    pub fn anonymous() -> Self {
        Session::default()
    }

    pub fn from_tokens(access: impl Into<String>, refresh: Option<String>) -> Self {
        Session {
            inner: Arc::new(Mutex::new(Tokens {
                access: Some(access.into()),
                refresh,
            })),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.lock().expect("session lock poisoned").access.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.lock().expect("session lock poisoned").refresh.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    fn store_access(&self, token: String) {
        self.inner.lock().expect("session lock poisoned").access = Some(token);
    }

    pub fn clear(&self) {
        let mut tokens = self.inner.lock().expect("session lock poisoned");
        tokens.access = None;
        tokens.refresh = None;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        UpstreamClient {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Sends one request, refreshing the access token and retrying exactly
    /// once on a 401 when a refresh token is available.
    async fn execute(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, UpstreamError> {
        let mut refreshed = false;
        loop {
            let mut request = self.client.request(method.clone(), self.url(path));
            if let Some(token) = session.access_token() {
                request = request.bearer_auth(token);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await?;
            let status = response.status();

            if status.as_u16() == 401 && !refreshed && session.refresh_token().is_some() {
                refreshed = true;
                self.refresh_session(session).await?;
                continue;
            }

            if !status.is_success() {
                return Err(Self::error_from_response(response).await);
            }
            return Ok(response);
        }
    }

    /// JSON request/response helper used by all endpoint groups.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, UpstreamError> {
        let response = self.execute(session, method, path, body).await?;
        let text = response.text().await?;
        // Some mutations answer with an empty body; let `T = Value` callers
        // observe null rather than a parse error.
        if text.trim().is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Request helper for endpoints whose response body is irrelevant.
    pub(crate) async fn request_empty(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(), UpstreamError> {
        self.execute(session, method, path, body).await.map(|_| ())
    }

    /// One refresh attempt. Failure clears the session's tokens and surfaces
    /// an authentication error — the caller re-authenticates.
    async fn refresh_session(&self, session: &Session) -> Result<(), UpstreamError> {
        let Some(refresh) = session.refresh_token() else {
            session.clear();
            return Err(UpstreamError::Unauthorized);
        };

        let result = self
            .client
            .post(self.url("/auth/token/refresh/"))
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                let body: Value = response.json().await.unwrap_or(Value::Null);
                match body.get("access").and_then(Value::as_str) {
                    Some(access) => {
                        session.store_access(access.to_string());
                        Ok(())
                    }
                    None => {
                        session.clear();
                        Err(UpstreamError::Unauthorized)
                    }
                }
            }
            other => {
                if let Err(e) = other {
                    warn!("Token refresh failed: {e}");
                }
                session.clear();
                Err(UpstreamError::Unauthorized)
            }
        }
    }

    async fn error_from_response(response: Response) -> UpstreamError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        let message = extract_error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

        match status.as_u16() {
            401 => UpstreamError::Unauthorized,
            403 => UpstreamError::Forbidden(message),
            404 => UpstreamError::NotFound(message),
            code => UpstreamError::Api {
                status: code,
                message,
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Error-message extraction
// ────────────────────────────────────────────────────────────────────────────

/// Keys that carry metadata rather than field validation messages.
const NON_FIELD_KEYS: &[&str] = &[
    "error",
    "detail",
    "error_type",
    "instructions",
    "job_id",
    "status",
];

/// Best-effort human-readable message from an upstream error body.
///
/// Preference order: an `error` string, a `detail` string, then the
/// field-map validation shape (`{field: [messages]}`) with
/// `non_field_errors` first and field names title-cased into the message.
pub fn extract_error_message(body: &Value) -> Option<String> {
    let obj = body.as_object()?;

    if let Some(message) = obj.get("error").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    if let Some(message) = obj.get("detail").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    let mut messages = Vec::new();
    if let Some(first) = obj.get("non_field_errors").and_then(first_message) {
        messages.push(first);
    }
    for (field, value) in obj {
        if NON_FIELD_KEYS.contains(&field.as_str()) || field == "non_field_errors" {
            continue;
        }
        if let Some(first) = first_message(value) {
            messages.push(format!("{}: {first}", title_case_field(field)));
        }
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join(". "))
    }
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.first().and_then(Value::as_str).map(String::from),
        _ => None,
    }
}

/// `seo_title` → `Seo Title`.
fn title_case_field(field: &str) -> String {
    field
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// The builder's API seam
// ────────────────────────────────────────────────────────────────────────────

/// The subset of the platform API the builder orchestrator depends on.
/// Implemented by [`UpstreamClient`] and by the in-memory mock in tests.
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    async fn create_portfolio(
        &self,
        session: &Session,
        req: &PortfolioCreate,
    ) -> Result<Portfolio, UpstreamError>;

    async fn update_portfolio(
        &self,
        session: &Session,
        id: i64,
        req: &PortfolioUpdate,
    ) -> Result<Portfolio, UpstreamError>;

    async fn publish_portfolio(
        &self,
        session: &Session,
        id: i64,
        is_published: bool,
    ) -> Result<Portfolio, UpstreamError>;

    async fn create_component(
        &self,
        session: &Session,
        portfolio_id: i64,
        req: &ComponentPayload,
    ) -> Result<PortfolioComponent, UpstreamError>;

    async fn update_component(
        &self,
        session: &Session,
        portfolio_id: i64,
        component_id: i64,
        patch: &ComponentPatch,
    ) -> Result<PortfolioComponent, UpstreamError>;

    async fn delete_component(
        &self,
        session: &Session,
        portfolio_id: i64,
        component_id: i64,
    ) -> Result<(), UpstreamError>;
}
