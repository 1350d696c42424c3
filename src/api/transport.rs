//! Generic REST transport
//!
//! `Transport` sends one JSON request and returns the decoded JSON body.
//! `HttpTransport` is the reqwest implementation; tests substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde_json::{json, Value};

use super::error::{ApiError, ApiResult};
use crate::build_info;
use crate::config::ClientConfig;

/// Header carrying the session token of a logged in user
pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

/// One request against the versioned API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, e.g. `users/me`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Overrides the transport default when set
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.push((name.to_string(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request, returning the JSON body of a successful response
    async fn execute(&self, request: ApiRequest, session_token: Option<&str>) -> ApiResult<Value>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    default_timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("{}/{}", build_info::NAME, build_info::VERSION))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base(),
            api_key: config.api_key.clone(),
            default_timeout: config.timeout,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest, session_token: Option<&str>) -> ApiResult<Value> {
        let url = self.url_for(&request.path);
        tracing::debug!(method = %request.method, url = %url, "Sending request");

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(AUTHORIZATION, format!("Token token={}", self.api_key))
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = session_token {
            builder = builder.header(SESSION_TOKEN_HEADER, token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout.or(self.default_timeout) {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if !(200..300).contains(&status) {
            tracing::debug!(status, path = %request.path, "Request failed");
        }
        decode_body(status, &text)
    }
}

/// Turn a raw response into the JSON envelope or an error
///
/// A successful reply without a body (e.g. `204 No Content`) becomes an
/// envelope with empty `data`, so bodiless deletes still decode.
pub fn decode_body(status: u16, text: &str) -> ApiResult<Value> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_response(status, text));
    }
    if text.trim().is_empty() {
        return Ok(json!({ "data": {}, "status": status }));
    }
    Ok(serde_json::from_str(text)?)
}
