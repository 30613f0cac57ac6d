#![allow(clippy::result_large_err)]

use crate::core::config::InstanceConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

/// Header carrying the static API key on every upstream call.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Authenticated JSON client for one n8n instance.
///
/// One outbound call per operation; failures propagate immediately with no
/// retry. Transport errors, non-2xx statuses, and unparseable success bodies
/// are reported as distinct categories so callers can special-case exactly the
/// failures they mean to (the existence check treats 404 as a result, not an
/// error).
#[derive(Clone)]
pub struct N8nClient {
    http: reqwest::Client,
    instance: InstanceConfig,
}

impl N8nClient {
    pub fn new(instance: InstanceConfig) -> Self {
        N8nClient {
            http: reqwest::Client::new(),
            instance,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.instance.base_url
    }

    /// GET `path` with the given query pairs, expecting a JSON body.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, AppError> {
        let response = self.dispatch(Method::GET, path, query, None).await?;
        self.into_json(response, path).await
    }

    /// GET `path`, mapping a 404 to `Ok(None)` instead of an error.
    pub async fn get_optional(&self, path: &str) -> Result<Option<Value>, AppError> {
        let response = self.dispatch(Method::GET, path, &[], None).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("upstream {}{} answered 404", self.instance.base_url, path);
            return Ok(None);
        }
        self.into_json(response, path).await.map(Some)
    }

    /// POST a JSON body to `path`.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        let response = self.dispatch(Method::POST, path, &[], Some(body)).await?;
        self.into_json(response, path).await
    }

    /// PUT a JSON body to `path`.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        let response = self.dispatch(Method::PUT, path, &[], Some(body)).await?;
        self.into_json(response, path).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<reqwest::Response, AppError> {
        let url = format!("{}{}", self.instance.base_url, path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(API_KEY_HEADER, &self.instance.api_key);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        debug!("{} {}", method, url);
        request.send().await.map_err(|err| {
            AppError::new(
                ErrorCategory::NetworkError,
                format!("request to {} failed: {}", url, err),
            )
        })
    }

    /// Decode a response body, turning non-2xx statuses into `UpstreamError`
    /// with the remote body attached verbatim.
    async fn into_json(&self, response: reqwest::Response, path: &str) -> Result<Value, AppError> {
        let status = response.status();
        let text = response.text().await.map_err(|err| {
            AppError::new(
                ErrorCategory::NetworkError,
                format!("failed to read response body from {}: {}", path, err),
            )
        })?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
            return Err(AppError::upstream(
                format!(
                    "upstream {}{} returned status {}",
                    self.instance.base_url, path, status
                ),
                status.as_u16(),
                body,
            ));
        }

        serde_json::from_str(&text).map_err(|err| {
            AppError::new(
                ErrorCategory::ShapeError,
                format!("upstream {} returned a non-JSON body: {}", path, err),
            )
        })
    }
}
