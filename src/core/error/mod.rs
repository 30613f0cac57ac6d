use crate::core::types::{ErrorCategory, ErrorSeverity};
use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    /// Status reported by the upstream platform, for `UpstreamError`.
    pub upstream_status: Option<u16>,
    /// Remote body (JSON when parseable, raw text otherwise), for `UpstreamError`.
    pub upstream_body: Option<Value>,
    pub occurred_at: DateTime<Utc>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let severity = match category {
            ErrorCategory::ConfigError
            | ErrorCategory::ValidationError
            | ErrorCategory::ShapeError
            | ErrorCategory::UpstreamError
            | ErrorCategory::NetworkError
            | ErrorCategory::InternalError => ErrorSeverity::Error,
        };
        AppError {
            category,
            severity,
            code: format!("RLY-{}", uuid::Uuid::new_v4()),
            message: message.into(),
            upstream_status: None,
            upstream_body: None,
            occurred_at: Utc::now(),
            source: None,
        }
    }

    /// Build an `UpstreamError` carrying the remote status and body verbatim.
    pub fn upstream<T: Into<String>>(message: T, status: u16, body: Value) -> Self {
        let mut error = AppError::new(ErrorCategory::UpstreamError, message);
        error.upstream_status = Some(status);
        error.upstream_body = Some(body);
        error
    }

    pub fn with_source<T: Into<String>>(
        category: ErrorCategory,
        message: T,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        let mut error = AppError::new(category, message);
        error.source = Some(anyhow::anyhow!(source));
        error
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if let Some(status) = self.upstream_status {
            write!(f, " (upstream status {})", status)?;
        }
        if let Some(ref source) = self.source {
            write!(f, "\nCaused by: {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError {
            category: ErrorCategory::InternalError,
            severity: ErrorSeverity::Error,
            code: "ANYHOW_ERROR".to_string(),
            message: e.to_string(),
            upstream_status: None,
            upstream_body: None,
            occurred_at: Utc::now(),
            source: Some(e),
        }
    }
}
