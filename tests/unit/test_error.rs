use n8n_relay::core::error::AppError;
use n8n_relay::core::types::{ErrorCategory, ErrorSeverity};
use serde_json::json;

#[test]
fn test_every_category_is_error_severity() {
    let categories = [
        ErrorCategory::ConfigError,
        ErrorCategory::ValidationError,
        ErrorCategory::ShapeError,
        ErrorCategory::UpstreamError,
        ErrorCategory::NetworkError,
        ErrorCategory::InternalError,
    ];
    for category in categories {
        let error = AppError::new(category, "failure");
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert_eq!(error.category, category);
    }
}

#[test]
fn test_generated_codes_are_unique() {
    let first = AppError::new(ErrorCategory::InternalError, "a");
    let second = AppError::new(ErrorCategory::InternalError, "b");
    assert_ne!(first.code, second.code);
}

#[test]
fn test_display_includes_code_category_and_message() {
    let error =
        AppError::new(ErrorCategory::ShapeError, "missing data array").with_code("RLY-LIST-001");
    let rendered = error.to_string();
    assert!(rendered.contains("RLY-LIST-001"));
    assert!(rendered.contains("ShapeError"));
    assert!(rendered.contains("missing data array"));
}

#[test]
fn test_display_includes_upstream_status() {
    let error = AppError::upstream("destination refused", 403, json!({"message": "no"}));
    assert!(error.to_string().contains("upstream status 403"));
}

#[test]
fn test_upstream_body_is_kept_verbatim() {
    let body = json!({"message": "duplicate name", "hint": ["rename"]});
    let error = AppError::upstream("create failed", 409, body.clone());
    assert_eq!(error.upstream_body, Some(body));
    assert_eq!(error.upstream_status, Some(409));
}

#[test]
fn test_from_anyhow_maps_to_internal() {
    let error: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(error.category, ErrorCategory::InternalError);
    assert_eq!(error.message, "boom");
}
