#![allow(clippy::result_large_err)] // Handlers return AppError for consistent diagnostics.

use crate::core::config::RelayConfig;
use crate::core::error::AppError;
use crate::core::revision;
use crate::core::types::{
    CopyAction, CopyOutcome, CopyRequest, DestinationStatus, ErrorCategory, WorkflowDetail,
    WorkflowSummary,
};
use crate::core::upstream::N8nClient;
use axum::{
    body::Body,
    extract::{Extension, Path as AxumPath},
    http::{Response, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tracing::{debug, info};

/// Cap on operator request bodies; workflow documents stay well below this.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// State shared across relay requests: one client per platform instance.
pub struct RelayState {
    source: N8nClient,
    destination: N8nClient,
}

impl RelayState {
    pub fn new(config: RelayConfig) -> Self {
        RelayState {
            source: N8nClient::new(config.source),
            destination: N8nClient::new(config.destination),
        }
    }
}

/// Start the relay listener and block until the service terminates.
pub async fn serve(
    config: RelayConfig,
    bind: &str,
    assets_dir: Option<PathBuf>,
) -> Result<(), AppError> {
    serve_internal(config, bind, assets_dir, None).await
}

/// Start the relay listener and notify once the bind address is known (test helper).
pub async fn serve_with_ready_notifier(
    config: RelayConfig,
    bind: &str,
    assets_dir: Option<PathBuf>,
    ready_notifier: oneshot::Sender<SocketAddr>,
) -> Result<(), AppError> {
    serve_internal(config, bind, assets_dir, Some(ready_notifier)).await
}

async fn serve_internal(
    config: RelayConfig,
    bind: &str,
    assets_dir: Option<PathBuf>,
    ready_notifier: Option<oneshot::Sender<SocketAddr>>,
) -> Result<(), AppError> {
    let bind_addr: SocketAddr = bind.parse().map_err(|err| {
        AppError::new(
            ErrorCategory::ConfigError,
            format!("invalid bind address {}: {}", bind, err),
        )
    })?;
    let state = Arc::new(RelayState::new(config));
    let router = router(state, assets_dir);
    let listener = TcpListener::bind(bind_addr).await.map_err(|err| {
        AppError::new(
            ErrorCategory::ConfigError,
            format!("failed to bind relay listener {}: {}", bind_addr, err),
        )
    })?;
    let local_addr = listener.local_addr().map_err(|err| {
        AppError::new(
            ErrorCategory::InternalError,
            format!("failed to determine relay listener address: {}", err),
        )
    })?;
    if let Some(tx) = ready_notifier {
        let _ = tx.send(local_addr);
    }
    info!("relay listening on {}", local_addr);
    axum::serve(listener, router.into_make_service())
        .await
        .map_err(|err| {
            AppError::new(
                ErrorCategory::InternalError,
                format!("relay server terminated: {}", err),
            )
        })
}

/// Build the relay router: the four API routes plus the static asset fallback.
pub fn router(state: Arc<RelayState>, assets_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route("/api/workflows", get(list_workflows))
        .route("/api/workflow/{workflow_id}", get(workflow_detail))
        .route("/api/check-destination/{workflow_id}", get(check_destination))
        .route("/api/copy-workflow", post(copy_workflow));
    if let Some(dir) = assets_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }
    router
        .layer(Extension(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

/// `GET /api/workflows`: the `{id, name}` projection of active source workflows.
async fn list_workflows(
    Extension(state): Extension<Arc<RelayState>>,
) -> Result<Json<Vec<WorkflowSummary>>, AppError> {
    let response = state
        .source
        .get(
            "/api/v1/workflows",
            &[("active", "true"), ("excludePinnedData", "true")],
        )
        .await?;

    let data = response
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::new(
                ErrorCategory::ShapeError,
                "source workflow list is missing a 'data' array",
            )
            .with_code("RLY-LIST-001")
        })?;

    // Non-object entries are tolerated and skipped, not rejected.
    let workflows: Vec<WorkflowSummary> = data
        .iter()
        .filter(|entry| entry.is_object())
        .map(|entry| WorkflowSummary {
            id: entry.get("id").cloned().unwrap_or(Value::Null),
            name: entry.get("name").cloned().unwrap_or(Value::Null),
        })
        .collect();

    debug!("listed {} active source workflows", workflows.len());
    Ok(Json(workflows))
}

/// `GET /api/workflow/{id}`: the full document plus its reduced editing view.
async fn workflow_detail(
    Extension(state): Extension<Arc<RelayState>>,
    AxumPath(workflow_id): AxumPath<String>,
) -> Result<Json<WorkflowDetail>, AppError> {
    let original = state
        .source
        .get(&format!("/api/v1/workflows/{}", workflow_id), &[])
        .await?;
    let cleaned = revision::clean_workflow(&original);
    Ok(Json(WorkflowDetail { original, cleaned }))
}

/// `GET /api/check-destination/{id}`: existence probe with the sticky-note scan.
///
/// A 404 from the destination is a valid non-existence result, never an error.
async fn check_destination(
    Extension(state): Extension<Arc<RelayState>>,
    AxumPath(workflow_id): AxumPath<String>,
) -> Result<Json<DestinationStatus>, AppError> {
    let workflow = state
        .destination
        .get_optional(&format!("/api/v1/workflows/{}", workflow_id))
        .await?;

    let workflow = match workflow {
        Some(workflow) => workflow,
        None => return Ok(Json(DestinationStatus::missing())),
    };

    let (special_notes, current_revision_content) = revision::collect_sticky_notes(&workflow);
    debug!(
        "destination workflow {} exists with {} sticky note(s)",
        workflow_id,
        special_notes.len()
    );
    Ok(Json(DestinationStatus::present(
        workflow_id,
        workflow.get("name").cloned().unwrap_or(Value::Null),
        special_notes,
        current_revision_content,
    )))
}

/// `POST /api/copy-workflow`: append a revision entry and create or update the
/// workflow on the destination.
async fn copy_workflow(
    Extension(state): Extension<Arc<RelayState>>,
    Json(request): Json<CopyRequest>,
) -> Result<Json<CopyOutcome>, AppError> {
    let mut workflow = request.workflow.ok_or_else(|| {
        AppError::new(
            ErrorCategory::ValidationError,
            "missing 'workflow' in request body",
        )
        .with_code("RLY-COPY-400")
    })?;

    let reason = request
        .reason
        .unwrap_or_else(|| revision::DEFAULT_REASON.to_string());
    let entry = revision::format_entry(Utc::now(), &reason);
    // Silent no-op when the workflow carries no revision-history note.
    if !revision::append_revision_entry(&mut workflow, &entry) {
        debug!("workflow has no revision-history note; forwarding unmodified");
    }

    let (action, result) = match (request.is_update, request.workflow_id) {
        (true, Some(workflow_id)) => {
            let result = state
                .destination
                .put(&format!("/api/v1/workflows/{}", workflow_id), &workflow)
                .await?;
            (CopyAction::Updated, result)
        }
        _ => {
            let result = state.destination.post("/api/v1/workflows", &workflow).await?;
            (CopyAction::Created, result)
        }
    };

    info!("workflow {} on destination (reason: {})", action.as_str(), reason);
    Ok(Json(CopyOutcome {
        success: true,
        message: format!("Workflow {} successfully", action.as_str()),
        action,
        workflow: result,
    }))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response<Body> {
        let status = match self.category {
            ErrorCategory::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCategory::UpstreamError
            | ErrorCategory::NetworkError
            | ErrorCategory::ShapeError => StatusCode::BAD_GATEWAY,
            ErrorCategory::ConfigError | ErrorCategory::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        tracing::error!("request failed: {}", self);
        let mut error = json!({
            "code": self.code,
            "category": self.category,
            "message": self.message,
        });
        if let Some(upstream_status) = self.upstream_status {
            error["upstream_status"] = json!(upstream_status);
        }
        if let Some(upstream_body) = self.upstream_body {
            error["upstream_body"] = upstream_body;
        }
        let mut resp = Json(json!({ "error": error })).into_response();
        *resp.status_mut() = status;
        resp
    }
}
