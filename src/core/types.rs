use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error category enumeration covering every failure class the relay surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Startup credentials missing or malformed; fatal before serving.
    ConfigError,
    /// Operator request is malformed (e.g. copy without a workflow body).
    ValidationError,
    /// Upstream answered 2xx but the payload does not have the expected shape.
    ShapeError,
    /// Upstream answered a non-2xx status.
    UpstreamError,
    /// Transport-level failure reaching an upstream (DNS, timeout, reset).
    NetworkError,
    InternalError,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
    Info,
}

/// `{id, name}` projection of one source workflow, as listed to the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub id: Value,
    pub name: Value,
}

/// Both views of a fetched workflow: untouched and reduced to editable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDetail {
    pub original: Value,
    pub cleaned: Value,
}

/// One sticky-note annotation node found on a destination workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyNote {
    pub name: String,
    pub parameters: Value,
    pub position: Value,
}

/// Outcome of probing the destination for a workflow ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DestinationStatus {
    Present {
        exists: bool,
        workflow_id: String,
        workflow_name: Value,
        special_notes: Vec<StickyNote>,
        current_revision_content: Option<String>,
    },
    Missing {
        exists: bool,
        message: String,
    },
}

impl DestinationStatus {
    pub fn missing() -> Self {
        DestinationStatus::Missing {
            exists: false,
            message: "The workflow does not exist on the destination.".to_string(),
        }
    }

    pub fn present(
        workflow_id: String,
        workflow_name: Value,
        special_notes: Vec<StickyNote>,
        current_revision_content: Option<String>,
    ) -> Self {
        DestinationStatus::Present {
            exists: true,
            workflow_id,
            workflow_name,
            special_notes,
            current_revision_content,
        }
    }
}

/// Operator request body for the copy/update operation.
#[derive(Debug, Clone, Deserialize)]
pub struct CopyRequest {
    pub workflow: Option<Value>,
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub is_update: bool,
    pub reason: Option<String>,
}

/// Which destination endpoint the copy operation took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyAction {
    Created,
    Updated,
}

impl CopyAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CopyAction::Created => "created",
            CopyAction::Updated => "updated",
        }
    }
}

/// Response returned to the operator after a successful copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyOutcome {
    pub success: bool,
    pub message: String,
    pub action: CopyAction,
    pub workflow: Value,
}
