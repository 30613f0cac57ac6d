//! Workflow transformer: the reduced editing view, the sticky-note scan, and
//! the revision-history append.
//!
//! Workflows stay untyped `serde_json::Value` documents throughout; the remote
//! platform owns their schema and this module only touches the handful of
//! fields the relay cares about.

use crate::core::types::StickyNote;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

/// Node type tag the platform uses for annotation notes.
pub const STICKY_NOTE_TYPE: &str = "n8n-nodes-base.stickyNote";
/// Name of the sticky note that holds the revision log.
pub const REVISION_NODE_NAME: &str = "Revision History";
/// Reason recorded when the operator supplies none.
pub const DEFAULT_REASON: &str = "No reason provided";

/// Format one revision-log line: `* <UTC timestamp>: <reason>`.
pub fn format_entry(timestamp: DateTime<Utc>, reason: &str) -> String {
    format!(
        "* {}: {}",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        reason
    )
}

/// Reduce a workflow document to the fields relevant for editing.
///
/// `nodes` defaults to an empty array and the three mappings default to empty
/// objects when absent; `id` and everything else is dropped.
pub fn clean_workflow(workflow: &Value) -> Value {
    json!({
        "name": workflow.get("name").cloned().unwrap_or(Value::Null),
        "nodes": workflow.get("nodes").cloned().unwrap_or_else(|| json!([])),
        "connections": workflow.get("connections").cloned().unwrap_or_else(|| json!({})),
        "settings": workflow.get("settings").cloned().unwrap_or_else(|| json!({})),
        "staticData": workflow.get("staticData").cloned().unwrap_or_else(|| json!({})),
    })
}

/// Collect every sticky note on a workflow, plus the current revision log.
///
/// All sticky notes are returned in document order; the one named
/// [`REVISION_NODE_NAME`] additionally contributes its `parameters.content`.
pub fn collect_sticky_notes(workflow: &Value) -> (Vec<StickyNote>, Option<String>) {
    let mut notes = Vec::new();
    let mut revision_content = None;

    let nodes = workflow.get("nodes").and_then(Value::as_array);
    for node in nodes.into_iter().flatten() {
        if node.get("type").and_then(Value::as_str) != Some(STICKY_NOTE_TYPE) {
            continue;
        }
        let name = node
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if name == REVISION_NODE_NAME && revision_content.is_none() {
            revision_content = Some(
                node.get("parameters")
                    .and_then(|params| params.get("content"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            );
        }
        notes.push(StickyNote {
            name,
            parameters: node.get("parameters").cloned().unwrap_or_else(|| json!({})),
            position: node.get("position").cloned().unwrap_or_else(|| json!([])),
        });
    }

    (notes, revision_content)
}

/// Append `entry` to the first revision-history sticky note, in place.
///
/// Linear scan, first match in document order wins; duplicates after it are
/// left alone. Returns `false` without touching the document when no node
/// matches — the caller forwards the workflow unmodified in that case.
pub fn append_revision_entry(workflow: &mut Value, entry: &str) -> bool {
    let nodes = match workflow.get_mut("nodes").and_then(Value::as_array_mut) {
        Some(nodes) => nodes,
        None => return false,
    };

    for node in nodes.iter_mut() {
        let is_revision_node = node.get("type").and_then(Value::as_str) == Some(STICKY_NOTE_TYPE)
            && node.get("name").and_then(Value::as_str) == Some(REVISION_NODE_NAME);
        if !is_revision_node {
            continue;
        }

        let current = node
            .get("parameters")
            .and_then(|params| params.get("content"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        let updated = if current.is_empty() {
            entry.to_string()
        } else {
            format!("{}\n{}", current, entry)
        };

        let node_map = match node.as_object_mut() {
            Some(map) => map,
            None => return false,
        };
        let params = node_map
            .entry("parameters")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(params) = params.as_object_mut() {
            params.insert("content".to_string(), Value::String(updated));
            return true;
        }
        return false;
    }

    false
}
