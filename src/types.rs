use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::non_empty_str;

/// Opaque identifier of one in-flight generation task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle(String);

impl TaskHandle {
    /// Wrap a task id returned by the service.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw task id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remote task state as reported by `/tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    /// Any other value, including a missing field. Treated as non-terminal.
    Unknown(String),
}

impl TaskStatus {
    /// Parse a `task_status` value. The service spells success `SUCCEED`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "PENDING" => Self::Pending,
            "RUNNING" => Self::Running,
            "SUCCEED" | "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Final output of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// URL of the generated image.
    pub url: String,
    /// Seed actually used, so the generation can be reproduced.
    pub seed: u32,
}

/// JSON body sent to `POST /images/generations`.
///
/// Optional fields are left out of the serialized object entirely when
/// unset, never sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitBody {
    pub prompt: String,
    pub model: String,
    pub size: String,
    pub seed: u32,
    pub steps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loras: Option<Value>,
}

/// Task id from a submit response. Missing, empty, or non-string ids
/// are all `None`.
pub(crate) fn task_id_from(json: &Value) -> Option<String> {
    non_empty_str(json.get("task_id"))
}

/// The fields the poller reads from one status response.
///
/// Decoded leniently: a field of the wrong type is treated as absent, so
/// `"task_status": 5` is an unknown status and `"output_images": [null]`
/// has no image.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TaskSnapshot {
    pub status: TaskStatus,
    pub image_url: Option<String>,
    pub error_message: Option<String>,
}

impl TaskSnapshot {
    pub fn from_value(json: &Value) -> Self {
        let status = json
            .get("task_status")
            .and_then(Value::as_str)
            .map(TaskStatus::parse)
            .unwrap_or_else(|| TaskStatus::Unknown(String::new()));
        Self {
            status,
            image_url: non_empty_str(json.pointer("/output_images/0")),
            error_message: non_empty_str(json.get("error_message")),
        }
    }
}
