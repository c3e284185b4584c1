use serde_json::Value;
use tracing::{debug, warn};

use crate::classify::classify_response;
use crate::error::{ModelScopeError, Result};
use crate::provider::PROVIDER_NAME;
use crate::transport::{HttpRequest, Transport};
use crate::types::{task_id_from, SubmitBody, TaskHandle};

/// Header that switches `/images/generations` into task mode.
pub const ASYNC_MODE_HEADER: &str = "X-ModelScope-Async-Mode";

/// Create a generation task. Single attempt, no retries.
///
/// `token` must already be trimmed and validated.
pub async fn submit_task(
    transport: &dyn Transport,
    base_url: &str,
    token: &str,
    body: &SubmitBody,
) -> Result<TaskHandle> {
    let url = format!("{}/images/generations", base_url);
    let request = HttpRequest::post(&url)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", token))
        .header(ASYNC_MODE_HEADER, "true")
        .body(serde_json::to_vec(body)?);

    debug!(model = %body.model, size = %body.size, seed = body.seed, "submitting generation task");

    let resp = transport
        .send(request)
        .await
        .map_err(|e| ModelScopeError::Network {
            context: format!("Failed to submit task to {}", url),
            source: e,
        })?;

    if !resp.is_success() {
        let err = classify_response(PROVIDER_NAME, resp.status, &resp.body);
        warn!(status = resp.status, code = %err.code(), "task submission rejected");
        return Err(err);
    }

    let data: Value = resp.json()?;
    match task_id_from(&data) {
        Some(id) => {
            debug!(task_id = %id, "task created");
            Ok(TaskHandle::new(id))
        }
        None => Err(ModelScopeError::generation_failed(
            PROVIDER_NAME,
            "No task_id returned",
        )),
    }
}
